//! # Keyframe 模块
//!
//! 关键帧与关键帧序列的定义。
//!
//! 一个 [`Keyframe`] 是归一化时间轴 [0, 1] 上某一点的视觉状态采样
//! （偏移、透明度、缩放、旋转）。[`KeyframeSequence`] 是时间有序的
//! 采样集合，附带时长、延迟、缓动与重复模式，支持线性插值采样。

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 零向量
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// 单位向量 (1, 1)
    pub const fn one() -> Self {
        Self { x: 1.0, y: 1.0 }
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// 关键帧
///
/// 归一化时间轴上某一点的完整视觉状态。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// 相对静止位置的像素偏移
    pub offset: Vec2,
    /// 透明度 (0.0 - 1.0)
    pub opacity: f32,
    /// 缩放因子
    pub scale: Vec2,
    /// 旋转角度（度）
    pub rotation: f32,
}

impl Default for Keyframe {
    fn default() -> Self {
        Self::rest()
    }
}

impl Keyframe {
    /// 静止状态：无偏移、完全不透明、无缩放、无旋转
    ///
    /// 所有 reveal 类序列的终点都必须是该状态，保证动画完成或被跳过后
    /// 内容始终可读。
    pub const fn rest() -> Self {
        Self {
            offset: Vec2::zero(),
            opacity: 1.0,
            scale: Vec2::one(),
            rotation: 0.0,
        }
    }

    /// 创建只有偏移的关键帧
    pub fn with_offset(x: f32, y: f32) -> Self {
        Self {
            offset: Vec2::new(x, y),
            ..Self::rest()
        }
    }

    /// 创建只有透明度的关键帧
    pub fn with_opacity(opacity: f32) -> Self {
        Self {
            opacity,
            ..Self::rest()
        }
    }

    /// 线性插值到另一个关键帧
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            offset: self.offset.lerp(other.offset, t),
            opacity: self.opacity + (other.opacity - self.opacity) * t,
            scale: self.scale.lerp(other.scale, t),
            rotation: self.rotation + (other.rotation - self.rotation) * t,
        }
    }

    /// 是否为静止状态
    pub fn is_rest(&self) -> bool {
        *self == Self::rest()
    }
}

/// 重复模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    /// 播放一次后进入静止（one-shot）
    Once,
    /// 无限循环，直到所属实例卸载
    Loop,
    /// 镜像重复 n 个周期（奇数周期反向），随后静止
    Mirrored(u32),
}

impl Repeat {
    /// 是否为 one-shot 类动画
    pub fn is_one_shot(&self) -> bool {
        !matches!(self, Self::Loop)
    }
}

/// 关键帧序列
///
/// 归一化时间轴 [0, 1] 上的有序采样集合。采样点之间线性插值；
/// 缓动由调用方（[`crate::playback::Playback`]）在归一化时间上
/// 预先施加，序列本身只做分段插值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeSequence {
    /// (归一化时间, 关键帧) 采样点，按时间升序
    frames: Vec<(f32, Keyframe)>,
    /// 单个周期的时长（秒）
    pub duration: f32,
    /// 启动延迟（秒）
    pub delay: f32,
    /// 缓动函数
    pub easing: EasingFunction,
    /// 重复模式
    pub repeat: Repeat,
}

impl KeyframeSequence {
    /// 创建新的序列
    ///
    /// 采样点会按时间升序排序；时长下限为 0。
    pub fn new(duration: f32, mut frames: Vec<(f32, Keyframe)>) -> Self {
        frames.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            frames,
            duration: duration.max(0.0),
            delay: 0.0,
            easing: EasingFunction::default(),
            repeat: Repeat::Once,
        }
    }

    /// 空序列（no-op 动画）
    ///
    /// 采样永远返回静止状态。零长文本的逐字显现等退化情况使用它。
    pub fn empty() -> Self {
        Self::new(0.0, Vec::new())
    }

    /// 设置延迟
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 设置重复模式
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// 是否为空序列
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 采样点数量
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// 采样点视图
    pub fn frames(&self) -> &[(f32, Keyframe)] {
        &self.frames
    }

    /// 首个关键帧
    pub fn first(&self) -> Option<&Keyframe> {
        self.frames.first().map(|(_, k)| k)
    }

    /// 末个关键帧
    pub fn last(&self) -> Option<&Keyframe> {
        self.frames.last().map(|(_, k)| k)
    }

    /// 末帧是否为静止状态（reveal 类序列的落位不变量）
    pub fn settles_to_rest(&self) -> bool {
        self.last().is_none_or(|k| k.is_rest())
    }

    /// 在归一化时间 `t` 处采样
    ///
    /// `t` 会被限制到 [0, 1]。空序列返回静止状态；`t` 落在首个采样点
    /// 之前时返回首帧，落在末个采样点之后时返回末帧。
    pub fn sample(&self, t: f32) -> Keyframe {
        let t = t.clamp(0.0, 1.0);

        let Some(&(first_t, first)) = self.frames.first() else {
            return Keyframe::rest();
        };
        if t <= first_t {
            return first;
        }

        for pair in self.frames.windows(2) {
            let (t0, a) = pair[0];
            let (t1, b) = pair[1];
            if t <= t1 {
                if t1 - t0 <= f32::EPSILON {
                    return b;
                }
                let local = (t - t0) / (t1 - t0);
                return a.lerp(&b, local);
            }
        }

        // 落在末个采样点之后
        self.frames.last().map(|(_, k)| *k).unwrap_or_default()
    }
}
