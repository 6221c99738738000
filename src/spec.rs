//! # Spec 模块
//!
//! 动画参数的声明式定义：动画种类、强度档位、方向与 [`AnimationSpec`]。
//!
//! 这里是所有参数名称与解析逻辑的**唯一来源**。字符串到枚举的转换有
//! 两个入口：
//! - 严格入口：`FromStr`，枚举外的值返回 [`PresenterError::InvalidParameter`]；
//! - 宽松入口：`resolve_*`，枚举外的值降级为文档化的默认档位并记录
//!   `tracing::warn!`（降级模式，不是静默容错）。

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PresenterError, PresenterResult};
use crate::keyframe::Vec2;

/// 浮动动画强度
///
/// 决定上下浮动循环的振幅（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatIntensity {
    /// 轻微（5 px）
    Subtle,
    /// 中等（10 px）
    #[default]
    Medium,
    /// 强烈（20 px）
    Strong,
}

impl FloatIntensity {
    /// 浮动振幅（像素）
    ///
    /// 按档位严格递增：5 < 10 < 20。
    pub const fn amplitude(&self) -> f32 {
        match self {
            Self::Subtle => 5.0,
            Self::Medium => 10.0,
            Self::Strong => 20.0,
        }
    }
}

impl FromStr for FloatIntensity {
    type Err = PresenterError;

    fn from_str(s: &str) -> PresenterResult<Self> {
        match s.to_lowercase().as_str() {
            "subtle" => Ok(Self::Subtle),
            "medium" => Ok(Self::Medium),
            "strong" => Ok(Self::Strong),
            other => Err(PresenterError::invalid("intensity", other)),
        }
    }
}

/// 抖动动画强度
///
/// 决定悬停抖动的 x 抖动幅度与缩放抖动幅度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlitchIntensity {
    /// 低
    Low,
    /// 中
    #[default]
    Medium,
    /// 高
    High,
}

impl FromStr for GlitchIntensity {
    type Err = PresenterError;

    fn from_str(s: &str) -> PresenterResult<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(PresenterError::invalid("intensity", other)),
        }
    }
}

/// 显现方向
///
/// 内容向该方向移动落位，起始偏移在相反一侧。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 向上显现（从下方进入）
    #[default]
    Up,
    /// 向下显现（从上方进入）
    Down,
    /// 向左显现（从右方进入）
    Left,
    /// 向右显现（从左方进入）
    Right,
}

impl Direction {
    /// 计算起始偏移
    ///
    /// 偏移只在一条轴上非零，符号与行进方向相反：
    /// `Up ⇒ (0, +d)`，`Down ⇒ (0, -d)`，`Left ⇒ (-d, 0)`，`Right ⇒ (d, 0)`。
    pub fn starting_offset(&self, distance: f32) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, distance),
            Self::Down => Vec2::new(0.0, -distance),
            Self::Left => Vec2::new(-distance, 0.0),
            Self::Right => Vec2::new(distance, 0.0),
        }
    }
}

impl FromStr for Direction {
    type Err = PresenterError;

    fn from_str(s: &str) -> PresenterResult<Self> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(PresenterError::invalid("direction", other)),
        }
    }
}

/// 动画种类
///
/// 与种类强绑定的参数直接放在变体上，保证 `AnimationSpec`
/// 自洽、不可表示非法组合。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnimationKind {
    /// 上下浮动循环（挂载即开始，无限重复）
    Float {
        /// 浮动强度
        intensity: FloatIntensity,
    },
    /// 悬停抖动（悬停期间播放固定 3 次镜像循环）
    Glitch {
        /// 抖动强度
        intensity: GlitchIntensity,
    },
    /// 页面交叉淡入淡出（子树切换时）
    FadePage,
    /// 逐字显现（首次进入视口时，每字符独立错峰）
    LetterReveal {
        /// 待显现的文本
        text: String,
    },
    /// 方向滑入显现（首次进入视口时，one-shot）
    Slide {
        /// 显现方向
        direction: Direction,
    },
}

impl AnimationKind {
    /// 该种类的默认时长（秒）
    pub fn default_duration(&self) -> f32 {
        use crate::sequence::defaults;
        match self {
            Self::Float { .. } => defaults::FLOAT_CYCLE_DURATION,
            Self::Glitch { .. } => defaults::GLITCH_CYCLE_DURATION,
            Self::FadePage => defaults::PAGE_FADE_DURATION,
            Self::LetterReveal { .. } => defaults::LETTER_DURATION,
            Self::Slide { .. } => defaults::SLIDE_DURATION,
        }
    }

    /// 是否为 one-shot 类（完成一次后静止）
    pub fn is_one_shot(&self) -> bool {
        matches!(
            self,
            Self::FadePage | Self::LetterReveal { .. } | Self::Slide { .. }
        )
    }
}

/// 动画规格
///
/// 不可变值对象，在所包裹内容挂载（或进入视口）时构造，随内容卸载
/// 而丢弃。除自身参数外不持有任何状态，对输出是纯的。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    /// 动画种类（含种类专属参数）
    #[serde(flatten)]
    pub kind: AnimationKind,
    /// 单个周期/阶段时长（秒，正数）
    pub duration_seconds: f32,
    /// 启动延迟（秒，非负，默认 0）
    #[serde(default)]
    pub delay_seconds: f32,
    /// 方向类动画的行进距离（像素，非负整数）
    #[serde(default)]
    pub distance_pixels: u32,
}

impl AnimationSpec {
    /// 创建规格，时长取该种类的默认值
    pub fn new(kind: AnimationKind) -> Self {
        let duration_seconds = kind.default_duration();
        Self {
            kind,
            duration_seconds,
            delay_seconds: 0.0,
            distance_pixels: 0,
        }
    }

    /// 设置时长（下限 0.01 秒）
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration_seconds = seconds.max(0.01);
        self
    }

    /// 设置延迟（下限 0）
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay_seconds = seconds.max(0.0);
        self
    }

    /// 设置行进距离
    pub fn with_distance(mut self, pixels: u32) -> Self {
        self.distance_pixels = pixels;
        self
    }

    /// 严格校验
    ///
    /// 构造器对参数做了钳制，来自反序列化等外部通道的值
    /// 用此方法校验。
    pub fn validate(&self) -> PresenterResult<()> {
        if self.duration_seconds <= 0.0 || !self.duration_seconds.is_finite() {
            return Err(PresenterError::invalid(
                "duration_seconds",
                self.duration_seconds.to_string(),
            ));
        }
        if self.delay_seconds < 0.0 || !self.delay_seconds.is_finite() {
            return Err(PresenterError::invalid(
                "delay_seconds",
                self.delay_seconds.to_string(),
            ));
        }
        Ok(())
    }
}

/// 宽松解析浮动强度
///
/// 未知名称降级为 [`FloatIntensity::Medium`] 并记录警告。
pub fn resolve_float_intensity(name: &str) -> FloatIntensity {
    match FloatIntensity::from_str(name) {
        Ok(intensity) => intensity,
        Err(_) => {
            tracing::warn!(name = %name, "未知浮动强度，降级为 medium");
            FloatIntensity::Medium
        }
    }
}

/// 宽松解析抖动强度
///
/// 未知名称降级为 [`GlitchIntensity::Medium`] 并记录警告。
pub fn resolve_glitch_intensity(name: &str) -> GlitchIntensity {
    match GlitchIntensity::from_str(name) {
        Ok(intensity) => intensity,
        Err(_) => {
            tracing::warn!(name = %name, "未知抖动强度，降级为 medium");
            GlitchIntensity::Medium
        }
    }
}

/// 宽松解析方向
///
/// 未知名称降级为 [`Direction::Up`] 并记录警告。
pub fn resolve_direction(name: &str) -> Direction {
    match Direction::from_str(name) {
        Ok(direction) => direction,
        Err(_) => {
            tracing::warn!(name = %name, "未知显现方向，降级为 up");
            Direction::Up
        }
    }
}
