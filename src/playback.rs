//! # Playback 模块
//!
//! 单个动画实例的生命周期状态机与时间轴推进。
//!
//! ## 状态机
//!
//! ```text
//! Unmounted → Pending → Playing → Resting
//!                          ↺ (循环类自环)
//! ```
//!
//! - one-shot 类（reveal / stagger / page）：`Playing → Resting` 终止，
//!   挂载期间一旦静止，触发条件再次出现也不会重播；
//! - 循环类（float）：`Playing` 自环，仅在卸载时直接 `→ Unmounted`；
//! - 悬停类（glitch）：固定循环播完进入 `Resting`，悬停结束重新回到
//!   `Pending` 待触发。
//!
//! 卸载在任意时刻立即且无条件终止该实例的关键帧排程。

use serde::{Deserialize, Serialize};

use crate::keyframe::{Keyframe, KeyframeSequence, Repeat};
use crate::spec::{AnimationKind, AnimationSpec};

/// 播放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// 未挂载
    #[default]
    Unmounted,
    /// 已挂载，等待触发条件
    Pending,
    /// 正在播放
    Playing,
    /// 播放完毕，停在终态
    Resting,
}

impl PlaybackState {
    /// 是否为活跃状态（需要推进时间轴）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// 触发事件
///
/// 由宿主 UI 层投递：视口进入、悬停起止、挂载/卸载。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// 内容挂载
    Mount,
    /// 内容首次/再次进入视口
    EnterViewport,
    /// 指针悬停开始
    HoverStart,
    /// 指针悬停结束
    HoverEnd,
    /// 内容卸载
    Unmount,
}

/// 启动条件
///
/// 各动画种类映射到其对应的触发条件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCondition {
    /// 挂载即开始（float / fade-page）
    OnMount,
    /// 首次进入视口时开始（slide / letter-reveal）
    OnEnterViewport,
    /// 悬停期间播放（glitch）
    WhileHover,
}

impl StartCondition {
    /// 从动画种类推导启动条件
    pub fn for_kind(kind: &AnimationKind) -> Self {
        match kind {
            AnimationKind::Float { .. } | AnimationKind::FadePage => Self::OnMount,
            AnimationKind::Glitch { .. } => Self::WhileHover,
            AnimationKind::LetterReveal { .. } | AnimationKind::Slide { .. } => {
                Self::OnEnterViewport
            }
        }
    }
}

/// 动画事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// 播放开始
    Started,
    /// 播放完成（含被跳过）
    Completed,
    /// 播放被中断（卸载、悬停结束）
    Cancelled,
}

/// 动画实例
///
/// 持有一个关键帧序列及其生命周期状态和时钟。宿主按重绘节奏调用
/// [`update`](Self::update) 推进，通过
/// [`current_keyframe`](Self::current_keyframe) 取当前视觉状态。
#[derive(Debug, Clone)]
pub struct Playback {
    /// 关键帧序列
    sequence: KeyframeSequence,
    /// 启动条件
    start: StartCondition,
    /// 当前状态
    state: PlaybackState,
    /// 进入 Playing 后经过的时间（含延迟段）
    elapsed: f32,
    /// one-shot 闩锁：触发条件已消耗，挂载期间不再重播
    fired: bool,
}

impl Playback {
    /// 创建新的动画实例（初始为 `Unmounted`）
    pub fn new(sequence: KeyframeSequence, start: StartCondition) -> Self {
        Self {
            sequence,
            start,
            state: PlaybackState::Unmounted,
            elapsed: 0.0,
            fired: false,
        }
    }

    /// 由规格构建实例集合
    ///
    /// 多数种类产生单个实例；`LetterReveal` 为每个字符产生一个实例，
    /// 它们共享同一触发条件（整体进入视口时一起触发）。
    pub fn from_spec(spec: &AnimationSpec) -> Vec<Self> {
        let start = StartCondition::for_kind(&spec.kind);
        crate::sequence::build(spec)
            .into_iter()
            .map(|sequence| Self::new(sequence, start))
            .collect()
    }

    /// 当前状态
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// 序列视图
    pub fn sequence(&self) -> &KeyframeSequence {
        &self.sequence
    }

    /// 是否正在播放
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// 投递触发事件
    ///
    /// # 返回
    /// 本次触发产生的事件列表（至多一个）
    pub fn trigger(&mut self, trigger: Trigger) -> Vec<AnimationEvent> {
        match trigger {
            Trigger::Mount => {
                if self.state == PlaybackState::Unmounted {
                    self.state = PlaybackState::Pending;
                    self.fired = false;
                    if self.start == StartCondition::OnMount {
                        return self.begin();
                    }
                }
                Vec::new()
            }
            Trigger::EnterViewport => {
                // one-shot：已触发过（Playing/Resting）不再重播
                if self.start == StartCondition::OnEnterViewport
                    && self.state == PlaybackState::Pending
                    && !self.fired
                {
                    return self.begin();
                }
                Vec::new()
            }
            Trigger::HoverStart => {
                if self.start == StartCondition::WhileHover
                    && self.state == PlaybackState::Pending
                {
                    return self.begin();
                }
                Vec::new()
            }
            Trigger::HoverEnd => {
                if self.start == StartCondition::WhileHover {
                    // 悬停结束：落回静止并重新待触发
                    let was_playing = self.state == PlaybackState::Playing;
                    if matches!(self.state, PlaybackState::Playing | PlaybackState::Resting) {
                        self.state = PlaybackState::Pending;
                        self.elapsed = 0.0;
                        self.fired = false;
                        if was_playing {
                            return vec![AnimationEvent::Cancelled];
                        }
                    }
                }
                Vec::new()
            }
            Trigger::Unmount => {
                let was_active = self.state == PlaybackState::Playing;
                self.state = PlaybackState::Unmounted;
                self.elapsed = 0.0;
                if was_active {
                    vec![AnimationEvent::Cancelled]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// 开始播放
    fn begin(&mut self) -> Vec<AnimationEvent> {
        self.fired = true;
        self.elapsed = 0.0;

        // 零时长或空序列：立即完成，保证落位
        if self.sequence.duration <= 0.0 || self.sequence.is_empty() {
            self.state = PlaybackState::Resting;
            return vec![AnimationEvent::Started, AnimationEvent::Completed];
        }

        self.state = PlaybackState::Playing;
        vec![AnimationEvent::Started]
    }

    /// 推进时间轴
    ///
    /// # 返回
    /// 本帧产生的事件列表（至多一个）
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        if self.state != PlaybackState::Playing {
            return Vec::new();
        }

        self.elapsed += dt.max(0.0);
        let active = self.elapsed - self.sequence.delay;
        if active < 0.0 {
            return Vec::new();
        }

        match self.sequence.repeat {
            Repeat::Loop => Vec::new(),
            Repeat::Once => {
                if active >= self.sequence.duration {
                    self.state = PlaybackState::Resting;
                    vec![AnimationEvent::Completed]
                } else {
                    Vec::new()
                }
            }
            Repeat::Mirrored(cycles) => {
                if active >= self.sequence.duration * cycles as f32 {
                    self.state = PlaybackState::Resting;
                    vec![AnimationEvent::Completed]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// 跳过播放
    ///
    /// one-shot 实例直接进入终态（内容立即落位可读）；循环类无终态，
    /// 跳过不适用，返回空。
    pub fn skip(&mut self) -> Vec<AnimationEvent> {
        if self.sequence.repeat.is_one_shot()
            && matches!(self.state, PlaybackState::Pending | PlaybackState::Playing)
        {
            self.fired = true;
            self.state = PlaybackState::Resting;
            return vec![AnimationEvent::Completed];
        }
        Vec::new()
    }

    /// 当前关键帧
    ///
    /// 各状态的采样规则：
    /// - `Unmounted`：静止状态（无内容可画，返回值仅为占位）；
    /// - `Pending`：one-shot 类停在首帧（触发前内容保持隐藏），
    ///   其余停在静止状态；
    /// - `Playing`：按重复模式归一化时间、施加缓动后分段插值；
    /// - `Resting`：终态帧。
    pub fn current_keyframe(&self) -> Keyframe {
        match self.state {
            PlaybackState::Unmounted => Keyframe::rest(),
            PlaybackState::Pending => {
                if self.sequence.repeat.is_one_shot() && self.start != StartCondition::WhileHover {
                    self.sequence.sample(0.0)
                } else {
                    Keyframe::rest()
                }
            }
            PlaybackState::Playing => {
                let active = self.elapsed - self.sequence.delay;
                if active <= 0.0 {
                    return self.sequence.sample(self.sequence.easing.apply(0.0));
                }
                let raw = self.normalized_time(active);
                self.sequence.sample(self.sequence.easing.apply(raw))
            }
            PlaybackState::Resting => {
                let t = self.terminal_time();
                self.sequence.sample(self.sequence.easing.apply(t))
            }
        }
    }

    /// 按重复模式把活跃时间折算为归一化时间
    fn normalized_time(&self, active: f32) -> f32 {
        let duration = self.sequence.duration;
        if duration <= 0.0 {
            return 1.0;
        }
        let progress = active / duration;

        match self.sequence.repeat {
            Repeat::Once => progress.min(1.0),
            Repeat::Loop => progress.fract(),
            Repeat::Mirrored(cycles) => {
                if progress >= cycles as f32 {
                    return self.terminal_time();
                }
                let cycle = progress.floor() as u32;
                let local = progress.fract();
                // 奇数周期反向
                if cycle % 2 == 1 { 1.0 - local } else { local }
            }
        }
    }

    /// 终态的归一化时间
    fn terminal_time(&self) -> f32 {
        match self.sequence.repeat {
            Repeat::Once | Repeat::Loop => 1.0,
            // 偶数次镜像循环结束在反向端
            Repeat::Mirrored(cycles) => {
                if cycles % 2 == 0 {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }
}
