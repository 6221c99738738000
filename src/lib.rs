//! # Motion Runtime
//!
//! 触发驱动的内容过渡呈现核心库。
//!
//! ## 架构概述
//!
//! `motion-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它通过 **触发事件 + 帧时钟** 与宿主 UI 层通信：
//!
//! ```text
//! Host (UI 层)                    Runtime
//!   │                                │
//!   │──── Trigger（视口/悬停/挂载）──►│
//!   │──── update(dt) ───────────────►│
//!   │◄─── Keyframe + AnimationEvent ─│
//!   │                                │
//! ```
//!
//! 宿主负责绘制与事件采集；本库负责把声明式的 [`AnimationSpec`]
//! 映射为确定性的关键帧序列，并维护每个实例的生命周期状态机。
//! 所有计算函数都是纯的：相同参数产生逐位一致的序列。
//!
//! ## 核心类型
//!
//! - [`AnimationSpec`]：不可变的动画规格（种类、强度、时长、延迟、距离）
//! - [`Keyframe`] / [`KeyframeSequence`]：归一化时间轴上的视觉状态采样
//! - [`Playback`]：单实例状态机（`Unmounted → Pending → Playing → Resting`）
//! - [`PageTransition`]：页面切换的两阶段交叉淡化协调器
//! - [`EasingFunction`]：缓动函数
//!
//! ## 使用示例
//!
//! ```ignore
//! use motion_runtime::{AnimationKind, AnimationSpec, Direction, Playback, Trigger};
//!
//! // 声明一个向左滑入的显现动画
//! let spec = AnimationSpec::new(AnimationKind::Slide { direction: Direction::Left })
//!     .with_distance(30);
//! let mut playback = Playback::from_spec(&spec).remove(0);
//!
//! // 宿主投递触发事件并按重绘节奏推进
//! playback.trigger(Trigger::Mount);
//! playback.trigger(Trigger::EnterViewport);
//! loop {
//!     let events = playback.update(dt);
//!     let frame = playback.current_keyframe();
//!     // 宿主按 frame 绘制内容…
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`spec`]：动画规格与参数解析
//! - [`keyframe`]：关键帧与序列
//! - [`sequence`]：序列计算的纯函数与默认参数
//! - [`easing`]：缓动函数
//! - [`playback`]：生命周期状态机
//! - [`page`]：页面切换协调器
//! - [`error`]：错误类型定义

pub mod easing;
pub mod error;
pub mod keyframe;
pub mod page;
pub mod playback;
pub mod sequence;
pub mod spec;

// 重导出核心类型
pub use easing::EasingFunction;
pub use error::{PresenterError, PresenterResult};
pub use keyframe::{Keyframe, KeyframeSequence, Repeat, Vec2};
pub use page::{PagePhase, PageTransition};
pub use playback::{AnimationEvent, Playback, PlaybackState, StartCondition, Trigger};
pub use sequence::{
    GlitchVariant, StaggerUnit, float_cycle, glitch_cycle, glitch_variant, page_fade_enter,
    page_fade_exit, reveal_sequence, staggered_reveal, staggered_reveal_with,
};
pub use spec::{
    AnimationKind, AnimationSpec, Direction, FloatIntensity, GlitchIntensity,
    resolve_direction, resolve_float_intensity, resolve_glitch_intensity,
};
