//! # Page 模块
//!
//! 页面切换的两阶段交叉淡化协调器。
//!
//! 旧子树的退出淡化**完成（或被跳过）之后**，新子树的进入淡化才会
//! 开始——顺序由阶段机显式保证，而非依赖宿主的隐式调度，避免新旧
//! 内容重叠闪现。
//!
//! ```text
//! Idle → Exiting → Entering → Completed
//! ```

use crate::keyframe::Keyframe;
use crate::playback::{Playback, PlaybackState, StartCondition, Trigger};
use crate::sequence::{self, defaults};

/// 页面切换阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    /// 空闲
    Idle,
    /// 旧内容退出中
    Exiting,
    /// 新内容进入中（仅在退出完成后可达）
    Entering,
    /// 切换完成
    Completed,
}

/// 页面切换协调器
///
/// 每次 [`start`](Self::start) 开启一轮新的切换；单轮内部的退出/进入
/// 实例各自是 one-shot 的。中点（退出完成、进入尚未呈现）是宿主换挂
/// 内容子树的时机，通过 [`take_pending`](Self::take_pending) 领取。
#[derive(Debug, Clone)]
pub struct PageTransition {
    /// 退出侧实例（作用于旧子树）
    exit: Playback,
    /// 进入侧实例（作用于新子树）
    enter: Playback,
    /// 当前阶段
    phase: PagePhase,
    /// 待换挂的新内容标识
    pending: Option<String>,
}

impl PageTransition {
    /// 创建空闲的协调器
    pub fn new() -> Self {
        Self {
            exit: Playback::new(sequence::page_fade_exit(), StartCondition::OnMount),
            enter: Playback::new(sequence::page_fade_enter(), StartCondition::OnMount),
            phase: PagePhase::Idle,
            pending: None,
        }
    }

    /// 开始切换（默认 0.2 秒每阶段）
    ///
    /// # 参数
    /// - `pending`: 待换挂的新内容标识，中点时由宿主领取
    pub fn start(&mut self, pending: impl Into<String>) {
        self.start_with_duration(defaults::PAGE_FADE_DURATION, pending);
    }

    /// 开始切换（自定义每阶段时长）
    pub fn start_with_duration(&mut self, duration: f32, pending: impl Into<String>) {
        let duration = duration.max(0.01);

        let mut exit_seq = sequence::page_fade_exit();
        exit_seq.duration = duration;
        self.exit = Playback::new(exit_seq, StartCondition::OnMount);

        let mut enter_seq = sequence::page_fade_enter();
        enter_seq.duration = duration;
        self.enter = Playback::new(enter_seq, StartCondition::OnMount);

        self.pending = Some(pending.into());
        self.phase = PagePhase::Exiting;
        // 只挂载退出侧：进入侧在退出完成前不得开始
        self.exit.trigger(Trigger::Mount);
    }

    /// 推进切换
    ///
    /// # 返回
    /// - `true`: 切换仍在进行中
    /// - `false`: 已完成或处于空闲状态
    pub fn update(&mut self, dt: f32) -> bool {
        match self.phase {
            PagePhase::Idle | PagePhase::Completed => false,
            PagePhase::Exiting => {
                self.exit.update(dt);
                if self.exit.state() == PlaybackState::Resting {
                    // 两阶段提交：退出完成才放行进入
                    self.phase = PagePhase::Entering;
                    self.enter.trigger(Trigger::Mount);
                }
                true
            }
            PagePhase::Entering => {
                self.enter.update(dt);
                if self.enter.state() == PlaybackState::Resting {
                    self.phase = PagePhase::Completed;
                    return false;
                }
                true
            }
        }
    }

    /// 跳过整个切换
    ///
    /// 旧内容立即完全隐藏、新内容立即完全可见。
    pub fn skip(&mut self) {
        if self.phase == PagePhase::Idle {
            return;
        }
        if self.phase == PagePhase::Exiting {
            self.exit.skip();
            self.enter.trigger(Trigger::Mount);
        }
        self.enter.skip();
        self.phase = PagePhase::Completed;
    }

    /// 当前阶段
    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    /// 是否正在切换中
    pub fn is_active(&self) -> bool {
        matches!(self.phase, PagePhase::Exiting | PagePhase::Entering)
    }

    /// 是否已过中点（旧内容已完全退出，可以换挂子树）
    pub fn past_midpoint(&self) -> bool {
        matches!(self.phase, PagePhase::Entering | PagePhase::Completed)
    }

    /// 领取待换挂的新内容标识
    ///
    /// 仅在过了中点之后返回 `Some`，保证宿主不会提前换挂。
    pub fn take_pending(&mut self) -> Option<String> {
        if self.past_midpoint() {
            self.pending.take()
        } else {
            None
        }
    }

    /// 旧子树的当前关键帧
    pub fn exit_keyframe(&self) -> Keyframe {
        match self.phase {
            PagePhase::Idle => Keyframe::rest(),
            PagePhase::Exiting => self.exit.current_keyframe(),
            // 中点之后旧内容保持完全隐藏
            PagePhase::Entering | PagePhase::Completed => Keyframe::with_opacity(0.0),
        }
    }

    /// 新子树的当前关键帧
    pub fn enter_keyframe(&self) -> Keyframe {
        match self.phase {
            // 退出完成前新内容不得呈现
            PagePhase::Idle | PagePhase::Exiting => Keyframe::with_opacity(0.0),
            PagePhase::Entering => self.enter.current_keyframe(),
            PagePhase::Completed => Keyframe::rest(),
        }
    }
}

impl Default for PageTransition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_by_default() {
        let pt = PageTransition::new();
        assert_eq!(pt.phase(), PagePhase::Idle);
        assert!(!pt.is_active());
        assert!(pt.exit_keyframe().is_rest());
    }

    #[test]
    fn test_enter_gated_on_exit_completion() {
        let mut pt = PageTransition::new();
        pt.start("tools");
        assert_eq!(pt.phase(), PagePhase::Exiting);

        // 退出进行中：新内容必须保持不可见
        pt.update(0.1);
        assert_eq!(pt.phase(), PagePhase::Exiting);
        assert_eq!(pt.enter_keyframe().opacity, 0.0);
        assert!(pt.take_pending().is_none());

        // 退出完成：进入阶段开始，旧内容保持隐藏
        pt.update(0.15);
        assert_eq!(pt.phase(), PagePhase::Entering);
        assert_eq!(pt.exit_keyframe().opacity, 0.0);
        assert_eq!(pt.take_pending(), Some("tools".to_string()));

        // 进入完成
        pt.update(0.25);
        assert_eq!(pt.phase(), PagePhase::Completed);
        assert!(pt.enter_keyframe().is_rest());
        assert!(!pt.update(0.1));
    }

    #[test]
    fn test_no_overlap_invariant() {
        // 任意时刻，旧内容与新内容不会同时半透明可见
        let mut pt = PageTransition::new();
        pt.start("about");

        let mut t = 0.0;
        while t < 1.0 {
            pt.update(0.016);
            t += 0.016;
            let exit = pt.exit_keyframe().opacity;
            let enter = pt.enter_keyframe().opacity;
            assert!(
                exit == 0.0 || enter == 0.0,
                "新旧内容同时可见：exit={exit} enter={enter}"
            );
        }
    }

    #[test]
    fn test_skip_settles_both_sides() {
        let mut pt = PageTransition::new();
        pt.start("portfolio");
        pt.update(0.05);

        pt.skip();
        assert_eq!(pt.phase(), PagePhase::Completed);
        assert_eq!(pt.exit_keyframe().opacity, 0.0);
        assert!(pt.enter_keyframe().is_rest());
        assert_eq!(pt.take_pending(), Some("portfolio".to_string()));
    }

    #[test]
    fn test_custom_duration() {
        let mut pt = PageTransition::new();
        pt.start_with_duration(0.5, "skills");

        // 默认时长 0.2 已过，但自定义 0.5 未过：仍在退出阶段
        pt.update(0.3);
        assert_eq!(pt.phase(), PagePhase::Exiting);
        pt.update(0.3);
        assert_eq!(pt.phase(), PagePhase::Entering);
    }

    #[test]
    fn test_skip_while_idle_noop() {
        let mut pt = PageTransition::new();
        pt.skip();
        assert_eq!(pt.phase(), PagePhase::Idle);
    }
}
