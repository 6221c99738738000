//! # Sequence 模块
//!
//! 由 [`AnimationSpec`] 计算关键帧序列的纯函数集合。
//!
//! 所有函数对相同参数产生完全一致的结果（无隐藏状态）。各动画种类的
//! 默认参数集中在 [`defaults`] 子模块，是默认值的**唯一来源**。

use crate::easing::EasingFunction;
use crate::keyframe::{Keyframe, KeyframeSequence, Repeat, Vec2};
use crate::spec::{AnimationKind, AnimationSpec, Direction, FloatIntensity, GlitchIntensity};

/// 各动画种类的默认参数
///
/// 任何需要默认时长/幅度的地方都应使用这些常量，而非硬编码数字。
pub mod defaults {
    /// Float（浮动循环）单周期默认时长
    pub const FLOAT_CYCLE_DURATION: f32 = 3.0;
    /// Glitch（悬停抖动）单周期时长
    pub const GLITCH_CYCLE_DURATION: f32 = 0.2;
    /// Glitch 镜像重复次数
    pub const GLITCH_REPEATS: u32 = 3;
    /// Slide（方向显现）默认时长
    pub const SLIDE_DURATION: f32 = 0.3;
    /// LetterReveal 单字符显现时长
    pub const LETTER_DURATION: f32 = 0.4;
    /// LetterReveal 相邻字符的错峰间隔
    pub const LETTER_STAGGER: f32 = 0.05;
    /// LetterReveal 字符起始下移距离（像素）
    pub const LETTER_OFFSET: f32 = 20.0;
    /// LetterReveal 字符起始旋转角（度）
    pub const LETTER_ROTATION: f32 = -90.0;
    /// FadePage（页面交叉淡化）单阶段时长
    pub const PAGE_FADE_DURATION: f32 = 0.2;
}

/// 抖动扰动参数
///
/// 按强度档位离散取值的 x 抖动幅度与缩放抖动幅度。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchVariant {
    /// x 轴抖动幅度（像素）
    pub jitter_px: f32,
    /// 缩放抖动幅度（相对 1.0 的偏差）
    pub scale_jitter: f32,
}

/// 计算抖动扰动参数
pub fn glitch_variant(intensity: GlitchIntensity) -> GlitchVariant {
    match intensity {
        GlitchIntensity::Low => GlitchVariant {
            jitter_px: 2.0,
            scale_jitter: 0.02,
        },
        GlitchIntensity::Medium => GlitchVariant {
            jitter_px: 4.0,
            scale_jitter: 0.04,
        },
        GlitchIntensity::High => GlitchVariant {
            jitter_px: 8.0,
            scale_jitter: 0.08,
        },
    }
}

/// 浮动循环序列
///
/// y 偏移三点循环 `[-d, +d, -d]`，d 由强度决定（5/10/20），
/// 无限重复直到所属实例卸载。
pub fn float_cycle(intensity: FloatIntensity) -> KeyframeSequence {
    let d = intensity.amplitude();
    KeyframeSequence::new(
        defaults::FLOAT_CYCLE_DURATION,
        vec![
            (0.0, Keyframe::with_offset(0.0, -d)),
            (0.5, Keyframe::with_offset(0.0, d)),
            (1.0, Keyframe::with_offset(0.0, -d)),
        ],
    )
    .with_easing(EasingFunction::EaseInOutSine)
    .with_repeat(Repeat::Loop)
}

/// 悬停抖动序列
///
/// 固定 3 次镜像循环（奇数周期反向），每周期 0.2 秒，悬停结束后落回
/// 静止状态。
pub fn glitch_cycle(intensity: GlitchIntensity) -> KeyframeSequence {
    let v = glitch_variant(intensity);
    KeyframeSequence::new(
        defaults::GLITCH_CYCLE_DURATION,
        vec![
            (0.0, Keyframe::rest()),
            (
                0.25,
                Keyframe {
                    offset: Vec2::new(-v.jitter_px, 0.0),
                    scale: Vec2::new(1.0 - v.scale_jitter, 1.0 - v.scale_jitter),
                    ..Keyframe::rest()
                },
            ),
            (
                0.75,
                Keyframe {
                    offset: Vec2::new(v.jitter_px, 0.0),
                    scale: Vec2::new(1.0 + v.scale_jitter, 1.0 + v.scale_jitter),
                    ..Keyframe::rest()
                },
            ),
            (1.0, Keyframe::rest()),
        ],
    )
    .with_easing(EasingFunction::Linear)
    .with_repeat(Repeat::Mirrored(defaults::GLITCH_REPEATS))
}

/// 方向显现序列
///
/// 起始偏移在行进方向的相反一侧（见 [`Direction::starting_offset`]），
/// 透明度 0→1，落位到静止状态。实际延迟为 `delay / 2`（沿用来源的
/// 半缩放行为，见 DESIGN.md）。
pub fn reveal_sequence(
    direction: Direction,
    distance: f32,
    duration: f32,
    delay: f32,
) -> KeyframeSequence {
    let start = direction.starting_offset(distance);
    KeyframeSequence::new(
        duration,
        vec![
            (
                0.0,
                Keyframe {
                    offset: start,
                    opacity: 0.0,
                    ..Keyframe::rest()
                },
            ),
            (1.0, Keyframe::rest()),
        ],
    )
    .with_delay(delay * 0.5)
    .with_easing(EasingFunction::EaseOut)
}

/// 逐字显现的单个字符单元
#[derive(Debug, Clone, PartialEq)]
pub struct StaggerUnit {
    /// 字符
    pub ch: char,
    /// 该字符的显现序列（延迟已含错峰）
    pub sequence: KeyframeSequence,
}

impl StaggerUnit {
    /// 该字符的起始时刻（秒）
    pub fn start_time(&self) -> f32 {
        self.sequence.delay
    }
}

/// 逐字显现（默认错峰间隔 0.05 秒）
///
/// 文本拆为单字符单元，第 k 个字符在 `base_delay + k * 0.05` 启动，
/// 各自旋转 −90°→0°、下移 20 px→0、透明度 0→1，时长 0.4 秒。
/// 空文本退化为空单元列表（no-op）。
pub fn staggered_reveal(text: &str, base_delay: f32) -> Vec<StaggerUnit> {
    staggered_reveal_with(text, defaults::LETTER_STAGGER, base_delay)
}

/// 逐字显现（自定义错峰间隔）
pub fn staggered_reveal_with(text: &str, per_char_delay: f32, base_delay: f32) -> Vec<StaggerUnit> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            let sequence = KeyframeSequence::new(
                defaults::LETTER_DURATION,
                vec![
                    (
                        0.0,
                        Keyframe {
                            offset: Vec2::new(0.0, defaults::LETTER_OFFSET),
                            opacity: 0.0,
                            rotation: defaults::LETTER_ROTATION,
                            ..Keyframe::rest()
                        },
                    ),
                    (1.0, Keyframe::rest()),
                ],
            )
            .with_delay(base_delay + index as f32 * per_char_delay)
            .with_easing(EasingFunction::EaseOut);
            StaggerUnit { ch, sequence }
        })
        .collect()
}

/// 页面进入淡化（透明度 0→1）
pub fn page_fade_enter() -> KeyframeSequence {
    KeyframeSequence::new(
        defaults::PAGE_FADE_DURATION,
        vec![(0.0, Keyframe::with_opacity(0.0)), (1.0, Keyframe::rest())],
    )
    .with_easing(EasingFunction::EaseOutQuad)
}

/// 页面退出淡化（透明度 1→0）
///
/// 注意末帧不是静止状态：退出的语义就是隐藏旧内容。落位不变量只
/// 约束 reveal 类序列。
pub fn page_fade_exit() -> KeyframeSequence {
    KeyframeSequence::new(
        defaults::PAGE_FADE_DURATION,
        vec![(0.0, Keyframe::rest()), (1.0, Keyframe::with_opacity(0.0))],
    )
    .with_easing(EasingFunction::EaseOutQuad)
}

/// 由规格构建关键帧序列
///
/// 多数种类产生单个序列；`LetterReveal` 为每个字符产生一个序列。
/// `FadePage` 这里只产生进入侧，退出侧由
/// [`crate::page::PageTransition`] 协调。
pub fn build(spec: &AnimationSpec) -> Vec<KeyframeSequence> {
    match &spec.kind {
        AnimationKind::Float { intensity } => {
            let mut seq = float_cycle(*intensity);
            seq.duration = spec.duration_seconds;
            seq.delay = spec.delay_seconds;
            vec![seq]
        }
        AnimationKind::Glitch { intensity } => {
            let mut seq = glitch_cycle(*intensity);
            seq.duration = spec.duration_seconds;
            vec![seq]
        }
        AnimationKind::FadePage => {
            let mut seq = page_fade_enter();
            seq.duration = spec.duration_seconds;
            seq.delay = spec.delay_seconds;
            vec![seq]
        }
        AnimationKind::LetterReveal { text } => staggered_reveal(text, spec.delay_seconds)
            .into_iter()
            .map(|unit| unit.sequence)
            .collect(),
        AnimationKind::Slide { direction } => vec![reveal_sequence(
            *direction,
            spec.distance_pixels as f32,
            spec.duration_seconds,
            spec.delay_seconds,
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== 浮动循环 ==========

    #[test]
    fn test_float_cycle_symmetric() {
        // subtle → [-5, 5, -5]，medium → [-10, 10, -10]，strong → [-20, 20, -20]
        for (intensity, d) in [
            (FloatIntensity::Subtle, 5.0),
            (FloatIntensity::Medium, 10.0),
            (FloatIntensity::Strong, 20.0),
        ] {
            let seq = float_cycle(intensity);
            let ys: Vec<f32> = seq.frames().iter().map(|(_, k)| k.offset.y).collect();
            assert_eq!(ys, vec![-d, d, -d]);
            // 首末帧幅度相等、与中点符号相反
            assert_eq!(ys[0], ys[2]);
            assert_eq!(ys[0], -ys[1]);
        }
    }

    #[test]
    fn test_float_cycle_loops_with_default_duration() {
        let seq = float_cycle(FloatIntensity::Medium);
        assert_eq!(seq.duration, defaults::FLOAT_CYCLE_DURATION);
        assert_eq!(seq.repeat, Repeat::Loop);
        assert!(!seq.repeat.is_one_shot());
    }

    // ========== 悬停抖动 ==========

    #[test]
    fn test_glitch_variant_monotonic() {
        let low = glitch_variant(GlitchIntensity::Low);
        let medium = glitch_variant(GlitchIntensity::Medium);
        let high = glitch_variant(GlitchIntensity::High);
        assert!(low.jitter_px < medium.jitter_px);
        assert!(medium.jitter_px < high.jitter_px);
        assert!(low.scale_jitter < medium.scale_jitter);
        assert!(medium.scale_jitter < high.scale_jitter);
    }

    #[test]
    fn test_glitch_cycle_fixed_repeats_and_rest() {
        let seq = glitch_cycle(GlitchIntensity::Medium);
        assert_eq!(seq.duration, 0.2);
        assert_eq!(seq.repeat, Repeat::Mirrored(3));
        // 抖动结束后必须落回静止
        assert!(seq.settles_to_rest());
        assert!(seq.first().unwrap().is_rest());
    }

    // ========== 方向显现 ==========

    #[test]
    fn test_reveal_sequence_settles_to_rest() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let seq = reveal_sequence(dir, 30.0, 0.3, 0.0);
            assert!(seq.settles_to_rest(), "{:?} 应落位到静止状态", dir);
            // 首帧只在透明度/偏移上不同于静止状态
            let first = seq.first().unwrap();
            assert_eq!(first.opacity, 0.0);
            assert_eq!(first.scale, Vec2::one());
            assert_eq!(first.rotation, 0.0);
        }
    }

    #[test]
    fn test_reveal_delay_half_scaled() {
        let seq = reveal_sequence(Direction::Left, 30.0, 0.3, 1.0);
        assert_eq!(seq.delay, 0.5);
        // delay 0 → 实际延迟 0
        let seq = reveal_sequence(Direction::Left, 30.0, 0.3, 0.0);
        assert_eq!(seq.delay, 0.0);
    }

    #[test]
    fn test_reveal_left_starts_right_of_rest() {
        // computeDirectionalOffset("left", 30) → (-30, 0)
        let seq = reveal_sequence(Direction::Left, 30.0, 0.3, 0.0);
        assert_eq!(seq.first().unwrap().offset, Vec2::new(-30.0, 0.0));
        assert_eq!(seq.duration, 0.3);
    }

    // ========== 逐字显现 ==========

    #[test]
    fn test_stagger_start_times_strictly_increasing() {
        let units = staggered_reveal("hello", 0.1);
        assert_eq!(units.len(), 5);
        for (k, unit) in units.iter().enumerate() {
            let expected = 0.1 + k as f32 * 0.05;
            assert!((unit.start_time() - expected).abs() < 1e-6);
        }
        for pair in units.windows(2) {
            assert!(pair[0].start_time() < pair[1].start_time());
        }
    }

    #[test]
    fn test_stagger_unit_shape() {
        let units = staggered_reveal("hi", 0.0);
        assert_eq!(units[0].ch, 'h');
        assert_eq!(units[1].ch, 'i');
        assert_eq!(units[0].start_time(), 0.0);
        assert!((units[1].start_time() - 0.05).abs() < 1e-6);

        for unit in &units {
            let first = unit.sequence.first().unwrap();
            assert_eq!(first.rotation, -90.0);
            assert_eq!(first.offset.y, 20.0);
            assert_eq!(first.opacity, 0.0);
            assert_eq!(unit.sequence.duration, 0.4);
            assert!(unit.sequence.settles_to_rest());
        }
    }

    #[test]
    fn test_stagger_empty_text_is_noop() {
        // 零长文本退化为空单元列表，而非错误
        assert!(staggered_reveal("", 0.0).is_empty());
    }

    #[test]
    fn test_stagger_pure() {
        // 相同参数两次调用结果逐位一致
        assert_eq!(staggered_reveal("abc", 0.2), staggered_reveal("abc", 0.2));
    }

    // ========== 页面淡化 ==========

    #[test]
    fn test_page_fades() {
        let enter = page_fade_enter();
        assert_eq!(enter.duration, 0.2);
        assert_eq!(enter.first().unwrap().opacity, 0.0);
        assert!(enter.settles_to_rest());

        let exit = page_fade_exit();
        assert_eq!(exit.duration, 0.2);
        assert_eq!(exit.last().unwrap().opacity, 0.0);
    }

    // ========== build ==========

    #[test]
    fn test_build_respects_spec_overrides() {
        use crate::spec::AnimationSpec;

        let spec = AnimationSpec::new(AnimationKind::Float {
            intensity: FloatIntensity::Strong,
        })
        .with_duration(5.0);
        let seqs = build(&spec);
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].duration, 5.0);
        assert_eq!(seqs[0].repeat, Repeat::Loop);

        let spec = AnimationSpec::new(AnimationKind::LetterReveal {
            text: "hi".into(),
        });
        assert_eq!(build(&spec).len(), 2);

        let spec = AnimationSpec::new(AnimationKind::Slide {
            direction: Direction::Right,
        })
        .with_distance(40);
        let seqs = build(&spec);
        assert_eq!(seqs[0].first().unwrap().offset, Vec2::new(40.0, 0.0));
    }
}
