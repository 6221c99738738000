//! # Easing 模块
//!
//! 缓动函数库，用于关键帧序列的时间插值。

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// 缓动函数类型
///
/// 各动画种类的默认配置见 [`crate::sequence`]：
/// reveal 类使用缓出，float 循环使用正弦缓入缓出，glitch 使用线性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 三次缓入
    EaseIn,
    /// 三次缓出
    #[default]
    EaseOut,
    /// 三次缓入缓出
    EaseInOut,
    /// 二次缓出
    EaseOutQuad,
    /// 正弦缓入缓出（用于往复循环，端点速度为零）
    EaseInOutSine,
    /// 回弹缓出（轻微过冲后回落，用于逐字显现）
    EaseOutBack,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)，超出范围会被限制
    ///
    /// # 返回
    /// - 缓动后的进度值（EaseOutBack 可能轻微超出 1.0）
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn => t * t * t,
            EasingFunction::EaseOut => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingFunction::EaseOutBack => ease_out_back(t),
        }
    }
}

/// 回弹缓出
fn ease_out_back(t: f32) -> f32 {
    let c1 = 1.70158;
    let c3 = c1 + 1.0;
    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let easing = EasingFunction::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_endpoints_fixed() {
        // 所有缓动函数在端点处必须精确命中 0 和 1
        let all = [
            EasingFunction::Linear,
            EasingFunction::EaseIn,
            EasingFunction::EaseOut,
            EasingFunction::EaseInOut,
            EasingFunction::EaseOutQuad,
            EasingFunction::EaseInOutSine,
            EasingFunction::EaseOutBack,
        ];
        for easing in all {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_clamp() {
        let easing = EasingFunction::EaseInOut;
        // 超出范围应该被限制
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_ease_out_back_overshoots() {
        // 回弹缓出在后段应超过 1.0
        let easing = EasingFunction::EaseOutBack;
        assert!(easing.apply(0.8) > 1.0);
    }
}
