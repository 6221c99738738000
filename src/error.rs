//! # Error 模块
//!
//! 定义 motion-runtime 中使用的错误类型。

use thiserror::Error;

/// 呈现器错误
///
/// 本 crate 唯一的错误来源是参数校验：枚举外的 intensity/direction
/// 字符串、非法的时长/延迟。其余异常情况一律降级为空序列（no-op），
/// 不会产生错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresenterError {
    /// 参数值不在枚举范围内或不满足约束
    #[error("参数 '{param}' 的值无效：{value}")]
    InvalidParameter { param: &'static str, value: String },
}

impl PresenterError {
    /// 创建参数错误
    pub fn invalid(param: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param,
            value: value.into(),
        }
    }
}

/// Result 类型别名
pub type PresenterResult<T> = Result<T, PresenterError>;
