// ==========================================
// 钣金加工报价系统 - API层错误类型
// ==========================================
// 职责: 汇总校验/引擎/配置错误,对外给出显式原因
// ==========================================

use crate::config::ConfigError;
use crate::domain::quote::ValidationViolation;
use crate::engine::EngineError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 校验错误(阻断计算,携带完整违规列表)
    // ==========================================
    #[error("报价校验失败: {reason}")]
    ValidationRejected {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 计算与配置错误
    // ==========================================
    #[error("排样计价失败: {0}")]
    PackingFailed(#[from] EngineError),

    #[error("配置加载失败: {0}")]
    ConfigFailed(#[from] ConfigError),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 校验违规列表(非校验错误返回空)
    pub fn violations(&self) -> &[ValidationViolation] {
        match self {
            ApiError::ValidationRejected { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
