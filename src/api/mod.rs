// ==========================================
// 钣金加工报价系统 - API 层
// ==========================================
// 职责: 报价会话(状态机)与一次性报价入口
// ==========================================

pub mod error;
pub mod quote_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use quote_api::{QuoteApi, QuoteSession};
