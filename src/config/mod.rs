// ==========================================
// 钣金加工报价系统 - 配置层
// ==========================================
// 职责: 板材目录/价格表/定价规则/引擎参数的加载与默认值
// 红线: 引擎只接收不可变配置值,不读文件
// ==========================================

pub mod engine_config;
pub mod error;
pub mod loader;

// 重导出核心配置
pub use engine_config::{EngineConfig, NestingConfig, QuoteConfig, WarningThresholds};
pub use error::ConfigError;
pub use loader::ConfigLoader;
