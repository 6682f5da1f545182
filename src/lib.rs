// ==========================================
// 钣金加工报价系统 - 核心库
// ==========================================
// 职责: 平板件排样 + 材料/工时成本核算 + 保本底价
// 流程: 校验 -> 分组 -> 选板排样 -> 汇总 -> 计费 -> 定价
// 系统定位: 报价辅助 (人工最终定价)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 板材目录 / 价格表 / 引擎参数
pub mod config;

// 引擎层 - 排样与计价
pub mod engine;

// 日志系统
pub mod logging;

// API 层 - 报价会话与入口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CostMode, Orientation, QuoteStage, SelectionMode, WarningKind};

// 领域实体
pub use domain::{
    Bom, BomItem, CostBreakdown, FamilyBom, FlatPart, GroupResult, NestingResult, PlacedPart,
    PricingRules, PricingTables, QuoteRequest, QuoteResult, QuoteWarning, SheetCatalogEntry,
    SheetInstance, SheetPolicy, ValidationViolation,
};

// 配置
pub use config::{ConfigLoader, EngineConfig, QuoteConfig};

// 引擎
pub use engine::{
    CostAggregator, NestingAggregator, PartGrouper, QuoteOrchestrator, QuoteValidator,
    RectanglePacker, SheetCatalogSelector, SheetCostCalculator,
};

// API
pub use api::{ApiError, ApiResult, QuoteApi, QuoteSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "钣金加工报价系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
