// ==========================================
// 钣金加工报价系统 - 引擎层
// ==========================================
// 职责: 分组、选板、排样、汇总、计费、校验
// 红线: 引擎为纯计算,不做 IO; 配置显式传入
// ==========================================

pub mod bom_cost;
pub mod cost_aggregator;
pub mod error;
pub mod nesting_aggregator;
pub mod orchestrator;
pub mod part_grouper;
pub mod quote_validator;
pub mod rectangle_packer;
pub mod sheet_cost;
pub mod sheet_selector;

// 重导出核心引擎
pub use bom_cost::{BomCostCalculator, BomCostLines};
pub use cost_aggregator::{CostAggregator, PricingOutcome};
pub use error::{EngineError, EngineResult};
pub use nesting_aggregator::{GroupNesting, NestingAggregator};
pub use orchestrator::QuoteOrchestrator;
pub use part_grouper::{GroupingOutcome, PartGroup, PartGrouper};
pub use quote_validator::{QuoteValidator, ValidatedQuote};
pub use rectangle_packer::{PackingResult, RectanglePacker};
pub use sheet_cost::SheetCostCalculator;
pub use sheet_selector::SheetCatalogSelector;
