// ==========================================
// 钣金加工报价系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含引擎逻辑,不含文件读取
// ==========================================

pub mod part;
pub mod pricing;
pub mod quote;
pub mod sheet;
pub mod types;

// 重导出核心类型
pub use part::{AccessoryItem, AnglePart, Bom, BomItem, FamilyBom, FlatPart, GroupKey, ProcessItem, TubePart};
pub use pricing::{PricingRules, PricingTables, ProfilePrice, STEEL_DENSITY_KG_M3};
pub use quote::{CostBreakdown, QuoteRequest, QuoteResult, QuoteWarning, ValidationViolation};
pub use sheet::{
    GroupResult, NestingResult, PlacedPart, ResolvedSheetPolicy, SheetBilling, SheetCatalogEntry,
    SheetCostLine, SheetInstance, SheetPolicy, SheetSelection,
};
pub use types::{CostMode, Orientation, QuoteStage, SelectionMode, WarningKind};
