// ==========================================
// 钣金加工报价系统 - 引擎层错误类型
// ==========================================
// 说明: 正常流程中这些错误已被 QuoteValidator 提前拦截,
//       引擎仍返回 Result 而不 panic
// ==========================================

use thiserror::Error;

/// 引擎层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("零件尺寸超出板材可用区域: part={part_id} ({width_mm}x{height_mm}mm), sheet={sheet_id}")]
    PartTooLarge {
        part_id: String,
        width_mm: f64,
        height_mm: f64,
        sheet_id: String,
    },

    #[error("板材扣除切割边距后无可用区域: sheet={sheet_id}, margin={margin_mm}mm")]
    UnusableSheet { sheet_id: String, margin_mm: f64 },

    #[error("零件尺寸无效: part={part_id}")]
    InvalidPart { part_id: String },

    #[error("板材目录中不存在: {0}")]
    SheetNotFound(String),

    #[error("分组 {group} 没有可容纳全部零件的板材规格")]
    NoFeasibleSheet { group: String },

    #[error("缺少价格数据: {0}")]
    MissingPrice(String),

    #[error("产品族 {0} 没有已解析的板材策略")]
    MissingPolicy(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
