// ==========================================
// 钣金加工报价系统 - 领域类型定义
// ==========================================
// 职责: 报价流程中使用的封闭枚举
// 红线: 策略分支用封闭枚举表达,每个分组只分派一次
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 摆放方向约束 (Orientation)
// ==========================================
// Free: 可旋转 90°
// AlignWithSheetLength: 必须沿板材长度方向,永不旋转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    #[default]
    Free,
    AlignWithSheetLength,
}

impl Orientation {
    /// 是否允许旋转
    pub fn allows_rotation(&self) -> bool {
        matches!(self, Orientation::Free)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Free => write!(f, "FREE"),
            Orientation::AlignWithSheetLength => write!(f, "ALIGN_WITH_SHEET_LENGTH"),
        }
    }
}

// ==========================================
// 板材选择模式 (Selection Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionMode {
    Auto,   // 遍历目录自动择优
    Manual, // 人工指定板材
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Auto => write!(f, "AUTO"),
            SelectionMode::Manual => write!(f, "MANUAL"),
        }
    }
}

// ==========================================
// 板材计价模式 (Cost Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostMode {
    BoughtWhole,    // 按整张板计价
    UsedWithScrap,  // 按有效用料 + 最低废料率计价
}

impl fmt::Display for CostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostMode::BoughtWhole => write!(f, "BOUGHT_WHOLE"),
            CostMode::UsedWithScrap => write!(f, "USED_WITH_SCRAP"),
        }
    }
}

// ==========================================
// 报价阶段 (Quote Stage)
// ==========================================
// 状态机: NotValidated -> Valid -> Computed
//         NotValidated -> Rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStage {
    NotValidated,
    Valid,
    Rejected,
    Computed,
}

impl QuoteStage {
    /// 是否允许迁移到目标阶段
    pub fn can_transition_to(&self, target: QuoteStage) -> bool {
        matches!(
            (self, target),
            (QuoteStage::NotValidated, QuoteStage::Valid)
                | (QuoteStage::NotValidated, QuoteStage::Rejected)
                | (QuoteStage::Valid, QuoteStage::Computed)
        )
    }
}

impl fmt::Display for QuoteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStage::NotValidated => write!(f, "NOT_VALIDATED"),
            QuoteStage::Valid => write!(f, "VALID"),
            QuoteStage::Rejected => write!(f, "REJECTED"),
            QuoteStage::Computed => write!(f, "COMPUTED"),
        }
    }
}

// ==========================================
// 警告类型 (Warning Kind)
// ==========================================
// 警告不改变任何计算结果,仅用于提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    DroppedItem,   // 数量 <= 0 的条目被剔除
    LowEfficiency, // 排样利用率过低
    PriceAtFloor,  // 建议售价落在保本底价上
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::DroppedItem => write!(f, "DROPPED_ITEM"),
            WarningKind::LowEfficiency => write!(f, "LOW_EFFICIENCY"),
            WarningKind::PriceAtFloor => write!(f, "PRICE_AT_FLOOR"),
        }
    }
}
