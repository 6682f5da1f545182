// ==========================================
// 钣金加工报价系统 - 板材与排样领域模型
// ==========================================
// 职责: 板材目录、板材策略、排样结果
// 单位: 尺寸 mm, 面积 m², 重量 kg
// ==========================================

use crate::domain::part::GroupKey;
use crate::domain::types::{CostMode, SelectionMode};
use serde::{Deserialize, Serialize};

pub const MM2_PER_M2: f64 = 1_000_000.0;

// ==========================================
// SheetCatalogEntry - 标准板材规格
// ==========================================
// 外部提供的固定目录,核心只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetCatalogEntry {
    pub sheet_id: String,
    pub width_mm: f64,
    pub height_mm: f64,
    pub label: String,
}

impl SheetCatalogEntry {
    pub fn new(sheet_id: &str, width_mm: f64, height_mm: f64, label: &str) -> Self {
        Self {
            sheet_id: sheet_id.to_string(),
            width_mm,
            height_mm,
            label: label.to_string(),
        }
    }

    /// 整张板面积 (m²)
    pub fn area_m2(&self) -> f64 {
        self.width_mm * self.height_mm / MM2_PER_M2
    }
}

// ==========================================
// SheetPolicy - 产品族板材策略(原始输入)
// ==========================================
// 校验通过后解析为 SheetSelection + SheetBilling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetPolicy {
    pub selection_mode: SelectionMode,
    #[serde(default)]
    pub manual_sheet_id: Option<String>,   // selection_mode = MANUAL 时必填
    pub cost_mode: CostMode,
    #[serde(default)]
    pub min_scrap_fraction: Option<f64>,   // cost_mode = USED_WITH_SCRAP 时必填
}

impl SheetPolicy {
    pub fn auto_bought_whole() -> Self {
        Self {
            selection_mode: SelectionMode::Auto,
            manual_sheet_id: None,
            cost_mode: CostMode::BoughtWhole,
            min_scrap_fraction: None,
        }
    }

    pub fn with_manual_sheet(mut self, sheet_id: &str) -> Self {
        self.selection_mode = SelectionMode::Manual;
        self.manual_sheet_id = Some(sheet_id.to_string());
        self
    }

    pub fn with_used_scrap(mut self, min_scrap_fraction: f64) -> Self {
        self.cost_mode = CostMode::UsedWithScrap;
        self.min_scrap_fraction = Some(min_scrap_fraction);
        self
    }
}

// ==========================================
// 解析后的策略(封闭枚举,每个分组分派一次)
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum SheetSelection {
    Auto,
    Manual(SheetCatalogEntry),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SheetBilling {
    BoughtWhole,
    UsedWithScrap { min_scrap_fraction: f64 },
}

impl SheetBilling {
    pub fn cost_mode(&self) -> CostMode {
        match self {
            SheetBilling::BoughtWhole => CostMode::BoughtWhole,
            SheetBilling::UsedWithScrap { .. } => CostMode::UsedWithScrap,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSheetPolicy {
    pub selection: SheetSelection,
    pub billing: SheetBilling,
}

// ==========================================
// PlacedPart - 已摆放零件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPart {
    pub part_id: String,
    pub label: String,
    pub x_mm: f64,        // 左上角 (已计入切割边距)
    pub y_mm: f64,
    pub width_mm: f64,    // 旋转后尺寸
    pub height_mm: f64,
    pub rotated: bool,
    pub color: String,    // 仅用于排样图显示
}

impl PlacedPart {
    pub fn area_mm2(&self) -> f64 {
        self.width_mm * self.height_mm
    }

    pub fn right_mm(&self) -> f64 {
        self.x_mm + self.width_mm
    }

    pub fn bottom_mm(&self) -> f64 {
        self.y_mm + self.height_mm
    }

    /// 两个零件是否重叠(边界接触不算重叠)
    pub fn overlaps(&self, other: &PlacedPart) -> bool {
        self.x_mm < other.right_mm()
            && other.x_mm < self.right_mm()
            && self.y_mm < other.bottom_mm()
            && other.y_mm < self.bottom_mm()
    }
}

// ==========================================
// SheetInstance - 实际消耗的一张板
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetInstance {
    pub index: usize,
    pub width_mm: f64,
    pub height_mm: f64,
    pub placements: Vec<PlacedPart>,
    pub utilization_pct: f64,
}

impl SheetInstance {
    pub fn sheet_area_m2(&self) -> f64 {
        self.width_mm * self.height_mm / MM2_PER_M2
    }

    pub fn placed_area_m2(&self) -> f64 {
        self.placements.iter().map(|p| p.area_mm2()).sum::<f64>() / MM2_PER_M2
    }
}

// ==========================================
// SheetCostLine - 分组板材费用明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetCostLine {
    pub billing: SheetBilling,
    pub price_per_kg: f64,
    pub billed_weight_kg: f64,
    pub cost: f64,
}

// ==========================================
// GroupResult - 单个分组排样结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    pub family: String,
    pub key: GroupKey,
    pub sheet: SheetCatalogEntry,
    pub sheets: Vec<SheetInstance>,
    pub sheet_count: usize,
    pub parts_area_m2: f64,
    pub sheet_area_m2: f64,
    pub utilization_pct: f64,
    pub waste_m2: f64,
    pub weight_kg: f64,
    pub sheet_cost: SheetCostLine,
}

// ==========================================
// NestingResult - 排样汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NestingResult {
    pub total_sheets: usize,
    pub total_area_m2: f64,
    pub total_weight_kg: f64,
    pub average_efficiency_pct: f64,
    pub groups: Vec<GroupResult>,
}
