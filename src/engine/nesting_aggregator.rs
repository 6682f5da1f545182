// ==========================================
// 钣金加工报价系统 - 排样汇总引擎
// ==========================================
// 职责: 单板 -> 分组 -> 总体 的面积/废料/利用率/重量汇总
// 规则:
//   单板利用率 = 零件面积 / 板面积
//   分组废料   = Σ板面积 - Σ零件面积
//   分组重量   = Σ零件面积 × 厚度 × 密度
//   总体效率按面积加权(非按分组数平均)
// ==========================================

use crate::domain::part::GroupKey;
use crate::domain::sheet::{
    GroupResult, NestingResult, SheetCatalogEntry, SheetCostLine, SheetInstance,
};
use crate::engine::rectangle_packer::PackingResult;

/// 利用率百分比; 分母为 0 时返回 0
pub fn utilization_pct(placed_area: f64, sheet_area: f64) -> f64 {
    if sheet_area <= 0.0 {
        return 0.0;
    }
    placed_area / sheet_area * 100.0
}

/// 板材重量 (kg) = 面积(m²) × 厚度(m) × 密度(kg/m³)
pub fn plate_weight_kg(area_m2: f64, thickness_mm: f64, density_kg_m3: f64) -> f64 {
    area_m2 * (thickness_mm / 1000.0) * density_kg_m3
}

// ==========================================
// GroupNesting - 分组排样汇总(尚未计费)
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNesting {
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
}

impl GroupNesting {
    /// 附加板材费用, 生成最终分组结果
    pub fn into_result(self, sheet_cost: SheetCostLine) -> GroupResult {
        GroupResult {
            family: self.family,
            key: self.key,
            sheet: self.sheet,
            sheets: self.sheets,
            sheet_count: self.sheet_count,
            parts_area_m2: self.parts_area_m2,
            sheet_area_m2: self.sheet_area_m2,
            utilization_pct: self.utilization_pct,
            waste_m2: self.waste_m2,
            weight_kg: self.weight_kg,
            sheet_cost,
        }
    }
}

// ==========================================
// NestingAggregator - 排样汇总
// ==========================================
pub struct NestingAggregator {
    // 无状态引擎
}

impl NestingAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总单个分组
    ///
    /// # 参数
    /// - `family`: 产品族
    /// - `key`: 分组键(厚度取自 key)
    /// - `packing`: 该分组选定板材下的排样结果
    /// - `density_kg_m3`: 材质密度
    pub fn aggregate_group(
        &self,
        family: &str,
        key: &GroupKey,
        packing: PackingResult,
        density_kg_m3: f64,
    ) -> GroupNesting {
        let parts_area_m2: f64 = packing.sheets.iter().map(SheetInstance::placed_area_m2).sum();
        let sheet_area_m2: f64 = packing.sheets.iter().map(SheetInstance::sheet_area_m2).sum();
        let waste_m2 = (sheet_area_m2 - parts_area_m2).max(0.0);
        let weight_kg = plate_weight_kg(parts_area_m2, key.thickness_mm, density_kg_m3);

        GroupNesting {
            family: family.to_string(),
            key: key.clone(),
            sheet_count: packing.sheets.len(),
            sheet: packing.sheet,
            sheets: packing.sheets,
            parts_area_m2,
            sheet_area_m2,
            utilization_pct: utilization_pct(parts_area_m2, sheet_area_m2),
            waste_m2,
            weight_kg,
        }
    }

    /// 汇总全部分组
    pub fn summarize(&self, groups: Vec<GroupResult>) -> NestingResult {
        let total_sheets = groups.iter().map(|g| g.sheet_count).sum();
        let total_area_m2: f64 = groups.iter().map(|g| g.sheet_area_m2).sum();
        let total_parts_m2: f64 = groups.iter().map(|g| g.parts_area_m2).sum();
        let total_weight_kg = groups.iter().map(|g| g.weight_kg).sum();

        NestingResult {
            total_sheets,
            total_area_m2,
            total_weight_kg,
            average_efficiency_pct: utilization_pct(total_parts_m2, total_area_m2),
            groups,
        }
    }
}

impl Default for NestingAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheet::{PlacedPart, SheetBilling};

    fn key(thickness_mm: f64) -> GroupKey {
        GroupKey {
            material: "S235".to_string(),
            thickness_mm,
            finish: "RAW".to_string(),
        }
    }

    fn placed(w: f64, h: f64) -> PlacedPart {
        PlacedPart {
            part_id: "P".to_string(),
            label: "P".to_string(),
            x_mm: 0.0,
            y_mm: 0.0,
            width_mm: w,
            height_mm: h,
            rotated: false,
            color: "#4E79A7".to_string(),
        }
    }

    fn packing(sheet_w: f64, sheet_h: f64, sheets: Vec<Vec<PlacedPart>>) -> PackingResult {
        PackingResult {
            sheet: SheetCatalogEntry::new("S", sheet_w, sheet_h, "S"),
            sheets: sheets
                .into_iter()
                .enumerate()
                .map(|(index, placements)| SheetInstance {
                    index,
                    width_mm: sheet_w,
                    height_mm: sheet_h,
                    utilization_pct: 0.0,
                    placements,
                })
                .collect(),
        }
    }

    #[test]
    fn test_group_rollup() {
        // 两张 1m² 板, 零件共 1.5m²
        let p = packing(
            1000.0,
            1000.0,
            vec![vec![placed(1000.0, 500.0), placed(1000.0, 250.0)], vec![placed(1000.0, 750.0)]],
        );
        let group = NestingAggregator::new().aggregate_group("F", &key(2.0), p, 7850.0);

        assert_eq!(group.sheet_count, 2);
        assert!((group.parts_area_m2 - 1.5).abs() < 1e-9);
        assert!((group.sheet_area_m2 - 2.0).abs() < 1e-9);
        assert!((group.waste_m2 - 0.5).abs() < 1e-9);
        assert!((group.utilization_pct - 75.0).abs() < 1e-9);
        // 1.5 m² × 0.002 m × 7850 = 23.55 kg
        assert!((group.weight_kg - 23.55).abs() < 1e-9);
    }

    #[test]
    fn test_summary_weighted_by_area() {
        let aggregator = NestingAggregator::new();
        // 分组1: 1 张 1m² 板, 利用率 100%
        let g1 = aggregator.aggregate_group(
            "F",
            &key(1.0),
            packing(1000.0, 1000.0, vec![vec![placed(1000.0, 1000.0)]]),
            7850.0,
        );
        // 分组2: 3 张 1m² 板, 零件 0.6m² -> 20%
        let g2 = aggregator.aggregate_group(
            "F",
            &key(3.0),
            packing(
                1000.0,
                1000.0,
                vec![vec![placed(1000.0, 200.0)], vec![placed(1000.0, 200.0)], vec![placed(1000.0, 200.0)]],
            ),
            7850.0,
        );

        let line = |cost| SheetCostLine {
            billing: SheetBilling::BoughtWhole,
            price_per_kg: 1.0,
            billed_weight_kg: cost,
            cost,
        };
        let summary = aggregator.summarize(vec![g1.into_result(line(1.0)), g2.into_result(line(2.0))]);
        assert_eq!(summary.total_sheets, 4);
        assert!((summary.total_area_m2 - 4.0).abs() < 1e-9);
        // 面积加权 (1.0 + 0.6) / 4.0 = 40%, 而非 (100 + 20) / 2 = 60%
        assert!((summary.average_efficiency_pct - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_utilization_zero_area() {
        assert_eq!(utilization_pct(10.0, 0.0), 0.0);
        assert_eq!(NestingAggregator::new().summarize(vec![]).average_efficiency_pct, 0.0);
    }
}
