// ==========================================
// 钣金加工报价系统 - 板材费用计算引擎
// ==========================================
// 计费策略(每个分组一种,校验阶段已解析):
//   BOUGHT_WHOLE:    板数 × 整板重量 × 单价      (余料计入废料)
//   USED_WITH_SCRAP: 有效重量 × (1 + 最小废料率) × 单价 (余料视为库存)
// 红线: 计费策略只影响费用,不影响排样
// ==========================================

use crate::domain::sheet::{SheetBilling, SheetCostLine};
use crate::engine::nesting_aggregator::{plate_weight_kg, GroupNesting};
use tracing::debug;

// ==========================================
// SheetCostCalculator - 板材费用计算
// ==========================================
pub struct SheetCostCalculator {
    // 无状态引擎
}

impl SheetCostCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算分组板材费用
    ///
    /// # 参数
    /// - `group`: 已汇总的分组排样结果
    /// - `billing`: 该分组的计费策略
    /// - `price_per_kg`: 材质单价
    /// - `density_kg_m3`: 材质密度
    pub fn calculate(
        &self,
        group: &GroupNesting,
        billing: SheetBilling,
        price_per_kg: f64,
        density_kg_m3: f64,
    ) -> SheetCostLine {
        let billed_weight_kg = match billing {
            SheetBilling::BoughtWhole => {
                let sheet_weight =
                    plate_weight_kg(group.sheet.area_m2(), group.key.thickness_mm, density_kg_m3);
                group.sheet_count as f64 * sheet_weight
            }
            SheetBilling::UsedWithScrap { min_scrap_fraction } => {
                group.weight_kg * (1.0 + min_scrap_fraction)
            }
        };
        let cost = billed_weight_kg * price_per_kg;

        debug!(
            family = %group.family,
            group = %group.key,
            mode = %billing.cost_mode(),
            billed_weight_kg = billed_weight_kg,
            cost = cost,
            "板材费用计算完成"
        );

        SheetCostLine {
            billing,
            price_per_kg,
            billed_weight_kg,
            cost,
        }
    }
}

impl Default for SheetCostCalculator {
    fn default() -> Self {
        Self::new()
    }
}
