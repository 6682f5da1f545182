// ==========================================
// 钣金加工报价系统 - 非板材 BOM 费用计算
// ==========================================
// 职责: 管材 / 角钢 / 配件 / 工序 的直接成本
// 规则:
//   型材 = 数量 × 长度(m) × 米重 × 单价
//   配件 = 数量 × 单价
//   工序 = 工时 × 小时费率
// 红线: 数量 <= 0 的条目剔除并警告; 缺价直接报错,不按 0 计价
// ==========================================

use crate::domain::part::FamilyBom;
use crate::domain::pricing::{PricingTables, ProfilePrice};
use crate::domain::quote::QuoteWarning;
use crate::domain::types::WarningKind;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::HashMap;
use tracing::debug;

/// 单个产品族的非板材费用
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BomCostLines {
    pub tube: f64,
    pub angle: f64,
    pub accessory: f64,
    pub process: f64,
    pub warnings: Vec<QuoteWarning>,
}

impl BomCostLines {
    pub fn total(&self) -> f64 {
        self.tube + self.angle + self.accessory + self.process
    }
}

// ==========================================
// BomCostCalculator - 非板材费用计算
// ==========================================
pub struct BomCostCalculator {
    // 无状态引擎
}

impl BomCostCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算一个产品族的管材/角钢/配件/工序费用
    pub fn calculate(&self, bom: &FamilyBom, tables: &PricingTables) -> EngineResult<BomCostLines> {
        let mut lines = BomCostLines::default();
        let family = bom.family.as_str();

        for tube in bom.tube_parts() {
            if tube.quantity <= 0 {
                lines.warnings.push(dropped(family, "管材", &tube.part_id, tube.quantity));
                continue;
            }
            let price = profile_price(&tables.tube_profiles, &tube.profile, "tube")?;
            lines.tube += profile_cost(price, tube.length_mm, tube.quantity);
        }

        for angle in bom.angle_parts() {
            if angle.quantity <= 0 {
                lines.warnings.push(dropped(family, "角钢", &angle.part_id, angle.quantity));
                continue;
            }
            let price = profile_price(&tables.angle_profiles, &angle.profile, "angle")?;
            lines.angle += profile_cost(price, angle.length_mm, angle.quantity);
        }

        for accessory in bom.accessories() {
            if accessory.quantity <= 0 {
                lines
                    .warnings
                    .push(dropped(family, "配件", &accessory.sku, accessory.quantity));
                continue;
            }
            let unit_price = tables
                .accessory_prices
                .get(&accessory.sku)
                .copied()
                .ok_or_else(|| EngineError::MissingPrice(format!("accessory={}", accessory.sku)))?;
            lines.accessory += unit_price * accessory.quantity as f64;
        }

        for process in bom.processes() {
            let rate = tables
                .process_cost_per_hour
                .get(&process.process_code)
                .copied()
                .ok_or_else(|| {
                    EngineError::MissingPrice(format!("process={}", process.process_code))
                })?;
            lines.process += rate * process.hours;
        }

        debug!(
            family = family,
            tube = lines.tube,
            angle = lines.angle,
            accessory = lines.accessory,
            process = lines.process,
            "非板材费用计算完成"
        );

        Ok(lines)
    }
}

impl Default for BomCostCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn profile_price<'a>(
    table: &'a HashMap<String, ProfilePrice>,
    profile: &str,
    kind: &str,
) -> EngineResult<&'a ProfilePrice> {
    table
        .get(profile)
        .ok_or_else(|| EngineError::MissingPrice(format!("{}={}", kind, profile)))
}

fn profile_cost(price: &ProfilePrice, length_mm: f64, quantity: i32) -> f64 {
    quantity as f64 * (length_mm / 1000.0) * price.cost_per_meter()
}

fn dropped(family: &str, kind: &str, id: &str, quantity: i32) -> QuoteWarning {
    QuoteWarning::new(
        WarningKind::DroppedItem,
        format!("family={}, item={}", family, id),
        format!("{} {} 数量为 {},已剔除", kind, id, quantity),
    )
}
