// ==========================================
// 钣金加工报价系统 - 价格领域模型
// ==========================================
// 职责: 价格表 (PricingTables) 与定价规则 (PricingRules)
// 红线: 未定价的键必须在校验阶段报错,不得按 0 计价
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 默认钢材密度 (kg/m³)
pub const STEEL_DENSITY_KG_M3: f64 = 7850.0;

// ==========================================
// ProfilePrice - 型材价格
// ==========================================
// 费用 = 长度(m) × 米重(kg/m) × 单价(元/kg)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilePrice {
    pub kg_per_meter: f64,
    pub price_per_kg: f64,
}

impl ProfilePrice {
    pub fn cost_per_meter(&self) -> f64 {
        self.kg_per_meter * self.price_per_kg
    }
}

// ==========================================
// PricingTables - 价格表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingTables {
    /// 材质 → 单价 (元/kg)
    #[serde(default)]
    pub material_price_per_kg: HashMap<String, f64>,
    /// 材质 → 密度 (kg/m³)
    #[serde(default)]
    pub material_density_kg_m3: HashMap<String, f64>,
    /// 管材规格 → 价格
    #[serde(default)]
    pub tube_profiles: HashMap<String, ProfilePrice>,
    /// 角钢规格 → 价格
    #[serde(default)]
    pub angle_profiles: HashMap<String, ProfilePrice>,
    /// 配件 SKU → 单价
    #[serde(default)]
    pub accessory_prices: HashMap<String, f64>,
    /// 工序代码 → 小时费率
    #[serde(default)]
    pub process_cost_per_hour: HashMap<String, f64>,
    /// 管理费率 (0.12 = 12%)
    #[serde(default)]
    pub overhead_pct: f64,
}

impl PricingTables {
    pub fn material_price(&self, material: &str) -> Option<f64> {
        self.material_price_per_kg.get(material).copied()
    }

    pub fn density(&self, material: &str) -> Option<f64> {
        self.material_density_kg_m3.get(material).copied()
    }

    pub fn with_material(mut self, material: &str, price_per_kg: f64, density_kg_m3: f64) -> Self {
        self.material_price_per_kg
            .insert(material.to_string(), price_per_kg);
        self.material_density_kg_m3
            .insert(material.to_string(), density_kg_m3);
        self
    }

    pub fn with_tube_profile(mut self, profile: &str, kg_per_meter: f64, price_per_kg: f64) -> Self {
        self.tube_profiles.insert(
            profile.to_string(),
            ProfilePrice {
                kg_per_meter,
                price_per_kg,
            },
        );
        self
    }

    pub fn with_angle_profile(mut self, profile: &str, kg_per_meter: f64, price_per_kg: f64) -> Self {
        self.angle_profiles.insert(
            profile.to_string(),
            ProfilePrice {
                kg_per_meter,
                price_per_kg,
            },
        );
        self
    }

    pub fn with_accessory(mut self, sku: &str, unit_price: f64) -> Self {
        self.accessory_prices.insert(sku.to_string(), unit_price);
        self
    }

    pub fn with_process(mut self, process_code: &str, cost_per_hour: f64) -> Self {
        self.process_cost_per_hour
            .insert(process_code.to_string(), cost_per_hour);
        self
    }

    pub fn with_overhead(mut self, overhead_pct: f64) -> Self {
        self.overhead_pct = overhead_pct;
        self
    }
}

// ==========================================
// PricingRules - 定价规则
// ==========================================
// markup: 商务杠杆; min_margin_pct: 保本底线(不可协商)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingRules {
    pub markup: f64,
    pub min_margin_pct: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            markup: 1.5,
            min_margin_pct: 0.2,
        }
    }
}
