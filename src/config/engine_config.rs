// ==========================================
// 钣金加工报价系统 - 引擎配置
// ==========================================
// 职责: 排样几何参数与警告阈值
// 红线: 配置作为不可变参数显式传入,不使用全局可变状态
// ==========================================

use crate::domain::pricing::{PricingRules, PricingTables};
use crate::domain::sheet::SheetCatalogEntry;
use serde::{Deserialize, Serialize};

/// 排样配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NestingConfig {
    /// 切割边距 (mm): 板边与零件之间、相邻零件之间均保留
    pub cutting_margin_mm: f64,
}

impl Default for NestingConfig {
    fn default() -> Self {
        Self {
            cutting_margin_mm: 10.0,
        }
    }
}

/// 警告阈值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningThresholds {
    /// 分组利用率低于该值 (%) 时给出 LOW_EFFICIENCY 警告
    pub low_efficiency_pct: f64,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            low_efficiency_pct: 40.0,
        }
    }
}

/// 引擎配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub nesting: NestingConfig,
    #[serde(default)]
    pub warnings: WarningThresholds,
}

impl EngineConfig {
    pub fn with_cutting_margin(mut self, margin_mm: f64) -> Self {
        self.nesting.cutting_margin_mm = margin_mm;
        self
    }

    pub fn with_low_efficiency_pct(mut self, pct: f64) -> Self {
        self.warnings.low_efficiency_pct = pct;
        self
    }
}

// ==========================================
// QuoteConfig - 单次报价所需的全部外部配置
// ==========================================
// 来源: 板材目录 + 价格表 + 定价规则 + 引擎配置 (均只读)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteConfig {
    pub catalog: Vec<SheetCatalogEntry>,
    pub pricing_tables: PricingTables,
    pub pricing_rules: PricingRules,
    pub engine: EngineConfig,
}

impl QuoteConfig {
    pub fn new(
        catalog: Vec<SheetCatalogEntry>,
        pricing_tables: PricingTables,
        pricing_rules: PricingRules,
    ) -> Self {
        Self {
            catalog,
            pricing_tables,
            pricing_rules,
            engine: EngineConfig::default(),
        }
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// 按编号查找板材
    pub fn find_sheet(&self, sheet_id: &str) -> Option<&SheetCatalogEntry> {
        self.catalog.iter().find(|entry| entry.sheet_id == sheet_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.nesting.cutting_margin_mm, 10.0);
        assert_eq!(config.warnings.low_efficiency_pct, 40.0);
    }

    #[test]
    fn test_engine_config_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"nesting": {"cutting_margin_mm": 5.0}}"#).unwrap();
        assert_eq!(config.nesting.cutting_margin_mm, 5.0);
        assert_eq!(config.warnings.low_efficiency_pct, 40.0);
    }

    #[test]
    fn test_find_sheet() {
        let config = QuoteConfig::new(
            vec![SheetCatalogEntry::new("S1", 2000.0, 1000.0, "2000x1000")],
            PricingTables::default(),
            PricingRules::default(),
        );
        assert!(config.find_sheet("S1").is_some());
        assert!(config.find_sheet("S2").is_none());
    }
}
