// ==========================================
// 钣金加工报价系统 - 成本汇总与保本底价
// ==========================================
// cost_base        = Σ直接成本 × (1 + 管理费率)
// price_min_safe   = cost_base / (1 - 最低毛利率)
// price_suggested  = max(cost_base × 加价系数, price_min_safe)
// 红线: 建议售价永远不低于保本底价,与加价系数无关
// ==========================================

use crate::domain::pricing::PricingRules;
use crate::domain::quote::{CostBreakdown, QuoteWarning};
use crate::domain::types::WarningKind;
use tracing::{debug, warn};

/// 定价结果
#[derive(Debug, Clone, PartialEq)]
pub struct PricingOutcome {
    pub breakdown: CostBreakdown,
    pub cost_base: f64,
    pub price_min_safe: f64,
    pub price_suggested: f64,
    pub warning: Option<QuoteWarning>,
}

// ==========================================
// CostAggregator - 成本汇总
// ==========================================
pub struct CostAggregator {
    // 无状态引擎
}

impl CostAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总直接成本并计算底价与建议价
    ///
    /// # 参数
    /// - `direct`: 各类直接成本(overhead 字段忽略,由此处重算)
    /// - `overhead_pct`: 管理费率 (0.1 = 10%)
    /// - `rules`: 定价规则(已通过校验: 0 <= min_margin_pct < 1)
    pub fn aggregate(
        &self,
        direct: CostBreakdown,
        overhead_pct: f64,
        rules: &PricingRules,
    ) -> PricingOutcome {
        let direct_total = direct.direct_total();
        let overhead = direct_total * overhead_pct;
        let cost_base = direct_total + overhead;

        let price_min_safe = cost_base / (1.0 - rules.min_margin_pct);
        let price_by_markup = cost_base * rules.markup;
        let price_suggested = price_by_markup.max(price_min_safe);

        let breakdown = CostBreakdown { overhead, ..direct };

        // 建议价由底价兜底(加价系数不足)
        let warning = if cost_base > 0.0 && price_min_safe >= price_by_markup {
            warn!(
                cost_base = cost_base,
                markup = rules.markup,
                price_min_safe = price_min_safe,
                "建议售价落在保本底价"
            );
            Some(QuoteWarning::new(
                WarningKind::PriceAtFloor,
                "pricing",
                format!(
                    "加价系数 {} 低于保本要求,建议售价取底价 {:.2}",
                    rules.markup, price_min_safe
                ),
            ))
        } else {
            None
        };

        debug!(
            cost_base = cost_base,
            price_min_safe = price_min_safe,
            price_suggested = price_suggested,
            "成本汇总完成"
        );

        PricingOutcome {
            breakdown,
            cost_base,
            price_min_safe,
            price_suggested,
            warning,
        }
    }
}

impl Default for CostAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(sheet: f64) -> CostBreakdown {
        CostBreakdown {
            sheet,
            ..CostBreakdown::default()
        }
    }

    fn rules(markup: f64, min_margin_pct: f64) -> PricingRules {
        PricingRules {
            markup,
            min_margin_pct,
        }
    }

    #[test]
    fn test_markup_above_floor() {
        let outcome = CostAggregator::new().aggregate(direct(1000.0), 0.0, &rules(2.0, 0.25));
        assert!((outcome.cost_base - 1000.0).abs() < 1e-9);
        assert!((outcome.price_min_safe - 1333.333_333).abs() < 1e-5);
        assert!((outcome.price_suggested - 2000.0).abs() < 1e-9);
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn test_markup_below_floor() {
        let outcome = CostAggregator::new().aggregate(direct(1000.0), 0.0, &rules(1.0, 0.25));
        assert!((outcome.price_suggested - 1333.333_333).abs() < 1e-5);
        assert_eq!(outcome.price_suggested, outcome.price_min_safe);
        let warning = outcome.warning.unwrap();
        assert_eq!(warning.kind, WarningKind::PriceAtFloor);
    }

    #[test]
    fn test_overhead_applied() {
        let breakdown = CostBreakdown {
            sheet: 500.0,
            tube: 200.0,
            angle: 100.0,
            accessory: 150.0,
            process: 50.0,
            overhead: 999.0,
        };
        let outcome = CostAggregator::new().aggregate(breakdown, 0.1, &rules(1.5, 0.2));
        assert!((outcome.breakdown.overhead - 100.0).abs() < 1e-9);
        assert!((outcome.cost_base - 1100.0).abs() < 1e-9);
        assert_eq!(outcome.breakdown.sheet, 500.0);
    }

    #[test]
    fn test_floor_holds_for_any_markup() {
        let aggregator = CostAggregator::new();
        for margin in [0.0, 0.1, 0.25, 0.5, 0.9] {
            for markup in [0.0, 0.5, 1.0, 1.1, 1.3333, 2.0, 10.0] {
                let outcome = aggregator.aggregate(direct(777.7), 0.05, &rules(markup, margin));
                assert!(
                    outcome.price_suggested * (1.0 - margin) >= outcome.cost_base - 1e-9,
                    "margin={} markup={}",
                    margin,
                    markup
                );
            }
        }
    }

    #[test]
    fn test_zero_cost() {
        let outcome = CostAggregator::new().aggregate(CostBreakdown::default(), 0.1, &rules(1.5, 0.2));
        assert_eq!(outcome.cost_base, 0.0);
        assert_eq!(outcome.price_suggested, 0.0);
        assert!(outcome.warning.is_none());
    }
}
