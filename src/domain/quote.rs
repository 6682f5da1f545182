// ==========================================
// 钣金加工报价系统 - 报价领域模型
// ==========================================
// 职责: 报价请求、费用明细、报价结果、校验违规、警告
// 生命周期: 每次请求新建,核心内不做持久化
// ==========================================

use crate::domain::part::Bom;
use crate::domain::sheet::{NestingResult, SheetPolicy};
use crate::domain::types::WarningKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// QuoteRequest - 报价请求
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteRequest {
    #[serde(default)]
    pub quote_ref: String,
    pub bom: Bom,
    /// 产品族 → 板材策略
    #[serde(default)]
    pub sheet_policies: BTreeMap<String, SheetPolicy>,
}

// ==========================================
// ValidationViolation - 校验违规(阻断计算)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub code: String,            // 违规代码,如 MISSING_SHEET_POLICY
    pub scope: String,           // 产品族 / 条目定位
    pub field: String,
    pub message: String,
}

impl ValidationViolation {
    pub fn new(code: &str, scope: impl Into<String>, field: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            scope: scope.into(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.code, self.scope, self.field, self.message
        )
    }
}

// ==========================================
// QuoteWarning - 非阻断警告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteWarning {
    pub kind: WarningKind,
    pub scope: String,
    pub message: String,
}

impl QuoteWarning {
    pub fn new(kind: WarningKind, scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            scope: scope.into(),
            message: message.into(),
        }
    }
}

// ==========================================
// CostBreakdown - 费用明细
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub sheet: f64,
    pub tube: f64,
    pub angle: f64,
    pub accessory: f64,
    pub process: f64,
    pub overhead: f64,
}

impl CostBreakdown {
    /// 直接成本合计(不含管理费)
    pub fn direct_total(&self) -> f64 {
        self.sheet + self.tube + self.angle + self.accessory + self.process
    }
}

// ==========================================
// QuoteResult - 报价结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub quote_ref: String,
    pub breakdown: CostBreakdown,
    pub cost_base: f64,
    pub price_min_safe: f64,
    pub price_suggested: f64,
    pub nesting: NestingResult,
    pub warnings: Vec<QuoteWarning>,
}

impl QuoteResult {
    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_direct_total() {
        let breakdown = CostBreakdown {
            sheet: 100.0,
            tube: 20.0,
            angle: 5.0,
            accessory: 7.5,
            process: 50.0,
            overhead: 18.25,
        };
        assert!((breakdown.direct_total() - 182.5).abs() < 1e-9);
    }

    #[test]
    fn test_violation_display() {
        let v = ValidationViolation::new("MISSING_SHEET_POLICY", "family=CABINET", "sheet_policies", "缺少板材策略");
        assert_eq!(
            v.to_string(),
            "[MISSING_SHEET_POLICY] family=CABINET (sheet_policies): 缺少板材策略"
        );
    }

    #[test]
    fn test_request_defaults() {
        let request: QuoteRequest = serde_json::from_str(r#"{"bom": {"families": []}}"#).unwrap();
        assert!(request.quote_ref.is_empty());
        assert!(request.sheet_policies.is_empty());
    }
}
