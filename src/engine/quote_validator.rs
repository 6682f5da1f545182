// ==========================================
// 钣金加工报价系统 - 报价预检校验器
// ==========================================
// 职责: 在任何排样/计价之前拦截缺失或不一致的数据
// 状态机: NotValidated -> Valid | Rejected
// 红线:
//   - 违规一次性全部返回,不在第一条处中断
//   - 未定价的材质/型材/配件/工序必须报错,不得按 0 计价
//   - 校验通过后,排样与计价阶段不再出现可预见的失败
// ==========================================

use crate::config::QuoteConfig;
use crate::domain::part::{FamilyBom, FlatPart};
use crate::domain::pricing::ProfilePrice;
use crate::domain::quote::{QuoteRequest, ValidationViolation};
use crate::domain::sheet::{ResolvedSheetPolicy, SheetBilling, SheetPolicy, SheetSelection};
use crate::domain::types::{CostMode, SelectionMode};
use crate::engine::part_grouper::PartGrouper;
use crate::engine::rectangle_packer::RectanglePacker;
use crate::engine::sheet_selector::SheetCatalogSelector;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{info, instrument, warn};

/// 违规代码
pub mod codes {
    pub const DUPLICATE_FAMILY: &str = "DUPLICATE_FAMILY";
    pub const MISSING_SHEET_POLICY: &str = "MISSING_SHEET_POLICY";
    pub const MISSING_MANUAL_SHEET_ID: &str = "MISSING_MANUAL_SHEET_ID";
    pub const UNKNOWN_SHEET_ID: &str = "UNKNOWN_SHEET_ID";
    pub const EMPTY_SHEET_CATALOG: &str = "EMPTY_SHEET_CATALOG";
    pub const MISSING_SCRAP_FRACTION: &str = "MISSING_SCRAP_FRACTION";
    pub const INVALID_SCRAP_FRACTION: &str = "INVALID_SCRAP_FRACTION";
    pub const INVALID_DIMENSION: &str = "INVALID_DIMENSION";
    pub const INVALID_HOURS: &str = "INVALID_HOURS";
    pub const UNKNOWN_MATERIAL: &str = "UNKNOWN_MATERIAL";
    pub const MISSING_DENSITY: &str = "MISSING_DENSITY";
    pub const INVALID_DENSITY: &str = "INVALID_DENSITY";
    pub const UNKNOWN_PROFILE: &str = "UNKNOWN_PROFILE";
    pub const UNKNOWN_ACCESSORY: &str = "UNKNOWN_ACCESSORY";
    pub const UNKNOWN_PROCESS: &str = "UNKNOWN_PROCESS";
    pub const INVALID_PRICE: &str = "INVALID_PRICE";
    pub const INVALID_PRICING_RULE: &str = "INVALID_PRICING_RULE";
    pub const INVALID_ENGINE_CONFIG: &str = "INVALID_ENGINE_CONFIG";
    pub const PART_EXCEEDS_SHEET: &str = "PART_EXCEEDS_SHEET";
    pub const NO_FEASIBLE_SHEET: &str = "NO_FEASIBLE_SHEET";
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative_finite(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

// ==========================================
// ValidatedQuote - 通过校验的报价
// ==========================================
// 只能由 QuoteValidator 构造; 计算阶段只接受该类型
#[derive(Debug, Clone)]
pub struct ValidatedQuote {
    request: QuoteRequest,
    policies: BTreeMap<String, ResolvedSheetPolicy>,
}

impl ValidatedQuote {
    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    /// 产品族的已解析板材策略(仅含平板件的产品族才有)
    pub fn policy(&self, family: &str) -> Option<&ResolvedSheetPolicy> {
        self.policies.get(family)
    }

    pub fn policies(&self) -> &BTreeMap<String, ResolvedSheetPolicy> {
        &self.policies
    }
}

// ==========================================
// QuoteValidator - 预检校验器
// ==========================================
pub struct QuoteValidator<'a> {
    config: &'a QuoteConfig,
    packer: RectanglePacker,
}

impl<'a> QuoteValidator<'a> {
    pub fn new(config: &'a QuoteConfig) -> Self {
        Self {
            config,
            packer: RectanglePacker::new(config.engine.nesting.cutting_margin_mm),
        }
    }

    /// 校验报价请求
    ///
    /// # 返回
    /// - Ok(ValidatedQuote): 全部检查通过, 板材策略已解析
    /// - Err(Vec<ValidationViolation>): 完整违规列表
    #[instrument(skip_all, fields(
        quote_ref = %request.quote_ref,
        families = request.bom.families.len()
    ))]
    pub fn validate(
        &self,
        request: &QuoteRequest,
    ) -> Result<ValidatedQuote, Vec<ValidationViolation>> {
        let mut violations = Vec::new();

        self.check_engine_config(&mut violations);
        self.check_pricing_rules(&mut violations);
        self.check_pricing_tables(&mut violations);

        let mut seen = BTreeSet::new();
        let mut policies = BTreeMap::new();

        for family in &request.bom.families {
            let scope = format!("family={}", family.family);
            if !seen.insert(family.family.as_str()) {
                violations.push(ValidationViolation::new(
                    codes::DUPLICATE_FAMILY,
                    scope,
                    "family",
                    format!("产品族 {} 重复出现", family.family),
                ));
                continue;
            }

            let dimensions_ok = self.check_items(family, &mut violations);

            let active: Vec<&FlatPart> = family.flat_parts().filter(|p| p.quantity > 0).collect();
            if active.is_empty() {
                continue;
            }

            let Some(policy) = request.sheet_policies.get(&family.family) else {
                violations.push(ValidationViolation::new(
                    codes::MISSING_SHEET_POLICY,
                    scope,
                    "sheet_policies",
                    format!("产品族 {} 含平板件但未配置板材策略", family.family),
                ));
                continue;
            };

            if let Some(resolved) = self.resolve_policy(&family.family, policy, &mut violations) {
                if dimensions_ok {
                    self.check_fit(&family.family, &active, &resolved.selection, &mut violations);
                }
                policies.insert(family.family.clone(), resolved);
            }
        }

        if violations.is_empty() {
            info!(resolved_policies = policies.len(), "报价校验通过");
            Ok(ValidatedQuote {
                request: request.clone(),
                policies,
            })
        } else {
            warn!(violations = violations.len(), "报价校验未通过");
            Err(violations)
        }
    }

    // ==========================================
    // 板材策略解析
    // ==========================================

    fn resolve_policy(
        &self,
        family: &str,
        policy: &SheetPolicy,
        violations: &mut Vec<ValidationViolation>,
    ) -> Option<ResolvedSheetPolicy> {
        let scope = format!("family={}", family);

        let selection = match policy.selection_mode {
            SelectionMode::Manual => match policy.manual_sheet_id.as_deref() {
                None | Some("") => {
                    violations.push(ValidationViolation::new(
                        codes::MISSING_MANUAL_SHEET_ID,
                        scope.clone(),
                        "manual_sheet_id",
                        "人工选板模式必须指定板材编号",
                    ));
                    None
                }
                Some(sheet_id) => match SheetCatalogSelector::resolve_manual(&self.config.catalog, sheet_id) {
                    Ok(entry) => Some(SheetSelection::Manual(entry.clone())),
                    Err(_) => {
                        violations.push(ValidationViolation::new(
                            codes::UNKNOWN_SHEET_ID,
                            scope.clone(),
                            "manual_sheet_id",
                            format!("板材目录中不存在 {}", sheet_id),
                        ));
                        None
                    }
                },
            },
            SelectionMode::Auto => {
                if self.config.catalog.is_empty() {
                    violations.push(ValidationViolation::new(
                        codes::EMPTY_SHEET_CATALOG,
                        scope.clone(),
                        "selection_mode",
                        "自动选板模式需要非空板材目录",
                    ));
                    None
                } else {
                    Some(SheetSelection::Auto)
                }
            }
        };

        let billing = match policy.cost_mode {
            CostMode::BoughtWhole => Some(SheetBilling::BoughtWhole),
            CostMode::UsedWithScrap => match policy.min_scrap_fraction {
                None => {
                    violations.push(ValidationViolation::new(
                        codes::MISSING_SCRAP_FRACTION,
                        scope,
                        "min_scrap_fraction",
                        "按用料计价模式必须提供最小废料率",
                    ));
                    None
                }
                Some(fraction) if !(fraction.is_finite() && (0.0..1.0).contains(&fraction)) => {
                    violations.push(ValidationViolation::new(
                        codes::INVALID_SCRAP_FRACTION,
                        scope,
                        "min_scrap_fraction",
                        format!("最小废料率 {} 超出 [0, 1)", fraction),
                    ));
                    None
                }
                Some(min_scrap_fraction) => Some(SheetBilling::UsedWithScrap { min_scrap_fraction }),
            },
        };

        Some(ResolvedSheetPolicy {
            selection: selection?,
            billing: billing?,
        })
    }

    // ==========================================
    // BOM 条目检查
    // ==========================================

    /// 检查条目尺寸与价格键; 返回平板件尺寸是否全部有效
    fn check_items(&self, family: &FamilyBom, violations: &mut Vec<ValidationViolation>) -> bool {
        let tables = &self.config.pricing_tables;
        let mut dimensions_ok = true;

        for part in family.flat_parts().filter(|p| p.quantity > 0) {
            let scope = format!("family={}, part={}", family.family, part.part_id);
            for (field, value) in [
                ("width_mm", part.width_mm),
                ("height_mm", part.height_mm),
                ("thickness_mm", part.thickness_mm),
            ] {
                if !positive_finite(value) {
                    dimensions_ok = false;
                    violations.push(ValidationViolation::new(
                        codes::INVALID_DIMENSION,
                        scope.clone(),
                        field,
                        format!("尺寸必须为正数, 当前值 {}", value),
                    ));
                }
            }
            if tables.material_price(&part.material).is_none() {
                violations.push(ValidationViolation::new(
                    codes::UNKNOWN_MATERIAL,
                    scope.clone(),
                    "material",
                    format!("材质 {} 未定价", part.material),
                ));
            }
            if tables.density(&part.material).is_none() {
                violations.push(ValidationViolation::new(
                    codes::MISSING_DENSITY,
                    scope,
                    "material",
                    format!("材质 {} 缺少密度", part.material),
                ));
            }
        }

        let profiles = family
            .tube_parts()
            .map(|t| (&t.part_id, &t.profile, t.length_mm, t.quantity, &tables.tube_profiles))
            .chain(
                family
                    .angle_parts()
                    .map(|a| (&a.part_id, &a.profile, a.length_mm, a.quantity, &tables.angle_profiles)),
            );
        for (part_id, profile, length_mm, quantity, table) in profiles {
            if quantity <= 0 {
                continue;
            }
            let scope = format!("family={}, part={}", family.family, part_id);
            if !positive_finite(length_mm) {
                violations.push(ValidationViolation::new(
                    codes::INVALID_DIMENSION,
                    scope.clone(),
                    "length_mm",
                    format!("长度必须为正数, 当前值 {}", length_mm),
                ));
            }
            if !table.contains_key(profile) {
                violations.push(ValidationViolation::new(
                    codes::UNKNOWN_PROFILE,
                    scope,
                    "profile",
                    format!("型材规格 {} 未定价", profile),
                ));
            }
        }

        for accessory in family.accessories().filter(|a| a.quantity > 0) {
            if !tables.accessory_prices.contains_key(&accessory.sku) {
                violations.push(ValidationViolation::new(
                    codes::UNKNOWN_ACCESSORY,
                    format!("family={}, sku={}", family.family, accessory.sku),
                    "sku",
                    format!("配件 {} 未定价", accessory.sku),
                ));
            }
        }

        for process in family.processes() {
            let scope = format!("family={}, process={}", family.family, process.process_code);
            if !positive_finite(process.hours) {
                violations.push(ValidationViolation::new(
                    codes::INVALID_HOURS,
                    scope.clone(),
                    "hours",
                    format!("工时必须为正数, 当前值 {}", process.hours),
                ));
            }
            if !tables.process_cost_per_hour.contains_key(&process.process_code) {
                violations.push(ValidationViolation::new(
                    codes::UNKNOWN_PROCESS,
                    scope,
                    "process_code",
                    format!("工序 {} 未定价", process.process_code),
                ));
            }
        }

        dimensions_ok
    }

    // ==========================================
    // 几何可行性检查
    // ==========================================

    fn check_fit(
        &self,
        family: &str,
        active: &[&FlatPart],
        selection: &SheetSelection,
        violations: &mut Vec<ValidationViolation>,
    ) {
        let selector = SheetCatalogSelector::new(&self.packer);
        let grouping = PartGrouper::new().group(family, active.iter().copied());

        for group in &grouping.groups {
            match selection {
                SheetSelection::Manual(entry) => {
                    for part in group.parts.iter().filter(|p| !self.packer.part_fits(p, entry)) {
                        violations.push(ValidationViolation::new(
                            codes::PART_EXCEEDS_SHEET,
                            format!("family={}, part={}", family, part.part_id),
                            "manual_sheet_id",
                            format!(
                                "零件 {}x{}mm 无法放入板材 {} (切割边距 {}mm)",
                                part.width_mm,
                                part.height_mm,
                                entry.sheet_id,
                                self.packer.margin_mm()
                            ),
                        ));
                    }
                }
                SheetSelection::Auto => {
                    let feasible = self
                        .config
                        .catalog
                        .iter()
                        .any(|entry| selector.group_fits(group, entry));
                    if !feasible {
                        violations.push(ValidationViolation::new(
                            codes::NO_FEASIBLE_SHEET,
                            format!("family={}, group={}", family, group.key),
                            "sheet_catalog",
                            "目录中没有能容纳该分组全部零件的板材规格",
                        ));
                    }
                }
            }
        }
    }

    // ==========================================
    // 配置检查
    // ==========================================

    fn check_engine_config(&self, violations: &mut Vec<ValidationViolation>) {
        let margin = self.config.engine.nesting.cutting_margin_mm;
        if !non_negative_finite(margin) {
            violations.push(ValidationViolation::new(
                codes::INVALID_ENGINE_CONFIG,
                "engine",
                "cutting_margin_mm",
                format!("切割边距必须为非负数, 当前值 {}", margin),
            ));
        }
    }

    fn check_pricing_rules(&self, violations: &mut Vec<ValidationViolation>) {
        let rules = &self.config.pricing_rules;
        if !(rules.min_margin_pct.is_finite() && (0.0..1.0).contains(&rules.min_margin_pct)) {
            violations.push(ValidationViolation::new(
                codes::INVALID_PRICING_RULE,
                "pricing_rules",
                "min_margin_pct",
                format!("最低毛利率 {} 超出 [0, 1)", rules.min_margin_pct),
            ));
        }
        if !non_negative_finite(rules.markup) {
            violations.push(ValidationViolation::new(
                codes::INVALID_PRICING_RULE,
                "pricing_rules",
                "markup",
                format!("加价系数必须为非负数, 当前值 {}", rules.markup),
            ));
        }
        let overhead = self.config.pricing_tables.overhead_pct;
        if !non_negative_finite(overhead) {
            violations.push(ValidationViolation::new(
                codes::INVALID_PRICING_RULE,
                "pricing_tables",
                "overhead_pct",
                format!("管理费率必须为非负数, 当前值 {}", overhead),
            ));
        }
    }

    /// 价格与密度必须为非负/正数; 按键排序输出保证违规顺序稳定
    fn check_pricing_tables(&self, violations: &mut Vec<ValidationViolation>) {
        let tables = &self.config.pricing_tables;

        let mut check_prices = |table: &str, prices: &HashMap<String, f64>| {
            let mut keys: Vec<&String> = prices.keys().collect();
            keys.sort();
            for key in keys {
                let value = prices[key];
                if !non_negative_finite(value) {
                    violations.push(ValidationViolation::new(
                        codes::INVALID_PRICE,
                        format!("{}={}", table, key),
                        table,
                        format!("价格必须为非负数, 当前值 {}", value),
                    ));
                }
            }
        };
        check_prices("material_price_per_kg", &tables.material_price_per_kg);
        check_prices("accessory_prices", &tables.accessory_prices);
        check_prices("process_cost_per_hour", &tables.process_cost_per_hour);

        for (table, profiles) in [
            ("tube_profiles", &tables.tube_profiles),
            ("angle_profiles", &tables.angle_profiles),
        ] {
            let mut entries: Vec<(&String, &ProfilePrice)> = profiles.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (key, price) in entries {
                if !(non_negative_finite(price.kg_per_meter) && non_negative_finite(price.price_per_kg)) {
                    violations.push(ValidationViolation::new(
                        codes::INVALID_PRICE,
                        format!("{}={}", table, key),
                        table,
                        "米重与单价必须为非负数",
                    ));
                }
            }
        }

        let mut materials: Vec<(&String, &f64)> = tables.material_density_kg_m3.iter().collect();
        materials.sort_by(|a, b| a.0.cmp(b.0));
        for (material, density) in materials {
            if !positive_finite(*density) {
                violations.push(ValidationViolation::new(
                    codes::INVALID_DENSITY,
                    format!("material={}", material),
                    "material_density_kg_m3",
                    format!("密度必须为正数, 当前值 {}", density),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::part::{BomItem, ProcessItem, TubePart};
    use crate::domain::pricing::{PricingRules, PricingTables, STEEL_DENSITY_KG_M3};
    use crate::domain::sheet::SheetCatalogEntry;
    use crate::domain::part::Bom;
    use crate::domain::types::Orientation;

    fn config() -> QuoteConfig {
        QuoteConfig::new(
            vec![
                SheetCatalogEntry::new("S2000", 2000.0, 1000.0, "2000x1000"),
                SheetCatalogEntry::new("S3000", 3000.0, 1500.0, "3000x1500"),
            ],
            PricingTables::default()
                .with_material("S235", 1.2, STEEL_DENSITY_KG_M3)
                .with_tube_profile("T40", 2.3, 8.0)
                .with_process("WELD", 40.0),
            PricingRules::default(),
        )
    }

    fn flat(id: &str, w: f64, h: f64, material: &str) -> BomItem {
        BomItem::Flat(FlatPart {
            part_id: id.to_string(),
            label: id.to_string(),
            width_mm: w,
            height_mm: h,
            quantity: 1,
            material: material.to_string(),
            thickness_mm: 2.0,
            finish: "RAW".to_string(),
            orientation: Orientation::Free,
            category: String::new(),
        })
    }

    fn request(family: FamilyBom, policy: Option<SheetPolicy>) -> QuoteRequest {
        let mut sheet_policies = BTreeMap::new();
        if let Some(policy) = policy {
            sheet_policies.insert(family.family.clone(), policy);
        }
        QuoteRequest {
            quote_ref: "Q-1".to_string(),
            bom: Bom::new(vec![family]),
            sheet_policies,
        }
    }

    fn codes_of(violations: &[ValidationViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.code.as_str()).collect()
    }

    #[test]
    fn test_valid_request_resolves_policy() {
        let config = config();
        let req = request(
            FamilyBom::new("CAB").with_item(flat("P1", 500.0, 400.0, "S235")),
            Some(SheetPolicy::auto_bought_whole().with_manual_sheet("S3000")),
        );
        let validated = QuoteValidator::new(&config).validate(&req).unwrap();
        let policy = validated.policy("CAB").unwrap();
        assert!(matches!(&policy.selection, SheetSelection::Manual(e) if e.sheet_id == "S3000"));
        assert_eq!(policy.billing, SheetBilling::BoughtWhole);
    }

    #[test]
    fn test_all_violations_reported() {
        let config = config();
        let family = FamilyBom::new("CAB")
            .with_item(flat("P1", 0.0, 400.0, "S235"))
            .with_item(flat("P2", 100.0, 100.0, "UNOBTAINIUM"))
            .with_item(BomItem::Tube(TubePart {
                part_id: "T1".to_string(),
                label: "T1".to_string(),
                profile: "T99".to_string(),
                length_mm: 1000.0,
                quantity: 1,
            }));
        let mut policy = SheetPolicy::auto_bought_whole().with_used_scrap(0.1);
        policy.selection_mode = SelectionMode::Manual;
        policy.min_scrap_fraction = None;
        let violations = QuoteValidator::new(&config)
            .validate(&request(family, Some(policy)))
            .unwrap_err();

        let codes = codes_of(&violations);
        assert!(codes.contains(&codes::INVALID_DIMENSION));
        assert!(codes.contains(&codes::UNKNOWN_MATERIAL));
        assert!(codes.contains(&codes::MISSING_DENSITY));
        assert!(codes.contains(&codes::UNKNOWN_PROFILE));
        assert!(codes.contains(&codes::MISSING_MANUAL_SHEET_ID));
        assert!(codes.contains(&codes::MISSING_SCRAP_FRACTION));
    }

    #[test]
    fn test_missing_policy() {
        let config = config();
        let req = request(FamilyBom::new("CAB").with_item(flat("P1", 500.0, 400.0, "S235")), None);
        let violations = QuoteValidator::new(&config).validate(&req).unwrap_err();
        assert_eq!(codes_of(&violations), vec![codes::MISSING_SHEET_POLICY]);
    }

    #[test]
    fn test_family_without_flat_parts_needs_no_policy() {
        let config = config();
        let family = FamilyBom::new("LABOR").with_item(BomItem::Process(ProcessItem {
            process_code: "WELD".to_string(),
            label: "weld".to_string(),
            hours: 2.0,
        }));
        let validated = QuoteValidator::new(&config).validate(&request(family, None)).unwrap();
        assert!(validated.policies().is_empty());
    }

    #[test]
    fn test_unknown_manual_sheet() {
        let config = config();
        let req = request(
            FamilyBom::new("CAB").with_item(flat("P1", 500.0, 400.0, "S235")),
            Some(SheetPolicy::auto_bought_whole().with_manual_sheet("S9999")),
        );
        let violations = QuoteValidator::new(&config).validate(&req).unwrap_err();
        assert_eq!(codes_of(&violations), vec![codes::UNKNOWN_SHEET_ID]);
    }

    #[test]
    fn test_scrap_fraction_out_of_range() {
        let config = config();
        let req = request(
            FamilyBom::new("CAB").with_item(flat("P1", 500.0, 400.0, "S235")),
            Some(SheetPolicy::auto_bought_whole().with_used_scrap(1.0)),
        );
        let violations = QuoteValidator::new(&config).validate(&req).unwrap_err();
        assert_eq!(codes_of(&violations), vec![codes::INVALID_SCRAP_FRACTION]);
    }

    #[test]
    fn test_part_exceeds_manual_sheet_but_fits_catalog() {
        // 2500x1200 放不进 S2000, 但能放进 S3000
        let config = config();
        let family = FamilyBom::new("CAB").with_item(flat("BIG", 2500.0, 1200.0, "S235"));

        let manual = request(
            family.clone(),
            Some(SheetPolicy::auto_bought_whole().with_manual_sheet("S2000")),
        );
        let violations = QuoteValidator::new(&config).validate(&manual).unwrap_err();
        assert_eq!(codes_of(&violations), vec![codes::PART_EXCEEDS_SHEET]);

        let auto = request(family, Some(SheetPolicy::auto_bought_whole()));
        assert!(QuoteValidator::new(&config).validate(&auto).is_ok());
    }

    #[test]
    fn test_no_feasible_sheet_in_auto_mode() {
        let config = config();
        let req = request(
            FamilyBom::new("CAB").with_item(flat("HUGE", 5000.0, 2000.0, "S235")),
            Some(SheetPolicy::auto_bought_whole()),
        );
        let violations = QuoteValidator::new(&config).validate(&req).unwrap_err();
        assert_eq!(codes_of(&violations), vec![codes::NO_FEASIBLE_SHEET]);
    }

    #[test]
    fn test_invalid_pricing_rules() {
        let mut config = config();
        config.pricing_rules = PricingRules {
            markup: -1.0,
            min_margin_pct: 1.0,
        };
        let req = request(FamilyBom::new("EMPTY"), None);
        let violations = QuoteValidator::new(&config).validate(&req).unwrap_err();
        assert_eq!(
            codes_of(&violations),
            vec![codes::INVALID_PRICING_RULE, codes::INVALID_PRICING_RULE]
        );
    }

    #[test]
    fn test_duplicate_family() {
        let config = config();
        let req = QuoteRequest {
            quote_ref: String::new(),
            bom: Bom::new(vec![FamilyBom::new("A"), FamilyBom::new("A")]),
            sheet_policies: BTreeMap::new(),
        };
        let violations = QuoteValidator::new(&config).validate(&req).unwrap_err();
        assert_eq!(codes_of(&violations), vec![codes::DUPLICATE_FAMILY]);
    }
}
