// ==========================================
// 钣金加工报价系统 - 引擎编排器
// ==========================================
// 用途: 协调排样与计价引擎的执行顺序
// 流程: 分组 -> 选板+排样 -> 排样汇总 -> 板材计费 -> 非板材费用 -> 成本汇总
// 前置: 只接受 QuoteValidator 产出的 ValidatedQuote
// ==========================================

use crate::config::QuoteConfig;
use crate::domain::quote::{CostBreakdown, QuoteResult, QuoteWarning};
use crate::domain::sheet::{GroupResult, ResolvedSheetPolicy};
use crate::domain::types::WarningKind;
use crate::engine::bom_cost::BomCostCalculator;
use crate::engine::cost_aggregator::CostAggregator;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::nesting_aggregator::NestingAggregator;
use crate::engine::part_grouper::{PartGroup, PartGrouper};
use crate::engine::quote_validator::ValidatedQuote;
use crate::engine::rectangle_packer::RectanglePacker;
use crate::engine::sheet_cost::SheetCostCalculator;
use crate::engine::sheet_selector::SheetCatalogSelector;
use tracing::{debug, info, instrument};

// ==========================================
// QuoteOrchestrator - 引擎编排器
// ==========================================
pub struct QuoteOrchestrator<'a> {
    config: &'a QuoteConfig,
    grouper: PartGrouper,
    packer: RectanglePacker,
    nesting: NestingAggregator,
    sheet_cost: SheetCostCalculator,
    bom_cost: BomCostCalculator,
    cost: CostAggregator,
}

impl<'a> QuoteOrchestrator<'a> {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 本次报价使用的只读配置
    pub fn new(config: &'a QuoteConfig) -> Self {
        Self {
            config,
            grouper: PartGrouper::new(),
            packer: RectanglePacker::new(config.engine.nesting.cutting_margin_mm),
            nesting: NestingAggregator::new(),
            sheet_cost: SheetCostCalculator::new(),
            bom_cost: BomCostCalculator::new(),
            cost: CostAggregator::new(),
        }
    }

    /// 执行完整报价计算
    ///
    /// # 返回
    /// - Ok(QuoteResult): 费用明细 + 分组排样 + 警告
    /// - Err(EngineError): 仅在配置与校验结果不一致时出现
    #[instrument(skip_all, fields(quote_ref = %validated.request().quote_ref))]
    pub fn compute(&self, validated: &ValidatedQuote) -> EngineResult<QuoteResult> {
        let request = validated.request();
        let tables = &self.config.pricing_tables;
        info!(families = request.bom.families.len(), "开始报价计算");

        let mut warnings: Vec<QuoteWarning> = Vec::new();
        let mut direct = CostBreakdown::default();
        let mut groups: Vec<GroupResult> = Vec::new();

        for family in &request.bom.families {
            // ==========================================
            // 步骤1: 平板件分组
            // ==========================================
            let grouping = self.grouper.group(&family.family, family.flat_parts());
            warnings.extend(grouping.warnings);

            if !grouping.groups.is_empty() {
                let policy = validated
                    .policy(&family.family)
                    .ok_or_else(|| EngineError::MissingPolicy(family.family.clone()))?;

                // ==========================================
                // 步骤2-4: 选板排样 -> 汇总 -> 计费
                // ==========================================
                for group in &grouping.groups {
                    let result = self.nest_and_cost(group, policy)?;
                    direct.sheet += result.sheet_cost.cost;
                    if result.utilization_pct < self.config.engine.warnings.low_efficiency_pct {
                        warnings.push(QuoteWarning::new(
                            WarningKind::LowEfficiency,
                            format!("family={}, group={}", result.family, result.key),
                            format!(
                                "板材 {} 利用率 {:.1}% 低于 {:.1}%",
                                result.sheet.sheet_id,
                                result.utilization_pct,
                                self.config.engine.warnings.low_efficiency_pct
                            ),
                        ));
                    }
                    groups.push(result);
                }
            }

            // ==========================================
            // 步骤5: 管材/角钢/配件/工序
            // ==========================================
            let lines = self.bom_cost.calculate(family, tables)?;
            direct.tube += lines.tube;
            direct.angle += lines.angle;
            direct.accessory += lines.accessory;
            direct.process += lines.process;
            warnings.extend(lines.warnings);
        }

        // 输出顺序: 产品族 -> 分组键
        groups.sort_by(|a, b| a.family.cmp(&b.family).then_with(|| a.key.cmp(&b.key)));
        let nesting = self.nesting.summarize(groups);

        // ==========================================
        // 步骤6: 成本汇总 + 保本底价
        // ==========================================
        let pricing = self
            .cost
            .aggregate(direct, tables.overhead_pct, &self.config.pricing_rules);
        warnings.extend(pricing.warning);

        info!(
            total_sheets = nesting.total_sheets,
            efficiency_pct = nesting.average_efficiency_pct,
            cost_base = pricing.cost_base,
            price_suggested = pricing.price_suggested,
            warnings = warnings.len(),
            "报价计算完成"
        );

        Ok(QuoteResult {
            quote_ref: request.quote_ref.clone(),
            breakdown: pricing.breakdown,
            cost_base: pricing.cost_base,
            price_min_safe: pricing.price_min_safe,
            price_suggested: pricing.price_suggested,
            nesting,
            warnings,
        })
    }

    /// 单个分组: 选板排样、汇总、计费
    fn nest_and_cost(
        &self,
        group: &PartGroup,
        policy: &ResolvedSheetPolicy,
    ) -> EngineResult<GroupResult> {
        let tables = &self.config.pricing_tables;
        let material = group.key.material.as_str();
        let density = tables
            .density(material)
            .ok_or_else(|| EngineError::MissingPrice(format!("density={}", material)))?;
        let price_per_kg = tables
            .material_price(material)
            .ok_or_else(|| EngineError::MissingPrice(format!("material={}", material)))?;

        let selector = SheetCatalogSelector::new(&self.packer);
        let packing = selector.select(group, &self.config.catalog, &policy.selection)?;

        let nesting = self
            .nesting
            .aggregate_group(&group.family, &group.key, packing, density);
        let line = self
            .sheet_cost
            .calculate(&nesting, policy.billing, price_per_kg, density);
        let result = nesting.into_result(line);

        debug!(
            family = %result.family,
            group = %result.key,
            sheet_id = %result.sheet.sheet_id,
            sheets = result.sheet_count,
            utilization_pct = result.utilization_pct,
            "分组处理完成"
        );

        Ok(result)
    }
}
