// ==========================================
// 钣金加工报价系统 - 板材规格选择引擎
// ==========================================
// 职责: 为分组确定唯一的板材规格
//   MANUAL: 使用人工指定规格(目录中必须存在)
//   AUTO:   每个候选规格完整排样一次, 按 (板数, 废料面积) 择优
// 输出: 选定规格 + 对应排样结果(后续阶段直接复用, 不重算)
// ==========================================

use crate::domain::sheet::{SheetCatalogEntry, SheetSelection};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::part_grouper::PartGroup;
use crate::engine::rectangle_packer::{PackingResult, RectanglePacker};
use std::cmp::Ordering;
use tracing::{debug, instrument};

// ==========================================
// SheetCatalogSelector - 板材选择引擎
// ==========================================
pub struct SheetCatalogSelector<'a> {
    packer: &'a RectanglePacker,
}

impl<'a> SheetCatalogSelector<'a> {
    pub fn new(packer: &'a RectanglePacker) -> Self {
        Self { packer }
    }

    /// 按编号解析目录中的板材
    pub fn resolve_manual<'c>(
        catalog: &'c [SheetCatalogEntry],
        sheet_id: &str,
    ) -> EngineResult<&'c SheetCatalogEntry> {
        catalog
            .iter()
            .find(|entry| entry.sheet_id == sheet_id)
            .ok_or_else(|| EngineError::SheetNotFound(sheet_id.to_string()))
    }

    /// 判断分组零件是否全部能放进该规格
    pub fn group_fits(&self, group: &PartGroup, sheet: &SheetCatalogEntry) -> bool {
        group.parts.iter().all(|part| self.packer.part_fits(part, sheet))
    }

    /// 为分组选择板材并返回排样结果
    #[instrument(skip(self, group, catalog, selection), fields(
        family = %group.family,
        group = %group.key,
        catalog_size = catalog.len()
    ))]
    pub fn select(
        &self,
        group: &PartGroup,
        catalog: &[SheetCatalogEntry],
        selection: &SheetSelection,
    ) -> EngineResult<PackingResult> {
        match selection {
            SheetSelection::Manual(entry) => {
                debug!(sheet_id = %entry.sheet_id, "人工指定板材");
                self.packer.pack(&group.parts, entry)
            }
            SheetSelection::Auto => self.select_auto(group, catalog),
        }
    }

    /// 自动择优: 板数最少优先, 其次废料最少; 完全相同时保留目录中靠前的规格
    fn select_auto(
        &self,
        group: &PartGroup,
        catalog: &[SheetCatalogEntry],
    ) -> EngineResult<PackingResult> {
        let mut best: Option<PackingResult> = None;

        for entry in catalog {
            if !self.group_fits(group, entry) {
                debug!(sheet_id = %entry.sheet_id, "规格无法容纳全部零件,跳过");
                continue;
            }
            let packing = self.packer.pack(&group.parts, entry)?;
            debug!(
                sheet_id = %entry.sheet_id,
                sheets = packing.sheet_count(),
                waste_mm2 = packing.waste_mm2(),
                "候选规格评估"
            );
            let replace = match &best {
                None => true,
                Some(current) => packing.compare_score(current) == Ordering::Less,
            };
            if replace {
                best = Some(packing);
            }
        }

        let best = best.ok_or_else(|| EngineError::NoFeasibleSheet {
            group: group.key.to_string(),
        })?;
        debug!(sheet_id = %best.sheet.sheet_id, sheets = best.sheet_count(), "自动选定板材");
        Ok(best)
    }
}
