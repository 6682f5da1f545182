// ==========================================
// 钣金加工报价系统 - 平板件分组引擎
// ==========================================
// 职责: 按 (材质, 厚度, 表面处理) 精确分组
// 输入: 单个产品族的平板件列表
// 输出: 按键排序的分组 + 剔除警告
// 红线: 每个零件只属于一个分组; 数量 <= 0 剔除并警告,不报错
// ==========================================

use crate::domain::part::{FlatPart, GroupKey};
use crate::domain::quote::QuoteWarning;
use crate::domain::types::WarningKind;
use std::collections::BTreeMap;
use tracing::debug;

/// 单个排样分组
#[derive(Debug, Clone, PartialEq)]
pub struct PartGroup {
    pub family: String,
    pub key: GroupKey,
    pub parts: Vec<FlatPart>,
}

impl PartGroup {
    /// 分组内零件总件数
    pub fn total_pieces(&self) -> usize {
        self.parts.iter().map(|p| p.quantity.max(0) as usize).sum()
    }
}

/// 分组结果
#[derive(Debug, Clone, Default)]
pub struct GroupingOutcome {
    pub groups: Vec<PartGroup>,
    pub warnings: Vec<QuoteWarning>,
}

// ==========================================
// PartGrouper - 分组引擎
// ==========================================
pub struct PartGrouper {
    // 无状态引擎
}

impl PartGrouper {
    pub fn new() -> Self {
        Self {}
    }

    /// 对一个产品族的平板件分组
    ///
    /// # 参数
    /// - `family`: 产品族名称
    /// - `parts`: 平板件列表(保持输入顺序)
    ///
    /// # 返回
    /// 分组按 GroupKey 排序; 组内零件保持输入顺序
    pub fn group<'a, I>(&self, family: &str, parts: I) -> GroupingOutcome
    where
        I: IntoIterator<Item = &'a FlatPart>,
    {
        let mut buckets: BTreeMap<GroupKey, Vec<FlatPart>> = BTreeMap::new();
        let mut warnings = Vec::new();

        for part in parts {
            if part.quantity <= 0 {
                warnings.push(QuoteWarning::new(
                    WarningKind::DroppedItem,
                    format!("family={}, part={}", family, part.part_id),
                    format!("平板件 {} 数量为 {},已剔除", part.label, part.quantity),
                ));
                continue;
            }
            buckets.entry(part.group_key()).or_default().push(part.clone());
        }

        let groups: Vec<PartGroup> = buckets
            .into_iter()
            .map(|(key, parts)| PartGroup {
                family: family.to_string(),
                key,
                parts,
            })
            .collect();

        debug!(
            family = family,
            groups = groups.len(),
            dropped = warnings.len(),
            "平板件分组完成"
        );

        GroupingOutcome { groups, warnings }
    }
}

impl Default for PartGrouper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Orientation;

    fn part(id: &str, material: &str, thickness: f64, finish: &str, quantity: i32) -> FlatPart {
        FlatPart {
            part_id: id.to_string(),
            label: id.to_string(),
            width_mm: 100.0,
            height_mm: 50.0,
            quantity,
            material: material.to_string(),
            thickness_mm: thickness,
            finish: finish.to_string(),
            orientation: Orientation::Free,
            category: "PANEL".to_string(),
        }
    }

    #[test]
    fn test_group_by_exact_key() {
        let parts = vec![
            part("P1", "AISI304", 1.5, "2B", 1),
            part("P2", "S235", 2.0, "RAW", 2),
            part("P3", "AISI304", 1.5, "2B", 3),
            part("P4", "AISI304", 1.5, "SATIN", 1),
            part("P5", "AISI304", 2.0, "2B", 1),
        ];

        let outcome = PartGrouper::new().group("CABINET", &parts);

        assert_eq!(outcome.groups.len(), 4);
        assert!(outcome.warnings.is_empty());

        // 排序: 材质 -> 厚度 -> 表面处理
        assert_eq!(outcome.groups[0].key.to_string(), "AISI304/1.5mm/2B");
        assert_eq!(outcome.groups[1].key.to_string(), "AISI304/1.5mm/SATIN");
        assert_eq!(outcome.groups[2].key.to_string(), "AISI304/2mm/2B");
        assert_eq!(outcome.groups[3].key.to_string(), "S235/2mm/RAW");

        // 组内保持输入顺序
        let ids: Vec<&str> = outcome.groups[0].parts.iter().map(|p| p.part_id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P3"]);
        assert_eq!(outcome.groups[0].total_pieces(), 4);
    }

    #[test]
    fn test_zero_and_negative_quantity_dropped_with_warning() {
        let parts = vec![
            part("P1", "S235", 2.0, "RAW", 0),
            part("P2", "S235", 2.0, "RAW", -1),
            part("P3", "S235", 2.0, "RAW", 2),
        ];

        let outcome = PartGrouper::new().group("FRAME", &parts);

        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].parts.len(), 1);
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome
            .warnings
            .iter()
            .all(|w| w.kind == WarningKind::DroppedItem));
    }

    #[test]
    fn test_every_part_in_exactly_one_group() {
        let parts = vec![
            part("P1", "A", 1.0, "X", 1),
            part("P2", "B", 1.0, "X", 1),
            part("P3", "A", 1.0, "X", 1),
        ];
        let outcome = PartGrouper::new().group("F", &parts);
        let total: usize = outcome.groups.iter().map(|g| g.parts.len()).sum();
        assert_eq!(total, parts.len());
    }
}
