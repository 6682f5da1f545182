// ==========================================
// 钣金加工报价系统 - BOM 领域模型
// ==========================================
// 职责: BOM 条目(平板件/管件/角钢件/配件/工序)
// 红线: 条目为封闭标签类型,未知字段/缺失字段在反序列化时拒绝
// ==========================================

use crate::domain::types::Orientation;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// FlatPart - 平板件(展开料)
// ==========================================
// 用途: 排样单元,按外接矩形参与排样
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlatPart {
    pub part_id: String,
    pub label: String,
    pub width_mm: f64,             // 外接矩形宽 (旋转前)
    pub height_mm: f64,            // 外接矩形高 (旋转前)
    pub quantity: i32,             // 需求数量 (<= 0 时剔除并警告)
    pub material: String,
    pub thickness_mm: f64,
    pub finish: String,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub category: String,
}

impl FlatPart {
    /// 单件面积 (mm²)
    pub fn area_mm2(&self) -> f64 {
        self.width_mm * self.height_mm
    }

    /// 分组键
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            material: self.material.clone(),
            thickness_mm: self.thickness_mm,
            finish: self.finish.clone(),
        }
    }
}

// ==========================================
// TubePart / AnglePart - 型材件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TubePart {
    pub part_id: String,
    pub label: String,
    pub profile: String, // 型材规格键,对应价格表
    pub length_mm: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnglePart {
    pub part_id: String,
    pub label: String,
    pub profile: String,
    pub length_mm: f64,
    pub quantity: i32,
}

// ==========================================
// AccessoryItem - 配件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessoryItem {
    pub sku: String,
    pub label: String,
    pub quantity: i32,
}

// ==========================================
// ProcessItem - 工序(人工)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessItem {
    pub process_code: String,
    pub label: String,
    pub hours: f64,
}

// ==========================================
// BomItem - BOM 条目(封闭标签类型)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BomItem {
    Flat(FlatPart),
    Tube(TubePart),
    Angle(AnglePart),
    Accessory(AccessoryItem),
    Process(ProcessItem),
}

// ==========================================
// FamilyBom / Bom - 按产品族组织的 BOM
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyBom {
    pub family: String,
    #[serde(default)]
    pub items: Vec<BomItem>,
}

impl FamilyBom {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: BomItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn flat_parts(&self) -> impl Iterator<Item = &FlatPart> {
        self.items.iter().filter_map(|item| match item {
            BomItem::Flat(part) => Some(part),
            _ => None,
        })
    }

    pub fn tube_parts(&self) -> impl Iterator<Item = &TubePart> {
        self.items.iter().filter_map(|item| match item {
            BomItem::Tube(part) => Some(part),
            _ => None,
        })
    }

    pub fn angle_parts(&self) -> impl Iterator<Item = &AnglePart> {
        self.items.iter().filter_map(|item| match item {
            BomItem::Angle(part) => Some(part),
            _ => None,
        })
    }

    pub fn accessories(&self) -> impl Iterator<Item = &AccessoryItem> {
        self.items.iter().filter_map(|item| match item {
            BomItem::Accessory(acc) => Some(acc),
            _ => None,
        })
    }

    pub fn processes(&self) -> impl Iterator<Item = &ProcessItem> {
        self.items.iter().filter_map(|item| match item {
            BomItem::Process(process) => Some(process),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bom {
    #[serde(default)]
    pub families: Vec<FamilyBom>,
}

impl Bom {
    pub fn new(families: Vec<FamilyBom>) -> Self {
        Self { families }
    }
}

// ==========================================
// GroupKey - 排样分组键 (材质, 厚度, 表面处理)
// ==========================================
// 厚度按精确值比较(total_cmp),保证排序稳定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupKey {
    pub material: String,
    pub thickness_mm: f64,
    pub finish: String,
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.material
            .cmp(&other.material)
            .then_with(|| self.thickness_mm.total_cmp(&other.thickness_mm))
            .then_with(|| self.finish.cmp(&other.finish))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}mm/{}", self.material, self.thickness_mm, self.finish)
    }
}
