// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use sheet_quote::config::{EngineConfig, QuoteConfig};
use sheet_quote::domain::part::{
    AccessoryItem, AnglePart, Bom, BomItem, FamilyBom, FlatPart, ProcessItem, TubePart,
};
use sheet_quote::domain::pricing::{PricingRules, PricingTables, STEEL_DENSITY_KG_M3};
use sheet_quote::domain::quote::QuoteRequest;
use sheet_quote::domain::sheet::{SheetCatalogEntry, SheetPolicy};
use sheet_quote::domain::types::Orientation;
use std::collections::BTreeMap;

// ==========================================
// FlatPart 构建器
// ==========================================

pub struct FlatPartBuilder {
    part: FlatPart,
}

impl FlatPartBuilder {
    pub fn new(part_id: &str) -> Self {
        Self {
            part: FlatPart {
                part_id: part_id.to_string(),
                label: part_id.to_string(),
                width_mm: 100.0,
                height_mm: 100.0,
                quantity: 1,
                material: "S235".to_string(),
                thickness_mm: 2.0,
                finish: "RAW".to_string(),
                orientation: Orientation::Free,
                category: String::new(),
            },
        }
    }

    pub fn size(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.part.width_mm = width_mm;
        self.part.height_mm = height_mm;
        self
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.part.quantity = quantity;
        self
    }

    pub fn material(mut self, material: &str) -> Self {
        self.part.material = material.to_string();
        self
    }

    pub fn thickness(mut self, thickness_mm: f64) -> Self {
        self.part.thickness_mm = thickness_mm;
        self
    }

    pub fn finish(mut self, finish: &str) -> Self {
        self.part.finish = finish.to_string();
        self
    }

    pub fn aligned(mut self) -> Self {
        self.part.orientation = Orientation::AlignWithSheetLength;
        self
    }

    pub fn build(self) -> FlatPart {
        self.part
    }

    pub fn item(self) -> BomItem {
        BomItem::Flat(self.part)
    }
}

// ==========================================
// 其他 BOM 条目
// ==========================================

pub fn tube(part_id: &str, profile: &str, length_mm: f64, quantity: i32) -> BomItem {
    BomItem::Tube(TubePart {
        part_id: part_id.to_string(),
        label: part_id.to_string(),
        profile: profile.to_string(),
        length_mm,
        quantity,
    })
}

pub fn angle(part_id: &str, profile: &str, length_mm: f64, quantity: i32) -> BomItem {
    BomItem::Angle(AnglePart {
        part_id: part_id.to_string(),
        label: part_id.to_string(),
        profile: profile.to_string(),
        length_mm,
        quantity,
    })
}

pub fn accessory(sku: &str, quantity: i32) -> BomItem {
    BomItem::Accessory(AccessoryItem {
        sku: sku.to_string(),
        label: sku.to_string(),
        quantity,
    })
}

pub fn process(process_code: &str, hours: f64) -> BomItem {
    BomItem::Process(ProcessItem {
        process_code: process_code.to_string(),
        label: process_code.to_string(),
        hours,
    })
}

// ==========================================
// QuoteRequest 构建器
// ==========================================

pub struct QuoteRequestBuilder {
    quote_ref: String,
    families: Vec<FamilyBom>,
    policies: BTreeMap<String, SheetPolicy>,
}

impl QuoteRequestBuilder {
    pub fn new(quote_ref: &str) -> Self {
        Self {
            quote_ref: quote_ref.to_string(),
            families: Vec::new(),
            policies: BTreeMap::new(),
        }
    }

    pub fn family(mut self, family: FamilyBom) -> Self {
        self.families.push(family);
        self
    }

    pub fn policy(mut self, family: &str, policy: SheetPolicy) -> Self {
        self.policies.insert(family.to_string(), policy);
        self
    }

    pub fn build(self) -> QuoteRequest {
        QuoteRequest {
            quote_ref: self.quote_ref,
            bom: Bom::new(self.families),
            sheet_policies: self.policies,
        }
    }
}

// ==========================================
// 标准配置
// ==========================================

pub fn standard_catalog() -> Vec<SheetCatalogEntry> {
    vec![
        SheetCatalogEntry::new("S2000", 2000.0, 1000.0, "2000x1000"),
        SheetCatalogEntry::new("S2500", 2500.0, 1250.0, "2500x1250"),
        SheetCatalogEntry::new("S3000", 3000.0, 1500.0, "3000x1500"),
    ]
}

pub fn standard_tables() -> PricingTables {
    PricingTables::default()
        .with_material("S235", 1.2, STEEL_DENSITY_KG_M3)
        .with_material("AISI304", 4.5, 7930.0)
        .with_tube_profile("TUBE_40x40x2", 2.3, 8.0)
        .with_angle_profile("L30x3", 1.36, 6.0)
        .with_accessory("HINGE_A", 4.5)
        .with_accessory("LOCK_B", 12.0)
        .with_process("WELD", 40.0)
        .with_process("PAINT", 30.0)
        .with_overhead(0.1)
}

pub fn standard_config() -> QuoteConfig {
    QuoteConfig::new(standard_catalog(), standard_tables(), PricingRules::default())
        .with_engine(EngineConfig::default())
}
