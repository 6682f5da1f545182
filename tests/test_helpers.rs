// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中生成配置文件
// ==========================================
#![allow(dead_code)]

use std::error::Error;
use std::fs;
use tempfile::TempDir;

pub const CATALOG_CSV: &str = "\
sheet_id,width_mm,height_mm,label
S2000,2000,1000,2000x1000
S2500,2500,1250,2500x1250
S3000,3000,1500,3000x1500
";

pub const PRICING_TABLES_JSON: &str = r#"{
    "material_price_per_kg": { "S235": 1.2, "AISI304": 4.5 },
    "material_density_kg_m3": { "S235": 7850.0, "AISI304": 7930.0 },
    "tube_profiles": { "TUBE_40x40x2": { "kg_per_meter": 2.3, "price_per_kg": 8.0 } },
    "angle_profiles": { "L30x3": { "kg_per_meter": 1.36, "price_per_kg": 6.0 } },
    "accessory_prices": { "HINGE_A": 4.5 },
    "process_cost_per_hour": { "WELD": 40.0 },
    "overhead_pct": 0.1
}"#;

pub const PRICING_RULES_JSON: &str = r#"{ "markup": 1.3, "min_margin_pct": 0.25 }"#;

/// 创建临时配置目录
///
/// # 参数
/// - with_rules: 是否写入 pricing_rules.json
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
pub fn create_config_dir(with_rules: bool) -> Result<TempDir, Box<dyn Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("catalog.csv"), CATALOG_CSV)?;
    fs::write(dir.path().join("pricing_tables.json"), PRICING_TABLES_JSON)?;
    if with_rules {
        fs::write(dir.path().join("pricing_rules.json"), PRICING_RULES_JSON)?;
    }
    Ok(dir)
}
