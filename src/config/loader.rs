// ==========================================
// 钣金加工报价系统 - 配置加载器
// ==========================================
// 支持: 板材目录 (CSV) / 价格表、定价规则、引擎配置 (JSON)
// 目录约定:
//   catalog.csv          必需  列: sheet_id,width_mm,height_mm,label
//   pricing_tables.json  必需
//   pricing_rules.json   必需  (保本底价不允许缺省)
//   engine.json          可选  (缺省使用默认配置)
// ==========================================

use crate::config::engine_config::{EngineConfig, QuoteConfig};
use crate::config::error::ConfigError;
use crate::domain::pricing::{PricingRules, PricingTables};
use crate::domain::sheet::SheetCatalogEntry;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

pub const CATALOG_FILE: &str = "catalog.csv";
pub const PRICING_TABLES_FILE: &str = "pricing_tables.json";
pub const PRICING_RULES_FILE: &str = "pricing_rules.json";
pub const ENGINE_CONFIG_FILE: &str = "engine.json";

/// CSV 行(板材目录)
#[derive(Debug, Deserialize)]
struct CatalogRow {
    sheet_id: String,
    width_mm: f64,
    height_mm: f64,
    #[serde(default)]
    label: String,
}

// ==========================================
// ConfigLoader - 配置加载器
// ==========================================
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从目录加载完整报价配置
    pub fn load_dir(dir: &Path) -> Result<QuoteConfig, ConfigError> {
        info!(dir = %dir.display(), "加载报价配置");

        let catalog = Self::load_sheet_catalog(&dir.join(CATALOG_FILE))?;
        let pricing_tables: PricingTables = Self::load_json(&dir.join(PRICING_TABLES_FILE))?;

        let pricing_rules: PricingRules = Self::load_json(&dir.join(PRICING_RULES_FILE))?;

        let engine_path = dir.join(ENGINE_CONFIG_FILE);
        let engine = if engine_path.exists() {
            Self::load_json::<EngineConfig>(&engine_path)?
        } else {
            EngineConfig::default()
        };

        Ok(QuoteConfig {
            catalog,
            pricing_tables,
            pricing_rules,
            engine,
        })
    }

    /// 加载板材目录 CSV
    pub fn load_sheet_catalog(path: &Path) -> Result<Vec<SheetCatalogEntry>, ConfigError> {
        let file = Self::open(path)?;
        Self::parse_sheet_catalog(file)
    }

    /// 解析板材目录 CSV(可用于内存数据)
    pub fn parse_sheet_catalog<R: Read>(reader: R) -> Result<Vec<SheetCatalogEntry>, ConfigError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        let mut seen_ids = HashSet::new();

        for (idx, result) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            // 表头占第 1 行
            let row = idx + 2;
            let record = result?;

            if record.sheet_id.is_empty() {
                return Err(ConfigError::FieldValue {
                    row,
                    field: "sheet_id".to_string(),
                    message: "板材编号为空".to_string(),
                });
            }
            for (field, value) in [("width_mm", record.width_mm), ("height_mm", record.height_mm)] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::FieldValue {
                        row,
                        field: field.to_string(),
                        message: format!("尺寸必须为正数: {}", value),
                    });
                }
            }
            if !seen_ids.insert(record.sheet_id.clone()) {
                return Err(ConfigError::DuplicateSheetId(record.sheet_id));
            }

            let label = if record.label.is_empty() {
                format!("{}x{}", record.width_mm, record.height_mm)
            } else {
                record.label
            };

            entries.push(SheetCatalogEntry {
                sheet_id: record.sheet_id,
                width_mm: record.width_mm,
                height_mm: record.height_mm,
                label,
            });
        }

        debug!(entries = entries.len(), "板材目录解析完成");
        Ok(entries)
    }

    pub fn load_pricing_tables(path: &Path) -> Result<PricingTables, ConfigError> {
        Self::load_json(path)
    }

    pub fn load_pricing_rules(path: &Path) -> Result<PricingRules, ConfigError> {
        Self::load_json(path)
    }

    pub fn load_engine_config(path: &Path) -> Result<EngineConfig, ConfigError> {
        Self::load_json(path)
    }

    fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let file = Self::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn open(path: &Path) -> Result<File, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        Ok(File::open(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let data = "sheet_id,width_mm,height_mm,label\nS1, 2000, 1000, 2000x1000\nS2,2500,1250,\n";
        let entries = ConfigLoader::parse_sheet_catalog(data.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "2000x1000");
        assert_eq!(entries[1].label, "2500x1250");
        assert_eq!(entries[1].height_mm, 1250.0);
    }

    #[test]
    fn test_parse_catalog_rejects_zero_size() {
        let data = "sheet_id,width_mm,height_mm,label\nS1,0,1000,bad\n";
        let err = ConfigLoader::parse_sheet_catalog(data.as_bytes()).unwrap_err();
        match err {
            ConfigError::FieldValue { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "width_mm");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_catalog_rejects_duplicate() {
        let data = "sheet_id,width_mm,height_mm,label\nS1,2000,1000,a\nS1,2500,1250,b\n";
        let err = ConfigLoader::parse_sheet_catalog(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSheetId(id) if id == "S1"));
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::load_pricing_rules(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
