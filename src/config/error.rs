// ==========================================
// 钣金加工报价系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("字段值错误 (row={row}, field={field}): {message}")]
    FieldValue {
        row: usize,
        field: String,
        message: String,
    },

    #[error("板材编号重复: {0}")]
    DuplicateSheetId(String),
}
