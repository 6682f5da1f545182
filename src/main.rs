// ==========================================
// 钣金加工报价系统 - 命令行入口
// ==========================================
// 用法: sheet-quote <request.json> [config_dir]
//   config_dir 缺省为当前目录
// 输出: 成功时 stdout 输出 QuoteResult JSON
//       校验失败时 stdout 输出违规列表 JSON, 退出码 2
// ==========================================

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sheet_quote::{logging, ApiError, QuoteApi};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Serialize)]
struct RejectedOutput<'a> {
    status: &'static str,
    reason: &'a str,
    violations: &'a [sheet_quote::ValidationViolation],
}

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("报价失败: {:#}", e);
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let mut args = std::env::args().skip(1);
    let Some(request_path) = args.next().map(PathBuf::from) else {
        bail!("用法: sheet-quote <request.json> [config_dir]");
    };
    let config_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    tracing::info!("{} v{}", sheet_quote::APP_NAME, sheet_quote::VERSION);
    tracing::info!(
        request = %request_path.display(),
        config_dir = %config_dir.display(),
        "开始报价"
    );

    let api = QuoteApi::from_dir(&config_dir)
        .with_context(|| format!("加载配置目录失败: {}", config_dir.display()))?;
    let json = std::fs::read_to_string(&request_path)
        .with_context(|| format!("读取报价请求失败: {}", request_path.display()))?;

    match api.quote_json(&json) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(ApiError::ValidationRejected { reason, violations }) => {
            let output = RejectedOutput {
                status: "REJECTED",
                reason: &reason,
                violations: &violations,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::from(2))
        }
        Err(e) => Err(e.into()),
    }
}
