// ==========================================
// 钣金加工报价系统 - 报价 API
// ==========================================
// QuoteSession: 单次报价的显式状态机
//   NotValidated -> Valid -> Computed
//   NotValidated -> Rejected
// QuoteApi: 持有配置,一次调用完成 校验 + 计算
// 红线: 校验失败时只返回违规列表,不返回部分结果
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigLoader, QuoteConfig};
use crate::domain::quote::{QuoteRequest, QuoteResult, ValidationViolation};
use crate::domain::types::QuoteStage;
use crate::engine::{QuoteOrchestrator, QuoteValidator, ValidatedQuote};
use std::path::Path;
use tracing::{info, warn};

// ==========================================
// QuoteSession - 报价会话
// ==========================================
pub struct QuoteSession<'a> {
    config: &'a QuoteConfig,
    request: QuoteRequest,
    stage: QuoteStage,
    validated: Option<ValidatedQuote>,
    violations: Vec<ValidationViolation>,
    result: Option<QuoteResult>,
}

impl<'a> QuoteSession<'a> {
    pub fn new(config: &'a QuoteConfig, request: QuoteRequest) -> Self {
        Self {
            config,
            request,
            stage: QuoteStage::NotValidated,
            validated: None,
            violations: Vec::new(),
            result: None,
        }
    }

    pub fn stage(&self) -> QuoteStage {
        self.stage
    }

    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }

    /// 被拒绝时的违规列表
    pub fn violations(&self) -> &[ValidationViolation] {
        &self.violations
    }

    pub fn result(&self) -> Option<&QuoteResult> {
        self.result.as_ref()
    }

    /// 预检校验
    ///
    /// # 返回
    /// - Ok(()): 进入 VALID
    /// - Err(ValidationRejected): 进入 REJECTED, 违规列表可通过 violations() 读取
    pub fn validate(&mut self) -> ApiResult<()> {
        self.ensure_transition(QuoteStage::Valid)?;

        match QuoteValidator::new(self.config).validate(&self.request) {
            Ok(validated) => {
                self.validated = Some(validated);
                self.stage = QuoteStage::Valid;
                Ok(())
            }
            Err(violations) => {
                warn!(
                    quote_ref = %self.request.quote_ref,
                    violations = violations.len(),
                    "报价请求被拒绝"
                );
                self.violations = violations.clone();
                self.stage = QuoteStage::Rejected;
                Err(ApiError::ValidationRejected {
                    reason: format!("{}项校验违规", violations.len()),
                    violations,
                })
            }
        }
    }

    /// 执行排样与计价(仅 VALID 阶段允许)
    pub fn compute(&mut self) -> ApiResult<&QuoteResult> {
        self.ensure_transition(QuoteStage::Computed)?;

        let validated = self.validated.as_ref().ok_or_else(|| ApiError::InvalidStateTransition {
            from: self.stage.to_string(),
            to: QuoteStage::Computed.to_string(),
        })?;
        let result = QuoteOrchestrator::new(self.config).compute(validated)?;

        info!(
            quote_ref = %result.quote_ref,
            price_suggested = result.price_suggested,
            "报价完成"
        );
        self.stage = QuoteStage::Computed;
        Ok(self.result.insert(result))
    }

    fn ensure_transition(&self, target: QuoteStage) -> ApiResult<()> {
        if self.stage.can_transition_to(target) {
            Ok(())
        } else {
            Err(ApiError::InvalidStateTransition {
                from: self.stage.to_string(),
                to: target.to_string(),
            })
        }
    }
}

// ==========================================
// QuoteApi - 报价入口
// ==========================================
pub struct QuoteApi {
    config: QuoteConfig,
}

impl QuoteApi {
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }

    /// 从配置目录创建
    pub fn from_dir(dir: &Path) -> ApiResult<Self> {
        Ok(Self::new(ConfigLoader::load_dir(dir)?))
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// 开启一个报价会话
    pub fn session(&self, request: QuoteRequest) -> QuoteSession<'_> {
        QuoteSession::new(&self.config, request)
    }

    /// 仅做预检校验
    pub fn validate(&self, request: &QuoteRequest) -> ApiResult<ValidatedQuote> {
        QuoteValidator::new(&self.config)
            .validate(request)
            .map_err(|violations| ApiError::ValidationRejected {
                reason: format!("{}项校验违规", violations.len()),
                violations,
            })
    }

    /// 校验 + 计算
    pub fn quote(&self, request: QuoteRequest) -> ApiResult<QuoteResult> {
        let mut session = self.session(request);
        session.validate()?;
        Ok(session.compute()?.clone())
    }

    /// 从 JSON 文本报价
    pub fn quote_json(&self, json: &str) -> ApiResult<QuoteResult> {
        let request: QuoteRequest = serde_json::from_str(json)
            .map_err(|e| ApiError::InvalidInput(format!("报价请求解析失败: {}", e)))?;
        self.quote(request)
    }
}
