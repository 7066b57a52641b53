use crate::config::AzureConfig;
use crate::error::ExtractError;
use crate::models::{AnalyzeOperation, AnalyzeResult};
use std::time::Duration;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: usize = 60;

/// Azure 文档识别客户端
///
/// 进程启动时创建一次, 内部 reqwest::Client 连接池可被所有请求共享。
pub struct FormRecognizerClient {
    http: reqwest::Client,
    config: AzureConfig,
}

impl FormRecognizerClient {
    pub fn new(config: AzureConfig) -> Result<Self, ExtractError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self { http, config })
    }

    /// 提交文档并等待分析完成
    ///
    /// 1. POST 文档字节流, 拿到 Operation-Location
    /// 2. 每 2 秒轮询一次, 直到 succeeded / failed / 超时
    pub async fn analyze(
        &self,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<AnalyzeResult, ExtractError> {
        let endpoint = self.config.endpoint.trim_end_matches('/');
        let url = format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}&locale={}",
            endpoint, self.config.model_id, self.config.api_version, self.config.locale
        );

        let response = self
            .http
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Azure(format!(
                "Submit rejected ({}): {}",
                status, body
            )));
        }

        let operation_url = response
            .headers()
            .get("Operation-Location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ExtractError::Azure("No Operation-Location in response".to_string()))?;

        for _ in 0..MAX_POLLS {
            tokio::time::sleep(POLL_INTERVAL).await;

            let op: AnalyzeOperation = self
                .http
                .get(&operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
                .send()
                .await?
                .json()
                .await?;

            match op.status.as_str() {
                "succeeded" => {
                    return op.analyze_result.ok_or_else(|| {
                        ExtractError::Azure("Succeeded operation missing analyzeResult".to_string())
                    });
                }
                "failed" => {
                    let message = op
                        .error
                        .map(|e| e.message)
                        .unwrap_or_else(|| "Unknown analysis error".to_string());
                    return Err(ExtractError::Azure(message));
                }
                other => debug!("Analysis still running, status={}", other),
            }
        }

        Err(ExtractError::Azure("Analysis polling timed out".to_string()))
    }
}
