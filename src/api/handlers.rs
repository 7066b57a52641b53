use crate::error::{ErrorCode, ExtractError};
use crate::service::ExtractorService;
use axum::{
    extract::{Json, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// 允许上传的文档类型
const ALLOWED_CONTENT_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/png"];

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: String,
    #[serde(rename = "ErrorCode")]
    pub error_code: ErrorCode,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 发票抽取接口: multipart 上传单个文档
pub async fn extract_invoice(
    State(service): State<Arc<ExtractorService>>,
    multipart: Multipart,
) -> Response {
    let (bytes, content_type) = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => return error_response(e),
    };

    info!("Received {} upload, {} bytes", content_type, bytes.len());

    match service.extract(bytes, &content_type).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(e),
    }
}

/// 读取并校验上传文件: 必须存在、非空、类型为 PDF/JPEG/PNG
async fn read_upload(mut multipart: Multipart) -> Result<(Vec<u8>, String), ExtractError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ExtractError::Unknown(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ExtractError::Unknown(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ExtractError::FileEmpty);
        }
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(ExtractError::InvalidFileType(content_type));
        }
        return Ok((bytes.to_vec(), content_type));
    }

    // 没有 file 字段视同空上传
    Err(ExtractError::FileEmpty)
}

fn error_response(e: ExtractError) -> Response {
    let code = e.code();
    let status = match code {
        ErrorCode::FileEmpty | ErrorCode::InvalidFileType => StatusCode::BAD_REQUEST,
        ErrorCode::AzureError => StatusCode::BAD_GATEWAY,
        ErrorCode::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!("Extract request failed: {}", e);

    let response = ErrorResponse {
        error: e.to_string(),
        error_code: code,
    };
    (status, Json(response)).into_response()
}
