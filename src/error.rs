use serde::Serialize;
use thiserror::Error;

/// 请求级错误分类，对外暴露为固定错误码
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Uploaded file is empty")]
    FileEmpty,

    #[error("Unsupported file type: {0}, expected PDF/JPEG/PNG")]
    InvalidFileType(String),

    #[error("Document analysis failed: {0}")]
    Azure(String),

    #[error("Document analysis request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

/// 对外错误码 (响应体 ErrorCode 字段)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    FileEmpty,
    InvalidFileType,
    AzureError,
    UnknownError,
}

impl ExtractError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExtractError::FileEmpty => ErrorCode::FileEmpty,
            ExtractError::InvalidFileType(_) => ErrorCode::InvalidFileType,
            ExtractError::Azure(_) | ExtractError::Http(_) => ErrorCode::AzureError,
            ExtractError::Unknown(_) => ErrorCode::UnknownError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ExtractError::FileEmpty.code(), ErrorCode::FileEmpty);
        assert_eq!(
            ExtractError::InvalidFileType("text/plain".into()).code(),
            ErrorCode::InvalidFileType
        );
        assert_eq!(
            ExtractError::Azure("timeout".into()).code(),
            ErrorCode::AzureError
        );
        assert_eq!(
            ExtractError::Unknown("boom".into()).code(),
            ErrorCode::UnknownError
        );
    }

    #[test]
    fn test_error_code_serializes_as_name() {
        let json = serde_json::to_string(&ErrorCode::InvalidFileType).unwrap();
        assert_eq!(json, "\"InvalidFileType\"");
    }
}
