use thiserror::Error;

// =========================================================
// 错误类型 (Error Taxonomy)
// =========================================================

/// 网络层失败：请求未得到任何 HTTP 响应
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// DNS、连接被拒绝、请求被中止等
    #[error("网络错误: {0}")]
    Network(String),
    /// 在截止时间前未完成
    #[error("请求超时 ({timeout_ms} ms)")]
    Timeout { timeout_ms: u32 },
}

/// 客户端调用的统一错误
///
/// 核心层不做任何恢复，所有错误原样交给调用方（页面层）处理。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 请求构建失败（序列化失败、负载类型与端点不符、非法覆盖项）
    #[error("请求构建失败: {0}")]
    Encode(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// 后端返回非 2xx 状态
    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },
    /// 响应体与声明的 Content-Type 不符
    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl ApiError {
    /// 机器可读的错误类别，用作日志字段
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Encode(_) => "encode",
            ApiError::Transport(TransportError::Network(_)) => "network",
            ApiError::Transport(TransportError::Timeout { .. }) => "timeout",
            ApiError::HttpStatus { .. } => "http_status",
            ApiError::Decode(_) => "decode",
        }
    }

    /// 非 2xx 响应的状态码
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_matches_status_line() {
        let err = ApiError::HttpStatus {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.kind(), "http_status");
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err: ApiError = TransportError::Timeout { timeout_ms: 100 }.into();
        assert_eq!(err.to_string(), "请求超时 (100 ms)");
        assert_eq!(err.kind(), "timeout");
        assert_eq!(err.status_code(), None);
    }
}
