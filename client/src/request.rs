//! 请求构建模块
//!
//! 将默认配置与单次调用的覆盖项合并为完整的 [`RequestConfig`]，
//! 并根据负载标签决定请求体编码方式。

use crate::error::{ApiError, ApiResult};
use gemini_vision_shared::{
    HEADER_CONTENT_TYPE, HttpMethod, JSON_CONTENT_TYPE, MultipartForm, PayloadKind,
};
use serde::Serialize;
use std::collections::BTreeMap;

// =========================================================
// 负载与请求体
// =========================================================

/// 调用处显式标记的请求负载
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 以 JSON 编码
    Structured(serde_json::Value),
    /// 原样作为 multipart 提交，不做 JSON 编码
    Multipart(MultipartForm),
}

impl Payload {
    /// 将任意可序列化参数转为结构化负载
    pub fn json<T: Serialize + ?Sized>(value: &T) -> ApiResult<Self> {
        serde_json::to_value(value)
            .map(Payload::Structured)
            .map_err(|e| ApiError::Encode(e.to_string()))
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Structured(_) => PayloadKind::Structured,
            Payload::Multipart(_) => PayloadKind::Multipart,
        }
    }
}

impl From<MultipartForm> for Payload {
    fn from(form: MultipartForm) -> Self {
        Payload::Multipart(form)
    }
}

/// 编码后的请求体
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON 字节
    Structured(Vec<u8>),
    /// multipart 各部分，边界由传输层生成
    Multipart(MultipartForm),
}

// =========================================================
// RequestConfig
// =========================================================

/// 单次请求的完整配置
///
/// 不变量：请求体为 multipart 时，headers 中不含 Content-Type。
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
    pub timeout_ms: u32,
}

impl RequestConfig {
    /// 按名称查找请求头（不区分大小写）
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(HEADER_CONTENT_TYPE)
    }

    /// 解码结构化请求体；非结构化请求体返回 `None`
    pub fn json_body(&self) -> Option<serde_json::Result<serde_json::Value>> {
        match &self.body {
            Some(RequestBody::Structured(bytes)) => Some(serde_json::from_slice(bytes)),
            _ => None,
        }
    }

    fn remove_header(&mut self, name: &str) {
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    }
}

/// 单次调用的覆盖项
///
/// 按字段整体覆盖默认值（浅合并）：设置了 `headers` 时会替换整个默认请求头表。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOverrides {
    pub method: Option<HttpMethod>,
    pub headers: Option<BTreeMap<String, String>>,
    pub timeout_ms: Option<u32>,
}

impl RequestOverrides {
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

// =========================================================
// RequestBuilder
// =========================================================

/// 请求构建器
///
/// 默认：GET，`Content-Type: application/json`，超时取自客户端配置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestBuilder {
    timeout_ms: u32,
}

impl RequestBuilder {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    fn defaults(&self) -> RequestConfig {
        let mut headers = BTreeMap::new();
        headers.insert(
            HEADER_CONTENT_TYPE.to_string(),
            JSON_CONTENT_TYPE.to_string(),
        );
        RequestConfig {
            method: HttpMethod::Get,
            headers,
            body: None,
            timeout_ms: self.timeout_ms,
        }
    }

    /// 生成 `path` 对应请求的完整配置
    pub fn build(
        &self,
        path: &str,
        payload: Option<Payload>,
        overrides: RequestOverrides,
    ) -> ApiResult<RequestConfig> {
        let mut config = self.defaults();

        // 1. 浅合并覆盖项
        if let Some(method) = overrides.method {
            config.method = method;
        }
        if let Some(headers) = overrides.headers {
            config.headers = headers;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            if timeout_ms == 0 {
                return Err(ApiError::Encode(format!(
                    "{}: timeout must be greater than zero",
                    path
                )));
            }
            config.timeout_ms = timeout_ms;
        }

        // 2. 按标签编码请求体
        config.body = match payload {
            None => None,
            Some(Payload::Structured(value)) => {
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| ApiError::Encode(format!("{}: {}", path, e)))?;
                Some(RequestBody::Structured(bytes))
            }
            Some(Payload::Multipart(form)) => {
                // 合并之后再移除，覆盖项带来的 Content-Type 同样不保留
                config.remove_header(HEADER_CONTENT_TYPE);
                Some(RequestBody::Multipart(form))
            }
        };

        Ok(config)
    }
}

/// 为路径追加查询串，参数为空时原样返回
pub fn with_query<Q: Serialize + ?Sized>(path: &str, query: &Q) -> ApiResult<String> {
    let encoded = serde_urlencoded::to_string(query)
        .map_err(|e| ApiError::Encode(format!("{}: {}", path, e)))?;
    if encoded.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemini_vision_shared::FilePart;
    use serde_json::json;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(30_000)
    }

    fn form() -> MultipartForm {
        MultipartForm::new()
            .file("image", FilePart::new("a.png", vec![0x89, 0x50]))
            .text("question", "图里有什么？")
    }

    #[test]
    fn test_defaults_without_payload() {
        let config = builder()
            .build("/models", None, RequestOverrides::default())
            .unwrap();
        assert_eq!(config.method, HttpMethod::Get);
        assert_eq!(config.content_type(), Some("application/json"));
        assert!(config.body.is_none());
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn test_structured_payload_round_trips() {
        let value = json!({"prompt": "日落", "style": "realistic", "n": [1, 2]});
        let config = builder()
            .build(
                "/image-generation",
                Some(Payload::Structured(value.clone())),
                RequestOverrides::method(HttpMethod::Post),
            )
            .unwrap();
        assert_eq!(config.content_type(), Some("application/json"));
        assert_eq!(config.json_body().unwrap().unwrap(), value);
    }

    #[test]
    fn test_multipart_payload_drops_content_type() {
        let config = builder()
            .build(
                "/image-qa",
                Some(Payload::Multipart(form())),
                RequestOverrides::method(HttpMethod::Post),
            )
            .unwrap();
        assert!(config.content_type().is_none());
        assert!(matches!(config.body, Some(RequestBody::Multipart(_))));
    }

    #[test]
    fn test_multipart_drops_content_type_from_overrides_too() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "text/plain".to_string());
        headers.insert("X-Trace".to_string(), "1".to_string());
        let config = builder()
            .build(
                "/image-qa",
                Some(Payload::Multipart(form())),
                RequestOverrides::method(HttpMethod::Post).with_headers(headers),
            )
            .unwrap();
        assert!(config.content_type().is_none());
        assert_eq!(config.header("x-trace"), Some("1"));
    }

    #[test]
    fn test_header_override_replaces_whole_map() {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "text/plain".to_string());
        let config = builder()
            .build(
                "/features",
                None,
                RequestOverrides::default().with_headers(headers),
            )
            .unwrap();
        assert_eq!(config.headers.len(), 1);
        assert!(config.content_type().is_none());
    }

    #[test]
    fn test_timeout_override() {
        let config = builder()
            .build(
                "/features",
                None,
                RequestOverrides::default().with_timeout_ms(500),
            )
            .unwrap();
        assert_eq!(config.timeout_ms, 500);

        let err = builder()
            .build("/features", None, RequestOverrides::default().with_timeout_ms(0))
            .unwrap_err();
        assert_eq!(err.kind(), "encode");
    }

    #[test]
    fn test_with_query() {
        #[derive(Serialize)]
        struct Params<'a> {
            model: &'a str,
            limit: u32,
        }
        let path = with_query(
            "/image-qa/models",
            &Params {
                model: "gemini 2.0",
                limit: 5,
            },
        )
        .unwrap();
        assert_eq!(path, "/image-qa/models?model=gemini+2.0&limit=5");

        let empty: [(&str, &str); 0] = [];
        assert_eq!(with_query("/models", &empty).unwrap(), "/models");
    }
}
