use crate::error::TransportError;
use crate::request::{RequestBody, RequestConfig};
use gemini_vision_shared::HttpMethod;
use std::collections::BTreeMap;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 发往平台传输原语的请求
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
    /// 截止时间（毫秒），由实现方以协作方式强制执行
    pub timeout_ms: u32,
}

impl HttpRequest {
    pub fn new(url: String, config: RequestConfig) -> Self {
        Self {
            url,
            method: config.method,
            headers: config.headers,
            body: config.body,
            timeout_ms: config.timeout_ms,
        }
    }
}

/// 未经解释的原始响应
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// 键统一为小写
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// 以标准原因短语作为 `status_text`
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: canonical_reason(status).to_string(),
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers
            .insert(key.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// 检查响应是否成功 (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 状态码的标准原因短语，未知状态码返回空串
pub fn canonical_reason(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

/// HTTP 客户端特性 (Trait)
///
/// 只负责一次网络往返：任何 HTTP 响应（包括非 2xx）都视为成功返回，
/// 仅在未拿到响应时返回 [`TransportError`]。
/// (?Send) 是因为浏览器环境下的 Future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient + ?Sized> HttpClient for &C {
    async fn send(&self, req: HttpRequest) -> Result<RawResponse, TransportError> {
        (**self).send(req).await
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient + ?Sized> HttpClient for std::rc::Rc<C> {
    async fn send(&self, req: HttpRequest) -> Result<RawResponse, TransportError> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> 预设结果
    responses: RefCell<HashMap<String, Result<RawResponse, TransportError>>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, response: RawResponse) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), Ok(response));
    }

    pub fn mock_json(&self, url: &str, status: u16, body: serde_json::Value) {
        self.mock_response(
            url,
            RawResponse::new(status, body.to_string())
                .with_header("Content-Type", "application/json"),
        );
    }

    pub fn mock_text(&self, url: &str, status: u16, body: &str) {
        self.mock_response(
            url,
            RawResponse::new(status, body).with_header("Content-Type", "text/plain; charset=utf-8"),
        );
    }

    pub fn mock_failure(&self, url: &str, error: TransportError) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), Err(error));
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(req.clone());

        // 让出执行权，使并发发起的请求在此处交错
        tokio::task::yield_now().await;

        let responses = self.responses.borrow();
        match responses.get(&req.url) {
            Some(result) => result.clone(),
            None => Ok(RawResponse::new(404, "Not Found")),
        }
    }
}

// =========================================================
// 测试工具: ReqwestHttpClient (真实网络)
// =========================================================

#[cfg(test)]
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(test)]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<RawResponse, TransportError> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, &req.url)
            .timeout(std::time::Duration::from_millis(u64::from(req.timeout_ms)));

        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        builder = match req.body {
            None => builder,
            Some(RequestBody::Structured(bytes)) => builder.body(bytes),
            Some(RequestBody::Multipart(form)) => {
                let mut multipart = reqwest::multipart::Form::new();
                for (name, part) in form.into_parts() {
                    multipart = match part {
                        gemini_vision_shared::FormPart::Text(v) => multipart.text(name, v),
                        gemini_vision_shared::FormPart::File(f) => {
                            let mut file =
                                reqwest::multipart::Part::bytes(f.bytes).file_name(f.file_name);
                            if let Some(ct) = f.content_type {
                                file = file
                                    .mime_str(&ct)
                                    .map_err(|e| TransportError::Network(e.to_string()))?;
                            }
                            multipart.part(name, file)
                        }
                    };
                }
                builder.multipart(multipart)
            }
        };

        let timeout_ms = req.timeout_ms;
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout { timeout_ms }
            } else {
                TransportError::Network(e.to_string())
            }
        };

        let resp = builder.send().await.map_err(map_err)?;

        let status = resp.status();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = resp.bytes().await.map_err(map_err)?.to_vec();

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body,
        })
    }
}
