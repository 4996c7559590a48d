use crate::error::{ApiError, ApiResult};
use crate::http::{HttpClient, HttpRequest, RawResponse};
use crate::request::RequestConfig;

/// 传输边界
///
/// 对 `{base_url}{path}` 恰好执行一次请求，不做重试。
/// 非 2xx 转为 [`ApiError::HttpStatus`]，网络失败转为 [`ApiError::Transport`]；
/// 任何失败在返回前都会记录一条诊断日志。
#[derive(Debug, Clone)]
pub struct Transport<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> Transport<C> {
    pub fn new(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn execute(&self, path: &str, config: RequestConfig) -> ApiResult<RawResponse> {
        let method = config.method;
        let request = HttpRequest::new(self.url(path), config);

        let result = match self.client.send(request).await {
            Ok(resp) if resp.is_success() => Ok(resp),
            Ok(resp) => Err(ApiError::HttpStatus {
                status: resp.status,
                status_text: resp.status_text,
            }),
            Err(e) => Err(ApiError::Transport(e)),
        };

        if let Err(e) = &result {
            tracing::error!(
                method = %method,
                path,
                kind = e.kind(),
                error = %e,
                "api request failed"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::http::{MockHttpClient, ReqwestHttpClient};
    use crate::request::{RequestBuilder, RequestOverrides};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tracing_test::traced_test;

    fn get_config(timeout_ms: u32) -> RequestConfig {
        RequestBuilder::new(timeout_ms)
            .build("/models", None, RequestOverrides::default())
            .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let transport = Transport::new(MockHttpClient::new(), "/api/");
        assert_eq!(transport.url("/models"), "/api/models");
        assert_eq!(transport.url("models"), "/api/models");
    }

    #[tokio::test]
    async fn test_execute_sends_exactly_once() {
        let client = MockHttpClient::new();
        client.mock_json("/api/models", 200, json!({"success": true}));
        let transport = Transport::new(client, "/api");

        let resp = transport.execute("/models", get_config(1_000)).await.unwrap();

        assert_eq!(resp.status, 200);
        let requests = transport.client().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "/api/models");
        assert_eq!(requests[0].method, gemini_vision_shared::HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_http_status_error() {
        for status in [199u16, 301, 400, 404, 500, 503] {
            let client = MockHttpClient::new();
            client.mock_text("/api/models", status, "nope");
            let transport = Transport::new(client, "/api");

            let err = transport
                .execute("/models", get_config(1_000))
                .await
                .unwrap_err();

            assert_eq!(err.status_code(), Some(status));
            assert_eq!(transport.client().requests.borrow().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_network_failure_is_not_retried() {
        let client = MockHttpClient::new();
        client.mock_failure(
            "/api/models",
            TransportError::Network("connection refused".to_string()),
        );
        let transport = Transport::new(client, "/api");

        let err = transport
            .execute("/models", get_config(1_000))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Transport(TransportError::Network("connection refused".to_string()))
        );
        assert_eq!(transport.client().requests.borrow().len(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_each_failure_logs_one_error_record() {
        let client = MockHttpClient::new();
        client.mock_text("/api/models", 503, "busy");
        client.mock_failure(
            "/api/features",
            TransportError::Network("connection reset".to_string()),
        );
        client.mock_failure(
            "/api/image-qa/models",
            TransportError::Timeout { timeout_ms: 1_000 },
        );
        let transport = Transport::new(client, "/api");

        for (path, kind) in [
            ("/models", "http_status"),
            ("/features", "network"),
            ("/image-qa/models", "timeout"),
        ] {
            let err = transport
                .execute(path, get_config(1_000))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), kind);
        }

        logs_assert(|lines: &[&str]| {
            let records: Vec<&str> = lines
                .iter()
                .copied()
                .filter(|line| line.contains("api request failed"))
                .collect();
            if records.len() != 3 {
                return Err(format!("expected 3 failure records, got {}", records.len()));
            }
            for (line, kind) in records.iter().zip(["http_status", "network", "timeout"]) {
                if !line.contains("ERROR") || !line.contains(&format!("kind=\"{kind}\"")) {
                    return Err(format!("unexpected record for {kind}: {line}"));
                }
            }
            Ok(())
        });
    }

    #[tokio::test]
    #[traced_test]
    async fn test_success_logs_nothing() {
        let client = MockHttpClient::new();
        client.mock_json("/api/models", 200, json!({"success": true}));
        let transport = Transport::new(client, "/api");

        transport.execute("/models", get_config(1_000)).await.unwrap();

        assert!(!logs_contain("api request failed"));
    }

    // =========================================================
    // 真实网络：一次性 HTTP 桩服务
    // =========================================================

    /// 接受一个连接，读取请求后按给定原始报文回复（`delay_ms` 后）
    async fn serve_once(raw_response: &'static str, delay_ms: u64) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let _ = socket.read(&mut buf).await;
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                let _ = socket.write_all(raw_response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_reqwest_status_and_reason_propagate() {
        let base = serve_once(
            "HTTP/1.1 502 Bad Gateway\r\ncontent-type: text/plain\r\ncontent-length: 3\r\nconnection: close\r\n\r\nbad",
            0,
        )
        .await;
        let transport = Transport::new(ReqwestHttpClient::new(), &base);

        let err = transport
            .execute("/models", get_config(5_000))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::HttpStatus {
                status: 502,
                status_text: "Bad Gateway".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_reqwest_success_keeps_headers_and_body() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\ncontent-length: 16\r\nconnection: close\r\n\r\n{\"success\":true}",
            0,
        )
        .await;
        let transport = Transport::new(ReqwestHttpClient::new(), &base);

        let resp = transport.execute("/models", get_config(5_000)).await.unwrap();

        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.body, b"{\"success\":true}".to_vec());
    }

    #[tokio::test]
    async fn test_reqwest_deadline_yields_timeout() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
            2_000,
        )
        .await;
        let transport = Transport::new(ReqwestHttpClient::new(), &base);

        let err = transport
            .execute("/models", get_config(100))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Transport(TransportError::Timeout { timeout_ms: 100 })
        );
    }

    #[tokio::test]
    async fn test_reqwest_connection_refused_is_network_error() {
        // 先占用再释放端口，保证该端口上无人监听
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let transport = Transport::new(ReqwestHttpClient::new(), &format!("http://{}", addr));

        let err = transport
            .execute("/models", get_config(5_000))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "network");
    }
}
