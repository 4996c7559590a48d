use gemini_vision_shared::DEFAULT_API_BASE;

// =========================================================
// 客户端配置 (Client Configuration)
// =========================================================

/// 默认请求超时：30 秒
pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

/// 客户端配置
///
/// 未显式设置的项使用默认值：基础路径 `/api`，超时 30 秒。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// 设置基础路径，末尾的 `/` 会被去掉
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// 设置超时（毫秒）；0 不是合法值，保留原设置
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        if timeout_ms == 0 {
            tracing::warn!(timeout_ms, "ignoring zero request timeout");
        } else {
            self.timeout_ms = timeout_ms;
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "/api");
        assert_eq!(config.timeout_ms(), 30_000);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://localhost:5000/api/");
        assert_eq!(config.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_zero_timeout_is_ignored() {
        let config = ClientConfig::default().with_timeout_ms(5_000).with_timeout_ms(0);
        assert_eq!(config.timeout_ms(), 5_000);
    }
}
