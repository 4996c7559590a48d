//! API 客户端上下文

use gemini_vision_client::{ClientConfig, GeminiApi};
use leptos::prelude::*;

use crate::web::FetchClient;

pub type Api = GeminiApi<FetchClient>;

/// 读取 `<meta name="api-base" content="...">`，缺省使用 `/api`
fn api_config() -> ClientConfig {
    let base_url = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.query_selector("meta[name=\"api-base\"]").ok().flatten())
        .and_then(|meta| meta.get_attribute("content"))
        .filter(|content| !content.trim().is_empty());

    match base_url {
        Some(base_url) => {
            tracing::info!(base_url = %base_url, "using api base from meta tag");
            ClientConfig::new(&base_url)
        }
        None => ClientConfig::default(),
    }
}

pub fn provide_api() -> Api {
    let api = GeminiApi::new(FetchClient, &api_config());
    provide_context(api.clone());
    api
}

pub fn use_api() -> Api {
    use_context::<Api>().expect("GeminiApi should be provided")
}
