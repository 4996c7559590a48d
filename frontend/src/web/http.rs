//! HTTP 传输原语
//!
//! 使用 `web_sys::fetch` 实现核心层的 [`HttpClient`]。
//! 超时通过与定时器竞争实现：定时器先完成时中止 fetch 并返回超时错误。

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::future::{Either, select};
use gemini_vision_client::http::canonical_reason;
use gemini_vision_client::{HttpClient, HttpRequest, RawResponse, RequestBody, TransportError};
use gemini_vision_shared::{FormPart, MultipartForm};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit,
    Response, Window,
};

fn network(e: JsValue) -> TransportError {
    TransportError::Network(format!("{:?}", e))
}

/// 基于 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<RawResponse, TransportError> {
        let timeout_ms = req.timeout_ms;
        let window = web_sys::window()
            .ok_or_else(|| TransportError::Network("无法获取 window 对象".to_string()))?;
        let controller = AbortController::new().map_err(network)?;
        let request = build_request(req, &controller.signal())?;

        let exchange = exchange(window, request);
        let deadline = TimeoutFuture::new(timeout_ms);
        futures::pin_mut!(exchange, deadline);

        match select(exchange, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                controller.abort();
                Err(TransportError::Timeout { timeout_ms })
            }
        }
    }
}

/// 发送请求并读完响应体
async fn exchange(window: Window, request: Request) -> Result<RawResponse, TransportError> {
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?;
    let response: Response = resp_value.dyn_into().map_err(network)?;

    let status = response.status();
    let status_text = match response.status_text() {
        // HTTP/2 下浏览器不提供原因短语
        text if text.is_empty() => canonical_reason(status).to_string(),
        text => text,
    };
    let headers = read_headers(&response.headers());

    let buffer = JsFuture::from(response.array_buffer().map_err(network)?)
        .await
        .map_err(network)?;
    let body = Uint8Array::new(&buffer).to_vec();

    Ok(RawResponse {
        status,
        status_text,
        headers,
        body,
    })
}

fn build_request(req: HttpRequest, signal: &AbortSignal) -> Result<Request, TransportError> {
    let headers = Headers::new().map_err(network)?;
    for (key, value) in &req.headers {
        headers.set(key, value).map_err(network)?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());
    opts.set_signal(Some(signal));

    match req.body {
        None => {}
        Some(RequestBody::Structured(bytes)) => {
            opts.set_body(&Uint8Array::from(bytes.as_slice()).into());
        }
        // 不设置 Content-Type，由浏览器生成带 boundary 的值
        Some(RequestBody::Multipart(form)) => {
            opts.set_body(&to_form_data(form)?.into());
        }
    }

    Request::new_with_str_and_init(&req.url, &opts).map_err(network)
}

fn to_form_data(form: MultipartForm) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(network)?;
    for (name, part) in form.into_parts() {
        match part {
            FormPart::Text(value) => data.append_with_str(&name, &value).map_err(network)?,
            FormPart::File(file) => {
                let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
                let options = BlobPropertyBag::new();
                if let Some(content_type) = &file.content_type {
                    options.set_type(content_type);
                }
                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                    .map_err(network)?;
                data.append_with_blob_and_filename(&name, &blob, &file.file_name)
                    .map_err(network)?;
            }
        }
    }
    Ok(data)
}

/// 响应头，键统一转为小写
fn read_headers(headers: &Headers) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    if let Ok(Some(iter)) = js_sys::try_iter(headers) {
        for entry in iter.flatten() {
            let pair: Array = entry.unchecked_into();
            if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                map.insert(key.to_ascii_lowercase(), value);
            }
        }
    }
    map
}
