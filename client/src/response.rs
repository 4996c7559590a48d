//! 响应规范化
//!
//! 根据 Content-Type 选择解码方式，把原始响应转换为统一的 [`ResponseEnvelope`]。

use crate::error::{ApiError, ApiResult};
use crate::http::RawResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 未指定类型的响应数据
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(Value),
    Text(String),
}

/// 成功响应的统一外壳，仅为 2xx 响应构造
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope<T> {
    pub data: T,
    pub status_code: u16,
    pub status_text: String,
}

impl<T> ResponseEnvelope<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseEnvelope<U> {
        ResponseEnvelope {
            data: f(self.data),
            status_code: self.status_code,
            status_text: self.status_text,
        }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl ResponseEnvelope<ResponseData> {
    /// 将数据反序列化为具体的能力类型
    ///
    /// 文本数据按 JSON 字符串处理，因此只有目标类型接受字符串时才能成功。
    pub fn into_typed<T: DeserializeOwned>(self) -> ApiResult<ResponseEnvelope<T>> {
        let ResponseEnvelope {
            data,
            status_code,
            status_text,
        } = self;
        let value = match data {
            ResponseData::Json(v) => v,
            ResponseData::Text(s) => Value::String(s),
        };
        let data = serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(ResponseEnvelope {
            data,
            status_code,
            status_text,
        })
    }
}

/// 包含 `application/json` 的类型，或任何 `+json` 后缀的媒体类型
///
/// 按子串匹配，`application/json-patch` 之类的变体同样视为 JSON。
pub fn is_json_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    if lower.contains("application/json") {
        return true;
    }
    lower.split(';').next().unwrap_or("").trim().ends_with("+json")
}

/// 规范化原始响应
///
/// 非 2xx 不会得到外壳，而是返回 [`ApiError::HttpStatus`]。
/// 经 [`Transport`](crate::transport::Transport) 到达这里的响应已是 2xx；
/// 直接传入的原始响应仍按同一规则处理并记录一条诊断日志。
pub fn normalize(resp: RawResponse) -> ApiResult<ResponseEnvelope<ResponseData>> {
    if !resp.is_success() {
        let err = ApiError::HttpStatus {
            status: resp.status,
            status_text: resp.status_text,
        };
        tracing::error!(kind = err.kind(), error = %err, "non-success response rejected");
        return Err(err);
    }

    let is_json = resp.content_type().is_some_and(is_json_content_type);
    let data = if is_json {
        if resp.body.iter().all(u8::is_ascii_whitespace) {
            // 204 一类的空响应
            ResponseData::Json(Value::Null)
        } else {
            let value = serde_json::from_slice(&resp.body)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            ResponseData::Json(value)
        }
    } else {
        ResponseData::Text(String::from_utf8_lossy(&resp.body).into_owned())
    };

    Ok(ResponseEnvelope {
        data,
        status_code: resp.status,
        status_text: resp.status_text,
    })
}
