//! Gemini 图像处理应用 - 客户端核心
//!
//! 与平台无关的部分，浏览器绑定位于 frontend crate：
//! - `request`: 请求构建（默认配置 + 覆盖项，负载编码）
//! - `http` / `transport`: 传输抽象与单次请求执行
//! - `response`: 响应规范化（按 Content-Type 解码并封装）
//! - `api`: 领域客户端，每个后端能力一个方法
//! - `route` / `router`: 路由表与导航守卫

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod route;
pub mod router;
pub mod transport;

pub use api::GeminiApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, TransportError};
pub use http::{HttpClient, HttpRequest, RawResponse};
pub use request::{Payload, RequestBody, RequestBuilder, RequestConfig, RequestOverrides};
pub use response::{ResponseData, ResponseEnvelope};
pub use route::{AppRoute, ROUTES, RouteDescriptor, RouteTable};
pub use router::{NavigationGuard, Navigator, TitleSink};
pub use transport::Transport;

pub use gemini_vision_shared as shared;
