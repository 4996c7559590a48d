//! Gemini 图像处理应用 - 前后端共享协议
//!
//! - `protocol`: HTTP 方法、负载类型与端点描述符
//! - `form`: multipart 表单（图像/视频文件 + 字段）
//! - `models`: 各项能力的请求参数与响应结构

pub mod form;
pub mod models;
pub mod protocol;

pub use form::{FilePart, FormPart, MultipartForm};
pub use models::*;
pub use protocol::{Endpoint, HttpMethod, Operation, PayloadKind};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后端 API 的默认基础路径
pub const DEFAULT_API_BASE: &str = "/api";

/// 结构化数据的媒体类型
pub const JSON_CONTENT_TYPE: &str = "application/json";

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
