//! 请求参数与响应数据结构
//!
//! 响应结构只声明前端关心的字段，其余字段原样保存在 `extra` 中，
//! 客户端不对这些值做任何解释。

use crate::form::{FilePart, MultipartForm};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 未声明字段的原样存储
pub type Extra = Map<String, Value>;

// =========================================================
// 请求参数 (Structured Payloads)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationParams {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ImageGenerationParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            aspect_ratio: None,
            style: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoGenerationParams {
    pub prompt: String,
    /// 视频时长（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
}

impl VideoGenerationParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration: None,
            style: None,
            aspect_ratio: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyCheck {
    pub api_key: String,
}

// =========================================================
// 上传表单 (Multipart Payloads)
// =========================================================

/// 图像问答表单
#[derive(Debug, Clone)]
pub struct ImageQaForm {
    pub image: FilePart,
    pub question: String,
    pub model: Option<String>,
}

impl From<ImageQaForm> for MultipartForm {
    fn from(f: ImageQaForm) -> Self {
        MultipartForm::new()
            .file("image", f.image)
            .text("question", f.question)
            .text_opt("model", f.model)
    }
}

/// 图像编辑表单
///
/// 不同 `edit_type` 需要的参数不同（如 `instruction`、`filter_type`、`factor`），
/// 统一以字符串字段提交。
#[derive(Debug, Clone)]
pub struct ImageEditForm {
    pub image: FilePart,
    pub edit_type: String,
    pub params: BTreeMap<String, String>,
}

impl ImageEditForm {
    pub fn new(image: FilePart, edit_type: impl Into<String>) -> Self {
        Self {
            image,
            edit_type: edit_type.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }
}

impl From<ImageEditForm> for MultipartForm {
    fn from(f: ImageEditForm) -> Self {
        let form = MultipartForm::new()
            .file("image", f.image)
            .text("edit_type", f.edit_type);
        f.params
            .into_iter()
            .fold(form, |form, (k, v)| form.text(k, v))
    }
}

/// 目标检测表单（Gemini 与 YOLO 两种后端共用）
///
/// YOLO 端点优先读取 `user_query`，缺省时回退到 `object_name`。
#[derive(Debug, Clone)]
pub struct DetectionForm {
    pub image: FilePart,
    pub object_name: String,
    /// YOLO 模型名，如 `yolo11n`
    pub model: Option<String>,
    pub confidence: Option<f32>,
    pub user_query: Option<String>,
}

impl From<DetectionForm> for MultipartForm {
    fn from(f: DetectionForm) -> Self {
        MultipartForm::new()
            .file("image", f.image)
            .text("object_name", f.object_name)
            .text_opt("model", f.model)
            .text_opt("confidence", f.confidence.map(|c| c.to_string()))
            .text_opt("user_query", f.user_query)
    }
}

/// 图像分割表单（Gemini 与 YOLO 两种后端共用）
#[derive(Debug, Clone)]
pub struct SegmentationForm {
    pub image: FilePart,
    pub object_name: String,
    /// YOLO 分割模型名，如 `yolo11n-seg`
    pub model_name: Option<String>,
    pub confidence: Option<f32>,
    pub user_query: Option<String>,
}

impl From<SegmentationForm> for MultipartForm {
    fn from(f: SegmentationForm) -> Self {
        MultipartForm::new()
            .file("image", f.image)
            .text("object_name", f.object_name)
            .text_opt("model_name", f.model_name)
            .text_opt("confidence", f.confidence.map(|c| c.to_string()))
            .text_opt("user_query", f.user_query)
    }
}

/// OpenCV 检测/分割表单
///
/// `method` 缺省时由后端选择（检测为 `contour`，分割为 `contour_mask`）。
#[derive(Debug, Clone)]
pub struct OpenCvForm {
    pub image: FilePart,
    pub object_name: String,
    pub method: Option<String>,
}

impl From<OpenCvForm> for MultipartForm {
    fn from(f: OpenCvForm) -> Self {
        MultipartForm::new()
            .file("image", f.image)
            .text_opt("method", f.method)
            .text("object_name", f.object_name)
    }
}

/// 多方法对比表单，检测与分割的对比端点共用同一组字段
#[derive(Debug, Clone)]
pub struct CompareForm {
    pub image: FilePart,
    pub object_name: String,
    pub opencv_method: Option<String>,
    pub yolo_model: Option<String>,
}

impl From<CompareForm> for MultipartForm {
    fn from(f: CompareForm) -> Self {
        MultipartForm::new()
            .file("image", f.image)
            .text("object_name", f.object_name)
            .text_opt("opencv_method", f.opencv_method)
            .text_opt("yolo_model", f.yolo_model)
    }
}

/// 图像内容预检表单
#[derive(Debug, Clone)]
pub struct ContentMatchForm {
    pub image: FilePart,
    pub user_query: String,
}

impl From<ContentMatchForm> for MultipartForm {
    fn from(f: ContentMatchForm) -> Self {
        MultipartForm::new()
            .file("image", f.image)
            .text("user_query", f.user_query)
    }
}

/// 高级编辑表单：自然语言指令，可附带蒙版图
#[derive(Debug, Clone)]
pub struct AdvancedEditForm {
    pub image: FilePart,
    pub edit_prompt: String,
    pub mask: Option<FilePart>,
}

impl From<AdvancedEditForm> for MultipartForm {
    fn from(f: AdvancedEditForm) -> Self {
        let form = MultipartForm::new()
            .file("image", f.image)
            .text("edit_prompt", f.edit_prompt);
        match f.mask {
            Some(mask) => form.file("mask", mask),
            None => form,
        }
    }
}

/// 超分辨率表单，`scale_factor` 缺省为后端默认值 2
#[derive(Debug, Clone)]
pub struct UpscaleForm {
    pub image: FilePart,
    pub scale_factor: Option<u32>,
}

impl From<UpscaleForm> for MultipartForm {
    fn from(f: UpscaleForm) -> Self {
        MultipartForm::new()
            .file("image", f.image)
            .text_opt("scale_factor", f.scale_factor.map(|s| s.to_string()))
    }
}

/// 图生视频表单
#[derive(Debug, Clone)]
pub struct VideoFromImageForm {
    pub image: FilePart,
    pub prompt: String,
    pub duration: Option<u32>,
    pub aspect_ratio: Option<String>,
}

impl From<VideoFromImageForm> for MultipartForm {
    fn from(f: VideoFromImageForm) -> Self {
        MultipartForm::new()
            .file("image", f.image)
            .text("prompt", f.prompt)
            .text_opt("duration", f.duration.map(|d| d.to_string()))
            .text_opt("aspect_ratio", f.aspect_ratio)
    }
}

// =========================================================
// 响应数据 (Response Payloads)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageQaResult {
    #[serde(default)]
    pub success: bool,
    pub answer: Option<String>,
    pub question: Option<String>,
    pub model_used: Option<String>,
    pub image_path: Option<String>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub path: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationResult {
    #[serde(default)]
    pub success: bool,
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
    pub image_path: Option<String>,
    pub original_prompt: Option<String>,
    pub optimized_prompt: Option<String>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEditResult {
    #[serde(default)]
    pub success: bool,
    pub original_image: Option<String>,
    #[serde(default)]
    pub edited_images: Vec<String>,
    pub edit_type: Option<String>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// 检测框：`bbox` 保持后端给出的坐标顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    pub confidence: Option<f64>,
    #[serde(default)]
    pub bbox: Vec<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `detected_objects` 中的一项
///
/// 正常检测返回带坐标的对象；内容不匹配时后端只列出图中识别到的名称。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetectedItem {
    Object(DetectedObject),
    Name(String),
}

impl DetectedItem {
    pub fn label(&self) -> &str {
        match self {
            DetectedItem::Object(obj) => &obj.label,
            DetectedItem::Name(name) => name,
        }
    }

    pub fn as_object(&self) -> Option<&DetectedObject> {
        match self {
            DetectedItem::Object(obj) => Some(obj),
            DetectedItem::Name(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub detected_objects: Vec<DetectedItem>,
    pub original_image: Option<String>,
    #[serde(default)]
    pub bbox_images: Vec<String>,
    pub summary_image: Option<String>,
    pub response_text: Option<String>,
    pub error: Option<String>,
    /// 图像内容与查询不符（HTTP 200 + `success: false`）
    #[serde(default)]
    pub content_mismatch: bool,
    pub message: Option<String>,
    pub suggestion: Option<String>,
    #[serde(default)]
    pub alternative_queries: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentedObject {
    pub label: String,
    pub description: Option<String>,
    pub confidence: Option<f64>,
    #[serde(default)]
    pub bbox: Vec<f64>,
    pub segment_image: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationResult {
    #[serde(default)]
    pub success: bool,
    pub original_image: Option<String>,
    #[serde(default)]
    pub segmented_objects: Vec<SegmentedObject>,
    #[serde(default)]
    pub segment_images: Vec<String>,
    pub response_text: Option<String>,
    pub error: Option<String>,
    /// 仅在内容不匹配时出现：图中实际识别到的对象
    #[serde(default)]
    pub detected_objects: Vec<DetectedItem>,
    #[serde(default)]
    pub content_mismatch: bool,
    pub message: Option<String>,
    pub suggestion: Option<String>,
    #[serde(default)]
    pub alternative_queries: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoGenerationResult {
    #[serde(default)]
    pub success: bool,
    pub status: Option<String>,
    pub message: Option<String>,
    pub video_path: Option<String>,
    pub preview_image: Option<String>,
    pub original_prompt: Option<String>,
    pub optimized_prompt: Option<String>,
    pub duration: Option<u32>,
    pub aspect_ratio: Option<String>,
    pub model: Option<String>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub experimental: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

/// 模型列表，键为模型 ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub models: BTreeMap<String, ModelInfo>,
    pub default_model: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// 生成选项（风格、宽高比、时长等），各选项的内部结构随后端变化，保持为原始 JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub styles: Value,
    #[serde(default)]
    pub aspect_ratios: Value,
    pub default_style: Option<String>,
    pub default_aspect_ratio: Option<String>,
    pub default_model: Option<String>,
    pub default_duration: Option<u32>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyValidation {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub response_preview: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
