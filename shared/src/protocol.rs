use crate::models::{
    ApiKeyValidation, DetectionResult, GenerationOptions, ImageEditResult, ImageGenerationResult,
    ImageQaResult, ModelCatalog, SegmentationResult, VideoGenerationResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 请求体的编码方式
///
/// 在调用处显式标记，而不是在运行时探测负载的具体类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadKind {
    /// 无请求体
    Empty,
    /// JSON 结构化数据
    Structured,
    /// multipart 原始表单（文件 + 字段）
    Multipart,
}

/// 端点描述符：一个后端能力对应一条记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// 操作名称，用于日志与错误上下文
    pub name: &'static str,
    /// 相对于 API 基础路径的路径
    pub path: &'static str,
    pub method: HttpMethod,
    pub payload: PayloadKind,
}

/// 携带响应类型的端点描述符
///
/// `R` 仅在类型层面绑定该端点返回的数据结构，不占用运行时空间。
pub struct Endpoint<R> {
    pub operation: Operation,
    response: PhantomData<fn() -> R>,
}

impl<R> Endpoint<R> {
    pub const fn new(
        name: &'static str,
        path: &'static str,
        method: HttpMethod,
        payload: PayloadKind,
    ) -> Self {
        Self {
            operation: Operation {
                name,
                path,
                method,
                payload,
            },
            response: PhantomData,
        }
    }

    /// 无请求体的 GET 查询
    pub const fn query(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, HttpMethod::Get, PayloadKind::Empty)
    }

    /// 以 JSON 提交的 POST
    pub const fn json(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, HttpMethod::Post, PayloadKind::Structured)
    }

    /// 以 multipart 表单提交的 POST
    pub const fn form(name: &'static str, path: &'static str) -> Self {
        Self::new(name, path, HttpMethod::Post, PayloadKind::Multipart)
    }
}

impl<R> Clone for Endpoint<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Endpoint<R> {}

impl<R> fmt::Debug for Endpoint<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Endpoint").field(&self.operation).finish()
    }
}

// =========================================================
// Endpoint Definitions
// =========================================================

// --- 图像问答 ---
pub const IMAGE_QA: Endpoint<ImageQaResult> = Endpoint::form("image_qa", "/image-qa");
pub const IMAGE_QA_MODELS: Endpoint<ModelCatalog> =
    Endpoint::query("image_qa_models", "/image-qa/models");

// --- 图像生成 ---
pub const GENERATE_IMAGE: Endpoint<ImageGenerationResult> =
    Endpoint::json("generate_image", "/image-generation");
pub const IMAGE_GENERATION_MODELS: Endpoint<ModelCatalog> =
    Endpoint::query("image_generation_models", "/image-generation/models");
pub const IMAGE_GENERATION_OPTIONS: Endpoint<GenerationOptions> =
    Endpoint::query("image_generation_options", "/image-generation/options");

// --- 图像编辑 ---
pub const EDIT_IMAGE: Endpoint<ImageEditResult> = Endpoint::form("edit_image", "/image-editing");
pub const IMAGE_EDITING_OPERATIONS: Endpoint<serde_json::Value> =
    Endpoint::query("image_editing_operations", "/image-editing/operations");
pub const ADVANCED_IMAGE_EDITING: Endpoint<ImageEditResult> =
    Endpoint::form("advanced_image_editing", "/image-editing/advanced");
pub const UPSCALE_IMAGE: Endpoint<ImageEditResult> =
    Endpoint::form("upscale_image", "/image-upscale");

// --- 目标检测 ---
pub const DETECT_OBJECTS: Endpoint<DetectionResult> =
    Endpoint::form("detect_objects", "/object-detection");
pub const DETECT_OBJECTS_OPENCV: Endpoint<DetectionResult> =
    Endpoint::form("detect_objects_opencv", "/object-detection/opencv");
pub const DETECT_OBJECTS_YOLO: Endpoint<DetectionResult> =
    Endpoint::form("detect_objects_yolo", "/object-detection/yolo");
pub const COMPARE_DETECTION: Endpoint<serde_json::Value> =
    Endpoint::form("compare_detection", "/object-detection/compare");
pub const VALIDATE_CONTENT_MATCH: Endpoint<serde_json::Value> =
    Endpoint::form("validate_content_match", "/object-detection/validate-content");
pub const YOLO_DETECTION_MODELS: Endpoint<ModelCatalog> =
    Endpoint::query("yolo_detection_models", "/object-detection/yolo-models");

// --- 图像分割 ---
pub const SEGMENT_IMAGE: Endpoint<SegmentationResult> =
    Endpoint::form("segment_image", "/image-segmentation");
pub const SEGMENT_IMAGE_OPENCV: Endpoint<SegmentationResult> =
    Endpoint::form("segment_image_opencv", "/image-segmentation/opencv");
pub const SEGMENT_IMAGE_YOLO: Endpoint<SegmentationResult> =
    Endpoint::form("segment_image_yolo", "/image-segmentation/yolo");
pub const COMPARE_SEGMENTATION: Endpoint<serde_json::Value> =
    Endpoint::form("compare_segmentation", "/image-segmentation/compare");
pub const YOLO_SEGMENTATION_MODELS: Endpoint<ModelCatalog> =
    Endpoint::query("yolo_segmentation_models", "/image-segmentation/yolo-models");

// --- 视频生成 ---
pub const GENERATE_VIDEO: Endpoint<VideoGenerationResult> =
    Endpoint::json("generate_video", "/video-generation");
pub const GENERATE_VIDEO_FROM_IMAGE: Endpoint<VideoGenerationResult> =
    Endpoint::form("generate_video_from_image", "/video-generation/from-image");
pub const VIDEO_OPTIONS: Endpoint<GenerationOptions> =
    Endpoint::query("video_options", "/video-generation/options");

// --- 工具 ---
pub const VALIDATE_API_KEY: Endpoint<ApiKeyValidation> =
    Endpoint::json("validate_api_key", "/test-api-key");
pub const LIST_MODELS: Endpoint<serde_json::Value> = Endpoint::query("list_models", "/models");
pub const LIST_FEATURES: Endpoint<serde_json::Value> =
    Endpoint::query("list_features", "/features");

/// 全部后端能力的描述符列表
pub const OPERATIONS: &[Operation] = &[
    IMAGE_QA.operation,
    IMAGE_QA_MODELS.operation,
    GENERATE_IMAGE.operation,
    IMAGE_GENERATION_MODELS.operation,
    IMAGE_GENERATION_OPTIONS.operation,
    EDIT_IMAGE.operation,
    IMAGE_EDITING_OPERATIONS.operation,
    ADVANCED_IMAGE_EDITING.operation,
    UPSCALE_IMAGE.operation,
    DETECT_OBJECTS.operation,
    DETECT_OBJECTS_OPENCV.operation,
    DETECT_OBJECTS_YOLO.operation,
    COMPARE_DETECTION.operation,
    VALIDATE_CONTENT_MATCH.operation,
    YOLO_DETECTION_MODELS.operation,
    SEGMENT_IMAGE.operation,
    SEGMENT_IMAGE_OPENCV.operation,
    SEGMENT_IMAGE_YOLO.operation,
    COMPARE_SEGMENTATION.operation,
    YOLO_SEGMENTATION_MODELS.operation,
    GENERATE_VIDEO.operation,
    GENERATE_VIDEO_FROM_IMAGE.operation,
    VIDEO_OPTIONS.operation,
    VALIDATE_API_KEY.operation,
    LIST_MODELS.operation,
    LIST_FEATURES.operation,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_operation_names_are_unique() {
        let mut seen = HashSet::new();
        for op in OPERATIONS {
            assert!(seen.insert(op.name), "duplicate operation name: {}", op.name);
        }
    }

    #[test]
    fn test_method_and_path_pairs_are_unique() {
        let mut seen = HashSet::new();
        for op in OPERATIONS {
            assert!(
                seen.insert((op.method, op.path)),
                "duplicate endpoint: {} {}",
                op.method,
                op.path
            );
        }
    }

    #[test]
    fn test_get_operations_carry_no_body() {
        for op in OPERATIONS.iter().filter(|op| op.method == HttpMethod::Get) {
            assert_eq!(op.payload, PayloadKind::Empty, "{}", op.name);
        }
    }

    #[test]
    fn test_upload_operations_use_multipart() {
        assert_eq!(IMAGE_QA.operation.payload, PayloadKind::Multipart);
        assert_eq!(DETECT_OBJECTS.operation.payload, PayloadKind::Multipart);
        assert_eq!(SEGMENT_IMAGE.operation.payload, PayloadKind::Multipart);
        assert_eq!(DETECT_OBJECTS_OPENCV.operation.payload, PayloadKind::Multipart);
        assert_eq!(SEGMENT_IMAGE_OPENCV.operation.method, HttpMethod::Post);
        assert_eq!(GENERATE_IMAGE.operation.payload, PayloadKind::Structured);
        assert_eq!(VALIDATE_API_KEY.operation.payload, PayloadKind::Structured);
    }

    #[test]
    fn test_every_analysis_backend_is_listed() {
        let paths: Vec<&str> = OPERATIONS.iter().map(|op| op.path).collect();
        for path in [
            "/object-detection",
            "/object-detection/opencv",
            "/object-detection/yolo",
            "/image-segmentation",
            "/image-segmentation/opencv",
            "/image-segmentation/yolo",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
        assert_eq!(OPERATIONS.len(), 26);
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
    }
}
