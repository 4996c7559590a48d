use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::request::{Payload, RequestBuilder, RequestOverrides, with_query};
use crate::response::{ResponseData, ResponseEnvelope, normalize};
use crate::transport::Transport;
use gemini_vision_shared::protocol::{self, Endpoint};
use gemini_vision_shared::{
    ApiKeyCheck, ApiKeyValidation, DetectionResult, GenerationOptions, HttpMethod,
    ImageEditResult, ImageGenerationParams, ImageGenerationResult, ImageQaResult, ModelCatalog,
    MultipartForm, PayloadKind, SegmentationResult, VideoGenerationParams, VideoGenerationResult,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;


/// 后端 API 客户端
///
/// 无状态：每次调用独立构建请求，调用之间不共享可变数据。
/// 错误不做恢复，原样返回给页面层。
#[derive(Debug, Clone)]
pub struct GeminiApi<C> {
    transport: Transport<C>,
    builder: RequestBuilder,
}

impl<C: HttpClient> GeminiApi<C> {
    pub fn new(client: C, config: &ClientConfig) -> Self {
        Self {
            transport: Transport::new(client, config.base_url()),
            builder: RequestBuilder::new(config.timeout_ms()),
        }
    }

    pub fn transport(&self) -> &Transport<C> {
        &self.transport
    }

    // =========================================================
    // 通用请求
    // =========================================================

    /// 构建、发送并规范化一次请求
    pub async fn request(
        &self,
        path: &str,
        payload: Option<Payload>,
        overrides: RequestOverrides,
    ) -> ApiResult<ResponseEnvelope<ResponseData>> {
        let config = self.builder.build(path, payload, overrides)?;
        let raw = self.transport.execute(path, config).await?;
        normalize(raw)
    }

    /// GET，查询参数编码进 URL
    pub async fn get<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ApiResult<ResponseEnvelope<ResponseData>> {
        let path = with_query(path, query)?;
        self.request(&path, None, RequestOverrides::default()).await
    }

    pub async fn post(
        &self,
        path: &str,
        payload: Payload,
    ) -> ApiResult<ResponseEnvelope<ResponseData>> {
        self.request(path, Some(payload), RequestOverrides::method(HttpMethod::Post))
            .await
    }

    pub async fn put(
        &self,
        path: &str,
        payload: Payload,
    ) -> ApiResult<ResponseEnvelope<ResponseData>> {
        self.request(path, Some(payload), RequestOverrides::method(HttpMethod::Put))
            .await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<ResponseEnvelope<ResponseData>> {
        self.request(path, None, RequestOverrides::method(HttpMethod::Delete))
            .await
    }

    /// 按端点描述符调用
    ///
    /// 负载类型必须与描述符一致，这是唯一的参数检查，字段内容交由后端校验。
    pub async fn call<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<R>,
        payload: Option<Payload>,
    ) -> ApiResult<ResponseEnvelope<R>> {
        let op = endpoint.operation;
        let actual = payload.as_ref().map_or(PayloadKind::Empty, Payload::kind);
        if actual != op.payload {
            return Err(ApiError::Encode(format!(
                "{}: expected {:?} payload, got {:?}",
                op.name, op.payload, actual
            )));
        }

        self.request(op.path, payload, RequestOverrides::method(op.method))
            .await?
            .into_typed()
    }

    async fn fetch<R: DeserializeOwned>(&self, endpoint: &Endpoint<R>) -> ApiResult<R> {
        self.call(endpoint, None).await.map(ResponseEnvelope::into_data)
    }

    async fn submit<R: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint<R>,
        params: &P,
    ) -> ApiResult<R> {
        self.call(endpoint, Some(Payload::json(params)?))
            .await
            .map(ResponseEnvelope::into_data)
    }

    async fn upload<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<R>,
        form: MultipartForm,
    ) -> ApiResult<R> {
        self.call(endpoint, Some(Payload::Multipart(form)))
            .await
            .map(ResponseEnvelope::into_data)
    }

    // =========================================================
    // 图像问答
    // =========================================================

    /// 上传图像并提问
    pub async fn image_qa(&self, form: impl Into<MultipartForm>) -> ApiResult<ImageQaResult> {
        self.upload(&protocol::IMAGE_QA, form.into()).await
    }

    pub async fn image_qa_models(&self) -> ApiResult<ModelCatalog> {
        self.fetch(&protocol::IMAGE_QA_MODELS).await
    }

    // =========================================================
    // 图像生成
    // =========================================================

    /// 根据提示词生成图像
    pub async fn generate_image(
        &self,
        params: &ImageGenerationParams,
    ) -> ApiResult<ImageGenerationResult> {
        self.submit(&protocol::GENERATE_IMAGE, params).await
    }

    pub async fn image_generation_models(&self) -> ApiResult<ModelCatalog> {
        self.fetch(&protocol::IMAGE_GENERATION_MODELS).await
    }

    /// 可用的风格与宽高比
    pub async fn image_generation_options(&self) -> ApiResult<GenerationOptions> {
        self.fetch(&protocol::IMAGE_GENERATION_OPTIONS).await
    }

    // =========================================================
    // 图像编辑
    // =========================================================

    pub async fn edit_image(&self, form: impl Into<MultipartForm>) -> ApiResult<ImageEditResult> {
        self.upload(&protocol::EDIT_IMAGE, form.into()).await
    }

    pub async fn image_editing_operations(&self) -> ApiResult<Value> {
        self.fetch(&protocol::IMAGE_EDITING_OPERATIONS).await
    }

    pub async fn advanced_image_editing(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<ImageEditResult> {
        self.upload(&protocol::ADVANCED_IMAGE_EDITING, form.into())
            .await
    }

    /// 超分辨率放大
    pub async fn upscale_image(&self, form: impl Into<MultipartForm>) -> ApiResult<ImageEditResult> {
        self.upload(&protocol::UPSCALE_IMAGE, form.into()).await
    }

    // =========================================================
    // 目标检测
    // =========================================================

    pub async fn detect_objects(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<DetectionResult> {
        self.upload(&protocol::DETECT_OBJECTS, form.into()).await
    }

    /// 传统 CV 检测（轮廓、颜色等），不依赖 Gemini
    pub async fn detect_objects_opencv(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<DetectionResult> {
        self.upload(&protocol::DETECT_OBJECTS_OPENCV, form.into())
            .await
    }

    pub async fn detect_objects_yolo(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<DetectionResult> {
        self.upload(&protocol::DETECT_OBJECTS_YOLO, form.into()).await
    }

    /// OpenCV 与 YOLO 检测结果对比
    pub async fn compare_detection(&self, form: impl Into<MultipartForm>) -> ApiResult<Value> {
        self.upload(&protocol::COMPARE_DETECTION, form.into()).await
    }

    pub async fn validate_content_match(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<Value> {
        self.upload(&protocol::VALIDATE_CONTENT_MATCH, form.into())
            .await
    }

    pub async fn yolo_detection_models(&self) -> ApiResult<ModelCatalog> {
        self.fetch(&protocol::YOLO_DETECTION_MODELS).await
    }

    // =========================================================
    // 图像分割
    // =========================================================

    pub async fn segment_image(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<SegmentationResult> {
        self.upload(&protocol::SEGMENT_IMAGE, form.into()).await
    }

    pub async fn segment_image_opencv(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<SegmentationResult> {
        self.upload(&protocol::SEGMENT_IMAGE_OPENCV, form.into())
            .await
    }

    pub async fn segment_image_yolo(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<SegmentationResult> {
        self.upload(&protocol::SEGMENT_IMAGE_YOLO, form.into()).await
    }

    pub async fn compare_segmentation(&self, form: impl Into<MultipartForm>) -> ApiResult<Value> {
        self.upload(&protocol::COMPARE_SEGMENTATION, form.into()).await
    }

    pub async fn yolo_segmentation_models(&self) -> ApiResult<ModelCatalog> {
        self.fetch(&protocol::YOLO_SEGMENTATION_MODELS).await
    }

    // =========================================================
    // 视频生成
    // =========================================================

    pub async fn generate_video(
        &self,
        params: &VideoGenerationParams,
    ) -> ApiResult<VideoGenerationResult> {
        self.submit(&protocol::GENERATE_VIDEO, params).await
    }

    /// 以图像为首帧生成视频
    pub async fn generate_video_from_image(
        &self,
        form: impl Into<MultipartForm>,
    ) -> ApiResult<VideoGenerationResult> {
        self.upload(&protocol::GENERATE_VIDEO_FROM_IMAGE, form.into())
            .await
    }

    pub async fn video_options(&self) -> ApiResult<GenerationOptions> {
        self.fetch(&protocol::VIDEO_OPTIONS).await
    }

    // =========================================================
    // 工具
    // =========================================================

    /// 检查 Gemini API Key 是否可用
    pub async fn validate_api_key(&self, api_key: &str) -> ApiResult<ApiKeyValidation> {
        let check = ApiKeyCheck {
            api_key: api_key.to_string(),
        };
        self.submit(&protocol::VALIDATE_API_KEY, &check).await
    }

    pub async fn list_models(&self) -> ApiResult<Value> {
        self.fetch(&protocol::LIST_MODELS).await
    }

    pub async fn list_features(&self) -> ApiResult<Value> {
        self.fetch(&protocol::LIST_FEATURES).await
    }
}
