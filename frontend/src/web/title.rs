use gemini_vision_client::TitleSink;

/// 写入 `document.title`
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTitle;

impl TitleSink for DocumentTitle {
    fn set_title(&self, title: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(title);
        }
    }
}
