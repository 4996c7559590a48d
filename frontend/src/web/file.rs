//! 读取 `<input type="file">` 中选择的文件

use gemini_vision_shared::FilePart;
use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// 读取第一个选中的文件；未选择时返回 `Ok(None)`
pub async fn read_selected_file(input: &HtmlInputElement) -> Result<Option<FilePart>, String> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("读取文件失败: {:?}", e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    let part = FilePart::new(file.name(), bytes);
    let content_type = file.type_();
    Ok(Some(if content_type.is_empty() {
        part
    } else {
        part.with_content_type(content_type)
    }))
}
