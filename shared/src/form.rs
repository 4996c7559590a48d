//! multipart 表单模块
//!
//! 表示一次文件上传请求：若干文本字段加上图像/视频等二进制文件。
//! 表单只负责按顺序保存各部分，边界(boundary)与 Content-Type 由传输层生成。

/// 文件部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    /// 例如 `image/png`，未知时由传输层按默认处理
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// 表单中的单个字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text(String),
    File(FilePart),
}

/// multipart 表单
///
/// 字段保持插入顺序，同名字段允许重复出现。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加文本字段
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts
            .push((name.into(), FormPart::Text(value.into())));
        self
    }

    /// 值为 `None` 时跳过该字段，由后端使用默认值
    pub fn text_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    /// 添加文件字段
    pub fn file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.parts.push((name.into(), FormPart::File(file)));
        self
    }

    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<(String, FormPart)> {
        self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// 按名称查找第一个文本字段
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, part)| match part {
            FormPart::Text(v) if n == name => Some(v.as_str()),
            _ => None,
        })
    }

    /// 按名称查找第一个文件字段
    pub fn file_value(&self, name: &str) -> Option<&FilePart> {
        self.parts.iter().find_map(|(n, part)| match part {
            FormPart::File(f) if n == name => Some(f),
            _ => None,
        })
    }
}
