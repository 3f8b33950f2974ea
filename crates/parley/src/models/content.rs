use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Provider-native content passed through to the wire untouched
///
/// Used to inject constructs the abstraction layer does not model, such as
/// explicit prompt caching directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawContent {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<Value>,
}

impl RawContent {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            cache_control: None,
        }
    }

    /// Record the cache directive carried by this content
    pub fn with_cache_control(mut self, cache_control: Value) -> Self {
        self.cache_control = Some(cache_control);
        self
    }

    /// A single text block annotated with `cache_control`, in provider-native shape
    pub fn cached_text<S: Into<String>>(text: S, cache_control: Value) -> Self {
        let value = json!([{
            "type": "text",
            "text": text.into(),
            "cache_control": cache_control.clone(),
        }]);
        Self::new(value).with_cache_control(cache_control)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

/// Where an image or file part lives; encoding is done before it reaches us
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaSource {
    Base64 { media_type: String, data: String },
    Url { url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// One typed part of structured content
pub enum ContentPart {
    Text {
        text: String,
    },
    Image {
        source: MediaSource,
    },
    File {
        source: MediaSource,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl ContentPart {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_base64<M: Into<String>, D: Into<String>>(media_type: M, data: D) -> Self {
        ContentPart::Image {
            source: MediaSource::Base64 {
                media_type: media_type.into(),
                data: data.into(),
            },
        }
    }

    pub fn image_url<S: Into<String>>(url: S) -> Self {
        ContentPart::Image {
            source: MediaSource::Url { url: url.into() },
        }
    }

    pub fn file(source: MediaSource, title: Option<String>) -> Self {
        ContentPart::File { source, title }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Content carried by a message
pub enum Content {
    Text(String),
    Raw(RawContent),
    Parts(Vec<ContentPart>),
}

impl Content {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Content::Text(text.into())
    }

    pub fn raw(value: Value) -> Self {
        Content::Raw(RawContent::new(value))
    }

    pub fn parts(parts: Vec<ContentPart>) -> Self {
        Content::Parts(parts)
    }

    pub fn empty() -> Self {
        Content::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text(text) => text.is_empty(),
            Content::Raw(raw) => raw.is_empty(),
            Content::Parts(parts) => parts.is_empty(),
        }
    }

    /// Get the text if this is plain text content
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&RawContent> {
        match self {
            Content::Raw(raw) => Some(raw),
            _ => None,
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::empty()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<RawContent> for Content {
    fn from(raw: RawContent) -> Self {
        Content::Raw(raw)
    }
}
