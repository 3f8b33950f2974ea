use serde_json::{json, Value};

use crate::models::content::{Content, ContentPart, MediaSource};

/// Convert content into the wire `content` value of a message
///
/// Raw content is returned verbatim, everything else becomes an array of
/// content blocks.
pub fn format_content(content: &Content) -> Value {
    match content {
        Content::Raw(raw) => raw.value().clone(),
        _ => Value::Array(content_blocks(content)),
    }
}

/// Convert content into an ordered list of wire content blocks
///
/// A raw array contributes its elements, any other raw value contributes itself.
pub fn content_blocks(content: &Content) -> Vec<Value> {
    match content {
        Content::Text(text) if text.is_empty() => Vec::new(),
        Content::Text(text) => vec![text_block(text)],
        Content::Raw(raw) => match raw.value() {
            Value::Array(items) => items.clone(),
            Value::Null => Vec::new(),
            value => vec![value.clone()],
        },
        Content::Parts(parts) => parts.iter().map(format_part).collect(),
    }
}

pub fn text_block(text: &str) -> Value {
    json!({
        "type": "text",
        "text": text,
    })
}

fn format_part(part: &ContentPart) -> Value {
    match part {
        ContentPart::Text { text } => text_block(text),
        ContentPart::Image { source } => json!({
            "type": "image",
            "source": format_source(source),
        }),
        ContentPart::File { source, title } => {
            let mut block = json!({
                "type": "document",
                "source": format_source(source),
            });
            if let Some(title) = title {
                block["title"] = json!(title);
            }
            block
        }
    }
}

fn format_source(source: &MediaSource) -> Value {
    match source {
        MediaSource::Base64 { media_type, data } => json!({
            "type": "base64",
            "media_type": media_type,
            "data": data,
        }),
        MediaSource::Url { url } => json!({
            "type": "url",
            "url": url,
        }),
    }
}
