use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Counters that are missing or not a non-negative integer read as `None`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageUsage {
    #[serde(default, deserialize_with = "lenient")]
    pub input_tokens: Option<u64>,
    /// Recorded by Claude Code but frequently degenerate (1-2 tokens for long
    /// replies); output is estimated from content instead.
    #[serde(default, deserialize_with = "lenient")]
    pub output_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cache_read_input_tokens: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    ToolUse {
        /// Tool parameters
        #[serde(default)]
        input: Option<Value>,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Message {
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub usage: Option<MessageUsage>,
    #[serde(default, deserialize_with = "content_blocks")]
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn is_assistant(&self) -> bool {
        self.role.as_deref() == Some("assistant")
    }
}

/// One line of a Claude Code transcript.
///
/// Decoding is lenient field by field: a mistyped counter, model or content
/// block degrades on its own, and only a `message` that is not an object
/// becomes `None`. The `type` discriminator is always kept, so turn
/// boundaries survive odd payloads.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct TranscriptRecord {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<Message>,
}

impl TranscriptRecord {
    pub fn is_user(&self) -> bool {
        self.kind.as_deref() == Some("user")
    }

    pub fn is_assistant(&self) -> bool {
        self.kind.as_deref() == Some("assistant")
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// A bare string is one text block; undecodable blocks in a list become `Other`.
fn content_blocks<'de, D>(deserializer: D) -> Result<Vec<ContentBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => vec![ContentBlock::Text { text }],
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or(ContentBlock::Other))
            .collect(),
        _ => Vec::new(),
    })
}
