use serde::{Deserialize, Deserializer};

/// Every record line starts with this SSE-style field name.
pub const DATA_PREFIX: &str = "data: ";

/// The only `object` discriminator that carries renderable content.
pub const CHUNK_OBJECT: &str = "chat.completion.chunk";

/// One decoded `data:` record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionChunkEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletionChunkEntry {
    /// Decodes a payload, returning `None` for anything that is not a chat
    /// completion chunk (including payloads that are not JSON at all).
    pub fn decode(payload: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(payload) {
            Ok(entry) if entry.object == CHUNK_OBJECT => Some(entry),
            Ok(entry) => {
                tracing::trace!(object = %entry.object, "skipping non-chunk entry");
                None
            }
            Err(e) => {
                tracing::trace!(error = %e, "skipping undecodable entry");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub delta: Delta,
    #[serde(default, rename = "finish_reason", alias = "finishReason")]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: u32,
}

impl Choice {
    pub fn is_stop(&self) -> bool {
        self.finish_reason.as_deref() == Some("stop")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Delta {
    #[serde(
        default,
        rename = "reasoning_text",
        alias = "reasoningText",
        deserialize_with = "null_as_empty"
    )]
    pub reasoning_text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(default, rename = "tool_calls", alias = "toolCalls")]
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub function: FunctionCall,
    #[serde(default)]
    pub index: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionCall {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Raw JSON text; its schema depends on `name`.
    #[serde(default, deserialize_with = "raw_arguments")]
    pub arguments: String,
}

fn null_as_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

// Arguments normally arrive as a JSON-encoded string, but some producers
// inline the object itself.
fn raw_arguments<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(de)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}
