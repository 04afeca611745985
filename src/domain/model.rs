use serde::{Deserialize, Serialize};

/// How a command's rendered response should be presented by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Json,
    Text,
}

/// Character set a mock identifier's random suffix is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    Hex,
    Alnum,
    LowerAlnum,
    UpperAlnum,
    Digits,
}

impl Charset {
    pub fn chars(&self) -> &'static [u8] {
        match self {
            Charset::Hex => b"0123456789abcdef",
            Charset::Alnum => b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            Charset::LowerAlnum => b"abcdefghijklmnopqrstuvwxyz0123456789",
            Charset::UpperAlnum => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
            Charset::Digits => b"0123456789",
        }
    }
}

/// One mock identifier a command needs: the template variable it fills,
/// the fixed prefix, and the shape of the random suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierSpec {
    pub field: String,
    #[serde(default)]
    pub prefix: String,
    pub length: usize,
    pub charset: Charset,
}

/// Response body template. JSON templates are parsed once at catalog build;
/// placeholders are substituted inside string leaves only.
#[derive(Debug, Clone)]
pub enum ResponseTemplate {
    Json(serde_json::Value),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct CommandDefinition {
    pub name: String,
    pub response_kind: ResponseKind,
    pub identifiers: Vec<IdentifierSpec>,
    pub template: ResponseTemplate,
}

#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    pub id: String,
    pub display_name: String,
    pub commands: Vec<CommandDefinition>,
}

impl ServiceDefinition {
    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }
}

/// A fully rendered mock response, tagged so the caller knows whether to
/// hand it to a JSON viewer or a monospace text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "lowercase")]
pub enum RenderedOutput {
    Json(serde_json::Value),
    Text(String),
}

impl RenderedOutput {
    pub fn kind(&self) -> ResponseKind {
        match self {
            RenderedOutput::Json(_) => ResponseKind::Json,
            RenderedOutput::Text(_) => ResponseKind::Text,
        }
    }

    /// Display form: pretty-printed JSON or the text block as-is.
    pub fn to_display_string(&self) -> String {
        match self {
            RenderedOutput::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            RenderedOutput::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub command: String,
    pub output: RenderedOutput,
    pub executed_at: String,
}

/// Per-session mutable state. In-memory only; discarded with the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub open_service: Option<String>,
    pub history: Vec<HistoryEntry>,
}
