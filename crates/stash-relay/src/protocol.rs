//! Wire types for the relay's JSON protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Actions the relay accepts, in the order they are advertised.
pub const AVAILABLE_ACTIONS: [&str; 5] = ["add", "list", "complete", "delete", "count"];

/// A client command. Every field is optional so malformed-but-parseable
/// messages reach the dispatcher, which produces the specific error.
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    pub action: Option<String>,
    /// Todo text for `add`.
    pub todo: Option<String>,
    /// Todo id for `complete` and `delete`.
    pub id: Option<String>,
}

/// The relay's reply envelope. Absent fields are omitted from the wire.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reply {
    pub fn ok(action: &str, data: Value) -> Self {
        Self {
            success: true,
            action: Some(action.to_string()),
            data: Some(data),
            count: None,
            message: None,
            error: None,
        }
    }

    pub fn ok_message(action: &str, message: &str) -> Self {
        Self {
            success: true,
            action: Some(action.to_string()),
            data: None,
            count: None,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn ok_count(action: &str, count: u64) -> Self {
        Self {
            success: true,
            action: Some(action.to_string()),
            data: None,
            count: Some(count),
            message: None,
            error: None,
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            action: None,
            data: None,
            count: None,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn failure_with_error(message: &str, error: &str) -> Self {
        Self {
            success: false,
            action: None,
            data: None,
            count: None,
            message: Some(message.to_string()),
            error: Some(error.to_string()),
        }
    }
}

/// First frame of every session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Welcome {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: &'static str,
    pub available_actions: Vec<&'static str>,
}

impl Welcome {
    pub fn new() -> Self {
        Self {
            kind: "welcome",
            message: "Connected to Todo WebSocket server",
            available_actions: AVAILABLE_ACTIONS.to_vec(),
        }
    }
}

impl Default for Welcome {
    fn default() -> Self {
        Self::new()
    }
}
