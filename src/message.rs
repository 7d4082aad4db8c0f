// src/message.rs
use serde::{Deserialize, Serialize};

fn default_reqid() -> String {
    "0000".to_string()
}

/// Query string of `GET /example`.
#[derive(Debug, Deserialize)]
pub struct ExampleQuery {
    /// Time to wait, in seconds.
    pub wait: f64,
    #[serde(default = "default_reqid")]
    pub reqid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandlerStatsData {
    pub completed: u64,
    pub cancelled: u64,
}
