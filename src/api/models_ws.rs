use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct WsClientMessage {
    pub r#type: String, // Expected: "message", "reset"
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct WsServerMessage {
    pub r#type: String, // Expected: "reply", "done", "error"
    pub content: String,
}
