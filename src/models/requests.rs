//! Request DTOs for the worker admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::worker::BACKGROUND_SYNC_TAG;

/// Request body for POST /_sw/sync
#[derive(Debug, Clone, Deserialize)]
pub struct SyncRequest {
    /// Sync registration tag
    #[serde(default = "default_sync_tag")]
    pub tag: String,
}

impl SyncRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.tag.trim().is_empty() {
            return Some("Tag cannot be empty".to_string());
        }
        None
    }
}

fn default_sync_tag() -> String {
    BACKGROUND_SYNC_TAG.to_string()
}

/// Request body for POST /_sw/notificationclick
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationClickRequest {
    /// Tag of the clicked notification
    #[serde(default = "default_notification_tag")]
    pub tag: String,
}

fn default_notification_tag() -> String {
    "retro-chat-message".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_request_deserialize() {
        let req: SyncRequest = serde_json::from_str(r#"{"tag": "outbox"}"#).unwrap();
        assert_eq!(req.tag, "outbox");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_sync_request_default_tag() {
        let req: SyncRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.tag, "background-sync");
    }

    #[test]
    fn test_sync_request_empty_tag_invalid() {
        let req = SyncRequest {
            tag: "  ".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_notification_click_default_tag() {
        let req: NotificationClickRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.tag, "retro-chat-message");
    }
}
