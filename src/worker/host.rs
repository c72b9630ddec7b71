//! Client host seam: the operations a worker asks of whatever runs it.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Result;

const NOTIFICATION_TITLE: &str = "RetroChat";
const NOTIFICATION_BODY: &str = "New message in RetroChat";
const NOTIFICATION_TAG: &str = "retro-chat-message";
const NOTIFICATION_ICON: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSI5NiIgaGVpZ2h0PSI5NiIgdmlld0JveD0iMCAwIDk2IDk2Ij4KICA8cmVjdCB3aWR0aD0iOTYiIGhlaWdodD0iOTYiIGZpbGw9IiMwMDAiLz4KICA8dGV4dCB4PSI0OCIgeT0iNTgiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGZpbGw9IiMwMGZmMDAiIGZvbnQtZmFtaWx5PSJtb25vc3BhY2UiIGZvbnQtc2l6ZT0iMzIiIGZvbnQtd2VpZ2h0PSJib2xkIj5SQzwvdGV4dD4KPC9zdmc+";
const NOTIFICATION_BADGE: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHdpZHRoPSI3MiIgaGVpZ2h0PSI3MiIgdmlld0JveD0iMCAwIDcyIDcyIj4KICA8cmVjdCB3aWR0aD0iNzIiIGhlaWdodD0iNzIiIGZpbGw9IiMwMGZmMDAiLz4KICA8dGV4dCB4PSIzNiIgeT0iNDUiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGZpbGw9IiMwMDAiIGZvbnQtZmFtaWx5PSJtb25vc3BhY2UiIGZvbnQtc2l6ZT0iMjQiIGZvbnQtd2VpZ2h0PSJib2xkIj5SQzwvdGV4dD4KPC9zdmc+";

// == Notification ==
/// A displayed notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Icon as a data URI
    pub icon: String,
    /// Badge as a data URI
    pub badge: String,
    /// Notifications with the same tag replace each other
    pub tag: String,
    pub require_interaction: bool,
}

impl Notification {
    /// The fixed new-message notification. Push payloads are not parsed, so
    /// every push produces this same notification.
    pub fn new_message() -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            body: NOTIFICATION_BODY.to_string(),
            icon: NOTIFICATION_ICON.to_string(),
            badge: NOTIFICATION_BADGE.to_string(),
            tag: NOTIFICATION_TAG.to_string(),
            require_interaction: false,
        }
    }
}

// == Client Host Trait ==
/// Host-side effects requested by the worker. Each call completes before the
/// lifecycle event that issued it is considered done.
#[async_trait]
pub trait ClientHost: Send + Sync {
    /// Activate this version without waiting for existing clients to close.
    async fn skip_waiting(&self) -> Result<()>;

    /// Take control of every open client without a reload.
    async fn claim_clients(&self) -> Result<()>;

    async fn show_notification(&self, notification: Notification) -> Result<()>;

    async fn close_notification(&self, tag: &str) -> Result<()>;

    /// Open a window at the URL, or focus one already open there.
    async fn open_window(&self, url: &str) -> Result<()>;
}

// == In-Process Host ==
#[derive(Debug, Default)]
struct HostRecord {
    skipped_waiting: bool,
    claimed: bool,
    notifications: Vec<Notification>,
    windows: Vec<String>,
}

/// Host used by the standalone server: effects are logged and recorded in
/// memory so they can be inspected over the admin API.
#[derive(Debug, Default)]
pub struct InProcessHost {
    record: RwLock<HostRecord>,
}

impl InProcessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications currently displayed.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.record.read().await.notifications.clone()
    }

    /// Windows opened so far.
    pub async fn windows(&self) -> Vec<String> {
        self.record.read().await.windows.clone()
    }

    pub async fn skipped_waiting(&self) -> bool {
        self.record.read().await.skipped_waiting
    }

    pub async fn claimed(&self) -> bool {
        self.record.read().await.claimed
    }
}

#[async_trait]
impl ClientHost for InProcessHost {
    async fn skip_waiting(&self) -> Result<()> {
        self.record.write().await.skipped_waiting = true;
        debug!("skip_waiting requested");
        Ok(())
    }

    async fn claim_clients(&self) -> Result<()> {
        self.record.write().await.claimed = true;
        debug!("Clients claimed");
        Ok(())
    }

    async fn show_notification(&self, notification: Notification) -> Result<()> {
        info!("Showing notification: {}", notification.title);
        let mut record = self.record.write().await;
        record.notifications.retain(|n| n.tag != notification.tag);
        record.notifications.push(notification);
        Ok(())
    }

    async fn close_notification(&self, tag: &str) -> Result<()> {
        self.record
            .write()
            .await
            .notifications
            .retain(|n| n.tag != tag);
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<()> {
        let mut record = self.record.write().await;
        if record.windows.iter().any(|w| w == url) {
            debug!("Focusing existing window {}", url);
        } else {
            info!("Opening window {}", url);
            record.windows.push(url.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_notification_is_fixed() {
        let notification = Notification::new_message();
        assert_eq!(notification.title, "RetroChat");
        assert_eq!(notification.body, "New message in RetroChat");
        assert_eq!(notification.tag, "retro-chat-message");
        assert!(notification.icon.starts_with("data:image/svg+xml;base64,"));
        assert!(notification.badge.starts_with("data:image/svg+xml;base64,"));
        assert!(!notification.require_interaction);
    }

    #[tokio::test]
    async fn test_same_tag_replaces_notification() {
        let host = InProcessHost::new();
        host.show_notification(Notification::new_message()).await.unwrap();
        host.show_notification(Notification::new_message()).await.unwrap();
        assert_eq!(host.notifications().await.len(), 1);

        host.close_notification("retro-chat-message").await.unwrap();
        assert!(host.notifications().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_window_focuses_existing() {
        let host = InProcessHost::new();
        host.open_window("http://localhost:8080/").await.unwrap();
        host.open_window("http://localhost:8080/").await.unwrap();
        assert_eq!(host.windows().await, vec!["http://localhost:8080/"]);
    }
}
