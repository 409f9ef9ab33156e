//! In-app notifications.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Identified, ResourceType, Timestamp};

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    DocumentCreated,
    DocumentUpdated,
    DocumentDeleted,
    CategoryCreated,
    CategoryUpdated,
    Mentioned,
    SurveyCreated,
    SurveyUpdated,
    SrCreated,
    SrUpdated,
    SrAssigned,
    SrStatusChanged,
}

/// A notification row as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DbId,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub resource_type: Option<ResourceType>,
    pub resource_id: Option<DbId>,
    pub triggered_by_id: Option<DbId>,
    pub triggered_by_name: Option<String>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Identified for Notification {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Response of the unread-count endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCount {
    pub count: i64,
}
