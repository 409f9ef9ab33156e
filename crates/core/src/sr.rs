//! Service Request (SR) records, status/priority enumerations, and
//! request DTOs.
//!
//! Status transition legality is enforced server-side; the client only
//! renders the current status and requests transitions.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Identified, Timestamp};
use crate::user::User;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of an SR: OPEN → IN_PROGRESS → RESOLVED → CLOSED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SrStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl SrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "RESOLVED" => Ok(Self::Resolved),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(CoreError::InvalidValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// SR priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(CoreError::InvalidValue {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// Category of an SR history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SrHistoryType {
    InfoChange,
    StatusChange,
    PriorityChange,
    AssigneeChange,
    Comment,
}

impl SrHistoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InfoChange => "INFO_CHANGE",
            Self::StatusChange => "STATUS_CHANGE",
            Self::PriorityChange => "PRIORITY_CHANGE",
            Self::AssigneeChange => "ASSIGNEE_CHANGE",
            Self::Comment => "COMMENT",
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A Service Request as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sr {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: SrStatus,
    pub priority: Priority,
    pub requester: User,
    pub assignee: Option<User>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Identified for Sr {
    fn id(&self) -> DbId {
        self.id
    }
}

/// One entry in an SR's change history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrHistory {
    pub id: DbId,
    pub content: String,
    pub history_type: SrHistoryType,
    pub previous_value: Option<String>,
    pub new_value: Option<String>,
    pub created_by: User,
    pub created_at: Timestamp,
}

/// Payload for `POST /sr`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrCreateRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<DbId>,
}

/// Payload for `PUT /sr/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SrStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<DbId>,
}

/// Payload for `PATCH /sr/{id}/status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrStatusUpdateRequest {
    pub status: SrStatus,
}

/// Query filters for the SR list endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SrStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for s in ["OPEN", "IN_PROGRESS", "RESOLVED", "CLOSED"] {
            assert_eq!(SrStatus::from_str_value(s).unwrap().as_str(), s);
        }
        assert!(SrStatus::from_str_value("DONE").is_err());
    }

    #[test]
    fn priority_orders_by_severity() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn update_request_skips_absent_fields() {
        let req = SrUpdateRequest {
            status: Some(SrStatus::Resolved),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "RESOLVED" }));
    }
}
