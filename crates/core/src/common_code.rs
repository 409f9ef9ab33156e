//! Common codes: admin-managed lookup values grouped by code group
//! (interface methods, server types, and so on).

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Identified};

/// One lookup code row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonCode {
    pub id: DbId,
    pub code_group: String,
    pub code_value: String,
    pub code_name: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub description: Option<String>,
}

impl Identified for CommonCode {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Payload for creating or updating a code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonCodeRequest {
    pub code_group: String,
    pub code_value: String,
    pub code_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
