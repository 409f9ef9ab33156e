//! Wiki knowledge-base documents, categories, and linear version
//! history.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Identified, Timestamp};

/// Minimal SR reference carried on a wiki document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrInfo {
    pub id: DbId,
    pub title: String,
    pub status: String,
}

/// A markdown knowledge-base article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiDocument {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: Option<DbId>,
    pub category_name: Option<String>,
    /// SRs this document is linked to.
    #[serde(default)]
    pub srs: Vec<SrInfo>,
    pub created_by_id: DbId,
    pub created_by_name: String,
    pub updated_by_id: Option<DbId>,
    pub updated_by_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub view_count: i64,
    pub current_version: Option<i32>,
}

impl Identified for WikiDocument {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Payload for creating or updating a document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiDocumentRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sr_ids: Option<Vec<DbId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_summary: Option<String>,
}

/// A wiki category node. Children are populated on tree endpoints only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiCategory {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub parent_name: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub document_count: i64,
    #[serde(default)]
    pub children: Vec<WikiCategory>,
}

impl Identified for WikiCategory {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// How an uploaded file is used by the wiki.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WikiFileType {
    Image,
    Document,
    Attachment,
}

/// Metadata for a file attached to (or orphaned from) a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiFile {
    pub id: DbId,
    /// Absent while the file is uploaded but not yet linked.
    pub document_id: Option<DbId>,
    pub original_file_name: String,
    pub stored_file_name: String,
    pub file_size: i64,
    /// MIME type as reported at upload.
    pub file_type: String,
    #[serde(rename = "type")]
    pub kind: WikiFileType,
    pub uploaded_by_id: DbId,
    pub uploaded_by_name: String,
    pub uploaded_at: Timestamp,
    pub download_url: String,
}

/// One entry in a document's linear version history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiVersion {
    pub id: DbId,
    pub document_id: DbId,
    pub version: i32,
    pub content: String,
    pub change_summary: String,
    pub created_by_id: DbId,
    pub created_by_name: String,
    pub created_at: Timestamp,
}
