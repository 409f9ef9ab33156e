//! Open-API survey records (per-organization API infrastructure
//! questionnaires) and their search filter.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Identified, Timestamp};

/// An organization referenced by a survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// One organization's survey response.
///
/// The full record carries several dozen infrastructure columns; this
/// DTO keeps the identification, contact, and interface-method fields
/// the list and search surfaces use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiSurvey {
    pub id: DbId,
    pub organization: Organization,
    pub department: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub system_name: Option<String>,
    /// Current interface method (common-code value).
    pub current_method: Option<String>,
    /// Desired interface method (common-code value).
    pub desired_method: Option<String>,
    pub received_date: Option<chrono::NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Identified for OpenApiSurvey {
    fn id(&self) -> DbId {
        self.id
    }
}

/// Organization lookup row from the standard administrative code
/// registry (`GET /organizations`), used to fill the survey form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationOption {
    pub code: String,
    pub name: String,
}

/// Query filters for the survey list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_method: Option<String>,
}

/// Payload for creating or replacing a survey.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRequest {
    pub organization_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<chrono::NaiveDate>,
}
