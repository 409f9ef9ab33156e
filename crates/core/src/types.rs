//! Shared primitive aliases, pagination types, and the resource-type
//! enumeration used across notifications and embedding jobs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All server-assigned primary keys are 64-bit integers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// One page of a paginated listing, as returned by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub size: i64,
    pub number: i64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// Map the page content, preserving the pagination envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            first: self.first,
            last: self.last,
        }
    }

    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        !self.last
    }
}

/// Generic pagination parameters (`?page=&size=`).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageQuery {
    pub page: i64,
    pub size: i64,
}

impl PageQuery {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// Page `n` at the default size.
    pub fn page(page: i64) -> Self {
        Self {
            page,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Identity accessor for rows held in a cached list view.
///
/// Revalidation compares the first cached row's id against a fresh
/// page-0 fetch, so every listable entity implements this.
pub trait Identified {
    fn id(&self) -> DbId;
}

/// Resource category for embeddings and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Wiki,
    Sr,
    Survey,
}

impl ResourceType {
    /// All resource categories, in the order the admin panel shows them.
    pub const ALL: &'static [ResourceType] =
        &[ResourceType::Wiki, ResourceType::Sr, ResourceType::Survey];

    /// Wire value, e.g. for path segments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wiki => "WIKI",
            Self::Sr => "SR",
            Self::Survey => "SURVEY",
        }
    }

    /// Resolve a wire value to the corresponding variant.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "WIKI" => Ok(Self::Wiki),
            "SR" => Ok(Self::Sr),
            "SURVEY" => Ok(Self::Survey),
            _ => Err(CoreError::InvalidValue {
                field: "resourceType",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_map_preserves_envelope() {
        let page = Page {
            content: vec![1, 2, 3],
            total_elements: 30,
            total_pages: 10,
            size: 3,
            number: 0,
            first: true,
            last: false,
        };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.content, vec![2, 4, 6]);
        assert_eq!(mapped.total_elements, 30);
        assert!(mapped.has_more());
    }

    #[test]
    fn resource_type_round_trips() {
        for ty in ResourceType::ALL {
            assert_eq!(ResourceType::from_str_value(ty.as_str()).unwrap(), *ty);
        }
        assert!(ResourceType::from_str_value("VIDEO").is_err());
    }

    #[test]
    fn page_deserializes_wire_names() {
        let json = r#"{
            "content": [],
            "totalElements": 11,
            "totalPages": 2,
            "size": 10,
            "number": 0,
            "first": true,
            "last": false
        }"#;
        let page: Page<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_elements, 11);
    }
}
