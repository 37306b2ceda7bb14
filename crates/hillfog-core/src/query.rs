//! List query parameters

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::InvalidValue(format!("unknown sort direction: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Paging, search and sort for `query.action` endpoints
///
/// `page` is 1-based. Optional fields that are absent are omitted from the
/// request entirely, never sent as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_value: None,
            sort: None,
        }
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search_value = Some(value.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    /// Page clamped to at least 1
    pub fn effective_page(&self) -> u32 {
        self.page.max(1)
    }

    /// Page size clamped to `[1, max_page_size]`
    pub fn effective_page_size(&self, max_page_size: u32) -> u32 {
        self.page_size.clamp(1, max_page_size.max(1))
    }

    /// Wire query pairs (`page`, `size`, `searchValue`, `sortField`, `sortOrder`).
    pub fn to_pairs(&self, max_page_size: u32) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.effective_page().to_string()),
            (
                "size".to_string(),
                self.effective_page_size(max_page_size).to_string(),
            ),
        ];

        if let Some(search) = self.search_value.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("searchValue".to_string(), search.to_string()));
            }
        }

        if let Some(sort) = &self.sort {
            if !sort.field.trim().is_empty() {
                pairs.push(("sortField".to_string(), sort.field.trim().to_string()));
                pairs.push(("sortOrder".to_string(), sort.direction.to_string()));
            }
        }

        pairs
    }
}
