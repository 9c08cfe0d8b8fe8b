use serde::{Deserialize, Serialize};

/// A page of results as returned by the list endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    /// Zero-based index of this page.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    pub fn info(&self) -> PageInfo {
        PageInfo {
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// Totals reported alongside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub total_elements: u64,
    pub total_pages: u32,
}
