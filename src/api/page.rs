use serde::{Deserialize, Serialize};

/// sort direction for paged listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// page request shared by every listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_no: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl PageRequest {
    pub fn new(page_no: u32, page_size: u32) -> Self {
        Self {
            page_no,
            page_size,
            sort_by: "id".to_string(),
            sort_dir: SortDirection::Asc,
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, dir: SortDirection) -> Self {
        self.sort_by = field.into();
        self.sort_dir = dir;
        self
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// one page of results in the backend's wrapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_no: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn empty(request: &PageRequest) -> Self {
        Self {
            content: Vec::new(),
            page_no: request.page_no,
            page_size: request.page_size,
            total_elements: 0,
            total_pages: 0,
            last: true,
        }
    }

    /// slice a full result set into the requested page
    pub fn from_items(items: Vec<T>, request: &PageRequest) -> Self {
        let total_elements = items.len() as u64;
        let page_size = request.page_size.max(1);
        let total_pages = ((total_elements + page_size as u64 - 1) / page_size as u64) as u32;

        let start = (request.page_no as usize) * (page_size as usize);
        let content: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Self {
            content,
            page_no: request.page_no,
            page_size,
            total_elements,
            total_pages,
            last: request.page_no + 1 >= total_pages.max(1),
        }
    }

    /// project content into another view, keeping the page shape
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_no: self.page_no,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}
