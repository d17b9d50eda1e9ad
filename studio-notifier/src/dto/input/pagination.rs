use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    ///
    /// indexing starts at 0
    ///
    #[serde(default)]
    pub page_idx: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_idx: 0,
            page_size: default_page_size(),
        }
    }
}
