//! 페이지 응답 래퍼
//!
//! ```json
//! {"items": [...], "currentPage": 0, "totalItems": 42, "totalPages": 5, "pageSize": 10}
//! ```

use serde::{Deserialize, Serialize};

/// 정렬된 결과 집합의 한 페이지와 개수 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    /// `page_size`는 1 이상이어야 합니다.
    pub fn new(items: Vec<T>, current_page: u64, page_size: u64, total_items: u64) -> Self {
        Self {
            items,
            current_page,
            total_items,
            total_pages: total_items.div_ceil(page_size.max(1)),
            page_size,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            page_size: self.page_size,
        }
    }
}
