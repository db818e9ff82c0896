//! Query parameters and JSON envelope for paginated listings.

use serde::{Deserialize, Serialize};

use crate::domain::{Page, PageSpec, SortOrder, SortProperty};
use crate::error::AppError;
use crate::errors::{DomainError, ErrorCode};

/// `?page=&size=&sort=property[,asc|desc]`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageQuery {
    /// Normalize into a `PageSpec`; an unknown sort is a 400.
    pub fn into_spec<P: SortProperty>(self) -> Result<PageSpec<P>, AppError> {
        let sort = match self.sort.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(SortOrder::<P>::parse(raw).map_err(|e| match e {
                DomainError::Validation(detail) => AppError::invalid(ErrorCode::InvalidSort, detail),
                other => AppError::from(other),
            })?),
            _ => None,
        };
        Ok(PageSpec::new(self.page, self.size, sort))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_number: u64,
    pub page_size: u64,
}

impl<T> PageResponse<T> {
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(f);
        Self {
            content: page.content,
            total_elements: page.total_elements,
            total_pages,
            page_number: page.page_number,
            page_size: page.page_size,
        }
    }
}
