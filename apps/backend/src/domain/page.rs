//! Page requests and page results.
//!
//! A `PageSpec` is always normalized: construction clamps the index and
//! size, so adapters can trust whatever they receive.

use crate::errors::domain::DomainError;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;

/// Largest row offset a page may start at
const MAX_OFFSET: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Column set an entity can be sorted by
pub trait SortProperty: Copy + Sized {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder<P> {
    pub property: P,
    pub direction: SortDirection,
}

impl<P: SortProperty> SortOrder<P> {
    /// Parse `property[,asc|desc]`; the direction defaults to ascending.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.splitn(2, ',');
        let name = parts.next().unwrap_or_default().trim();
        let property = P::from_name(name).ok_or_else(|| {
            DomainError::validation(format!(
                "Unknown sort property '{name}' for {}",
                P::ENTITY
            ))
        })?;

        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(dir) => SortDirection::parse(dir).ok_or_else(|| {
                DomainError::validation(format!(
                    "Unknown sort direction '{}'; use asc or desc",
                    dir.trim()
                ))
            })?,
        };

        Ok(Self {
            property,
            direction,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec<P> {
    page: u64,
    size: u64,
    sort: Option<SortOrder<P>>,
}

impl<P> PageSpec<P> {
    /// Normalize raw request values.
    ///
    /// Negative page indices clamp to 0, sizes below 1 fall back to
    /// `DEFAULT_PAGE_SIZE` and sizes above `MAX_PAGE_SIZE` clamp to it.
    /// The page index is capped so the row offset `page * size` fits in
    /// an `i64`, which is what the stores accept for OFFSET.
    pub fn new(page: Option<i64>, size: Option<i64>, sort: Option<SortOrder<P>>) -> Self {
        let size = match size {
            Some(s) if s >= 1 => (s as u64).min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };
        let page = page.map_or(0, |p| p.max(0) as u64).min(MAX_OFFSET / size);
        Self { page, size, sort }
    }

    /// First page with the given size and no sort
    pub fn first(size: i64) -> Self {
        Self::new(Some(0), Some(size), None)
    }

    pub fn with_sort(mut self, sort: SortOrder<P>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn sort(&self) -> Option<&SortOrder<P>> {
        self.sort.as_ref()
    }
}

impl<P> Default for PageSpec<P> {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// One page of results plus the totals needed to navigate the rest
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page_number: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new<P>(content: Vec<T>, total_elements: u64, spec: &PageSpec<P>) -> Self {
        Self {
            content,
            total_elements,
            page_number: spec.page(),
            page_size: spec.size(),
        }
    }

    /// `ceil(total_elements / page_size)`
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.page_size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}
