//! Shared query parameter types for API handlers.

use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::pagination::{Pageable, Sort, DEFAULT_PAGE_SIZE};

/// Paging parameters (`?size=&offset=&sort=`).
///
/// `sort` is a comma-separated list such as `title DESC,id`. Negative
/// `size`/`offset` are clamped to zero; `size=0` returns every row.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub size: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

impl PageParams {
    pub fn to_pageable(&self) -> Result<Pageable, CoreError> {
        let sort = match self.sort.as_deref() {
            Some(raw) => Sort::parse(raw)?,
            None => Sort::default(),
        };
        Ok(Pageable::new(
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.offset.unwrap_or(0),
            sort,
        ))
    }
}
