use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Body of a successful `GET /colors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorsPage {
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub colors: Vec<String>,
}

/// Raw query string values; validated by [`parse_bound`].
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn validate(&self) -> Result<(u64, u64), ApiError> {
        let page = parse_bound(self.page.as_deref(), DEFAULT_PAGE)?;
        let limit = parse_bound(self.limit.as_deref(), DEFAULT_LIMIT)?;
        Ok((page, limit))
    }
}

/// Absent values take `default`; present ones must be integers >= 1.
pub fn parse_bound(raw: Option<&str>, default: u64) -> Result<u64, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(ApiError::InvalidPagination),
    }
}

/// Slice `items[(page-1)*limit .. page*limit)`, clipped to the list.
pub fn paginate(items: &[String], page: u64, limit: u64) -> ColorsPage {
    let len = items.len() as u64;
    let start = page.saturating_sub(1).saturating_mul(limit).min(len) as usize;
    let end = page.saturating_mul(limit).min(len) as usize;

    ColorsPage {
        page,
        limit,
        total_items: len,
        total_pages: len.div_ceil(limit),
        colors: items[start..end].to_vec(),
    }
}
