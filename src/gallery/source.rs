use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::color::Color;
use crate::error::GalleryError;
use crate::server::ColorsPage;

use super::{Cursor, Page, PaletteRecord};

/// Anything that can hand out pages of palettes.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, cursor: Cursor) -> Result<Page, GalleryError>;
}

/// Client for the `GET /colors` endpoint.
///
/// Each page of colors is split into palettes of `palette_size` colors in
/// order; `has_more` follows the reported `totalPages`.
pub struct ColorsApiSource {
    client: reqwest::Client,
    base_url: String,
    limit: u32,
    palette_size: usize,
}

impl ColorsApiSource {
    pub fn new(base_url: &str, limit: u32, palette_size: usize) -> Result<Self, GalleryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("swatchbook/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit: limit.max(1),
            palette_size: palette_size.max(1),
        })
    }

    fn to_page(&self, body: ColorsPage, cursor: Cursor) -> Result<Page, GalleryError> {
        let colors = body
            .colors
            .iter()
            .map(|raw| {
                Color::from_hex(raw).map_err(|_| GalleryError::InvalidColor {
                    value: raw.clone(),
                    page: cursor.page_number(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items: colors
                .chunks(self.palette_size)
                .map(|chunk| PaletteRecord::new(chunk.to_vec()))
                .collect(),
            has_more: body.page < body.total_pages,
        })
    }
}

#[async_trait]
impl PageSource for ColorsApiSource {
    async fn fetch_page(&self, cursor: Cursor) -> Result<Page, GalleryError> {
        let url = format!("{}/colors", self.base_url);
        debug!("Fetching: {url} ({cursor})");

        let response = self
            .client
            .get(&url)
            .query(&[("page", cursor.page_number()), ("limit", self.limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GalleryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ColorsPage = response.json().await?;
        self.to_page(body, cursor)
    }
}

/// Serves records already in memory, `page_size` at a time.
pub struct MemorySource {
    records: Vec<PaletteRecord>,
    page_size: usize,
}

impl MemorySource {
    pub fn new(records: Vec<PaletteRecord>, page_size: usize) -> Self {
        Self {
            records,
            page_size: page_size.max(1),
        }
    }

    /// Palettes built from the server's default color list.
    pub fn demo(palette_size: usize, page_size: usize) -> Self {
        let colors: Vec<Color> = crate::server::DEFAULT_COLORS
            .iter()
            .filter_map(|hex| Color::from_hex(hex).ok())
            .collect();
        let records = colors
            .chunks(palette_size.max(1))
            .map(|chunk| PaletteRecord::new(chunk.to_vec()))
            .collect();
        Self::new(records, page_size)
    }

    pub fn page_at(&self, cursor: Cursor) -> Page {
        let index = cursor.page_number().saturating_sub(1) as usize;
        let start = index.saturating_mul(self.page_size).min(self.records.len());
        let end = start.saturating_add(self.page_size).min(self.records.len());

        Page {
            items: self.records[start..end].to_vec(),
            has_more: end < self.records.len(),
        }
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch_page(&self, cursor: Cursor) -> Result<Page, GalleryError> {
        Ok(self.page_at(cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<PaletteRecord> {
        (0..n)
            .map(|i| PaletteRecord::new(vec![Color::new(i as u8, 0, 0), Color::new(0, i as u8, 1)]))
            .collect()
    }

    #[test]
    fn memory_source_pages_in_order() {
        let source = MemorySource::new(records(5), 2);
        let first = source.page_at(Cursor::first());
        let second = source.page_at(Cursor::first().next());
        let third = source.page_at(Cursor::first().next().next());

        assert_eq!(first.items, records(5)[0..2]);
        assert!(first.has_more);
        assert_eq!(second.items, records(5)[2..4]);
        assert_eq!(third.items, records(5)[4..5]);
        assert!(!third.has_more);
    }

    #[test]
    fn memory_source_past_end_is_empty() {
        let source = MemorySource::new(records(2), 2);
        let page = source.page_at(Cursor::first().next().next());
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn demo_source_groups_default_colors() {
        let source = MemorySource::demo(5, 4);
        assert_eq!(source.records.len(), 19);
        assert!(source.records.iter().all(|r| r.colors.len() == 5));
    }

    #[test]
    fn api_page_is_chunked_into_palettes() {
        let source = ColorsApiSource::new("http://localhost:3000/", 7, 3).unwrap();
        let body = ColorsPage {
            page: 1,
            limit: 7,
            total_items: 20,
            total_pages: 3,
            colors: vec![
                "#69d2e7", "#a7dbd8", "#e0e4cc", "#f38630", "#fa6900", "#fe4365", "#fc9d9a",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        };

        let page = source.to_page(body, Cursor::first()).unwrap();
        let sizes: Vec<usize> = page.items.iter().map(|r| r.colors.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert!(page.has_more);
        assert_eq!(source.base_url, "http://localhost:3000");
    }

    #[test]
    fn api_page_rejects_bad_colors() {
        let source = ColorsApiSource::new("http://localhost:3000", 2, 2).unwrap();
        let body = ColorsPage {
            page: 3,
            limit: 2,
            total_items: 6,
            total_pages: 3,
            colors: vec!["#ffffff".into(), "teal".into()],
        };

        match source.to_page(body, Cursor::first()) {
            Err(GalleryError::InvalidColor { value, .. }) => assert_eq!(value, "teal"),
            other => panic!("expected invalid color, got {other:?}"),
        }
    }

    #[test]
    fn last_api_page_has_no_more() {
        let source = ColorsApiSource::new("http://localhost:3000", 2, 2).unwrap();
        let body = ColorsPage {
            page: 3,
            limit: 2,
            total_items: 6,
            total_pages: 3,
            colors: vec!["#ffffff".into(), "#000000".into()],
        };
        assert!(!source.to_page(body, Cursor::first()).unwrap().has_more);
    }
}
