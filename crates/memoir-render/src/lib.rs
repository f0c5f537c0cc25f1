#![forbid(unsafe_code)]
//! Headless page layout for memoir books.
//!
//! Pages are laid out in physical millimeters by one of six layout renderers, wrapped in
//! preview chrome by the [`PageRenderer`], and optionally written out as SVG.

pub mod capacity;
pub mod hash;
pub mod layouts;
pub mod model;
pub mod page;
pub mod registry;
pub mod scale;
pub mod settings;
pub mod svg;
pub mod text;
pub mod theme;
pub mod units;

pub use capacity::{OverflowNotice, capacity, select_photos};
pub use hash::{preset_index, seeded_unit, string_hash};
pub use layouts::{ChapterInfo, LayoutInput, LayoutRenderFn};
pub use model::{PageLayout, Rect, RenderedPage};
pub use page::{PageRenderer, PageRequest, ViewOptions};
pub use registry::LayoutRegistry;
pub use scale::{ScaleController, ScaleMode, fit_scale};
pub use settings::RenderSettings;
pub use units::{PAGE_SIZES, PageSize, page_size, page_size_or_default};

use memoir_core::Book;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("chapter not found: {chapter_id}")]
    ChapterNotFound { chapter_id: String },
    #[error("page {page_id} not found in chapter {chapter_id}")]
    PageNotFound {
        chapter_id: String,
        page_id: String,
    },
    #[error("book snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Decodes a single book snapshot (the JSON the editor persists per book).
pub fn book_from_json(text: &str) -> Result<Book> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests;
