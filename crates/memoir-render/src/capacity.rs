//! Per-layout photo capacity and the truncation applied before dispatch.

use memoir_core::{LayoutKind, Photo};
use serde::Serialize;

/// Maximum number of photos a layout arranges.
pub const fn capacity(kind: LayoutKind) -> usize {
    match kind {
        LayoutKind::Single => 1,
        LayoutKind::Grid => 9,
        LayoutKind::Collage => 4,
        LayoutKind::Cover => 1,
        LayoutKind::Magazine => 4,
        LayoutKind::Journal => 2,
    }
}

/// Photos beyond a layout's capacity. They stay on the page, they are just not drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowNotice {
    pub capacity: usize,
    pub total: usize,
    pub hidden: usize,
    pub hidden_photo_ids: Vec<String>,
}

impl OverflowNotice {
    pub fn is_empty(&self) -> bool {
        self.hidden == 0
    }
}

/// The stable prefix of a page's photos that a layout will draw.
#[derive(Debug, Clone, Copy)]
pub struct PhotoSelection<'a> {
    pub shown: &'a [Photo],
    pub total: usize,
    pub capacity: usize,
}

impl PhotoSelection<'_> {
    pub fn overflow_count(&self) -> usize {
        self.total - self.shown.len()
    }

    pub fn overflow(&self, all: &[Photo]) -> OverflowNotice {
        let hidden_photo_ids = all
            .iter()
            .skip(self.shown.len())
            .map(|p| p.id.clone())
            .collect();
        OverflowNotice {
            capacity: self.capacity,
            total: self.total,
            hidden: self.overflow_count(),
            hidden_photo_ids,
        }
    }
}

pub fn select_photos(kind: LayoutKind, photos: &[Photo]) -> PhotoSelection<'_> {
    let cap = capacity(kind);
    PhotoSelection {
        shown: &photos[..photos.len().min(cap)],
        total: photos.len(),
        capacity: cap,
    }
}
