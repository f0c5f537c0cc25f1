//! Physical page sizes and print constants.
//!
//! All page geometry is expressed in millimeters; pixels only appear when a page is scaled
//! for on-screen preview.

use serde::Serialize;

/// CSS reference pixels per millimeter (96 DPI).
pub const MM_TO_PX: f64 = 3.7795;

/// Millimeters per typographic point (1pt = 1/72 inch).
pub const PT_TO_MM: f64 = 25.4 / 72.0;

/// Inset of the dashed safe-zone guide from the trim edge.
pub const SAFE_ZONE_MM: f64 = 8.0;

/// Bleed allowance cut off at print time.
pub const BLEED_MM: f64 = 3.0;

/// Target print resolution.
pub const PRINT_DPI: u32 = 300;

#[inline]
pub fn mm_to_px(mm: f64) -> f64 {
    mm * MM_TO_PX
}

#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * PT_TO_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    pub key: &'static str,
    pub display_name: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub fn width_px(&self) -> f64 {
        mm_to_px(self.width_mm)
    }

    pub fn height_px(&self) -> f64 {
        mm_to_px(self.height_mm)
    }
}

pub const A4: PageSize = PageSize {
    key: "A4",
    display_name: "A4 Standard",
    width_mm: 210.0,
    height_mm: 297.0,
};

pub const A5: PageSize = PageSize {
    key: "A5",
    display_name: "A5 Notebook",
    width_mm: 148.0,
    height_mm: 210.0,
};

pub const K16: PageSize = PageSize {
    key: "16K",
    display_name: "16K Magazine",
    width_mm: 184.0,
    height_mm: 260.0,
};

pub const B5: PageSize = PageSize {
    key: "B5",
    display_name: "B5 Compact",
    width_mm: 176.0,
    height_mm: 250.0,
};

pub const PAGE_SIZES: [PageSize; 4] = [A4, A5, K16, B5];

pub fn page_size(key: &str) -> Option<PageSize> {
    PAGE_SIZES.iter().copied().find(|s| s.key == key)
}

/// Resolves a stored page-size key, falling back to A4.
pub fn page_size_or_default(key: &str) -> PageSize {
    match page_size(key) {
        Some(size) => size,
        None => {
            tracing::debug!(key, "unknown page size; using A4");
            A4
        }
    }
}
