use memoir_core::{LayoutKind, Theme};
use serde::{Deserialize, Serialize};

use crate::capacity::OverflowNotice;
use crate::text::TextStyle;
use crate::units::PageSize;

/// Axis-aligned box in page millimeters (origin at the top-left trim corner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrinks the box by `d` on every side. Never produces a negative size.
    pub fn inset(&self, d: f64) -> Rect {
        Rect {
            x: self.x + d,
            y: self.y + d,
            width: (self.width - 2.0 * d).max(0.0),
            height: (self.height - 2.0 * d).max(0.0),
        }
    }

    /// Sub-box addressed in percentages of this box.
    pub fn percent(&self, top: f64, left: f64, width: f64, height: f64) -> Rect {
        Rect {
            x: self.x + self.width * left / 100.0,
            y: self.y + self.height * top / 100.0,
            width: self.width * width / 100.0,
            height: self.height * height / 100.0,
        }
    }

    /// Splits horizontally into columns proportional to `weights`, separated by `gap`.
    pub fn split_columns(&self, weights: &[f64], gap: f64) -> Vec<Rect> {
        let total: f64 = weights.iter().sum();
        let free = (self.width - gap * weights.len().saturating_sub(1) as f64).max(0.0);
        let mut x = self.x;
        weights
            .iter()
            .map(|w| {
                let width = if total > 0.0 { free * w / total } else { 0.0 };
                let r = Rect::new(x, self.y, width, self.height);
                x += width + gap;
                r
            })
            .collect()
    }

    /// Splits vertically into rows proportional to `weights`, separated by `gap`.
    pub fn split_rows(&self, weights: &[f64], gap: f64) -> Vec<Rect> {
        let total: f64 = weights.iter().sum();
        let free = (self.height - gap * weights.len().saturating_sub(1) as f64).max(0.0);
        let mut y = self.y;
        weights
            .iter()
            .map(|w| {
                let height = if total > 0.0 { free * w / total } else { 0.0 };
                let r = Rect::new(self.x, y, self.width, height);
                y += height + gap;
                r
            })
            .collect()
    }
}

/// A placed photo: `rect` is the outer box including the white mat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFrame {
    pub photo_id: String,
    pub url: String,
    pub alt: String,
    pub rect: Rect,
    pub mat_mm: f64,
    pub rotation_deg: f64,
    pub z_index: i32,
    /// One-based position badge drawn in the corner (uniform grid only).
    pub badge: Option<usize>,
}

impl PhotoFrame {
    /// The image area inside the mat.
    pub fn image_rect(&self) -> Rect {
        self.rect.inset(self.mat_mm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    Title,
    Body,
    Date,
    Caption,
    Numeral,
    Label,
    Placeholder,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Start,
    Middle,
    End,
}

/// Dark text on paper, or light text over a photo / dark block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Ink,
    Light,
    Accent,
    Muted,
}

/// A block of already-wrapped text. `y` is the top of the first line box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub role: TextRole,
    pub lines: Vec<String>,
    pub clamped: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub align: TextAlign,
    pub style: TextStyle,
    pub tone: Tone,
    pub opacity: f64,
    pub rotation_deg: f64,
    pub italic: bool,
}

impl TextBlock {
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.style.line_height_mm()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub rect: Rect,
    pub label: TextBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    /// Solid bar (accent rules, borders).
    Bar,
    /// Ellipse inscribed in the rect.
    Blob,
    /// Top-to-bottom darkening gradient over a photo.
    Scrim,
    /// Solid dark panel behind light text.
    Panel,
    /// Pill-shaped warning badge.
    Pill,
    /// Translucent tape strip.
    Tape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeFill {
    Accent,
    Ink,
    Border,
    Muted,
    Warning,
    TapeBlue,
    TapeYellow,
    MarginRed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub kind: ShapeKind,
    pub fill: ShapeFill,
    pub rect: Rect,
    pub opacity: f64,
    pub rotation_deg: f64,
}

impl Shape {
    pub fn new(kind: ShapeKind, fill: ShapeFill, rect: Rect) -> Self {
        Self {
            kind,
            fill,
            rect,
            opacity: 1.0,
            rotation_deg: 0.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn rotated(mut self, deg: f64) -> Self {
        self.rotation_deg = deg;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowResWarning {
    pub badge: Shape,
    pub label: TextBlock,
    pub width_px: Option<u32>,
    pub height_px: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleLayout {
    pub photo: Option<PhotoFrame>,
    pub scrim: Option<Shape>,
    pub placeholder: Option<Placeholder>,
    pub low_res_warning: Option<LowResWarning>,
    pub title: TextBlock,
    pub accent_rule: Shape,
    pub body: Option<TextBlock>,
    pub day: TextBlock,
    pub month: TextBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum GridMode {
    Empty,
    /// Hand-tuned split panes for 1–4 photos.
    Refined { count: usize },
    /// Uniform matrix for 5–9 photos.
    Uniform { columns: usize, rows: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    pub mode: GridMode,
    pub title: TextBlock,
    pub date: TextBlock,
    pub header_rule: Shape,
    pub mode_note: Option<TextBlock>,
    pub photo_area: Rect,
    pub photos: Vec<PhotoFrame>,
    pub placeholder: Option<Placeholder>,
    pub footer_rule: Option<Shape>,
    pub body: Option<TextBlock>,
}

/// One hand-authored collage slot, in percentages of the photo area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollageSlot {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_deg: f64,
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollageLayout {
    pub preset_index: usize,
    pub accent_blob: Shape,
    pub title: TextBlock,
    pub accent_rule: Shape,
    pub date: TextBlock,
    pub photo_area: Rect,
    pub photos: Vec<PhotoFrame>,
    pub placeholder: Option<Placeholder>,
    pub quote: Option<TextBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLayout {
    pub index_label: String,
    pub corner_shape: Shape,
    pub numeral: TextBlock,
    pub title: TextBlock,
    pub accent_rule: Shape,
    pub date: TextBlock,
    pub excerpt_border: Shape,
    pub excerpt: TextBlock,
    pub excerpt_is_fallback: bool,
    pub photo: Option<PhotoFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMark {
    pub rect: Rect,
    pub rule: Shape,
    pub label: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagazineLayout {
    pub mirrored: bool,
    pub masthead: TextBlock,
    pub date: TextBlock,
    pub masthead_rule: Shape,
    pub main_column: Rect,
    pub side_column: Rect,
    pub background_word: TextBlock,
    pub main_photo: Option<PhotoFrame>,
    pub placeholder: Option<Placeholder>,
    pub caption_panel: Shape,
    pub caption: TextBlock,
    pub caption_is_fallback: bool,
    pub side_photos: Vec<PhotoFrame>,
    pub volume: Option<VolumeMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapeStrip {
    pub shape: Shape,
    /// Offset from the right edge of the photo column, in percent of its width.
    pub right_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLayout {
    pub grid_step_mm: f64,
    pub badge: Shape,
    pub badge_letter: TextBlock,
    pub title: TextBlock,
    pub date: TextBlock,
    pub header_rule: Shape,
    pub text_column: Rect,
    pub margin_line: Shape,
    pub body: TextBlock,
    pub body_is_fallback: bool,
    pub photo_column: Rect,
    pub photos: Vec<PhotoFrame>,
    pub tapes: [TapeStrip; 2],
}

/// The arrangement produced by one layout renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PageLayout {
    Single(SingleLayout),
    Grid(GridLayout),
    Collage(CollageLayout),
    Cover(CoverLayout),
    Magazine(MagazineLayout),
    Journal(JournalLayout),
}

impl PageLayout {
    pub fn kind(&self) -> LayoutKind {
        match self {
            PageLayout::Single(_) => LayoutKind::Single,
            PageLayout::Grid(_) => LayoutKind::Grid,
            PageLayout::Collage(_) => LayoutKind::Collage,
            PageLayout::Cover(_) => LayoutKind::Cover,
            PageLayout::Magazine(_) => LayoutKind::Magazine,
            PageLayout::Journal(_) => LayoutKind::Journal,
        }
    }

    /// Every drawn photo frame, in slot order.
    pub fn photo_frames(&self) -> Vec<&PhotoFrame> {
        match self {
            PageLayout::Single(l) => l.photo.iter().collect(),
            PageLayout::Grid(l) => l.photos.iter().collect(),
            PageLayout::Collage(l) => l.photos.iter().collect(),
            PageLayout::Cover(l) => l.photo.iter().collect(),
            PageLayout::Magazine(l) => l.main_photo.iter().chain(l.side_photos.iter()).collect(),
            PageLayout::Journal(l) => l.photos.iter().collect(),
        }
    }

    pub fn photo_ids(&self) -> Vec<&str> {
        self.photo_frames()
            .into_iter()
            .map(|f| f.photo_id.as_str())
            .collect()
    }

    pub fn has_placeholder(&self) -> bool {
        match self {
            PageLayout::Single(l) => l.placeholder.is_some(),
            PageLayout::Grid(l) => l.placeholder.is_some(),
            PageLayout::Collage(l) => l.placeholder.is_some(),
            PageLayout::Cover(l) => l.photo.is_none(),
            PageLayout::Magazine(l) => l.placeholder.is_some(),
            PageLayout::Journal(l) => l.photos.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", rename_all = "camelCase")]
pub enum LayerKind {
    PaperTexture,
    Content,
    FooterId { label: String },
    SpineShadow { width_mm: f64 },
    EdgeHighlight,
    SafeZoneGuide { inset_mm: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayer {
    #[serde(flatten)]
    pub kind: LayerKind,
    pub z_index: i32,
    pub rect: Rect,
}

/// A fully composed page: physical size, display scale, decorative chrome and content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub page_id: String,
    /// The tag stored on the page, verbatim.
    pub requested_layout: String,
    pub layout_kind: LayoutKind,
    pub theme: Theme,
    pub page_size: PageSize,
    pub scale: f64,
    pub display_width_px: f64,
    pub display_height_px: f64,
    /// Layers sorted by ascending z-index.
    pub layers: Vec<PageLayer>,
    pub content: PageLayout,
    pub overflow: OverflowNotice,
}

impl RenderedPage {
    pub fn width_mm(&self) -> f64 {
        self.page_size.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.page_size.height_mm
    }

    pub fn fell_back(&self) -> bool {
        LayoutKind::from_tag(&self.requested_layout) != Some(self.layout_kind)
    }

    pub fn layer(&self, pred: impl Fn(&LayerKind) -> bool) -> Option<&PageLayer> {
        self.layers.iter().find(|l| pred(&l.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_columns_respects_weights_and_gap() {
        let r = Rect::new(0.0, 0.0, 63.0, 10.0);
        let cols = r.split_columns(&[2.0, 1.0], 3.0);
        assert_eq!(cols.len(), 2);
        assert!((cols[0].width - 40.0).abs() < 1e-9);
        assert!((cols[1].width - 20.0).abs() < 1e-9);
        assert!((cols[1].x - 43.0).abs() < 1e-9);
        assert!((cols[1].right() - 63.0).abs() < 1e-9);
    }

    #[test]
    fn split_rows_fills_height() {
        let r = Rect::new(5.0, 10.0, 20.0, 100.0);
        let rows = r.split_rows(&[1.2, 1.0], 2.0);
        assert!((rows[0].height - 98.0 * 1.2 / 2.2).abs() < 1e-9);
        assert!((rows[1].y - rows[0].bottom() - 2.0).abs() < 1e-9);
        assert!((rows[1].bottom() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn percent_and_inset() {
        let r = Rect::new(10.0, 20.0, 200.0, 100.0);
        let p = r.percent(10.0, 25.0, 50.0, 40.0);
        assert_eq!(p, Rect::new(60.0, 30.0, 100.0, 40.0));
        assert_eq!(Rect::new(0.0, 0.0, 4.0, 4.0).inset(3.0).width, 0.0);
    }
}
