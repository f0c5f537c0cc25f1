//! The six page layouts. Each one is a pure function from a [`LayoutInput`] to a
//! [`PageLayout`]; they never fail and always produce something drawable.

pub mod collage;
pub mod cover;
pub mod grid;
pub mod journal;
pub mod magazine;
pub mod single;

use memoir_core::Photo;
use serde::Serialize;

use crate::model::{PageLayout, PhotoFrame, Placeholder, Rect, TextAlign, TextBlock, TextRole, Tone};
use crate::settings::RenderSettings;
use crate::text::{TextMeasurer, TextStyle, wrap_text};

pub type LayoutRenderFn = fn(&LayoutInput<'_>) -> PageLayout;

/// Chapter context a page is rendered in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterInfo {
    pub title: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`); malformed values degrade to defaults.
    pub date: String,
    /// Zero-based position of the chapter in its book.
    pub index: usize,
}

impl ChapterInfo {
    pub fn new(title: impl Into<String>, date: impl Into<String>, index: usize) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            index,
        }
    }

    /// Two-digit, one-based chapter number (`"01"`, `"02"`, ...).
    pub fn number_label(&self) -> String {
        format!("{:02}", self.index + 1)
    }

    /// Day of month as written in the date (third `-` segment), `"01"` when absent.
    pub fn day_label(&self) -> String {
        self.date
            .split('-')
            .nth(2)
            .map(|d| d.get(..2).unwrap_or(d))
            .filter(|d| !d.is_empty())
            .unwrap_or("01")
            .to_string()
    }

    /// One-based month number parsed from the date, `1` when absent or malformed.
    pub fn month(&self) -> u32 {
        self.date
            .split('-')
            .nth(1)
            .and_then(|m| m.parse::<u32>().ok())
            .filter(|m| (1..=12).contains(m))
            .unwrap_or(1)
    }
}

/// Everything a layout renderer sees. `photos` is already truncated to the layout's
/// capacity; `total_photos` is the page's full count.
pub struct LayoutInput<'a> {
    pub page_id: &'a str,
    pub content: &'a str,
    pub photos: &'a [Photo],
    pub total_photos: usize,
    pub chapter: &'a ChapterInfo,
    /// The trim box of the page, in millimeters.
    pub frame: Rect,
    pub measurer: &'a dyn TextMeasurer,
    pub settings: &'a RenderSettings,
}

impl LayoutInput<'_> {
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Wraps `text` into `at.width`, placing the block at `at.x`/`at.y`.
    pub(crate) fn text(
        &self,
        role: TextRole,
        text: &str,
        style: TextStyle,
        at: Rect,
        max_lines: usize,
    ) -> TextBlock {
        let wrapped = wrap_text(self.measurer, text, &style, at.width, max_lines);
        TextBlock {
            role,
            lines: wrapped.lines,
            clamped: wrapped.clamped,
            x: at.x,
            y: at.y,
            width: at.width,
            align: TextAlign::Start,
            style,
            tone: Tone::Ink,
            opacity: 1.0,
            rotation_deg: 0.0,
            italic: false,
        }
    }

    /// Like [`LayoutInput::text`] but the block's bottom edge sits on `at.bottom()`.
    pub(crate) fn text_above(
        &self,
        role: TextRole,
        text: &str,
        style: TextStyle,
        at: Rect,
        max_lines: usize,
    ) -> TextBlock {
        let mut block = self.text(role, text, style, at, max_lines);
        block.y = at.bottom() - block.height();
        block
    }

    pub(crate) fn placeholder(&self, rect: Rect, label: &str) -> Placeholder {
        let style = TextStyle::new(10.0);
        let mut text = self.text(
            TextRole::Placeholder,
            label,
            style,
            Rect::new(rect.x + 4.0, 0.0, (rect.width - 8.0).max(0.0), 0.0),
            2,
        );
        text.y = rect.y + (rect.height - text.height()) / 2.0;
        Placeholder {
            rect,
            label: text.aligned(TextAlign::Middle).toned(Tone::Muted),
        }
    }
}

impl TextBlock {
    pub(crate) fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn toned(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub(crate) fn faded(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub(crate) fn rotated(mut self, deg: f64) -> Self {
        self.rotation_deg = deg;
        self
    }

    pub(crate) fn italicized(mut self) -> Self {
        self.italic = true;
        self
    }

    pub(crate) fn bottom(&self) -> f64 {
        self.y + self.height()
    }
}

pub(crate) fn photo_frame(
    photo: &Photo,
    rect: Rect,
    mat_mm: f64,
    rotation_deg: f64,
    z_index: i32,
) -> PhotoFrame {
    PhotoFrame {
        photo_id: photo.id.clone(),
        url: photo.url.clone(),
        alt: photo.caption.clone().unwrap_or_else(|| photo.id.clone()),
        rect,
        mat_mm,
        rotation_deg,
        z_index,
        badge: None,
    }
}
