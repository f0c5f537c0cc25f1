//! Typed render settings resolved from a [`MemoirConfig`].
//!
//! Recognized config paths (all optional):
//!
//! - `labels.noPhotos`, `labels.collageEmpty`, `labels.coverFallback`,
//!   `labels.magazineFallback`, `labels.journalFallback`, `labels.lowResolution`
//! - `labels.photoCount` (`{n}` is replaced with the photo count)
//! - `labels.masthead`, `labels.backgroundWord`, `labels.journalBadge`
//! - `labels.monthSuffix`: when set, months render as `<number><suffix>` instead of an
//!   abbreviated English name
//! - `render.lowResolutionThresholdPx`, `render.previewPaddingPx`
//! - `render.showSafeZone`, `render.showTexture`, `render.svgId`

use chrono::Month;
use memoir_core::MemoirConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub no_photos: String,
    pub collage_empty: String,
    pub cover_fallback: String,
    pub magazine_fallback: String,
    pub journal_fallback: String,
    pub low_resolution: String,
    pub photo_count: String,
    pub masthead: String,
    pub background_word: String,
    pub journal_badge: String,
    pub month_suffix: Option<String>,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            no_photos: "No photos yet".to_string(),
            collage_empty: "Add photos to start composing".to_string(),
            cover_fallback: "Every memory begins with a single page.".to_string(),
            magazine_fallback: "The moments worth keeping.".to_string(),
            journal_fallback: "Write down what today felt like...".to_string(),
            low_resolution: "Low resolution".to_string(),
            photo_count: "{n} photos".to_string(),
            masthead: "MEMORIES".to_string(),
            background_word: "LIFE".to_string(),
            journal_badge: "D".to_string(),
            month_suffix: None,
        }
    }
}

impl Labels {
    pub fn photo_count(&self, n: usize) -> String {
        self.photo_count.replace("{n}", &n.to_string())
    }

    /// Month label for a 1-based month number; out-of-range values fall back to January.
    pub fn month(&self, month: u32) -> String {
        let month = if (1..=12).contains(&month) { month } else { 1 };
        if let Some(suffix) = &self.month_suffix {
            return format!("{month}{suffix}");
        }
        let name = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("January", |m| m.name());
        name.chars().take(3).collect::<String>().to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub labels: Labels,
    /// Photos whose stored width or height is below this get a warning badge.
    pub low_resolution_threshold_px: u32,
    /// Container padding subtracted before fitting a page in auto-scale mode.
    pub preview_padding_px: f64,
    pub show_safe_zone: bool,
    pub show_texture: bool,
    /// Base id for SVG elements; sanitized before use.
    pub svg_id: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            low_resolution_threshold_px: 1200,
            preview_padding_px: 100.0,
            show_safe_zone: true,
            show_texture: true,
            svg_id: "memoir".to_string(),
        }
    }
}

impl RenderSettings {
    pub fn from_config(config: &MemoirConfig) -> Self {
        let mut out = Self::default();
        let labels = &mut out.labels;
        let text = |path: &str, slot: &mut String| {
            if let Some(v) = config.get_str(path) {
                *slot = v.to_string();
            }
        };
        text("labels.noPhotos", &mut labels.no_photos);
        text("labels.collageEmpty", &mut labels.collage_empty);
        text("labels.coverFallback", &mut labels.cover_fallback);
        text("labels.magazineFallback", &mut labels.magazine_fallback);
        text("labels.journalFallback", &mut labels.journal_fallback);
        text("labels.lowResolution", &mut labels.low_resolution);
        text("labels.photoCount", &mut labels.photo_count);
        text("labels.masthead", &mut labels.masthead);
        text("labels.backgroundWord", &mut labels.background_word);
        text("labels.journalBadge", &mut labels.journal_badge);
        if let Some(suffix) = config.get_str("labels.monthSuffix") {
            labels.month_suffix = Some(suffix.to_string());
        }

        if let Some(v) = config.get_f64("render.lowResolutionThresholdPx") {
            if v.is_finite() && v >= 0.0 {
                out.low_resolution_threshold_px = v as u32;
            }
        }
        if let Some(v) = config.get_f64("render.previewPaddingPx") {
            if v.is_finite() && v >= 0.0 {
                out.preview_padding_px = v;
            }
        }
        if let Some(v) = config.get_bool("render.showSafeZone") {
            out.show_safe_zone = v;
        }
        if let Some(v) = config.get_bool("render.showTexture") {
            out.show_texture = v;
        }
        if let Some(v) = config.get_str("render.svgId") {
            out.svg_id = v.to_string();
        }
        out
    }
}
