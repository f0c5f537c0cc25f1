//! Book / chapter / page / photo value tree.
//!
//! These types mirror the persisted snapshot format (camelCase JSON). Every field except the
//! entity id is optional on input so snapshots written by older schema versions still load.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six page layout templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Single,
    Grid,
    Collage,
    Cover,
    Magazine,
    Journal,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 6] = [
        LayoutKind::Single,
        LayoutKind::Grid,
        LayoutKind::Collage,
        LayoutKind::Cover,
        LayoutKind::Magazine,
        LayoutKind::Journal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Single => "single",
            LayoutKind::Grid => "grid",
            LayoutKind::Collage => "collage",
            LayoutKind::Cover => "cover",
            LayoutKind::Magazine => "magazine",
            LayoutKind::Journal => "journal",
        }
    }

    /// Parses a stored layout tag. Returns `None` for tags outside the known set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "single" => Some(LayoutKind::Single),
            "grid" => Some(LayoutKind::Grid),
            "collage" => Some(LayoutKind::Collage),
            "cover" => Some(LayoutKind::Cover),
            "magazine" => Some(LayoutKind::Magazine),
            "journal" => Some(LayoutKind::Journal),
            _ => None,
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s.trim()).ok_or_else(|| format!("unknown layout kind: {s}"))
    }
}

/// Book-wide visual theme. Unknown names deserialize as [`Theme::Classic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Modern,
    Warm,
    Magazine,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Modern => "modern",
            Theme::Warm => "warm",
            Theme::Magazine => "magazine",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "classic" => Ok(Theme::Classic),
            "modern" => Ok(Theme::Modern),
            "warm" => Ok(Theme::Warm),
            "magazine" => Ok(Theme::Magazine),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_default())
    }
}

/// How a photo's `url` resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource {
    /// `blob:` object URL, only valid inside the session that created it.
    ObjectUrl,
    /// Inline `data:` URI.
    DataUri,
    /// `http(s)://` or any other absolute URL.
    Remote,
    /// Relative path or otherwise unparseable reference.
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Original pixel width, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Set while the upload is still held in memory. Never persisted.
    #[serde(skip)]
    pub pending_upload: bool,
}

impl Photo {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            caption: None,
            width: None,
            height: None,
            pending_upload: false,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn source(&self) -> PhotoSource {
        match url::Url::parse(self.url.trim()) {
            Ok(u) => match u.scheme() {
                "blob" => PhotoSource::ObjectUrl,
                "data" => PhotoSource::DataUri,
                _ => PhotoSource::Remote,
            },
            Err(_) => PhotoSource::Relative,
        }
    }
}

fn default_layout_tag() -> String {
    LayoutKind::Single.as_str().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Stored layout tag. Kept verbatim: unknown tags are resolved by the renderer.
    #[serde(default = "default_layout_tag")]
    pub layout: String,
}

impl Page {
    pub fn new(id: impl Into<String>, layout: LayoutKind) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
            photos: Vec::new(),
            layout: layout.as_str().to_string(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_photos(mut self, photos: Vec<Photo>) -> Self {
        self.photos = photos;
        self
    }

    pub fn layout_kind(&self) -> Option<LayoutKind> {
        LayoutKind::from_tag(&self.layout)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// ISO-8601 date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Chapter {
    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }
}

pub const DEFAULT_PAGE_SIZE: &str = "A4";

fn default_page_size() -> String {
    DEFAULT_PAGE_SIZE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub theme: Theme,
    /// Page size key (`A4`, `A5`, `16K`, `B5`). Unknown keys are resolved by the renderer.
    #[serde(default = "default_page_size")]
    pub page_size: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    pub fn page_count(&self) -> usize {
        self.chapters.iter().map(|c| c.pages.len()).sum()
    }

    /// Iterates `(chapter_index, chapter, page)` in reading order.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &Chapter, &Page)> {
        self.chapters
            .iter()
            .enumerate()
            .flat_map(|(idx, ch)| ch.pages.iter().map(move |p| (idx, ch, p)))
    }
}
