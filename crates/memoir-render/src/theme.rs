use memoir_core::Theme;
use serde::Serialize;

/// Colors and typeface used when a page is written out as SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub font_family: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

const CLASSIC: ThemePalette = ThemePalette {
    font_family: "serif",
    primary: "#1A1A1A",
    secondary: "#4A4A4A",
    accent: "#8C7851",
    background: "#FFFFFF",
    border: "#E5E5E5",
};

const MODERN: ThemePalette = ThemePalette {
    font_family: "Inter, sans-serif",
    primary: "#000000",
    secondary: "#333333",
    accent: "#3B82F6",
    background: "#F9FAFB",
    border: "#F3F4F6",
};

const WARM: ThemePalette = ThemePalette {
    font_family: "'Ma Shan Zheng', cursive",
    primary: "#5D4037",
    secondary: "#8D6E63",
    accent: "#FF7043",
    background: "#FFFBF5",
    border: "#FFE0B2",
};

const MAGAZINE: ThemePalette = ThemePalette {
    font_family: "Oswald, sans-serif",
    primary: "#D32F2F",
    secondary: "#212121",
    accent: "#FBC02D",
    background: "#FAFAFA",
    border: "#EEEEEE",
};

pub fn palette(theme: Theme) -> ThemePalette {
    match theme {
        Theme::Classic => CLASSIC,
        Theme::Modern => MODERN,
        Theme::Warm => WARM,
        Theme::Magazine => MAGAZINE,
    }
}
