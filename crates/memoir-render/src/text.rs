use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::units::pt_to_mm;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size_pt: f64,
    /// Extra tracking between characters, in em.
    pub letter_spacing_em: f64,
    pub line_height: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size_pt: 11.0,
            letter_spacing_em: 0.0,
            line_height: 1.2,
        }
    }
}

impl TextStyle {
    pub fn new(font_size_pt: f64) -> Self {
        Self {
            font_size_pt,
            ..Default::default()
        }
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_letter_spacing(mut self, em: f64) -> Self {
        self.letter_spacing_em = em;
        self
    }

    pub fn font_size_mm(&self) -> f64 {
        pt_to_mm(self.font_size_pt)
    }

    pub fn line_height_mm(&self) -> f64 {
        self.font_size_mm() * self.line_height
    }
}

/// Text extents in millimeters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent measurer: every terminal cell is `char_width_factor` em wide, so CJK
/// characters count double.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
}

impl DeterministicTextMeasurer {
    fn factor(&self) -> f64 {
        if self.char_width_factor == 0.0 {
            0.55
        } else {
            self.char_width_factor
        }
    }

    fn line_width(&self, line: &str, style: &TextStyle) -> f64 {
        let em = style.font_size_mm();
        let mut cells = 0usize;
        let mut chars = 0usize;
        for ch in line.chars() {
            cells += ch.width().unwrap_or(0);
            chars += 1;
        }
        cells as f64 * em * self.factor() + chars as f64 * em * style.letter_spacing_em
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let lines: Vec<&str> = text.split('\n').collect();
        let width = lines
            .iter()
            .map(|l| self.line_width(l, style))
            .fold(0.0, f64::max);
        TextMetrics {
            width,
            height: lines.len() as f64 * style.line_height_mm(),
            line_count: lines.len(),
        }
    }
}

/// Text broken into lines that fit a width, clamped to a maximum line count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedText {
    pub lines: Vec<String>,
    /// `true` when the line clamp dropped text (the last line then ends with an ellipsis).
    pub clamped: bool,
}

impl WrappedText {
    pub fn height_mm(&self, style: &TextStyle) -> f64 {
        self.lines.len() as f64 * style.line_height_mm()
    }
}

fn is_break_char(ch: char) -> bool {
    ch.width().unwrap_or(0) > 1
}

/// Splits a paragraph into wrap tokens: whitespace runs, single wide (CJK) characters, and
/// runs of everything else.
fn tokens(paragraph: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut prev_kind: Option<u8> = None;
    for (i, ch) in paragraph.char_indices() {
        let kind = if ch.is_whitespace() {
            0
        } else if is_break_char(ch) {
            1
        } else {
            2
        };
        let boundary = match prev_kind {
            None => false,
            Some(p) => p != kind || kind == 1,
        };
        if boundary {
            out.push(&paragraph[start..i]);
            start = i;
        }
        prev_kind = Some(kind);
    }
    if start < paragraph.len() {
        out.push(&paragraph[start..]);
    }
    out
}

fn fits(measurer: &dyn TextMeasurer, text: &str, style: &TextStyle, max_width: f64) -> bool {
    measurer.measure(text, style).width <= max_width + 1e-9
}

/// Greedy line breaking. `max_lines == 0` means unlimited.
pub fn wrap_text(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    max_width_mm: f64,
    max_lines: usize,
) -> WrappedText {
    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for token in tokens(paragraph) {
            if line.is_empty() && token.trim().is_empty() {
                continue;
            }
            let candidate = format!("{line}{token}");
            if fits(measurer, candidate.trim_end(), style, max_width_mm) {
                line = candidate;
                continue;
            }
            if !line.trim().is_empty() {
                lines.push(line.trim_end().to_string());
                line = String::new();
            }
            let token = token.trim_start();
            if fits(measurer, token, style, max_width_mm) {
                line.push_str(token);
                continue;
            }
            // A single token wider than the box: hard-break by character.
            for ch in token.chars() {
                let mut next = line.clone();
                next.push(ch);
                if !line.is_empty() && !fits(measurer, &next, style, max_width_mm) {
                    lines.push(std::mem::take(&mut line));
                    line.push(ch);
                } else {
                    line = next;
                }
            }
        }
        lines.push(line.trim_end().to_string());
    }
    while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.len() == 1 && lines[0].is_empty() {
        lines.clear();
    }

    if max_lines == 0 || lines.len() <= max_lines {
        return WrappedText {
            lines,
            clamped: false,
        };
    }

    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        loop {
            let candidate = format!("{last}\u{2026}");
            if last.is_empty() || fits(measurer, &candidate, style, max_width_mm) {
                *last = candidate;
                break;
            }
            last.pop();
        }
    }
    WrappedText {
        lines,
        clamped: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer() -> DeterministicTextMeasurer {
        DeterministicTextMeasurer::default()
    }

    #[test]
    fn wide_characters_measure_double() {
        let m = measurer();
        let style = TextStyle::new(10.0);
        let latin = m.measure("ab", &style).width;
        let cjk = m.measure("海边", &style).width;
        assert!((cjk - 2.0 * latin).abs() < 1e-9);
    }

    #[test]
    fn letter_spacing_adds_per_character() {
        let m = measurer();
        let plain = m.measure("2023", &TextStyle::new(10.0)).width;
        let tracked = m
            .measure("2023", &TextStyle::new(10.0).with_letter_spacing(0.3))
            .width;
        assert!((tracked - plain - 4.0 * 0.3 * pt_to_mm(10.0)).abs() < 1e-9);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let m = measurer();
        let style = TextStyle::new(10.0);
        let width = m.measure("hello world", &style).width;
        let out = wrap_text(&m, "hello world again", &style, width, 0);
        assert_eq!(out.lines, vec!["hello world", "again"]);
        assert!(!out.clamped);
    }

    #[test]
    fn cjk_text_breaks_between_characters() {
        let m = measurer();
        let style = TextStyle::new(10.0);
        let width = m.measure("阳光明媚", &style).width;
        let out = wrap_text(&m, "阳光明媚的早晨", &style, width, 0);
        assert_eq!(out.lines, vec!["阳光明媚", "的早晨"]);
    }

    #[test]
    fn clamp_appends_ellipsis() {
        let m = measurer();
        let style = TextStyle::new(10.0);
        let width = m.measure("aaaa", &style).width;
        let out = wrap_text(&m, "aaaa bbbb cccc dddd", &style, width, 2);
        assert_eq!(out.lines.len(), 2);
        assert!(out.clamped);
        assert!(out.lines[1].ends_with('\u{2026}'));
        assert!(m.measure(&out.lines[1], &style).width <= width + 1e-9);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let m = measurer();
        let out = wrap_text(&m, "", &TextStyle::default(), 50.0, 3);
        assert!(out.lines.is_empty());
        assert_eq!(out.height_mm(&TextStyle::default()), 0.0);
    }

    #[test]
    fn explicit_newlines_are_kept() {
        let m = measurer();
        let out = wrap_text(&m, "one\ntwo", &TextStyle::default(), 100.0, 0);
        assert_eq!(out.lines, vec!["one", "two"]);
    }
}
