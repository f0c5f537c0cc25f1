use std::fmt::Write as _;

/// Formats a coordinate for an SVG attribute: three decimals at most, no trailing zeros,
/// no `-0`, and `0` for non-finite input.
pub(super) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub(super) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    let mut v = (v * 1000.0).round() / 1000.0;
    if v == 0.0 {
        v = 0.0;
    }
    let _ = write!(out, "{v}");
}

pub(super) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(super) fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

/// Keeps `[A-Za-z0-9_-]`, replaces everything else with `-`; never returns an empty id.
pub fn sanitize_svg_id(raw: &str) -> String {
    let id: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    match id.chars().next() {
        None => "memoir".to_string(),
        Some(c) if c.is_ascii_digit() => format!("m{id}"),
        Some(_) => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_noise() {
        assert_eq!(fmt(1.0), "1");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(0.1 + 0.2), "0.3");
        assert_eq!(fmt(793.6950), "793.695");
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(-0.0004), "0");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
        assert_eq!(escape_xml("海边 'x'"), "海边 &#39;x&#39;");
    }

    #[test]
    fn sanitizes_ids() {
        assert_eq!(sanitize_svg_id("page 1/a"), "page-1-a");
        assert_eq!(sanitize_svg_id("  "), "memoir");
        assert_eq!(sanitize_svg_id("9lives"), "m9lives");
    }
}
