//! Deterministic SVG output for rendered pages.
//!
//! The viewBox is the page trim box in millimeters; the `width`/`height` attributes carry the
//! scaled display size in pixels. Photos are referenced by URL, never embedded.

mod layouts;
mod util;

use std::fmt::Write as _;

use memoir_core::Theme;

use crate::model::{
    LayerKind, PageLayer, PhotoFrame, Placeholder, RenderedPage, Shape, ShapeFill, ShapeKind,
    TextAlign, TextBlock, TextRole, Tone,
};
use crate::page::EDGE_BORDER_MM;
use crate::theme::{ThemePalette, palette};

pub use util::sanitize_svg_id;
use util::{escape_xml, fmt};

const BOOK_PAGE_GAP_MM: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root element id, also used to namespace gradient and pattern ids.
    pub svg_id: String,
    /// Draw preview chrome (paper texture, spine shadow, edge highlight, safe-zone guide).
    pub include_chrome: bool,
    /// Draw the footer page id.
    pub include_footer_id: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            svg_id: "memoir".to_string(),
            include_chrome: true,
            include_footer_id: true,
        }
    }
}

/// Per-document drawing context.
struct Ctx<'a> {
    id: &'a str,
    palette: ThemePalette,
}

impl Ctx<'_> {
    fn tone(&self, tone: Tone) -> &'static str {
        match tone {
            Tone::Ink => self.palette.primary,
            Tone::Light => "#FFFFFF",
            Tone::Accent => self.palette.accent,
            Tone::Muted => self.palette.secondary,
        }
    }

    fn fill(&self, fill: ShapeFill) -> &'static str {
        match fill {
            ShapeFill::Accent => self.palette.accent,
            ShapeFill::Ink => "#111111",
            ShapeFill::Border => self.palette.border,
            ShapeFill::Muted => self.palette.secondary,
            ShapeFill::Warning => "#D97706",
            ShapeFill::TapeBlue => "#BFDBFE",
            ShapeFill::TapeYellow => "#FEF08A",
            ShapeFill::MarginRed => "#EF4444",
        }
    }
}

fn role_class(role: TextRole) -> &'static str {
    match role {
        TextRole::Title => "memoir-title",
        TextRole::Body => "memoir-body",
        TextRole::Date => "memoir-date",
        TextRole::Caption => "memoir-caption",
        TextRole::Numeral => "memoir-numeral",
        TextRole::Label => "memoir-label",
        TextRole::Placeholder => "memoir-placeholder",
        TextRole::Warning => "memoir-warning",
    }
}

fn rotate_attr(deg: f64, cx: f64, cy: f64) -> String {
    if deg == 0.0 {
        String::new()
    } else {
        format!(
            r#" transform="rotate({} {} {})""#,
            fmt(deg),
            fmt(cx),
            fmt(cy)
        )
    }
}

fn opacity_attr(opacity: f64) -> String {
    if opacity >= 1.0 {
        String::new()
    } else {
        format!(r#" opacity="{}""#, fmt(opacity))
    }
}

fn write_text(out: &mut String, ctx: &Ctx<'_>, block: &TextBlock) {
    if block.is_empty() {
        return;
    }
    let (anchor, x) = match block.align {
        TextAlign::Start => ("start", block.x),
        TextAlign::Middle => ("middle", block.x + block.width / 2.0),
        TextAlign::End => ("end", block.x + block.width),
    };
    let size = block.style.font_size_mm();
    let line_h = block.style.line_height_mm();
    let rotate = rotate_attr(
        block.rotation_deg,
        block.x + block.width / 2.0,
        block.y + block.height() / 2.0,
    );
    let _ = write!(
        out,
        r#"<text class="{class}" font-size="{size}" fill="{fill}" text-anchor="{anchor}""#,
        class = role_class(block.role),
        size = fmt(size),
        fill = ctx.tone(block.tone),
    );
    if block.style.letter_spacing_em != 0.0 {
        let _ = write!(
            out,
            r#" letter-spacing="{}""#,
            fmt(block.style.letter_spacing_em * size)
        );
    }
    if block.italic {
        out.push_str(r#" font-style="italic""#);
    }
    out.push_str(&opacity_attr(block.opacity));
    out.push_str(&rotate);
    out.push('>');
    // Baseline sits ~80% down the em box, centered in the line box.
    let baseline = (line_h - size) / 2.0 + size * 0.8;
    for (i, line) in block.lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{x}" y="{y}">{text}</tspan>"#,
            x = fmt(x),
            y = fmt(block.y + i as f64 * line_h + baseline),
            text = escape_xml(line),
        );
    }
    out.push_str("</text>");
}

fn write_shape(out: &mut String, ctx: &Ctx<'_>, shape: &Shape) {
    let r = shape.rect;
    let (cx, cy) = r.center();
    let rotate = rotate_attr(shape.rotation_deg, cx, cy);
    let opacity = opacity_attr(shape.opacity);
    let fill = ctx.fill(shape.fill);
    match shape.kind {
        ShapeKind::Blob => {
            let _ = write!(
                out,
                r#"<ellipse class="memoir-shape" cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" fill="{fill}"{opacity}{rotate}/>"#,
                cx = fmt(cx),
                cy = fmt(cy),
                rx = fmt(r.width / 2.0),
                ry = fmt(r.height / 2.0),
            );
        }
        ShapeKind::Scrim => {
            let _ = write!(
                out,
                r#"<rect class="memoir-scrim" x="{x}" y="{y}" width="{w}" height="{h}" fill="url(#{id}-scrim)"{opacity}{rotate}/>"#,
                x = fmt(r.x),
                y = fmt(r.y),
                w = fmt(r.width),
                h = fmt(r.height),
                id = ctx.id,
            );
        }
        ShapeKind::Pill => {
            let _ = write!(
                out,
                r#"<rect class="memoir-shape" x="{x}" y="{y}" width="{w}" height="{h}" rx="{rx}" fill="{fill}"{opacity}{rotate}/>"#,
                x = fmt(r.x),
                y = fmt(r.y),
                w = fmt(r.width),
                h = fmt(r.height),
                rx = fmt(r.height / 2.0),
            );
        }
        ShapeKind::Bar | ShapeKind::Panel | ShapeKind::Tape => {
            let class = match shape.kind {
                ShapeKind::Tape => "memoir-tape",
                ShapeKind::Panel => "memoir-panel",
                _ => "memoir-shape",
            };
            let _ = write!(
                out,
                r#"<rect class="{class}" x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"{opacity}{rotate}/>"#,
                x = fmt(r.x),
                y = fmt(r.y),
                w = fmt(r.width),
                h = fmt(r.height),
            );
        }
    }
}

fn write_photo(out: &mut String, ctx: &Ctx<'_>, photo: &PhotoFrame) {
    let r = photo.rect;
    let (cx, cy) = r.center();
    let _ = write!(
        out,
        r#"<g class="memoir-photo" data-photo-id="{id}"{rotate}>"#,
        id = escape_xml(&photo.photo_id),
        rotate = rotate_attr(photo.rotation_deg, cx, cy),
    );
    if photo.mat_mm > 0.0 {
        let _ = write!(
            out,
            r##"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="#FFFFFF" stroke="{stroke}" stroke-width="0.2"/>"##,
            x = fmt(r.x),
            y = fmt(r.y),
            w = fmt(r.width),
            h = fmt(r.height),
            stroke = ctx.palette.border,
        );
    }
    let img = photo.image_rect();
    let _ = write!(
        out,
        r#"<image href="{href}" x="{x}" y="{y}" width="{w}" height="{h}" preserveAspectRatio="xMidYMid slice"><title>{alt}</title></image>"#,
        href = escape_xml(&photo.url),
        x = fmt(img.x),
        y = fmt(img.y),
        w = fmt(img.width),
        h = fmt(img.height),
        alt = escape_xml(&photo.alt),
    );
    if let Some(n) = photo.badge {
        let size = 5.0;
        let _ = write!(
            out,
            r##"<circle class="memoir-badge" cx="{cx}" cy="{cy}" r="{r}" fill="#000000" opacity="0.6"/><text class="memoir-badge" x="{cx}" y="{ty}" font-size="2.8" fill="#FFFFFF" text-anchor="middle">{n}</text>"##,
            cx = fmt(img.x + 1.5 + size / 2.0),
            cy = fmt(img.y + 1.5 + size / 2.0),
            r = fmt(size / 2.0),
            ty = fmt(img.y + 1.5 + size / 2.0 + 1.0),
        );
    }
    out.push_str("</g>");
}

fn write_placeholder(out: &mut String, ctx: &Ctx<'_>, placeholder: &Placeholder) {
    let r = placeholder.rect;
    let _ = write!(
        out,
        r#"<g class="memoir-placeholder"><rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}" stroke="{stroke}" stroke-width="0.3" stroke-dasharray="2 1.5"/>"#,
        x = fmt(r.x),
        y = fmt(r.y),
        w = fmt(r.width),
        h = fmt(r.height),
        fill = ctx.palette.background,
        stroke = ctx.palette.border,
    );
    write_text(out, ctx, &placeholder.label);
    out.push_str("</g>");
}

fn write_defs(out: &mut String, ctx: &Ctx<'_>) {
    let _ = write!(
        out,
        r##"<defs><linearGradient id="{id}-scrim" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="#000000" stop-opacity="0"/><stop offset="1" stop-color="#000000" stop-opacity="1"/></linearGradient><linearGradient id="{id}-spine-shade" x1="0" y1="0" x2="1" y2="0"><stop offset="0" stop-color="#000000" stop-opacity="0.18"/><stop offset="1" stop-color="#000000" stop-opacity="0"/></linearGradient><pattern id="{id}-grid" width="10" height="10" patternUnits="userSpaceOnUse"><path d="M10 0H0V10" fill="none" stroke="{border}" stroke-width="0.2"/></pattern></defs>"##,
        id = ctx.id,
        border = ctx.palette.border,
    );
}

fn write_layer(
    out: &mut String,
    ctx: &Ctx<'_>,
    page: &RenderedPage,
    layer: &PageLayer,
    options: &SvgRenderOptions,
) {
    let r = layer.rect;
    match &layer.kind {
        LayerKind::PaperTexture => {
            if options.include_chrome {
                let _ = write!(
                    out,
                    r##"<rect class="memoir-texture" x="{x}" y="{y}" width="{w}" height="{h}" fill="#F5F0E6" opacity="0.35"/>"##,
                    x = fmt(r.x),
                    y = fmt(r.y),
                    w = fmt(r.width),
                    h = fmt(r.height),
                );
            }
        }
        LayerKind::Content => {
            out.push_str(r#"<g class="memoir-content">"#);
            layouts::write_layout(out, ctx, &page.content, page.width_mm(), page.height_mm());
            out.push_str("</g>");
        }
        LayerKind::FooterId { label } => {
            if options.include_footer_id {
                let _ = write!(
                    out,
                    r#"<text class="memoir-footer-id" x="{x}" y="{y}" font-size="2" fill="{fill}" text-anchor="middle" letter-spacing="0.4" opacity="0.5">{label}</text>"#,
                    x = fmt(r.x + r.width / 2.0),
                    y = fmt(r.bottom()),
                    fill = ctx.palette.secondary,
                    label = escape_xml(label),
                );
            }
        }
        LayerKind::SpineShadow { .. } => {
            if options.include_chrome {
                let _ = write!(
                    out,
                    r#"<rect class="memoir-spine" x="{x}" y="{y}" width="{w}" height="{h}" fill="url(#{id}-spine-shade)"/>"#,
                    x = fmt(r.x),
                    y = fmt(r.y),
                    w = fmt(r.width),
                    h = fmt(r.height),
                    id = ctx.id,
                );
            }
        }
        LayerKind::EdgeHighlight => {
            if options.include_chrome {
                let _ = write!(
                    out,
                    r##"<rect class="memoir-edge" x="{x}" y="{y}" width="{w}" height="{h}" fill="none" stroke="#000000" stroke-opacity="0.05" stroke-width="{sw}"/>"##,
                    x = fmt(r.x),
                    y = fmt(r.y),
                    w = fmt(r.width),
                    h = fmt(r.height),
                    sw = fmt(EDGE_BORDER_MM),
                );
            }
        }
        LayerKind::SafeZoneGuide { .. } => {
            if options.include_chrome {
                let _ = write!(
                    out,
                    r##"<rect class="memoir-safe-zone" x="{x}" y="{y}" width="{w}" height="{h}" fill="none" stroke="#3B82F6" stroke-width="0.25" stroke-dasharray="2 2" opacity="0.4"/>"##,
                    x = fmt(r.x),
                    y = fmt(r.y),
                    w = fmt(r.width),
                    h = fmt(r.height),
                );
            }
        }
    }
}

fn write_page_body(
    out: &mut String,
    ctx: &Ctx<'_>,
    page: &RenderedPage,
    options: &SvgRenderOptions,
) {
    let _ = write!(
        out,
        r#"<rect class="memoir-paper" x="0" y="0" width="{w}" height="{h}" fill="{bg}"/>"#,
        w = fmt(page.width_mm()),
        h = fmt(page.height_mm()),
        bg = ctx.palette.background,
    );
    for layer in &page.layers {
        write_layer(out, ctx, page, layer, options);
    }
}

fn font_style(palette: &ThemePalette) -> String {
    format!(
        "<style>text{{font-family:{};}}</style>",
        escape_xml(palette.font_family)
    )
}

/// Renders one page as a standalone SVG document.
pub fn render_page_svg(page: &RenderedPage, options: &SvgRenderOptions) -> String {
    let id = sanitize_svg_id(&options.svg_id);
    let ctx = Ctx {
        id: &id,
        palette: palette(page.theme),
    };

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {vw} {vh}" data-page-id="{page_id}" data-layout="{layout}" data-scale="{scale}">"#,
        w = fmt(page.display_width_px),
        h = fmt(page.display_height_px),
        vw = fmt(page.width_mm()),
        vh = fmt(page.height_mm()),
        page_id = escape_xml(&page.page_id),
        layout = page.layout_kind.as_str(),
        scale = fmt(page.scale),
    );
    out.push_str(&font_style(&ctx.palette));
    write_defs(&mut out, &ctx);
    write_page_body(&mut out, &ctx, page, options);
    out.push_str("</svg>");
    out
}

/// Renders pages side by side vertically in one document, in the given order.
///
/// The viewBox spans the widest page; each page keeps its own physical size.
pub fn render_book_svg(pages: &[RenderedPage], theme: Theme, options: &SvgRenderOptions) -> String {
    let id = sanitize_svg_id(&options.svg_id);
    let ctx = Ctx {
        id: &id,
        palette: palette(theme),
    };

    let width = pages.iter().map(|p| p.width_mm()).fold(0.0, f64::max);
    let height = pages.iter().map(|p| p.height_mm()).sum::<f64>()
        + BOOK_PAGE_GAP_MM * pages.len().saturating_sub(1) as f64;

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" data-page-count="{n}">"#,
        w = fmt(width),
        h = fmt(height),
        n = pages.len(),
    );
    out.push_str(&font_style(&ctx.palette));
    write_defs(&mut out, &ctx);

    let mut y = 0.0;
    for page in pages {
        let _ = write!(
            &mut out,
            r#"<g class="memoir-page" data-page-id="{page_id}" data-layout="{layout}" transform="translate(0 {y})">"#,
            page_id = escape_xml(&page.page_id),
            layout = page.layout_kind.as_str(),
            y = fmt(y),
        );
        write_page_body(&mut out, &ctx, page, options);
        out.push_str("</g>");
        y += page.height_mm() + BOOK_PAGE_GAP_MM;
    }
    out.push_str("</svg>");
    out
}
