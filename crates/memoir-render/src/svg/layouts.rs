use std::fmt::Write as _;

use super::util::fmt;
use super::{Ctx, write_photo, write_placeholder, write_shape, write_text};
use crate::model::{
    CollageLayout, CoverLayout, GridLayout, JournalLayout, MagazineLayout, PageLayout, PhotoFrame,
    SingleLayout,
};

pub(super) fn write_layout(
    out: &mut String,
    ctx: &Ctx<'_>,
    layout: &PageLayout,
    width_mm: f64,
    height_mm: f64,
) {
    let _ = write!(
        out,
        r#"<g class="memoir-layout" data-kind="{}">"#,
        layout.kind().as_str()
    );
    match layout {
        PageLayout::Single(l) => write_single(out, ctx, l),
        PageLayout::Grid(l) => write_grid(out, ctx, l),
        PageLayout::Collage(l) => write_collage(out, ctx, l),
        PageLayout::Cover(l) => write_cover(out, ctx, l),
        PageLayout::Magazine(l) => write_magazine(out, ctx, l),
        PageLayout::Journal(l) => write_journal(out, ctx, l, width_mm, height_mm),
    }
    out.push_str("</g>");
}

/// Paints photos bottom-up by z-index; ties keep slot order.
fn write_photos_by_z(out: &mut String, ctx: &Ctx<'_>, photos: &[PhotoFrame]) {
    let mut ordered: Vec<&PhotoFrame> = photos.iter().collect();
    ordered.sort_by_key(|p| p.z_index);
    for photo in ordered {
        write_photo(out, ctx, photo);
    }
}

fn write_single(out: &mut String, ctx: &Ctx<'_>, l: &SingleLayout) {
    if let Some(photo) = &l.photo {
        write_photo(out, ctx, photo);
    }
    if let Some(placeholder) = &l.placeholder {
        write_placeholder(out, ctx, placeholder);
    }
    if let Some(scrim) = &l.scrim {
        write_shape(out, ctx, scrim);
    }
    if let Some(warning) = &l.low_res_warning {
        write_shape(out, ctx, &warning.badge);
        write_text(out, ctx, &warning.label);
    }
    write_text(out, ctx, &l.title);
    write_shape(out, ctx, &l.accent_rule);
    if let Some(body) = &l.body {
        write_text(out, ctx, body);
    }
    write_text(out, ctx, &l.day);
    write_text(out, ctx, &l.month);
}

fn write_grid(out: &mut String, ctx: &Ctx<'_>, l: &GridLayout) {
    write_text(out, ctx, &l.title);
    write_text(out, ctx, &l.date);
    if let Some(note) = &l.mode_note {
        write_text(out, ctx, note);
    }
    write_shape(out, ctx, &l.header_rule);
    for photo in &l.photos {
        write_photo(out, ctx, photo);
    }
    if let Some(placeholder) = &l.placeholder {
        write_placeholder(out, ctx, placeholder);
    }
    if let Some(rule) = &l.footer_rule {
        write_shape(out, ctx, rule);
    }
    if let Some(body) = &l.body {
        write_text(out, ctx, body);
    }
}

fn write_collage(out: &mut String, ctx: &Ctx<'_>, l: &CollageLayout) {
    write_shape(out, ctx, &l.accent_blob);
    write_text(out, ctx, &l.title);
    write_shape(out, ctx, &l.accent_rule);
    write_text(out, ctx, &l.date);
    let _ = write!(
        out,
        r#"<g class="memoir-collage" data-preset="{}">"#,
        l.preset_index
    );
    write_photos_by_z(out, ctx, &l.photos);
    out.push_str("</g>");
    if let Some(placeholder) = &l.placeholder {
        write_placeholder(out, ctx, placeholder);
    }
    if let Some(quote) = &l.quote {
        write_text(out, ctx, quote);
    }
}

fn write_cover(out: &mut String, ctx: &Ctx<'_>, l: &CoverLayout) {
    write_text(out, ctx, &l.numeral);
    write_shape(out, ctx, &l.corner_shape);
    if let Some(photo) = &l.photo {
        write_photo(out, ctx, photo);
    }
    write_text(out, ctx, &l.title);
    write_shape(out, ctx, &l.accent_rule);
    write_text(out, ctx, &l.date);
    write_shape(out, ctx, &l.excerpt_border);
    write_text(out, ctx, &l.excerpt);
}

fn write_magazine(out: &mut String, ctx: &Ctx<'_>, l: &MagazineLayout) {
    write_text(out, ctx, &l.background_word);
    write_text(out, ctx, &l.masthead);
    write_text(out, ctx, &l.date);
    write_shape(out, ctx, &l.masthead_rule);
    if let Some(photo) = &l.main_photo {
        write_photo(out, ctx, photo);
    }
    if let Some(placeholder) = &l.placeholder {
        write_placeholder(out, ctx, placeholder);
    }
    write_shape(out, ctx, &l.caption_panel);
    write_text(out, ctx, &l.caption);
    for photo in &l.side_photos {
        write_photo(out, ctx, photo);
    }
    if let Some(volume) = &l.volume {
        write_shape(out, ctx, &volume.rule);
        write_text(out, ctx, &volume.label);
    }
}

fn write_journal(out: &mut String, ctx: &Ctx<'_>, l: &JournalLayout, width: f64, height: f64) {
    let _ = write!(
        out,
        r#"<rect class="memoir-grid-paper" x="0" y="0" width="{w}" height="{h}" fill="url(#{id}-grid)" opacity="0.6"/>"#,
        w = fmt(width),
        h = fmt(height),
        id = ctx.id,
    );
    write_shape(out, ctx, &l.badge);
    write_text(out, ctx, &l.badge_letter);
    write_text(out, ctx, &l.title);
    write_text(out, ctx, &l.date);
    write_shape(out, ctx, &l.header_rule);
    write_shape(out, ctx, &l.margin_line);
    write_text(out, ctx, &l.body);
    write_photos_by_z(out, ctx, &l.photos);
    for tape in &l.tapes {
        write_shape(out, ctx, &tape.shape);
    }
}
