use super::{LayoutInput, photo_frame};
use crate::model::{CoverLayout, PageLayout, Rect, Shape, ShapeFill, ShapeKind, TextRole, Tone};
use crate::text::TextStyle;

const PADDING_MM: f64 = 15.0;
const EXCERPT_INDENT_MM: f64 = 5.0;
const PHOTO_ASPECT: f64 = 4.0 / 3.0;
const PHOTO_ROTATION_DEG: f64 = 3.0;

/// Chapter opener: oversized faded chapter number, title, date, excerpt and one tilted photo.
pub fn layout_cover(input: &LayoutInput<'_>) -> PageLayout {
    let frame = input.frame;
    let inner = frame.inset(PADDING_MM);
    let index_label = input.chapter.number_label();

    let corner_shape = Shape::new(
        ShapeKind::Bar,
        ShapeFill::Accent,
        Rect::new(inner.right() - 24.0, inner.y, 24.0, 1.0),
    );

    let numeral_origin = frame.percent(20.0, 10.0, 90.0, 0.0);
    let numeral = input
        .text(
            TextRole::Numeral,
            &index_label,
            TextStyle::new(120.0).with_line_height(1.0),
            numeral_origin,
            1,
        )
        .faded(0.05);

    let excerpt_is_fallback = !input.has_content();
    let excerpt_text = if excerpt_is_fallback {
        input.settings.labels.cover_fallback.clone()
    } else {
        format!("\u{201C}{}\u{201D}", input.content.trim())
    };
    let excerpt_width = inner.width * 0.8 - EXCERPT_INDENT_MM;
    let excerpt = input
        .text_above(
            TextRole::Body,
            &excerpt_text,
            TextStyle::new(11.0).with_line_height(1.6),
            Rect::new(inner.x + EXCERPT_INDENT_MM, inner.bottom(), excerpt_width, 0.0),
            3,
        )
        .toned(if excerpt_is_fallback { Tone::Muted } else { Tone::Ink });
    let excerpt_border = Shape::new(
        ShapeKind::Bar,
        ShapeFill::Accent,
        Rect::new(inner.x, excerpt.y, 0.8, excerpt.height()),
    );

    let date = input
        .text_above(
            TextRole::Date,
            &input.chapter.date,
            TextStyle::new(10.0).with_letter_spacing(0.3),
            Rect::new(inner.x, excerpt.y - 8.0, inner.width, 0.0),
            1,
        )
        .toned(Tone::Muted);
    let accent_rule = Shape::new(
        ShapeKind::Bar,
        ShapeFill::Accent,
        Rect::new(inner.x, date.y - 5.0, 16.0, 1.0),
    );
    let title = input.text_above(
        TextRole::Title,
        &input.chapter.title,
        TextStyle::new(42.0).with_line_height(1.1),
        Rect::new(inner.x, accent_rule.rect.y - 5.0, inner.width, 0.0),
        3,
    );

    let photo = input.photos.first().map(|p| {
        let mut rect = frame.percent(10.0, 40.0, 50.0, 0.0);
        rect.height = rect.width * PHOTO_ASPECT;
        photo_frame(p, rect, 2.0, PHOTO_ROTATION_DEG, 10)
    });

    PageLayout::Cover(CoverLayout {
        index_label,
        corner_shape,
        numeral,
        title,
        accent_rule,
        date,
        excerpt_border,
        excerpt,
        excerpt_is_fallback,
        photo,
    })
}
