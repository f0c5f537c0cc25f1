use super::{LayoutInput, photo_frame};
use crate::model::{
    LowResWarning, PageLayout, Rect, Shape, ShapeFill, ShapeKind, SingleLayout, TextAlign,
    TextRole, Tone,
};
use crate::text::TextStyle;

const TEXT_PADDING_MM: f64 = 25.0;
const DATE_INSET_MM: f64 = 15.0;
const DATE_BLOCK_WIDTH_MM: f64 = 30.0;

/// One photo bleeding over the whole page with the text overlaid at the foot.
pub fn layout_single(input: &LayoutInput<'_>) -> PageLayout {
    let frame = input.frame;
    let settings = input.settings;

    let photo = input.photos.first();
    let tone = if photo.is_some() { Tone::Light } else { Tone::Ink };

    let low_res_warning = photo.and_then(|p| {
        let threshold = settings.low_resolution_threshold_px;
        // A stored dimension of 0 means the size was never probed.
        let below = |dim: Option<u32>| dim.is_some_and(|d| d > 0 && d < threshold);
        let low = below(p.width) || below(p.height);
        if !low {
            return None;
        }
        let badge = Shape::new(
            ShapeKind::Pill,
            ShapeFill::Warning,
            Rect::new(frame.x + 10.0, frame.y + 10.0, 34.0, 7.0),
        )
        .with_opacity(0.9);
        let label = input
            .text(
                TextRole::Warning,
                &settings.labels.low_resolution,
                TextStyle::new(7.0),
                badge.rect.inset(1.5),
                1,
            )
            .aligned(TextAlign::Middle)
            .toned(Tone::Light);
        Some(LowResWarning {
            badge,
            label,
            width_px: p.width,
            height_px: p.height,
        })
    });

    let scrim = photo.map(|_| {
        Shape::new(
            ShapeKind::Scrim,
            ShapeFill::Ink,
            frame.percent(45.0, 0.0, 100.0, 55.0),
        )
        .with_opacity(0.6)
    });
    let placeholder = match photo {
        Some(_) => None,
        None => Some(input.placeholder(frame, &settings.labels.no_photos)),
    };

    let text_width = (frame.width - 2.0 * TEXT_PADDING_MM).max(0.0);
    let mut bottom = frame.bottom() - TEXT_PADDING_MM;

    let body = input.has_content().then(|| {
        input
            .text_above(
                TextRole::Body,
                input.content,
                TextStyle::new(14.0).with_line_height(1.6),
                Rect::new(frame.x + TEXT_PADDING_MM, bottom, text_width, 0.0),
                6,
            )
            .toned(tone)
    });
    if let Some(body) = &body {
        bottom = body.y - 5.0;
    }

    let accent_rule = Shape::new(
        ShapeKind::Bar,
        ShapeFill::Accent,
        Rect::new(frame.x + TEXT_PADDING_MM, bottom - 1.0, 20.0, 1.0),
    );
    bottom = accent_rule.rect.y - 4.0;

    let title = input
        .text_above(
            TextRole::Title,
            &input.chapter.title,
            TextStyle::new(32.0).with_line_height(1.15),
            Rect::new(frame.x + TEXT_PADDING_MM, bottom, text_width, 0.0),
            2,
        )
        .toned(tone);

    let date_x = frame.right() - DATE_INSET_MM - DATE_BLOCK_WIDTH_MM;
    let day = input
        .text(
            TextRole::Date,
            &input.chapter.day_label(),
            TextStyle::new(28.0).with_line_height(1.0),
            Rect::new(date_x, frame.y + DATE_INSET_MM, DATE_BLOCK_WIDTH_MM, 0.0),
            1,
        )
        .aligned(TextAlign::End)
        .toned(tone);
    let month = input
        .text(
            TextRole::Label,
            &settings.labels.month(input.chapter.month()),
            TextStyle::new(9.0).with_letter_spacing(0.2),
            Rect::new(date_x, day.bottom() + 1.0, DATE_BLOCK_WIDTH_MM, 0.0),
            1,
        )
        .aligned(TextAlign::End)
        .toned(tone);

    PageLayout::Single(SingleLayout {
        photo: photo.map(|p| photo_frame(p, frame, 0.0, 0.0, 1)),
        scrim,
        placeholder,
        low_res_warning,
        title,
        accent_rule,
        body,
        day,
        month,
    })
}
