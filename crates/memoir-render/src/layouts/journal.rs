use super::{LayoutInput, photo_frame};
use crate::hash::seeded_unit;
use crate::model::{
    JournalLayout, PageLayout, PhotoFrame, Rect, Shape, ShapeFill, ShapeKind, TapeStrip,
    TextAlign, TextRole, Tone,
};
use crate::text::TextStyle;

const PADDING_MM: f64 = 18.0;
const GRID_STEP_MM: f64 = 10.0;
const BADGE_MM: f64 = 8.0;
const COLUMN_GAP_MM: f64 = 8.0;
const MARGIN_INDENT_MM: f64 = 5.0;
const PHOTO_GAP_MM: f64 = 6.0;
const PHOTO_WIDTH_PERCENT: f64 = 90.0;
const PHOTO_MAX_HEIGHT_PERCENT: f64 = 45.0;
const BODY_MAX_LINES: usize = 12;

/// Photo tilt in degrees for slot `index`, in `[-3, 3)`.
pub fn photo_rotation(page_id: &str, index: u32) -> f64 {
    (seeded_unit(page_id, index) - 0.5) * 6.0
}

/// The two tape strips pinned onto the photo column.
pub fn tapes(page_id: &str, column: Rect) -> [TapeStrip; 2] {
    let top_rotation = -12.0 + (seeded_unit(page_id, 100) - 0.5) * 20.0;
    let bottom_rotation = 45.0 + (seeded_unit(page_id, 101) - 0.5) * 30.0;
    let top_right = 15.0 + seeded_unit(page_id, 102) * 15.0;
    let bottom_right = 2.0 + seeded_unit(page_id, 103) * 10.0;

    let strip = |width: f64, height: f64, y: f64, right: f64, rotation: f64, fill| {
        let x = column.right() - column.width * right / 100.0 - width;
        TapeStrip {
            shape: Shape::new(ShapeKind::Tape, fill, Rect::new(x, y, width, height))
                .with_opacity(0.7)
                .rotated(rotation),
            right_percent: right,
        }
    };
    [
        strip(10.6, 3.2, column.y, top_right, top_rotation, ShapeFill::TapeBlue),
        strip(
            8.5,
            2.6,
            column.bottom() - column.height * 0.15 - 2.6,
            bottom_right,
            bottom_rotation,
            ShapeFill::TapeYellow,
        ),
    ]
}

/// Height-over-width ratio from the stored pixel size, 3:4 landscape when unknown.
fn aspect_ratio(width: Option<u32>, height: Option<u32>) -> f64 {
    match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => f64::from(h) / f64::from(w),
        _ => 0.75,
    }
}

/// Diary page on squared paper: handwritten-style text on the left, taped photos on the right.
pub fn layout_journal(input: &LayoutInput<'_>) -> PageLayout {
    let frame = input.frame;
    let inner = frame.inset(PADDING_MM);
    let labels = &input.settings.labels;

    let badge = Shape::new(
        ShapeKind::Blob,
        ShapeFill::Accent,
        Rect::new(inner.x, inner.y, BADGE_MM, BADGE_MM),
    );
    let badge_letter = {
        let mut letter = input
            .text(
                TextRole::Label,
                &labels.journal_badge,
                TextStyle::new(10.0).with_line_height(1.0),
                badge.rect,
                1,
            )
            .aligned(TextAlign::Middle)
            .toned(Tone::Light);
        letter.y = badge.rect.y + (BADGE_MM - letter.height()) / 2.0;
        letter
    };

    let header_x = inner.x + BADGE_MM + 4.0;
    let header_width = (inner.right() - header_x).max(0.0);
    let title = input.text(
        TextRole::Title,
        &input.chapter.title,
        TextStyle::new(14.0).with_line_height(1.2),
        Rect::new(header_x, inner.y, header_width, 0.0),
        1,
    );
    let date = input
        .text(
            TextRole::Date,
            &input.chapter.date,
            TextStyle::new(7.0).with_letter_spacing(0.1),
            Rect::new(header_x, title.bottom() + 0.5, header_width, 0.0),
            1,
        )
        .toned(Tone::Muted);
    let header_rule = Shape::new(
        ShapeKind::Bar,
        ShapeFill::Border,
        Rect::new(
            inner.x,
            date.bottom().max(inner.y + BADGE_MM) + 3.0,
            inner.width,
            0.3,
        ),
    );

    let body_top = header_rule.rect.bottom() + 6.0;
    let body_area = Rect::new(inner.x, body_top, inner.width, (inner.bottom() - body_top).max(0.0));
    let cols = body_area.split_columns(&[3.0, 2.0], COLUMN_GAP_MM);
    let (text_column, photo_column) = (cols[0], cols[1]);

    let margin_line = Shape::new(
        ShapeKind::Bar,
        ShapeFill::MarginRed,
        Rect::new(text_column.x, text_column.y, 0.3, text_column.height),
    )
    .with_opacity(0.4);

    let body_is_fallback = !input.has_content();
    let body = input
        .text(
            TextRole::Body,
            if body_is_fallback {
                labels.journal_fallback.as_str()
            } else {
                input.content.trim()
            },
            TextStyle::new(11.0).with_line_height(1.7),
            Rect::new(
                text_column.x + MARGIN_INDENT_MM,
                text_column.y,
                (text_column.width - MARGIN_INDENT_MM).max(0.0),
                0.0,
            ),
            BODY_MAX_LINES,
        )
        .toned(if body_is_fallback { Tone::Muted } else { Tone::Ink });

    let photo_width = photo_column.width * PHOTO_WIDTH_PERCENT / 100.0;
    let max_height = photo_column.height * PHOTO_MAX_HEIGHT_PERCENT / 100.0;
    let mut y = photo_column.y;
    let photos: Vec<PhotoFrame> = input
        .photos
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let height = (photo_width * aspect_ratio(p.width, p.height)).min(max_height);
            let x = photo_column.x + (photo_column.width - photo_width) / 2.0;
            let rect = Rect::new(x, y, photo_width, height);
            y += height + PHOTO_GAP_MM;
            photo_frame(p, rect, 1.5, photo_rotation(input.page_id, i as u32), 10 + i as i32)
        })
        .collect();

    PageLayout::Journal(JournalLayout {
        grid_step_mm: GRID_STEP_MM,
        badge,
        badge_letter,
        title,
        date,
        header_rule,
        text_column,
        margin_line,
        body,
        body_is_fallback,
        photo_column,
        photos,
        tapes: tapes(input.page_id, photo_column),
    })
}
