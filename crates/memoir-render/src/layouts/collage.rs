use super::{LayoutInput, photo_frame};
use crate::hash::preset_index;
use crate::model::{
    CollageLayout, CollageSlot, PageLayout, Rect, Shape, ShapeFill, ShapeKind, TextAlign,
    TextRole, Tone,
};
use crate::text::TextStyle;

const PADDING_MM: f64 = 12.0;
const SECTION_MARGIN_MM: f64 = 5.0;
const FRAME_MAT_MM: f64 = 1.5;
const QUOTE_WIDTH_PERCENT: f64 = 65.0;

pub const PRESET_COUNT: usize = 4;

const fn slot(top: f64, left: f64, width: f64, height: f64, rot: f64, z: i32) -> CollageSlot {
    CollageSlot {
        top,
        left,
        width,
        height,
        rotation_deg: rot,
        z_index: z,
    }
}

/// `PRESETS[preset][count - 1]` holds the slots for `count` photos.
static PRESETS: [[&[CollageSlot]; 4]; PRESET_COUNT] = [
    [
        &[slot(8.0, 15.0, 70.0, 68.0, -1.0, 10)],
        &[
            slot(3.0, 5.0, 52.0, 48.0, -2.0, 10),
            slot(42.0, 40.0, 52.0, 48.0, 1.5, 11),
        ],
        &[
            slot(2.0, 25.0, 50.0, 40.0, -1.0, 10),
            slot(38.0, 3.0, 45.0, 38.0, 1.5, 11),
            slot(40.0, 50.0, 45.0, 40.0, -1.5, 12),
        ],
        &[
            slot(0.0, 3.0, 45.0, 38.0, -1.5, 10),
            slot(2.0, 50.0, 45.0, 36.0, 1.0, 11),
            slot(42.0, 5.0, 43.0, 38.0, 1.0, 12),
            slot(44.0, 52.0, 44.0, 40.0, -1.0, 13),
        ],
    ],
    [
        &[slot(5.0, 10.0, 75.0, 70.0, 2.0, 10)],
        &[
            slot(5.0, 40.0, 55.0, 50.0, 3.0, 11),
            slot(45.0, 5.0, 50.0, 45.0, -2.0, 10),
        ],
        &[
            slot(0.0, 5.0, 48.0, 42.0, -3.0, 10),
            slot(20.0, 45.0, 50.0, 45.0, 2.0, 11),
            slot(55.0, 15.0, 45.0, 38.0, 0.0, 12),
        ],
        &[
            slot(2.0, 45.0, 48.0, 40.0, 2.0, 11),
            slot(5.0, 5.0, 42.0, 35.0, -2.0, 10),
            slot(40.0, 50.0, 45.0, 42.0, -1.0, 13),
            slot(45.0, 3.0, 45.0, 40.0, 1.5, 12),
        ],
    ],
    [
        &[slot(10.0, 18.0, 64.0, 65.0, 0.0, 10)],
        &[
            slot(8.0, 10.0, 55.0, 55.0, -4.0, 10),
            slot(28.0, 32.0, 55.0, 55.0, 3.0, 11),
        ],
        &[
            slot(5.0, 8.0, 50.0, 48.0, -5.0, 10),
            slot(15.0, 28.0, 50.0, 48.0, 0.0, 11),
            slot(38.0, 40.0, 52.0, 50.0, 4.0, 12),
        ],
        &[
            slot(0.0, 5.0, 45.0, 42.0, -4.0, 10),
            slot(8.0, 35.0, 45.0, 40.0, 2.0, 11),
            slot(35.0, 10.0, 48.0, 45.0, 1.0, 12),
            slot(42.0, 45.0, 48.0, 45.0, -2.0, 13),
        ],
    ],
    [
        &[slot(15.0, 12.0, 76.0, 60.0, 0.0, 10)],
        &[
            slot(15.0, 3.0, 50.0, 60.0, -1.0, 10),
            slot(18.0, 47.0, 50.0, 58.0, 1.0, 11),
        ],
        &[
            slot(10.0, 2.0, 38.0, 55.0, -2.0, 10),
            slot(15.0, 32.0, 36.0, 50.0, 0.0, 11),
            slot(12.0, 60.0, 38.0, 55.0, 2.0, 12),
        ],
        &[
            slot(5.0, 2.0, 35.0, 45.0, -2.0, 10),
            slot(8.0, 30.0, 35.0, 42.0, 1.0, 11),
            slot(45.0, 10.0, 38.0, 42.0, 0.0, 12),
            slot(48.0, 52.0, 42.0, 45.0, -1.0, 13),
        ],
    ],
];

/// Slots for `count` photos in preset `preset` (both clamped into the table).
pub fn collage_slots(preset: usize, count: usize) -> &'static [CollageSlot] {
    if count == 0 {
        return &[];
    }
    PRESETS[preset % PRESET_COUNT][count.min(4) - 1]
}

/// Scrapbook arrangement of up to four rotated, overlapping photos.
pub fn layout_collage(input: &LayoutInput<'_>) -> PageLayout {
    let frame = input.frame;
    let inner = frame.inset(PADDING_MM);
    let preset = preset_index(input.page_id, PRESET_COUNT);

    let accent_blob = Shape::new(
        ShapeKind::Blob,
        ShapeFill::Accent,
        Rect::new(frame.right() - 60.0, frame.y - 20.0, 80.0, 80.0),
    )
    .with_opacity(0.08);

    let title = input.text(
        TextRole::Title,
        &input.chapter.title,
        TextStyle::new(24.0).with_line_height(1.15),
        Rect::new(inner.x, inner.y, inner.width * 0.8, 0.0),
        2,
    );
    let accent_rule = Shape::new(
        ShapeKind::Bar,
        ShapeFill::Accent,
        Rect::new(inner.x, title.bottom() + 2.5, 12.0, 0.8),
    );
    let date = input
        .text(
            TextRole::Date,
            &input.chapter.date,
            TextStyle::new(7.0).with_letter_spacing(0.2),
            Rect::new(inner.x, accent_rule.rect.bottom() + 2.0, inner.width, 0.0),
            1,
        )
        .toned(Tone::Muted);

    let mut area_bottom = inner.bottom();
    let quote = input.has_content().then(|| {
        let width = inner.width * QUOTE_WIDTH_PERCENT / 100.0;
        input
            .text_above(
                TextRole::Caption,
                &format!("\u{201C}{}\u{201D}", input.content.trim()),
                TextStyle::new(8.0).with_line_height(1.5),
                Rect::new(inner.right() - width, inner.bottom(), width, 0.0),
                2,
            )
            .aligned(TextAlign::End)
            .toned(Tone::Muted)
            .italicized()
    });
    if let Some(quote) = &quote {
        area_bottom = quote.y - SECTION_MARGIN_MM;
    }

    let area_top = date.bottom() + SECTION_MARGIN_MM;
    let photo_area = Rect::new(inner.x, area_top, inner.width, (area_bottom - area_top).max(0.0));

    let slots = collage_slots(preset, input.photos.len());
    let photos = input
        .photos
        .iter()
        .zip(slots)
        .map(|(photo, s)| {
            let rect = photo_area.percent(s.top, s.left, s.width, s.height);
            photo_frame(photo, rect, FRAME_MAT_MM, s.rotation_deg, s.z_index)
        })
        .collect();

    let placeholder = input
        .photos
        .is_empty()
        .then(|| input.placeholder(photo_area, &input.settings.labels.collage_empty));

    PageLayout::Collage(CollageLayout {
        preset_index: preset,
        accent_blob,
        title,
        accent_rule,
        date,
        photo_area,
        photos,
        placeholder,
        quote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_has_one_slot_per_photo() {
        for preset in 0..PRESET_COUNT {
            for count in 1..=4 {
                let slots = collage_slots(preset, count);
                assert_eq!(slots.len(), count);
                for s in slots {
                    assert!(s.top >= 0.0 && s.left >= 0.0);
                    assert!(s.top + s.height <= 100.0 && s.left + s.width <= 100.0);
                }
            }
        }
    }

    #[test]
    fn counts_above_four_reuse_the_four_slot_table() {
        assert_eq!(collage_slots(2, 7), collage_slots(2, 4));
        assert!(collage_slots(1, 0).is_empty());
    }

    #[test]
    fn first_preset_single_slot() {
        assert_eq!(collage_slots(0, 1)[0], slot(8.0, 15.0, 70.0, 68.0, -1.0, 10));
    }
}
