use super::{LayoutInput, photo_frame};
use crate::hash::preset_index;
use crate::model::{
    MagazineLayout, PageLayout, Rect, Shape, ShapeFill, ShapeKind, TextAlign, TextRole, Tone,
    VolumeMark,
};
use crate::text::TextStyle;

const PADDING_MM: f64 = 10.0;
const COLUMN_GAP_MM: f64 = 3.0;
const ROW_GAP_MM: f64 = 2.0;
const CAPTION_PADDING_MM: f64 = 4.0;
const MAX_SIDE_PHOTOS: usize = 3;

/// `true` when the main column sits on the right for this page.
pub fn is_mirrored(page_id: &str) -> bool {
    preset_index(page_id, 2) == 1
}

/// Editorial spread: a dominant photo with a caption panel and a column of secondary shots.
pub fn layout_magazine(input: &LayoutInput<'_>) -> PageLayout {
    let frame = input.frame;
    let inner = frame.inset(PADDING_MM);
    let labels = &input.settings.labels;
    let mirrored = is_mirrored(input.page_id);

    let masthead = input.text(
        TextRole::Title,
        &labels.masthead,
        TextStyle::new(28.0).with_line_height(1.0),
        Rect::new(inner.x, inner.y, inner.width * 0.7, 0.0),
        1,
    );
    let date = input
        .text_above(
            TextRole::Date,
            &input.chapter.date,
            TextStyle::new(8.0).with_letter_spacing(0.15),
            Rect::new(inner.x + inner.width * 0.7, masthead.bottom(), inner.width * 0.3, 0.0),
            1,
        )
        .aligned(TextAlign::End)
        .toned(Tone::Muted);
    let masthead_rule = Shape::new(
        ShapeKind::Bar,
        ShapeFill::Ink,
        Rect::new(inner.x, masthead.bottom() + 2.0, inner.width, 0.8),
    );

    let body_top = masthead_rule.rect.bottom() + 4.0;
    let body = Rect::new(inner.x, body_top, inner.width, (inner.bottom() - body_top).max(0.0));
    let (main_column, side_column) = if mirrored {
        let cols = body.split_columns(&[1.0, 2.0], COLUMN_GAP_MM);
        (cols[1], cols[0])
    } else {
        let cols = body.split_columns(&[2.0, 1.0], COLUMN_GAP_MM);
        (cols[0], cols[1])
    };

    let word_x = if mirrored {
        body.right() + 8.0 - side_column.width
    } else {
        body.x - 8.0
    };
    let background_word = input
        .text_above(
            TextRole::Numeral,
            &labels.background_word,
            TextStyle::new(120.0).with_line_height(1.0),
            Rect::new(word_x, frame.bottom() - frame.height * 0.25, side_column.width, 0.0),
            1,
        )
        .faded(0.04)
        .rotated(if mirrored { 90.0 } else { -90.0 });

    let main_photo = input
        .photos
        .first()
        .map(|p| photo_frame(p, main_column, 0.0, 0.0, 10));
    let placeholder = main_photo
        .is_none()
        .then(|| input.placeholder(main_column, &labels.no_photos));

    let caption_is_fallback = !input.has_content();
    let caption_text = if caption_is_fallback {
        labels.magazine_fallback.as_str()
    } else {
        input.content.trim()
    };
    let panel_width = main_column.width * 0.65;
    // The panel hugs the edge of the main column that faces the side column.
    let panel_x = if mirrored {
        main_column.x
    } else {
        main_column.right() - panel_width
    };
    let panel_bottom = main_column.bottom() - main_column.height * 0.15;
    let caption = input
        .text_above(
            TextRole::Caption,
            caption_text,
            TextStyle::new(9.0).with_line_height(1.5),
            Rect::new(
                panel_x + CAPTION_PADDING_MM,
                panel_bottom - CAPTION_PADDING_MM,
                (panel_width - 2.0 * CAPTION_PADDING_MM).max(0.0),
                0.0,
            ),
            3,
        )
        .toned(Tone::Light);
    let panel_height = caption.height() + 2.0 * CAPTION_PADDING_MM;
    let caption_panel = Shape::new(
        ShapeKind::Panel,
        ShapeFill::Ink,
        Rect::new(panel_x, panel_bottom - panel_height, panel_width, panel_height),
    )
    .with_opacity(0.85);

    let side: Vec<_> = input.photos.iter().skip(1).take(MAX_SIDE_PHOTOS).collect();
    let with_volume = input.photos.len() <= 2;
    let row_count = side.len() + usize::from(with_volume);
    let rows = side_column.split_rows(&vec![1.0; row_count], ROW_GAP_MM);

    let side_photos = side
        .iter()
        .zip(&rows)
        .enumerate()
        .map(|(i, (p, row))| photo_frame(p, *row, 0.0, 0.0, 11 + i as i32))
        .collect();

    let volume = match rows.last() {
        Some(rect) if with_volume => {
            let label = input
                .text(
                    TextRole::Label,
                    &format!("VOL.{}", input.chapter.number_label()),
                    TextStyle::new(12.0).with_letter_spacing(0.3),
                    Rect::new(rect.x, rect.y + rect.height / 2.0, rect.width, 0.0),
                    1,
                )
                .aligned(TextAlign::Middle)
                .rotated(-90.0);
            let rule = Shape::new(
                ShapeKind::Bar,
                ShapeFill::Border,
                Rect::new(rect.x + rect.width / 2.0 - 0.25, rect.y, 0.5, rect.height),
            );
            Some(VolumeMark {
                rect: *rect,
                rule,
                label,
            })
        }
        _ => None,
    };

    PageLayout::Magazine(MagazineLayout {
        mirrored,
        masthead,
        date,
        masthead_rule,
        main_column,
        side_column,
        background_word,
        main_photo,
        placeholder,
        caption_panel,
        caption,
        caption_is_fallback,
        side_photos,
        volume,
    })
}
