use super::{LayoutInput, photo_frame};
use crate::model::{
    GridLayout, GridMode, PageLayout, PhotoFrame, Rect, Shape, ShapeFill, ShapeKind, TextAlign,
    TextRole, Tone,
};
use crate::text::TextStyle;

const PADDING_MM: f64 = 12.0;
const SECTION_MARGIN_MM: f64 = 6.0;
const GAP_MM: f64 = 3.0;
const UNIFORM_GAP_MM: f64 = 2.0;
const UNIFORM_COLUMNS: usize = 3;

pub fn grid_mode(count: usize) -> GridMode {
    match count {
        0 => GridMode::Empty,
        1..=4 => GridMode::Refined { count },
        n => GridMode::Uniform {
            columns: UNIFORM_COLUMNS,
            rows: n.div_ceil(UNIFORM_COLUMNS),
        },
    }
}

/// Cells for the hand-tuned 1–4 photo arrangements, in photo order.
fn refined_cells(area: Rect, count: usize) -> Vec<Rect> {
    match count {
        1 => vec![area],
        2 => area.split_columns(&[2.0, 1.0], GAP_MM),
        3 => {
            let cols = area.split_columns(&[1.5, 1.0], GAP_MM);
            let mut cells = vec![cols[0]];
            cells.extend(cols[1].split_rows(&[1.0, 1.0], GAP_MM));
            cells
        }
        _ => {
            let cols = area.split_columns(&[1.0, 1.0], GAP_MM);
            let left = cols[0].split_rows(&[1.2, 1.0], GAP_MM);
            let right = cols[1].split_rows(&[1.0, 1.2], GAP_MM);
            // Photos alternate between the columns, top row first.
            vec![left[0], right[0], left[1], right[1]]
        }
    }
}

fn uniform_cells(area: Rect, columns: usize, rows: usize, count: usize) -> Vec<Rect> {
    let row_rects = area.split_rows(&vec![1.0; rows], UNIFORM_GAP_MM);
    row_rects
        .iter()
        .flat_map(|row| row.split_columns(&vec![1.0; columns], UNIFORM_GAP_MM))
        .take(count)
        .collect()
}

/// Editorial grid: refined split panes up to four photos, a numbered matrix beyond.
pub fn layout_grid(input: &LayoutInput<'_>) -> PageLayout {
    let frame = input.frame;
    let inner = frame.inset(PADDING_MM);
    let mode = grid_mode(input.photos.len());

    let header_split = inner.split_columns(&[7.0, 3.0], 4.0);
    let title = input.text(
        TextRole::Title,
        &input.chapter.title,
        TextStyle::new(22.0).with_line_height(1.15),
        header_split[0],
        2,
    );
    let date = input
        .text(
            TextRole::Date,
            &input.chapter.date,
            TextStyle::new(8.0).with_letter_spacing(0.1),
            Rect::new(header_split[1].x, inner.y + 1.0, header_split[1].width, 0.0),
            1,
        )
        .aligned(TextAlign::End)
        .toned(Tone::Muted);
    let mode_note = match mode {
        GridMode::Uniform { .. } => Some(
            input
                .text(
                    TextRole::Label,
                    &input.settings.labels.photo_count(input.photos.len()),
                    TextStyle::new(7.0),
                    Rect::new(header_split[1].x, date.bottom() + 1.0, header_split[1].width, 0.0),
                    1,
                )
                .aligned(TextAlign::End)
                .toned(Tone::Accent),
        ),
        _ => None,
    };

    let header_bottom = mode_note
        .as_ref()
        .map_or(date.bottom(), |n| n.bottom())
        .max(title.bottom());
    let header_rule = Shape::new(
        ShapeKind::Bar,
        ShapeFill::Border,
        Rect::new(inner.x, header_bottom + 3.0, inner.width, 0.3),
    );

    let mut area_bottom = inner.bottom();
    let mut footer_rule = None;
    let body = input.has_content().then(|| {
        input
            .text_above(
                TextRole::Body,
                input.content,
                TextStyle::new(9.0).with_line_height(1.5),
                Rect::new(inner.x, inner.bottom(), inner.width, 0.0),
                2,
            )
            .toned(Tone::Muted)
    });
    if let Some(body) = &body {
        let rule = Shape::new(
            ShapeKind::Bar,
            ShapeFill::Border,
            Rect::new(inner.x, body.y - 3.0, inner.width, 0.3),
        );
        area_bottom = rule.rect.y - SECTION_MARGIN_MM;
        footer_rule = Some(rule);
    }

    let area_top = header_rule.rect.bottom() + SECTION_MARGIN_MM;
    let photo_area = Rect::new(inner.x, area_top, inner.width, (area_bottom - area_top).max(0.0));

    let cells = match mode {
        GridMode::Empty => Vec::new(),
        GridMode::Refined { count } => refined_cells(photo_area, count),
        GridMode::Uniform { columns, rows } => {
            uniform_cells(photo_area, columns, rows, input.photos.len())
        }
    };
    let numbered = matches!(mode, GridMode::Uniform { .. });
    let photos: Vec<PhotoFrame> = input
        .photos
        .iter()
        .zip(cells)
        .enumerate()
        .map(|(i, (photo, cell))| {
            let mut placed = photo_frame(photo, cell, 0.0, 0.0, 10);
            if numbered {
                placed.badge = Some(i + 1);
            }
            placed
        })
        .collect();

    let placeholder = match mode {
        GridMode::Empty => Some(input.placeholder(photo_area, &input.settings.labels.no_photos)),
        _ => None,
    };

    PageLayout::Grid(GridLayout {
        mode,
        title,
        date,
        header_rule,
        mode_note,
        photo_area,
        photos,
        placeholder,
        footer_rule,
        body,
    })
}
