use memoir_core::{LayoutKind, Photo};

use super::{page, render};
use crate::capacity::capacity;
use crate::hash::preset_index;
use crate::layouts::collage::collage_slots;
use crate::model::{GridMode, PageLayout, Rect, TextRole};

#[test]
fn every_kind_shows_a_prefix_and_reports_overflow() {
    for kind in LayoutKind::ALL {
        let cap = capacity(kind);
        for n in [0, 1, cap, cap + 3] {
            let p = page("page-1", kind, n, "");
            let out = render(&p, 0);
            assert_eq!(out.layout_kind, kind);

            let shown = out.content.photo_ids();
            let expected: Vec<String> = (0..n.min(cap)).map(|i| format!("ph{i}")).collect();
            assert_eq!(shown, expected, "{kind} with {n} photos");
            assert_eq!(out.overflow.hidden, n.saturating_sub(cap), "{kind} with {n} photos");
            assert_eq!(out.overflow.total, n);
        }
    }
}

#[test]
fn every_kind_has_an_empty_state() {
    for kind in LayoutKind::ALL {
        let out = render(&page("empty", kind, 0, ""), 0);
        assert!(out.content.photo_frames().is_empty());
        assert!(out.content.has_placeholder(), "{kind} should show an empty state");
        assert!(out.overflow.is_empty());
    }
}

#[test]
fn collage_preset_follows_page_id_hash() {
    let out = render(&page("abc123", LayoutKind::Collage, 3, ""), 0);
    let PageLayout::Collage(layout) = &out.content else {
        panic!("expected collage layout");
    };
    assert_eq!(layout.preset_index, 0);
    assert_eq!(layout.preset_index, preset_index("abc123", 4));

    let area = layout.photo_area;
    for (frame, slot) in layout.photos.iter().zip(collage_slots(0, 3)) {
        let expected = area.percent(slot.top, slot.left, slot.width, slot.height);
        assert_eq!(frame.rect, expected);
        assert_eq!(frame.rotation_deg, slot.rotation_deg);
        assert_eq!(frame.z_index, slot.z_index);
    }
}

#[test]
fn collage_is_stable_across_renders() {
    let p = page("page-3", LayoutKind::Collage, 4, "a line worth quoting");
    assert_eq!(render(&p, 1), render(&p, 1));
    let PageLayout::Collage(layout) = render(&p, 1).content else {
        panic!("expected collage layout");
    };
    assert_eq!(layout.preset_index, 3);
    let quote = layout.quote.expect("quote");
    assert!(quote.text().starts_with('\u{201C}'));
    assert!(quote.italic);
}

#[test]
fn grid_with_five_photos_is_uniform_and_idempotent() {
    let p = page("g", LayoutKind::Grid, 5, "");
    let first = render(&p, 0);
    assert_eq!(first, render(&p, 0));

    let PageLayout::Grid(layout) = first.content else {
        panic!("expected grid layout");
    };
    assert_eq!(layout.mode, GridMode::Uniform { columns: 3, rows: 2 });
    let badges: Vec<Option<usize>> = layout.photos.iter().map(|f| f.badge).collect();
    assert_eq!(badges, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
    assert_eq!(layout.mode_note.expect("note").text(), "5 photos");
    assert!(layout.body.is_none());
    assert!(layout.footer_rule.is_none());
}

#[test]
fn grid_refined_modes_have_no_badges() {
    for n in 1..=4 {
        let PageLayout::Grid(layout) = render(&page("g", LayoutKind::Grid, n, "notes"), 0).content
        else {
            panic!("expected grid layout");
        };
        assert_eq!(layout.mode, GridMode::Refined { count: n });
        assert!(layout.photos.iter().all(|f| f.badge.is_none()));
        assert!(layout.mode_note.is_none());
        assert!(layout.body.is_some());
        for f in &layout.photos {
            assert!(f.rect.bottom() <= layout.photo_area.bottom() + 1e-9);
        }
    }
}

fn grid_cells(n: usize) -> Vec<Rect> {
    let PageLayout::Grid(layout) = render(&page("g", LayoutKind::Grid, n, ""), 0).content else {
        panic!("expected grid layout");
    };
    let ids: Vec<String> = layout.photos.iter().map(|f| f.photo_id.clone()).collect();
    let expected: Vec<String> = (0..n).map(|i| format!("ph{i}")).collect();
    assert_eq!(ids, expected);
    layout.photos.iter().map(|f| f.rect).collect()
}

#[test]
fn grid_two_photos_put_the_wide_pane_first() {
    let cells = grid_cells(2);
    assert!(cells[0].x < cells[1].x);
    assert!((cells[0].width - 2.0 * cells[1].width).abs() < 1e-9);
    assert_eq!(cells[0].y, cells[1].y);
    assert_eq!(cells[0].height, cells[1].height);
}

#[test]
fn grid_three_photos_stack_the_rest_on_the_right() {
    let cells = grid_cells(3);
    assert!(cells[1].x > cells[0].x);
    assert_eq!(cells[1].x, cells[2].x);
    assert!(cells[2].y > cells[1].y);
    assert_eq!(cells[0].y, cells[1].y);
    assert!((cells[0].bottom() - cells[2].bottom()).abs() < 1e-9);
}

#[test]
fn grid_four_photos_alternate_between_columns() {
    let cells = grid_cells(4);
    let (left, right) = (cells[0].x, cells[1].x);
    assert!(right > left);
    assert_eq!(cells[2].x, left);
    assert_eq!(cells[3].x, right);

    // Top row first: ph1 tops the right column.
    assert_eq!(cells[0].y, cells[1].y);
    assert!(cells[2].y > cells[0].y);
    assert!(cells[3].y > cells[1].y);

    // Tall cell top left, tall cell bottom right.
    assert!((cells[0].height / cells[2].height - 1.2).abs() < 1e-9);
    assert!((cells[3].height / cells[1].height - 1.2).abs() < 1e-9);
}

#[test]
fn cover_first_chapter_without_content_uses_fallback() {
    let out = render(&page("c", LayoutKind::Cover, 0, ""), 0);
    let PageLayout::Cover(layout) = out.content else {
        panic!("expected cover layout");
    };
    assert_eq!(layout.index_label, "01");
    assert_eq!(layout.numeral.text(), "01");
    assert_eq!(layout.numeral.opacity, 0.05);
    assert!(layout.excerpt_is_fallback);
    assert!(!layout.excerpt.is_empty());
    assert!(layout.photo.is_none());
}

#[test]
fn cover_photo_is_tilted_three_to_four() {
    let PageLayout::Cover(layout) = render(&page("c", LayoutKind::Cover, 1, "Hello"), 11).content
    else {
        panic!("expected cover layout");
    };
    assert_eq!(layout.index_label, "12");
    let photo = layout.photo.expect("photo");
    assert_eq!(photo.rotation_deg, 3.0);
    assert!((photo.rect.height / photo.rect.width - 4.0 / 3.0).abs() < 1e-9);
    assert!((photo.rect.x - 84.0).abs() < 1e-9);
    assert!(!layout.excerpt_is_fallback);
    assert_eq!(layout.excerpt.text(), "\u{201C}Hello\u{201D}");
}

#[test]
fn magazine_mirrors_by_page_id() {
    let PageLayout::Magazine(plain) = render(&page("abc123", LayoutKind::Magazine, 4, ""), 0).content
    else {
        panic!("expected magazine layout");
    };
    assert!(!plain.mirrored);
    assert!(plain.main_column.x < plain.side_column.x);
    assert!(plain.main_column.width > plain.side_column.width);
    assert_eq!(plain.side_photos.len(), 3);
    assert!(plain.volume.is_none());
    assert!(plain.caption_is_fallback);
    // Caption hugs the inner edge of the main column, the word sits off its outer edge.
    assert!((plain.caption_panel.rect.right() - plain.main_column.right()).abs() < 1e-9);
    assert!(plain.caption_panel.rect.x > plain.main_column.x);
    assert!((plain.background_word.x - (plain.main_column.x - 8.0)).abs() < 1e-9);
    assert_eq!(plain.background_word.rotation_deg, -90.0);

    let PageLayout::Magazine(mirrored) =
        render(&page("page-1", LayoutKind::Magazine, 2, "caption"), 2).content
    else {
        panic!("expected magazine layout");
    };
    assert!(mirrored.mirrored);
    assert!(mirrored.main_column.x > mirrored.side_column.x);
    assert!((mirrored.caption_panel.rect.x - mirrored.main_column.x).abs() < 1e-9);
    assert!(mirrored.caption_panel.rect.right() < mirrored.main_column.right());
    let word = &mirrored.background_word;
    assert!((word.x + word.width - (mirrored.main_column.right() + 8.0)).abs() < 1e-9);
    assert_eq!(word.rotation_deg, 90.0);
    assert_eq!(mirrored.side_photos.len(), 1);
    let volume = mirrored.volume.expect("volume mark");
    assert_eq!(volume.label.text(), "VOL.03");
    assert_eq!(mirrored.caption.text(), "caption");
}

#[test]
fn magazine_without_photos_fills_side_with_volume() {
    let PageLayout::Magazine(layout) = render(&page("m", LayoutKind::Magazine, 0, ""), 0).content
    else {
        panic!("expected magazine layout");
    };
    assert!(layout.main_photo.is_none());
    assert!(layout.placeholder.is_some());
    let volume = layout.volume.expect("volume mark");
    assert_eq!(volume.rect, layout.side_column);
}

#[test]
fn journal_text_is_clamped_to_twelve_lines() {
    let long = "word ".repeat(600);
    let PageLayout::Journal(layout) = render(&page("abc123", LayoutKind::Journal, 2, &long), 0).content
    else {
        panic!("expected journal layout");
    };
    assert_eq!(layout.body.lines.len(), 12);
    assert!(layout.body.clamped);
    assert!(!layout.body_is_fallback);
    assert_eq!(layout.body.role, TextRole::Body);

    let rotations: Vec<f64> = layout.photos.iter().map(|p| p.rotation_deg).collect();
    assert!((rotations[0] - (0.592 - 0.5) * 6.0).abs() < 1e-9);
    assert!((rotations[1] - (0.456 - 0.5) * 6.0).abs() < 1e-9);
    for p in &layout.photos {
        assert!(p.rect.height <= layout.photo_column.height * 0.45 + 1e-9);
    }
}

#[test]
fn journal_empty_uses_fallback_text() {
    let PageLayout::Journal(layout) = render(&page("j", LayoutKind::Journal, 0, "  "), 0).content
    else {
        panic!("expected journal layout");
    };
    assert!(layout.body_is_fallback);
    assert!(!layout.body.is_empty());
}

#[test]
fn single_flags_low_resolution_photos() {
    let mut p = page("s", LayoutKind::Single, 0, "");
    p.photos = vec![Photo::new("small", "small.jpg").with_size(800, 2000)];
    let PageLayout::Single(layout) = render(&p, 0).content else {
        panic!("expected single layout");
    };
    let warning = layout.low_res_warning.expect("warning");
    assert_eq!(warning.width_px, Some(800));

    p.photos = vec![Photo::new("unknown", "unknown.jpg")];
    let PageLayout::Single(layout) = render(&p, 0).content else {
        panic!("expected single layout");
    };
    assert!(layout.low_res_warning.is_none());

    for (w, h) in [(0, 0), (0, 3000), (3000, 0)] {
        p.photos = vec![Photo::new("unprobed", "unprobed.jpg").with_size(w, h)];
        let PageLayout::Single(layout) = render(&p, 0).content else {
            panic!("expected single layout");
        };
        assert!(layout.low_res_warning.is_none(), "{w}x{h} should not warn");
    }
    p.photos = vec![Photo::new("narrow", "narrow.jpg").with_size(0, 900)];
    let PageLayout::Single(layout) = render(&p, 0).content else {
        panic!("expected single layout");
    };
    assert!(layout.low_res_warning.is_some());
}

#[test]
fn single_date_block_uses_day_and_month() {
    let PageLayout::Single(layout) = render(&page("s", LayoutKind::Single, 1, "story"), 0).content
    else {
        panic!("expected single layout");
    };
    assert_eq!(layout.day.text(), "14");
    assert_eq!(layout.month.text(), "AUG");
    assert!(layout.body.is_some());
    assert!(layout.scrim.is_some());
}
