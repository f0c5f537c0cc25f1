use memoir_core::{LayoutKind, Page, Photo, Theme};
use memoir_render::svg::{SvgRenderOptions, render_book_svg, render_page_svg};
use memoir_render::{ChapterInfo, PageRenderer, PageRequest, RenderedPage, ViewOptions};

fn rendered(id: &str, kind: LayoutKind, photos: usize, content: &str, theme: Theme) -> RenderedPage {
    let page = Page::new(id, kind)
        .with_content(content)
        .with_photos(
            (0..photos)
                .map(|i| Photo::new(format!("ph{i}"), format!("https://img.example/{i}.jpg?a=1&b=2")))
                .collect(),
        );
    PageRenderer::default().render(&PageRequest {
        page: &page,
        chapter: ChapterInfo::new("Tom & Jerry <3", "2023-05-01", 0),
        page_size: "A5",
        theme,
        view: ViewOptions::manual(0.5),
    })
}

fn parse(svg: &str) -> roxmltree::Document<'_> {
    roxmltree::Document::parse(svg).expect("well-formed svg")
}

#[test]
fn page_svg_is_well_formed_for_every_layout() {
    for kind in LayoutKind::ALL {
        for n in [0, 2, 9] {
            let page = rendered("page-1", kind, n, "A \"quoted\" line", Theme::Modern);
            let svg = render_page_svg(&page, &SvgRenderOptions::default());
            let doc = parse(&svg);
            let root = doc.root_element();
            assert_eq!(root.tag_name().name(), "svg");
            assert_eq!(root.attribute("viewBox"), Some("0 0 148 210"));
            assert_eq!(root.attribute("data-layout"), Some(kind.as_str()));

            let images = doc
                .descendants()
                .filter(|n| n.has_tag_name("image"))
                .count();
            assert_eq!(images, page.content.photo_frames().len(), "{kind} with {n} photos");
        }
    }
}

#[test]
fn page_svg_escapes_text_and_urls() {
    let page = rendered("p", LayoutKind::Single, 1, "", Theme::Classic);
    let svg = render_page_svg(&page, &SvgRenderOptions::default());
    assert!(svg.contains("Tom &amp; Jerry &lt;3"));
    let doc = parse(&svg);
    let image = doc
        .descendants()
        .find(|n| n.has_tag_name("image"))
        .expect("image");
    assert_eq!(image.attribute("href"), Some("https://img.example/0.jpg?a=1&b=2"));
}

#[test]
fn page_svg_carries_display_size_and_theme_font() {
    let page = rendered("p", LayoutKind::Grid, 3, "", Theme::Magazine);
    let svg = render_page_svg(&page, &SvgRenderOptions::default());
    let doc = parse(&svg);
    let root = doc.root_element();
    let width: f64 = root.attribute("width").expect("width").parse().expect("number");
    assert!((width - 148.0 * 3.7795 * 0.5).abs() < 1e-3);
    assert!(svg.contains("Oswald"));
    assert!(svg.contains("#D32F2F"));
}

#[test]
fn chrome_can_be_left_out() {
    let page = rendered("p", LayoutKind::Journal, 1, "", Theme::Warm);
    let with = render_page_svg(&page, &SvgRenderOptions::default());
    assert!(with.contains("memoir-safe-zone"));
    assert!(with.contains(r#"class="memoir-spine""#));

    let opts = SvgRenderOptions {
        include_chrome: false,
        include_footer_id: false,
        ..SvgRenderOptions::default()
    };
    let without = render_page_svg(&page, &opts);
    assert!(!without.contains("memoir-safe-zone"));
    assert!(!without.contains(r#"class="memoir-spine""#));
    assert!(!without.contains(r#"class="memoir-edge""#));
    assert!(!without.contains("memoir-footer-id"));
    assert!(without.contains("memoir-tape"));
}

#[test]
fn collage_photos_are_painted_by_z_index() {
    let page = rendered("page-1", LayoutKind::Collage, 4, "", Theme::Classic);
    let svg = render_page_svg(&page, &SvgRenderOptions::default());
    let doc = parse(&svg);
    let painted: Vec<&str> = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("memoir-photo"))
        .filter_map(|n| n.attribute("data-photo-id"))
        .collect();

    let mut frames = page.content.photo_frames();
    frames.sort_by_key(|f| f.z_index);
    let expected: Vec<&str> = frames.iter().map(|f| f.photo_id.as_str()).collect();
    assert_eq!(painted, expected);
}

#[test]
fn book_svg_stacks_pages() {
    let pages = vec![
        rendered("p1", LayoutKind::Cover, 1, "", Theme::Classic),
        rendered("p2", LayoutKind::Magazine, 2, "", Theme::Classic),
    ];
    let opts = SvgRenderOptions {
        svg_id: "my book".to_string(),
        ..SvgRenderOptions::default()
    };
    let svg = render_book_svg(&pages, Theme::Classic, &opts);
    let doc = parse(&svg);
    let root = doc.root_element();
    assert_eq!(root.attribute("id"), Some("my-book"));
    assert_eq!(root.attribute("viewBox"), Some("0 0 148 430"));
    let groups: Vec<&str> = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("memoir-page"))
        .filter_map(|n| n.attribute("data-page-id"))
        .collect();
    assert_eq!(groups, vec!["p1", "p2"]);
}
