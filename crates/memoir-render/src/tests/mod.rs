mod layouts;

use memoir_core::{LayoutKind, Page, Photo, Theme};

use crate::layouts::ChapterInfo;
use crate::page::{PageRenderer, PageRequest, ViewOptions};
use crate::model::RenderedPage;

fn photos(n: usize) -> Vec<Photo> {
    (0..n)
        .map(|i| Photo::new(format!("ph{i}"), format!("https://img.example/{i}.jpg")).with_size(3000, 2000))
        .collect()
}

fn page(id: &str, kind: LayoutKind, n: usize, content: &str) -> Page {
    Page::new(id, kind).with_photos(photos(n)).with_content(content)
}

fn render(page: &Page, chapter_index: usize) -> RenderedPage {
    render_with(&PageRenderer::default(), page, chapter_index, ViewOptions::default())
}

fn render_with(
    renderer: &PageRenderer,
    page: &Page,
    chapter_index: usize,
    view: ViewOptions,
) -> RenderedPage {
    renderer.render(&PageRequest {
        page,
        chapter: ChapterInfo::new("Summer by the Sea", "2023-08-14", chapter_index),
        page_size: "A4",
        theme: Theme::Classic,
        view,
    })
}
