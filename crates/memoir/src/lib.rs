#![forbid(unsafe_code)]

//! `memoir` is a headless engine for memoir-style photobooks.
//!
//! The core (always enabled) holds the book/chapter/page/photo model, local persistence and
//! editing operations. Layout and SVG output live behind the `render` feature.
//!
//! # Features
//!
//! - `render`: enable page layout + SVG rendering (`memoir::render`)

pub use memoir_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use memoir_render::model::{PageLayout, RenderedPage};
    pub use memoir_render::svg::{SvgRenderOptions, sanitize_svg_id};
    pub use memoir_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use memoir_render::{
        ChapterInfo, PageRenderer, PageRequest, PageSize, RenderSettings, ScaleController,
        ScaleMode, ViewOptions,
    };

    use memoir_core::{Book, BookService, MemoirConfig};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] memoir_core::Error),
        #[error(transparent)]
        Render(#[from] memoir_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Renders books to layout models and SVG without a UI.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        renderer: PageRenderer,
        svg: SvgRenderOptions,
        view: ViewOptions,
    }

    impl HeadlessRenderer {
        pub fn new(renderer: PageRenderer) -> Self {
            let svg = SvgRenderOptions {
                svg_id: renderer.settings().svg_id.clone(),
                ..SvgRenderOptions::default()
            };
            Self {
                renderer,
                svg,
                view: ViewOptions::default(),
            }
        }

        /// Builds a renderer from a JSON config (see [`RenderSettings::from_config`]).
        pub fn from_config(config: &MemoirConfig) -> Self {
            Self::new(PageRenderer::new(RenderSettings::from_config(config)))
        }

        pub fn with_view(mut self, view: ViewOptions) -> Self {
            self.view = view;
            self
        }

        pub fn with_svg_options(mut self, svg: SvgRenderOptions) -> Self {
            self.svg = svg;
            self
        }

        pub fn page_renderer(&self) -> &PageRenderer {
            &self.renderer
        }

        pub fn layout_book(&self, book: &Book) -> Vec<RenderedPage> {
            self.renderer.render_book(book, self.view)
        }

        /// Synchronous whole-book SVG render (executor-free).
        pub fn render_book_svg_sync(&self, book: &Book) -> String {
            let pages = self.layout_book(book);
            memoir_render::svg::render_book_svg(&pages, book.theme, &self.svg)
        }

        pub async fn render_book_svg(&self, book: &Book) -> String {
            self.render_book_svg_sync(book)
        }

        /// Synchronous single-page SVG render (executor-free).
        pub fn render_page_svg_sync(
            &self,
            book: &Book,
            chapter_id: &str,
            page_id: &str,
        ) -> Result<String> {
            let page = self
                .renderer
                .render_book_page(book, chapter_id, page_id, self.view)?;
            Ok(memoir_render::svg::render_page_svg(&page, &self.svg))
        }

        pub async fn render_page_svg(
            &self,
            book: &Book,
            chapter_id: &str,
            page_id: &str,
        ) -> Result<String> {
            self.render_page_svg_sync(book, chapter_id, page_id)
        }

        /// Decodes a book snapshot and renders it as one SVG document.
        pub fn render_snapshot_svg_sync(&self, json: &str) -> Result<String> {
            let book = memoir_render::book_from_json(json)?;
            Ok(self.render_book_svg_sync(&book))
        }

        /// Loads a stored book and renders it. `Ok(None)` when no book has that id.
        pub fn render_stored_book_svg_sync(
            &self,
            service: &impl BookService,
            book_id: &str,
        ) -> Result<Option<String>> {
            let Some(book) = service.get_book(book_id)? else {
                return Ok(None);
            };
            Ok(Some(self.render_book_svg_sync(&book)))
        }
    }
}
