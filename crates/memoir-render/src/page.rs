use std::sync::Arc;

use memoir_core::{Book, Page, Theme};

use crate::capacity::select_photos;
use crate::layouts::{ChapterInfo, LayoutInput};
use crate::model::{LayerKind, PageLayer, Rect, RenderedPage};
use crate::registry::LayoutRegistry;
use crate::scale::{ScaleMode, resolve_scale};
use crate::settings::RenderSettings;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use crate::units::{MM_TO_PX, SAFE_ZONE_MM, mm_to_px, page_size_or_default};
use crate::{Error, Result};

pub const Z_TEXTURE: i32 = 1;
pub const Z_CONTENT: i32 = 2;
pub const Z_FOOTER_ID: i32 = 3;
pub const Z_SPINE: i32 = 10;
pub const Z_OVERLAY: i32 = 100;

/// Width of the binding shadow along the spine edge.
pub const SPINE_SHADOW_MM: f64 = 12.7;

/// Gap between the page foot and the centered footer id (24 CSS px).
pub const FOOTER_OFFSET_MM: f64 = 24.0 / MM_TO_PX;
const FOOTER_HEIGHT_MM: f64 = 3.0;

/// Stroke of the hairline border drawn around the whole page (0.5 CSS px).
pub const EDGE_BORDER_MM: f64 = 0.5 / MM_TO_PX;

/// How the page is shown on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewOptions {
    pub scale: ScaleMode,
    /// Measured preview container in CSS pixels; required for a meaningful auto scale.
    pub container: Option<(f64, f64)>,
}

impl ViewOptions {
    pub fn manual(scale: f64) -> Self {
        Self {
            scale: ScaleMode::Manual(scale),
            container: None,
        }
    }

    pub fn auto(container_width: f64, container_height: f64) -> Self {
        Self {
            scale: ScaleMode::Auto,
            container: Some((container_width, container_height)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageRequest<'a> {
    pub page: &'a Page,
    pub chapter: ChapterInfo,
    /// Stored page-size key; unknown keys render as A4.
    pub page_size: &'a str,
    pub theme: Theme,
    pub view: ViewOptions,
}

/// Footer label: the first four characters of the page id, upper-cased.
pub fn footer_label(page_id: &str) -> String {
    page_id.chars().take(4).collect::<String>().to_uppercase()
}

#[derive(Clone)]
pub struct PageRenderer {
    registry: LayoutRegistry,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    settings: RenderSettings,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl PageRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            registry: LayoutRegistry::with_default_layouts(),
            measurer: Arc::new(DeterministicTextMeasurer::default()),
            settings,
        }
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn with_registry(mut self, registry: LayoutRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    pub fn render(&self, request: &PageRequest<'_>) -> RenderedPage {
        let page = request.page;
        let size = page_size_or_default(request.page_size);
        let frame = Rect::new(0.0, 0.0, size.width_mm, size.height_mm);

        let (kind, renderer) = self.registry.resolve(&page.layout);
        let selection = select_photos(kind, &page.photos);
        if selection.overflow_count() > 0 {
            tracing::debug!(
                page = %page.id,
                layout = kind.as_str(),
                hidden = selection.overflow_count(),
                "photos exceed layout capacity"
            );
        }

        let input = LayoutInput {
            page_id: &page.id,
            content: &page.content,
            photos: selection.shown,
            total_photos: selection.total,
            chapter: &request.chapter,
            frame,
            measurer: self.measurer.as_ref(),
            settings: &self.settings,
        };
        let content = renderer(&input);

        let scale = resolve_scale(
            request.view.scale,
            request.view.container,
            &size,
            self.settings.preview_padding_px,
        );

        RenderedPage {
            page_id: page.id.clone(),
            requested_layout: page.layout.clone(),
            layout_kind: kind,
            theme: request.theme,
            page_size: size,
            scale,
            display_width_px: mm_to_px(size.width_mm) * scale,
            display_height_px: mm_to_px(size.height_mm) * scale,
            layers: self.layers(&page.id, frame),
            content,
            overflow: selection.overflow(&page.photos),
        }
    }

    fn layers(&self, page_id: &str, frame: Rect) -> Vec<PageLayer> {
        let mut layers = Vec::with_capacity(6);
        if self.settings.show_texture {
            layers.push(PageLayer {
                kind: LayerKind::PaperTexture,
                z_index: Z_TEXTURE,
                rect: frame,
            });
        }
        layers.push(PageLayer {
            kind: LayerKind::Content,
            z_index: Z_CONTENT,
            rect: frame,
        });
        layers.push(PageLayer {
            kind: LayerKind::FooterId {
                label: footer_label(page_id),
            },
            z_index: Z_FOOTER_ID,
            rect: Rect::new(
                frame.x,
                frame.bottom() - FOOTER_OFFSET_MM - FOOTER_HEIGHT_MM,
                frame.width,
                FOOTER_HEIGHT_MM,
            ),
        });
        layers.push(PageLayer {
            kind: LayerKind::SpineShadow {
                width_mm: SPINE_SHADOW_MM,
            },
            z_index: Z_SPINE,
            rect: Rect::new(frame.x, frame.y, SPINE_SHADOW_MM, frame.height),
        });
        layers.push(PageLayer {
            kind: LayerKind::EdgeHighlight,
            z_index: Z_OVERLAY,
            rect: frame,
        });
        if self.settings.show_safe_zone {
            layers.push(PageLayer {
                kind: LayerKind::SafeZoneGuide {
                    inset_mm: SAFE_ZONE_MM,
                },
                z_index: Z_OVERLAY,
                rect: frame.inset(SAFE_ZONE_MM),
            });
        }
        layers.sort_by_key(|l| l.z_index);
        layers
    }

    /// Renders every page of `book` in reading order.
    pub fn render_book(&self, book: &Book, view: ViewOptions) -> Vec<RenderedPage> {
        book.pages()
            .map(|(index, chapter, page)| {
                self.render(&PageRequest {
                    page,
                    chapter: ChapterInfo::new(&chapter.title, &chapter.date, index),
                    page_size: &book.page_size,
                    theme: book.theme,
                    view,
                })
            })
            .collect()
    }

    pub fn render_book_page(
        &self,
        book: &Book,
        chapter_id: &str,
        page_id: &str,
        view: ViewOptions,
    ) -> Result<RenderedPage> {
        let (index, chapter) = book
            .chapters
            .iter()
            .enumerate()
            .find(|(_, c)| c.id == chapter_id)
            .ok_or_else(|| Error::ChapterNotFound {
                chapter_id: chapter_id.to_string(),
            })?;
        let page = chapter.page(page_id).ok_or_else(|| Error::PageNotFound {
            chapter_id: chapter_id.to_string(),
            page_id: page_id.to_string(),
        })?;
        Ok(self.render(&PageRequest {
            page,
            chapter: ChapterInfo::new(&chapter.title, &chapter.date, index),
            page_size: &book.page_size,
            theme: book.theme,
            view,
        }))
    }
}
