use memoir_core::LayoutKind;
use rustc_hash::FxHashMap;

use crate::layouts::{self, LayoutRenderFn};

/// Maps layout kinds to their renderers. Owned by the page renderer and never mutated once
/// rendering starts.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    renderers: FxHashMap<LayoutKind, LayoutRenderFn>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: LayoutKind, renderer: LayoutRenderFn) {
        self.renderers.insert(kind, renderer);
    }

    pub fn get(&self, kind: LayoutKind) -> Option<LayoutRenderFn> {
        self.renderers.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn with_default_layouts() -> Self {
        let mut reg = Self::new();

        reg.insert(LayoutKind::Single, layouts::single::layout_single);
        reg.insert(LayoutKind::Grid, layouts::grid::layout_grid);
        reg.insert(LayoutKind::Collage, layouts::collage::layout_collage);
        reg.insert(LayoutKind::Cover, layouts::cover::layout_cover);
        reg.insert(LayoutKind::Magazine, layouts::magazine::layout_magazine);
        reg.insert(LayoutKind::Journal, layouts::journal::layout_journal);

        reg
    }

    /// Resolves a stored layout tag. Unknown tags, and kinds this registry has no renderer
    /// for, resolve to the single-photo layout.
    pub fn resolve(&self, tag: &str) -> (LayoutKind, LayoutRenderFn) {
        let known = LayoutKind::from_tag(tag);
        if let Some(kind) = known {
            if let Some(renderer) = self.get(kind) {
                return (kind, renderer);
            }
        }
        tracing::debug!(tag, known = known.is_some(), "layout not registered; using single");
        let renderer = self
            .get(LayoutKind::Single)
            .unwrap_or(layouts::single::layout_single);
        (LayoutKind::Single, renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_kind() {
        let reg = LayoutRegistry::with_default_layouts();
        assert_eq!(reg.len(), LayoutKind::ALL.len());
        for kind in LayoutKind::ALL {
            assert_eq!(reg.resolve(kind.as_str()).0, kind);
        }
    }

    #[test]
    fn unknown_tags_fall_back_to_single() {
        let reg = LayoutRegistry::with_default_layouts();
        assert_eq!(reg.resolve("polaroid").0, LayoutKind::Single);
        assert_eq!(reg.resolve("").0, LayoutKind::Single);
    }

    #[test]
    fn missing_renderer_falls_back_to_single() {
        let mut reg = LayoutRegistry::new();
        reg.insert(LayoutKind::Grid, layouts::grid::layout_grid);
        assert_eq!(reg.resolve("journal").0, LayoutKind::Single);
        assert_eq!(reg.resolve("grid").0, LayoutKind::Grid);
        assert!(LayoutRegistry::new().is_empty());
    }
}
