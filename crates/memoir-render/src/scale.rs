//! Display scale for on-screen previews.
//!
//! Container measurements may arrive out of order (resize observers, deferred layout). The
//! [`ScaleController`] hands out a ticket per measurement and only applies the result of the
//! newest ticket, so a late, stale measurement can never overwrite a fresher one.

use serde::{Deserialize, Serialize};

use crate::units::{MM_TO_PX, PageSize};

pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 1.5;
pub const DEFAULT_SCALE: f64 = 0.4;
pub const ZOOM_STEP: f64 = 0.1;
pub const DEFAULT_PREVIEW_PADDING_PX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "scale", rename_all = "camelCase")]
pub enum ScaleMode {
    /// Fit the page inside the measured container.
    Auto,
    /// Fixed user-chosen factor, clamped into `[MIN_SCALE, MAX_SCALE]`.
    Manual(f64),
}

impl Default for ScaleMode {
    fn default() -> Self {
        ScaleMode::Manual(DEFAULT_SCALE)
    }
}

pub fn clamp_manual(scale: f64) -> f64 {
    if scale.is_nan() {
        return DEFAULT_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Largest scale at which the page fits the container after `padding_px` is subtracted
/// from each dimension. Never negative.
pub fn fit_scale(container_width: f64, container_height: f64, page: &PageSize, padding_px: f64) -> f64 {
    let sx = (container_width - padding_px) / (page.width_mm * MM_TO_PX);
    let sy = (container_height - padding_px) / (page.height_mm * MM_TO_PX);
    let s = sx.min(sy);
    if s.is_finite() { s.max(0.0) } else { 0.0 }
}

/// Scale used for a render request: manual factors are clamped, auto requires a container.
pub fn resolve_scale(
    mode: ScaleMode,
    container: Option<(f64, f64)>,
    page: &PageSize,
    padding_px: f64,
) -> f64 {
    match mode {
        ScaleMode::Manual(s) => clamp_manual(s),
        ScaleMode::Auto => match container {
            Some((w, h)) => fit_scale(w, h, page, padding_px),
            None => DEFAULT_SCALE,
        },
    }
}

pub fn zoom_in(scale: f64) -> f64 {
    clamp_manual(scale + ZOOM_STEP)
}

pub fn zoom_out(scale: f64) -> f64 {
    clamp_manual(scale - ZOOM_STEP)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleTicket(u64);

/// Tracks the applied preview scale for one page view.
#[derive(Debug, Clone)]
pub struct ScaleController {
    mode: ScaleMode,
    page: PageSize,
    padding_px: f64,
    scale: f64,
    issued: u64,
    last_container: Option<(f64, f64)>,
    attached: bool,
}

impl ScaleController {
    pub fn new(page: PageSize, mode: ScaleMode) -> Self {
        Self::with_padding(page, mode, DEFAULT_PREVIEW_PADDING_PX)
    }

    pub fn with_padding(page: PageSize, mode: ScaleMode, padding_px: f64) -> Self {
        Self {
            mode,
            page,
            padding_px,
            scale: resolve_scale(mode, None, &page, padding_px),
            issued: 0,
            last_container: None,
            attached: true,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    pub fn page_size(&self) -> PageSize {
        self.page
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Starts a container measurement. Issuing a ticket supersedes all earlier ones.
    pub fn begin_measure(&mut self) -> ScaleTicket {
        self.issued += 1;
        ScaleTicket(self.issued)
    }

    /// Applies a finished measurement. Returns `false` when the ticket is stale or the
    /// controller has been detached; the current scale is then left untouched.
    pub fn complete_measure(&mut self, ticket: ScaleTicket, width: f64, height: f64) -> bool {
        if !self.attached {
            tracing::trace!(ticket = ticket.0, "scale controller detached; dropping measurement");
            return false;
        }
        if ticket.0 != self.issued {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "ignoring stale scale measurement"
            );
            return false;
        }
        self.last_container = Some((width, height));
        self.recompute();
        true
    }

    pub fn set_mode(&mut self, mode: ScaleMode) {
        if !self.attached {
            return;
        }
        self.mode = mode;
        self.recompute();
    }

    /// Switches the physical page size. Outstanding measurements were taken against the old
    /// page and are invalidated.
    pub fn set_page_size(&mut self, page: PageSize) {
        if !self.attached {
            return;
        }
        self.page = page;
        self.issued += 1;
        self.recompute();
    }

    pub fn zoom_in(&mut self) {
        self.set_mode(ScaleMode::Manual(zoom_in(self.scale)));
    }

    pub fn zoom_out(&mut self) {
        self.set_mode(ScaleMode::Manual(zoom_out(self.scale)));
    }

    /// Stops all further updates (the view went away).
    pub fn detach(&mut self) {
        self.attached = false;
    }

    fn recompute(&mut self) {
        if self.mode == ScaleMode::Auto && self.last_container.is_none() {
            return;
        }
        self.scale = resolve_scale(self.mode, self.last_container, &self.page, self.padding_px);
    }
}
