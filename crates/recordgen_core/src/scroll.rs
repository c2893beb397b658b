use crate::LoadController;

/// Distance from the viewport bottom at which the content end counts as visible.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 10.0;

/// Positions of the content end and the viewport end, measured in the same
/// units along the scroll axis (pixels, terminal lines, ...).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub content_bottom: f64,
    pub viewport_bottom: f64,
}

/// Turns viewport observations into next-page requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    threshold: f64,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl ScrollTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the end of the content is within the threshold of the viewport end.
    pub fn end_visible(&self, geometry: ViewportGeometry) -> bool {
        geometry.content_bottom <= geometry.viewport_bottom + self.threshold
    }

    /// Whether a next-page request should be issued for this observation.
    ///
    /// Repeated observations at the bottom are absorbed by `is_loading`
    /// until the pending page lands.
    pub fn evaluate(&self, geometry: ViewportGeometry, controller: &LoadController) -> bool {
        self.end_visible(geometry) && !controller.is_loading() && controller.has_more()
    }
}
