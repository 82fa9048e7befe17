//! Per-surface overlay model: owns the dim opacity and the latest focus
//! snapshot, and turns them into a drawable scene. Rendering the scene is
//! the host's job; this module only decides what to fill.

use serde::Serialize;

use crate::constants::DEFAULT_OPACITY;
use crate::cutout::{self, CutoutSpec, RoundedHole};
use crate::geometry::Rect;
use crate::observer::FocusedWindowInfo;

/// What the host should fill, in surface-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Fill {
    /// Dim the whole surface: no focused window, or its rect does not
    /// intersect this surface.
    Everything,
    /// Dim everything except the rounded hole.
    WithHole(RoundedHole),
}

/// One frame's worth of drawing instructions for a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub opacity: f64,
    pub fill: Fill,
}

/// Model for one dimming surface (typically one per screen). `frame` is the
/// surface's rect in global coordinates; the model translates focus
/// snapshots into the surface's local space before computing the cutout.
pub struct OverlayModel {
    frame: Rect,
    opacity: f64,
    focused: Option<FocusedWindowInfo>,
}

impl OverlayModel {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            opacity: DEFAULT_OPACITY,
            focused: None,
        }
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Store the newest focus snapshot. The host redraws with [`scene`]
    /// afterwards.
    ///
    /// [`scene`]: OverlayModel::scene
    pub fn update(&mut self, focused: Option<FocusedWindowInfo>) {
        self.focused = focused;
    }

    /// The current drawing instructions. Degrades to [`Fill::Everything`]
    /// whenever there is no usable cutout.
    pub fn scene(&self) -> Scene {
        let hole = self.focused.as_ref().and_then(|info| {
            let local = info
                .rect
                .offset_by(-self.frame.min_x(), -self.frame.min_y());
            let bounds = Rect::new(0.0, 0.0, self.frame.width(), self.frame.height());
            cutout::compute(&CutoutSpec {
                surface_bounds: bounds,
                hole_rect: local,
                radius: info.corner_radius,
            })
        });

        Scene {
            opacity: self.opacity,
            fill: hole.map_or(Fill::Everything, Fill::WithHole),
        }
    }
}
