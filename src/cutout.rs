//! Pure cutout geometry: turns a focused-window rect into the even-odd
//! fill path that dims a surface everywhere except a per-corner-rounded
//! hole around the window.

use serde::{Deserialize, Serialize};

use crate::constants::EDGE_TOLERANCE;
use crate::geometry::{Point, Rect};

/// Input to [`compute`]. `hole_rect` is the focused-window rect already
/// translated into the surface's local coordinate space; it may lie partly
/// or fully outside `surface_bounds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutSpec {
    pub surface_bounds: Rect,
    pub hole_rect: Rect,
    /// Radius for corners that are not flush with a surface edge. Not
    /// clamped against the rect's dimensions; callers keep it sane relative
    /// to the rect or the path may self-intersect.
    pub radius: f64,
}

/// Resolved per-corner radii; `0.0` means a square corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

/// Backend-agnostic path element. `ArcTo` is a quarter arc tangent to the
/// two edges meeting at `corner`, ending at `end` (the CGPath tangent-arc
/// shape, which every 2D backend can reproduce).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    ArcTo { corner: Point, end: Point, radius: f64 },
    Close,
}

/// Fill rule the host must apply to a [`RoundedHole`]'s path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillRule {
    /// Overlapping closed sub-paths cancel, so the inner rounded rect
    /// renders as an unfilled hole in the outer rect.
    EvenOdd,
}

/// The dimming shape: the full surface rect plus an inner rounded-rect
/// sub-path, combined under [`FillRule::EvenOdd`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundedHole {
    /// The surface rect traced by the outer sub-path.
    pub surface_bounds: Rect,
    /// `hole_rect` clipped to the surface.
    pub cutout: Rect,
    /// The per-corner radii resolved by flush detection.
    pub radii: CornerRadii,
    /// Both closed sub-paths, in order.
    pub ops: Vec<PathOp>,
    pub fill_rule: FillRule,
}

/// Compute the dimming path for `spec`, or `None` when the hole rect does
/// not intersect the surface (the caller then dims the whole surface).
pub fn compute(spec: &CutoutSpec) -> Option<RoundedHole> {
    let cutout = spec.hole_rect.intersection(&spec.surface_bounds)?;
    let radii = resolve_corners(&cutout, &spec.surface_bounds, spec.radius);

    let mut ops = rect_ops(&spec.surface_bounds);
    ops.extend(rounded_rect_ops(&cutout, &radii));

    Some(RoundedHole {
        surface_bounds: spec.surface_bounds,
        cutout,
        radii,
        ops,
        fill_rule: FillRule::EvenOdd,
    })
}

/// Decide square-vs-rounded per corner. A window edge that sits on the
/// screen boundary must not show a curve bleeding past it, so a corner is
/// forced square when the cutout is flush (within [`EDGE_TOLERANCE`]) with
/// the surface edge on either of its two sides.
fn resolve_corners(cutout: &Rect, bounds: &Rect, radius: f64) -> CornerRadii {
    let top_flush = cutout.max_y() >= bounds.max_y() - EDGE_TOLERANCE;
    let bottom_flush = cutout.min_y() <= bounds.min_y() + EDGE_TOLERANCE;
    let left_flush = cutout.min_x() <= bounds.min_x() + EDGE_TOLERANCE;
    let right_flush = cutout.max_x() >= bounds.max_x() - EDGE_TOLERANCE;

    let corner = |flush: bool| if flush { 0.0 } else { radius };

    CornerRadii {
        top_left: corner(top_flush || left_flush),
        top_right: corner(top_flush || right_flush),
        bottom_left: corner(bottom_flush || left_flush),
        bottom_right: corner(bottom_flush || right_flush),
    }
}

fn rect_ops(rect: &Rect) -> Vec<PathOp> {
    vec![
        PathOp::MoveTo(Point::new(rect.min_x(), rect.min_y())),
        PathOp::LineTo(Point::new(rect.max_x(), rect.min_y())),
        PathOp::LineTo(Point::new(rect.max_x(), rect.max_y())),
        PathOp::LineTo(Point::new(rect.min_x(), rect.max_y())),
        PathOp::Close,
    ]
}

/// Trace `rect` with independent per-corner radii: bottom-left first, then
/// bottom-right, top-right, top-left (counterclockwise with Y up). A zero
/// radius degenerates to a straight line join into the corner.
fn rounded_rect_ops(rect: &Rect, radii: &CornerRadii) -> Vec<PathOp> {
    let mut ops = Vec::with_capacity(9);

    ops.push(PathOp::MoveTo(Point::new(
        rect.min_x(),
        rect.min_y() + radii.bottom_left,
    )));
    push_corner(
        &mut ops,
        Point::new(rect.min_x(), rect.min_y()),
        Point::new(rect.min_x() + radii.bottom_left, rect.min_y()),
        radii.bottom_left,
    );

    ops.push(PathOp::LineTo(Point::new(
        rect.max_x() - radii.bottom_right,
        rect.min_y(),
    )));
    push_corner(
        &mut ops,
        Point::new(rect.max_x(), rect.min_y()),
        Point::new(rect.max_x(), rect.min_y() + radii.bottom_right),
        radii.bottom_right,
    );

    ops.push(PathOp::LineTo(Point::new(
        rect.max_x(),
        rect.max_y() - radii.top_right,
    )));
    push_corner(
        &mut ops,
        Point::new(rect.max_x(), rect.max_y()),
        Point::new(rect.max_x() - radii.top_right, rect.max_y()),
        radii.top_right,
    );

    ops.push(PathOp::LineTo(Point::new(
        rect.min_x() + radii.top_left,
        rect.max_y(),
    )));
    push_corner(
        &mut ops,
        Point::new(rect.min_x(), rect.max_y()),
        Point::new(rect.min_x(), rect.max_y() - radii.top_left),
        radii.top_left,
    );

    ops.push(PathOp::Close);
    ops
}

fn push_corner(ops: &mut Vec<PathOp>, corner: Point, end: Point, radius: f64) {
    if radius > 0.0 {
        ops.push(PathOp::ArcTo { corner, end, radius });
    } else {
        ops.push(PathOp::LineTo(corner));
    }
}
