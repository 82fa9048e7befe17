/// Corner radius used when the window server cannot report one.
///
/// A server-reported radius of exactly 0 is also replaced by this value:
/// at this layer "explicitly square" is indistinguishable from "unknown".
pub const FALLBACK_CORNER_RADIUS: f64 = 10.0;

/// Distance (in surface units) within which a cutout edge counts as flush
/// with the surface edge, forcing the adjacent corners square.
pub const EDGE_TOLERANCE: f64 = 1.0;

/// Default dimming opacity of an overlay scene.
pub const DEFAULT_OPACITY: f64 = 0.4;
