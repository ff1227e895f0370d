//! Progress-bar geometry.
//!
//! Maps a pointer coordinate onto a normalized play position and back onto
//! the fill element's trailing inset. None of these functions clamp: a
//! pointer past either end of the bar yields a position outside `[0, 1]`,
//! and it is up to the caller to clamp (for painting) or keep the raw value
//! (for event payloads).

/// Horizontal placement of a progress bar in pointer coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    /// Left edge of the bar
    pub origin_x: f32,
    /// Bar width in pixels
    pub width: f32,
}

impl TrackGeometry {
    pub fn new(origin_x: f32, width: f32) -> Self {
        Self { origin_x, width }
    }

    /// See [`pointer_to_normalized`].
    pub fn normalize(&self, pointer_x: Option<f32>) -> f32 {
        pointer_to_normalized(pointer_x, self.origin_x, self.width)
    }

    /// See [`normalized_to_fill_offset`].
    pub fn fill_offset(&self, normalized: f32) -> f32 {
        normalized_to_fill_offset(normalized, self.width)
    }

    /// See [`painted_fill_offset`].
    pub fn painted_offset(&self, normalized: f32) -> f32 {
        painted_fill_offset(normalized, self.width)
    }
}

/// Inverse-lerp a pointer x coordinate over `[origin, origin + width]` to `[0, 1]`.
///
/// `pointer_x` is `None` when the pointer could not be resolved into the bar's
/// coordinate space. That case, a non-finite coordinate, and a non-positive
/// width all fall back to `0.0` (start of the bar) so interaction never fails.
pub fn pointer_to_normalized(pointer_x: Option<f32>, bar_origin_x: f32, bar_width: f32) -> f32 {
    let Some(x) = pointer_x.filter(|x| x.is_finite()) else {
        return 0.0;
    };

    if !(bar_width > 0.0) || !bar_origin_x.is_finite() || !bar_width.is_finite() {
        return 0.0;
    }

    (x - bar_origin_x) / bar_width
}

/// Trailing-edge inset of the fill: `-(1 - normalized) * bar_width`.
///
/// `normalized > 1` gives a positive inset (overshoot); `normalized < 0`
/// gives an inset larger than the bar.
pub fn normalized_to_fill_offset(normalized: f32, bar_width: f32) -> f32 {
    -(1.0 - normalized) * bar_width
}

/// Fill offset for painting, with the position clamped to `[0, 1]`.
pub fn painted_fill_offset(normalized: f32, bar_width: f32) -> f32 {
    let clamped = if normalized.is_nan() {
        0.0
    } else {
        normalized.clamp(0.0, 1.0)
    };
    normalized_to_fill_offset(clamped, bar_width)
}
