/// Zoom and pan for the graph view.
///
/// An affine `screen = world * k + (x, y)` transform applied at render time.
/// Simulated coordinates are never touched.

/// Allowed zoom range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.4,
            max_scale: 3.5,
        }
    }
}

impl ZoomConfig {
    pub fn clamp(&self, k: f64) -> f64 {
        k.clamp(self.min_scale, self.max_scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// World → screen.
    #[inline]
    pub fn apply(&self, wx: f64, wy: f64) -> (f64, f64) {
        (wx * self.k + self.x, wy * self.k + self.y)
    }

    /// Screen → world.
    #[inline]
    pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx - self.x) / self.k, (sy - self.y) / self.k)
    }

    /// Scale by `factor`, keeping the world point under `(ax, ay)` fixed.
    pub fn zoom_about(&mut self, ax: f64, ay: f64, factor: f64, limits: &ZoomConfig) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let (wx, wy) = self.invert(ax, ay);
        self.k = limits.clamp(self.k * factor);
        self.x = ax - wx * self.k;
        self.y = ay - wy * self.k;
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut view = ViewTransform::default();
        view.pan(15.0, -5.0);
        let anchor = (200.0, 120.0);
        let world = view.invert(anchor.0, anchor.1);
        view.zoom_about(anchor.0, anchor.1, 2.0, &ZoomConfig::default());
        let (sx, sy) = view.apply(world.0, world.1);
        assert_relative_eq!(sx, anchor.0, epsilon = 1e-9);
        assert_relative_eq!(sy, anchor.1, epsilon = 1e-9);
        assert_relative_eq!(view.k, 2.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let limits = ZoomConfig::default();
        let mut view = ViewTransform::default();
        view.zoom_about(0.0, 0.0, 100.0, &limits);
        assert_eq!(view.k, 3.5);
        view.zoom_about(0.0, 0.0, 0.0001, &limits);
        assert_eq!(view.k, 0.4);
        view.zoom_about(0.0, 0.0, f64::NAN, &limits);
        assert_eq!(view.k, 0.4);
    }

    #[test]
    fn test_apply_invert_are_inverse() {
        let view = ViewTransform {
            k: 1.7,
            x: -40.0,
            y: 12.5,
        };
        let (sx, sy) = view.apply(3.0, 4.0);
        let (wx, wy) = view.invert(sx, sy);
        assert_relative_eq!(wx, 3.0, epsilon = 1e-12);
        assert_relative_eq!(wy, 4.0, epsilon = 1e-12);
    }
}
