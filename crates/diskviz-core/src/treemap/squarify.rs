/// Squarified tiling (Bruls, Huizing, van Wijk) over plain `f64` bounds.
///
/// Rows are grown greedily while the worst aspect ratio in the row keeps
/// improving, then laid out along the shorter side of the remaining
/// space. The target ratio is the golden ratio rather than 1, which gives
/// slightly wider rows and more readable labels.

/// Golden ratio, the default target aspect ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Axis-aligned rectangle, `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bounds {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Move each edge inward by the given amount (negative grows).
    ///
    /// An inverted axis collapses to its midpoint, kept inside the
    /// original interval so a one-sided inset never escapes `self`.
    pub fn inset(self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let (x0, x1) = collapse(self.x0 + left, self.x1 - right, self.x0, self.x1);
        let (y0, y1) = collapse(self.y0 + top, self.y1 - bottom, self.y0, self.y1);
        Self { x0, y0, x1, y1 }
    }

    /// Intersect with `outer`. Disjoint axes end up on `outer`'s nearest
    /// edge with zero extent.
    pub fn clamp_within(self, outer: Bounds) -> Self {
        let cx = |v: f64| v.max(outer.x0).min(outer.x1);
        let cy = |v: f64| v.max(outer.y0).min(outer.y1);
        Self {
            x0: cx(self.x0),
            y0: cy(self.y0),
            x1: cx(self.x1),
            y1: cy(self.y1),
        }
    }
}

#[inline]
fn collapse(lo: f64, hi: f64, min: f64, max: f64) -> (f64, f64) {
    if hi < lo {
        let mid = ((lo + hi) / 2.0).max(min).min(max);
        (mid, mid)
    } else {
        (lo, hi)
    }
}

/// Tile `bounds` with one rectangle per value, in input order.
///
/// Values are expected to be sorted descending for good aspect ratios
/// but any order is valid. Zero values, zero-sized bounds and an all-zero
/// input produce zero-area rectangles rather than NaN coordinates.
pub fn squarify(values: &[f64], bounds: Bounds, ratio: f64) -> Vec<Bounds> {
    let mut out = Vec::with_capacity(values.len());
    let Bounds {
        mut x0,
        mut y0,
        x1,
        y1,
    } = bounds;
    let mut remaining: f64 = values.iter().sum();
    let n = values.len();
    let mut i0 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        if !(dx > 0.0 && dy > 0.0 && remaining > 0.0) {
            let rest = &values[i0..];
            let total: f64 = rest.iter().sum();
            let tail = Bounds::new(x0, y0, x1, y1);
            if dx < dy {
                dice(rest, total, tail, &mut out);
            } else {
                slice(rest, total, tail, &mut out);
            }
            break;
        }

        // First non-empty value starts the row.
        let mut i1 = i0;
        let mut sum = values[i1];
        i1 += 1;
        while sum <= 0.0 && i1 < n {
            sum = values[i1];
            i1 += 1;
        }

        let mut min_v = sum;
        let mut max_v = sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let beta = sum * sum * alpha;
        let mut min_ratio = (max_v / beta).max(beta / min_v);

        while i1 < n {
            let v = values[i1];
            let grown = sum + v;
            let lo = min_v.min(v);
            let hi = max_v.max(v);
            let beta = grown * grown * alpha;
            let candidate = (hi / beta).max(beta / lo);
            if candidate > min_ratio {
                break;
            }
            sum = grown;
            min_v = lo;
            max_v = hi;
            min_ratio = candidate;
            i1 += 1;
        }

        let row = &values[i0..i1];
        if dx < dy {
            let y = y0 + dy * sum / remaining;
            dice(row, sum, Bounds::new(x0, y0, x1, y), &mut out);
            y0 = y;
        } else {
            let x = x0 + dx * sum / remaining;
            slice(row, sum, Bounds::new(x0, y0, x, y1), &mut out);
            x0 = x;
        }
        remaining -= sum;
        i0 = i1;
    }

    out
}

/// Split horizontally: each value gets a full-height column.
fn dice(row: &[f64], total: f64, b: Bounds, out: &mut Vec<Bounds>) {
    let k = if total > 0.0 { b.width() / total } else { 0.0 };
    let mut x = b.x0;
    for &v in row {
        let next = x + v * k;
        out.push(Bounds::new(x, b.y0, next, b.y1));
        x = next;
    }
}

/// Split vertically: each value gets a full-width band.
fn slice(row: &[f64], total: f64, b: Bounds, out: &mut Vec<Bounds>) {
    let k = if total > 0.0 { b.height() / total } else { 0.0 };
    let mut y = b.y0;
    for &v in row {
        let next = y + v * k;
        out.push(Bounds::new(b.x0, y, b.x1, next));
        y = next;
    }
}
