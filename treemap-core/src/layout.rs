use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::hierarchy::{Hierarchy, NodeId};

/// Golden ratio; the target aspect ratio the squarified layout aims for.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Axis-aligned rectangle in canvas units. `x1 >= x0` and `y1 >= y0` hold for
/// every rectangle produced by this module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    /// Shrink by `d` on every side (grow when negative). A side pair that
    /// would cross collapses onto its midpoint.
    pub fn inset(&self, d: f64) -> Rect {
        let (mut x0, mut y0, mut x1, mut y1) = (self.x0 + d, self.y0 + d, self.x1 - d, self.y1 - d);
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Rect { x0, y0, x1, y1 }
    }

    /// Area shared with `other`; zero when they only touch.
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.x1.min(other.x1) - self.x0.max(other.x0);
        let h = self.y1.min(other.y1) - self.y0.max(other.y0);
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }
}

/// Split `rect` among `values` with the squarified algorithm.
///
/// Values are consumed in the given order and grouped greedily into rows laid
/// along the shorter side; a row stops growing as soon as adding the next
/// value would worsen its worst aspect ratio relative to `ratio`. Returns one
/// rectangle per value. Zero-valued entries get zero-area rectangles, and an
/// all-zero input or a zero-size rectangle never produces NaN.
pub fn squarify(values: &[f64], rect: Rect, ratio: f64) -> Vec<Rect> {
    let n = values.len();
    let mut out = vec![Rect::default(); n];
    let Rect {
        mut x0,
        mut y0,
        x1,
        y1,
    } = rect;
    let mut remaining: f64 = values.iter().sum();
    let mut i0 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Leading zeros ride along with the first non-zero value.
        let mut i1 = i0;
        let mut sum = values[i1];
        i1 += 1;
        while sum == 0.0 && i1 < n {
            sum = values[i1];
            i1 += 1;
        }

        let mut min_value = sum;
        let mut max_value = sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * ratio);
        let mut min_ratio = worst_ratio(sum, min_value, max_value, alpha);

        while i1 < n {
            let v = values[i1];
            let lo = min_value.min(v);
            let hi = max_value.max(v);
            let r = worst_ratio(sum + v, lo, hi, alpha);
            if r > min_ratio {
                break;
            }
            sum += v;
            min_value = lo;
            max_value = hi;
            min_ratio = r;
            i1 += 1;
        }

        let last_row = i1 == n;
        if dx < dy {
            let y2 = if last_row || remaining == 0.0 {
                y1
            } else {
                (y0 + dy * sum / remaining).min(y1)
            };
            dice(&values[i0..i1], sum, Rect::new(x0, y0, x1, y2), &mut out[i0..i1]);
            y0 = y2;
        } else {
            let x2 = if last_row || remaining == 0.0 {
                x1
            } else {
                (x0 + dx * sum / remaining).min(x1)
            };
            slice(&values[i0..i1], sum, Rect::new(x0, y0, x2, y1), &mut out[i0..i1]);
            x0 = x2;
        }

        remaining -= sum;
        i0 = i1;
    }
    out
}

fn worst_ratio(sum: f64, min_value: f64, max_value: f64, alpha: f64) -> f64 {
    let beta = sum * sum * alpha;
    (max_value / beta).max(beta / min_value)
}

// Lay a row left to right across the full band.
fn dice(values: &[f64], row_value: f64, band: Rect, out: &mut [Rect]) {
    let k = if row_value != 0.0 {
        band.width() / row_value
    } else {
        0.0
    };
    let mut x = band.x0;
    let last = values.len().saturating_sub(1);
    for (i, v) in values.iter().enumerate() {
        let next = if i == last && k != 0.0 { band.x1 } else { x + v * k };
        out[i] = Rect::new(x, band.y0, next, band.y1);
        x = next;
    }
}

// Lay a row top to bottom down the full band.
fn slice(values: &[f64], row_value: f64, band: Rect, out: &mut [Rect]) {
    let k = if row_value != 0.0 {
        band.height() / row_value
    } else {
        0.0
    };
    let mut y = band.y0;
    let last = values.len().saturating_sub(1);
    for (i, v) in values.iter().enumerate() {
        let next = if i == last && k != 0.0 { band.y1 } else { y + v * k };
        out[i] = Rect::new(band.x0, y, band.x1, next);
        y = next;
    }
}

/// Geometry for every node of a hierarchy.
#[derive(Clone, Debug)]
pub struct TreemapLayout {
    rects: Vec<Rect>,
    leaves: Vec<NodeId>,
    width: f64,
    height: f64,
}

impl TreemapLayout {
    /// Lay `hierarchy` out over a `width` x `height` canvas.
    ///
    /// `padding` separates siblings; the canvas perimeter stays flush. Every
    /// child is inset by `padding / 2` after its parent's inner area was
    /// grown by the same amount.
    pub fn compute(hierarchy: &Hierarchy, width: f64, height: f64, padding: f64) -> Self {
        let width = sanitize(width);
        let height = sanitize(height);
        let half = sanitize(padding) / 2.0;

        let mut rects = vec![Rect::default(); hierarchy.len()];
        rects[0] = Rect::new(0.0, 0.0, width, height);

        for id in hierarchy.ids() {
            let node = hierarchy.node(id);
            let own_pad = if node.depth == 0 { 0.0 } else { half };
            let r = rects[id.0].inset(own_pad);
            rects[id.0] = r;

            let children = hierarchy.children(id);
            if children.is_empty() {
                continue;
            }
            let inner = r.inset(-half);
            let values: Vec<f64> = children
                .iter()
                .map(|c| hierarchy.node(*c).aggregate_value)
                .collect();
            for (child, cr) in children.iter().zip(squarify(&values, inner, PHI)) {
                rects[child.0] = cr;
            }
        }

        let leaves: Vec<NodeId> = hierarchy.leaves().collect();
        debug!(width, height, tiles = leaves.len(), "computed treemap layout");
        TreemapLayout {
            rects,
            leaves,
            width,
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Rectangle of any node, groups included.
    pub fn node_rect(&self, id: NodeId) -> Rect {
        self.rects[id.0]
    }

    /// Tile geometry of a leaf; `None` for groups.
    pub fn tile(&self, id: NodeId) -> Option<Rect> {
        self.leaves.binary_search(&id).ok().map(|_| self.rects[id.0])
    }

    /// Leaf tiles in dataset order.
    pub fn tiles(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.leaves.iter().map(|id| (*id, self.rects[id.0]))
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
