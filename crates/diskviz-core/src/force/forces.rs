use super::SimNode;

/// Linear congruential generator used for jiggle, seeded so every run of
/// the simulation is reproducible.
#[derive(Debug, Clone)]
pub(super) struct Lcg(u64);

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    pub(super) fn new() -> Self {
        Self(1)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        self.0 = (Self::A * self.0 + Self::C) % Self::M;
        self.0 as f64 / Self::M as f64
    }

    /// Tiny random offset used to separate coincident points.
    pub(super) fn jiggle(&mut self) -> f64 {
        (self.next_f64() - 0.5) * 1e-6
    }
}

/// Resolved link: node indices plus precomputed bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    /// Share of the correction applied to the target. Nodes with more
    /// links move less.
    pub bias: f64,
}

impl Link {
    pub(super) fn resolve(pairs: &[(usize, usize)], node_count: usize) -> Vec<Link> {
        let mut degree = vec![0usize; node_count];
        for &(s, t) in pairs {
            degree[s] += 1;
            degree[t] += 1;
        }
        pairs
            .iter()
            .map(|&(source, target)| Link {
                source,
                target,
                bias: degree[source] as f64 / (degree[source] + degree[target]) as f64,
            })
            .collect()
    }
}

/// Pairwise inverse-distance charge. Negative strength repels.
pub(super) fn many_body(nodes: &mut [SimNode], strength: f64, alpha: f64, rng: &mut Lcg) {
    let n = nodes.len();
    for i in 0..n {
        let (xi, yi) = (nodes[i].x, nodes[i].y);
        let (mut dvx, mut dvy) = (0.0, 0.0);
        for (j, other) in nodes.iter().enumerate() {
            if i == j {
                continue;
            }
            let mut x = other.x - xi;
            let mut y = other.y - yi;
            let mut l = x * x + y * y;
            if x == 0.0 {
                x = rng.jiggle();
                l += x * x;
            }
            if y == 0.0 {
                y = rng.jiggle();
                l += y * y;
            }
            // Soften very close pairs instead of letting the force blow up.
            if l < 1.0 {
                l = l.sqrt();
            }
            let w = strength * alpha / l;
            dvx += x * w;
            dvy += y * w;
        }
        nodes[i].vx += dvx;
        nodes[i].vy += dvy;
    }
}

/// Translate every node so the centroid sits on `(cx, cy)`.
pub(super) fn center(nodes: &mut [SimNode], cx: f64, cy: f64) {
    if nodes.is_empty() {
        return;
    }
    let n = nodes.len() as f64;
    let sx = nodes.iter().map(|p| p.x).sum::<f64>() / n - cx;
    let sy = nodes.iter().map(|p| p.y).sum::<f64>() / n - cy;
    for node in nodes {
        node.x -= sx;
        node.y -= sy;
    }
}

/// Springs pulling linked nodes toward `distance`.
pub(super) fn link(
    nodes: &mut [SimNode],
    links: &[Link],
    distance: f64,
    strength: f64,
    alpha: f64,
    rng: &mut Lcg,
) {
    for link in links {
        let (s, t) = (&nodes[link.source], &nodes[link.target]);
        let mut x = t.x + t.vx - s.x - s.vx;
        let mut y = t.y + t.vy - s.y - s.vy;
        if x == 0.0 {
            x = rng.jiggle();
        }
        if y == 0.0 {
            y = rng.jiggle();
        }
        let l = (x * x + y * y).sqrt();
        let k = (l - distance) / l * alpha * strength;
        x *= k;
        y *= k;

        let target = &mut nodes[link.target];
        target.vx -= x * link.bias;
        target.vy -= y * link.bias;
        let source = &mut nodes[link.source];
        source.vx += x * (1.0 - link.bias);
        source.vy += y * (1.0 - link.bias);
    }
}

/// Push overlapping circles apart. Not scaled by alpha, so overlaps keep
/// resolving after the layout has cooled.
pub(super) fn collide(nodes: &mut [SimNode], padding: f64, strength: f64, rng: &mut Lcg) {
    let n = nodes.len();
    for i in 0..n {
        let xi = nodes[i].x + nodes[i].vx;
        let yi = nodes[i].y + nodes[i].vy;
        let ri = nodes[i].radius + padding;
        let ri2 = ri * ri;
        for j in (i + 1)..n {
            let rj = nodes[j].radius + padding;
            let r = ri + rj;
            let mut x = xi - nodes[j].x - nodes[j].vx;
            let mut y = yi - nodes[j].y - nodes[j].vy;
            let mut l = x * x + y * y;
            if l >= r * r {
                continue;
            }
            if x == 0.0 {
                x = rng.jiggle();
                l += x * x;
            }
            if y == 0.0 {
                y = rng.jiggle();
                l += y * y;
            }
            let d = l.sqrt();
            let k = (r - d) / d * strength;
            x *= k;
            y *= k;
            // Smaller circles move more.
            let rj2 = rj * rj;
            let share = rj2 / (ri2 + rj2);
            nodes[i].vx += x * share;
            nodes[i].vy += y * share;
            nodes[j].vx -= x * (1.0 - share);
            nodes[j].vy -= y * (1.0 - share);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64) -> SimNode {
        SimNode {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 5.0,
            pin: None,
        }
    }

    #[test]
    fn lcg_is_reproducible() {
        let mut a = Lcg::new();
        let mut b = Lcg::new();
        for _ in 0..5 {
            let (ja, jb) = (a.jiggle(), b.jiggle());
            assert_eq!(ja, jb);
            assert!(ja.abs() <= 5e-7);
        }
    }

    #[test]
    fn negative_charge_repels() {
        let mut nodes = [node(0.0, 0.0), node(10.0, 0.0)];
        many_body(&mut nodes, -180.0, 1.0, &mut Lcg::new());
        assert!(nodes[0].vx < 0.0);
        assert!(nodes[1].vx > 0.0);
    }

    #[test]
    fn center_moves_centroid() {
        let mut nodes = [node(0.0, 0.0), node(10.0, 20.0)];
        center(&mut nodes, 100.0, 100.0);
        let cx = (nodes[0].x + nodes[1].x) / 2.0;
        let cy = (nodes[0].y + nodes[1].y) / 2.0;
        assert!((cx - 100.0).abs() < 1e-9);
        assert!((cy - 100.0).abs() < 1e-9);
    }

    #[test]
    fn stretched_link_pulls_together() {
        let mut nodes = [node(0.0, 0.0), node(200.0, 0.0)];
        let links = Link::resolve(&[(0, 1)], 2);
        assert_eq!(links[0].bias, 0.5);
        link(&mut nodes, &links, 60.0, 0.6, 1.0, &mut Lcg::new());
        assert!(nodes[0].vx > 0.0);
        assert!(nodes[1].vx < 0.0);
    }

    #[test]
    fn overlapping_circles_separate() {
        let mut nodes = [node(0.0, 0.0), node(3.0, 0.0)];
        collide(&mut nodes, 4.0, 1.0, &mut Lcg::new());
        assert!(nodes[0].vx < 0.0);
        assert!(nodes[1].vx > 0.0);
    }

    #[test]
    fn distant_circles_untouched() {
        let mut nodes = [node(0.0, 0.0), node(100.0, 0.0)];
        collide(&mut nodes, 4.0, 1.0, &mut Lcg::new());
        assert_eq!(nodes[0].vx, 0.0);
        assert_eq!(nodes[1].vx, 0.0);
    }
}
