use glam::DVec2;

/// Axis-aligned pixel rectangle, bounds inclusive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: DVec2,
    pub max: DVec2,
}

impl Extent {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    #[inline(always)]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Left(f64),
    Right(f64),
    Top(f64),
    Bottom(f64),
}

impl Edge {
    #[inline(always)]
    fn inside(self, p: DVec2) -> bool {
        match self {
            Edge::Left(x) => p.x >= x,
            Edge::Right(x) => p.x <= x,
            Edge::Top(y) => p.y >= y,
            Edge::Bottom(y) => p.y <= y,
        }
    }

    /// Where segment a-b crosses this edge. Only called when a and b lie on
    /// opposite sides, so the denominator is never zero.
    #[inline(always)]
    fn intersect(self, a: DVec2, b: DVec2) -> DVec2 {
        match self {
            Edge::Left(x) | Edge::Right(x) => {
                let t = (x - a.x) / (b.x - a.x);
                DVec2::new(x, a.y + t * (b.y - a.y))
            }
            Edge::Top(y) | Edge::Bottom(y) => {
                let t = (y - a.y) / (b.y - a.y);
                DVec2::new(a.x + t * (b.x - a.x), y)
            }
        }
    }
}

/// Clip a closed ring against a rectangle (Sutherland-Hodgman).
///
/// The input may repeat its first vertex at the end; the output does not.
/// Rings that cross a corner keep segments running along the rectangle edge,
/// which is harmless for filled shapes.
pub fn clip_ring(ring: &[DVec2], extent: &Extent) -> Vec<DVec2> {
    let mut output: Vec<DVec2> = match ring {
        [first, .., last] if first == last => ring[..ring.len() - 1].to_vec(),
        _ => ring.to_vec(),
    };

    if output.iter().all(|p| extent.contains(*p)) {
        return output;
    }

    let edges = [
        Edge::Left(extent.min.x),
        Edge::Right(extent.max.x),
        Edge::Top(extent.min.y),
        Edge::Bottom(extent.max.y),
    ];

    for edge in edges {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &current in &input {
            match (edge.inside(current), edge.inside(prev)) {
                (true, true) => output.push(current),
                (true, false) => {
                    output.push(edge.intersect(prev, current));
                    output.push(current);
                }
                (false, true) => output.push(edge.intersect(prev, current)),
                (false, false) => {}
            }
            prev = current;
        }
    }

    output
}
