use std::fmt;

/// 8-bit sRGB color, displayed as `rgb(r,g,b)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Fill for states with no visit code
    pub const UNVISITED: Rgb = Rgb(213, 222, 217);
    pub const VISITED: Rgb = Rgb(69, 173, 168);
    pub const LIVED: Rgb = Rgb(84, 36, 55);
    /// Also the city marker fill
    pub const CITY: Rgb = Rgb(217, 91, 67);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

/// Piecewise-linear color scale over sorted domain stops. Inputs outside the
/// domain extrapolate the nearest segment and each channel is clamped.
#[derive(Clone, Debug)]
pub struct ColorScale {
    domain: Vec<f64>,
    range: Vec<Rgb>,
}

impl ColorScale {
    /// Domain and range must have the same length, at least two
    pub fn new(domain: Vec<f64>, range: Vec<Rgb>) -> Self {
        assert!(domain.len() >= 2 && domain.len() == range.len());
        Self { domain, range }
    }

    /// The visit-code scale: 0 nada, 1 visited, 2 lived, 3 cities lived
    pub fn visits() -> Self {
        Self::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![Rgb::UNVISITED, Rgb::VISITED, Rgb::LIVED, Rgb::CITY],
        )
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn color(&self, value: f64) -> Rgb {
        let n = self.domain.len();
        let i = self.domain[1..n - 1].partition_point(|d| *d <= value);
        let (d0, d1) = (self.domain[i], self.domain[i + 1]);
        let t = (value - d0) / (d1 - d0);
        let (a, b) = (self.range[i], self.range[i + 1]);

        Rgb(lerp(a.0, b.0, t), lerp(a.1, b.1, t), lerp(a.2, b.2, t))
    }

    /// Fill for an optional visit code; absent or non-finite codes get the
    /// unvisited color
    pub fn fill(&self, value: Option<f64>) -> Rgb {
        match value {
            Some(v) if v.is_finite() => self.color(v),
            _ => Rgb::UNVISITED,
        }
    }
}

#[inline(always)]
fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let v = a as f64 + t * (b as f64 - a as f64);
    v.round().clamp(0.0, 255.0) as u8
}
