use glam::DVec2;
use std::f64::consts::PI;

use crate::data::{Polygon, Ring};
use crate::map::clip::{clip_ring, Extent};

/// Shrinks the Alaska and Hawaii extents so their edges never overlap
const EPSILON: f64 = 1e-6;

/// Conic equal-area (Albers) projection with a longitude rotation, a center
/// and a scale/translate into pixel space.
#[derive(Clone, Debug)]
pub struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
    /// Longitude rotation in radians
    rotate: f64,
    scale: f64,
    translate: DVec2,
    /// Raw projection of the center, subtracted before scaling
    center: DVec2,
}

impl ConicEqualArea {
    /// `parallels` and `center` in degrees, `rotate` is the longitude shift in degrees
    pub fn new(
        parallels: (f64, f64),
        rotate: f64,
        center: (f64, f64),
        scale: f64,
        translate: DVec2,
    ) -> Self {
        let sy0 = parallels.0.to_radians().sin();
        let n = (sy0 + parallels.1.to_radians().sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;

        let mut projection = Self {
            n,
            c,
            r0,
            rotate: rotate.to_radians(),
            scale,
            translate,
            center: DVec2::ZERO,
        };
        projection.center = projection.raw(center.0.to_radians(), center.1.to_radians());
        projection
    }

    /// Project unrotated spherical coordinates (radians)
    #[inline(always)]
    fn raw(&self, lambda: f64, phi: f64) -> DVec2 {
        let r = (self.c - 2.0 * self.n * phi.sin()).sqrt() / self.n;
        let x = lambda * self.n;
        DVec2::new(r * x.sin(), self.r0 - r * x.cos())
    }

    /// Project a geographic coordinate (lon, lat) in degrees to pixels.
    /// Non-finite output (latitudes the cone cannot reach) is `None`.
    pub fn project(&self, lon: f64, lat: f64) -> Option<DVec2> {
        let mut lambda = lon.to_radians() + self.rotate;
        // Wrap into [-PI, PI]
        if lambda > PI {
            lambda -= 2.0 * PI;
        } else if lambda < -PI {
            lambda += 2.0 * PI;
        }

        let p = self.raw(lambda, lat.to_radians());
        let px = self.translate.x + self.scale * (p.x - self.center.x);
        let py = self.translate.y - self.scale * (p.y - self.center.y);

        (px.is_finite() && py.is_finite()).then(|| DVec2::new(px, py))
    }
}

/// One sub-projection of the composite and the pixel rectangle it owns
#[derive(Clone, Debug)]
struct Inset {
    projection: ConicEqualArea,
    extent: Extent,
}

/// Composite Albers projection of the United States: the lower 48 states
/// with Alaska and Hawaii moved into insets below the southwest corner.
#[derive(Clone, Debug)]
pub struct AlbersUsa {
    insets: [Inset; 3],
}

impl AlbersUsa {
    pub fn new(scale: f64, translate: DVec2) -> Self {
        let k = scale;
        let DVec2 { x, y } = translate;

        let lower48 = Inset {
            projection: ConicEqualArea::new((29.5, 45.5), 96.0, (-0.6, 38.7), k, translate),
            extent: Extent::new(
                DVec2::new(x - 0.455 * k, y - 0.238 * k),
                DVec2::new(x + 0.455 * k, y + 0.238 * k),
            ),
        };

        let alaska = Inset {
            projection: ConicEqualArea::new(
                (55.0, 65.0),
                154.0,
                (-2.0, 58.5),
                k * 0.35,
                DVec2::new(x - 0.307 * k, y + 0.201 * k),
            ),
            extent: Extent::new(
                DVec2::new(x - 0.425 * k + EPSILON, y + 0.120 * k + EPSILON),
                DVec2::new(x - 0.214 * k - EPSILON, y + 0.234 * k - EPSILON),
            ),
        };

        let hawaii = Inset {
            projection: ConicEqualArea::new(
                (8.0, 18.0),
                157.0,
                (-3.0, 19.9),
                k,
                DVec2::new(x - 0.205 * k, y + 0.212 * k),
            ),
            extent: Extent::new(
                DVec2::new(x - 0.214 * k + EPSILON, y + 0.166 * k + EPSILON),
                DVec2::new(x - 0.115 * k - EPSILON, y + 0.234 * k - EPSILON),
            ),
        };

        Self {
            insets: [lower48, alaska, hawaii],
        }
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates.
    /// The first inset whose extent holds the result wins; a point outside
    /// all three is `None`.
    pub fn project(&self, lon: f64, lat: f64) -> Option<DVec2> {
        self.insets.iter().find_map(|inset| {
            inset
                .projection
                .project(lon, lat)
                .filter(|p| inset.extent.contains(*p))
        })
    }

    /// Project every ring of a polygon through each inset and clip it to
    /// that inset's extent. Rings with nothing left inside are dropped.
    pub fn project_polygon(&self, polygon: &Polygon) -> Vec<Ring> {
        let mut out = Vec::new();
        for inset in &self.insets {
            for ring in polygon {
                let projected: Option<Ring> = ring
                    .iter()
                    .map(|p| inset.projection.project(p.x, p.y))
                    .collect();
                let Some(projected) = projected else {
                    continue;
                };
                let clipped = clip_ring(&projected, &inset.extent);
                if clipped.len() >= 3 {
                    out.push(clipped);
                }
            }
        }
        out
    }
}
