use glam::DVec2;
use rayon::prelude::*;

use crate::data::{CityRecord, Ring, StateCollection, StateFeature};
use crate::map::color::{ColorScale, Rgb};
use crate::map::projection::AlbersUsa;

/// Map canvas width in pixels
pub const WIDTH: f64 = 960.0;
/// Map canvas height in pixels
pub const HEIGHT: f64 = 500.0;
/// Albers USA scale that fits the whole country on the canvas
pub const SCALE: f64 = 1000.0;
/// City marker radius per square-root year lived
pub const RADIUS_PER_SQRT_YEAR: f64 = 4.0;
pub const CITY_OPACITY: f64 = 0.85;

/// Legend labels, top row first; row i shows the scale stop for domain
/// value `3 - i`
pub const LEGEND_LABELS: [&str; 4] = ["Cities Lived", "States Lived", "States Visited", "Nada"];

/// A projected state outline and its fill
#[derive(Clone, Debug, PartialEq)]
pub struct StateShape {
    pub name: Option<String>,
    /// Pixel-space rings, already clipped to their inset
    pub rings: Vec<Ring>,
    pub fill: Rgb,
}

/// A projected city marker
#[derive(Clone, Debug, PartialEq)]
pub struct CityMarker {
    pub place: String,
    pub center: DVec2,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub swatch: Rgb,
}

/// Everything needed to draw the map, in pixel space
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub states: Vec<StateShape>,
    pub cities: Vec<CityMarker>,
    pub legend: Vec<LegendEntry>,
}

/// Projects joined state boundaries and city records into a [`Scene`]
pub struct MapRenderer {
    pub projection: AlbersUsa,
    pub colors: ColorScale,
}

impl MapRenderer {
    pub fn new(projection: AlbersUsa, colors: ColorScale) -> Self {
        Self { projection, colors }
    }

    /// Render all map features
    pub fn render(&self, states: &StateCollection, cities: &[CityRecord]) -> Scene {
        let states: Vec<StateShape> = states
            .features
            .par_iter()
            .map(|feature| self.state_shape(feature))
            .collect();

        let cities: Vec<CityMarker> = cities
            .iter()
            .filter_map(|city| {
                let marker = self.city_marker(city);
                if marker.is_none() {
                    tracing::debug!(place = %city.place, "city has no drawable marker");
                }
                marker
            })
            .collect();

        tracing::debug!(
            states = states.len(),
            cities = cities.len(),
            "scene rendered"
        );

        Scene {
            width: WIDTH,
            height: HEIGHT,
            states,
            cities,
            legend: self.legend(),
        }
    }

    pub fn state_shape(&self, feature: &StateFeature) -> StateShape {
        let rings = feature
            .polygons
            .iter()
            .flat_map(|polygon| self.projection.project_polygon(polygon))
            .collect();

        StateShape {
            name: feature.name.clone(),
            rings,
            fill: self.colors.fill(feature.visited),
        }
    }

    /// `None` when a field is missing, `years` is negative, or the position
    /// falls outside the projection
    pub fn city_marker(&self, city: &CityRecord) -> Option<CityMarker> {
        let center = self.projection.project(city.lon?, city.lat?)?;
        let radius = city_radius(city.years?)?;
        Some(CityMarker {
            place: city.place.clone(),
            center,
            radius,
        })
    }

    /// Legend rows in reverse domain order
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.colors
            .domain()
            .iter()
            .rev()
            .zip(LEGEND_LABELS)
            .map(|(&value, label)| LegendEntry {
                label,
                swatch: self.colors.color(value),
            })
            .collect()
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new(
            AlbersUsa::new(SCALE, DVec2::new(WIDTH / 2.0, HEIGHT / 2.0)),
            ColorScale::visits(),
        )
    }
}

/// Marker radius for a stay of `years`; area grows linearly with time
pub fn city_radius(years: f64) -> Option<f64> {
    let radius = years.sqrt() * RADIUS_PER_SQRT_YEAR;
    radius.is_finite().then_some(radius)
}
