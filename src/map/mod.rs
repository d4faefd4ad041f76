pub mod clip;
mod color;
pub mod geometry;
mod projection;
mod renderer;

pub use color::{ColorScale, Rgb};
pub use projection::{AlbersUsa, ConicEqualArea};
pub use renderer::{
    city_radius, CityMarker, LegendEntry, MapRenderer, Scene, StateShape, CITY_OPACITY, HEIGHT,
    LEGEND_LABELS, RADIUS_PER_SQRT_YEAR, SCALE, WIDTH,
};
