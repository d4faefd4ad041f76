//! Choropleth map of the U.S. states visited and lived in, with markers for
//! the cities lived in.
//!
//! The pipeline runs once: [`data::load_all`] reads the three datasets,
//! [`join::join_visits`] copies visit codes onto the state boundaries,
//! [`map::MapRenderer`] projects everything into a [`map::Scene`] and
//! [`svg::document`] turns the scene into an HTML page.

pub mod braille;
pub mod config;
pub mod data;
pub mod error;
pub mod join;
pub mod map;
pub mod preview;
pub mod svg;

pub use data::{CityRecord, Datasets, StateCollection, StateFeature, StateVisitRecord};
pub use error::{JoinError, LoadError, LoadFailures};
pub use join::{join_visits, JoinMode, JoinReport};
pub use map::{AlbersUsa, ColorScale, MapRenderer, Rgb, Scene};
