use geojson::{Feature, GeoJson, Geometry, Value};
use glam::DVec2;

/// A closed ring of (lon, lat) positions
pub type Ring = Vec<DVec2>;

/// Exterior ring followed by any holes
pub type Polygon = Vec<Ring>;

/// One state boundary plus the visit code copied onto it by the join.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateFeature {
    /// `properties.name`; features without a string name never match a visit
    pub name: Option<String>,
    pub polygons: Vec<Polygon>,
    pub visited: Option<f64>,
}

impl StateFeature {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        Self {
            name: Some(name.into()),
            polygons,
            visited: None,
        }
    }

    fn from_geojson(feature: &Feature) -> Self {
        let name = feature
            .property("name")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let mut polygons = Vec::new();
        if let Some(ref geometry) = feature.geometry {
            collect_polygons(geometry, &mut polygons);
        }

        Self {
            name,
            polygons,
            visited: None,
        }
    }
}

/// State boundaries in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateCollection {
    pub features: Vec<StateFeature>,
}

impl StateCollection {
    pub fn new(features: Vec<StateFeature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// First feature with the given name
    pub fn get(&self, name: &str) -> Option<&StateFeature> {
        self.features
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
    }
}

/// Parse a GeoJSON FeatureCollection. The buffer is used as scratch space by
/// simd-json and is left in an unspecified state.
///
/// Returns `Ok(None)` when the document is valid GeoJSON but not a
/// FeatureCollection.
pub fn parse_state_boundaries(
    bytes: &mut [u8],
) -> Result<Option<StateCollection>, simd_json::Error> {
    let geojson: GeoJson = simd_json::serde::from_slice(bytes)?;

    let GeoJson::FeatureCollection(fc) = geojson else {
        return Ok(None);
    };

    let features = fc.features.iter().map(StateFeature::from_geojson).collect();
    Ok(Some(StateCollection::new(features)))
}

/// Flatten polygonal geometry; points and lines carry no area and are skipped
fn collect_polygons(geometry: &Geometry, out: &mut Vec<Polygon>) {
    match &geometry.value {
        Value::Polygon(rings) => out.push(convert_rings(rings)),
        Value::MultiPolygon(polygons) => {
            out.extend(polygons.iter().map(|rings| convert_rings(rings)));
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_polygons(g, out);
            }
        }
        _ => {}
    }
}

fn convert_rings(rings: &[Vec<Vec<f64>>]) -> Polygon {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .filter_map(|c| match c.as_slice() {
                    [lon, lat, ..] => Some(DVec2::new(*lon, *lat)),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Colorado"},
             "geometry": {"type": "Polygon", "coordinates":
                [[[-109.05, 41.0], [-102.05, 41.0], [-102.05, 37.0], [-109.05, 37.0], [-109.05, 41.0]]]}},
            {"type": "Feature", "properties": {"name": "Hawaii"},
             "geometry": {"type": "MultiPolygon", "coordinates": [
                [[[-155.9, 20.2], [-155.0, 19.7], [-155.9, 19.0], [-155.9, 20.2]]],
                [[[-156.7, 21.0], [-156.0, 20.8], [-156.5, 20.6], [-156.7, 21.0]]]]}},
            {"type": "Feature", "properties": {"id": 7},
             "geometry": {"type": "Point", "coordinates": [-100.0, 40.0]}},
            {"type": "Feature", "properties": null, "geometry": null}
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let mut bytes = SAMPLE.as_bytes().to_vec();
        let states = parse_state_boundaries(&mut bytes).unwrap().unwrap();
        assert_eq!(states.len(), 4);

        let colorado = states.get("Colorado").unwrap();
        assert_eq!(colorado.polygons.len(), 1);
        assert_eq!(colorado.polygons[0][0].len(), 5);
        assert_eq!(colorado.polygons[0][0][0], DVec2::new(-109.05, 41.0));
        assert_eq!(colorado.visited, None);

        assert_eq!(states.get("Hawaii").unwrap().polygons.len(), 2);

        // Unnamed point feature is kept so collection order is preserved
        assert_eq!(states.features[2].name, None);
        assert!(states.features[2].polygons.is_empty());
        assert!(states.features[3].polygons.is_empty());
    }

    #[test]
    fn test_geometry_is_not_a_collection() {
        let mut bytes = br#"{"type": "Point", "coordinates": [1.0, 2.0]}"#.to_vec();
        assert_eq!(parse_state_boundaries(&mut bytes).unwrap(), None);
    }

    #[test]
    fn test_malformed_json() {
        let mut bytes = br#"{"type": "FeatureCollection", "features": ["#.to_vec();
        assert!(parse_state_boundaries(&mut bytes).is_err());
    }
}
