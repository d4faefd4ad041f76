use std::io::Read;

use serde::Deserialize;

/// One row of `stateslived.csv`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StateVisitRecord {
    pub state: String,
    /// Visit code: 0 nada, 1 visited, 2 lived, 3 lived in a city shown on the map
    #[serde(default)]
    pub visited: Option<f64>,
}

/// One row of `cities-lived.csv`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CityRecord {
    pub place: String,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    /// Years lived there
    #[serde(default)]
    pub years: Option<f64>,
}

impl StateVisitRecord {
    pub fn new(state: impl Into<String>, visited: f64) -> Self {
        Self {
            state: state.into(),
            visited: Some(visited),
        }
    }
}

impl CityRecord {
    pub fn new(place: impl Into<String>, lon: f64, lat: f64, years: f64) -> Self {
        Self {
            place: place.into(),
            lon: Some(lon),
            lat: Some(lat),
            years: Some(years),
        }
    }
}

/// Parse the states-visited table. Columns are matched by header name.
pub fn parse_states_visited<R: Read>(reader: R) -> Result<Vec<StateVisitRecord>, csv::Error> {
    read_records(reader)
}

/// Parse the cities table. Columns are matched by header name.
pub fn parse_cities<R: Read>(reader: R) -> Result<Vec<CityRecord>, csv::Error> {
    read_records(reader)
}

fn read_records<R, T>(reader: R) -> Result<Vec<T>, csv::Error>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_visited() {
        let csv = "state,visited\nTexas,2\nOhio,0\nMaine,\n";
        let rows = parse_states_visited(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], StateVisitRecord::new("Texas", 2.0));
        assert_eq!(rows[1].visited, Some(0.0));
        assert_eq!(rows[2].visited, None);
    }

    #[test]
    fn test_cities_any_column_order() {
        let csv = "years,place,lat,lon\n9,Austin TX,30.3,-97.7\n";
        let rows = parse_cities(csv.as_bytes()).unwrap();
        assert_eq!(rows, vec![CityRecord::new("Austin TX", -97.7, 30.3, 9.0)]);
    }

    #[test]
    fn test_cities_missing_fields() {
        let csv = "place,lat,years\nNowhere, 40.0 ,\n";
        let rows = parse_cities(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].lon, None);
        assert_eq!(rows[0].lat, Some(40.0));
        assert_eq!(rows[0].years, None);
    }

    #[test]
    fn test_non_numeric_code_is_an_error() {
        let csv = "state,visited\nTexas,lots\n";
        assert!(parse_states_visited(csv.as_bytes()).is_err());
    }
}
