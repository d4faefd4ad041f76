use std::path::PathBuf;

use clap::Parser;

use crate::join::JoinMode;

/// Render a choropleth of the U.S. states visited and lived in, with a
/// marker for every city lived in.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Directory holding stateslived.csv, cities-lived.csv and us-states.json
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Where the HTML page is written
    #[arg(short, long, default_value = "states-lived.html")]
    pub output: PathBuf,

    /// How visit rows are matched to state boundaries
    #[arg(long, value_enum, default_value_t = JoinMode::Lenient)]
    pub join: JoinMode,

    /// Also draw the map in the terminal
    #[arg(long)]
    pub preview: bool,

    /// Preview width in columns (defaults to the terminal width)
    #[arg(long, requires = "preview")]
    pub preview_width: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["states-lived-map"]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.output, PathBuf::from("states-lived.html"));
        assert_eq!(config.join, JoinMode::Lenient);
        assert!(!config.preview);
        assert_eq!(config.preview_width, None);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "states-lived-map",
            "--data-dir",
            "fixtures",
            "-o",
            "out/map.html",
            "--join",
            "strict",
            "--preview",
            "--preview-width",
            "80",
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("fixtures"));
        assert_eq!(config.output, PathBuf::from("out/map.html"));
        assert_eq!(config.join, JoinMode::Strict);
        assert!(config.preview);
        assert_eq!(config.preview_width, Some(80));
    }

    #[test]
    fn test_preview_width_needs_preview() {
        assert!(Config::try_parse_from(["states-lived-map", "--preview-width", "80"]).is_err());
        assert!(Config::try_parse_from(["states-lived-map", "--join", "fuzzy"]).is_err());
    }
}
