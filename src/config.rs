//! Figure configuration.
//!
//! An optional YAML file tunes figure size, the validity region and per-series marker
//! styles. Precedence: command-line flags > file > defaults.
//!
//! ```yaml
//! width: 1024
//! height: 768
//! region: { x_min: 0, x_max: 101, y_min: 0, y_max: 99 }
//! pads: { color: "#2ca02c", shape: triangle, size: 7 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::placement::{Classifier, ValidityRegion};
use crate::plots::SeriesStyle;
use crate::render::{MarkerShape, MAX_MARKER_SIZE};

/// Partial marker style; unset fields keep the series default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// `#rrggbb` or `#rrggbbaa`.
    pub color: Option<String>,
    /// Marker glyph.
    pub shape: Option<MarkerShape>,
    /// Marker diameter in pixels.
    pub size: Option<f32>,
}

impl StyleConfig {
    /// Overlay the set fields on `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the color is not valid hex or the size is outside
    /// `(0, MAX_MARKER_SIZE]`.
    pub fn resolve(&self, base: SeriesStyle) -> Result<SeriesStyle> {
        let color = match &self.color {
            Some(hex) => hex.parse::<Rgba>().map_err(|e| config_error(e.to_string()))?,
            None => base.color,
        };
        let size = self.size.unwrap_or(base.size);
        if !(size > 0.0 && size <= MAX_MARKER_SIZE) {
            return Err(config_error(format!(
                "marker size must be in (0, {MAX_MARKER_SIZE}], got {size}"
            )));
        }
        Ok(SeriesStyle::new(color, self.shape.unwrap_or(base.shape), size))
    }
}

/// Everything a run can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Space between figure edge and plot frame.
    pub margin: u32,
    /// Rectangle a coordinate must lie in to count as valid.
    pub region: ValidityRegion,
    /// Cell series style.
    pub cells: StyleConfig,
    /// I/O pad series style.
    pub pads: StyleConfig,
    /// Style of the combined series when pads are not split out.
    pub single: StyleConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 60,
            region: ValidityRegion::default(),
            cells: StyleConfig::default(),
            pads: StyleConfig::default(),
            single: StyleConfig::default(),
        }
    }
}

impl PlotConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| Error::NotFound { path: path.to_path_buf(), source })?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns an error if the margin swallows the plot area, the region is inverted,
    /// or a style does not resolve.
    pub fn validate(&self) -> Result<()> {
        if self.width <= self.margin.saturating_mul(2) || self.height <= self.margin.saturating_mul(2) {
            return Err(config_error(format!(
                "figure {}x{} leaves no plot area inside a {} px margin",
                self.width, self.height, self.margin
            )));
        }
        let r = &self.region;
        if !(r.x_min <= r.x_max && r.y_min <= r.y_max) {
            return Err(config_error("region minimum exceeds maximum".to_string()));
        }
        self.styles(Classifier::Single)?;
        self.styles(Classifier::PadPrefix)?;
        Ok(())
    }

    /// Resolved styles, one per series of `classifier`, in series order.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured style is invalid.
    pub fn styles(&self, classifier: Classifier) -> Result<Vec<SeriesStyle>> {
        match classifier {
            Classifier::Single => Ok(vec![self.single.resolve(SeriesStyle::SINGLE)?]),
            Classifier::PadPrefix => Ok(vec![
                self.cells.resolve(SeriesStyle::CELLS)?,
                self.pads.resolve(SeriesStyle::PADS)?,
            ]),
        }
    }
}

fn config_error(message: String) -> Error {
    Error::Config { line: 0, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_config_default() {
        let config = PlotConfig::new();

        assert_eq!((config.width, config.height, config.margin), (800, 600, 60));
        assert_eq!(config.region, ValidityRegion::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_empty() {
        assert_eq!(PlotConfig::parse("").unwrap(), PlotConfig::default());
        assert_eq!(PlotConfig::parse("  \n").unwrap(), PlotConfig::default());
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = indoc! {r##"
            width: 1024
            height: 768
            margin: 40
            region:
              x_max: 200
            pads:
              color: "#2ca02c"
              shape: triangle
              size: 7
        "##};

        let config = PlotConfig::parse(yaml).unwrap();

        assert_eq!(config.width, 1024);
        assert_eq!(config.margin, 40);
        assert_eq!(config.region.x_max, 200.0);
        assert_eq!(config.region.y_max, 99.0);

        let styles = config.styles(Classifier::PadPrefix).unwrap();
        assert_eq!(styles[0], SeriesStyle::CELLS);
        assert_eq!(styles[1], SeriesStyle::new(Rgba::rgb(44, 160, 44), MarkerShape::Triangle, 7.0));
    }

    #[test]
    fn test_single_style_defaults() {
        let styles = PlotConfig::new().styles(Classifier::Single).unwrap();
        assert_eq!(styles, vec![SeriesStyle::SINGLE]);
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = indoc! {"
            width: 800
            height: 600
            margin: not_a_number
        "};

        let err = PlotConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::Config { line: 3, .. }), "got {err}");
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(PlotConfig::parse("colour: red\n").is_err());
    }

    #[test]
    fn test_bad_color_rejected() {
        let err = PlotConfig::parse("cells:\n  color: blue\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_marker_size_bounds() {
        assert!(PlotConfig::parse("cells: { size: 1e10 }\n").is_err());
        assert!(PlotConfig::parse("pads: { size: 0 }\n").is_err());
        assert!(PlotConfig::parse("single: { size: .nan }\n").is_err());

        let config = PlotConfig::parse("cells: { size: 256 }\n").unwrap();
        assert_eq!(config.styles(Classifier::PadPrefix).unwrap()[0].size, MAX_MARKER_SIZE);
    }

    #[test]
    fn test_margin_swallowing_figure_rejected() {
        assert!(PlotConfig::parse("width: 100\nmargin: 50\n").is_err());
    }

    #[test]
    fn test_inverted_region_rejected() {
        assert!(PlotConfig::parse("region: { x_min: 10, x_max: 0 }\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = PlotConfig::load("/nonexistent/placement.yaml").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.yaml");
        std::fs::write(&path, "height: 500\n").unwrap();

        assert_eq!(PlotConfig::load(&path).unwrap().height, 500);
    }
}
