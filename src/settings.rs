use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Rendering options shared by the bar charts and the line plot.
///
/// JSON settings files use the short keys (`outputprefix`, `fontsize`,
/// `sizeformat`); any key left out keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log-scale the x axis of the line plot
    pub logx: bool,
    /// Log-scale the y axis of every chart
    pub logy: bool,
    /// Path prefix every output file name is appended to
    #[serde(rename = "outputprefix")]
    pub output_prefix: String,
    /// Show the figure after saving (no viewer exists in batch use)
    pub interactive: bool,
    /// Font size for ticks, labels and annotations (points)
    #[serde(rename = "fontsize")]
    pub font_size: f64,
    pub ylabel: String,
    pub xlabel: String,
    /// Bar chart title template, the first `{...}` receives the problem size
    #[serde(rename = "sizeformat")]
    pub size_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logx: true,
            logy: true,
            output_prefix: "/tmp/benjmark".to_string(),
            interactive: false,
            font_size: 12.0,
            ylabel: "Duration (s)".to_string(),
            xlabel: "Data size".to_string(),
            size_format: "Data size {:d}".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// `{outputprefix}bars{index:04}.svg`
    pub fn bars_path(&self, problem_index: usize) -> PathBuf {
        PathBuf::from(format!("{}bars{:04}.svg", self.output_prefix, problem_index))
    }

    /// `{outputprefix}lineplot.svg`
    pub fn lineplot_path(&self) -> PathBuf {
        PathBuf::from(format!("{}lineplot.svg", self.output_prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.logx);
        assert!(settings.logy);
        assert!(!settings.interactive);
        assert_eq!(settings.font_size, 12.0);
        assert_eq!(settings.output_prefix, "/tmp/benjmark");
        assert_eq!(settings.size_format, "Data size {:d}");
    }

    #[test]
    fn test_output_paths() {
        let settings = Settings {
            output_prefix: "out/nbody".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.bars_path(3), PathBuf::from("out/nbodybars0003.svg"));
        assert_eq!(settings.bars_path(12345), PathBuf::from("out/nbodybars12345.svg"));
        assert_eq!(settings.lineplot_path(), PathBuf::from("out/nbodylineplot.svg"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"logy": false, "outputprefix": "figs/circle", "sizeformat": "{:d} points"}"#,
        )
        .unwrap();

        let settings = Settings::from_json_file(file.path()).unwrap();
        assert!(!settings.logy);
        assert!(settings.logx);
        assert_eq!(settings.output_prefix, "figs/circle");
        assert_eq!(settings.size_format, "{:d} points");
        assert_eq!(settings.ylabel, "Duration (s)");
    }

    #[test]
    fn test_wrongly_typed_json_rejected() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"fontsize": "large"}"#).unwrap();

        let err = Settings::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }
}
