//! Extraction options.

/// Options controlling document-level extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Table detection thresholds.
    pub detector: DetectorConfig,

    /// Whether whole-document scans process pages in parallel.
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detector configuration.
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    /// Enable or disable parallel page scans.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            parallel: true,
        }
    }
}

/// Thresholds for the stream-mode table detector.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Minimum number of rows for a detected table.
    pub min_rows: usize,

    /// Minimum number of columns for a detected table.
    pub min_columns: usize,

    /// Maximum number of columns (above this, likely word-level splitting
    /// rather than a real table).
    pub max_columns: usize,

    /// Y tolerance for grouping spans into rows, as a fraction of the font
    /// size.
    pub row_tolerance: f32,

    /// Minimum fraction of a row's spans that must sit on a column edge for
    /// the row to count as part of a table.
    pub min_alignment: f32,

    /// Minimum horizontal gap between column edges, in points.
    pub min_column_gap: f32,
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    pub fn with_min_columns(mut self, min_columns: usize) -> Self {
        self.min_columns = min_columns;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_row_tolerance(mut self, fraction: f32) -> Self {
        self.row_tolerance = fraction;
        self
    }

    pub fn with_min_alignment(mut self, ratio: f32) -> Self {
        self.min_alignment = ratio;
        self
    }

    pub fn with_min_column_gap(mut self, points: f32) -> Self {
        self.min_column_gap = points;
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 10,
            row_tolerance: 0.4,
            min_alignment: 0.3,
            min_column_gap: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ExtractOptions::new()
            .with_detector(DetectorConfig::new().with_min_rows(3))
            .sequential();

        assert_eq!(options.detector.min_rows, 3);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert!(options.parallel);
        assert_eq!(options.detector.min_columns, 2);
    }

    #[test]
    fn test_detector_config_builder() {
        let config = DetectorConfig::new()
            .with_min_columns(3)
            .with_max_columns(8)
            .with_min_column_gap(20.0);

        assert_eq!(config.min_columns, 3);
        assert_eq!(config.max_columns, 8);
        assert_eq!(config.min_column_gap, 20.0);
    }
}
