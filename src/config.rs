use serde::{Deserialize, Serialize};

use crate::{
    error::{OutlineError, Result},
    types::Value,
};

/// Point density and contour-ring settings for outline sampling.
///
/// Keys use the camelCase names of the host configuration file, and missing keys fall
/// back to [`Default`]:
///
/// ```rust,ignore
/// let config = DensityConfig::from_json_str(r#"{ "gapBetweenPoints": 0.25 }"#)?;
/// assert_eq!(config.vertical_gap, 1.0);
///
/// // Or build it in code:
/// let config = DensityConfig::default()
///     .with_gap_between_points(0.25)
///     .with_max_points(10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DensityConfig {
    /// Distance between consecutive points along a line or arc. Default: `0.5`.
    pub gap_between_points: Value,

    /// Distance between successive horizontal contour rings. Default: `1.0`.
    pub vertical_gap: Value,

    /// Draw contour rings on cuboids.
    pub cuboid_lines_enabled: bool,

    /// Draw contour rings on polygonal prisms.
    pub polygon_lines_enabled: bool,

    /// Draw contour rings on cylinders.
    pub cylinder_lines_enabled: bool,

    /// Draw horizontal cross-sections on ellipsoids.
    pub ellipsoid_lines_enabled: bool,

    /// Upper bound on the number of points produced for one region.
    ///
    /// Output past the ceiling is dropped and the sequence is flagged as clipped.
    /// `None` leaves the output unbounded, and a gap tiny enough that a single edge cannot
    /// fit in memory then panics on allocation. Default: `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<usize>,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            gap_between_points: 0.5,
            vertical_gap: 1.0,
            cuboid_lines_enabled: true,
            polygon_lines_enabled: true,
            cylinder_lines_enabled: true,
            ellipsoid_lines_enabled: true,
            max_points: None,
        }
    }
}

impl DensityConfig {
    /// Parses a JSON configuration document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that both gaps are positive and finite and that the point ceiling is non-zero.
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.gap_between_points) {
            return Err(OutlineError::InvalidGap(self.gap_between_points));
        }
        if !is_positive(self.vertical_gap) {
            return Err(OutlineError::InvalidVerticalGap(self.vertical_gap));
        }
        if self.max_points == Some(0) {
            return Err(OutlineError::InvalidMaxPoints);
        }
        Ok(())
    }

    /// Sets the distance between consecutive points.
    pub fn with_gap_between_points(mut self, gap: Value) -> Self {
        self.gap_between_points = gap;
        self
    }

    /// Sets the distance between contour rings.
    pub fn with_vertical_gap(mut self, gap: Value) -> Self {
        self.vertical_gap = gap;
        self
    }

    /// Enables or disables contour rings for every shape kind at once.
    pub fn with_lines_enabled(mut self, enabled: bool) -> Self {
        self.cuboid_lines_enabled = enabled;
        self.polygon_lines_enabled = enabled;
        self.cylinder_lines_enabled = enabled;
        self.ellipsoid_lines_enabled = enabled;
        self
    }

    /// Caps the number of points produced per region.
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }
}

#[inline]
fn is_positive(v: Value) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DensityConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gap_between_points, 0.5);
        assert_eq!(config.vertical_gap, 1.0);
        assert!(config.cuboid_lines_enabled);
        assert_eq!(config.max_points, None);
    }

    #[test]
    fn test_rejects_non_positive_gaps() {
        let zero_gap = DensityConfig::default().with_gap_between_points(0.0);
        assert!(matches!(zero_gap.validate(), Err(OutlineError::InvalidGap(_))));

        let negative = DensityConfig::default().with_vertical_gap(-1.0);
        assert!(matches!(
            negative.validate(),
            Err(OutlineError::InvalidVerticalGap(_))
        ));

        let nan = DensityConfig::default().with_gap_between_points(Value::NAN);
        assert!(nan.validate().is_err());

        let no_room = DensityConfig::default().with_max_points(0);
        assert!(matches!(no_room.validate(), Err(OutlineError::InvalidMaxPoints)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DensityConfig::from_json_str(
            r#"{ "gapBetweenPoints": 0.25, "ellipsoidLinesEnabled": false, "maxPoints": 500 }"#,
        )
        .unwrap();
        assert_eq!(config.gap_between_points, 0.25);
        assert_eq!(config.vertical_gap, 1.0);
        assert!(!config.ellipsoid_lines_enabled);
        assert!(config.cylinder_lines_enabled);
        assert_eq!(config.max_points, Some(500));
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            DensityConfig::from_json_str("{ not json"),
            Err(OutlineError::Config(_))
        ));
        assert!(matches!(
            DensityConfig::from_json_str(r#"{ "verticalGap": 0 }"#),
            Err(OutlineError::InvalidVerticalGap(_))
        ));
    }
}
