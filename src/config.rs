// THEORY:
// Pipeline heuristics live in a JSON file rather than in code. Every field of
// `PipelineConfig` has a default, so a config file only needs the values it
// overrides, for example:
//
//     { "inner_divisor": 6, "band_column_fraction": 0.25, "debug_overlay": true }
//
// Each region query's locator may also set `"paint_debug": true` to have its
// projection bars drawn when the report is annotated.

use crate::error::Result;
use crate::pipeline::PipelineConfig;
use std::fs;
use std::path::Path;

pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let data = fs::read_to_string(path)?;
    parse_config(&data)
}

pub fn parse_config(data: &str) -> Result<PipelineConfig> {
    Ok(serde_json::from_str(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color_predicate::ColorPredicate;
    use crate::core_modules::region_locator::AxisThreshold;
    use crate::error::VisionError;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config(r#"{ "inner_divisor": 6, "debug_overlay": true }"#).unwrap();
        assert_eq!(config.inner_divisor, 6);
        assert!(config.debug_overlay);
        assert_eq!(config.panel, PipelineConfig::default().panel);
    }

    #[test]
    fn predicates_and_thresholds_are_configurable() {
        let config = parse_config(
            r#"{
                "panel": {
                    "predicate": {
                        "kind": "exact_set",
                        "references": [
                            { "color": { "red": 10, "green": 20, "blue": 30 }, "tolerance": 2 }
                        ]
                    },
                    "locator": {
                        "column_threshold": { "peak_fraction": 0.8 },
                        "row_threshold": { "peak_distance": 12 }
                    }
                }
            }"#,
        )
        .unwrap();

        let ColorPredicate::ExactSet { references } = &config.panel.predicate else {
            panic!("expected an exact set");
        };
        assert_eq!(references[0].color.alpha, 255);
        assert_eq!(references[0].tolerance, 2);
        assert_eq!(config.panel.locator.column_threshold, AxisThreshold::PeakFraction(0.8));
        assert_eq!(config.panel.locator.row_threshold, AxisThreshold::PeakDistance(12));
        assert!(!config.panel.locator.paint_debug);
    }

    #[test]
    fn malformed_config_is_reported() {
        assert!(matches!(parse_config("{ not json"), Err(VisionError::Config(_))));
        let missing = std::env::temp_dir().join("panel_vision_missing_config.json");
        assert!(matches!(load_config(&missing), Err(VisionError::Io(_))));
    }
}
