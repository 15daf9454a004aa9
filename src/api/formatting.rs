//! Output formatting for fixes and routes
//!
//! Presentation layers pick a format; the engine never renders
//! user-facing text itself.

use crate::api::types::{LocationFix, RouteSummary};
use serde::{Deserialize, Serialize};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable single line
    Text,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Renders fixes and routes into one output format
pub trait OutputFormatter {
    fn format_fix(&self, fix: &LocationFix) -> String;
    fn format_route(&self, route: &RouteSummary) -> String;
}

/// Human-readable formatter
#[derive(Debug, Default)]
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn format_fix(&self, fix: &LocationFix) -> String {
        let accuracy = match fix.accuracy {
            Some(value) => format!("{:.2} m", value),
            None => "n/a".to_string(),
        };
        format!(
            "position ({:.2}, {:.2}), accuracy {}, quality {:?}, {} anchors",
            fix.position.x, fix.position.y, accuracy, fix.quality, fix.anchors_used
        )
    }

    fn format_route(&self, route: &RouteSummary) -> String {
        if !route.is_reachable() {
            return "no route".to_string();
        }
        let waypoints: Vec<String> = route
            .points
            .iter()
            .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
            .collect();
        format!(
            "route {} [{:.2} m, ~{:.0} s]",
            waypoints.join(" -> "),
            route.distance,
            route.estimated_time_s
        )
    }
}

/// Pretty-printed JSON formatter
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_fix(&self, fix: &LocationFix) -> String {
        serde_json::to_string_pretty(fix).unwrap_or_default()
    }

    fn format_route(&self, route: &RouteSummary) -> String {
        serde_json::to_string_pretty(route).unwrap_or_default()
    }
}

/// CSV formatter with a header row
#[derive(Debug, Default)]
pub struct CsvFormatter;

impl OutputFormatter for CsvFormatter {
    fn format_fix(&self, fix: &LocationFix) -> String {
        let accuracy = fix
            .accuracy
            .map(|value| format!("{:.4}", value))
            .unwrap_or_default();
        format!(
            "x,y,accuracy_m,quality,anchors_used\n{:.4},{:.4},{},{:?},{}",
            fix.position.x, fix.position.y, accuracy, fix.quality, fix.anchors_used
        )
    }

    fn format_route(&self, route: &RouteSummary) -> String {
        let mut lines = vec!["index,x,y".to_string()];
        for (index, point) in route.points.iter().enumerate() {
            lines.push(format!("{},{:.4},{:.4}", index, point.x, point.y));
        }
        lines.join("\n")
    }
}

/// Formatter instance for a format selector
pub fn formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::quality::FixQuality;
    use crate::core::Point;
    use crate::pathfinding::astar::path_length;

    fn sample_fix() -> LocationFix {
        LocationFix {
            position: Point::new(4.25, 7.5),
            accuracy: Some(0.31),
            quality: FixQuality::Excellent,
            anchors_used: 4,
        }
    }

    fn sample_route() -> RouteSummary {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 5.0),
        ];
        RouteSummary {
            distance: path_length(&points),
            estimated_time_s: path_length(&points) / 1.4,
            points,
        }
    }

    #[test]
    fn test_text_fix() {
        let rendered = TextFormatter.format_fix(&sample_fix());
        assert!(rendered.contains("(4.25, 7.50)"));
        assert!(rendered.contains("0.31 m"));
        assert!(rendered.contains("4 anchors"));
    }

    #[test]
    fn test_text_route() {
        let rendered = TextFormatter.format_route(&sample_route());
        assert!(rendered.contains("(0.00, 0.00) -> (5.00, 0.00)"));
        assert!(rendered.contains("10.00 m"));
    }

    #[test]
    fn test_text_unreachable_route() {
        let empty = RouteSummary {
            points: Vec::new(),
            distance: 0.0,
            estimated_time_s: 0.0,
        };
        assert_eq!(TextFormatter.format_route(&empty), "no route");
    }

    #[test]
    fn test_json_fix_round_trips() {
        let rendered = JsonFormatter.format_fix(&sample_fix());
        let parsed: LocationFix = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, sample_fix());
    }

    #[test]
    fn test_csv_route_has_one_row_per_point() {
        let rendered = CsvFormatter.format_route(&sample_route());
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.starts_with("index,x,y"));
    }

    #[test]
    fn test_formatter_selector() {
        let fix = sample_fix();
        assert!(formatter(OutputFormat::Json).format_fix(&fix).contains('{'));
        assert!(formatter(OutputFormat::Csv)
            .format_fix(&fix)
            .starts_with("x,y"));
    }
}
