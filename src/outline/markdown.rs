//! Markdown rendering of elaborated outlines.
//!
//! The format is fixed for compatibility with downstream consumers: a
//! level-1 heading per main point, a level-2 heading per sub-point, the
//! elaborated content when present, and an 80-dash separator after each
//! point, each part followed by a blank line.

use super::OutlinePoint;

/// Width of the separator line between points.
const SEPARATOR_WIDTH: usize = 80;

/// Render an outline to its markdown artifact.
pub fn render_outline(points: &[OutlinePoint]) -> String {
    let mut out = String::new();

    for point in points {
        out.push_str(&format!("# {}\n\n", point.main_point));

        for sub in &point.sub_points {
            out.push_str(&format!("## {}\n\n", sub));
        }

        if let Some(content) = &point.content {
            out.push_str(&format!("{}\n\n", content));
        }

        out.push_str(&"-".repeat(SEPARATOR_WIDTH));
        out.push_str("\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_full_point() {
        let mut point = OutlinePoint::new("Say hello");
        point.sub_points.push("Greeting".to_string());
        point.content = Some("A warm welcome matters.".to_string());

        let md = render_outline(&[point]);
        assert_eq!(
            md,
            format!(
                "# Say hello\n\n## Greeting\n\nA warm welcome matters.\n\n{}\n\n",
                "-".repeat(80)
            )
        );
    }

    #[test]
    fn test_render_point_without_content() {
        let point = OutlinePoint::new("Unelaborated");
        let md = render_outline(&[point]);
        assert!(md.starts_with("# Unelaborated\n\n"));
        assert!(md.contains(&"-".repeat(80)));
        // No stray content section between heading and separator.
        assert_eq!(
            md,
            format!("# Unelaborated\n\n{}\n\n", "-".repeat(80))
        );
    }

    #[test]
    fn test_render_empty_outline() {
        assert_eq!(render_outline(&[]), "");
    }

    #[test]
    fn test_render_multiple_points_in_order() {
        let points = vec![OutlinePoint::new("First"), OutlinePoint::new("Second")];
        let md = render_outline(&points);
        let first = md.find("# First").unwrap();
        let second = md.find("# Second").unwrap();
        assert!(first < second);
        assert_eq!(md.matches(&"-".repeat(80)).count(), 2);
    }
}
