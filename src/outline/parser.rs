//! Parser for semi-structured numbered-list model output.
//!
//! The model is asked for numbered main points ("1. ...") with decimal
//! sub-points ("1.1 ..."). Real model output does not always follow the
//! requested format, so the parser is deliberately tolerant: it never
//! validates numbering continuity and silently ignores anything it cannot
//! classify. "3. Foo" right after "1. Bar" is accepted without renumbering.
//!
//! Classification of a trimmed line that starts with an ASCII digit:
//! - decimal label ("1.1", "2.3.") or more than one `.` -> sub-point
//! - exactly one `.` -> main point, text after the first `.`
//!
//! A line like "1.5. Something." therefore lands as a sub-point even when it
//! was meant as a main point. That ambiguity is inherent to the numbering
//! format and is kept as-is; resolving it would require changing the
//! extraction prompt to emit an unambiguous delimiter.

use super::OutlinePoint;
use regex::Regex;
use std::sync::OnceLock;

/// Leading decimal label of a sub-point line: "1.1", "2.10.", "1.2.3 ".
fn sub_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(?:\.\d+)+\.?\s*").expect("Invalid regex"))
}

/// Parser state: either no record is open, or one is being accumulated.
enum State {
    NoOpenRecord,
    RecordOpen(OutlinePoint),
}

impl State {
    /// Close the open record, if any, appending it to `points`.
    ///
    /// Records with an empty main point are discarded rather than finalized.
    fn flush(self, points: &mut Vec<OutlinePoint>) -> State {
        if let State::RecordOpen(point) = self {
            if !point.main_point.is_empty() {
                points.push(point);
            }
        }
        State::NoOpenRecord
    }
}

/// Parse free-form numbered-list text into an ordered outline.
pub fn parse_outline(raw: &str) -> Vec<OutlinePoint> {
    let mut points = Vec::new();
    let mut state = State::NoOpenRecord;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        let dot_count = line.matches('.').count();
        let label = sub_label_re().find(line);

        if label.is_some() || dot_count > 1 {
            // Sub-point. Dropped silently when no record is open.
            if let State::RecordOpen(point) = &mut state {
                let sub = match label {
                    Some(m) => line[m.end()..].trim().to_string(),
                    // No decimal label, classified only by its extra dots:
                    // fall back to the text after the last one.
                    None => line[line.rfind('.').unwrap() + 1..].trim().to_string(),
                };
                let last_blank = point.sub_points.last().is_some_and(|s| s.is_empty());
                if !(sub.is_empty() && last_blank) {
                    point.sub_points.push(sub);
                }
            }
        } else if dot_count == 1 {
            // Main point: text after the first dot. Closes any open record.
            let main = line[line.find('.').unwrap() + 1..].trim().to_string();
            state = state.flush(&mut points);
            if !main.is_empty() {
                state = State::RecordOpen(OutlinePoint::new(main));
            }
        }
        // Digit-prefixed line without any dot: ignored.
    }

    state.flush(&mut points);
    points
}
