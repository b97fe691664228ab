//! Section parser: combined generation text to a labeled section map.
//!
//! Grammar: a line is a header iff, after trimming, it is one or more
//! uppercase letters or underscores followed by a colon and nothing else
//! (e.g. `SPEC:`). A header opens accumulation under its label; a repeated
//! header resets it (last occurrence wins). Text before the first header
//! belongs to no section and is dropped. Bodies are trimmed at the end; a
//! label whose body trims to empty is absent, not present-but-empty.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

/// The labels the builder agent is instructed to emit, in order. The parser
/// itself accepts any `[A-Z_]+` label; these are just the ones persisted
/// into dedicated columns.
pub const CANONICAL_LABELS: [&str; 5] = ["SPEC", "SITE_MAP", "COMPONENTS", "COPY", "CODE_PLAN"];

lazy_static! {
    static ref HEADER: Regex = Regex::new(r"^([A-Z_]+):$").expect("valid header regex");
}

/// Parse combined text into a map of section label to trimmed body.
///
/// Total and resilient: missing labels, unknown labels, out-of-order labels,
/// and entirely header-less input all parse without error (the last case
/// yields an empty map).
pub fn parse_sections(text: &str) -> BTreeMap<String, String> {
    let mut bodies: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if let Some(captures) = HEADER.captures(line.trim()) {
            let label = captures[1].to_string();
            // Repeated header resets the accumulator: last occurrence wins
            bodies.insert(label.clone(), Vec::new());
            current = Some(label);
            continue;
        }
        if let Some(label) = &current {
            if let Some(lines) = bodies.get_mut(label) {
                lines.push(line);
            }
        }
    }

    bodies
        .into_iter()
        .filter_map(|(label, lines)| {
            let body = lines.join("\n").trim().to_string();
            if body.is_empty() {
                None
            } else {
                Some((label, body))
            }
        })
        .collect()
}
