//! Extractor: splits raw CV text into taxonomy sections using keyword heuristics.
//!
//! Algorithm, per section in taxonomy order:
//! 1. Take the non-blank, trimmed lines of the text.
//! 2. The section starts at the first line containing one of its keywords.
//! 3. Collect lines from the start until `MAX_SECTION_LINES` are held, or until a
//!    line past the grace window contains a keyword of ANY section (that line is
//!    the next section's header and is excluded).
//!
//! The grace window covers the start line and the two after it (`i <= start + 2`),
//! so a header such as "Skills & Tools" cannot end its own section.

use chrono::Utc;
use tracing::debug;

use crate::cv::taxonomy::{matches_any_section, Section};
use crate::models::document::{SectionLines, StructuredDocument};

pub const MAX_SECTION_LINES: usize = 10;

/// Lines after the start line that are never treated as a boundary.
pub const BOUNDARY_GRACE_LINES: usize = 2;

/// Extracts a `StructuredDocument` from raw CV text. Pure apart from `extracted_at`.
pub fn extract(raw_text: &str) -> StructuredDocument {
    let lines = content_lines(raw_text);
    let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();

    let mut sections = SectionLines::default();
    for section in Section::ALL {
        sections[section] = extract_section(section, &lines, &lowered);
        debug!(
            "Extracted {} line(s) for section {section}",
            sections[section].len()
        );
    }

    StructuredDocument {
        sections,
        raw_text: raw_text.to_string(),
        extracted_at: Utc::now(),
    }
}

fn content_lines(raw_text: &str) -> Vec<&str> {
    raw_text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

fn extract_section(section: Section, lines: &[&str], lowered: &[String]) -> Vec<String> {
    let Some(start) = lowered.iter().position(|l| section.matches(l)) else {
        return Vec::new();
    };

    let mut collected = Vec::new();
    for (i, line) in lines.iter().enumerate().skip(start) {
        if i > start + BOUNDARY_GRACE_LINES && matches_any_section(&lowered[i]) {
            break;
        }

        collected.push(line.to_string());

        if collected.len() >= MAX_SECTION_LINES {
            break;
        }
    }
    collected
}
