//! Answerer: routes a free-text question to an excerpt of the structured CV.
//!
//! Routing order:
//! 1. Section routing: the first taxonomy section whose keyword appears in the
//!    question answers with up to `SECTION_EXCERPT_LINES` of its lines.
//! 2. Word overlap: question words longer than two characters are matched
//!    against every section's lines; the first section with matches answers
//!    with up to `OVERLAP_EXCERPT_LINES` of them.
//! 3. A fixed fallback naming the askable topics.
//!
//! Never fails: a missing document yields `NOT_LOADED`.

use tracing::debug;

use crate::cv::taxonomy::Section;
use crate::models::document::StructuredDocument;

pub const SECTION_EXCERPT_LINES: usize = 5;
pub const OVERLAP_EXCERPT_LINES: usize = 3;
const MIN_WORD_LEN: usize = 3;

pub const NOT_LOADED: &str = "CV data is not loaded. Please try again.";
pub const FALLBACK: &str = "I couldn't find specific information about that in the CV. You can ask about education, skills, projects, experience, or contact information.";

pub fn answer(doc: Option<&StructuredDocument>, question: &str) -> String {
    let Some(doc) = doc else {
        return NOT_LOADED.to_string();
    };

    let question = question.to_lowercase();

    if let Some(section) = route_to_section(&question) {
        debug!("Question routed to section {section}");
        return section_answer(doc, section);
    }

    if let Some(lines) = overlapping_lines(doc, &question) {
        debug!("Question answered by word overlap ({} line(s))", lines.len());
        return format!("Found relevant information:\n{}", lines.join("\n"));
    }

    debug!("No section or word overlap for question");
    FALLBACK.to_string()
}

/// First section, in taxonomy order, with a keyword contained in the question.
fn route_to_section(question: &str) -> Option<Section> {
    Section::ALL.into_iter().find(|s| s.matches(question))
}

fn section_answer(doc: &StructuredDocument, section: Section) -> String {
    let lines = doc.lines(section);
    if lines.is_empty() {
        return format!("I found the {section} section but no specific content was extracted.");
    }

    let excerpt: Vec<&str> = lines
        .iter()
        .take(SECTION_EXCERPT_LINES)
        .map(String::as_str)
        .collect();
    format!("Here's information about {section}:\n{}", excerpt.join("\n"))
}

/// Lines of the first section containing any significant question word.
fn overlapping_lines<'a>(doc: &'a StructuredDocument, question: &str) -> Option<Vec<&'a str>> {
    let words: Vec<&str> = question
        .split(' ')
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .collect();
    if words.is_empty() {
        return None;
    }

    doc.sections.iter().find_map(|(_, lines)| {
        let matches: Vec<&str> = lines
            .iter()
            .filter(|line| {
                let lowered = line.to_lowercase();
                words.iter().any(|w| lowered.contains(w))
            })
            .take(OVERLAP_EXCERPT_LINES)
            .map(String::as_str)
            .collect();
        (!matches.is_empty()).then_some(matches)
    })
}
