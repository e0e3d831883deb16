use std::ops::{Index, IndexMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cv::taxonomy::Section;

/// Extracted lines for every taxonomy section, keyed by `Section`.
///
/// Serialized as five named arrays so the cache file stays readable
/// (`{"education": [...], "skills": [...], ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLines {
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub contact: Vec<String>,
}

impl SectionLines {
    /// Iterates `(section, lines)` in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[String])> {
        Section::ALL.into_iter().map(move |s| (s, self[s].as_slice()))
    }
}

impl Index<Section> for SectionLines {
    type Output = Vec<String>;

    fn index(&self, section: Section) -> &Vec<String> {
        match section {
            Section::Education => &self.education,
            Section::Skills => &self.skills,
            Section::Projects => &self.projects,
            Section::Experience => &self.experience,
            Section::Contact => &self.contact,
        }
    }
}

impl IndexMut<Section> for SectionLines {
    fn index_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Education => &mut self.education,
            Section::Skills => &mut self.skills,
            Section::Projects => &mut self.projects,
            Section::Experience => &mut self.experience,
            Section::Contact => &mut self.contact,
        }
    }
}

/// The structured form of a CV. Immutable once produced; replaced wholesale on re-extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocument {
    #[serde(flatten)]
    pub sections: SectionLines,
    pub raw_text: String,
    pub extracted_at: DateTime<Utc>,
}

impl StructuredDocument {
    pub fn lines(&self, section: Section) -> &[String] {
        &self.sections[section]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mut_writes_to_named_field() {
        let mut lines = SectionLines::default();
        lines[Section::Skills].push("Rust".to_string());
        assert_eq!(lines.skills, vec!["Rust".to_string()]);
        assert!(lines.education.is_empty());
    }

    #[test]
    fn test_iter_follows_taxonomy_order() {
        let lines = SectionLines::default();
        let order: Vec<Section> = lines.iter().map(|(s, _)| s).collect();
        assert_eq!(order, Section::ALL.to_vec());
    }

    #[test]
    fn test_serializes_to_flat_cache_layout() {
        let doc = StructuredDocument {
            sections: SectionLines {
                education: vec!["BSc".to_string()],
                ..Default::default()
            },
            raw_text: "BSc".to_string(),
            extracted_at: "2024-03-01T10:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["education"][0], "BSc");
        assert!(value["contact"].as_array().unwrap().is_empty());
        assert_eq!(value["rawText"], "BSc");
        assert!(value["extractedAt"].as_str().unwrap().starts_with("2024-03-01T10:00:00"));
        assert!(value.get("sections").is_none());
    }

    #[test]
    fn test_deserializes_cache_with_missing_sections() {
        let json = r#"{
            "skills": ["Python, Go"],
            "rawText": "Skills\nPython, Go",
            "extractedAt": "2024-03-01T10:00:00.000Z"
        }"#;

        let doc: StructuredDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.lines(Section::Skills), ["Python, Go".to_string()]);
        assert!(doc.lines(Section::Projects).is_empty());
    }
}
