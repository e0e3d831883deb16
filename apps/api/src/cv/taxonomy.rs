//! Section taxonomy: the fixed CV sections and the lowercase keywords that trigger them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five CV categories a question or a line can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Skills,
    Projects,
    Experience,
    Contact,
}

impl Section {
    /// Taxonomy order. Extraction and answering both iterate in this order,
    /// and the answerer's first-match routing depends on it.
    pub const ALL: [Section; 5] = [
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Experience,
        Section::Contact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Experience => "experience",
            Section::Contact => "contact",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Section::Education => EDUCATION_KEYWORDS,
            Section::Skills => SKILLS_KEYWORDS,
            Section::Projects => PROJECTS_KEYWORDS,
            Section::Experience => EXPERIENCE_KEYWORDS,
            Section::Contact => CONTACT_KEYWORDS,
        }
    }

    /// True when `lowered` (already lowercased) contains any of this section's keywords.
    pub fn matches(self, lowered: &str) -> bool {
        self.keywords().iter().any(|kw| lowered.contains(kw))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "degree",
    "university",
    "college",
    "study",
    "bsc",
    "msc",
    "phd",
];

const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technologies",
    "programming",
    "languages",
    "frameworks",
    "tools",
];

const PROJECTS_KEYWORDS: &[&str] = &[
    "projects",
    "project",
    "built",
    "developed",
    "created",
    "github",
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work",
    "employment",
    "job",
    "position",
    "role",
];

const CONTACT_KEYWORDS: &[&str] = &[
    "contact",
    "phone",
    "email",
    "location",
    "address",
    "linkedin",
];

/// True when `lowered` contains a keyword of any section. Used for boundary detection.
pub fn matches_any_section(lowered: &str) -> bool {
    Section::ALL.iter().any(|s| s.matches(lowered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_order_is_fixed() {
        let names: Vec<&str> = Section::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["education", "skills", "projects", "experience", "contact"]
        );
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for section in Section::ALL {
            for kw in section.keywords() {
                assert_eq!(*kw, kw.to_lowercase(), "{section} keyword {kw} is not lowercase");
            }
        }
    }

    #[test]
    fn test_matches_is_substring_based() {
        assert!(Section::Education.matches("bsc computer science"));
        assert!(Section::Experience.matches("networking")); // "work"
        assert!(!Section::Contact.matches("python, go"));
    }

    #[test]
    fn test_matches_any_section() {
        assert!(matches_any_section("github.com/someone"));
        assert!(!matches_any_section("lorem ipsum"));
    }

    #[test]
    fn test_section_serde_is_lowercase() {
        let json = serde_json::to_string(&Section::Projects).unwrap();
        assert_eq!(json, r#""projects""#);
        let back: Section = serde_json::from_str(r#""contact""#).unwrap();
        assert_eq!(back, Section::Contact);
    }
}
