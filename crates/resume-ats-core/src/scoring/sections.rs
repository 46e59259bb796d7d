//! Section heading detection.
//!
//! A line is a heading for a section when, after normalization, it equals one
//! of that section's synonyms ("Technical Skills", "Core Competencies"), or
//! when it is short, heading-shaped, and contains one of the section's
//! broader hints ("Relevant Project Experience").

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lines longer than this never match on a hint alone.
const HINT_MAX_CHARS: usize = 40;
/// Lines with more words than this never match on a hint alone.
const HINT_MAX_WORDS: usize = 5;

/// Résumé sections the scorers look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Work history.
    Experience,
    /// Degrees and schooling.
    Education,
    /// Skills and technologies.
    Skills,
}

impl Section {
    /// All sections, in conventional résumé order.
    pub const ALL: [Self; 3] = [Self::Experience, Self::Education, Self::Skills];

    /// Display name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Skills => "Skills",
        }
    }

    const fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Self::Experience => &[
                "experience",
                "work experience",
                "professional experience",
                "relevant experience",
                "employment",
                "employment history",
                "work history",
                "career history",
                "professional background",
            ],
            Self::Education => &[
                "education",
                "academic background",
                "academics",
                "education and training",
                "education & certifications",
                "education and certifications",
                "academic qualifications",
            ],
            Self::Skills => &[
                "skills",
                "technical skills",
                "key skills",
                "core skills",
                "core competencies",
                "competencies",
                "tech stack",
                "technologies",
                "technical proficiencies",
                "areas of expertise",
                "skills & tools",
                "skills and tools",
            ],
        }
    }

    const fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::Experience => &["experience", "employment", "work history"],
            Self::Education => &["education", "academic"],
            Self::Skills => &["skill", "competenc", "tech stack", "expertise", "proficienc"],
        }
    }
}

/// Headings of sections no scorer checks, used to end a section body.
const OTHER_HEADINGS: &[&str] = &[
    "summary",
    "professional summary",
    "profile",
    "objective",
    "career objective",
    "projects",
    "certifications",
    "licenses",
    "awards",
    "honors",
    "publications",
    "volunteer",
    "volunteering",
    "languages",
    "interests",
    "references",
    "contact",
];

/// Lowercase, strip decoration and a trailing colon, collapse whitespace.
fn normalize_heading(line: &str) -> String {
    let trimmed = line
        .trim()
        .trim_matches(|c: char| matches!(c, '#' | '*' | '=' | '_' | '-' | '\u{2014}'))
        .trim()
        .trim_end_matches(':')
        .trim();
    trimmed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_heading_shaped(normalized: &str) -> bool {
    !normalized.is_empty()
        && normalized.chars().count() <= HINT_MAX_CHARS
        && normalized.split_whitespace().count() <= HINT_MAX_WORDS
        && !normalized.ends_with('.')
        && normalized
            .chars()
            .next()
            .is_some_and(char::is_alphabetic)
}

/// Returns `true` if `line` is a heading for `section`.
pub fn is_heading(line: &str, section: Section) -> bool {
    let normalized = normalize_heading(line);
    if normalized.is_empty() {
        return false;
    }
    if section.synonyms().contains(&normalized.as_str()) {
        return true;
    }
    is_heading_shaped(&normalized) && section.hints().iter().any(|h| normalized.contains(h))
}

/// Returns `true` if `line` is a heading of any recognized section.
pub fn is_any_heading(line: &str) -> bool {
    Section::ALL.iter().any(|s| is_heading(line, *s))
        || OTHER_HEADINGS.contains(&normalize_heading(line).as_str())
}

/// Index of the first heading for `section` among `lines`.
pub fn find_heading(lines: &[&str], section: Section) -> Option<usize> {
    lines.iter().position(|l| is_heading(l, section))
}

/// Lines between the `section` heading and the next heading of any kind.
pub fn section_body<'a>(lines: &[&'a str], section: Section) -> Vec<&'a str> {
    let Some(start) = find_heading(lines, section) else {
        return Vec::new();
    };
    lines[start + 1..]
        .iter()
        .take_while(|l| !is_any_heading(l))
        .copied()
        .collect()
}
