//! Knowledge Store for the terminal brain.
//!
//! The knowledge base is loaded once at startup, validated, and never mutated.
//! Retrieval works over flat [`KnowledgeChunk`]s derived from it on demand.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Built-in portfolio profile, embedded so the binary runs without any setup.
const BUILTIN_KNOWLEDGE: &str = include_str!("../data/knowledge.json");

/// Category of a retrievable fact unit.
///
/// Closed set: the response synthesizer matches exhaustively on this, so a new
/// category cannot be added without also providing its templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Personal,
    Skills,
    Projects,
    Education,
    Certifications,
    Experience,
    Leadership,
    Contact,
}

impl Category {
    /// Returns a human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Skills => "skills",
            Category::Projects => "projects",
            Category::Education => "education",
            Category::Certifications => "certifications",
            Category::Experience => "experience",
            Category::Leadership => "leadership",
            Category::Contact => "contact",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Who the portfolio owner is.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Personal {
    /// Full display name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Professional identities, most prominent first. The twisted-path
    /// templates quote the first three, so at least three must exist.
    #[validate(length(min = 3))]
    pub identities: Vec<String>,
    /// Free-text self summary.
    #[validate(length(min = 1))]
    pub summary: String,
}

/// Named skill lists.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Skills {
    /// Programming languages; templates quote the first three.
    #[validate(length(min = 3))]
    pub languages: Vec<String>,
    #[validate(length(min = 1))]
    pub frameworks: Vec<String>,
    #[validate(length(min = 1))]
    pub databases: Vec<String>,
    /// Security tooling; templates quote the first three.
    #[validate(length(min = 3))]
    pub security_tools: Vec<String>,
    /// Expertise areas; templates quote the first three.
    #[validate(length(min = 3))]
    pub expertise: Vec<String>,
}

/// One portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Project {
    #[validate(length(min = 1))]
    pub name: String,
    /// Technologies the project was built with.
    #[validate(length(min = 1))]
    pub tech: Vec<String>,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Formal education plus self-study topics.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Education {
    #[validate(length(min = 1))]
    pub degree: String,
    #[validate(length(min = 1))]
    pub period: String,
    #[validate(length(min = 1))]
    pub institution: String,
    /// Ongoing learning topics; templates quote the first three.
    #[validate(length(min = 3))]
    pub continuous_learning: Vec<String>,
}

/// One professional engagement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Experience {
    #[validate(length(min = 1))]
    pub role: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub period: String,
    /// Bullet points describing the engagement.
    #[validate(length(min = 1))]
    pub details: Vec<String>,
}

/// One leadership or community role. Organization and period are optional for
/// informal involvement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Leadership {
    #[validate(length(min = 1))]
    pub role: String,
    pub organization: Option<String>,
    pub period: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
}

impl Leadership {
    /// Heading line shared by chunk text and response templates:
    /// `role[ at organization][ (period)]`.
    pub fn heading(&self) -> String {
        let mut heading = self.role.clone();
        if let Some(organization) = &self.organization {
            heading.push_str(" at ");
            heading.push_str(organization);
        }
        if let Some(period) = &self.period {
            heading.push_str(&format!(" ({})", period));
        }
        heading
    }
}

/// Contact handles.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Contact {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub linkedin: String,
    #[validate(length(min = 1))]
    pub github: String,
    #[validate(length(min = 1))]
    pub twitter: String,
}

/// The complete, immutable knowledge base about one subject.
///
/// Constructed once at process start and handed to
/// [`TerminalBrain::new`](crate::brain::engine::TerminalBrain::new); no module
/// reads it through a global.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KnowledgeBase {
    #[validate(nested)]
    pub personal: Personal,
    #[validate(nested)]
    pub skills: Skills,
    /// Templates quote the first two projects.
    #[validate(length(min = 2), nested)]
    pub projects: Vec<Project>,
    #[validate(nested)]
    pub education: Education,
    /// Templates quote the first two certifications.
    #[validate(length(min = 2))]
    pub certifications: Vec<String>,
    #[validate(length(min = 1), nested)]
    pub experience: Vec<Experience>,
    /// Templates quote the first two leadership roles.
    #[validate(length(min = 2), nested)]
    pub leadership: Vec<Leadership>,
    #[validate(nested)]
    pub contact: Contact,
}

/// One retrievable fact unit derived from the knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeChunk {
    pub category: Category,
    /// Searchable prose rendering of the fact.
    pub text: String,
    /// Free-text tags boosting recall beyond the prose itself.
    pub keywords: Vec<String>,
}

/// A chunk paired with its similarity to the current query. Transient: built
/// for ranking and dropped once a response is rendered.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: KnowledgeChunk,
    pub similarity: f32,
}

impl KnowledgeBase {
    /// Parse the embedded default profile.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_json(BUILTIN_KNOWLEDGE)
    }

    /// Parse a knowledge base from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let knowledge: KnowledgeBase = serde_json::from_str(raw)?;
        Ok(knowledge)
    }

    /// Read and parse a knowledge base from a file.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "knowledge file not found: {}",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Enforce the shape contract the response templates rely on.
    ///
    /// Templates index fixed positions (first/second identity, first two
    /// projects, ...), so a too-short list is a configuration error reported
    /// at load time rather than a broken answer at query time.
    pub fn validate_shape(&self) -> Result<(), AppError> {
        self.validate()?;
        Ok(())
    }

    /// Derive the flat list of retrievable chunks.
    ///
    /// Recomputed per query; chunk order is fixed and doubles as the
    /// tie-break order during ranking.
    pub fn chunks(&self) -> Vec<KnowledgeChunk> {
        let mut chunks = Vec::new();

        chunks.push(KnowledgeChunk {
            category: Category::Personal,
            text: format!(
                "Name: {}. Professional identities: {}. {}",
                self.personal.name,
                self.personal.identities.join(", "),
                self.personal.summary
            ),
            keywords: to_keywords(&[
                "name",
                "who",
                "about",
                "identity",
                "professional",
                "developer",
                "engineer",
                "security",
            ]),
        });

        chunks.push(KnowledgeChunk {
            category: Category::Skills,
            text: format!(
                "Languages: {}. Frameworks: {}. Databases: {}. Security tools: {}. Expertise: {}",
                self.skills.languages.join(", "),
                self.skills.frameworks.join(", "),
                self.skills.databases.join(", "),
                self.skills.security_tools.join(", "),
                self.skills.expertise.join(", ")
            ),
            keywords: to_keywords(&[
                "skills",
                "technologies",
                "languages",
                "frameworks",
                "tools",
                "expertise",
                "what can",
                "proficient",
            ]),
        });

        for project in &self.projects {
            let mut keywords = to_keywords(&["project", "built", "created", "developed"]);
            keywords.push(project.name.to_lowercase());
            keywords.extend(project.tech.iter().map(|t| t.to_lowercase()));
            chunks.push(KnowledgeChunk {
                category: Category::Projects,
                text: format!(
                    "{}: {}. Technologies: {}",
                    project.name,
                    project.description,
                    project.tech.join(", ")
                ),
                keywords,
            });
        }

        chunks.push(KnowledgeChunk {
            category: Category::Education,
            text: format!(
                "Education: {} ({}) at {}. Continuous learning: {}",
                self.education.degree,
                self.education.period,
                self.education.institution,
                self.education.continuous_learning.join(", ")
            ),
            keywords: to_keywords(&[
                "education",
                "degree",
                "college",
                "university",
                "studied",
                "learning",
                "background",
            ]),
        });

        chunks.push(KnowledgeChunk {
            category: Category::Certifications,
            text: format!("Certifications: {}", self.certifications.join(". ")),
            keywords: to_keywords(&[
                "certification",
                "certified",
                "certificate",
                "award",
                "achievement",
            ]),
        });

        for experience in &self.experience {
            let mut keywords = to_keywords(&[
                "experience",
                "work",
                "intern",
                "job",
                "career",
                "professional",
            ]);
            keywords.push(experience.role.to_lowercase());
            keywords.push(experience.company.to_lowercase());
            chunks.push(KnowledgeChunk {
                category: Category::Experience,
                text: format!(
                    "{} at {} ({}): {}",
                    experience.role,
                    experience.company,
                    experience.period,
                    experience.details.join(". ")
                ),
                keywords,
            });
        }

        for leadership in &self.leadership {
            chunks.push(KnowledgeChunk {
                category: Category::Leadership,
                text: format!("{}: {}", leadership.heading(), leadership.description),
                keywords: to_keywords(&[
                    "leadership",
                    "coordinator",
                    "council",
                    "community",
                    "organize",
                    "workshop",
                    "hackathon",
                ]),
            });
        }

        chunks.push(KnowledgeChunk {
            category: Category::Contact,
            text: format!(
                "Contact: Email {}, LinkedIn {}, GitHub {}, Twitter {}",
                self.contact.email, self.contact.linkedin, self.contact.github, self.contact.twitter
            ),
            keywords: to_keywords(&[
                "contact",
                "email",
                "linkedin",
                "github",
                "twitter",
                "reach",
                "connect",
                "social",
            ]),
        });

        chunks
    }
}

fn to_keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_knowledge_parses_and_validates() {
        let knowledge = KnowledgeBase::builtin().expect("builtin profile must parse");
        knowledge
            .validate_shape()
            .expect("builtin profile must satisfy the shape contract");
    }

    #[test]
    fn test_chunk_per_fact_unit() {
        let knowledge = KnowledgeBase::builtin().unwrap();
        let chunks = knowledge.chunks();

        // one each for personal/skills/education/certifications/contact,
        // one per project, experience, and leadership entry
        let expected = 5
            + knowledge.projects.len()
            + knowledge.experience.len()
            + knowledge.leadership.len();
        assert_eq!(chunks.len(), expected);

        assert_eq!(chunks[0].category, Category::Personal);
        assert_eq!(chunks[1].category, Category::Skills);
        assert_eq!(
            chunks.last().map(|c| c.category),
            Some(Category::Contact)
        );
    }

    #[test]
    fn test_chunk_text_reflects_live_values() {
        let mut knowledge = KnowledgeBase::builtin().unwrap();
        knowledge.personal.name = "Someone Else".to_string();

        let chunks = knowledge.chunks();
        assert!(chunks[0].text.contains("Someone Else"));
    }

    #[test]
    fn test_short_list_fails_validation() {
        let mut knowledge = KnowledgeBase::builtin().unwrap();
        knowledge.personal.identities.truncate(1);

        assert!(matches!(
            knowledge.validate_shape(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_leadership_heading_degrades() {
        let lead = Leadership {
            role: "Community Involvement".to_string(),
            organization: None,
            period: None,
            description: "mentors newcomers".to_string(),
        };
        assert_eq!(lead.heading(), "Community Involvement");

        let lead = Leadership {
            role: "Chapter Lead".to_string(),
            organization: Some("OWASP Helsinki".to_string()),
            period: Some("2023".to_string()),
            description: "runs meetups".to_string(),
        };
        assert_eq!(lead.heading(), "Chapter Lead at OWASP Helsinki (2023)");
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Personal.label(), "personal");
        assert_eq!(Category::Skills.label(), "skills");
        assert_eq!(Category::Contact.to_string(), "contact");
    }
}
