//! Scope gate: is a question about the portfolio owner at all?
//!
//! Coarse and recall-oriented. False positives are tolerated (later stages
//! still have to find a matching chunk); a rejection short-circuits the whole
//! pipeline with a fixed out-of-scope message.

use std::collections::BTreeSet;

use crate::knowledge::KnowledgeBase;

/// Domain nouns that make a question on-topic regardless of the subject.
const DOMAIN_NOUNS: &[&str] = &[
    "portfolio",
    "skill",
    "project",
    "experience",
    "education",
    "contact",
    "certification",
    "leadership",
    "about",
    "who",
    "what",
    "you",
    "your",
    "workshop",
    "hackathon",
    "intern",
];

/// Question lead-ins that signal the asker is addressing the subject.
const QUESTION_LEAD_INS: &[&str] = &[
    "tell me",
    "show me",
    "can you tell",
    "do you know",
    "what can",
    "how can",
    "where did",
    "when did",
];

/// Subject-name tokens shorter than this are skipped; initials and particles
/// would match almost anything.
const MIN_DERIVED_TOKEN_CHARS: usize = 4;

/// Keyword-containment gate built from the knowledge base.
pub struct ScopeGate {
    keywords: Vec<String>,
}

impl ScopeGate {
    /// Derive the keyword list from live knowledge: subject-name fragments,
    /// every named technology and expertise area, project and institution
    /// tokens, employer names, plus the fixed nouns and lead-ins.
    pub fn from_knowledge(knowledge: &KnowledgeBase) -> Self {
        let mut keywords: BTreeSet<String> = BTreeSet::new();

        for noun in DOMAIN_NOUNS.iter().chain(QUESTION_LEAD_INS) {
            keywords.insert(noun.to_string());
        }

        for token in knowledge.personal.name.split_whitespace() {
            keywords.insert(token.to_lowercase());
        }
        for identity in &knowledge.personal.identities {
            extend_with_tokens(&mut keywords, identity);
        }

        let skills = &knowledge.skills;
        for entry in skills
            .languages
            .iter()
            .chain(&skills.frameworks)
            .chain(&skills.databases)
            .chain(&skills.security_tools)
        {
            keywords.insert(entry.to_lowercase());
        }
        for area in &skills.expertise {
            keywords.insert(area.to_lowercase());
            extend_with_tokens(&mut keywords, area);
        }

        for project in &knowledge.projects {
            keywords.insert(project.name.to_lowercase());
            extend_with_tokens(&mut keywords, &project.name);
        }

        extend_with_tokens(&mut keywords, &knowledge.education.institution);
        keywords.insert(knowledge.education.institution.to_lowercase());

        for experience in &knowledge.experience {
            keywords.insert(experience.company.to_lowercase());
        }

        Self {
            keywords: keywords.into_iter().collect(),
        }
    }

    /// True when the lowercased question contains any gate keyword.
    pub fn is_within_scope(&self, question: &str) -> bool {
        if question.trim().is_empty() {
            return false;
        }
        let question = question.to_lowercase();
        self.keywords.iter().any(|k| question.contains(k.as_str()))
    }
}

fn extend_with_tokens(keywords: &mut BTreeSet<String>, phrase: &str) {
    for token in phrase.split_whitespace() {
        let token: String = token
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if token.chars().count() >= MIN_DERIVED_TOKEN_CHARS {
            keywords.insert(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> ScopeGate {
        ScopeGate::from_knowledge(&KnowledgeBase::builtin().unwrap())
    }

    #[test]
    fn test_domain_questions_pass() {
        let gate = gate();
        assert!(gate.is_within_scope("what projects have you built"));
        assert!(gate.is_within_scope("tell me about yourself"));
        assert!(gate.is_within_scope("which certifications do you hold"));
    }

    #[test]
    fn test_subject_name_passes() {
        let gate = gate();
        assert!(gate.is_within_scope("who is Mara?"));
        assert!(gate.is_within_scope("is lindqvist available for consulting"));
    }

    #[test]
    fn test_named_technology_passes() {
        let gate = gate();
        assert!(gate.is_within_scope("any rust experience?"));
        assert!(gate.is_within_scope("ever used nmap"));
    }

    #[test]
    fn test_disjoint_question_is_rejected() {
        // no gate keyword appears anywhere in this string
        assert!(!gate().is_within_scope("tomorrow the weather will be rainy"));
    }

    #[test]
    fn test_empty_is_rejected() {
        let gate = gate();
        assert!(!gate.is_within_scope(""));
        assert!(!gate.is_within_scope("   "));
    }
}
