//! Knowledge Store Tests
//!
//! Loading, shape validation, and chunk derivation for the knowledge base.

use std::fs;

use tempfile::tempdir;

use crate::brain::TerminalBrain;
use crate::error::AppError;
use crate::knowledge::{Category, KnowledgeBase};

#[cfg(test)]
mod loading_tests {
    use super::*;

    #[test]
    fn test_load_from_path_round_trips() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("knowledge.json");

        let knowledge = KnowledgeBase::builtin().unwrap();
        fs::write(&path, serde_json::to_string_pretty(&knowledge).unwrap()).unwrap();

        let loaded = KnowledgeBase::from_path(&path).expect("re-serialized profile must load");
        assert_eq!(loaded.personal.name, knowledge.personal.name);
        assert_eq!(loaded.projects.len(), knowledge.projects.len());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("does-not-exist.json");

        assert!(matches!(
            KnowledgeBase::from_path(&path),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            KnowledgeBase::from_json("{ not json"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        // a syntactically valid document without the required sections
        assert!(matches!(
            KnowledgeBase::from_json(r#"{"personal": null}"#),
            Err(AppError::Parse(_))
        ));
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_builtin_profile_is_valid() {
        let knowledge = KnowledgeBase::builtin().unwrap();
        assert!(knowledge.validate_shape().is_ok());
    }

    #[test]
    fn test_template_minimums_are_enforced() {
        // each mutation breaks one list the templates index into
        let break_identities = |kb: &mut KnowledgeBase| kb.personal.identities.truncate(2);
        let break_projects = |kb: &mut KnowledgeBase| kb.projects.truncate(1);
        let break_leadership = |kb: &mut KnowledgeBase| kb.leadership.truncate(1);
        let break_certifications = |kb: &mut KnowledgeBase| kb.certifications.truncate(1);
        let break_languages = |kb: &mut KnowledgeBase| kb.skills.languages.truncate(2);
        let break_experience = |kb: &mut KnowledgeBase| kb.experience.clear();

        let mutations: Vec<(&str, fn(&mut KnowledgeBase))> = vec![
            ("identities", break_identities),
            ("projects", break_projects),
            ("leadership", break_leadership),
            ("certifications", break_certifications),
            ("languages", break_languages),
            ("experience", break_experience),
        ];

        for (label, mutate) in mutations {
            let mut knowledge = KnowledgeBase::builtin().unwrap();
            mutate(&mut knowledge);
            assert!(
                matches!(knowledge.validate_shape(), Err(AppError::Validation(_))),
                "truncated {label} must fail shape validation"
            );
        }
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut knowledge = KnowledgeBase::builtin().unwrap();
        knowledge.contact.email = "not-an-email".to_string();
        assert!(knowledge.validate_shape().is_err());
    }

    #[test]
    fn test_brain_construction_validates() {
        let mut knowledge = KnowledgeBase::builtin().unwrap();
        knowledge.skills.expertise.truncate(1);
        assert!(TerminalBrain::new(knowledge).is_err());
    }
}

#[cfg(test)]
mod chunk_tests {
    use super::*;

    #[test]
    fn test_every_category_is_represented() {
        let knowledge = KnowledgeBase::builtin().unwrap();
        let chunks = knowledge.chunks();

        for category in [
            Category::Personal,
            Category::Skills,
            Category::Projects,
            Category::Education,
            Category::Certifications,
            Category::Experience,
            Category::Leadership,
            Category::Contact,
        ] {
            assert!(
                chunks.iter().any(|c| c.category == category),
                "no chunk derived for {category}"
            );
        }
    }

    #[test]
    fn test_project_chunks_carry_name_and_tech_keywords() {
        let knowledge = KnowledgeBase::builtin().unwrap();
        let chunks = knowledge.chunks();

        for project in &knowledge.projects {
            let chunk = chunks
                .iter()
                .find(|c| c.category == Category::Projects && c.text.contains(&project.name))
                .expect("each project derives a chunk");

            assert!(chunk.keywords.contains(&project.name.to_lowercase()));
            for tech in &project.tech {
                assert!(chunk.keywords.contains(&tech.to_lowercase()));
            }
        }
    }

    #[test]
    fn test_chunks_are_rebuilt_fresh_per_call() {
        let knowledge = KnowledgeBase::builtin().unwrap();
        let first = knowledge.chunks();
        let second = knowledge.chunks();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.category, b.category);
        }
    }
}
