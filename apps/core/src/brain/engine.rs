//! Query orchestrator: scope gate, twisted routing, retrieval, synthesis.
//!
//! The public entry point of the brain. Stateless per call and safe under
//! concurrent use: the knowledge base is read-only after construction and the
//! only nondeterminism is the per-call random draw on the twisted path.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use super::response;
use super::scope::ScopeGate;
use super::twisted;
use super::vector::Vectorizer;
use crate::error::AppError;
use crate::knowledge::{KnowledgeBase, ScoredChunk};

/// Minimum similarity for a chunk to count as a direct match. Deliberately
/// loose so typo-ridden questions still land.
pub const DIRECT_MATCH_THRESHOLD: f32 = 0.12;

/// Stricter cutoff for the flat command-output fallback table.
pub const FALLBACK_MATCH_THRESHOLD: f32 = 0.35;

/// Cutoff for the legacy compatibility path, stricter again because the table
/// is only consulted after the knowledge base already failed to answer.
pub const LEGACY_MATCH_THRESHOLD: f32 = 0.55;

/// Every failure-shaped reply starts with this glyph; callers render it as a
/// normal message, never as an error.
pub const WARNING_GLYPH: &str = "⚠️";

const EMPTY_INPUT_MESSAGE: &str = "⚠️ This question is outside the scope of this system.";

const NO_MATCH_MESSAGE: &str =
    "⚠️ I couldn't find relevant information to answer that question. Try asking about my \
     skills, projects, experience, education, certifications, leadership, or contact information.";

/// The assembled question-answering engine.
///
/// Owns the validated knowledge base and the components built from it.
pub struct TerminalBrain {
    knowledge: KnowledgeBase,
    gate: ScopeGate,
    vectorizer: Vectorizer,
}

impl TerminalBrain {
    /// Validate the knowledge base and assemble the engine.
    ///
    /// Shape violations surface here as [`AppError::Validation`] so a
    /// misconfigured profile fails at startup, not mid-answer.
    pub fn new(knowledge: KnowledgeBase) -> Result<Self, AppError> {
        knowledge.validate_shape()?;
        let gate = ScopeGate::from_knowledge(&knowledge);
        Ok(Self {
            knowledge,
            gate,
            vectorizer: Vectorizer::new(),
        })
    }

    #[allow(dead_code)]
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Answer a free-text question.
    ///
    /// Total: every input produces a displayable string, never an error. The
    /// twisted path draws its phrasing from a fresh thread-local generator,
    /// so concurrent callers cannot influence each other's draws.
    pub fn answer(&self, query: &str) -> String {
        self.respond(query, None, &mut rand::thread_rng())
    }

    /// [`answer`](Self::answer) with a caller-supplied random source, the
    /// seam deterministic tests use.
    #[allow(dead_code)]
    pub fn answer_with_rng<R: Rng>(&self, query: &str, rng: &mut R) -> String {
        self.respond(query, None, rng)
    }

    /// [`answer`](Self::answer) with an optional flat command-output table
    /// consulted when no knowledge chunk clears the direct threshold.
    #[allow(dead_code)]
    pub fn answer_with_fallback(
        &self,
        query: &str,
        command_outputs: Option<&BTreeMap<String, String>>,
    ) -> String {
        self.respond(query, command_outputs, &mut rand::thread_rng())
    }

    /// Backward-compatible entry for callers still keyed to canned command
    /// outputs: knowledge base first, then the table at a strict cutoff.
    #[allow(dead_code)]
    pub fn answer_legacy(&self, query: &str, command_outputs: &BTreeMap<String, String>) -> String {
        let knowledge_answer = self.answer(query);
        if !knowledge_answer.contains(WARNING_GLYPH) {
            return knowledge_answer;
        }

        match self.best_table_match(query, command_outputs, LEGACY_MATCH_THRESHOLD) {
            Some(canned) => canned,
            None => knowledge_answer,
        }
    }

    fn respond<R: Rng>(
        &self,
        query: &str,
        command_outputs: Option<&BTreeMap<String, String>>,
        rng: &mut R,
    ) -> String {
        let question = query.trim();
        if question.is_empty() {
            return EMPTY_INPUT_MESSAGE.to_string();
        }

        if !self.gate.is_within_scope(question) {
            debug!(question, "rejected by scope gate");
            return self.out_of_scope_message();
        }

        if twisted::is_twisted(question) {
            debug!(question, "routed to twisted response path");
            return response::twisted_response(&self.knowledge, &self.vectorizer, question, rng);
        }

        let ranked = self.vectorizer.rank_chunks(&self.knowledge, question);
        let top_matches: Vec<ScoredChunk> = ranked
            .into_iter()
            .filter(|m| m.similarity >= DIRECT_MATCH_THRESHOLD)
            .collect();

        if top_matches.is_empty() {
            if let Some(outputs) = command_outputs {
                if let Some(canned) =
                    self.best_table_match(question, outputs, FALLBACK_MATCH_THRESHOLD)
                {
                    debug!(question, "answered from command-output fallback table");
                    return canned;
                }
            }
            debug!(question, "no chunk cleared the match threshold");
            return NO_MATCH_MESSAGE.to_string();
        }

        debug!(
            question,
            category = %top_matches[0].chunk.category,
            similarity = top_matches[0].similarity,
            "answering from best chunk"
        );
        response::direct_response(&self.knowledge, question, &top_matches)
    }

    /// Best canned output at or above `cutoff`, ties keeping the first table
    /// entry in key order.
    fn best_table_match(
        &self,
        question: &str,
        command_outputs: &BTreeMap<String, String>,
        cutoff: f32,
    ) -> Option<String> {
        let question_vector = self.vectorizer.vectorize(question);

        let mut best: Option<(f32, &String)> = None;
        for output in command_outputs.values() {
            let similarity = question_vector.cosine(&self.vectorizer.vectorize(output));
            if best.map_or(similarity > 0.0, |(top, _)| similarity > top) {
                best = Some((similarity, output));
            }
        }

        best.filter(|(similarity, _)| *similarity >= cutoff)
            .map(|(_, output)| output.clone())
    }

    fn out_of_scope_message(&self) -> String {
        format!(
            "⚠️ This question is outside the scope of this system. I can only answer questions \
             about {}'s portfolio, skills, projects, experience, education, and contact \
             information.",
            self.knowledge.personal.name
        )
    }
}
