//! # Brain Module
//!
//! Fast, non-LLM matching engine for TermFolio.
//! Answers free-text questions about the portfolio owner from a fixed
//! knowledge base. No model inference, no network, no state between calls.
//!
//! ## Components
//! - `distance`: Levenshtein edit distance for typo tolerance
//! - `normalize`: text cleanup, command typo correction, synonym expansion
//! - `vector`: bag-of-words term vectors and cosine similarity
//! - `scope`: keyword gate deciding whether a question is on-topic
//! - `twisted`: heuristics for ambiguous, indirect, or trick questions
//! - `response`: per-category templates for direct and twisted replies
//! - `engine`: the query orchestrator

pub mod distance;
pub mod engine;
pub mod normalize;
pub mod response;
pub mod scope;
pub mod twisted;
pub mod vector;

// Re-export main types for convenience
pub use engine::TerminalBrain;
#[allow(unused_imports)]
pub use vector::{TermVector, Vectorizer};
