//! Test Module
//!
//! Integration test suite for the TermFolio terminal brain.
//!
//! ## Test Categories
//! - `brain_tests`: full answer pipeline - scope gate, twisted routing,
//!   retrieval thresholds, randomized phrasing variants
//! - `knowledge_tests`: knowledge loading, validation, and chunk derivation

pub mod knowledge_tests;
