//! Text normalization with typo correction and synonym expansion.
//!
//! Produces the canonical token stream everything downstream vectorizes:
//! lowercased, punctuation-free, snapped onto the command vocabulary when a
//! near-miss is close enough, and enriched with canonical concept tokens for
//! every registered surface variant found in the text.

use super::distance::closest_match;

/// Direct commands the surrounding terminal understands. Whole-string typo
/// correction only ever snaps onto one of these.
pub const COMMAND_VOCABULARY: &[&str] = &[
    "help",
    "about",
    "projects",
    "skills",
    "experience",
    "contact",
    "education",
    "certifications",
    "leadership",
    "sudo",
    "clear",
];

/// Maximum edit distance tolerated when correcting a command typo.
const COMMAND_MAX_DISTANCE: usize = 2;

/// A correction must also clear this similarity ratio, so very short inputs
/// cannot snap onto an unrelated command.
const COMMAND_MIN_SIMILARITY: f32 = 0.7;

/// Surface variants mapped to the canonical concept token appended for them.
/// Expansion is additive: original tokens stay, improving term-vector recall.
const VARIATIONS: &[(&str, &[&str])] = &[
    ("what", &["what", "which", "tell me about"]),
    ("who", &["who", "whom"]),
    ("where", &["where"]),
    ("when", &["when"]),
    ("how", &["how"]),
    ("why", &["why"]),
    (
        "skills",
        &[
            "skills",
            "skill",
            "technologies",
            "tech",
            "tools",
            "languages",
            "frameworks",
        ],
    ),
    (
        "projects",
        &["projects", "project", "built", "created", "developed", "work"],
    ),
    (
        "experience",
        &["experience", "work", "job", "career", "intern", "internship"],
    ),
    (
        "education",
        &["education", "degree", "college", "university", "studied", "learning"],
    ),
    (
        "contact",
        &["contact", "email", "linkedin", "github", "twitter", "reach", "connect"],
    ),
    ("about", &["about", "who are you", "introduce", "tell me"]),
];

/// Normalize raw user text.
///
/// Steps, in order: lowercase; map non-word, non-space characters to spaces;
/// collapse whitespace runs; trim. Then try to correct the whole string as a
/// mistyped command, and finally append canonical concept tokens for every
/// surface variant the text contains.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut processed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(corrected) = closest_match(&processed, COMMAND_VOCABULARY, COMMAND_MAX_DISTANCE) {
        if corrected.similarity > COMMAND_MIN_SIMILARITY {
            processed = corrected.candidate.to_string();
        }
    }

    for (canonical, variants) in VARIATIONS {
        for variant in *variants {
            if processed.contains(variant) {
                processed.push(' ');
                processed.push_str(canonical);
            }
        }
    }

    processed
}
