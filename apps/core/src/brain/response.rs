//! Response synthesis: turns ranked knowledge chunks into natural-language
//! replies.
//!
//! Two independent paths. The direct path renders one deterministic template
//! per category. The twisted path rescans the knowledge base with a lower
//! acceptance threshold and varies its phrasing, drawing uniformly among
//! three hand-authored variants per category so repeated garbled input does
//! not read like a broken record. Every template interpolates live knowledge
//! values; nothing is copied into string literals.

use rand::Rng;

use super::vector::Vectorizer;
use crate::knowledge::{Category, KnowledgeBase, ScoredChunk};

/// Twisted-path acceptance threshold, more forgiving than the direct path's
/// cutoff so garbled input still lands on a category.
pub const TWISTED_MATCH_THRESHOLD: f32 = 0.1;

/// Last-resort line when no chunk matched and no category could be inferred.
const UNSURE_LINE: &str = "I'm not sure how to answer that. Try asking about my skills, \
                           projects, experience, education, or contact information.";

/// Render the direct reply for a question and its ranked, filtered matches.
///
/// Category resolution keeps the original precedence: the top chunk's
/// category is consulted together with keyword containment in the question,
/// personal first, contact last. With no resolvable category the top chunk's
/// raw text is returned, and with no matches at all the generic unsure line.
pub fn direct_response(
    knowledge: &KnowledgeBase,
    question: &str,
    matches: &[ScoredChunk],
) -> String {
    let top_category = matches.first().map(|m| m.chunk.category);

    match resolve_category(question, top_category) {
        Some(category) => render_direct(knowledge, category),
        None => matches
            .first()
            .map(|m| m.chunk.text.clone())
            .unwrap_or_else(|| UNSURE_LINE.to_string()),
    }
}

/// Infer the effective response category from the matched chunk and the
/// question's own wording.
fn resolve_category(question: &str, top: Option<Category>) -> Option<Category> {
    let q = question.to_lowercase();
    let matched = |category| top == Some(category);

    if matched(Category::Personal)
        || q.contains("who")
        || q.contains("about")
        || q.contains("introduce")
    {
        return Some(Category::Personal);
    }
    if matched(Category::Skills)
        || q.contains("skill")
        || q.contains("technology")
        || q.contains("what can")
    {
        return Some(Category::Skills);
    }
    if matched(Category::Projects)
        || q.contains("project")
        || q.contains("built")
        || q.contains("created")
    {
        return Some(Category::Projects);
    }
    if matched(Category::Education)
        || q.contains("education")
        || q.contains("degree")
        || q.contains("college")
    {
        return Some(Category::Education);
    }
    if matched(Category::Experience)
        || q.contains("experience")
        || q.contains("work")
        || q.contains("intern")
    {
        return Some(Category::Experience);
    }
    if matched(Category::Certifications) || q.contains("certification") || q.contains("certified") {
        return Some(Category::Certifications);
    }
    if matched(Category::Leadership)
        || q.contains("leadership")
        || q.contains("coordinator")
        || q.contains("council")
    {
        return Some(Category::Leadership);
    }
    if matched(Category::Contact)
        || q.contains("contact")
        || q.contains("email")
        || q.contains("reach")
    {
        return Some(Category::Contact);
    }

    None
}

/// Deterministic multi-line template for a category.
pub fn render_direct(knowledge: &KnowledgeBase, category: Category) -> String {
    match category {
        Category::Personal => format!(
            "Hi, I'm {}, a {} and {}. {}",
            knowledge.personal.name,
            nth(&knowledge.personal.identities, 0),
            nth(&knowledge.personal.identities, 1),
            knowledge.personal.summary
        ),

        Category::Skills => format!(
            "Technical Skills:\n\n\
             Languages: {}\n\n\
             Frameworks & Technologies: {}\n\n\
             Databases: {}\n\n\
             Security Tools: {}\n\n\
             Expertise Areas: {}",
            knowledge.skills.languages.join(", "),
            knowledge.skills.frameworks.join(", "),
            knowledge.skills.databases.join(", "),
            knowledge.skills.security_tools.join(", "),
            knowledge.skills.expertise.join(", ")
        ),

        Category::Projects => {
            let mut response = String::from("Recent Projects:\n\n");
            for (idx, project) in knowledge.projects.iter().enumerate() {
                response.push_str(&format!("{}. {}\n", idx + 1, project.name));
                response.push_str(&format!("   Technologies: {}\n", project.tech.join(", ")));
                response.push_str(&format!("   Description: {}\n\n", project.description));
            }
            response.trim_end().to_string()
        }

        Category::Education => format!(
            "Educational Background:\n\n\
             🎓 {} ({})\n   {}\n\n\
             📚 Continuous Learning:\n{}",
            knowledge.education.degree,
            knowledge.education.period,
            knowledge.education.institution,
            knowledge
                .education
                .continuous_learning
                .iter()
                .map(|item| format!("   • {}", item))
                .collect::<Vec<_>>()
                .join("\n")
        ),

        Category::Certifications => format!(
            "Certifications:\n\n{}",
            knowledge
                .certifications
                .iter()
                .map(|cert| format!("🏆 {}", cert))
                .collect::<Vec<_>>()
                .join("\n")
        ),

        Category::Experience => {
            let mut response = String::from("Professional Experience:\n\n");
            for experience in &knowledge.experience {
                response.push_str(&format!(
                    "{} – {} ({})\n",
                    experience.role, experience.company, experience.period
                ));
                for detail in &experience.details {
                    response.push_str(&format!("   • {}\n", detail));
                }
                response.push('\n');
            }
            response.trim_end().to_string()
        }

        Category::Leadership => {
            let mut response = String::from("Leadership & Community:\n\n");
            for leadership in &knowledge.leadership {
                response.push_str(&format!("🎯 {}\n", leadership.heading()));
                response.push_str(&format!("   • {}\n\n", leadership.description));
            }
            response.trim_end().to_string()
        }

        Category::Contact => format!(
            "📬 Get In Touch:\n\n\
             Email: {}\n\
             LinkedIn: {}\n\
             GitHub: {}\n\
             Twitter (X): {}\n\n\
             Feel free to reach out for collaborations, security consulting, or tech discussions!",
            knowledge.contact.email,
            knowledge.contact.linkedin,
            knowledge.contact.github,
            knowledge.contact.twitter
        ),
    }
}

/// Render the twisted-path reply.
///
/// Rescans every chunk at [`TWISTED_MATCH_THRESHOLD`]; on a category hit one
/// of three phrasing variants is drawn from `rng`. With no hit, a keyword
/// overlap against known technology and project tokens yields a fixed
/// introduction, and failing that one of three generic self-introductions.
pub fn twisted_response<R: Rng>(
    knowledge: &KnowledgeBase,
    vectorizer: &Vectorizer,
    question: &str,
    rng: &mut R,
) -> String {
    let q = question.trim().to_lowercase();

    let ranked = vectorizer.rank_chunks(knowledge, &q);
    if let Some(top) = ranked
        .iter()
        .find(|m| m.similarity >= TWISTED_MATCH_THRESHOLD)
    {
        return render_twisted(knowledge, top.chunk.category, rng);
    }

    if question_mentions_known_token(knowledge, &q) {
        return keyword_introduction(knowledge);
    }

    generic_introduction(knowledge, rng)
}

/// One of three phrasing variants for a detected category.
pub fn render_twisted<R: Rng>(knowledge: &KnowledgeBase, category: Category, rng: &mut R) -> String {
    let variants = twisted_variants(knowledge, category);
    pick(rng, &variants)
}

/// The full variant set for a category. Exposed so tests can assert a drawn
/// reply belongs to the fixed set.
pub fn twisted_variants(knowledge: &KnowledgeBase, category: Category) -> Vec<String> {
    let personal = &knowledge.personal;
    let skills = &knowledge.skills;

    match category {
        Category::Projects => {
            let listing = knowledge
                .projects
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    format!(
                        "{}. {}\n   Built with: {}\n   {}",
                        i + 1,
                        p.name,
                        p.tech.join(", "),
                        p.description
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n");
            let names = knowledge
                .projects
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let first = project_nth(knowledge, 0);
            let second = project_nth(knowledge, 1);
            vec![
                format!(
                    "Ah, curious about my work! I've built {} projects:\n\n{}",
                    knowledge.projects.len(),
                    listing
                ),
                format!(
                    "Great question! My projects include {} (using {}) and {}. Each showcases a \
                     different side of my development and security skills.",
                    first.0,
                    first.1.join(" and "),
                    second.0
                ),
                format!(
                    "I've worked on several projects: {}. {} shows my detection engineering side, \
                     while {} shows my full-stack capabilities.",
                    names, first.0, second.0
                ),
            ]
        }

        Category::Skills => vec![
            format!(
                "I work with {}, and frameworks like {}. For databases, I use {}. My security \
                 toolkit includes {}.",
                skills.languages.join(", "),
                skills.frameworks.join(", "),
                skills.databases.join(", "),
                take_join(&skills.security_tools, 4, ", ")
            ),
            format!(
                "My technical skills span {}, with expertise in {}. I'm also proficient in \
                 security tools like {}, {}, and {}.",
                skills.languages.join(", "),
                skills.frameworks.join(" and "),
                nth(&skills.security_tools, 0),
                nth(&skills.security_tools, 1),
                nth(&skills.security_tools, 2)
            ),
            format!(
                "I code in {}, build with {}, and secure systems using {}. My expertise areas \
                 include {}.",
                skills.languages.join(", "),
                skills.frameworks.join(", "),
                take_join(&skills.security_tools, 3, ", "),
                take_join(&skills.expertise, 3, ", ")
            ),
        ],

        Category::Experience => {
            // shape validation guarantees at least one entry
            let Some(exp) = knowledge.experience.first() else {
                return vec![keyword_introduction(knowledge)];
            };
            let first_detail = lower_first(nth(&exp.details, 0));
            vec![
                format!(
                    "I worked as a {} at {} ({}). During this time, I {}, {}. This role gave me \
                     practical exposure to production security work.",
                    exp.role,
                    exp.company,
                    exp.period,
                    first_detail,
                    exp.details
                        .get(1)
                        .map(|d| lower_first(d))
                        .unwrap_or_else(|| "and gained hands-on security experience".to_string())
                ),
                format!(
                    "My professional experience includes a {} position at {}. I {} and learned \
                     about {}.",
                    exp.role,
                    exp.company,
                    first_detail,
                    exp.details
                        .iter()
                        .skip(1)
                        .take(2)
                        .map(|d| lower_first(d))
                        .collect::<Vec<_>>()
                        .join(" and ")
                ),
                format!(
                    "I worked at {} as a {}, where I {}. This experience helped me understand {}.",
                    exp.company,
                    exp.role,
                    first_detail,
                    exp.details
                        .get(1)
                        .map(|d| lower_first(d))
                        .unwrap_or_else(|| "real-world security challenges".to_string())
                ),
            ]
        }

        Category::Education => {
            let education = &knowledge.education;
            vec![
                format!(
                    "I hold a {} ({}) from {}. I keep learning about {}.",
                    education.degree,
                    education.period,
                    education.institution,
                    education.continuous_learning.join(", ")
                ),
                format!(
                    "I studied for my {} at {}. My learning focuses on {}, {}, and {}.",
                    education.degree,
                    education.institution,
                    nth(&education.continuous_learning, 0),
                    nth(&education.continuous_learning, 1),
                    nth(&education.continuous_learning, 2)
                ),
                format!(
                    "I earned my {} while actively learning {}. My education combines formal \
                     coursework with hands-on security practice.",
                    education.degree,
                    education.continuous_learning.join(", ")
                ),
            ]
        }

        Category::Contact => {
            let contact = &knowledge.contact;
            vec![
                format!(
                    "You can reach me at {}. I'm also on LinkedIn ({}), GitHub ({}), and Twitter \
                     ({}). Feel free to connect!",
                    contact.email, contact.linkedin, contact.github, contact.twitter
                ),
                format!(
                    "Get in touch! Email me at {}, or find me on {} and {}. I'm always open to \
                     collaborations and tech discussions.",
                    contact.email, contact.linkedin, contact.github
                ),
                format!(
                    "Contact me via {}. You can also connect on LinkedIn, GitHub, or Twitter. I'm \
                     interested in security consulting, collaborations, and tech discussions!",
                    contact.email
                ),
            ]
        }

        Category::Certifications => vec![
            format!(
                "I hold certifications including {} and {}. These validate my expertise in \
                 security testing.",
                nth(&knowledge.certifications, 0),
                nth(&knowledge.certifications, 1)
            ),
            format!(
                "My certifications include {}. They reflect continuous learning across offensive \
                 and defensive security.",
                knowledge.certifications.join(" and ")
            ),
            format!(
                "I'm certified through {} and have completed {}. These credentials reflect my \
                 dedication to security best practices.",
                nth(&knowledge.certifications, 0),
                nth(&knowledge.certifications, 1)
            ),
        ],

        Category::Leadership => {
            // shape validation guarantees two entries
            let (Some(first), Some(second)) =
                (knowledge.leadership.first(), knowledge.leadership.get(1))
            else {
                return vec![keyword_introduction(knowledge)];
            };
            vec![
                format!(
                    "I serve as {}. I {}. I'm also a {}, where I {}.",
                    first.heading(),
                    lower_first(&first.description),
                    second.role,
                    lower_first(&second.description)
                ),
                format!(
                    "My leadership roles include {} and {}. I've {} and {}.",
                    first.role,
                    second.role,
                    lower_first(&first.description),
                    lower_first(&second.description)
                ),
                format!(
                    "I'm actively involved as {} and {}. These roles let me {} and contribute to \
                     the tech community.",
                    first.role,
                    second.role,
                    lower_first(&first.description)
                ),
            ]
        }

        Category::Personal => vec![
            format!(
                "I'm {}, a {} and {}. {}",
                personal.name,
                nth(&personal.identities, 0),
                nth(&personal.identities, 1),
                personal.summary
            ),
            format!(
                "Hi! I'm {}. I work as a {} with a passion for {}. {}",
                personal.name,
                nth(&personal.identities, 0),
                nth(&personal.identities, 2),
                personal.summary
            ),
            format!(
                "{} here! I'm a {} specializing in {} and {}. {}",
                personal.name,
                nth(&personal.identities, 0),
                nth(&skills.expertise, 0),
                nth(&skills.expertise, 1),
                personal.summary
            ),
        ],
    }
}

/// Fixed introduction used when the question shares a token with the known
/// technology or project vocabulary but no chunk cleared the threshold.
fn keyword_introduction(knowledge: &KnowledgeBase) -> String {
    format!(
        "I'm {}, a {}. I work with {}, have built projects like {}, and specialize in {}. Feel \
         free to ask about my skills, projects, experience, or contact information!",
        knowledge.personal.name,
        nth(&knowledge.personal.identities, 0),
        knowledge.skills.languages.join(", "),
        project_nth(knowledge, 0).0,
        nth(&knowledge.skills.expertise, 0)
    )
}

/// The generic self-introduction variant set.
pub fn generic_variants(knowledge: &KnowledgeBase) -> Vec<String> {
    let personal = &knowledge.personal;
    let skills = &knowledge.skills;
    vec![
        format!(
            "I'm {}, a {} and {}. I specialize in {} and {}. Ask me about my projects, skills, \
             experience, education, or how to contact me!",
            personal.name,
            nth(&personal.identities, 0),
            nth(&personal.identities, 1),
            nth(&skills.expertise, 0),
            nth(&skills.expertise, 1)
        ),
        format!(
            "Hi! I'm {}. I've built {} projects using {}. I'm interested in {}. What would you \
             like to know?",
            personal.name,
            knowledge.projects.len(),
            skills.languages.join(", "),
            nth(&skills.expertise, 2)
        ),
        format!(
            "{} here! I'm a {} with expertise in {}, {}, and {}. I've built {} and {}. Feel free \
             to ask anything about my portfolio!",
            personal.name,
            nth(&personal.identities, 0),
            nth(&skills.languages, 0),
            nth(&skills.languages, 1),
            nth(&skills.languages, 2),
            project_nth(knowledge, 0).0,
            project_nth(knowledge, 1).0
        ),
    ]
}

fn generic_introduction<R: Rng>(knowledge: &KnowledgeBase, rng: &mut R) -> String {
    let variants = generic_variants(knowledge);
    pick(rng, &variants)
}

/// Does the question share a word with the known skill/framework/project
/// vocabulary? Containment runs both ways so partial tokens still count.
fn question_mentions_known_token(knowledge: &KnowledgeBase, q: &str) -> bool {
    let mut vocabulary: Vec<String> = knowledge
        .skills
        .languages
        .iter()
        .map(|l| l.to_lowercase())
        .collect();
    vocabulary.extend(
        knowledge
            .skills
            .frameworks
            .iter()
            .map(|f| f.to_lowercase().replace('.', "")),
    );
    for project in &knowledge.projects {
        vocabulary.extend(
            project
                .name
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string),
        );
    }
    vocabulary.extend(
        [
            "project",
            "skill",
            "experience",
            "contact",
            "education",
            "certification",
        ]
        .map(str::to_string),
    );

    q.split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .any(|word| {
            vocabulary
                .iter()
                .any(|known| known.contains(word) || word.contains(known.as_str()))
        })
}

fn pick<R: Rng>(rng: &mut R, variants: &[String]) -> String {
    variants[rng.gen_range(0..variants.len())].clone()
}

fn nth(items: &[String], idx: usize) -> &str {
    items.get(idx).map(String::as_str).unwrap_or_default()
}

fn take_join(items: &[String], n: usize, separator: &str) -> String {
    items
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

fn project_nth(knowledge: &KnowledgeBase, idx: usize) -> (String, Vec<String>) {
    knowledge
        .projects
        .get(idx)
        .map(|p| (p.name.clone(), p.tech.clone()))
        .unwrap_or_default()
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn knowledge() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    #[test]
    fn test_direct_skills_template_lists_every_language() {
        let knowledge = knowledge();
        let rendered = render_direct(&knowledge, Category::Skills);
        for language in &knowledge.skills.languages {
            assert!(
                rendered.contains(language),
                "skills template must list {language}"
            );
        }
    }

    #[test]
    fn test_direct_response_without_matches_is_unsure() {
        let knowledge = knowledge();
        let rendered = direct_response(&knowledge, "hmm", &[]);
        assert_eq!(rendered, UNSURE_LINE);
    }

    #[test]
    fn test_question_keywords_override_chunk_category() {
        let knowledge = knowledge();
        let vectorizer = Vectorizer::new();
        // ranked top is the skills chunk, but "who" resolves personal first
        let ranked = vectorizer.rank_chunks(&knowledge, "skills");
        let rendered = direct_response(&knowledge, "who are you", &ranked);
        assert!(rendered.contains(&knowledge.personal.name));
    }

    #[test]
    fn test_twisted_draw_belongs_to_variant_set() {
        let knowledge = knowledge();
        let variants = twisted_variants(&knowledge, Category::Skills);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let drawn = render_twisted(&knowledge, Category::Skills, &mut rng);
            assert!(variants.contains(&drawn));
        }
    }

    #[test]
    fn test_twisted_draw_is_deterministic_per_seed() {
        let knowledge = knowledge();
        let vectorizer = Vectorizer::new();
        let a = twisted_response(
            &knowledge,
            &vectorizer,
            "what is the meaning of life",
            &mut StdRng::seed_from_u64(42),
        );
        let b = twisted_response(
            &knowledge,
            &vectorizer,
            "what is the meaning of life",
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_twisted_falls_back_to_generic_set() {
        let knowledge = knowledge();
        let vectorizer = Vectorizer::new();
        // passes the scope gate via "you" but matches no chunk or vocabulary
        let drawn = twisted_response(
            &knowledge,
            &vectorizer,
            "zzz qqq you vvv",
            &mut StdRng::seed_from_u64(3),
        );
        assert!(generic_variants(&knowledge).contains(&drawn));
    }

    #[test]
    fn test_known_token_overlap_yields_fixed_introduction() {
        let knowledge = knowledge();
        assert!(question_mentions_known_token(&knowledge, "rust stuff"));
        assert!(!question_mentions_known_token(&knowledge, "zzz qqq vvv"));
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Hardened CI pipelines"), "hardened CI pipelines");
        assert_eq!(lower_first(""), "");
    }
}
