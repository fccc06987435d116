// TermFolio V1 Backend Entry Point
// "The Terminal Brain" - offline Q&A over a portfolio knowledge base

mod brain;
mod error;
mod knowledge;

#[cfg(test)]
mod tests;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use tracing::info;

use brain::TerminalBrain;
use knowledge::KnowledgeBase;

/// Environment variable overriding the embedded knowledge profile.
const KNOWLEDGE_PATH_VAR: &str = "TERMFOLIO_KNOWLEDGE";

fn load_knowledge() -> anyhow::Result<KnowledgeBase> {
    match std::env::var(KNOWLEDGE_PATH_VAR) {
        Ok(path) => KnowledgeBase::from_path(Path::new(&path))
            .with_context(|| format!("loading knowledge base from {path}")),
        Err(_) => KnowledgeBase::builtin().context("loading built-in knowledge base"),
    }
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let knowledge = load_knowledge()?;
    let brain = TerminalBrain::new(knowledge).context("initializing terminal brain")?;
    info!("terminal brain ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        writeln!(stdout, "{}", brain.answer(question))?;
    }

    Ok(())
}
