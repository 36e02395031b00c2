//! Interactive chat session.
//!
//! Owns the conversation history for the lifetime of the session: it
//! starts with one welcome message from the assistant, then appends a
//! Human and an Ai message per turn. Questions are handled strictly one
//! at a time; a turn completes before the next line is read.

use std::io::Write;

use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::chat::{ChatHistory, Responder};
use crate::db::DatabaseClient;
use crate::error::{QuantbotError, Result};
use crate::llm::LlmClient;

/// The assistant's opening message.
pub const WELCOME: &str = "Hello! I'm a SQL assistant. Ask me anything about your database.";

/// Runs one conversation turn.
///
/// Appends the question to the history first — the orchestrator expects
/// the full history up to and including the current question — then
/// appends the answer once it is produced.
pub async fn run_turn(
    responder: &Responder,
    db: &dyn DatabaseClient,
    history: &mut ChatHistory,
    question: &str,
) -> String {
    history.push_human(question);
    let answer = responder.get_response(question, db, history).await;
    history.push_ai(answer.clone());
    answer
}

/// Runs the interactive chat loop until EOF or an exit command.
pub async fn run_chat(db: &dyn DatabaseClient, llm: Box<dyn LlmClient>) -> Result<()> {
    let responder = Responder::new(llm);
    let mut history = ChatHistory::new();

    history.push_ai(WELCOME);
    println!("{WELCOME}");

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout()
            .flush()
            .map_err(|e| QuantbotError::internal(format!("Failed to flush stdout: {e}")))?;

        let line = lines
            .next_line()
            .await
            .map_err(|e| QuantbotError::internal(format!("Failed to read input: {e}")))?;

        let Some(line) = line else {
            break; // EOF
        };

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        let answer = run_turn(&responder, db, &mut history, question).await;
        println!("{answer}");
    }

    Ok(())
}
