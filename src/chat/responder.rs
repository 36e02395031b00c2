//! Response orchestration.
//!
//! `Responder::get_response` sequences the whole pipeline for one user
//! question: classify → generate SQL → execute → synthesize an answer.
//! It is the single error boundary: every stage returns an explicit
//! `Result`, and any failure is logged and collapsed into one fixed
//! fallback message. The caller always gets a string back.

use tracing::{error, info};

use crate::chat::classifier::{is_generic, GENERIC_REPLY};
use crate::chat::ChatHistory;
use crate::db::{DatabaseClient, QueryResult};
use crate::error::{QuantbotError, Result};
use crate::llm::prompt::{build_answer_prompt, build_sql_prompt};
use crate::llm::LlmClient;

/// The fixed reply returned for any internal failure.
pub const FALLBACK_REPLY: &str = "I can't help you with this question at this time. I'm constantly evolving and learning more, please try again later";

/// Pipeline stage, used to attribute contained failures in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Generation,
    Execution,
    Synthesis,
}

impl Stage {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Execution => "execution",
            Self::Synthesis => "synthesis",
        }
    }
}

/// Orchestrates classification, SQL generation, execution, and answer
/// synthesis for a single question.
///
/// Each call is a fresh, independent run: the schema is re-introspected
/// for every prompt and nothing is memoized across calls.
pub struct Responder {
    llm: Box<dyn LlmClient>,
}

impl Responder {
    /// Creates a new responder with the given LLM client.
    pub fn new(llm: Box<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Produces the assistant's reply to `question`.
    ///
    /// `history` must already contain the question as its latest human
    /// message; the session layer owns appending. Never returns an error:
    /// stage failures are logged and become [`FALLBACK_REPLY`].
    pub async fn get_response(
        &self,
        question: &str,
        db: &dyn DatabaseClient,
        history: &ChatHistory,
    ) -> String {
        info!(question_len = question.len(), "Received user question");

        if is_generic(question) {
            info!("Generic capability question; returning templated answer");
            return GENERIC_REPLY.to_string();
        }

        // Generation stage: fresh schema, then the SQL prompt.
        let schema = match fetch_schema_text(db).await {
            Ok(schema) => schema,
            Err(e) => return contained(Stage::Generation, &e),
        };
        let sql = match self.generate_sql(question, history, &schema).await {
            Ok(sql) => sql,
            Err(e) => return contained(Stage::Generation, &e),
        };
        info!(%sql, "Generated SQL query");

        // Execution stage: the statement runs verbatim, trusted as-is.
        let result = match db.execute_query(&sql).await {
            Ok(result) => result,
            Err(e) => return contained(Stage::Execution, &e),
        };
        info!(
            rows = result.row_count,
            elapsed_ms = result.execution_time.as_millis() as u64,
            "Executed query"
        );

        // Synthesis stage: schema is fetched fresh again.
        let schema = match fetch_schema_text(db).await {
            Ok(schema) => schema,
            Err(e) => return contained(Stage::Synthesis, &e),
        };
        match self
            .synthesize(question, history, &sql, &result, &schema)
            .await
        {
            Ok(answer) => {
                info!(answer_len = answer.len(), "Synthesized answer");
                answer
            }
            Err(e) => contained(Stage::Synthesis, &e),
        }
    }

    /// Generation stage: asks the model for a raw MySQL statement.
    ///
    /// The model's output is returned verbatim — no validation, no fence
    /// stripping, no sanitization.
    async fn generate_sql(
        &self,
        question: &str,
        history: &ChatHistory,
        schema: &str,
    ) -> Result<String> {
        let prompt = build_sql_prompt(schema, history, question);
        self.llm.complete(&prompt).await
    }

    /// Synthesis stage: asks the model to explain the execution result.
    async fn synthesize(
        &self,
        question: &str,
        history: &ChatHistory,
        sql: &str,
        result: &QueryResult,
        schema: &str,
    ) -> Result<String> {
        let prompt =
            build_answer_prompt(schema, history, sql, &result.format_for_llm(), question);
        self.llm.complete(&prompt).await
    }
}

/// Fetches a fresh schema descriptor for prompt grounding.
async fn fetch_schema_text(db: &dyn DatabaseClient) -> Result<String> {
    let schema = db.introspect_schema().await?;
    Ok(schema.format_for_llm())
}

/// Logs a contained stage failure and returns the fallback reply.
///
/// The cause reaches the operator through the logs only; the user sees
/// the same message regardless of which stage failed.
fn contained(stage: Stage, error: &QuantbotError) -> String {
    error!(stage = stage.as_str(), %error, "Stage failed; returning fallback reply");
    FALLBACK_REPLY.to_string()
}
