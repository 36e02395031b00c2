//! End-to-end pipeline tests.
//!
//! Exercise the orchestrator against the mock LLM and database clients:
//! short-circuiting, call counts and ordering, error containment, and
//! determinism. No network or database required.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use quantbot::chat::{ChatHistory, Responder, FALLBACK_REPLY, GENERIC_REPLY};
use quantbot::db::{
    Column, ColumnInfo, FailingDatabaseClient, MockDatabaseClient, QueryResult, Schema, Table,
    Value,
};
use quantbot::llm::MockLlmClient;
use quantbot::repl::WELCOME;

fn sample_schema() -> Schema {
    Schema {
        tables: vec![
            Table {
                name: "okx_accounts".to_string(),
                columns: vec![
                    Column::new("id", "int").nullable(false),
                    Column::new("data", "json").nullable(false),
                ],
                primary_key: vec!["id".to_string()],
                indexes: vec![],
            },
            Table {
                name: "metrics".to_string(),
                columns: vec![
                    Column::new("id", "int").nullable(false),
                    Column::new("pnl", "decimal(18,8)").nullable(false),
                    Column::new("created_at", "timestamp").nullable(false),
                ],
                primary_key: vec!["id".to_string()],
                indexes: vec![],
            },
        ],
        foreign_keys: vec![],
    }
}

fn portfolio_result() -> QueryResult {
    QueryResult::with_data(
        vec![
            ColumnInfo::new("id", "int"),
            ColumnInfo::new("pnl", "decimal"),
        ],
        vec![
            vec![Value::Int(1), Value::Float(120.5)],
            vec![Value::Int(2), Value::Float(-3.25)],
        ],
    )
}

#[tokio::test]
async fn generic_question_returns_capability_reply_without_any_calls() {
    let llm = Arc::new(MockLlmClient::new());
    let responder = Responder::new(Box::new(llm.clone()));
    let db = MockDatabaseClient::with_schema(sample_schema());
    let mut history = ChatHistory::new();
    history.push_ai(WELCOME);
    history.push_human("What can you do for me?");

    let answer = responder
        .get_response("What can you do for me?", &db, &history)
        .await;

    assert_eq!(answer, GENERIC_REPLY);
    assert_eq!(llm.calls(), 0);
    assert_eq!(db.execute_calls(), 0);
    assert_eq!(db.schema_calls(), 0);
}

#[tokio::test]
async fn non_generic_question_runs_generation_then_execution_then_synthesis() {
    let sql = "SELECT * FROM metrics WHERE created_at >= DATE_SUB(CURDATE(), INTERVAL 1 MONTH);";
    let llm = Arc::new(
        MockLlmClient::new().with_responses(vec![sql, "Your portfolio gained 117.25 last month."]),
    );
    let responder = Responder::new(Box::new(llm.clone()));
    let db = MockDatabaseClient::with_schema(sample_schema()).with_result(portfolio_result());
    let mut history = ChatHistory::new();
    history.push_ai(WELCOME);
    history.push_human("Show my portfolio performance for last month");

    let answer = responder
        .get_response("Show my portfolio performance for last month", &db, &history)
        .await;

    // Two model calls, one execution
    assert_eq!(llm.calls(), 2);
    assert_eq!(db.execute_calls(), 1);

    // Generation happened first: the executed statement is the first
    // model response, verbatim.
    assert_eq!(db.executed_statements(), vec![sql.to_string()]);

    // Synthesis happened after execution: the second prompt embeds both
    // the generated SQL and the execution result.
    let prompts = llm.prompts();
    assert!(prompts[0].contains("SQL Query:"));
    assert!(prompts[0].contains("Show my portfolio performance for last month"));
    assert!(prompts[1].contains(&format!("<SQL>{sql}</SQL>")));
    assert!(prompts[1].contains("id | pnl"));
    assert!(prompts[1].contains("120.5"));

    // Schema was fetched fresh for each prompt stage
    assert_eq!(db.schema_calls(), 2);

    // The synthesis output is returned verbatim
    assert_eq!(answer, "Your portfolio gained 117.25 last month.");
}

#[tokio::test]
async fn generation_failure_yields_fallback_and_stops_pipeline() {
    let llm = Arc::new(MockLlmClient::new().with_failure("model endpoint unreachable"));
    let responder = Responder::new(Box::new(llm.clone()));
    let db = MockDatabaseClient::with_schema(sample_schema());
    let mut history = ChatHistory::new();
    history.push_human("How many trades did I make last week?");

    let answer = responder
        .get_response("How many trades did I make last week?", &db, &history)
        .await;

    assert_eq!(answer, FALLBACK_REPLY);
    // One failed generation call; execution and synthesis never happen
    assert_eq!(llm.calls(), 1);
    assert_eq!(db.execute_calls(), 0);
}

#[tokio::test]
async fn execution_failure_yields_fallback_and_skips_synthesis() {
    let llm = Arc::new(MockLlmClient::new().with_responses(vec!["SELECT nope FROM nowhere;"]));
    let responder = Responder::new(Box::new(llm.clone()));
    let db = FailingDatabaseClient::with_schema(sample_schema());
    let mut history = ChatHistory::new();
    history.push_human("Show my holdings");

    let answer = responder.get_response("Show my holdings", &db, &history).await;

    assert_eq!(answer, FALLBACK_REPLY);
    // The statement was attempted exactly once, and no synthesis call
    // followed the failure
    assert_eq!(db.execute_calls(), 1);
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn who_are_you_with_seeded_history_returns_literal_capability_string() {
    let llm = Arc::new(MockLlmClient::new());
    let responder = Responder::new(Box::new(llm.clone()));
    let db = MockDatabaseClient::with_schema(sample_schema());
    let mut history = ChatHistory::new();
    history.push_ai("Hello! I'm a SQL assistant. Ask me anything about your database.");
    history.push_human("Who are you");

    let answer = responder.get_response("Who are you", &db, &history).await;

    assert_eq!(
        answer,
        "I'm an AI assistant and I can help you with queries about your account and portfolio, such as account holdings, portfolio performance, and more. Ask me anything related to your financial data."
    );
    assert_eq!(llm.calls(), 0);
    assert_eq!(db.execute_calls(), 0);
}

#[tokio::test]
async fn synthesis_text_is_returned_verbatim() {
    let llm = Arc::new(MockLlmClient::new().with_responses(vec![
        "SELECT * FROM metrics WHERE created_at >= DATE_SUB(CURDATE(), INTERVAL 1 MONTH);",
        "Over the last month your portfolio returned a net profit of 117.25.",
    ]));
    let responder = Responder::new(Box::new(llm.clone()));
    let db = MockDatabaseClient::with_schema(sample_schema()).with_result(portfolio_result());
    let mut history = ChatHistory::new();
    history.push_human("Show my portfolio performance for last month");

    let answer = responder
        .get_response("Show my portfolio performance for last month", &db, &history)
        .await;

    assert_eq!(
        answer,
        "Over the last month your portfolio returned a net profit of 117.25."
    );
}

#[tokio::test]
async fn identical_inputs_and_deterministic_mocks_give_identical_output() {
    let sql = "SELECT data FROM okx_accounts;";
    let explanation = "You hold two accounts.";
    // Script both rounds so the replay is exact
    let llm = Arc::new(
        MockLlmClient::new().with_responses(vec![sql, explanation, sql, explanation]),
    );
    let responder = Responder::new(Box::new(llm.clone()));
    let db = MockDatabaseClient::with_schema(sample_schema());
    let mut history = ChatHistory::new();
    history.push_human("Tell me about my account holdings");

    let first = responder
        .get_response("Tell me about my account holdings", &db, &history)
        .await;
    let second = responder
        .get_response("Tell me about my account holdings", &db, &history)
        .await;

    assert_eq!(first, second);
    assert_eq!(db.executed_statements(), vec![sql.to_string(), sql.to_string()]);
}

#[tokio::test]
async fn empty_result_set_reaches_synthesis_as_no_rows_marker() {
    let llm = Arc::new(MockLlmClient::new().with_responses(vec![
        "SELECT * FROM metrics WHERE pnl > 1000000;",
        "No entries matched.",
    ]));
    let responder = Responder::new(Box::new(llm.clone()));
    let db = MockDatabaseClient::with_schema(sample_schema()).with_result(QueryResult::new());
    let mut history = ChatHistory::new();
    history.push_human("Any million-dollar days?");

    let answer = responder
        .get_response("Any million-dollar days?", &db, &history)
        .await;

    assert_eq!(answer, "No entries matched.");
    assert!(llm.prompts()[1].contains("SQL Response: (no rows)"));
}
