//! Prompt construction for LLM requests.
//!
//! Two fixed templates drive the pipeline: one that asks the model for a
//! raw MySQL statement, and one that asks it to explain the execution
//! result in natural language. Both embed the schema text and the full
//! conversation history.

use crate::chat::ChatHistory;

/// Template for the SQL-generation prompt.
///
/// The worked examples anchor the output format; the instruction demands a
/// bare statement because the result is executed verbatim.
const SQL_PROMPT_TEMPLATE: &str = r#"You are a data analyst at a financial company. You are interacting with a user who is asking you questions about their account and portfolio.
Based on the table schema below, write a MySQL query that would answer the user's question. Take the conversation history into account.

<SCHEMA>{schema}</SCHEMA>

Conversation History: {chat_history}

Write only the MySQL query and nothing else. Do not wrap the SQL query in any other text, not even backticks.

For example:
Question: Tell me about my account holdings
SQL Query: SELECT data from okx_accounts;
Question: Show my portfolio performance for last month
SQL Query: SELECT * FROM metrics WHERE created_at >= DATE_SUB(CURDATE(), INTERVAL 1 MONTH);

Your turn:

Question: {question}
SQL Query:
"#;

/// Template for the answer-synthesis prompt.
const ANSWER_PROMPT_TEMPLATE: &str = r#"You are a data analyst at a financial company. You are interacting with a user who is asking you questions about their account and portfolio.
Based on the table schema below, question, sql query, and sql response, write a natural language response.

<SCHEMA>{schema}</SCHEMA>

Conversation History: {chat_history}
SQL Query: <SQL>{query}</SQL>
User question: {question}
SQL Response: {response}"#;

/// Builds the prompt that asks the model for a raw MySQL statement.
pub fn build_sql_prompt(schema: &str, history: &ChatHistory, question: &str) -> String {
    SQL_PROMPT_TEMPLATE
        .replace("{schema}", schema)
        .replace("{chat_history}", &history.format_for_prompt())
        .replace("{question}", question)
}

/// Builds the prompt that asks the model to explain an execution result.
pub fn build_answer_prompt(
    schema: &str,
    history: &ChatHistory,
    query: &str,
    response: &str,
    question: &str,
) -> String {
    ANSWER_PROMPT_TEMPLATE
        .replace("{schema}", schema)
        .replace("{chat_history}", &history.format_for_prompt())
        .replace("{query}", query)
        .replace("{question}", question)
        .replace("{response}", response)
}
