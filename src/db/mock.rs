//! Mock database clients for testing.
//!
//! `MockDatabaseClient` returns canned data and records every statement it
//! is asked to run, so tests can assert on call counts and ordering.
//! `FailingDatabaseClient` errors on every execution, for exercising the
//! orchestrator's error boundary.

use super::{ColumnInfo, DatabaseClient, QueryResult, Schema, Value};
use crate::error::{QuantbotError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A mock database client that returns predefined results.
#[derive(Default)]
pub struct MockDatabaseClient {
    schema: Schema,
    result: Option<QueryResult>,
    executed: Mutex<Vec<String>>,
    schema_calls: AtomicUsize,
}

impl MockDatabaseClient {
    /// Creates a new mock database client with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new mock database client with the given schema.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    /// Sets the result returned by every `execute_query` call.
    pub fn with_result(mut self, result: QueryResult) -> Self {
        self.result = Some(result);
        self
    }

    /// Returns the statements executed so far, in order.
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    /// Returns the number of `execute_query` calls.
    pub fn execute_calls(&self) -> usize {
        self.executed.lock().unwrap().len()
    }

    /// Returns the number of `introspect_schema` calls.
    pub fn schema_calls(&self) -> usize {
        self.schema_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.executed.lock().unwrap().push(sql.to_string());

        if let Some(result) = &self.result {
            return Ok(result.clone());
        }

        // Default: a single echo row, enough for prompt-plumbing tests
        Ok(QueryResult {
            columns: vec![ColumnInfo::new("result", "text")],
            rows: vec![vec![Value::String(format!("Mock result for: {}", sql))]],
            execution_time: Duration::from_millis(1),
            row_count: 1,
            was_truncated: false,
        })
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A database client whose `execute_query` always fails.
#[derive(Default)]
pub struct FailingDatabaseClient {
    schema: Schema,
    executed: Mutex<Vec<String>>,
}

impl FailingDatabaseClient {
    /// Creates a new failing database client with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new failing database client with the given schema.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of `execute_query` attempts.
    pub fn execute_calls(&self) -> usize {
        self.executed.lock().unwrap().len()
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.executed.lock().unwrap().push(sql.to_string());
        Err(QuantbotError::query(
            "ERROR: You have an error in your SQL syntax (code 1064)",
        ))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_statements() {
        let client = MockDatabaseClient::new();

        let result = client.execute_query("SELECT 1").await.unwrap();
        assert_eq!(result.row_count, 1);

        client.execute_query("SELECT 2").await.unwrap();
        assert_eq!(client.execute_calls(), 2);
        assert_eq!(
            client.executed_statements(),
            vec!["SELECT 1".to_string(), "SELECT 2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_mock_counts_schema_calls() {
        let client = MockDatabaseClient::new();
        assert_eq!(client.schema_calls(), 0);

        client.introspect_schema().await.unwrap();
        client.introspect_schema().await.unwrap();
        assert_eq!(client.schema_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_with_canned_result() {
        let canned = QueryResult::with_data(
            vec![ColumnInfo::new("pnl", "decimal")],
            vec![vec![Value::Float(42.0)]],
        );
        let client = MockDatabaseClient::new().with_result(canned);

        let result = client.execute_query("SELECT pnl FROM metrics").await.unwrap();
        assert_eq!(result.rows[0][0], Value::Float(42.0));
    }

    #[tokio::test]
    async fn test_failing_client_errors() {
        let client = FailingDatabaseClient::new();

        let result = client.execute_query("SELECT 1").await;
        assert!(result.is_err());
        assert_eq!(client.execute_calls(), 1);
    }
}
