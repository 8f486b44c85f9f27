//! In-memory store that records every statement it is handed.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ClientStore, Param, StoreRow};
use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Param>,
}

#[derive(Default)]
pub struct RecordingStore {
    rows: Vec<StoreRow>,
    affected: u64,
    failure: Option<String>,
    statements: Mutex<Vec<Statement>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            affected: 1,
            ..Self::default()
        }
    }

    pub fn with_rows(mut self, rows: Vec<StoreRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_affected(mut self, affected: u64) -> Self {
        self.affected = affected;
        self
    }

    /// Fail every statement with a protocol error carrying `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, sql: &str, params: Vec<Param>) -> Result<(), StoreError> {
        self.statements.lock().unwrap().push(Statement {
            sql: sql.to_string(),
            params,
        });
        match &self.failure {
            Some(message) => Err(StoreError::Protocol(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ClientStore for RecordingStore {
    async fn fetch_all(&self, sql: &str) -> Result<Vec<StoreRow>, StoreError> {
        self.record(sql, Vec::new())?;
        Ok(self.rows.clone())
    }

    async fn execute(&self, sql: &str, params: Vec<Param>) -> Result<u64, StoreError> {
        self.record(sql, params)?;
        Ok(self.affected)
    }
}
