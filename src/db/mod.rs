use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Row, TypeInfo};
use tracing::debug;

use crate::config::Config;
use crate::error::StoreError;
use crate::models::ClientId;

#[cfg(test)]
pub mod recording;
pub mod rows;

pub const SELECT_CLIENTS: &str = "SELECT * FROM clients";

pub const INSERT_CLIENT: &str = "INSERT INTO clients (name, email, phone, address, plan, goal) \
     VALUES ($1, $2, $3, $4, $5, $6)";

pub const UPDATE_CLIENT: &str = "UPDATE clients \
     SET name = $1, email = $2, phone = $3, address = $4, plan = $5, goal = $6 \
     WHERE id = $7";

pub const DELETE_CLIENT: &str = "DELETE FROM clients WHERE id = $1";

/// Positional statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(Option<String>),
    Id(ClientId),
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(Some(value.to_string()))
    }
}

/// A row as the store returned it, keyed by its own column names
pub type StoreRow = Map<String, Value>;

/// Data-access handle the client service issues its statements through.
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn fetch_all(&self, sql: &str) -> Result<Vec<StoreRow>, StoreError>;

    /// Run a write statement, returning the number of rows affected
    async fn execute(&self, sql: &str, params: Vec<Param>) -> Result<u64, StoreError>;
}

/// Database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ClientStore for Database {
    async fn fetch_all(&self, sql: &str) -> Result<Vec<StoreRow>, StoreError> {
        debug!(sql, "fetch");
        let rows = sqlx::query(sql).fetch_all(self.get_pool()).await?;

        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, sql: &str, params: Vec<Param>) -> Result<u64, StoreError> {
        debug!(sql, params = params.len(), "execute");
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                Param::Text(value) => query.bind(value),
                Param::Id(id) => query.bind(id),
            };
        }

        let result = query.execute(self.get_pool()).await?;
        Ok(result.rows_affected())
    }
}

/// How a column's value is read out of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int2,
    Int4,
    Int8,
    /// Anything else is read as text when the driver allows it
    Text,
}

fn column_kind(type_name: &str) -> ColumnKind {
    match type_name {
        "INT2" => ColumnKind::Int2,
        "INT4" => ColumnKind::Int4,
        "INT8" => ColumnKind::Int8,
        _ => ColumnKind::Text,
    }
}

fn decode_row(row: &PgRow) -> Result<StoreRow, StoreError> {
    let mut decoded = StoreRow::new();

    for column in row.columns() {
        let index = column.ordinal();
        let value = match column_kind(column.type_info().name()) {
            ColumnKind::Int2 => row.try_get::<Option<i16>, _>(index)?.map(Value::from),
            ColumnKind::Int4 => row.try_get::<Option<i32>, _>(index)?.map(Value::from),
            ColumnKind::Int8 => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
            ColumnKind::Text => match row.try_get::<Option<String>, _>(index) {
                Ok(text) => text.map(Value::from),
                Err(StoreError::ColumnDecode { source, .. }) => {
                    debug!(
                        column = column.name(),
                        column_type = column.type_info().name(),
                        error = %source,
                        "skipping column"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            },
        };
        decoded.insert(column.name().to_string(), value.unwrap_or(Value::Null));
    }

    Ok(decoded)
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    Ok(db)
}
