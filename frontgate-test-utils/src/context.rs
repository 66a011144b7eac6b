//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context holds an
//! in-memory SQLite database and a session backed by a memory store for testing the login flag.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    sea_query::TableCreateStatement, ActiveModelTrait, ActiveValue, ConnectionTrait, Database,
    DatabaseConnection,
};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`
///
/// Most users should create this via [`TestBuilder`](crate::TestBuilder) rather than
/// constructing it directly.
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_option_table()
///     .with_option("blogname", "My Site")
///     .build()
///     .await?;
///
/// let repo = OptionRepository::new(&test.db);
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session backed by an in-memory store
    pub session: Session,
}

impl TestContext {
    /// Create a new test context with an empty database and session.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db, session })
    }

    /// Create database tables from schema statements.
    ///
    /// # Arguments
    /// - `stmts` - Vector of CREATE TABLE statements to execute
    ///
    /// # Returns
    /// - `Ok(())` - All tables created successfully
    /// - `Err(TestError::DbErr)` - Table creation failed
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Insert an option row directly, bypassing the application's repository.
    ///
    /// # Arguments
    /// - `name` - Option name
    /// - `value` - Raw stored value
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted option
    /// - `Err(TestError::DbErr)` - Insert failed, e.g. the option table does not exist
    pub async fn insert_option(
        &self,
        name: &str,
        value: &str,
    ) -> Result<entity::site_option::Model, TestError> {
        let option = entity::site_option::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            value: ActiveValue::Set(value.to_string()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(option.insert(&self.db).await?)
    }
}
