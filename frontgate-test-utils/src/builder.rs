//! Declarative test builder.
//!
//! The builder queues the option table and option fixtures, all of which run during the final
//! `build()` call.

use sea_orm::Schema;

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Methods can be chained together and finalized with `build()` to create a complete test setup.
pub struct TestBuilder {
    include_option_table: bool,
    options: Vec<(String, String)>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            include_option_table: false,
            options: Vec::new(),
        }
    }

    /// Add the option table used for settings storage.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_option_table(mut self) -> Self {
        self.include_option_table = true;
        self
    }

    /// Insert an option with a raw string value.
    ///
    /// Implies [`with_option_table`](Self::with_option_table).
    ///
    /// # Arguments
    /// - `name` - Option name
    /// - `value` - Stored value
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.include_option_table = true;
        self.options.push((name.into(), value.into()));
        self
    }

    /// Insert an option holding a JSON record.
    ///
    /// Implies [`with_option_table`](Self::with_option_table).
    ///
    /// # Arguments
    /// - `name` - Option name
    /// - `value` - Record serialized as the stored value
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_json_option(self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.with_option(name, value.to_string())
    }

    /// Build the test setup.
    ///
    /// Creates the option table first, then inserts option fixtures in the order they were added.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        if self.include_option_table {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            setup
                .with_tables(vec![
                    schema.create_table_from_entity(entity::prelude::SiteOption)
                ])
                .await?;
        }

        for (name, value) in &self.options {
            setup.insert_option(name, value).await?;
        }

        Ok(setup)
    }
}
