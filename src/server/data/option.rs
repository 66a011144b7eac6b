use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter,
};

/// Key-value option store, one row per option name
pub struct OptionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OptionRepository<'a> {
    /// Creates a new instance of [`OptionRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets an option by name
    pub async fn get(&self, name: &str) -> Result<Option<entity::site_option::Model>, DbErr> {
        entity::prelude::SiteOption::find()
            .filter(entity::site_option::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Inserts an option or replaces the value of an existing option with the same name
    pub async fn upsert(&self, name: &str, value: String) -> Result<(), DbErr> {
        let option = entity::site_option::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            value: ActiveValue::Set(value),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::SiteOption::insert(option)
            .on_conflict(
                OnConflict::column(entity::site_option::Column::Name)
                    .update_columns([
                        entity::site_option::Column::Value,
                        entity::site_option::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes an option
    ///
    /// Returns OK regardless of the option existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, name: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::SiteOption::delete_many()
            .filter(entity::site_option::Column::Name.eq(name))
            .exec(self.db)
            .await
    }
}
