use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;

use crate::{
    model::settings::{GateSettings, ProviderSettings},
    server::{data::option::OptionRepository, error::Error, util::sanitize},
};

/// Option name of the gate's settings record
pub const SETTINGS_OPTION: &str = "frontgate_settings";

/// Option name of the provider plugin's settings record
pub const PROVIDER_OPTION: &str = "wp_auth0_settings";

/// Service for reading & writing the gate's settings.
///
/// Settings are loaded once per request and handed down explicitly, nothing caches them between
/// requests.
pub struct SettingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingsService<'a> {
    /// Creates a new instance of [`SettingsService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the gate's settings along with the provider plugin's record.
    ///
    /// # Returns
    /// - `Ok((GateSettings, ProviderSettings))` - Stored records, or defaults for missing or
    ///   unreadable ones
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn load(&self) -> Result<(GateSettings, ProviderSettings), Error> {
        let settings = self.settings().await?;
        let provider = self.provider().await?;

        Ok((settings, provider))
    }

    /// Loads only the gate's settings record.
    pub async fn settings(&self) -> Result<GateSettings, Error> {
        self.read_record(SETTINGS_OPTION).await
    }

    /// Loads only the provider plugin's record.
    pub async fn provider(&self) -> Result<ProviderSettings, Error> {
        self.read_record(PROVIDER_OPTION).await
    }

    /// Sanitizes and stores the gate's settings.
    ///
    /// Client ID & domain are reduced to single-line plain text, excluded paths keep one entry
    /// per line and the login template has scriptable content removed.
    ///
    /// # Arguments
    /// - `input` - Settings as submitted
    ///
    /// # Returns
    /// - `Ok(GateSettings)` - The settings as stored
    /// - `Err(Error::DbErr)` - Database write failed
    pub async fn save(&self, input: GateSettings) -> Result<GateSettings, Error> {
        let settings = sanitize_settings(input);

        OptionRepository::new(self.db)
            .upsert(SETTINGS_OPTION, serde_json::to_string(&settings)?)
            .await?;

        tracing::info!("Saved gate settings");

        Ok(settings)
    }

    async fn read_record<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, Error> {
        let Some(option) = OptionRepository::new(self.db).get(name).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&option.value) {
            Ok(record) => Ok(record),
            Err(e) => {
                tracing::warn!(option = %name, "Ignoring unreadable settings record: {}", e);

                Ok(T::default())
            }
        }
    }
}

pub fn sanitize_settings(input: GateSettings) -> GateSettings {
    GateSettings {
        client_id: sanitize::text_field(&input.client_id),
        domain: sanitize::text_field(&input.domain),
        excluded_paths: sanitize::textarea_field(&input.excluded_paths),
        custom_login_html: sanitize::html_template(&input.custom_login_html),
        ..input
    }
}
