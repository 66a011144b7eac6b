use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login state of the current visitor as seen by the gate
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthStatusDto {
    /// Whether the session carries the login flag
    pub logged_in: bool,
    /// When the login flag was set
    pub logged_in_at: Option<DateTime<Utc>>,
    /// Site URL which clears the login flag and signs out at the provider
    pub logout_url: String,
}
