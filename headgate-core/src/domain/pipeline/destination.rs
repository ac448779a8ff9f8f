// headgate-core/src/domain/pipeline/destination.rs

use serde::Deserialize;
use validator::Validate;

/// `configs/destination.yaml` — the warehouse destination document.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DestinationSpec {
    #[validate(length(min = 1))]
    pub name: String,
    /// Warehouse account locator (e.g. "abc-xyz").
    #[validate(length(min = 1))]
    pub account: String,
    #[validate(length(min = 1))]
    pub username: String,
    pub password: String,
    #[validate(length(min = 1))]
    pub role: String,
    /// Compute resource used for loads.
    #[validate(length(min = 1))]
    pub warehouse: String,
    #[validate(length(min = 1))]
    pub database: String,
    #[validate(length(min = 1))]
    pub schema: String,
}
