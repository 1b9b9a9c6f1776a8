//! Delivery recipient and destination details.
//!
//! Two representations, making assembly validation a total step rather
//! than scattered null-checks:
//!
//! - [`DeliveryDraft`] - the still-editable form state. Every field may
//!   be empty.
//! - [`DeliveryInfo`] - the committed copy embedded in an order. Only
//!   produced by [`DeliveryDraft::validate`], which guarantees the
//!   required fields are present. The copy is owned, so later edits to
//!   the form never leak into an assembled order.
//!
//! Geographic selection is three-level: country, then state/province,
//! then city. State and city codes are only meaningful relative to the
//! selected country; the cascade-clear rules live on the form in the
//! checkout crate.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Mutable delivery details as held by the form. Created empty at
/// session start and discarded if checkout is abandoned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeliveryDraft {
    pub full_name: String,
    pub email: String,
    /// International dialling code, e.g. `234`.
    pub phone_code: String,
    pub phone: String,
    /// ISO country code of the selected country.
    #[serde(rename = "countryIso")]
    pub country_code: String,
    pub country_name: String,
    /// State/province code, relative to `country_code`.
    #[serde(rename = "stateIso")]
    pub state_code: String,
    pub state_name: String,
    pub city_name: String,
}

impl DeliveryDraft {
    /// Commit the draft into an owned [`DeliveryInfo`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDeliveryInfo`] unless the
    /// recipient name, phone number, and country name are all present.
    pub fn validate(&self) -> Result<DeliveryInfo, ValidationError> {
        if self.full_name.is_empty() || self.phone.is_empty() || self.country_name.is_empty() {
            return Err(ValidationError::MissingDeliveryInfo);
        }
        Ok(DeliveryInfo {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone_code: self.phone_code.clone(),
            phone: self.phone.clone(),
            country_code: self.country_code.clone(),
            country_name: self.country_name.clone(),
            state_code: self.state_code.clone(),
            state_name: self.state_name.clone(),
            city_name: self.city_name.clone(),
        })
    }
}

/// Validated delivery details as embedded in an [`Order`].
///
/// For locally assembled orders `full_name`, `phone`, and
/// `country_name` are non-empty; records deserialized from the server
/// or the durable store are taken as-is.
///
/// [`Order`]: super::Order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub full_name: String,
    pub email: String,
    pub phone_code: String,
    pub phone: String,
    #[serde(rename = "countryIso")]
    pub country_code: String,
    pub country_name: String,
    #[serde(rename = "stateIso")]
    pub state_code: String,
    pub state_name: String,
    pub city_name: String,
}
