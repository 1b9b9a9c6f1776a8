//! Delivery form state with cascade-clear rules.
//!
//! The form wraps a [`DeliveryDraft`] and enforces the geographic
//! invariant: state and city are only meaningful relative to the
//! selected country, so changing the country clears the state and city,
//! and changing the state clears the city. All other fields are set
//! independently; validation is deferred to order assembly.
//!
//! The country/state/city directory feeding the selectors is an
//! external collaborator - the form only records what was chosen.
//! State is session-scoped; nothing here persists.

use adire_core::{DeliveryDraft, DeliveryInfo, ValidationError};

/// Mutable delivery form, created empty at session start.
#[derive(Debug, Clone, Default)]
pub struct DeliveryForm {
    draft: DeliveryDraft,
}

impl DeliveryForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume editing from previously entered fields.
    #[must_use]
    pub const fn from_draft(draft: DeliveryDraft) -> Self {
        Self { draft }
    }

    /// The current form contents.
    #[must_use]
    pub const fn draft(&self) -> &DeliveryDraft {
        &self.draft
    }

    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.draft.full_name = full_name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    pub fn set_phone_code(&mut self, phone_code: impl Into<String>) {
        self.draft.phone_code = phone_code.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.draft.phone = phone.into();
    }

    /// Select a country. Changing the country invalidates the dependent
    /// state and city selections.
    pub fn set_country(&mut self, code: impl Into<String>, name: impl Into<String>) {
        let code = code.into();
        if code != self.draft.country_code {
            self.draft.state_code.clear();
            self.draft.state_name.clear();
            self.draft.city_name.clear();
        }
        self.draft.country_code = code;
        self.draft.country_name = name.into();
    }

    /// Select a state/province within the current country. Changing the
    /// state invalidates the dependent city selection.
    pub fn set_state(&mut self, code: impl Into<String>, name: impl Into<String>) {
        let code = code.into();
        if code != self.draft.state_code {
            self.draft.city_name.clear();
        }
        self.draft.state_code = code;
        self.draft.state_name = name.into();
    }

    pub fn set_city(&mut self, name: impl Into<String>) {
        self.draft.city_name = name.into();
    }

    /// Commit the form into an owned, validated [`DeliveryInfo`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDeliveryInfo`] if required
    /// fields are still empty.
    pub fn commit(&self) -> Result<DeliveryInfo, ValidationError> {
        self.draft.validate()
    }
}
