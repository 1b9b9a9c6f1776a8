//! Unified checkout error type.
//!
//! Every fallible checkout operation returns `Result<T, CheckoutError>`
//! propagated up to a single presentation boundary. No error here is
//! fatal to the process: validation errors block progression until the
//! user corrects input, and network/malformed-response errors are
//! either absorbed by a fallback path or surfaced as a retryable
//! message. Retry is always user-initiated, never automatic.

use thiserror::Error;

use adire_core::ValidationError;

/// Application-level error type for the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Required delivery or shipping input is missing.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Backend returned an unexpected payload shape. Treated the same
    /// as a network failure: triggers fallback or a user-facing retry.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Payment initiation succeeded but carried no usable redirect URL.
    #[error("payment initiation did not return a redirect URL")]
    MissingPaymentUrl,

    /// Payment redirect URL could not be parsed.
    #[error("invalid payment redirect URL: {0}")]
    InvalidRedirectUrl(#[from] url::ParseError),

    /// A submission arrived while a previous one is still in flight.
    #[error("a checkout submission is already in progress")]
    AlreadyProcessing,

    /// Confirmation or cancellation attempted outside the preview gate.
    #[error("no order is awaiting confirmation")]
    NothingToConfirm,
}

impl CheckoutError {
    /// Whether this error is fixed by correcting user input rather
    /// than retrying the backend.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether a user-initiated retry of the same action is sensible.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Api { .. } | Self::MalformedResponse(_) | Self::MissingPaymentUrl
        )
    }
}

/// Result type alias for `CheckoutError`.
pub type Result<T> = std::result::Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CheckoutError::Validation(ValidationError::MissingShippingSelection);
        assert_eq!(err.to_string(), "validation error: no shipping location selected");

        let err = CheckoutError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 502 - bad gateway");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(CheckoutError::MissingPaymentUrl.is_retryable());
        assert!(
            CheckoutError::MalformedResponse("not an array".to_string()).is_retryable()
        );
        assert!(!CheckoutError::Validation(ValidationError::EmptyCart).is_retryable());
        assert!(CheckoutError::Validation(ValidationError::EmptyCart).is_validation());
    }
}
