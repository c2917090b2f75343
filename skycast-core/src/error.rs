use thiserror::Error;

/// Errors surfaced to the user for a single search attempt.
///
/// Every variant is terminal for the attempt: the caller shows the message
/// and waits for the next search. The `Display` strings double as the
/// user-facing messages, so they are written to stand on their own.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No credential configured. Checked before any request is sent.
    #[error("API key is missing. Set OPENWEATHER_API_KEY or run `skycast configure`.")]
    MissingApiKey,

    /// The API rejected the configured credential (HTTP 401).
    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,

    /// Geocoding returned no match for the query, or the API answered 404.
    #[error("Location not found. Please try another location.")]
    LocationNotFound,

    /// Anything else: transport failures, unexpected statuses, bad JSON.
    #[error("Failed to fetch weather data. Please try again.")]
    Other(#[source] anyhow::Error),
}

impl FetchError {
    /// Configuration errors are not worth re-submitting the same search for.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::InvalidApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_matches_user_guidance() {
        let msg = FetchError::LocationNotFound.to_string();
        assert_eq!(msg, "Location not found. Please try another location.");
    }

    #[test]
    fn configuration_classification() {
        assert!(FetchError::MissingApiKey.is_configuration());
        assert!(FetchError::InvalidApiKey.is_configuration());
        assert!(!FetchError::LocationNotFound.is_configuration());
        assert!(!FetchError::Other(anyhow::anyhow!("boom")).is_configuration());
    }
}
