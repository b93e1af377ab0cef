use thiserror::Error;

/// Error taxonomy for the weather resolver.
///
/// Configuration problems are the caller's to fix (no retry, no
/// fallback); upstream problems on the forecast path are fatal for the
/// request. The historical path never surfaces upstream errors: partial
/// failures are averaged around and total failure degrades to the
/// synthetic profile.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("wedding date is not configured")]
    NotConfigured,

    #[error("stored wedding date is not a valid date: '{0}'")]
    InvalidWeddingDate(String),

    #[error("{provider} request failed with status {status}: {body}")]
    UpstreamStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned a malformed response: {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },

    #[error("request to {provider} failed: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl WeatherError {
    /// True for errors caused by missing/invalid site settings, which a
    /// caller should report as a bad request rather than a server fault.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::InvalidWeddingDate(_))
    }
}

/// Keep upstream error bodies short enough for logs and API responses.
/// Cuts on a char boundary so multibyte bodies cannot panic the slice.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_flagged() {
        assert!(WeatherError::NotConfigured.is_configuration());
        assert!(WeatherError::InvalidWeddingDate("soon".into()).is_configuration());
        assert!(
            !WeatherError::UpstreamStatus {
                provider: "open-meteo forecast",
                status: 503,
                body: String::new(),
            }
            .is_configuration()
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let long = "x".repeat(500);
        let short = truncate_body(&long);
        assert_eq!(short.len(), 203);
        assert!(short.ends_with("..."));
        assert_eq!(truncate_body("ok"), "ok");
    }

    #[test]
    fn truncation_never_splits_a_multibyte_char() {
        // 'é' occupies bytes 199..201, straddling the cut point.
        let body = format!("{}é and more", "x".repeat(199));
        let short = truncate_body(&body);
        assert_eq!(short, format!("{}...", "x".repeat(199)));

        // All-multibyte input around the boundary also stays valid.
        let emoji = "☔".repeat(100);
        let short = truncate_body(&emoji);
        assert!(short.ends_with("..."));
        assert!(short.len() <= 203);
    }
}
