use std::time::Duration;

/// Runtime knobs for the HTTP surface, filled from the environment in
/// `main`. Defaults mirror what the service shipped with: a 5 KiB JSON
/// body cap and three products from the top-rated selector.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub top_rated_count: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 5 * 1024,
            request_timeout: Duration::from_secs(10),
            top_rated_count: mercata_catalog::DEFAULT_TOP_RATED,
        }
    }
}

pub fn validate_startup_config(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max_body_bytes must be > 0".to_string());
    }
    if api.request_timeout.is_zero() {
        return Err("request_timeout must be > 0".to_string());
    }
    if api.top_rated_count == 0 {
        return Err("top_rated_count must be > 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_config_validation_rejects_zero_limits() {
        let ok = ApiConfig::default();
        assert!(validate_startup_config(&ok).is_ok());

        let bad = ApiConfig {
            max_body_bytes: 0,
            ..ApiConfig::default()
        };
        let err = validate_startup_config(&bad).expect_err("zero body cap");
        assert!(err.contains("max_body_bytes"));

        let bad = ApiConfig {
            top_rated_count: 0,
            ..ApiConfig::default()
        };
        let err = validate_startup_config(&bad).expect_err("zero top count");
        assert!(err.contains("top_rated_count"));
    }
}
