//! Environment-backed settings for Intervue.
//!
//! All configuration comes from environment variables with development
//! defaults. Loading never fails: a missing API key is only rejected when
//! the provider is constructed, so tooling that never talks to the LLM
//! (tests, health probes) can still build a `Settings`.

use secrecy::SecretString;

/// Default model used for interviewer replies.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Frontend dev-server origins allowed by CORS when none are configured.
const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Runtime settings for the AI service.
pub struct Settings {
    /// Model identifier sent with every completion request.
    /// Env: `INTERVUE_MODEL`.
    pub model: String,
    /// OpenAI API key. Env: `OPENAI_API_KEY`. Empty when unset; validated
    /// at provider construction.
    pub openai_api_key: SecretString,
    /// Origins allowed by the CORS layer.
    /// Env: `INTERVUE_ALLOWED_ORIGINS`, comma-separated.
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load settings from the environment, falling back to development
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let model = std::env::var("INTERVUE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let openai_api_key = SecretString::from(
            std::env::var("OPENAI_API_KEY").unwrap_or_default(),
        );

        let allowed_origins = match std::env::var("INTERVUE_ALLOWED_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            Err(_) => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        };

        Self {
            model,
            openai_api_key,
            allowed_origins,
        }
    }
}

// Settings intentionally does not derive Debug: the API key lives inside
// and SecretString only guards against direct formatting of the field.

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_from_env_defaults_and_overrides() {
        // Single test for all env interactions: the variables are process
        // globals and parallel tests would race on them.
        // SAFETY: no other test in this crate touches these variables.
        unsafe {
            std::env::remove_var("INTERVUE_MODEL");
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("INTERVUE_ALLOWED_ORIGINS");
        }

        let settings = Settings::from_env();
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.openai_api_key.expose_secret().is_empty());
        assert_eq!(settings.allowed_origins.len(), 4);
        assert!(settings
            .allowed_origins
            .contains(&"http://localhost:5173".to_string()));

        // SAFETY: same reasoning as above; cleaned up before returning.
        unsafe {
            std::env::set_var("INTERVUE_MODEL", "gpt-4o");
            std::env::set_var("OPENAI_API_KEY", "sk-test");
            std::env::set_var("INTERVUE_ALLOWED_ORIGINS", "https://a.example, https://b.example");
        }

        let settings = Settings::from_env();
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.openai_api_key.expose_secret(), "sk-test");
        assert_eq!(
            settings.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );

        unsafe {
            std::env::remove_var("INTERVUE_MODEL");
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("INTERVUE_ALLOWED_ORIGINS");
        }
    }
}
