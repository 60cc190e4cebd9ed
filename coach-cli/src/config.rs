use std::env;
use std::str::FromStr;

use anyhow::Result;
use memory_extractor::ExtractorConfig;
use tracing::warn;
use verification::DEFAULT_CODE_TTL_SECS;

/// Coach configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CoachConfig {
    pub log_file: String,
    pub verification_code_ttl_secs: i64,
    /// Owner ids admitted by the auth handler. Empty admits everyone.
    pub allowed_owners: Vec<String>,
    pub extractor: ExtractorConfig,
}

impl CoachConfig {
    /// Loads configuration from the environment. Invalid numeric values fall back to their
    /// defaults with a warning.
    pub fn load() -> Result<Self> {
        let log_file = env::var("COACH_LOG_FILE").unwrap_or_else(|_| "logs/coach.log".to_string());
        let verification_code_ttl_secs =
            parse_or("VERIFICATION_CODE_TTL_SECS", DEFAULT_CODE_TTL_SECS);
        let allowed_owners = env::var("COACH_ALLOWED_OWNERS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let defaults = ExtractorConfig::default();
        let extractor = ExtractorConfig {
            min_message_chars: parse_or("EXTRACTOR_MIN_MESSAGE_CHARS", defaults.min_message_chars),
            general_min_chars: parse_or("EXTRACTOR_GENERAL_MIN_CHARS", defaults.general_min_chars),
            substantial_word_count: parse_or(
                "EXTRACTOR_SUBSTANTIAL_WORDS",
                defaults.substantial_word_count,
            ),
            substantial_min_indicators: parse_or(
                "EXTRACTOR_SUBSTANTIAL_INDICATORS",
                defaults.substantial_min_indicators,
            ),
            title_max_chars: parse_or("EXTRACTOR_TITLE_MAX_CHARS", defaults.title_max_chars),
        };

        Ok(Self {
            log_file,
            verification_code_ttl_secs,
            allowed_owners,
            extractor,
        })
    }

    pub fn verification_code_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.verification_code_ttl_secs)
    }
}

fn parse_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, default = %default, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
