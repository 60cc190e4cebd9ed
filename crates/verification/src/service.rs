//! # Verification service
//!
//! Issues a 6-digit code per phone number and checks it. A code is single-use: a successful check
//! removes it. A wrong code leaves it pending until it expires.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, VerificationError};
use crate::phone::{extract_phone_number, format_whatsapp_number, validate_phone_number};
use crate::store::ExpiringStore;

/// Default code lifetime: 10 minutes.
pub const DEFAULT_CODE_TTL_SECS: i64 = 600;

/// A freshly issued code, to be delivered to the user out of band.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCode {
    /// Normalised number the code is bound to (`+<digits>`).
    pub phone_number: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful check.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedNumber {
    pub phone_number: String,
    /// `whatsapp:+<digits>`, ready to store on the user profile.
    pub whatsapp_format: String,
    pub verified_at: DateTime<Utc>,
}

pub struct VerificationService<C: Clock = SystemClock> {
    codes: ExpiringStore<C>,
    ttl: Duration,
}

impl VerificationService<SystemClock> {
    /// Wall-clock service with the default TTL.
    pub fn new() -> Self {
        Self::with_clock(SystemClock, Duration::seconds(DEFAULT_CODE_TTL_SECS))
    }
}

impl Default for VerificationService<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> VerificationService<C> {
    pub fn with_clock(clock: C, ttl: Duration) -> Self {
        Self {
            codes: ExpiringStore::new(clock),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Codes currently held, expired ones included until swept.
    pub fn pending(&self) -> usize {
        self.codes.len()
    }

    /// Drops expired codes.
    pub fn purge_expired(&self) -> usize {
        self.codes.purge_expired()
    }

    /// Issues a new code for `phone`, replacing any pending one.
    pub fn send_code(&self, phone: &str) -> Result<IssuedCode> {
        let phone_number = normalise(phone)?;
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32));
        let expires_at = self.codes.put(&phone_number, code.as_str(), self.ttl);

        info!(
            phone_number = %phone_number,
            expires_at = %expires_at,
            "step: verification code issued"
        );

        Ok(IssuedCode {
            phone_number,
            code,
            expires_at,
        })
    }

    /// Checks `code` against the pending code for `phone`.
    pub fn check_code(&self, phone: &str, code: &str) -> Result<VerifiedNumber> {
        let phone_number = normalise(phone)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(VerificationError::EmptyCode);
        }

        let expected = self
            .codes
            .get(&phone_number)
            .ok_or(VerificationError::NoPendingCode)?;
        if expected != code {
            warn!(phone_number = %phone_number, "verification code mismatch");
            return Err(VerificationError::CodeMismatch);
        }

        self.codes.remove(&phone_number);
        info!(phone_number = %phone_number, "step: phone number verified");

        Ok(VerifiedNumber {
            whatsapp_format: format_whatsapp_number(&phone_number),
            phone_number,
            verified_at: self.codes.clock().now(),
        })
    }
}

/// Validates `phone` and returns it as `+<digits>`.
fn normalise(phone: &str) -> Result<String> {
    let bare = extract_phone_number(phone.trim());
    if !validate_phone_number(&bare) {
        return Err(VerificationError::InvalidPhoneNumber(phone.to_string()));
    }
    Ok(extract_phone_number(&format_whatsapp_number(&bare)))
}
