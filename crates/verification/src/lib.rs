//! # Verification
//!
//! One-time phone verification codes.
//!
//! Codes live in an [`ExpiringStore`] keyed by the normalised phone number. Expiry is computed
//! against an injected [`Clock`], so tests drive time with [`ManualClock`] instead of sleeping.
//! Delivering the code (WhatsApp, SMS) is the caller's job; this crate only issues and checks.
//!
//! ## Modules
//!
//! - [`clock`] - Clock trait, SystemClock, ManualClock
//! - [`store`] - ExpiringStore: put/get/remove with per-entry TTL
//! - [`phone`] - `whatsapp:+<digits>` formatting and validation
//! - [`service`] - VerificationService: send_code / check_code

pub mod clock;
pub mod error;
pub mod phone;
pub mod service;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, VerificationError};
pub use phone::{extract_phone_number, format_whatsapp_number, validate_phone_number};
pub use service::{IssuedCode, VerificationService, VerifiedNumber, DEFAULT_CODE_TTL_SECS};
pub use store::ExpiringStore;
