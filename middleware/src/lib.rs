//! Cross-cutting handlers that sit at the front of the chain.

mod logging_auth;

pub use logging_auth::{AuthHandler, LoggingHandler};

#[cfg(test)]
mod test;
