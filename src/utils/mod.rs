use std::sync::Once;

use crate::errors::{KasaError, Result};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("kasa_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Parses a raw form field as a finite amount.
///
/// Form inputs arrive as text; this is the single fallible boundary between
/// user input and the numeric model. Unparsable or non-finite input is
/// rejected, never coerced to zero.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| KasaError::InvalidNumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(KasaError::InvalidNumber(raw.to_string()));
    }
    Ok(value)
}
