use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Flight;

/// Errors raised while loading a flight catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    /// The file is not a JSON array of flights.
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A flight entry is unusable.
    #[error("invalid flight '{code}': {reason}")]
    InvalidFlight {
        /// Code of the offending flight.
        code: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Returns the built-in demo catalog.
pub fn seed_flights() -> Vec<Flight> {
    vec![
        seed("LO123", "WARSAW", "KRAKOW", (2026, 1, 5, 9, 30), 19999, 5),
        seed("LO456", "WARSAW", "GDANSK", (2026, 1, 5, 13, 15), 15950, 3),
        seed("LO789", "KRAKOW", "WARSAW", (2026, 1, 6, 18, 45), 18900, 4),
    ]
}

/// Reads a JSON array of flights from `path`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Flight>, CatalogError> {
    let path = path.as_ref();
    debug!("loading flight catalog from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parses a JSON array of flights.
pub fn parse_catalog(content: &str) -> Result<Vec<Flight>, CatalogError> {
    let flights: Vec<Flight> = serde_json::from_str(content)?;
    for flight in &flights {
        let reason = if flight.code.trim().is_empty() {
            Some("code is empty")
        } else if flight.departure.trim().is_empty()
            || flight.destination.trim().is_empty()
        {
            Some("route is incomplete")
        } else if flight.ticket_price.is_sign_negative() {
            Some("ticket_price is negative")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(CatalogError::InvalidFlight {
                code: flight.code.clone(),
                reason,
            });
        }
    }
    Ok(flights)
}

fn seed(
    code: &str,
    departure: &str,
    destination: &str,
    (year, month, day, hour, min): (i32, u32, u32, u32, u32),
    price_cents: i64,
    capacity: u32,
) -> Flight {
    // Out of range literals fall back to the epoch, which the seed tests pin.
    let departure_time = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, min, 0))
        .unwrap_or_default();
    Flight {
        code: code.to_owned(),
        departure: departure.to_owned(),
        destination: destination.to_owned(),
        departure_time,
        ticket_price: Decimal::new(price_cents, 2),
        capacity,
    }
}
