//! In-memory flight catalog and booking ledger.
//!
//! The catalog is fixed at construction time. Bookings live in a ledger
//! guarded by a single lock, so capacity checks and inserts can never
//! interleave with other writers.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod catalog;
mod error;
mod service;
mod types;
mod validation;

pub use catalog::{CatalogError, load_catalog, parse_catalog, seed_flights};
pub use error::{Error, Result};
pub use service::FlightBookingService;
pub use types::{Booking, BookingStatus, Flight, FlightInfo, Passenger};
