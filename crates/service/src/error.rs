use thiserror::Error;

/// Result type for booking operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`FlightBookingService`](crate::FlightBookingService).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No flight with the given code exists in the catalog.
    #[error("Flight '{0}' not found")]
    FlightNotFound(String),

    /// No booking with the given id exists in the ledger.
    #[error("Booking '{0}' not found")]
    BookingNotFound(String),

    /// The flight does not have enough free seats.
    #[error("Not enough seats: requested {requested}, available {available}")]
    OverCapacity {
        /// Seats requested by the booking.
        requested: u32,
        /// Seats still free on the flight.
        available: u32,
    },

    /// Passenger data was rejected.
    #[error("{0}")]
    InputValidation(String),
}

impl Error {
    #[inline]
    pub(crate) fn validation<S: Into<String>>(reason: S) -> Self {
        Error::InputValidation(reason.into())
    }
}
