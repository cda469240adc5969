use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A person travelling on a booking.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Passenger {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
}

impl Passenger {
    /// Creates a passenger.
    #[inline]
    pub fn new<S1: Into<String>, S2: Into<String>>(
        first_name: S1,
        last_name: S2,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
        }
    }
}

/// A scheduled flight in the catalog.
///
/// City names are stored upper-cased, which is how route lookups compare
/// them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flight {
    /// Unique flight code, e.g. `LO123`.
    pub code: String,
    /// Departure city.
    pub departure: String,
    /// Destination city.
    pub destination: String,
    /// Local departure time.
    pub departure_time: NaiveDateTime,
    /// Price of a single ticket.
    pub ticket_price: Decimal,
    /// Total number of seats.
    pub capacity: u32,
}

/// A flight together with its current free seats.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FlightInfo {
    /// The flight record.
    pub flight: Flight,
    /// Seats not held by confirmed bookings.
    pub available_capacity: u32,
}

/// Lifecycle state of a booking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Seats are held.
    Confirmed,
    /// Seats were released.
    Cancelled,
}

impl BookingStatus {
    /// Returns the wire name of the status.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

/// A reservation of seats on a flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Booking {
    /// UUID v4 identifier.
    pub id: String,
    /// Code of the booked flight.
    pub flight_code: String,
    /// Travellers, one seat each.
    pub passengers: Vec<Passenger>,
    /// Current status.
    pub status: BookingStatus,
    /// When the booking was confirmed.
    pub booked_at: DateTime<Utc>,
    /// Ticket price times passenger count, rounded to cents.
    pub total_price: Decimal,
}

impl Booking {
    /// Number of seats this booking occupies while confirmed.
    #[inline]
    pub fn seats(&self) -> u32 {
        // Bookings only exist after the capacity check, so this never saturates.
        u32::try_from(self.passengers.len()).unwrap_or(u32::MAX)
    }

    /// Returns `true` if the booking still holds its seats.
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}
