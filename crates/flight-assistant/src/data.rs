//! Serialized views of domain records, as returned by the tools.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use flight_booking_service::{Booking, FlightInfo, Passenger};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A flight with its free seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightData {
    /// Flight code.
    pub code: String,
    /// Departure city.
    pub departure: String,
    /// Destination city.
    pub destination: String,
    /// Local departure time.
    pub departure_time: NaiveDateTime,
    /// Price of a single ticket.
    pub ticket_price: Decimal,
    /// Total seats.
    pub capacity: u32,
    /// Seats still free.
    pub available_capacity: u32,
}

impl From<FlightInfo> for FlightData {
    fn from(info: FlightInfo) -> Self {
        let FlightInfo {
            flight,
            available_capacity,
        } = info;
        Self {
            code: flight.code,
            departure: flight.departure,
            destination: flight.destination,
            departure_time: flight.departure_time,
            ticket_price: flight.ticket_price,
            capacity: flight.capacity,
            available_capacity,
        }
    }
}

/// Result of a route search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightsData {
    /// Matching flights, earliest first.
    pub flights: Vec<FlightData>,
}

/// A passenger on a booking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerData {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
}

impl From<Passenger> for PassengerData {
    fn from(passenger: Passenger) -> Self {
        Self {
            first_name: passenger.first_name,
            last_name: passenger.last_name,
            date_of_birth: passenger.date_of_birth,
        }
    }
}

/// Full booking information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingData {
    /// Booking id.
    pub id: String,
    /// Booked flight.
    pub flight_code: String,
    /// `CONFIRMED` or `CANCELLED`.
    pub status: String,
    /// When the booking was made.
    pub booked_at: DateTime<Utc>,
    /// Total price for all passengers.
    pub total_price: Decimal,
    /// Travellers.
    pub passengers: Vec<PassengerData>,
}

impl From<Booking> for BookingData {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            flight_code: booking.flight_code,
            status: booking.status.as_str().to_owned(),
            booked_at: booking.booked_at,
            total_price: booking.total_price,
            passengers: booking
                .passengers
                .into_iter()
                .map(PassengerData::from)
                .collect(),
        }
    }
}
