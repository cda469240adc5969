use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use parking_lot::Mutex;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{Booking, BookingStatus, Flight, FlightInfo, Passenger};
use crate::validation::validate_passengers;

/// Flight catalog plus booking ledger.
///
/// The service is `Sync` and meant to be shared behind an `Arc`. All ledger
/// access goes through one lock, including the capacity check that guards
/// every new booking.
pub struct FlightBookingService {
    flights: HashMap<String, Flight>,
    bookings: Mutex<HashMap<String, Booking>>,
}

impl FlightBookingService {
    /// Creates a service serving the given flights and no bookings.
    ///
    /// Flight codes and city names are normalized to upper case. When two
    /// flights share a code, the later one wins.
    pub fn new<I: IntoIterator<Item = Flight>>(flights: I) -> Self {
        let flights = flights
            .into_iter()
            .map(|mut flight| {
                flight.code = normalize(&flight.code);
                flight.departure = normalize(&flight.departure);
                flight.destination = normalize(&flight.destination);
                (flight.code.clone(), flight)
            })
            .collect::<HashMap<_, _>>();
        debug!("flight catalog loaded with {} flights", flights.len());
        Self {
            flights,
            bookings: Mutex::new(HashMap::new()),
        }
    }

    /// Lists flights on a route, earliest departure first.
    ///
    /// City names are compared case-insensitively and ignoring surrounding
    /// whitespace. An unknown route yields an empty list.
    pub fn list_flights(
        &self,
        departure: &str,
        destination: &str,
    ) -> Vec<FlightInfo> {
        let departure = normalize(departure);
        let destination = normalize(destination);
        self.collect_infos(|flight| {
            flight.departure == departure && flight.destination == destination
        })
    }

    /// Lists the whole catalog, earliest departure first.
    pub fn flights(&self) -> Vec<FlightInfo> {
        self.collect_infos(|_| true)
    }

    /// Looks up a flight by code.
    pub fn get_flight(&self, code: &str) -> Result<FlightInfo> {
        let flight = self.flight(code)?;
        let bookings = self.bookings.lock();
        Ok(FlightInfo {
            flight: flight.clone(),
            available_capacity: available_capacity(flight, &bookings),
        })
    }

    /// Books one seat per passenger on the given flight.
    pub fn book_tickets(
        &self,
        flight_code: &str,
        passengers: Vec<Passenger>,
    ) -> Result<Booking> {
        self.book_tickets_on(flight_code, passengers, Utc::now().date_naive())
    }

    fn book_tickets_on(
        &self,
        flight_code: &str,
        passengers: Vec<Passenger>,
        today: NaiveDate,
    ) -> Result<Booking> {
        validate_passengers(&passengers, today).inspect_err(|err| {
            debug!("rejected booking on {flight_code}: {err}");
        })?;

        let mut bookings = self.bookings.lock();
        let flight = self.flight(flight_code)?;

        let available = available_capacity(flight, &bookings);
        let requested = seats_requested(passengers.len(), available)
            .inspect_err(|err| {
                debug!("rejected booking on {}: {err}", flight.code);
            })?;

        let total_price = (flight.ticket_price * Decimal::from(requested))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            flight_code: flight.code.clone(),
            passengers,
            status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
            total_price,
        };
        bookings.insert(booking.id.clone(), booking.clone());

        info!(
            "booking {} confirmed on {} for {requested} passenger(s)",
            booking.id, booking.flight_code
        );
        Ok(booking)
    }

    /// Looks up a booking by id.
    pub fn find_booking(&self, booking_id: &str) -> Result<Booking> {
        self.bookings
            .lock()
            .get(booking_id.trim())
            .cloned()
            .ok_or_else(|| Error::BookingNotFound(booking_id.to_owned()))
    }

    /// Cancels a booking and releases its seats.
    ///
    /// Cancelling an already cancelled booking is a no-op that returns the
    /// booking unchanged.
    pub fn cancel_booking(&self, booking_id: &str) -> Result<Booking> {
        let mut bookings = self.bookings.lock();
        let Some(booking) = bookings.get_mut(booking_id.trim()) else {
            return Err(Error::BookingNotFound(booking_id.to_owned()));
        };
        if booking.status == BookingStatus::Cancelled {
            trace!("booking {} already cancelled", booking.id);
            return Ok(booking.clone());
        }
        booking.status = BookingStatus::Cancelled;
        info!(
            "booking {} on {} cancelled, {} seat(s) released",
            booking.id,
            booking.flight_code,
            booking.seats()
        );
        Ok(booking.clone())
    }

    fn flight(&self, code: &str) -> Result<&Flight> {
        self.flights
            .get(&normalize(code))
            .ok_or_else(|| Error::FlightNotFound(code.to_owned()))
    }

    fn collect_infos<P>(&self, predicate: P) -> Vec<FlightInfo>
    where
        P: Fn(&Flight) -> bool,
    {
        let bookings = self.bookings.lock();
        let mut infos = self
            .flights
            .values()
            .filter(|flight| predicate(*flight))
            .map(|flight| FlightInfo {
                flight: flight.clone(),
                available_capacity: available_capacity(flight, &bookings),
            })
            .collect::<Vec<_>>();
        drop(bookings);

        infos.sort_by(|a, b| {
            a.flight
                .departure_time
                .cmp(&b.flight.departure_time)
                .then_with(|| a.flight.code.cmp(&b.flight.code))
        });
        infos
    }
}

/// Free seats on `flight`, given the ledger contents.
fn available_capacity(
    flight: &Flight,
    bookings: &HashMap<String, Booking>,
) -> u32 {
    let held: u32 = bookings
        .values()
        .filter(|booking| {
            booking.flight_code == flight.code && booking.is_confirmed()
        })
        .map(Booking::seats)
        .sum();
    flight.capacity.saturating_sub(held)
}

/// Converts a passenger count into seats, failing when they do not fit.
///
/// Counts beyond `u32::MAX` are reported as `u32::MAX` requested seats.
fn seats_requested(count: usize, available: u32) -> Result<u32> {
    match u32::try_from(count) {
        Ok(requested) if requested <= available => Ok(requested),
        requested => Err(Error::OverCapacity {
            requested: requested.unwrap_or(u32::MAX),
            available,
        }),
    }
}

#[inline]
fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::seed_flights;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn alice() -> Passenger {
        Passenger::new("Alice", "Nowak", date(1990, 3, 10))
    }

    fn bob() -> Passenger {
        Passenger::new("Bob", "Kowalski", date(1988, 7, 22))
    }

    #[test]
    fn test_list_flights_normalizes_cities() {
        let service = FlightBookingService::new(seed_flights());

        let flights = service.list_flights("  Warsaw ", "krakow");
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].flight.code, "LO123");
        assert_eq!(flights[0].available_capacity, 5);

        assert!(service.list_flights("Warsaw", "Berlin").is_empty());
    }

    #[test]
    fn test_list_flights_sorted_by_departure() {
        let mut flights = seed_flights();
        let mut late = flights[0].clone();
        late.code = "LO999".to_owned();
        late.departure_time = late.departure_time + chrono::Duration::hours(6);
        let mut early = flights[0].clone();
        early.code = "LO001".to_owned();
        early.departure_time = early.departure_time - chrono::Duration::hours(2);
        flights.push(late);
        flights.push(early);

        let service = FlightBookingService::new(flights);
        let codes = service
            .list_flights("WARSAW", "KRAKOW")
            .into_iter()
            .map(|info| info.flight.code)
            .collect::<Vec<_>>();
        assert_eq!(codes, ["LO001", "LO123", "LO999"]);
    }

    #[test]
    fn test_get_flight_not_found() {
        let service = FlightBookingService::new(seed_flights());
        let err = service.get_flight("XX000").unwrap_err();
        assert_eq!(err.to_string(), "Flight 'XX000' not found");
        assert!(service.get_flight(" lo456 ").is_ok());
    }

    #[test]
    fn test_book_and_cancel_updates_capacity() {
        let service = FlightBookingService::new(seed_flights());

        let booking = service.book_tickets("LO123", vec![alice(), bob()]).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.flight_code, "LO123");
        assert_eq!(booking.total_price, Decimal::new(39998, 2));
        assert!(Uuid::parse_str(&booking.id).is_ok());
        assert_eq!(service.get_flight("LO123").unwrap().available_capacity, 3);

        assert_eq!(service.find_booking(&booking.id).unwrap(), booking);

        let cancelled = service.cancel_booking(&booking.id).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(service.get_flight("LO123").unwrap().available_capacity, 5);

        // Cancelling twice is idempotent.
        let again = service.cancel_booking(&booking.id).unwrap();
        assert_eq!(again, cancelled);
        assert_eq!(service.get_flight("LO123").unwrap().available_capacity, 5);
    }

    #[test]
    fn test_over_capacity() {
        let service = FlightBookingService::new(seed_flights());
        service.book_tickets("LO456", vec![alice(), bob()]).unwrap();

        let err = service
            .book_tickets("LO456", vec![alice(), bob()])
            .unwrap_err();
        assert_eq!(
            err,
            Error::OverCapacity {
                requested: 2,
                available: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "Not enough seats: requested 2, available 1"
        );

        // Exactly filling the flight is allowed.
        service.book_tickets("LO456", vec![alice()]).unwrap();
        assert_eq!(service.get_flight("LO456").unwrap().available_capacity, 0);
    }

    #[test]
    fn test_seats_requested_never_wraps() {
        assert_eq!(seats_requested(3, 3), Ok(3));
        assert_eq!(
            seats_requested(4, 3),
            Err(Error::OverCapacity {
                requested: 4,
                available: 3
            })
        );
        assert_eq!(
            seats_requested(usize::MAX, u32::MAX - 1),
            Err(Error::OverCapacity {
                requested: u32::MAX,
                available: u32::MAX - 1
            })
        );
        if let Ok(count) = usize::try_from(u64::from(u32::MAX) + 1) {
            // Would wrap to 0 seats with a plain cast.
            assert!(seats_requested(count, 5).is_err());
        }
    }

    #[test]
    fn test_validation_precedes_lookup() {
        let service = FlightBookingService::new(seed_flights());
        let err = service.book_tickets("XX000", vec![]).unwrap_err();
        assert_eq!(
            err,
            Error::InputValidation("Passenger list must not be empty".to_owned())
        );

        let err = service
            .book_tickets_on(
                "LO123",
                vec![Passenger::new("Tim", "Lis", date(2030, 1, 1))],
                date(2026, 1, 1),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InputValidation(_)));
        assert_eq!(service.get_flight("LO123").unwrap().available_capacity, 5);
    }

    #[test]
    fn test_total_price_rounding() {
        let mut flight = seed_flights().remove(0);
        flight.ticket_price = Decimal::new(10005, 3); // 10.005
        let service = FlightBookingService::new([flight]);

        let booking = service.book_tickets("LO123", vec![alice()]).unwrap();
        assert_eq!(booking.total_price, Decimal::new(1001, 2));
    }

    #[test]
    fn test_booking_not_found() {
        let service = FlightBookingService::new(seed_flights());
        let err = service.find_booking("nope").unwrap_err();
        assert_eq!(err.to_string(), "Booking 'nope' not found");
        let err = service.cancel_booking("nope").unwrap_err();
        assert_eq!(err, Error::BookingNotFound("nope".to_owned()));
    }
}
