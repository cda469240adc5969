use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use flight_booking_service::{
    BookingStatus, Error, Flight, FlightBookingService, Passenger, seed_flights,
};

fn passenger(no: usize) -> Passenger {
    Passenger::new(
        format!("Traveller{no}"),
        "Tester",
        NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
    )
}

fn big_flight(capacity: u32) -> Flight {
    let mut flight = seed_flights().remove(0);
    flight.code = "LO100".to_owned();
    flight.capacity = capacity;
    flight
}

#[test]
fn test_concurrent_bookings_never_oversell() {
    const CAPACITY: u32 = 37;
    const THREADS: usize = 16;
    const ATTEMPTS: usize = 10;

    let service = Arc::new(FlightBookingService::new([big_flight(CAPACITY)]));

    let results = thread::scope(|scope| {
        let handles = (0..THREADS)
            .map(|t| {
                let service = Arc::clone(&service);
                scope.spawn(move || {
                    let mut confirmed = 0u32;
                    let mut rejected = 0u32;
                    for attempt in 0..ATTEMPTS {
                        let seats = 1 + (t + attempt) % 2;
                        let passengers =
                            (0..seats).map(|n| passenger(t * 100 + n)).collect();
                        match service.book_tickets("LO100", passengers) {
                            Ok(booking) => confirmed += booking.seats(),
                            Err(Error::OverCapacity { .. }) => rejected += 1,
                            Err(err) => panic!("unexpected error: {err}"),
                        }
                    }
                    (confirmed, rejected)
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    let confirmed: u32 = results.iter().map(|(seats, _)| seats).sum();
    let rejected: u32 = results.iter().map(|(_, count)| count).sum();
    assert!(confirmed <= CAPACITY);
    assert!(rejected > 0);

    let info = service.get_flight("LO100").unwrap();
    assert_eq!(info.available_capacity, CAPACITY - confirmed);
}

#[test]
fn test_concurrent_cancellations_release_seats_once() {
    let service = Arc::new(FlightBookingService::new([big_flight(4)]));
    let booking = service
        .book_tickets("LO100", vec![passenger(1), passenger(2), passenger(3)])
        .unwrap();

    thread::scope(|scope| {
        for _ in 0..8 {
            let service = Arc::clone(&service);
            let id = booking.id.clone();
            scope.spawn(move || {
                let cancelled = service.cancel_booking(&id).unwrap();
                assert_eq!(cancelled.status, BookingStatus::Cancelled);
            });
        }
    });

    assert_eq!(service.get_flight("LO100").unwrap().available_capacity, 4);
    let found = service.find_booking(&booking.id).unwrap();
    assert_eq!(found.status, BookingStatus::Cancelled);
    assert_eq!(found.passengers.len(), 3);
}

#[test]
fn test_demo_scenario() {
    let service = FlightBookingService::new(seed_flights());

    let flights = service.list_flights("Warsaw", "Krakow");
    assert_eq!(flights.len(), 1);

    let booking = service
        .book_tickets("LO123", vec![passenger(1), passenger(2)])
        .unwrap();
    assert_eq!(booking.total_price.to_string(), "399.98");
    assert_eq!(service.get_flight("LO123").unwrap().available_capacity, 3);

    service.cancel_booking(&booking.id).unwrap();
    assert_eq!(service.get_flight("LO123").unwrap().available_capacity, 5);

    let everything = service.flights();
    let codes = everything
        .iter()
        .map(|info| info.flight.code.as_str())
        .collect::<Vec<_>>();
    assert_eq!(codes, ["LO123", "LO456", "LO789"]);
}
