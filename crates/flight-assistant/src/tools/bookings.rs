use std::sync::Arc;

use chrono::NaiveDate;
use flight_assistant_core::tool::{Error as ToolError, Tool, ToolResult};
use flight_booking_service::{FlightBookingService, Passenger};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

use super::{service_error, to_output};
use crate::data::BookingData;

#[derive(Deserialize, JsonSchema)]
pub struct PassengerInfo {
    #[schemars(description = "Passenger first name")]
    first_name: String,
    #[schemars(description = "Passenger last name")]
    last_name: String,
    #[schemars(description = "Date of birth in ISO format YYYY-MM-DD")]
    date_of_birth: String,
}

impl PassengerInfo {
    fn into_passenger(self, no: usize) -> Result<Passenger, ToolError> {
        let date_of_birth =
            NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
                .map_err(|_| {
                    ToolError::invalid_input().with_reason(format!(
                        "Passenger #{no}: date_of_birth must be in YYYY-MM-DD format, got `{}`",
                        self.date_of_birth
                    ))
                })?;
        Ok(Passenger::new(self.first_name, self.last_name, date_of_birth))
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct BookTicketsParameters {
    #[schemars(description = "Flight unique code to book")]
    flight_code: String,
    #[schemars(description = "List of passengers")]
    passengers: Vec<PassengerInfo>,
}

/// Books seats on a flight.
pub struct BookTicketsTool {
    service: Arc<FlightBookingService>,
    parameter_schema: Value,
}

impl BookTicketsTool {
    /// Creates the tool on top of `service`.
    #[inline]
    pub fn new(service: Arc<FlightBookingService>) -> Self {
        Self {
            service,
            parameter_schema: schema_for!(BookTicketsParameters).to_value(),
        }
    }
}

impl Tool for BookTicketsTool {
    type Input = BookTicketsParameters;

    fn name(&self) -> &str {
        "book_tickets"
    }

    fn description(&self) -> &str {
        r#"
Book tickets for a flight for list of passengers (name, surname, date of birth).
Validates passengers and capacity. On success returns full information about the booking."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: BookTicketsParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let service = Arc::clone(&self.service);
        async move {
            let passengers = input
                .passengers
                .into_iter()
                .enumerate()
                .map(|(index, info)| info.into_passenger(index + 1))
                .collect::<Result<Vec<_>, _>>()?;
            let booking = service
                .book_tickets(&input.flight_code, passengers)
                .map_err(service_error)?;
            to_output(&BookingData::from(booking))
        }
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct BookingIdParameters {
    #[schemars(description = "Booking identifier (UUID)")]
    booking_id: String,
}

/// Looks up a booking.
pub struct FindBookingTool {
    service: Arc<FlightBookingService>,
    parameter_schema: Value,
}

impl FindBookingTool {
    /// Creates the tool on top of `service`.
    #[inline]
    pub fn new(service: Arc<FlightBookingService>) -> Self {
        Self {
            service,
            parameter_schema: schema_for!(BookingIdParameters).to_value(),
        }
    }
}

impl Tool for FindBookingTool {
    type Input = BookingIdParameters;

    fn name(&self) -> &str {
        "find_booking"
    }

    fn description(&self) -> &str {
        "Find tickets booking by id and return full booking info including status."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: BookingIdParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let service = Arc::clone(&self.service);
        async move {
            let booking =
                service.find_booking(&input.booking_id).map_err(service_error)?;
            to_output(&BookingData::from(booking))
        }
    }
}

/// Cancels a booking.
pub struct CancelBookingTool {
    service: Arc<FlightBookingService>,
    parameter_schema: Value,
}

impl CancelBookingTool {
    /// Creates the tool on top of `service`.
    #[inline]
    pub fn new(service: Arc<FlightBookingService>) -> Self {
        Self {
            service,
            parameter_schema: schema_for!(BookingIdParameters).to_value(),
        }
    }
}

impl Tool for CancelBookingTool {
    type Input = BookingIdParameters;

    fn name(&self) -> &str {
        "cancel_booking"
    }

    fn description(&self) -> &str {
        "Cancel booking by id. Returns the updated booking with status CANCELLED."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: BookingIdParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let service = Arc::clone(&self.service);
        async move {
            let booking = service
                .cancel_booking(&input.booking_id)
                .map_err(service_error)?;
            to_output(&BookingData::from(booking))
        }
    }
}
