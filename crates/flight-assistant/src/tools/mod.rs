//! Tools exposing the booking service to a model.

mod bookings;
mod flights;

use flight_assistant_core::tool::{Error as ToolError, ToolResult};
use flight_booking_service::Error as ServiceError;
use serde::Serialize;

pub use bookings::{BookTicketsTool, CancelBookingTool, FindBookingTool};
pub use flights::{GetFlightTool, ListFlightsTool};

/// Domain failures are execution errors carrying the service message.
#[inline]
fn service_error(err: ServiceError) -> ToolError {
    ToolError::execution_error().with_reason(err.to_string())
}

fn to_output<T: Serialize>(value: &T) -> ToolResult {
    serde_json::to_string(value).map_err(|err| {
        ToolError::execution_error().with_reason(err.to_string())
    })
}
