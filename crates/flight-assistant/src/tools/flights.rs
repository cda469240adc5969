use std::sync::Arc;

use flight_assistant_core::tool::{Tool, ToolResult};
use flight_booking_service::FlightBookingService;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

use super::{service_error, to_output};
use crate::data::{FlightData, FlightsData};

#[derive(Deserialize, JsonSchema)]
pub struct ListFlightsParameters {
    #[schemars(description = "Departure city. Only full city name is allowed.")]
    departure: String,
    #[schemars(
        description = "Destination city. Only full city name is allowed. Must be different from departure."
    )]
    destination: String,
}

/// Lists flights between two cities.
pub struct ListFlightsTool {
    service: Arc<FlightBookingService>,
    parameter_schema: Value,
}

impl ListFlightsTool {
    /// Creates the tool on top of `service`.
    #[inline]
    pub fn new(service: Arc<FlightBookingService>) -> Self {
        Self {
            service,
            parameter_schema: schema_for!(ListFlightsParameters).to_value(),
        }
    }
}

impl Tool for ListFlightsTool {
    type Input = ListFlightsParameters;

    fn name(&self) -> &str {
        "list_flights"
    }

    fn description(&self) -> &str {
        "List flights between departure and destination cities."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: ListFlightsParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let service = Arc::clone(&self.service);
        async move {
            let flights = service
                .list_flights(&input.departure, &input.destination)
                .into_iter()
                .map(FlightData::from)
                .collect();
            to_output(&FlightsData { flights })
        }
    }
}

#[derive(Deserialize, JsonSchema)]
pub struct GetFlightParameters {
    #[schemars(description = "Flight unique code")]
    code: String,
}

/// Fetches a single flight with its free seats.
pub struct GetFlightTool {
    service: Arc<FlightBookingService>,
    parameter_schema: Value,
}

impl GetFlightTool {
    /// Creates the tool on top of `service`.
    #[inline]
    pub fn new(service: Arc<FlightBookingService>) -> Self {
        Self {
            service,
            parameter_schema: schema_for!(GetFlightParameters).to_value(),
        }
    }
}

impl Tool for GetFlightTool {
    type Input = GetFlightParameters;

    fn name(&self) -> &str {
        "get_flight"
    }

    fn description(&self) -> &str {
        r#"
Get a single flight details by flight code including current available capacity and ticket price."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: GetFlightParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let service = Arc::clone(&self.service);
        async move {
            let info = service.get_flight(&input.code).map_err(service_error)?;
            to_output(&FlightData::from(info))
        }
    }
}
