use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::types::Passenger;

/// Checks passenger fields, reporting the first offending passenger by its
/// 1-based position.
pub(crate) fn validate_passengers(
    passengers: &[Passenger],
    today: NaiveDate,
) -> Result<()> {
    if passengers.is_empty() {
        return Err(Error::validation("Passenger list must not be empty"));
    }
    for (index, passenger) in passengers.iter().enumerate() {
        let no = index + 1;
        if passenger.first_name.trim().is_empty() {
            return Err(Error::validation(format!(
                "Passenger #{no}: first_name is empty"
            )));
        }
        if passenger.last_name.trim().is_empty() {
            return Err(Error::validation(format!(
                "Passenger #{no}: last_name is empty"
            )));
        }
        if passenger.date_of_birth > today {
            return Err(Error::validation(format!(
                "Passenger #{no}: date_of_birth is in the future"
            )));
        }
    }
    Ok(())
}
