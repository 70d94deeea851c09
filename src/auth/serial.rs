//! Strongly typed device serial numbers and population generation.

// std
use std::{ops::Deref, str::FromStr};
// self
use crate::_prelude::*;

/// Opaque serial number identifying one device within the harvested population.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialNumber(String);
impl SerialNumber {
	/// Creates a new serial number after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, SerialNumberError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Generates the ordered population `SN-000`, `SN-001`, .. of the given size.
	///
	/// Indexes are zero padded to three digits and keep growing naturally past `SN-999`,
	/// so the sequence stays unique for any population size.
	pub fn sequence(count: usize) -> Vec<Self> {
		(0..count).map(|index| Self(format!("SN-{index:03}"))).collect()
	}

	/// Returns the serial number as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for SerialNumber {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for SerialNumber {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<SerialNumber> for String {
	fn from(value: SerialNumber) -> Self {
		value.0
	}
}
impl TryFrom<String> for SerialNumber {
	type Error = SerialNumberError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for SerialNumber {
	type Err = SerialNumberError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for SerialNumber {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "SerialNumber({})", self.0)
	}
}
impl Display for SerialNumber {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Error returned when serial number validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum SerialNumberError {
	/// The serial number was empty.
	#[error("Serial number cannot be empty.")]
	Empty,
	/// The serial number contains whitespace characters.
	#[error("Serial number contains whitespace.")]
	ContainsWhitespace,
}

fn validate_view(view: &str) -> Result<(), SerialNumberError> {
	if view.is_empty() {
		return Err(SerialNumberError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(SerialNumberError::ContainsWhitespace);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn sequence_generates_zero_padded_serials_in_order() {
		let serials = SerialNumber::sequence(12);

		assert_eq!(serials.len(), 12);
		assert_eq!(serials[0].as_str(), "SN-000");
		assert_eq!(serials[9].as_str(), "SN-009");
		assert_eq!(serials[11].as_str(), "SN-011");
	}

	#[test]
	fn sequence_grows_past_three_digits_without_collisions() {
		let serials = SerialNumber::sequence(1_001);

		assert_eq!(serials[999].as_str(), "SN-999");
		assert_eq!(serials[1_000].as_str(), "SN-1000");
	}

	#[test]
	fn sequence_of_zero_is_empty() {
		assert!(SerialNumber::sequence(0).is_empty());
	}

	#[test]
	fn serials_validate_on_construction() {
		assert_eq!(SerialNumber::new(""), Err(SerialNumberError::Empty));
		assert_eq!(SerialNumber::new("SN 001"), Err(SerialNumberError::ContainsWhitespace));

		let serial =
			SerialNumber::new("SN-042").expect("Serial fixture should be considered valid.");

		assert_eq!(serial.as_ref(), "SN-042");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let serial: SerialNumber =
			serde_json::from_str("\"SN-007\"").expect("Serial should deserialize successfully.");

		assert_eq!(serial.as_str(), "SN-007");
		assert!(serde_json::from_str::<SerialNumber>("\"SN 007\"").is_err());
	}
}
