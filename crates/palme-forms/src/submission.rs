//! Resident form submission and its validation

use crate::messages::FormMessages;
use serde::{Deserialize, Serialize};

/// Reason a resident form submission was blocked
///
/// Only the first failing check is reported. The `Display` text is the
/// default English message; deployments use
/// [`FormMessages::submission_message`](crate::FormMessages::submission_message)
/// for the configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
	#[error("please enter the resident's full name.")]
	MissingName,
	#[error("please select the resident type.")]
	MissingType,
	#[error("please select an apartment.")]
	MissingApartment,
	#[error("please select both the building and the floor.")]
	MissingBuildingOrFloor,
}

impl SubmissionError {
	/// Configured text for this failure
	pub fn message<'a>(&self, messages: &'a FormMessages) -> &'a str {
		messages.submission_message(self)
	}
}

/// Raw values of the resident form at submission time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidentFormInput {
	pub full_name: String,
	pub resident_type: String,
	#[serde(rename = "apartment_id")]
	pub apartment: String,
	#[serde(rename = "building_id")]
	pub building: String,
	pub floor: String,
}

impl ResidentFormInput {
	/// Decode an `application/x-www-form-urlencoded` body
	///
	/// Missing keys are read as empty values.
	///
	/// # Examples
	///
	/// ```
	/// use palme_forms::ResidentFormInput;
	///
	/// let input = ResidentFormInput::from_form_body(
	///     "full_name=Ana+Torres&resident_type=owner&apartment_id=a1&building_id=b1",
	/// ).unwrap();
	///
	/// assert_eq!(input.full_name, "Ana Torres");
	/// assert_eq!(input.apartment, "a1");
	/// assert_eq!(input.floor, "");
	/// ```
	pub fn from_form_body(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
		serde_urlencoded::from_str(body)
	}
}

/// A submission that passed every check
///
/// Values are carried exactly as entered. The only constructor is
/// [`validate_resident_form`], so holding one proves the checks ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedSubmission {
	full_name: String,
	resident_type: String,
	#[serde(rename = "apartment_id")]
	apartment: String,
	#[serde(rename = "building_id")]
	building: String,
	floor: String,
}

impl ValidatedSubmission {
	pub fn full_name(&self) -> &str {
		&self.full_name
	}

	pub fn resident_type(&self) -> &str {
		&self.resident_type
	}

	pub fn apartment_id(&self) -> &str {
		&self.apartment
	}

	pub fn building_id(&self) -> &str {
		&self.building
	}

	pub fn floor(&self) -> &str {
		&self.floor
	}

	/// Encode as the body of the form's normal POST
	///
	/// # Examples
	///
	/// ```
	/// use palme_forms::{ResidentFormInput, validate_resident_form};
	///
	/// let input = ResidentFormInput {
	///     full_name: "Ana Torres".to_string(),
	///     resident_type: "owner".to_string(),
	///     apartment: "a1".to_string(),
	///     building: "b1".to_string(),
	///     floor: "3".to_string(),
	/// };
	/// let submission = validate_resident_form(&input).unwrap();
	///
	/// assert_eq!(
	///     submission.to_form_body().unwrap(),
	///     "full_name=Ana+Torres&resident_type=owner&apartment_id=a1&building_id=b1&floor=3"
	/// );
	/// ```
	pub fn to_form_body(&self) -> Result<String, serde_urlencoded::ser::Error> {
		serde_urlencoded::to_string(self)
	}
}

/// Run the resident form checks in order; the first failure wins
///
/// 1. full name, after trimming, is not empty
/// 2. a resident type is selected
/// 3. an apartment is selected
/// 4. both building and floor are selected
pub fn validate_resident_form(
	input: &ResidentFormInput,
) -> Result<ValidatedSubmission, SubmissionError> {
	if input.full_name.trim().is_empty() {
		return Err(SubmissionError::MissingName);
	}
	if input.resident_type.is_empty() {
		return Err(SubmissionError::MissingType);
	}
	if input.apartment.is_empty() {
		return Err(SubmissionError::MissingApartment);
	}
	if input.building.is_empty() || input.floor.is_empty() {
		return Err(SubmissionError::MissingBuildingOrFloor);
	}

	Ok(ValidatedSubmission {
		full_name: input.full_name.clone(),
		resident_type: input.resident_type.clone(),
		apartment: input.apartment.clone(),
		building: input.building.clone(),
		floor: input.floor.clone(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn valid_input() -> ResidentFormInput {
		ResidentFormInput {
			full_name: "María González López".to_string(),
			resident_type: "tenant".to_string(),
			apartment: "a1".to_string(),
			building: "b1".to_string(),
			floor: "3".to_string(),
		}
	}

	#[rstest]
	fn test_valid_input_passes_unmodified(valid_input: ResidentFormInput) {
		let mut input = valid_input;
		input.full_name = "  María González López ".to_string();

		let submission = validate_resident_form(&input).unwrap();

		assert_eq!(submission.full_name(), "  María González López ");
		assert_eq!(submission.resident_type(), "tenant");
		assert_eq!(submission.apartment_id(), "a1");
		assert_eq!(submission.building_id(), "b1");
		assert_eq!(submission.floor(), "3");
	}

	#[rstest]
	#[case::blank_name(|i: &mut ResidentFormInput| i.full_name = " \t ".to_string(), SubmissionError::MissingName)]
	#[case::no_type(|i: &mut ResidentFormInput| i.resident_type.clear(), SubmissionError::MissingType)]
	#[case::no_apartment(|i: &mut ResidentFormInput| i.apartment.clear(), SubmissionError::MissingApartment)]
	#[case::no_building(|i: &mut ResidentFormInput| i.building.clear(), SubmissionError::MissingBuildingOrFloor)]
	#[case::no_floor(|i: &mut ResidentFormInput| i.floor.clear(), SubmissionError::MissingBuildingOrFloor)]
	fn test_single_missing_field(
		valid_input: ResidentFormInput,
		#[case] break_input: fn(&mut ResidentFormInput),
		#[case] expected: SubmissionError,
	) {
		let mut input = valid_input;
		break_input(&mut input);

		assert_eq!(validate_resident_form(&input), Err(expected));
	}

	#[rstest]
	fn test_first_failure_wins() {
		let input = ResidentFormInput::default();

		assert_eq!(
			validate_resident_form(&input),
			Err(SubmissionError::MissingName)
		);
	}

	#[rstest]
	fn test_apartment_checked_before_building() {
		let input = ResidentFormInput {
			full_name: "Luis".to_string(),
			resident_type: "owner".to_string(),
			..Default::default()
		};

		assert_eq!(
			validate_resident_form(&input),
			Err(SubmissionError::MissingApartment)
		);
	}

	#[rstest]
	fn test_display_is_default_message() {
		assert_eq!(
			SubmissionError::MissingBuildingOrFloor.to_string(),
			"please select both the building and the floor."
		);
	}
}
