//! User-facing strings of the resident form

use crate::selector::ApartmentInfo;
use crate::submission::SubmissionError;
use palme_conf::FormSettings;

/// Every string the selector and the validator show to the user
///
/// The defaults match [`FormSettings::default`]; deployments override them
/// through the `[form]` settings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessages {
	pub apartment_placeholder: String,
	pub info_placeholder: String,
	pub no_apartments: String,
	pub option_label_prefix: String,
	pub info_building_label: String,
	pub info_floor_label: String,
	pub info_apartment_label: String,
	pub missing_name: String,
	pub missing_type: String,
	pub missing_apartment: String,
	pub missing_building_or_floor: String,
}

impl FormMessages {
	/// Label of the option for an apartment
	///
	/// # Examples
	///
	/// ```
	/// use palme_forms::FormMessages;
	///
	/// let messages = FormMessages::default();
	/// assert_eq!(messages.option_label("3A"), "Apartamento 3A");
	/// ```
	pub fn option_label(&self, number: &str) -> String {
		format!("{} {}", self.option_label_prefix, number)
	}

	/// Three-line description shown in the info panel
	///
	/// # Examples
	///
	/// ```
	/// use palme_forms::{ApartmentInfo, FormMessages};
	///
	/// let info = ApartmentInfo {
	///     building_number: "1".to_string(),
	///     floor: "3".to_string(),
	///     number: "A".to_string(),
	/// };
	///
	/// assert_eq!(
	///     FormMessages::default().info_text(&info),
	///     "Building: 1\nFloor: 3\nApartment: A"
	/// );
	/// ```
	pub fn info_text(&self, info: &ApartmentInfo) -> String {
		format!(
			"{}: {}\n{}: {}\n{}: {}",
			self.info_building_label,
			info.building_number,
			self.info_floor_label,
			info.floor,
			self.info_apartment_label,
			info.number
		)
	}

	/// Message shown when a submission is blocked
	pub fn submission_message(&self, error: &SubmissionError) -> &str {
		match error {
			SubmissionError::MissingName => &self.missing_name,
			SubmissionError::MissingType => &self.missing_type,
			SubmissionError::MissingApartment => &self.missing_apartment,
			SubmissionError::MissingBuildingOrFloor => &self.missing_building_or_floor,
		}
	}
}

impl From<&FormSettings> for FormMessages {
	fn from(settings: &FormSettings) -> Self {
		Self {
			apartment_placeholder: settings.apartment_placeholder.clone(),
			info_placeholder: settings.info_placeholder.clone(),
			no_apartments: settings.no_apartments.clone(),
			option_label_prefix: settings.option_label_prefix.clone(),
			info_building_label: settings.info_building_label.clone(),
			info_floor_label: settings.info_floor_label.clone(),
			info_apartment_label: settings.info_apartment_label.clone(),
			missing_name: settings.missing_name.clone(),
			missing_type: settings.missing_type.clone(),
			missing_apartment: settings.missing_apartment.clone(),
			missing_building_or_floor: settings.missing_building_or_floor.clone(),
		}
	}
}

impl Default for FormMessages {
	fn default() -> Self {
		Self::from(&FormSettings::default())
	}
}
