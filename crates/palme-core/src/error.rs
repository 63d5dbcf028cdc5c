//! Errors raised by the directory

use uuid::Uuid;

/// Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// A directory operation broke one of the complex rules
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
	#[error("building number {number} is outside {min}..={max}")]
	BuildingNumberOutOfRange { number: u32, min: u32, max: u32 },

	#[error("building {0} already exists")]
	DuplicateBuilding(u32),

	#[error("building {0} not found")]
	BuildingNotFound(Uuid),

	#[error("floor {floor} is outside {min}..={max}")]
	FloorOutOfRange { floor: i32, min: i32, max: i32 },

	#[error("apartment number {number:?} must end with one of {doors} in building {building}")]
	DoorMismatch {
		number: String,
		building: u32,
		doors: String,
	},

	#[error("apartment {number} already exists on floor {floor} of building {building}")]
	DuplicateApartment {
		building: u32,
		floor: i32,
		number: String,
	},

	#[error("apartment {0} not found")]
	ApartmentNotFound(Uuid),

	#[error("apartment {apartment} is on floor {floor} of building {building_id}, not where the form placed it")]
	LocationMismatch {
		apartment: Uuid,
		building_id: Uuid,
		floor: i32,
	},

	#[error("apartment {0} already has an owner")]
	OwnerExists(Uuid),

	#[error("apartment {apartment} already has the maximum of {max} residents")]
	ApartmentFull { apartment: Uuid, max: usize },

	#[error("resident {0} not found")]
	ResidentNotFound(Uuid),

	#[error("resident name is empty")]
	EmptyName,

	#[error("unknown resident kind {0:?}")]
	UnknownResidentKind(String),

	#[error("invalid {field}: {value:?}")]
	InvalidField { field: &'static str, value: String },
}

impl DirectoryError {
	/// Wording for the person filling in the form, without internal ids
	///
	/// # Examples
	///
	/// ```
	/// use palme_core::DirectoryError;
	/// use uuid::Uuid;
	///
	/// let error = DirectoryError::OwnerExists(Uuid::new_v4());
	/// assert_eq!(error.user_message(), "this apartment already has an owner.");
	/// ```
	pub fn user_message(&self) -> String {
		match self {
			Self::BuildingNotFound(_) => "the selected building no longer exists.".to_string(),
			Self::ApartmentNotFound(_) => "the selected apartment no longer exists.".to_string(),
			Self::ResidentNotFound(_) => "this resident no longer exists.".to_string(),
			Self::LocationMismatch { floor, .. } => format!(
				"the selected apartment is on floor {floor}; please check the building and floor."
			),
			Self::OwnerExists(_) => "this apartment already has an owner.".to_string(),
			Self::ApartmentFull { max, .. } => {
				format!("this apartment already has the maximum of {max} residents.")
			}
			Self::InvalidField { field, .. } => format!("the {field} value is not valid."),
			Self::BuildingNumberOutOfRange { .. }
			| Self::DuplicateBuilding(_)
			| Self::FloorOutOfRange { .. }
			| Self::DoorMismatch { .. }
			| Self::DuplicateApartment { .. }
			| Self::EmptyName
			| Self::UnknownResidentKind(_) => self.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case::owner(DirectoryError::OwnerExists(Uuid::new_v4()))]
	#[case::full(DirectoryError::ApartmentFull { apartment: Uuid::new_v4(), max: 6 })]
	#[case::location(DirectoryError::LocationMismatch {
		apartment: Uuid::new_v4(),
		building_id: Uuid::new_v4(),
		floor: 3,
	})]
	#[case::missing(DirectoryError::ApartmentNotFound(Uuid::new_v4()))]
	fn test_user_message_hides_ids(#[case] error: DirectoryError) {
		let message = error.user_message();

		assert!(!message.is_empty());
		assert!(
			!message.contains('-'),
			"message leaks an id: {message}"
		);
	}
}
