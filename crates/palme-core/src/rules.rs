//! Physical layout rules of the complex

use crate::error::{DirectoryError, DirectoryResult};
use palme_conf::ComplexSettings;
use std::ops::RangeInclusive;

const AB_DOORS: [&str; 2] = ["A", "B"];
const ID_DOORS: [&str; 2] = ["I", "D"];

/// Ranges and door conventions every record must respect
///
/// # Examples
///
/// ```
/// use palme_core::ComplexRules;
///
/// let rules = ComplexRules::default();
/// assert_eq!(rules.doors_for(22), ["A", "B"]);
/// assert_eq!(rules.doors_for(23), ["I", "D"]);
/// assert!(rules.check_apartment_number(23, "5D").is_ok());
/// assert!(rules.check_apartment_number(23, "5A").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexRules {
	pub min_building_number: u32,
	pub max_building_number: u32,
	pub min_floor: i32,
	pub max_floor: i32,
	pub ab_doors_up_to: u32,
	pub max_residents_per_apartment: usize,
}

impl ComplexRules {
	/// Doors of the apartments on each floor of a building
	pub fn doors_for(&self, building_number: u32) -> [&'static str; 2] {
		if building_number <= self.ab_doors_up_to {
			AB_DOORS
		} else {
			ID_DOORS
		}
	}

	pub fn check_building_number(&self, number: u32) -> DirectoryResult<()> {
		if (self.min_building_number..=self.max_building_number).contains(&number) {
			Ok(())
		} else {
			Err(DirectoryError::BuildingNumberOutOfRange {
				number,
				min: self.min_building_number,
				max: self.max_building_number,
			})
		}
	}

	pub fn check_floor(&self, floor: i32) -> DirectoryResult<()> {
		if (self.min_floor..=self.max_floor).contains(&floor) {
			Ok(())
		} else {
			Err(DirectoryError::FloorOutOfRange {
				floor,
				min: self.min_floor,
				max: self.max_floor,
			})
		}
	}

	/// The apartment number must end with one of the building's doors
	pub fn check_apartment_number(&self, building_number: u32, number: &str) -> DirectoryResult<()> {
		let doors = self.doors_for(building_number);
		if doors.iter().any(|door| number.ends_with(*door)) {
			Ok(())
		} else {
			Err(DirectoryError::DoorMismatch {
				number: number.to_string(),
				building: building_number,
				doors: doors.join(", "),
			})
		}
	}

	/// Floors of a building, lowest first
	pub fn floors(&self) -> RangeInclusive<i32> {
		self.min_floor..=self.max_floor
	}
}

impl From<&ComplexSettings> for ComplexRules {
	fn from(settings: &ComplexSettings) -> Self {
		Self {
			min_building_number: settings.min_building_number,
			max_building_number: settings.max_building_number,
			min_floor: settings.min_floor,
			max_floor: settings.max_floor,
			ab_doors_up_to: settings.ab_doors_up_to,
			max_residents_per_apartment: settings.max_residents_per_apartment,
		}
	}
}

impl Default for ComplexRules {
	fn default() -> Self {
		Self::from(&ComplexSettings::default())
	}
}
