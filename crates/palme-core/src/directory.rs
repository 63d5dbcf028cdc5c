//! In-memory directory of buildings, apartments and residents
//!
//! Every mutation checks the [`ComplexRules`] and the occupancy limits under a
//! single write lock, so concurrent writers cannot both squeeze into the last
//! free place of an apartment.

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{Apartment, Building, NewResident, Resident, ResidentKind};
use crate::rules::ComplexRules;
use chrono::Utc;
use palme_conf::ComplexSettings;
use palme_forms::{ApartmentRecord, ApartmentRecords, FloorValue, ValidatedSubmission};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Optional criteria for [`Directory::search_apartments`]
///
/// Unset criteria match everything. `number` is a case-insensitive substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApartmentFilter {
	pub building_id: Option<Uuid>,
	pub floor: Option<i32>,
	pub number: Option<String>,
}

impl ApartmentFilter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn building(mut self, building_id: Uuid) -> Self {
		self.building_id = Some(building_id);
		self
	}

	pub fn floor(mut self, floor: i32) -> Self {
		self.floor = Some(floor);
		self
	}

	pub fn number(mut self, number: impl Into<String>) -> Self {
		self.number = Some(number.into());
		self
	}

	fn matches(&self, apartment: &Apartment) -> bool {
		self.building_id.is_none_or(|id| apartment.building_id == id)
			&& self.floor.is_none_or(|floor| apartment.floor == floor)
			&& self
				.number
				.as_deref()
				.is_none_or(|number| contains_ignore_case(&apartment.number, number))
	}
}

/// Optional criteria for [`Directory::search_residents`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentFilter {
	pub name: Option<String>,
	pub kind: Option<ResidentKind>,
	pub building_id: Option<Uuid>,
	pub floor: Option<i32>,
	pub apartment_number: Option<String>,
}

impl ResidentFilter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn kind(mut self, kind: ResidentKind) -> Self {
		self.kind = Some(kind);
		self
	}

	pub fn building(mut self, building_id: Uuid) -> Self {
		self.building_id = Some(building_id);
		self
	}

	pub fn floor(mut self, floor: i32) -> Self {
		self.floor = Some(floor);
		self
	}

	pub fn apartment_number(mut self, number: impl Into<String>) -> Self {
		self.apartment_number = Some(number.into());
		self
	}

	fn matches(&self, resident: &Resident, apartment: &Apartment) -> bool {
		self.name
			.as_deref()
			.is_none_or(|name| contains_ignore_case(&resident.full_name, name))
			&& self.kind.is_none_or(|kind| resident.kind == kind)
			&& self.building_id.is_none_or(|id| apartment.building_id == id)
			&& self.floor.is_none_or(|floor| apartment.floor == floor)
			&& self
				.apartment_number
				.as_deref()
				.is_none_or(|number| contains_ignore_case(&apartment.number, number))
	}
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Default)]
struct DirectoryState {
	buildings: HashMap<Uuid, Building>,
	apartments: HashMap<Uuid, Apartment>,
	residents: HashMap<Uuid, Resident>,
}

impl DirectoryState {
	fn apartment(&self, id: Uuid) -> DirectoryResult<&Apartment> {
		self.apartments
			.get(&id)
			.ok_or(DirectoryError::ApartmentNotFound(id))
	}

	fn residents_in(&self, apartment_id: Uuid) -> impl Iterator<Item = &Resident> {
		self.residents
			.values()
			.filter(move |resident| resident.apartment_id == apartment_id)
	}

	/// Whether one more resident of `kind` fits in the apartment
	fn check_admission(
		&self,
		rules: &ComplexRules,
		apartment_id: Uuid,
		kind: ResidentKind,
	) -> DirectoryResult<()> {
		if kind == ResidentKind::Owner && self.residents_in(apartment_id).any(Resident::is_owner) {
			return Err(DirectoryError::OwnerExists(apartment_id));
		}
		if self.residents_in(apartment_id).count() >= rules.max_residents_per_apartment {
			return Err(DirectoryError::ApartmentFull {
				apartment: apartment_id,
				max: rules.max_residents_per_apartment,
			});
		}
		Ok(())
	}

	fn sorted_apartments(&self) -> Vec<Apartment> {
		let mut apartments: Vec<Apartment> = self.apartments.values().cloned().collect();
		apartments.sort_by(|a, b| {
			(a.building_number, a.floor, &a.number).cmp(&(b.building_number, b.floor, &b.number))
		});
		apartments
	}
}

fn sort_residents(residents: &mut [Resident]) {
	residents.sort_by(|a, b| (a.kind, &a.full_name).cmp(&(b.kind, &b.full_name)));
}

/// Shared registry of the complex
///
/// # Examples
///
/// ```
/// use palme_core::{Directory, NewResident, ResidentKind};
///
/// let directory = Directory::default();
/// let building = directory.create_building(3).unwrap();
/// let apartment = directory.create_apartment(building.id, 2, "2A").unwrap();
///
/// directory
///     .create_resident(NewResident::new(apartment.id, "Ana Torres", ResidentKind::Owner))
///     .unwrap();
///
/// let owner = directory.owner_of(apartment.id).unwrap().unwrap();
/// assert_eq!(owner.full_name, "Ana Torres");
/// ```
#[derive(Debug, Default)]
pub struct Directory {
	rules: ComplexRules,
	state: RwLock<DirectoryState>,
}

impl Directory {
	pub fn new(rules: ComplexRules) -> Self {
		Self {
			rules,
			state: RwLock::new(DirectoryState::default()),
		}
	}

	pub fn from_settings(settings: &ComplexSettings) -> Self {
		Self::new(ComplexRules::from(settings))
	}

	pub fn rules(&self) -> &ComplexRules {
		&self.rules
	}

	/// Remove every resident, apartment and building
	pub fn clear(&self) {
		let removed = std::mem::take(&mut *self.state.write());
		tracing::info!(
			buildings = removed.buildings.len(),
			apartments = removed.apartments.len(),
			residents = removed.residents.len(),
			"directory cleared"
		);
	}

	// Buildings

	pub fn create_building(&self, number: u32) -> DirectoryResult<Building> {
		self.rules.check_building_number(number)?;

		let mut state = self.state.write();
		if state.buildings.values().any(|b| b.number == number) {
			return Err(DirectoryError::DuplicateBuilding(number));
		}

		let now = Utc::now();
		let building = Building {
			id: Uuid::new_v4(),
			number,
			created_at: now,
			updated_at: now,
		};
		state.buildings.insert(building.id, building.clone());

		tracing::info!(building_id = %building.id, number, "building created");
		Ok(building)
	}

	pub fn building(&self, id: Uuid) -> DirectoryResult<Building> {
		self.state
			.read()
			.buildings
			.get(&id)
			.cloned()
			.ok_or(DirectoryError::BuildingNotFound(id))
	}

	pub fn building_by_number(&self, number: u32) -> Option<Building> {
		self.state
			.read()
			.buildings
			.values()
			.find(|b| b.number == number)
			.cloned()
	}

	/// All buildings, ordered by number
	pub fn buildings(&self) -> Vec<Building> {
		let mut buildings: Vec<Building> = self.state.read().buildings.values().cloned().collect();
		buildings.sort_by_key(|b| b.number);
		buildings
	}

	// Apartments

	pub fn create_apartment(
		&self,
		building_id: Uuid,
		floor: i32,
		number: impl Into<String>,
	) -> DirectoryResult<Apartment> {
		let number = number.into();

		let mut state = self.state.write();
		let building_number = state
			.buildings
			.get(&building_id)
			.map(|b| b.number)
			.ok_or(DirectoryError::BuildingNotFound(building_id))?;

		self.rules.check_floor(floor)?;
		self.rules.check_apartment_number(building_number, &number)?;

		if state
			.apartments
			.values()
			.any(|a| a.building_id == building_id && a.floor == floor && a.number == number)
		{
			return Err(DirectoryError::DuplicateApartment {
				building: building_number,
				floor,
				number,
			});
		}

		let now = Utc::now();
		let apartment = Apartment {
			id: Uuid::new_v4(),
			building_id,
			building_number,
			floor,
			number,
			created_at: now,
			updated_at: now,
		};
		state.apartments.insert(apartment.id, apartment.clone());

		tracing::info!(
			apartment_id = %apartment.id,
			building = building_number,
			floor,
			number = %apartment.number,
			"apartment created"
		);
		Ok(apartment)
	}

	pub fn apartment(&self, id: Uuid) -> DirectoryResult<Apartment> {
		self.state.read().apartment(id).cloned()
	}

	/// All apartments, ordered by building number, floor and number
	pub fn apartments(&self) -> Vec<Apartment> {
		self.state.read().sorted_apartments()
	}

	pub fn search_apartments(&self, filter: &ApartmentFilter) -> Vec<Apartment> {
		let mut apartments = self.apartments();
		apartments.retain(|apartment| filter.matches(apartment));
		apartments
	}

	/// Snapshot of every apartment in the shape the resident form consumes
	pub fn apartment_records(&self) -> ApartmentRecords {
		self.apartments()
			.into_iter()
			.map(|apartment| {
				ApartmentRecord::new(
					apartment.id.to_string(),
					apartment.building_id.to_string(),
					i64::from(apartment.floor),
					apartment.number,
					apartment.building_number.to_string(),
				)
			})
			.collect::<Vec<_>>()
			.into()
	}

	// Residents

	pub fn create_resident(&self, new: NewResident) -> DirectoryResult<Resident> {
		let full_name = new.full_name.trim();
		if full_name.is_empty() {
			return Err(DirectoryError::EmptyName);
		}

		let mut state = self.state.write();
		state.apartment(new.apartment_id)?;
		state.check_admission(&self.rules, new.apartment_id, new.kind)?;

		let now = Utc::now();
		let resident = Resident {
			id: Uuid::new_v4(),
			apartment_id: new.apartment_id,
			full_name: full_name.to_string(),
			kind: new.kind,
			photo: new.photo,
			created_at: now,
			updated_at: now,
		};
		state.residents.insert(resident.id, resident.clone());

		tracing::info!(
			resident_id = %resident.id,
			apartment_id = %resident.apartment_id,
			kind = %resident.kind,
			"resident created"
		);
		Ok(resident)
	}

	pub fn resident(&self, id: Uuid) -> DirectoryResult<Resident> {
		self.state
			.read()
			.residents
			.get(&id)
			.cloned()
			.ok_or(DirectoryError::ResidentNotFound(id))
	}

	/// Residents of an apartment, owner first, then by name
	pub fn residents_of(&self, apartment_id: Uuid) -> DirectoryResult<Vec<Resident>> {
		let state = self.state.read();
		state.apartment(apartment_id)?;

		let mut residents: Vec<Resident> = state.residents_in(apartment_id).cloned().collect();
		sort_residents(&mut residents);
		Ok(residents)
	}

	pub fn owner_of(&self, apartment_id: Uuid) -> DirectoryResult<Option<Resident>> {
		let state = self.state.read();
		state.apartment(apartment_id)?;

		Ok(state
			.residents_in(apartment_id)
			.find(|resident| resident.is_owner())
			.cloned())
	}

	/// Residents matching every set criterion, owners first, then by name
	pub fn search_residents(&self, filter: &ResidentFilter) -> Vec<Resident> {
		let state = self.state.read();
		let mut residents: Vec<Resident> = state
			.residents
			.values()
			.filter(|resident| {
				state
					.apartments
					.get(&resident.apartment_id)
					.is_some_and(|apartment| filter.matches(resident, apartment))
			})
			.cloned()
			.collect();
		sort_residents(&mut residents);
		residents
	}

	/// Turn an owner into a tenant or the other way round
	///
	/// Promoting to owner fails when the apartment already has one. The
	/// resident count does not change, so the capacity limit is not checked.
	pub fn change_resident_kind(
		&self,
		resident_id: Uuid,
		kind: ResidentKind,
	) -> DirectoryResult<Resident> {
		let mut state = self.state.write();
		let (apartment_id, current) = state
			.residents
			.get(&resident_id)
			.map(|r| (r.apartment_id, r.kind))
			.ok_or(DirectoryError::ResidentNotFound(resident_id))?;

		if kind == ResidentKind::Owner
			&& current != ResidentKind::Owner
			&& state.residents_in(apartment_id).any(Resident::is_owner)
		{
			return Err(DirectoryError::OwnerExists(apartment_id));
		}

		let resident = state
			.residents
			.get_mut(&resident_id)
			.ok_or(DirectoryError::ResidentNotFound(resident_id))?;
		if resident.kind != kind {
			resident.kind = kind;
			resident.updated_at = Utc::now();
			tracing::info!(resident_id = %resident_id, kind = %kind, "resident kind changed");
		}
		Ok(resident.clone())
	}

	pub fn delete_resident(&self, resident_id: Uuid) -> DirectoryResult<Resident> {
		let removed = self
			.state
			.write()
			.residents
			.remove(&resident_id)
			.ok_or(DirectoryError::ResidentNotFound(resident_id))?;

		tracing::info!(resident_id = %resident_id, "resident deleted");
		Ok(removed)
	}

	/// Register the resident described by a validated form submission
	///
	/// The submitted building and floor must be where the apartment actually
	/// is. Floors compare the way the selector filters them, so `"2.0"` names
	/// floor 2.
	pub fn submit(&self, submission: &ValidatedSubmission) -> DirectoryResult<Resident> {
		let apartment_id = parse_uuid("apartment_id", submission.apartment_id())?;
		let building_id = parse_uuid("building_id", submission.building_id())?;
		let floor = submission.floor();
		if FloorValue::from(floor).as_number().is_none() {
			return Err(DirectoryError::InvalidField {
				field: "floor",
				value: floor.to_string(),
			});
		}
		let kind: ResidentKind = submission.resident_type().parse()?;

		let apartment = self.apartment(apartment_id)?;
		if apartment.building_id != building_id
			|| !FloorValue::from(apartment.floor).loosely_equals(floor)
		{
			tracing::warn!(
				apartment_id = %apartment_id,
				submitted_building = %building_id,
				submitted_floor = floor,
				"submission places apartment elsewhere"
			);
			return Err(DirectoryError::LocationMismatch {
				apartment: apartment_id,
				building_id: apartment.building_id,
				floor: apartment.floor,
			});
		}

		self.create_resident(NewResident::new(
			apartment_id,
			submission.full_name(),
			kind,
		))
	}
}

fn parse_uuid(field: &'static str, value: &str) -> DirectoryResult<Uuid> {
	Uuid::parse_str(value.trim()).map_err(|_| DirectoryError::InvalidField {
		field,
		value: value.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn directory() -> Directory {
		Directory::default()
	}

	#[rstest]
	fn test_duplicate_building_rejected(directory: Directory) {
		directory.create_building(4).unwrap();

		assert_eq!(
			directory.create_building(4),
			Err(DirectoryError::DuplicateBuilding(4))
		);
	}

	#[rstest]
	fn test_buildings_ordered_by_number(directory: Directory) {
		for number in [12, 3, 25] {
			directory.create_building(number).unwrap();
		}

		let numbers: Vec<u32> = directory.buildings().iter().map(|b| b.number).collect();

		assert_eq!(numbers, vec![3, 12, 25]);
	}

	#[rstest]
	fn test_apartment_in_unknown_building(directory: Directory) {
		let id = Uuid::new_v4();

		assert_eq!(
			directory.create_apartment(id, 1, "1A"),
			Err(DirectoryError::BuildingNotFound(id))
		);
	}

	#[rstest]
	fn test_duplicate_apartment_rejected(directory: Directory) {
		let building = directory.create_building(1).unwrap();
		directory.create_apartment(building.id, 2, "2A").unwrap();

		let result = directory.create_apartment(building.id, 2, "2A");

		assert!(matches!(
			result,
			Err(DirectoryError::DuplicateApartment { building: 1, floor: 2, .. })
		));
	}

	#[rstest]
	fn test_same_number_on_other_floor_allowed(directory: Directory) {
		let building = directory.create_building(1).unwrap();
		directory.create_apartment(building.id, 2, "A").unwrap();

		assert!(directory.create_apartment(building.id, 3, "A").is_ok());
	}

	#[rstest]
	fn test_blank_resident_name_rejected(directory: Directory) {
		let building = directory.create_building(1).unwrap();
		let apartment = directory.create_apartment(building.id, 1, "1A").unwrap();

		let result =
			directory.create_resident(NewResident::new(apartment.id, "   ", ResidentKind::Tenant));

		assert_eq!(result, Err(DirectoryError::EmptyName));
	}

	#[rstest]
	fn test_resident_name_is_trimmed(directory: Directory) {
		let building = directory.create_building(1).unwrap();
		let apartment = directory.create_apartment(building.id, 1, "1A").unwrap();

		let resident = directory
			.create_resident(
				NewResident::new(apartment.id, " Rosa Vega ", ResidentKind::Tenant)
					.with_photo("residents/photos/rosa.jpg"),
			)
			.unwrap();

		assert_eq!(resident.full_name, "Rosa Vega");
		assert_eq!(resident.photo.as_deref(), Some("residents/photos/rosa.jpg"));
	}

	#[rstest]
	fn test_apartment_filter_number_is_case_insensitive() {
		let filter = ApartmentFilter::new().number("a");
		let now = Utc::now();
		let apartment = Apartment {
			id: Uuid::new_v4(),
			building_id: Uuid::new_v4(),
			building_number: 1,
			floor: 3,
			number: "3A".to_string(),
			created_at: now,
			updated_at: now,
		};

		assert!(filter.matches(&apartment));
		assert!(!ApartmentFilter::new().floor(4).matches(&apartment));
	}
}
