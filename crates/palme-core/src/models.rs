//! Records stored by the [`Directory`](crate::Directory)

use crate::error::DirectoryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A building of the complex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
	pub id: Uuid,
	pub number: u32,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Building {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Building {}", self.number)
	}
}

/// An apartment, identified inside its building by floor and number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apartment {
	pub id: Uuid,
	pub building_id: Uuid,
	/// Number of the owning building, kept for display and ordering
	pub building_number: u32,
	pub floor: i32,
	/// Label such as `3A` or `7D`; always ends with one of the building's doors
	pub number: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Apartment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Building {} - Floor {} - {}",
			self.building_number, self.floor, self.number
		)
	}
}

/// Whether a resident owns or rents the apartment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidentKind {
	Owner,
	Tenant,
}

impl ResidentKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Owner => "owner",
			Self::Tenant => "tenant",
		}
	}
}

impl fmt::Display for ResidentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ResidentKind {
	type Err = DirectoryError;

	/// Parse the value submitted by the resident type control
	///
	/// # Examples
	///
	/// ```
	/// use palme_core::ResidentKind;
	///
	/// assert_eq!("owner".parse::<ResidentKind>().unwrap(), ResidentKind::Owner);
	/// assert_eq!("Tenant".parse::<ResidentKind>().unwrap(), ResidentKind::Tenant);
	/// assert!("landlord".parse::<ResidentKind>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"owner" => Ok(Self::Owner),
			"tenant" => Ok(Self::Tenant),
			_ => Err(DirectoryError::UnknownResidentKind(s.to_string())),
		}
	}
}

/// A person living in an apartment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
	pub id: Uuid,
	pub apartment_id: Uuid,
	pub full_name: String,
	pub kind: ResidentKind,
	/// Stored path of the optional photo
	pub photo: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Resident {
	pub fn is_owner(&self) -> bool {
		self.kind == ResidentKind::Owner
	}

	pub fn is_tenant(&self) -> bool {
		self.kind == ResidentKind::Tenant
	}
}

/// Data for a resident that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResident {
	pub apartment_id: Uuid,
	pub full_name: String,
	pub kind: ResidentKind,
	pub photo: Option<String>,
}

impl NewResident {
	pub fn new(apartment_id: Uuid, full_name: impl Into<String>, kind: ResidentKind) -> Self {
		Self {
			apartment_id,
			full_name: full_name.into(),
			kind,
			photo: None,
		}
	}

	pub fn with_photo(mut self, path: impl Into<String>) -> Self {
		self.photo = Some(path.into());
		self
	}
}
