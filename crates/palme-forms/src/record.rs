//! Apartment records consumed by the cascading selector
//!
//! The hosting page supplies the records once, usually as a JSON array such as
//!
//! ```json
//! [{"id": "a1", "buildingId": "b1", "floor": 3, "number": "3A", "buildingNumber": 1}]
//! ```
//!
//! `floor`, `number` and `buildingNumber` may arrive either as integers or as
//! strings. The set is wrapped in [`ApartmentRecords`], an immutable snapshot
//! that is cheap to clone.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// Error raised when a dataset cannot be decoded
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
	#[error("malformed apartment dataset: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Floor of an apartment record, as supplied by the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FloorValue {
	Integer(i64),
	Text(String),
}

impl FloorValue {
	/// Numeric reading of the floor, if it has one
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Integer(n) => Some(*n as f64),
			Self::Text(s) => parse_number(s),
		}
	}

	/// Compare against a selected floor value with numeric coercion
	///
	/// When both sides read as numbers they are compared numerically,
	/// otherwise the text must match exactly.
	///
	/// # Examples
	///
	/// ```
	/// use palme_forms::FloorValue;
	///
	/// assert!(FloorValue::Integer(3).loosely_equals("3"));
	/// assert!(FloorValue::Text("3".to_string()).loosely_equals("3"));
	/// assert!(FloorValue::Integer(3).loosely_equals(" 3.0 "));
	/// assert!(!FloorValue::Integer(3).loosely_equals("5"));
	/// assert!(!FloorValue::Integer(3).loosely_equals(""));
	/// assert!(FloorValue::Text("PB".to_string()).loosely_equals("PB"));
	/// ```
	pub fn loosely_equals(&self, selected: &str) -> bool {
		match (self.as_number(), parse_number(selected)) {
			(Some(a), Some(b)) => a == b,
			_ => match self {
				Self::Integer(_) => false,
				Self::Text(s) => s == selected,
			},
		}
	}
}

fn parse_number(s: &str) -> Option<f64> {
	let trimmed = s.trim();
	if trimmed.is_empty() {
		return None;
	}
	trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for FloorValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Integer(n) => write!(f, "{}", n),
			Self::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for FloorValue {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}

impl From<i32> for FloorValue {
	fn from(value: i32) -> Self {
		Self::Integer(i64::from(value))
	}
}

impl From<&str> for FloorValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

/// One apartment as seen by the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentRecord {
	pub id: String,
	pub building_id: String,
	pub floor: FloorValue,
	#[serde(deserialize_with = "label_from_text_or_integer")]
	pub number: String,
	#[serde(deserialize_with = "label_from_text_or_integer")]
	pub building_number: String,
}

impl ApartmentRecord {
	/// Create a record
	///
	/// # Examples
	///
	/// ```
	/// use palme_forms::ApartmentRecord;
	///
	/// let record = ApartmentRecord::new("a1", "b1", 3, "A", "1");
	/// assert!(record.is_located_at("b1", "3"));
	/// assert!(!record.is_located_at("b2", "3"));
	/// ```
	pub fn new(
		id: impl Into<String>,
		building_id: impl Into<String>,
		floor: impl Into<FloorValue>,
		number: impl Into<String>,
		building_number: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			building_id: building_id.into(),
			floor: floor.into(),
			number: number.into(),
			building_number: building_number.into(),
		}
	}

	/// Whether the record belongs to the given building and floor
	pub fn is_located_at(&self, building_id: &str, floor: &str) -> bool {
		self.building_id == building_id && self.floor.loosely_equals(floor)
	}
}

fn label_from_text_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawLabel {
		Integer(i64),
		Text(String),
	}

	Ok(match RawLabel::deserialize(deserializer)? {
		RawLabel::Integer(n) => n.to_string(),
		RawLabel::Text(s) => s,
	})
}

/// Immutable snapshot of the apartment dataset for one form session
#[derive(Debug, Clone, Default)]
pub struct ApartmentRecords {
	records: Arc<[ApartmentRecord]>,
}

impl ApartmentRecords {
	pub fn new(records: Vec<ApartmentRecord>) -> Self {
		Self {
			records: records.into(),
		}
	}

	/// Decode a JSON array of records
	///
	/// # Examples
	///
	/// ```
	/// use palme_forms::ApartmentRecords;
	///
	/// let records = ApartmentRecords::from_json(
	///     r#"[{"id": "a1", "buildingId": "b1", "floor": "3", "number": 7, "buildingNumber": 1}]"#,
	/// ).unwrap();
	///
	/// let record = records.find("a1").unwrap();
	/// assert_eq!(record.number, "7");
	/// assert_eq!(record.building_number, "1");
	/// ```
	pub fn from_json(json: &str) -> Result<Self, RecordsError> {
		let records: Vec<ApartmentRecord> = serde_json::from_str(json)?;
		Ok(Self::new(records))
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &ApartmentRecord> {
		self.records.iter()
	}

	/// Look a record up by id in the whole snapshot
	pub fn find(&self, id: &str) -> Option<&ApartmentRecord> {
		self.records.iter().find(|record| record.id == id)
	}

	/// Records located at the given building and floor, in snapshot order
	pub fn located_at<'a>(
		&'a self,
		building_id: &'a str,
		floor: &'a str,
	) -> impl Iterator<Item = &'a ApartmentRecord> + 'a {
		self.records
			.iter()
			.filter(move |record| record.is_located_at(building_id, floor))
	}
}

impl From<Vec<ApartmentRecord>> for ApartmentRecords {
	fn from(records: Vec<ApartmentRecord>) -> Self {
		Self::new(records)
	}
}
