//! Cascading building → floor → apartment selector
//!
//! ## Flow
//!
//! ```text
//! BuildingChanged ─┐
//!                  ├─▶ refresh_apartment_options ─▶ set_options + set_info_text
//! FloorChanged ────┘
//! ApartmentChanged ──▶ refresh_apartment_info ────▶ set_info_text
//! submit ────────────▶ validate_submission ───────▶ Ok(ValidatedSubmission)
//!                                                   | block_submission(message)
//! ```
//!
//! Handlers are synchronous and never overlap, so a later event simply
//! overwrites whatever an earlier one rendered.

use crate::messages::FormMessages;
use crate::record::{ApartmentRecord, ApartmentRecords};
use crate::submission::{
	ResidentFormInput, SubmissionError, ValidatedSubmission, validate_resident_form,
};
use crate::view::{SelectOption, SelectorView};

/// Change notifications delivered by the hosting UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
	BuildingChanged(String),
	FloorChanged(String),
	ApartmentChanged(String),
	/// Every control is wired; run the initial refresh if needed
	ControlsWired,
}

/// Description of the selected apartment shown in the info panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApartmentInfo {
	pub building_number: String,
	pub floor: String,
	pub number: String,
}

impl From<&ApartmentRecord> for ApartmentInfo {
	fn from(record: &ApartmentRecord) -> Self {
		Self {
			building_number: record.building_number.clone(),
			floor: record.floor.to_string(),
			number: record.number.clone(),
		}
	}
}

/// Keeps the apartment control consistent with the building and floor choices
///
/// # Examples
///
/// ```
/// use palme_forms::{ApartmentRecord, ApartmentRecords, ApartmentSelector, HtmlSelectorView};
///
/// let records = ApartmentRecords::new(vec![
///     ApartmentRecord::new("a1", "b1", 3, "A", "1"),
///     ApartmentRecord::new("a2", "b1", 3, "B", "1"),
/// ]);
/// let mut selector = ApartmentSelector::new(records, HtmlSelectorView::new());
///
/// selector.select_building("b1");
/// selector.select_floor("3");
///
/// let labels: Vec<String> = selector
///     .visible_options()
///     .into_iter()
///     .map(|option| option.label)
///     .collect();
/// assert_eq!(
///     labels,
///     vec!["select an apartment", "Apartamento A", "Apartamento B"]
/// );
/// ```
pub struct ApartmentSelector<V: SelectorView> {
	records: ApartmentRecords,
	view: V,
	messages: FormMessages,
	building: Option<String>,
	floor: Option<String>,
	apartment: Option<String>,
	info: Option<ApartmentInfo>,
	wired: bool,
}

impl<V: SelectorView> ApartmentSelector<V> {
	/// Create a selector over a record snapshot with default messages
	pub fn new(records: ApartmentRecords, view: V) -> Self {
		Self {
			records,
			view,
			messages: FormMessages::default(),
			building: None,
			floor: None,
			apartment: None,
			info: None,
			wired: false,
		}
	}

	/// Replace the user-facing strings
	pub fn with_messages(mut self, messages: FormMessages) -> Self {
		self.messages = messages;
		self
	}

	/// Pre-select a building and floor, as when editing an existing resident
	///
	/// Nothing is rendered until [`controls_wired`](Self::controls_wired).
	pub fn with_initial_selection(
		mut self,
		building: impl Into<String>,
		floor: impl Into<String>,
	) -> Self {
		self.building = normalize(building.into());
		self.floor = normalize(floor.into());
		self
	}

	/// Dispatch a UI event to the matching handler
	pub fn handle(&mut self, event: SelectorEvent) {
		match event {
			SelectorEvent::BuildingChanged(value) => self.select_building(value),
			SelectorEvent::FloorChanged(value) => self.select_floor(value),
			SelectorEvent::ApartmentChanged(value) => self.select_apartment(value),
			SelectorEvent::ControlsWired => self.controls_wired(),
		}
	}

	/// Completion signal for the initial wiring of the controls
	///
	/// When both a building and a floor are already selected the apartment
	/// options are refreshed once. Later calls do nothing.
	pub fn controls_wired(&mut self) {
		if self.wired {
			return;
		}
		self.wired = true;

		if self.building.is_some() && self.floor.is_some() {
			tracing::debug!(
				building = ?self.building,
				floor = ?self.floor,
				"running initial apartment refresh"
			);
			self.refresh_apartment_options();
		}
	}

	pub fn select_building(&mut self, value: impl Into<String>) {
		self.building = normalize(value.into());
		self.refresh_apartment_options();
	}

	pub fn select_floor(&mut self, value: impl Into<String>) {
		self.floor = normalize(value.into());
		self.refresh_apartment_options();
	}

	pub fn select_apartment(&mut self, value: impl Into<String>) {
		self.apartment = normalize(value.into());
		self.refresh_apartment_info();
	}

	/// Rebuild the apartment options for the current building and floor
	///
	/// Any chosen apartment is dropped and the info panel returns to its
	/// placeholder.
	pub fn refresh_apartment_options(&mut self) {
		self.apartment = None;
		self.info = None;

		let options = self.visible_options();
		tracing::debug!(
			building = ?self.building,
			floor = ?self.floor,
			options = options.len(),
			"apartment options refreshed"
		);

		self.view.set_options(&options);
		self.view.set_info_text(&self.messages.info_placeholder);
	}

	/// Render the info panel for the selected apartment
	///
	/// The id is looked up in the whole snapshot, not only in the visible
	/// options. An id that matches no record resets the panel to its
	/// placeholder.
	pub fn refresh_apartment_info(&mut self) {
		let Some(id) = self.apartment.as_deref() else {
			self.info = None;
			self.view.set_info_text(&self.messages.info_placeholder);
			return;
		};

		match self.records.find(id) {
			Some(record) => {
				let info = ApartmentInfo::from(record);
				self.view.set_info_text(&self.messages.info_text(&info));
				self.info = Some(info);
			}
			None => {
				tracing::warn!(apartment = %id, "selected apartment is not in the dataset");
				self.info = None;
				self.view.set_info_text(&self.messages.info_placeholder);
			}
		}
	}

	/// Options the apartment control shows for the current selection
	pub fn visible_options(&self) -> Vec<SelectOption> {
		let (Some(building), Some(floor)) = (self.building.as_deref(), self.floor.as_deref())
		else {
			return vec![SelectOption::placeholder(&self.messages.apartment_placeholder)];
		};

		let mut options = vec![SelectOption::placeholder(&self.messages.apartment_placeholder)];
		let matches: Vec<SelectOption> = self
			.records
			.located_at(building, floor)
			.map(|record| {
				SelectOption::apartment(&record.id, self.messages.option_label(&record.number))
			})
			.collect();

		if matches.is_empty() {
			return vec![SelectOption::unavailable(&self.messages.no_apartments)];
		}
		options.extend(matches);
		options
	}

	/// Check a submission; on failure the view blocks it with the message
	pub fn validate_submission(
		&mut self,
		input: &ResidentFormInput,
	) -> Result<ValidatedSubmission, SubmissionError> {
		validate_resident_form(input).inspect_err(|error| {
			let message = error.message(&self.messages);
			tracing::warn!(reason = ?error, "resident submission blocked");
			self.view.block_submission(message);
		})
	}

	/// Form input combining the typed fields with the current selections
	pub fn submission_input(
		&self,
		full_name: impl Into<String>,
		resident_type: impl Into<String>,
	) -> ResidentFormInput {
		ResidentFormInput {
			full_name: full_name.into(),
			resident_type: resident_type.into(),
			apartment: self.apartment.clone().unwrap_or_default(),
			building: self.building.clone().unwrap_or_default(),
			floor: self.floor.clone().unwrap_or_default(),
		}
	}

	pub fn building(&self) -> Option<&str> {
		self.building.as_deref()
	}

	pub fn floor(&self) -> Option<&str> {
		self.floor.as_deref()
	}

	pub fn apartment(&self) -> Option<&str> {
		self.apartment.as_deref()
	}

	/// Info currently displayed, `None` while the placeholder is shown
	pub fn info(&self) -> Option<&ApartmentInfo> {
		self.info.as_ref()
	}

	pub fn records(&self) -> &ApartmentRecords {
		&self.records
	}

	pub fn messages(&self) -> &FormMessages {
		&self.messages
	}

	pub fn view(&self) -> &V {
		&self.view
	}

	pub fn view_mut(&mut self) -> &mut V {
		&mut self.view
	}

	pub fn into_view(self) -> V {
		self.view
	}
}

/// Empty control values mean "nothing selected"
fn normalize(value: String) -> Option<String> {
	if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::view::HtmlSelectorView;
	use rstest::{fixture, rstest};

	#[fixture]
	fn selector() -> ApartmentSelector<HtmlSelectorView> {
		let records = ApartmentRecords::new(vec![
			ApartmentRecord::new("a1", "b1", 3, "A", "1"),
			ApartmentRecord::new("a2", "b1", 3, "B", "1"),
			ApartmentRecord::new("c1", "b2", "1", "1I", "23"),
		]);
		ApartmentSelector::new(records, HtmlSelectorView::new())
	}

	#[rstest]
	fn test_placeholder_until_both_selected(mut selector: ApartmentSelector<HtmlSelectorView>) {
		selector.select_building("b1");

		assert_eq!(
			selector.visible_options(),
			vec![SelectOption::placeholder("select an apartment")]
		);
		assert_eq!(
			selector.view().options_html(),
			"<option value=\"\">select an apartment</option>"
		);
	}

	#[rstest]
	fn test_changing_floor_drops_apartment(mut selector: ApartmentSelector<HtmlSelectorView>) {
		selector.select_building("b1");
		selector.select_floor("3");
		selector.select_apartment("a2");
		assert!(selector.info().is_some());

		selector.select_floor("4");

		assert_eq!(selector.apartment(), None);
		assert_eq!(selector.info(), None);
		assert_eq!(
			selector.view().info_html(),
			"select an apartment to view information"
		);
	}

	#[rstest]
	fn test_clearing_building_returns_to_placeholder(
		mut selector: ApartmentSelector<HtmlSelectorView>,
	) {
		selector.select_building("b1");
		selector.select_floor("3");

		selector.handle(SelectorEvent::BuildingChanged(String::new()));

		assert_eq!(selector.building(), None);
		assert_eq!(selector.visible_options().len(), 1);
	}

	#[rstest]
	fn test_submission_input_uses_selection(mut selector: ApartmentSelector<HtmlSelectorView>) {
		selector.select_building("b2");
		selector.select_floor("1");
		selector.select_apartment("c1");

		let input = selector.submission_input("Pedro Vargas", "owner");

		assert_eq!(input.building, "b2");
		assert_eq!(input.floor, "1");
		assert_eq!(input.apartment, "c1");
	}

	#[rstest]
	fn test_validate_blocks_with_configured_message(selector: ApartmentSelector<HtmlSelectorView>) {
		let messages = FormMessages {
			missing_name: "Introduzca el nombre completo".to_string(),
			..FormMessages::default()
		};
		let mut selector = selector.with_messages(messages);

		let result = selector.validate_submission(&ResidentFormInput::default());

		assert_eq!(result, Err(SubmissionError::MissingName));
		assert_eq!(selector.view().alert(), Some("Introduzca el nombre completo"));
	}
}
