//! Resident intake: the selector form wired to the directory
//!
//! ```text
//! Directory ──apartment_records()──▶ ApartmentSelector ──validate──▶ Directory::submit
//!                                        ▲      │
//!                              SelectorEvent    └──▶ SelectorView
//! ```

use palme_conf::Settings;
use palme_core::{Directory, DirectoryError, Resident};
use palme_forms::{
	ApartmentSelector, FormMessages, ResidentFormInput, SelectorEvent, SelectorView,
	SubmissionError,
};
use std::sync::Arc;
use uuid::Uuid;

/// Why an intake submission did not register a resident
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
	/// The form was incomplete; the view already shows the message
	#[error("submission blocked: {0}")]
	Rejected(#[from] SubmissionError),

	#[error(transparent)]
	Directory(#[from] DirectoryError),

	#[error("malformed form body: {0}")]
	MalformedBody(#[from] serde_urlencoded::de::Error),
}

/// One resident form session backed by a shared [`Directory`]
///
/// # Examples
///
/// ```
/// use palme::conf::Settings;
/// use palme::core::Directory;
/// use palme::forms::{HtmlSelectorView, SelectorEvent};
/// use palme::intake::ResidentIntake;
/// use std::sync::Arc;
///
/// let directory = Arc::new(Directory::default());
/// let building = directory.create_building(1).unwrap();
/// let apartment = directory.create_apartment(building.id, 3, "3A").unwrap();
///
/// let mut intake = ResidentIntake::open(directory.clone(), HtmlSelectorView::new(), &Settings::default());
/// intake.handle(SelectorEvent::BuildingChanged(building.id.to_string()));
/// intake.handle(SelectorEvent::FloorChanged("3".to_string()));
/// intake.handle(SelectorEvent::ApartmentChanged(apartment.id.to_string()));
///
/// let resident = intake.submit("Ana Torres", "owner").unwrap();
/// assert_eq!(directory.owner_of(apartment.id).unwrap(), Some(resident));
/// ```
pub struct ResidentIntake<V: SelectorView> {
	directory: Arc<Directory>,
	selector: ApartmentSelector<V>,
}

impl<V: SelectorView> ResidentIntake<V> {
	/// Start a blank form over the current apartments
	pub fn open(directory: Arc<Directory>, view: V, settings: &Settings) -> Self {
		let selector = selector_for(&directory, view, settings);
		Self {
			directory,
			selector,
		}
	}

	/// Start a form pre-set to the building and floor of an existing resident
	///
	/// The apartment options are filled in once the host reports
	/// [`SelectorEvent::ControlsWired`].
	pub fn editing(
		directory: Arc<Directory>,
		view: V,
		settings: &Settings,
		resident_id: Uuid,
	) -> Result<Self, IntakeError> {
		let resident = directory.resident(resident_id)?;
		let apartment = directory.apartment(resident.apartment_id)?;

		let selector = selector_for(&directory, view, settings)
			.with_initial_selection(apartment.building_id.to_string(), apartment.floor.to_string());
		Ok(Self {
			directory,
			selector,
		})
	}

	pub fn handle(&mut self, event: SelectorEvent) {
		self.selector.handle(event);
	}

	pub fn selector(&self) -> &ApartmentSelector<V> {
		&self.selector
	}

	pub fn selector_mut(&mut self) -> &mut ApartmentSelector<V> {
		&mut self.selector
	}

	pub fn directory(&self) -> &Arc<Directory> {
		&self.directory
	}

	/// Validate the typed fields with the current selections and register
	/// the resident
	pub fn submit(
		&mut self,
		full_name: &str,
		resident_type: &str,
	) -> Result<Resident, IntakeError> {
		let input = self.selector.submission_input(full_name, resident_type);
		self.submit_input(&input)
	}

	/// Same as [`submit`](Self::submit) for a posted urlencoded body
	pub fn submit_form_body(&mut self, body: &str) -> Result<Resident, IntakeError> {
		let input = ResidentFormInput::from_form_body(body)?;
		self.submit_input(&input)
	}

	fn submit_input(&mut self, input: &ResidentFormInput) -> Result<Resident, IntakeError> {
		let submission = self.selector.validate_submission(input)?;

		match self.directory.submit(&submission) {
			Ok(resident) => {
				tracing::info!(
					resident_id = %resident.id,
					apartment_id = %resident.apartment_id,
					"resident registered through the form"
				);
				Ok(resident)
			}
			Err(error) => {
				tracing::warn!(%error, "directory refused the submission");
				self.selector
					.view_mut()
					.block_submission(&error.user_message());
				Err(error.into())
			}
		}
	}
}

fn selector_for<V: SelectorView>(
	directory: &Directory,
	view: V,
	settings: &Settings,
) -> ApartmentSelector<V> {
	ApartmentSelector::new(directory.apartment_records(), view)
		.with_messages(FormMessages::from(&settings.form))
}
