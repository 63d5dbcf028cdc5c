//! Resident form support for Palme Residents
//!
//! This crate provides the client-side behaviour of the resident form:
//! - Cascading building → floor → apartment selection over a record snapshot
//! - An info panel describing the selected apartment
//! - Pre-submission validation with configurable messages
//! - A server-side HTML rendering of the selector output
//!
//! The selector never talks to a widget toolkit directly. Everything it shows
//! goes through a [`SelectorView`].

pub mod messages;
pub mod record;
pub mod selector;
pub mod submission;
pub mod view;

pub use messages::FormMessages;
pub use record::{ApartmentRecord, ApartmentRecords, FloorValue, RecordsError};
pub use selector::{ApartmentInfo, ApartmentSelector, SelectorEvent};
pub use submission::{
	ResidentFormInput, SubmissionError, ValidatedSubmission, validate_resident_form,
};
pub use view::{HtmlSelectorView, SelectOption, SelectorView};
