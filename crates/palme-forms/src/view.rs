//! Output side of the selector
//!
//! [`SelectorView`] is the only way the selector touches the user interface.
//! The filtering and validation logic stays independent of any widget
//! toolkit; each front end provides its own implementation.

use serde::{Deserialize, Serialize};

/// One entry of the apartment select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
	pub value: String,
	pub label: String,
	#[serde(default)]
	pub disabled: bool,
}

impl SelectOption {
	/// Empty-valued "choose one" entry
	pub fn placeholder(label: impl Into<String>) -> Self {
		Self {
			value: String::new(),
			label: label.into(),
			disabled: false,
		}
	}

	/// Non-selectable entry shown when nothing can be chosen
	pub fn unavailable(label: impl Into<String>) -> Self {
		Self {
			value: String::new(),
			label: label.into(),
			disabled: true,
		}
	}

	pub fn apartment(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: id.into(),
			label: label.into(),
			disabled: false,
		}
	}
}

/// UI capabilities required by [`ApartmentSelector`](crate::ApartmentSelector)
pub trait SelectorView {
	/// Replace the whole option list of the apartment control
	fn set_options(&mut self, options: &[SelectOption]);

	/// Replace the text of the info panel; lines are separated by `\n`
	fn set_info_text(&mut self, text: &str);

	/// Cancel the pending submission and alert the user
	fn block_submission(&mut self, message: &str);
}

impl<V: SelectorView + ?Sized> SelectorView for &mut V {
	fn set_options(&mut self, options: &[SelectOption]) {
		(**self).set_options(options);
	}

	fn set_info_text(&mut self, text: &str) {
		(**self).set_info_text(text);
	}

	fn block_submission(&mut self, message: &str) {
		(**self).block_submission(message);
	}
}

/// Server-side rendering of the selector into HTML fragments
///
/// # Examples
///
/// ```
/// use palme_forms::{HtmlSelectorView, SelectOption, SelectorView};
///
/// let mut view = HtmlSelectorView::new();
/// view.set_options(&[
///     SelectOption::placeholder("select an apartment"),
///     SelectOption::apartment("a1", "Apartamento <A>"),
/// ]);
/// view.set_info_text("Building: 1\nFloor: 3");
///
/// assert_eq!(
///     view.options_html(),
///     "<option value=\"\">select an apartment</option>\n\
///      <option value=\"a1\">Apartamento &lt;A&gt;</option>"
/// );
/// assert_eq!(view.info_html(), "Building: 1<br>Floor: 3");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlSelectorView {
	options_html: String,
	info_html: String,
	alert: Option<String>,
}

impl HtmlSelectorView {
	pub fn new() -> Self {
		Self::default()
	}

	/// Rendered `<option>` elements of the apartment control
	pub fn options_html(&self) -> &str {
		&self.options_html
	}

	/// Rendered content of the info panel
	pub fn info_html(&self) -> &str {
		&self.info_html
	}

	/// Message of the last blocked submission
	pub fn alert(&self) -> Option<&str> {
		self.alert.as_deref()
	}

	/// Forget the last alert once it has been shown
	pub fn take_alert(&mut self) -> Option<String> {
		self.alert.take()
	}
}

impl SelectorView for HtmlSelectorView {
	fn set_options(&mut self, options: &[SelectOption]) {
		self.options_html = options
			.iter()
			.map(|option| {
				format!(
					"<option value=\"{}\"{}>{}</option>",
					escape(&option.value),
					if option.disabled { " disabled" } else { "" },
					escape(&option.label)
				)
			})
			.collect::<Vec<_>>()
			.join("\n");
	}

	fn set_info_text(&mut self, text: &str) {
		self.info_html = text.lines().map(escape).collect::<Vec<_>>().join("<br>");
	}

	fn block_submission(&mut self, message: &str) {
		self.alert = Some(message.to_string());
	}
}

/// Escape HTML special characters
fn escape(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'"' => result.push_str("&quot;"),
			'\'' => result.push_str("&#x27;"),
			_ => result.push(ch),
		}
	}
	result
}
