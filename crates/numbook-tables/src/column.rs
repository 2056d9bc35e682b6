//! Column descriptors

use std::borrow::Cow;

/// Presentation hint for a column.
///
/// A hint only changes the CSS class of the cell content, never its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
	/// Render the value inside a pill-shaped badge.
	Badge,
}

impl RenderHint {
	/// Returns the CSS class applied for this hint.
	pub fn css_class(&self) -> &'static str {
		match self {
			RenderHint::Badge => "badge",
		}
	}
}

/// A table column: the row field it projects and its header label.
///
/// Columns are displayed in the order they are given to the table.
///
/// # Example
///
/// ```rust
/// use numbook_tables::{ColumnDef, RenderHint};
///
/// let status = ColumnDef::new("status", "Status").hint(RenderHint::Badge);
/// assert_eq!(status.key(), "status");
/// assert_eq!(status.render_hint(), Some(RenderHint::Badge));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
	key: Cow<'static, str>,
	label: Cow<'static, str>,
	hint: Option<RenderHint>,
}

impl ColumnDef {
	/// Creates a new column
	pub fn new(key: impl Into<Cow<'static, str>>, label: impl Into<Cow<'static, str>>) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			hint: None,
		}
	}

	/// Sets the render hint for this column
	pub fn hint(mut self, hint: RenderHint) -> Self {
		self.hint = Some(hint);
		self
	}

	/// Returns the row field key
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the header label
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Returns the render hint, if any
	pub fn render_hint(&self) -> Option<RenderHint> {
		self.hint
	}
}
