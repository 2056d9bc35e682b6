//! Row identity and field access

use std::fmt;

/// Identifier of a table row.
///
/// Backends usually hand out integer ids, but some listings key rows by
/// text. Selection only tracks numeric ids, see [`RowId::as_numeric`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowId {
	/// Integer id
	Int(i64),
	/// Text id
	Text(String),
}

impl RowId {
	/// Returns the id as an integer.
	///
	/// Text ids are parsed after trimming surrounding whitespace; ids that
	/// do not parse yield `None` and are dropped from selections.
	pub fn as_numeric(&self) -> Option<i64> {
		match self {
			RowId::Int(id) => Some(*id),
			RowId::Text(text) => text.trim().parse().ok(),
		}
	}
}

impl fmt::Display for RowId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RowId::Int(id) => write!(f, "{id}"),
			RowId::Text(text) => f.write_str(text),
		}
	}
}

impl From<i64> for RowId {
	fn from(id: i64) -> Self {
		RowId::Int(id)
	}
}

impl From<&str> for RowId {
	fn from(id: &str) -> Self {
		RowId::Text(id.to_string())
	}
}

impl From<String> for RowId {
	fn from(id: String) -> Self {
		RowId::Text(id)
	}
}

/// A record the table can display.
///
/// Values must already be formatted for display; the table projects them
/// verbatim.
pub trait TableRow {
	/// Returns the row identifier.
	fn row_id(&self) -> RowId;

	/// Returns the display value of `key`, or `None` when the row has no
	/// such field. Missing fields render as empty cells.
	fn field(&self, key: &str) -> Option<String>;
}
