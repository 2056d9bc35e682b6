//! Row selection

use std::collections::BTreeSet;

use crate::row::TableRow;

/// Set of selected row ids.
///
/// Only numeric ids can be selected. Rows whose id does not convert to an
/// integer are silently left out when selecting all rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
	ids: BTreeSet<i64>,
}

impl SelectionSet {
	/// Creates an empty selection
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns whether `id` is selected
	pub fn contains(&self, id: i64) -> bool {
		self.ids.contains(&id)
	}

	/// Returns the number of selected ids
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	/// Returns whether nothing is selected
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Returns the selected ids in ascending order
	pub fn ids(&self) -> Vec<i64> {
		self.ids.iter().copied().collect()
	}

	/// Returns whether every displayed row is selected.
	///
	/// An empty row set is never "all selected".
	pub fn is_all_selected<R: TableRow>(&self, rows: &[R]) -> bool {
		!rows.is_empty()
			&& rows.iter().all(|row| {
				row.row_id()
					.as_numeric()
					.is_some_and(|id| self.contains(id))
			})
	}

	/// Select-all toggle: clears when every row is selected, otherwise
	/// selects every displayed row with a numeric id.
	///
	/// When any displayed row has a non-numeric id the rows can never all
	/// be selected, so repeated toggles keep selecting the numeric rows
	/// instead of clearing them.
	pub fn toggle_all<R: TableRow>(&self, rows: &[R]) -> Self {
		if self.is_all_selected(rows) {
			Self::new()
		} else {
			rows.iter()
				.filter_map(|row| row.row_id().as_numeric())
				.collect()
		}
	}

	/// Toggles membership of a single id
	pub fn toggle(&self, id: i64) -> Self {
		let mut next = self.clone();
		if !next.ids.remove(&id) {
			next.ids.insert(id);
		}
		next
	}
}

impl FromIterator<i64> for SelectionSet {
	fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
		Self {
			ids: iter.into_iter().collect(),
		}
	}
}
