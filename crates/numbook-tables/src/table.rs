//! Data table renderer

use std::sync::Arc;

use numbook_pages::html::{button, checkbox, div, h3, span, table, tbody, td, th, thead, tr};
use numbook_pages::{ElementView, EventType, IntoView, View};

use crate::column::ColumnDef;
use crate::row::{RowId, TableRow};
use crate::selection::SelectionSet;

/// Number of placeholder rows shown while loading.
pub const SKELETON_ROWS: usize = 5;

/// Callback receiving a row.
pub type RowCallback<R> = Arc<dyn Fn(&R) + Send + Sync + 'static>;

/// Callback receiving a row id.
pub type RowIdCallback = Arc<dyn Fn(RowId) + Send + Sync + 'static>;

/// Callback receiving the updated selection.
pub type SelectionCallback = Arc<dyn Fn(SelectionSet) + Send + Sync + 'static>;

/// Current selection plus the callback that reports changes to it.
///
/// The table never stores the new selection itself; the owner decides
/// what to do with it and re-renders.
#[derive(Clone)]
pub struct SelectionBinding {
	/// Ids currently selected
	pub selected: SelectionSet,
	/// Called with the updated selection
	pub on_change: SelectionCallback,
}

impl SelectionBinding {
	/// Creates a new binding
	pub fn new<F>(selected: SelectionSet, on_change: F) -> Self
	where
		F: Fn(SelectionSet) + Send + Sync + 'static,
	{
		Self {
			selected,
			on_change: Arc::new(on_change),
		}
	}
}

/// A custom per-row button.
pub struct Action<R> {
	key: String,
	label: String,
	class: Option<String>,
	handler: RowCallback<R>,
}

impl<R> Action<R> {
	/// Creates an action. `key` addresses the button as `action:{key}:{row id}`.
	pub fn new<F>(key: impl Into<String>, label: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&R) + Send + Sync + 'static,
	{
		Self {
			key: key.into(),
			label: label.into(),
			class: None,
			handler: Arc::new(handler),
		}
	}

	/// Sets an extra CSS class on the button
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Returns the action key
	pub fn key(&self) -> &str {
		&self.key
	}
}

/// Read-only table over externally owned rows.
///
/// Rendering rules:
///
/// - a non-empty error replaces the whole table with the message;
/// - while loading, exactly [`SKELETON_ROWS`] placeholder rows are shown;
/// - checkboxes are disabled unless a [`SelectionBinding`] is set;
/// - the action column exists only if edit, delete or a custom action is
///   configured.
pub struct DataTable<R> {
	title: Option<String>,
	columns: Vec<ColumnDef>,
	rows: Vec<R>,
	loading: bool,
	error: Option<String>,
	empty_message: Option<String>,
	selection: Option<SelectionBinding>,
	on_edit: Option<RowCallback<R>>,
	on_delete: Option<RowIdCallback>,
	actions: Vec<Action<R>>,
	action_label: String,
}

impl<R> DataTable<R>
where
	R: TableRow + Clone + Send + Sync + 'static,
{
	/// Creates a table with the given columns and no rows
	pub fn new(columns: Vec<ColumnDef>) -> Self {
		Self {
			title: None,
			columns,
			rows: Vec::new(),
			loading: false,
			error: None,
			empty_message: None,
			selection: None,
			on_edit: None,
			on_delete: None,
			actions: Vec::new(),
			action_label: "Actions".to_string(),
		}
	}

	/// Sets the table title
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Sets the displayed rows
	pub fn rows(mut self, rows: Vec<R>) -> Self {
		self.rows = rows;
		self
	}

	/// Sets the loading flag
	pub fn loading(mut self, loading: bool) -> Self {
		self.loading = loading;
		self
	}

	/// Sets the error message. Empty messages are ignored.
	pub fn error(mut self, error: Option<String>) -> Self {
		self.error = error.filter(|e| !e.is_empty());
		self
	}

	/// Message shown in place of rows when there are none
	pub fn empty_message(mut self, message: Option<String>) -> Self {
		self.empty_message = message;
		self
	}

	/// Enables row selection
	pub fn selection(mut self, binding: SelectionBinding) -> Self {
		self.selection = Some(binding);
		self
	}

	/// Adds an edit button to each row
	pub fn on_edit<F>(mut self, handler: F) -> Self
	where
		F: Fn(&R) + Send + Sync + 'static,
	{
		self.on_edit = Some(Arc::new(handler));
		self
	}

	/// Adds a delete button to each row
	pub fn on_delete<F>(mut self, handler: F) -> Self
	where
		F: Fn(RowId) + Send + Sync + 'static,
	{
		self.on_delete = Some(Arc::new(handler));
		self
	}

	/// Adds a custom row action
	pub fn action(mut self, action: Action<R>) -> Self {
		self.actions.push(action);
		self
	}

	/// Sets the header of the action column
	pub fn action_label(mut self, label: impl Into<String>) -> Self {
		self.action_label = label.into();
		self
	}

	/// Returns whether the action column is shown
	pub fn has_action_column(&self) -> bool {
		self.on_edit.is_some() || self.on_delete.is_some() || !self.actions.is_empty()
	}

	/// Renders the table
	pub fn render(&self) -> View {
		if let Some(error) = &self.error {
			return div()
				.class("data-table-error")
				.child(error.clone())
				.into_view();
		}

		let mut container = div().class("data-table");
		if let Some(title) = &self.title {
			container = container.child(h3().class("data-table-title").child(title.clone()));
		}

		let body = if self.loading {
			tbody().children((0..SKELETON_ROWS).map(|_| self.render_skeleton_row()))
		} else if self.rows.is_empty() {
			tbody().child(self.empty_message.as_ref().map(|message| {
				tr().class("empty-row").child(
					td().attr("colspan", self.column_count().to_string())
						.child(message.clone()),
				)
			}))
		} else {
			tbody().children(self.rows.iter().map(|row| self.render_row(row)))
		};

		container
			.child(table().child(self.render_header()).child(body))
			.into_view()
	}

	fn column_count(&self) -> usize {
		self.columns.len() + 1 + usize::from(self.has_action_column())
	}

	fn render_header(&self) -> ElementView {
		let all_selected = self
			.selection
			.as_ref()
			.is_some_and(|binding| binding.selected.is_all_selected(&self.rows));
		let mut select_all = checkbox().action("select-all").attr_if(all_selected, "checked");
		match &self.selection {
			Some(binding) => {
				let rows = self.rows.clone();
				let selected = binding.selected.clone();
				let on_change = Arc::clone(&binding.on_change);
				select_all = select_all.on(
					EventType::Change,
					Arc::new(move || on_change(selected.toggle_all(&rows))),
				);
			}
			None => select_all = select_all.attr_if(true, "disabled"),
		}

		let mut header = tr().child(th().child(select_all));
		for column in &self.columns {
			header = header.child(th().child(column.label().to_string()));
		}
		if self.has_action_column() {
			header = header.child(th().child(self.action_label.clone()));
		}
		thead().child(header)
	}

	fn render_skeleton_row(&self) -> ElementView {
		let mut row = tr()
			.class("skeleton-row")
			.child(td().child(span().class("skeleton skeleton-checkbox")));
		for _ in &self.columns {
			row = row.child(td().child(span().class("skeleton skeleton-cell")));
		}
		if self.has_action_column() {
			row = row.child(
				td().child(span().class("skeleton skeleton-button"))
					.child(span().class("skeleton skeleton-button")),
			);
		}
		row
	}

	fn render_row(&self, row: &R) -> ElementView {
		let id = row.row_id();
		let numeric = id.as_numeric();

		let checked = match (&self.selection, numeric) {
			(Some(binding), Some(n)) => binding.selected.contains(n),
			_ => false,
		};
		let mut select = checkbox()
			.action(format!("select:{id}"))
			.attr_if(checked, "checked");
		match &self.selection {
			Some(binding) => {
				let selected = binding.selected.clone();
				let on_change = Arc::clone(&binding.on_change);
				select = select.on(
					EventType::Change,
					Arc::new(move || {
						let next = match numeric {
							Some(n) => selected.toggle(n),
							None => selected.clone(),
						};
						on_change(next);
					}),
				);
			}
			None => select = select.attr_if(true, "disabled"),
		}

		let mut tr_el = tr().child(td().child(select));
		for column in &self.columns {
			let value = row.field(column.key()).unwrap_or_default();
			let cell = match column.render_hint() {
				Some(hint) => td().child(span().class(hint.css_class()).child(value)),
				None => td().child(value),
			};
			tr_el = tr_el.child(cell);
		}

		if self.has_action_column() {
			tr_el = tr_el.child(self.render_actions(row, &id));
		}
		tr_el
	}

	fn render_actions(&self, row: &R, id: &RowId) -> ElementView {
		let mut cell = td().class("row-actions");

		if let Some(on_edit) = &self.on_edit {
			let on_edit = Arc::clone(on_edit);
			let row = row.clone();
			cell = cell.child(
				button()
					.class("btn-edit")
					.action(format!("edit:{id}"))
					.child("Edit")
					.on_click(move || on_edit(&row)),
			);
		}

		if let Some(on_delete) = &self.on_delete {
			let on_delete = Arc::clone(on_delete);
			let row_id = id.clone();
			cell = cell.child(
				button()
					.class("btn-delete")
					.action(format!("delete:{id}"))
					.child("Delete")
					.on_click(move || on_delete(row_id.clone())),
			);
		}

		for action in &self.actions {
			let handler = Arc::clone(&action.handler);
			let row = row.clone();
			let class = match &action.class {
				Some(extra) => format!("btn-action {extra}"),
				None => "btn-action".to_string(),
			};
			cell = cell.child(
				button()
					.class(class)
					.action(format!("action:{}:{id}", action.key))
					.child(action.label.clone())
					.on_click(move || handler(&row)),
			);
		}

		cell
	}
}
