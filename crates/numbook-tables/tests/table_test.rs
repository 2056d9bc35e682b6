use std::sync::{Arc, Mutex};

use numbook_pages::{EventType, View};
use numbook_tables::{Action, ColumnDef, DataTable, RenderHint, RowId, SKELETON_ROWS, SelectionBinding, SelectionSet, TableRow};
use rstest::*;

#[derive(Debug, Clone, PartialEq)]
struct TestPhone {
	id: RowId,
	number: String,
	status: Option<String>,
}

impl TableRow for TestPhone {
	fn row_id(&self) -> RowId {
		self.id.clone()
	}

	fn field(&self, key: &str) -> Option<String> {
		match key {
			"phone_number" => Some(self.number.clone()),
			"status" => self.status.clone(),
			_ => None,
		}
	}
}

fn phone(id: impl Into<RowId>, number: &str) -> TestPhone {
	TestPhone {
		id: id.into(),
		number: number.to_string(),
		status: Some("available".to_string()),
	}
}

#[fixture]
fn phones() -> Vec<TestPhone> {
	vec![
		phone(1, "0901000001"),
		phone(2, "0901000002"),
		phone(3, "0901000003"),
	]
}

#[fixture]
fn columns() -> Vec<ColumnDef> {
	vec![
		ColumnDef::new("phone_number", "Phone number"),
		ColumnDef::new("status", "Status").hint(RenderHint::Badge),
	]
}

fn body_rows(view: &View) -> usize {
	view.select(|el| el.tag_name() == "tr").len() - 1
}

/// Selection binding that records every reported selection.
fn recording_binding(selected: SelectionSet) -> (SelectionBinding, Arc<Mutex<Vec<SelectionSet>>>) {
	let reported = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&reported);
	let binding = SelectionBinding::new(selected, move |s| sink.lock().unwrap().push(s));
	(binding, reported)
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(40)]
fn test_loading_renders_fixed_skeleton_rows(columns: Vec<ColumnDef>, #[case] count: i64) {
	let rows: Vec<TestPhone> = (0..count).map(|i| phone(i, "0900")).collect();
	let view = DataTable::new(columns)
		.rows(rows)
		.loading(true)
		.on_delete(|_| {})
		.render();

	let skeletons = view.select(|el| el.has_class("skeleton-row"));
	assert_eq!(skeletons.len(), SKELETON_ROWS);
	assert_eq!(body_rows(&view), SKELETON_ROWS);
	// checkbox + 2 columns + action cell
	assert_eq!(skeletons[0].child_views().len(), 4);
}

#[rstest]
fn test_error_short_circuits(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let view = DataTable::new(columns)
		.rows(phones)
		.loading(true)
		.error(Some("Backend unavailable".to_string()))
		.render();

	assert_eq!(
		view.render_to_string(),
		"<div class=\"data-table-error\">Backend unavailable</div>"
	);
}

#[rstest]
fn test_empty_error_is_ignored(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let view = DataTable::new(columns)
		.rows(phones)
		.error(Some(String::new()))
		.render();
	assert_eq!(body_rows(&view), 3);
}

#[rstest]
fn test_cells_project_fields(columns: Vec<ColumnDef>) {
	let mut row = phone(9, "0909");
	row.status = None;
	let html = DataTable::new(columns).rows(vec![row]).render().render_to_string();

	assert!(html.contains("<td>0909</td>"));
	// missing field renders an empty badge
	assert!(html.contains("<td><span class=\"badge\"></span></td>"));
}

#[rstest]
fn test_badge_hint_only_adds_class(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let html = DataTable::new(columns).rows(phones).render().render_to_string();
	assert!(html.contains("<span class=\"badge\">available</span>"));
}

#[rstest]
fn test_checkboxes_disabled_without_binding(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let view = DataTable::new(columns).rows(phones).render();
	let boxes = view.select(|el| el.attr_value("type") == Some("checkbox"));

	assert_eq!(boxes.len(), 4);
	assert!(boxes.iter().all(|el| el.has_attr("disabled")));
	assert!(!view.dispatch("select-all", EventType::Change));
	assert!(!view.dispatch("select:1", EventType::Change));
}

#[rstest]
fn test_select_all_round_trip(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let original = SelectionSet::new();

	let (binding, reported) = recording_binding(original.clone());
	let view = DataTable::new(columns.clone()).rows(phones.clone()).selection(binding).render();
	assert!(view.dispatch("select-all", EventType::Change));
	let all = reported.lock().unwrap()[0].clone();
	assert_eq!(all.ids(), vec![1, 2, 3]);

	let (binding, reported) = recording_binding(all);
	let view = DataTable::new(columns).rows(phones).selection(binding).render();
	assert!(view.find_action("select-all").unwrap().has_attr("checked"));
	assert!(view.dispatch("select-all", EventType::Change));
	assert_eq!(reported.lock().unwrap()[0], original);
}

#[rstest]
fn test_select_all_drops_non_numeric_ids(columns: Vec<ColumnDef>, mut phones: Vec<TestPhone>) {
	phones.push(phone("abc", "0904"));
	let (binding, reported) = recording_binding(SelectionSet::new());
	let view = DataTable::new(columns).rows(phones.clone()).selection(binding).render();

	view.dispatch("select-all", EventType::Change);
	assert_eq!(reported.lock().unwrap()[0].len(), phones.len() - 1);
}

#[rstest]
fn test_select_all_with_mixed_ids_keeps_selecting(columns: Vec<ColumnDef>) {
	let rows = vec![
		phone(1, "0901000001"),
		phone("x-2", "0901000002"),
		phone(3, "0901000003"),
	];
	let (binding, reported) = recording_binding(SelectionSet::new());
	let view = DataTable::new(columns.clone()).rows(rows.clone()).selection(binding).render();
	assert!(view.dispatch("select-all", EventType::Change));
	let first = reported.lock().unwrap()[0].clone();
	assert_eq!(first.ids(), vec![1, 3]);

	let (binding, reported) = recording_binding(first.clone());
	let view = DataTable::new(columns).rows(rows).selection(binding).render();
	assert!(!view.find_action("select-all").unwrap().has_attr("checked"));
	assert!(view.dispatch("select-all", EventType::Change));
	assert_eq!(reported.lock().unwrap()[0], first);
}

#[rstest]
fn test_select_all_unchecked_on_partial_or_empty(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let partial: SelectionSet = [1, 2].into_iter().collect();
	let (binding, _) = recording_binding(partial);
	let view = DataTable::new(columns.clone()).rows(phones).selection(binding).render();
	assert!(!view.find_action("select-all").unwrap().has_attr("checked"));

	let (binding, _) = recording_binding(SelectionSet::new());
	let view = DataTable::<TestPhone>::new(columns).selection(binding).render();
	assert!(!view.find_action("select-all").unwrap().has_attr("checked"));
}

#[rstest]
fn test_row_checkbox_toggles_membership(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let selected: SelectionSet = [2].into_iter().collect();
	let (binding, reported) = recording_binding(selected);
	let view = DataTable::new(columns).rows(phones).selection(binding).render();

	assert!(view.find_action("select:2").unwrap().has_attr("checked"));
	view.dispatch("select:1", EventType::Change);
	view.dispatch("select:2", EventType::Change);

	let reported = reported.lock().unwrap();
	assert_eq!(reported[0].ids(), vec![1, 2]);
	assert!(reported[1].is_empty());
}

#[rstest]
fn test_action_column_absent_without_actions(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let table = DataTable::new(columns).rows(phones);
	assert!(!table.has_action_column());
	assert!(!table.render().render_to_string().contains("Actions"));
}

#[rstest]
fn test_row_actions_receive_row_or_id(columns: Vec<ColumnDef>, phones: Vec<TestPhone>) {
	let edited = Arc::new(Mutex::new(Vec::new()));
	let deleted = Arc::new(Mutex::new(Vec::new()));
	let viewed = Arc::new(Mutex::new(Vec::new()));
	let (e, d, v) = (Arc::clone(&edited), Arc::clone(&deleted), Arc::clone(&viewed));

	let view = DataTable::new(columns)
		.rows(phones)
		.action_label("Manage")
		.on_edit(move |row: &TestPhone| e.lock().unwrap().push(row.number.clone()))
		.on_delete(move |id| d.lock().unwrap().push(id))
		.action(Action::new("view", "View", move |row: &TestPhone| {
			v.lock().unwrap().push(row.row_id())
		}))
		.render();

	assert!(view.render_to_string().contains("<th>Manage</th>"));
	assert!(view.dispatch("edit:2", EventType::Click));
	assert!(view.dispatch("delete:3", EventType::Click));
	assert!(view.dispatch("action:view:1", EventType::Click));

	assert_eq!(*edited.lock().unwrap(), vec!["0901000002".to_string()]);
	assert_eq!(*deleted.lock().unwrap(), vec![RowId::Int(3)]);
	assert_eq!(*viewed.lock().unwrap(), vec![RowId::Int(1)]);
}

#[rstest]
fn test_empty_message_spans_all_columns(columns: Vec<ColumnDef>) {
	let view = DataTable::<TestPhone>::new(columns)
		.empty_message(Some("No data".to_string()))
		.render();
	assert!(
		view.render_to_string()
			.contains("<tr class=\"empty-row\"><td colspan=\"3\">No data</td></tr>")
	);
}
