//! Provider and type-number maintenance
//!
//! [`ReferenceList`] lists either resource through the data table with
//! edit and delete actions. [`ProviderForm`] and [`TypeNumberForm`] hold
//! the create/edit forms: field validation, no-op detection and the
//! create-or-update request.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use numbook_client::{
	ApiError, Provider, ProviderInput, ReferenceApi, TypeNumber, TypeNumberInput,
};
use numbook_pages::html::{button, div, h3, input, p, span};
use numbook_pages::{IntoView, View};
use numbook_tables::{ColumnDef, DataTable, RowId, TableRow};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::dialogs::{AlertLevel, Dialogs};
use crate::error::{AdminError, Result};
use crate::format::{expiration_to_hms, format_expiration_input, parse_expiration};
use crate::messages;
use crate::spawn_task;

/// Callback run after a form saved successfully
pub type SavedCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Table row for a provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRow(pub Provider);

impl TableRow for ProviderRow {
	fn row_id(&self) -> RowId {
		optional_row_id(self.0.id)
	}

	fn field(&self, key: &str) -> Option<String> {
		match key {
			"name" => Some(self.0.name.clone()),
			"description" => Some(self.0.description.clone()),
			_ => None,
		}
	}
}

/// Table row for a type number; the expiration shows as `HH.MM.SS`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNumberRow(pub TypeNumber);

impl TableRow for TypeNumberRow {
	fn row_id(&self) -> RowId {
		optional_row_id(self.0.id)
	}

	fn field(&self, key: &str) -> Option<String> {
		match key {
			"name" => Some(self.0.name.clone()),
			"description" => Some(self.0.description.clone()),
			"booking_expiration" => Some(expiration_to_hms(self.0.booking_expiration)),
			_ => None,
		}
	}
}

fn optional_row_id(id: Option<i64>) -> RowId {
	id.map(RowId::Int).unwrap_or_else(|| RowId::Text(String::new()))
}

/// A reference resource that can be listed and deleted
#[async_trait]
pub trait ReferenceResource: Clone + Send + Sync + 'static {
	type Row: TableRow + Clone + Send + Sync + 'static;

	/// Singular name used in messages
	const LABEL: &'static str;

	fn columns() -> Vec<ColumnDef>;

	fn to_row(&self) -> Self::Row;

	async fn list(api: &dyn ReferenceApi) -> numbook_client::Result<Vec<Self>>;

	async fn delete(api: &dyn ReferenceApi, id: i64) -> numbook_client::Result<()>;
}

#[async_trait]
impl ReferenceResource for Provider {
	type Row = ProviderRow;

	const LABEL: &'static str = "provider";

	fn columns() -> Vec<ColumnDef> {
		vec![
			ColumnDef::new("name", "Name"),
			ColumnDef::new("description", "Description"),
		]
	}

	fn to_row(&self) -> ProviderRow {
		ProviderRow(self.clone())
	}

	async fn list(api: &dyn ReferenceApi) -> numbook_client::Result<Vec<Self>> {
		api.list_providers().await
	}

	async fn delete(api: &dyn ReferenceApi, id: i64) -> numbook_client::Result<()> {
		api.delete_provider(id).await
	}
}

#[async_trait]
impl ReferenceResource for TypeNumber {
	type Row = TypeNumberRow;

	const LABEL: &'static str = "type number";

	fn columns() -> Vec<ColumnDef> {
		vec![
			ColumnDef::new("name", "Name"),
			ColumnDef::new("booking_expiration", "Booking expiration (HH.MM.SS)"),
			ColumnDef::new("description", "Description"),
		]
	}

	fn to_row(&self) -> TypeNumberRow {
		TypeNumberRow(self.clone())
	}

	async fn list(api: &dyn ReferenceApi) -> numbook_client::Result<Vec<Self>> {
		api.list_type_numbers().await
	}

	async fn delete(api: &dyn ReferenceApi, id: i64) -> numbook_client::Result<()> {
		api.delete_type_number(id).await
	}
}

/// What the edit form of a [`ReferenceList`] is open for
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget<R> {
	Create,
	Edit(R),
}

struct ListInner<R> {
	items: Vec<R>,
	loading: bool,
	error: Option<String>,
	editing: Option<EditTarget<R>>,
	generation: u64,
}

/// Listing of providers or type numbers
pub struct ReferenceList<R> {
	api: Arc<dyn ReferenceApi>,
	dialogs: Arc<dyn Dialogs>,
	inner: Mutex<ListInner<R>>,
	changed: watch::Sender<u64>,
}

impl<R: ReferenceResource> ReferenceList<R> {
	pub fn new(api: Arc<dyn ReferenceApi>, dialogs: Arc<dyn Dialogs>) -> Arc<Self> {
		let (changed, _) = watch::channel(0);
		Arc::new(Self {
			api,
			dialogs,
			inner: Mutex::new(ListInner {
				items: Vec::new(),
				loading: false,
				error: None,
				editing: None,
				generation: 0,
			}),
			changed,
		})
	}

	/// Receiver bumped on every change
	pub fn subscribe(&self) -> watch::Receiver<u64> {
		self.changed.subscribe()
	}

	fn touch(&self) {
		self.changed.send_modify(|revision| *revision += 1);
	}

	pub fn items(&self) -> Vec<R> {
		self.inner.lock().items.clone()
	}

	pub fn is_loading(&self) -> bool {
		self.inner.lock().loading
	}

	pub fn error(&self) -> Option<String> {
		self.inner.lock().error.clone()
	}

	pub fn editing(&self) -> Option<EditTarget<R>> {
		self.inner.lock().editing.clone()
	}

	pub fn open_create(&self) {
		self.inner.lock().editing = Some(EditTarget::Create);
		self.touch();
	}

	pub fn open_edit(&self, item: R) {
		self.inner.lock().editing = Some(EditTarget::Edit(item));
		self.touch();
	}

	pub fn close_edit(&self) {
		self.inner.lock().editing = None;
		self.touch();
	}

	/// Reload the listing. Only the latest load writes its result.
	pub async fn load(&self) {
		let generation = {
			let mut inner = self.inner.lock();
			inner.generation += 1;
			inner.loading = true;
			inner.generation
		};
		self.touch();

		let result = R::list(self.api.as_ref()).await;
		{
			let mut inner = self.inner.lock();
			if inner.generation != generation {
				return;
			}
			inner.loading = false;
			match result {
				Ok(items) => {
					tracing::debug!(kind = R::LABEL, count = items.len(), "reference list loaded");
					inner.items = items;
					inner.error = None;
				}
				Err(e) => {
					tracing::warn!(kind = R::LABEL, error = %e, "failed to load reference list");
					inner.error = Some(e.detail().unwrap_or(messages::GENERIC_ERROR).to_string());
				}
			}
		}
		self.touch();
	}

	/// Delete one item after confirmation, then reload
	pub async fn delete(&self, id: &RowId) -> Result<bool> {
		let title = format!("Delete {}", R::LABEL);
		let Some(id) = id.as_numeric() else {
			self.dialogs
				.alert(AlertLevel::Error, &title, messages::INVALID_ID)
				.await;
			return Err(AdminError::Validation(messages::INVALID_ID.to_string()));
		};

		let question = format!("Are you sure you want to delete this {}?", R::LABEL);
		if !self.dialogs.confirm(&title, &question).await {
			return Ok(false);
		}

		match R::delete(self.api.as_ref(), id).await {
			Ok(()) => {
				tracing::info!(kind = R::LABEL, id, "reference item deleted");
				self.dialogs
					.alert(AlertLevel::Success, &title, &format!("The {} was deleted.", R::LABEL))
					.await;
				self.load().await;
				Ok(true)
			}
			Err(e) => {
				tracing::warn!(kind = R::LABEL, id, error = %e, "failed to delete reference item");
				let message = e.detail().unwrap_or(messages::GENERIC_ERROR).to_string();
				self.dialogs.alert(AlertLevel::Error, &title, &message).await;
				Err(e.into())
			}
		}
	}

	/// Render the listing with an add button and per-row edit/delete.
	pub fn view(self: &Arc<Self>) -> View {
		let (rows, loading, error) = {
			let inner = self.inner.lock();
			(
				inner.items.iter().map(R::to_row).collect::<Vec<_>>(),
				inner.loading,
				inner.error.clone(),
			)
		};

		let this = Arc::clone(self);
		let on_edit = move |row: &R::Row| {
			let id = row.row_id();
			let item = this
				.inner
				.lock()
				.items
				.iter()
				.find(|item| item.to_row().row_id() == id)
				.cloned();
			if let Some(item) = item {
				this.open_edit(item);
			}
		};
		let this = Arc::clone(self);
		let on_delete = move |id: RowId| {
			let this = Arc::clone(&this);
			spawn_task(async move {
				let _ = this.delete(&id).await;
			});
		};

		let this = Arc::clone(self);
		let add = button()
			.class("btn btn-primary")
			.action("create")
			.child("Add")
			.on_click(move || this.open_create());

		let table = DataTable::new(R::columns())
			.rows(rows)
			.loading(loading)
			.error(error)
			.empty_message(Some(format!("No {} yet.", R::LABEL)))
			.on_edit(on_edit)
			.on_delete(on_delete)
			.render();

		div()
			.class("reference-list")
			.child(add)
			.child(table)
			.into_view()
	}
}

/// Result of submitting a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
	/// Field validation failed; nothing was sent
	Invalid,
	/// Editing without changes; nothing was sent
	Unchanged,
	/// Created; carries the name returned by the backend
	Created(String),
	/// Updated; carries the name returned by the backend
	Updated(String),
	/// The backend rejected the request
	Failed(String),
}

impl FormOutcome {
	/// Whether the form should close
	pub fn closes(&self) -> bool {
		matches!(self, Self::Unchanged | Self::Created(_) | Self::Updated(_))
	}
}

#[derive(Default)]
struct FormStatus {
	errors: HashMap<&'static str, String>,
	form_error: Option<String>,
	on_saved: Option<SavedCallback>,
}

impl FormStatus {
	async fn finish(
		&mut self,
		label: &str,
		conflict_message: &str,
		created: bool,
		result: numbook_client::Result<String>,
		dialogs: &dyn Dialogs,
	) -> FormOutcome {
		match result {
			Ok(name) => {
				self.form_error = None;
				let (title, message) = if created {
					("Created", format!("Created {label} {name}."))
				} else {
					("Updated", format!("Updated {label} {name}."))
				};
				tracing::info!(kind = label, %name, created, "reference item saved");
				dialogs.alert(AlertLevel::Success, title, &message).await;
				if let Some(on_saved) = &self.on_saved {
					on_saved();
				}
				if created {
					FormOutcome::Created(name)
				} else {
					FormOutcome::Updated(name)
				}
			}
			Err(e) => {
				tracing::warn!(kind = label, error = %e, "failed to save reference item");
				let message = failure_message(&e, conflict_message);
				self.form_error = Some(message.clone());
				FormOutcome::Failed(message)
			}
		}
	}

	fn render_field(&self, name: &'static str, label: &str, value: &str, placeholder: &str) -> View {
		let error = self
			.errors
			.get(name)
			.map(|message| span().class("field-error").child(message.clone()));
		div()
			.class("form-field")
			.child(span().class("label").child(label.to_string()))
			.child(
				input()
					.attr("type", "text")
					.attr("name", name)
					.attr("value", value.to_string())
					.attr("placeholder", placeholder.to_string())
					.action(format!("field:{name}")),
			)
			.child(error)
			.into_view()
	}

	fn render(&self, title: &str, submit: &str, fields: Vec<View>) -> View {
		div()
			.class("reference-form")
			.child(h3().child(title.to_string()))
			.children(fields)
			.child(
				self.form_error
					.as_ref()
					.map(|message| p().class("form-error").child(message.clone())),
			)
			.child(button().class("btn btn-secondary").action("form-cancel").child("Cancel"))
			.child(
				button()
					.class("btn btn-primary")
					.action("form-submit")
					.child(submit.to_string()),
			)
			.into_view()
	}
}

fn failure_message(error: &ApiError, conflict_message: &str) -> String {
	if error.is_conflict() {
		conflict_message.to_string()
	} else {
		error.detail().unwrap_or(messages::GENERIC_ERROR).to_string()
	}
}

/// Create/edit form for a provider
pub struct ProviderForm {
	id: Option<i64>,
	initial: Option<ProviderInput>,
	name: String,
	description: String,
	status: FormStatus,
}

impl ProviderForm {
	pub fn create() -> Self {
		Self {
			id: None,
			initial: None,
			name: String::new(),
			description: String::new(),
			status: FormStatus::default(),
		}
	}

	pub fn edit(provider: &Provider) -> Self {
		Self {
			id: provider.id,
			initial: Some(ProviderInput {
				name: provider.name.clone(),
				description: provider.description.clone(),
			}),
			name: provider.name.clone(),
			description: provider.description.clone(),
			status: FormStatus::default(),
		}
	}

	/// Run `callback` after every successful save
	pub fn on_saved<F>(mut self, callback: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.status.on_saved = Some(Arc::new(callback));
		self
	}

	pub fn is_edit(&self) -> bool {
		self.id.is_some()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
		self.status.errors.remove("name");
	}

	pub fn set_description(&mut self, description: impl Into<String>) {
		self.description = description.into();
		self.status.errors.remove("description");
	}

	pub fn field_error(&self, field: &str) -> Option<&str> {
		self.status.errors.get(field).map(String::as_str)
	}

	pub fn form_error(&self) -> Option<&str> {
		self.status.form_error.as_deref()
	}

	/// Check required fields, recording an error per failing field
	pub fn validate(&mut self) -> bool {
		self.status.errors.clear();
		if self.name.trim().is_empty() {
			self.status.errors.insert("name", messages::NAME_REQUIRED.to_string());
		}
		self.status.errors.is_empty()
	}

	fn input(&self) -> ProviderInput {
		ProviderInput {
			name: self.name.clone(),
			description: self.description.clone(),
		}
	}

	/// Validate, then create or update
	pub async fn submit(&mut self, api: &dyn ReferenceApi, dialogs: &dyn Dialogs) -> FormOutcome {
		if !self.validate() {
			return FormOutcome::Invalid;
		}
		let input = self.input();
		if self.id.is_some() && self.initial.as_ref() == Some(&input) {
			return FormOutcome::Unchanged;
		}

		let result = match self.id {
			Some(id) => api.update_provider(id, &input).await,
			None => api.create_provider(&input).await,
		};
		self.status
			.finish(
				Provider::LABEL,
				messages::PROVIDER_EXISTS,
				self.id.is_none(),
				result.map(|provider| provider.name),
				dialogs,
			)
			.await
	}

	pub fn view(&self) -> View {
		let (title, submit) = if self.is_edit() {
			("Edit provider", "Save changes")
		} else {
			("New provider", "Add")
		};
		self.status.render(
			title,
			submit,
			vec![
				self.status
					.render_field("name", "Provider name", &self.name, "Enter provider name"),
				self.status.render_field(
					"description",
					"Description",
					&self.description,
					"Enter details",
				),
			],
		)
	}
}

/// Create/edit form for a type number
pub struct TypeNumberForm {
	id: Option<i64>,
	initial: Option<TypeNumberInput>,
	name: String,
	expiration: String,
	description: String,
	status: FormStatus,
}

impl TypeNumberForm {
	pub fn create() -> Self {
		Self {
			id: None,
			initial: None,
			name: String::new(),
			expiration: expiration_to_hms(0),
			description: String::new(),
			status: FormStatus::default(),
		}
	}

	pub fn edit(type_number: &TypeNumber) -> Self {
		Self {
			id: type_number.id,
			initial: Some(TypeNumberInput {
				name: type_number.name.clone(),
				description: type_number.description.clone(),
				booking_expiration: type_number.booking_expiration,
			}),
			name: type_number.name.clone(),
			expiration: expiration_to_hms(type_number.booking_expiration),
			description: type_number.description.clone(),
			status: FormStatus::default(),
		}
	}

	/// Run `callback` after every successful save
	pub fn on_saved<F>(mut self, callback: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.status.on_saved = Some(Arc::new(callback));
		self
	}

	pub fn is_edit(&self) -> bool {
		self.id.is_some()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Expiration as shown in the input, `HH.MM.SS` once complete
	pub fn expiration(&self) -> &str {
		&self.expiration
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
		self.status.errors.remove("name");
	}

	/// Store typed expiration text, reformatted as `HH.MM.SS`
	pub fn set_expiration(&mut self, raw: &str) {
		self.expiration = format_expiration_input(raw);
		self.status.errors.remove("booking_expiration");
	}

	pub fn set_description(&mut self, description: impl Into<String>) {
		self.description = description.into();
	}

	pub fn field_error(&self, field: &str) -> Option<&str> {
		self.status.errors.get(field).map(String::as_str)
	}

	pub fn form_error(&self) -> Option<&str> {
		self.status.form_error.as_deref()
	}

	pub fn validate(&mut self) -> bool {
		self.status.errors.clear();
		if self.name.trim().is_empty() {
			self.status.errors.insert("name", messages::NAME_REQUIRED.to_string());
		}
		if parse_expiration(&self.expiration).is_none() {
			self.status
				.errors
				.insert("booking_expiration", messages::EXPIRATION_FORMAT.to_string());
		}
		self.status.errors.is_empty()
	}

	/// Validate, then create or update. The expiration is sent in seconds.
	pub async fn submit(&mut self, api: &dyn ReferenceApi, dialogs: &dyn Dialogs) -> FormOutcome {
		if !self.validate() {
			return FormOutcome::Invalid;
		}
		let Some(booking_expiration) = parse_expiration(&self.expiration) else {
			return FormOutcome::Invalid;
		};
		let input = TypeNumberInput {
			name: self.name.clone(),
			description: self.description.clone(),
			booking_expiration,
		};
		if self.id.is_some() && self.initial.as_ref() == Some(&input) {
			return FormOutcome::Unchanged;
		}

		let result = match self.id {
			Some(id) => api.update_type_number(id, &input).await,
			None => api.create_type_number(&input).await,
		};
		self.status
			.finish(
				TypeNumber::LABEL,
				messages::TYPE_NUMBER_EXISTS,
				self.id.is_none(),
				result.map(|type_number| type_number.name),
				dialogs,
			)
			.await
	}

	pub fn view(&self) -> View {
		let (title, submit) = if self.is_edit() {
			("Edit type number", "Save changes")
		} else {
			("New type number", "Add")
		};
		self.status.render(
			title,
			submit,
			vec![
				self.status
					.render_field("name", "Type name", &self.name, "Enter type name"),
				self.status.render_field(
					"booking_expiration",
					"Booking expiration (HH.MM.SS)",
					&self.expiration,
					"00.00.00",
				),
				self.status.render_field(
					"description",
					"Description",
					&self.description,
					"Enter details",
				),
			],
		)
	}
}
