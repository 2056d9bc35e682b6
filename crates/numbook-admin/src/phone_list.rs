//! Phone-number list coordinator
//!
//! Owns the filter/pagination state of the booking page, keeps it in sync
//! with the URL, and runs list fetches so that only the newest one can
//! write state. Views subscribe to [`ListState`] through a `watch` channel
//! and call back into the coordinator through the handlers attached in
//! [`PhoneListCoordinator::view`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable, Aborted};
use numbook_client::{
	BookingApi, PhoneNumber, PhoneNumberPage, Provider, ReferenceApi, TypeNumber, booked_numbers,
};
use numbook_conf::Settings;
use numbook_pages::html::{button, div, h3, input, option, p, select, span};
use numbook_pages::{EventType, IntoView, View};
use numbook_tables::{
	Action, ColumnDef, DataTable, Pager, RenderHint, RowId, SelectionBinding, SelectionSet,
	TableRow,
};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::dialogs::{AlertLevel, Clipboard, Dialogs};
use crate::error::{AdminError, Result};
use crate::format::{format_datetime, format_thousands};
use crate::messages;
use crate::query::{Location, QueryState};
use crate::search::SearchCommit;
use crate::spawn_task;

/// List row with display-ready fields
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneRow {
	pub id: i64,
	pub phone_number: String,
	pub provider_name: String,
	pub type_name: String,
	pub installation_fee: String,
	pub maintenance_fee: String,
	pub vanity_number_fee: String,
	pub booked_until: String,
	pub status: String,
}

impl From<PhoneNumber> for PhoneRow {
	fn from(phone: PhoneNumber) -> Self {
		Self {
			id: phone.id,
			phone_number: phone.phone_number,
			provider_name: phone.provider_name,
			type_name: phone.type_name,
			installation_fee: format_thousands(phone.installation_fee),
			maintenance_fee: format_thousands(phone.maintenance_fee),
			vanity_number_fee: format_thousands(phone.vanity_number_fee),
			booked_until: phone
				.booked_until
				.as_deref()
				.map(format_datetime)
				.unwrap_or_default(),
			status: phone.status.unwrap_or_default(),
		}
	}
}

impl TableRow for PhoneRow {
	fn row_id(&self) -> RowId {
		RowId::Int(self.id)
	}

	fn field(&self, key: &str) -> Option<String> {
		let value = match key {
			"phone_number" => &self.phone_number,
			"provider_name" => &self.provider_name,
			"type_name" => &self.type_name,
			"installation_fee" => &self.installation_fee,
			"maintenance_fee" => &self.maintenance_fee,
			"vanity_number_fee" => &self.vanity_number_fee,
			"booked_until" => &self.booked_until,
			"status" => &self.status,
			_ => return None,
		};
		Some(value.clone())
	}
}

/// Columns of the booking list
pub fn phone_columns() -> Vec<ColumnDef> {
	vec![
		ColumnDef::new("phone_number", "Phone number"),
		ColumnDef::new("provider_name", "Provider"),
		ColumnDef::new("type_name", "Type").hint(RenderHint::Badge),
		ColumnDef::new("installation_fee", "Installation fee"),
		ColumnDef::new("status", "Status").hint(RenderHint::Badge),
	]
}

/// Why a fetched page has no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
	/// The backend returned nothing
	NoData,
	/// The backend returned rows but client-side filtering removed them all
	FilteredOut,
}

impl EmptyKind {
	pub fn message(&self) -> &'static str {
		match self {
			Self::NoData => messages::NO_DATA,
			Self::FilteredOut => messages::FILTERED_OUT,
		}
	}
}

/// One fetched page, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
	pub rows: Vec<PhoneRow>,
	pub total_pages: u32,
	pub empty: Option<EmptyKind>,
}

impl ListPage {
	/// Normalize a backend page.
	///
	/// Rows without a phone number are dropped, and a non-empty
	/// `type_filter` keeps only rows whose type name matches it
	/// (case-insensitive).
	pub fn from_response(page: PhoneNumberPage, type_filter: &str) -> Self {
		let received = page.phone_numbers.len();
		let type_filter = type_filter.trim().to_lowercase();
		let rows: Vec<PhoneRow> = page
			.phone_numbers
			.into_iter()
			.filter(|phone| !phone.phone_number.trim().is_empty())
			.filter(|phone| {
				type_filter.is_empty() || phone.type_name.trim().to_lowercase() == type_filter
			})
			.map(PhoneRow::from)
			.collect();

		let empty = match (received, rows.is_empty()) {
			(0, _) => Some(EmptyKind::NoData),
			(_, true) => Some(EmptyKind::FilteredOut),
			_ => None,
		};
		Self {
			rows,
			total_pages: page.total_pages,
			empty,
		}
	}
}

/// Published state of the list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
	#[default]
	Idle,
	Fetching {
		previous: Option<ListPage>,
	},
	Fetched(ListPage),
	Failed {
		message: String,
		previous: Option<ListPage>,
	},
}

impl ListState {
	/// Rows to keep showing: the current page, or the one before a
	/// fetch started or failed.
	pub fn page(&self) -> Option<&ListPage> {
		match self {
			Self::Idle => None,
			Self::Fetched(page) => Some(page),
			Self::Fetching { previous } | Self::Failed { previous, .. } => previous.as_ref(),
		}
	}

	pub fn is_fetching(&self) -> bool {
		matches!(self, Self::Fetching { .. })
	}
}

/// Mutation running alongside the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mutation {
	#[default]
	None,
	Booking,
	Deleting,
}

/// Result of [`PhoneListCoordinator::book_selected`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
	Booked { numbers: Vec<String>, copied: bool },
	Declined,
	/// The list was unmounted before the request completed
	Aborted,
}

/// Result of [`PhoneListCoordinator::delete_phone`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
	Deleted,
	Declined,
	/// The list was unmounted before the request completed
	Aborted,
}

/// Tunables of the list page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
	pub page_size: u32,
	pub page_size_reset_offset: u32,
	pub search_debounce: Duration,
}

impl ListConfig {
	pub fn from_settings(settings: &Settings) -> Self {
		Self {
			page_size: settings.default_page_size,
			page_size_reset_offset: settings.page_size_reset_offset,
			search_debounce: settings.search_debounce(),
		}
	}
}

impl Default for ListConfig {
	fn default() -> Self {
		Self::from_settings(&Settings::default())
	}
}

struct Inner {
	query: QueryState,
	search: SearchCommit,
	selection: SelectionSet,
	generation: u64,
	in_flight: Option<AbortHandle>,
	mutation_in_flight: Option<AbortHandle>,
	debounce: Option<JoinHandle<()>>,
	mounted: bool,
	mutation: Mutation,
	providers: Vec<Provider>,
	type_numbers: Vec<TypeNumber>,
	detail: Option<PhoneNumber>,
}

/// Coordinator of the phone-number booking list
pub struct PhoneListCoordinator<A, L> {
	api: Arc<A>,
	location: Arc<L>,
	dialogs: Arc<dyn Dialogs>,
	clipboard: Arc<dyn Clipboard>,
	config: ListConfig,
	inner: Mutex<Inner>,
	state: watch::Sender<ListState>,
}

impl<A, L> PhoneListCoordinator<A, L>
where
	A: BookingApi + ReferenceApi + 'static,
	L: Location + 'static,
{
	pub fn new(
		api: Arc<A>,
		location: Arc<L>,
		dialogs: Arc<dyn Dialogs>,
		clipboard: Arc<dyn Clipboard>,
		config: ListConfig,
	) -> Arc<Self> {
		let (state, _) = watch::channel(ListState::Idle);
		Arc::new(Self {
			api,
			location,
			dialogs,
			clipboard,
			inner: Mutex::new(Inner {
				query: QueryState::with_page_size(config.page_size),
				search: SearchCommit::default(),
				selection: SelectionSet::new(),
				generation: 0,
				in_flight: None,
				mutation_in_flight: None,
				debounce: None,
				mounted: false,
				mutation: Mutation::None,
				providers: Vec::new(),
				type_numbers: Vec::new(),
				detail: None,
			}),
			config,
			state,
		})
	}

	/// Receiver that is notified on every state or side-state change
	pub fn subscribe(&self) -> watch::Receiver<ListState> {
		self.state.subscribe()
	}

	/// Current list state
	pub fn state(&self) -> ListState {
		self.state.borrow().clone()
	}

	pub fn query(&self) -> QueryState {
		self.inner.lock().query.clone()
	}

	pub fn selection(&self) -> SelectionSet {
		self.inner.lock().selection.clone()
	}

	pub fn mutation(&self) -> Mutation {
		self.inner.lock().mutation
	}

	/// Text in the search box, committed or not
	pub fn search_text(&self) -> String {
		self.inner.lock().search.buffer().to_string()
	}

	pub fn providers(&self) -> Vec<Provider> {
		self.inner.lock().providers.clone()
	}

	pub fn type_numbers(&self) -> Vec<TypeNumber> {
		self.inner.lock().type_numbers.clone()
	}

	/// Phone number opened with [`show_detail`](Self::show_detail)
	pub fn detail(&self) -> Option<PhoneNumber> {
		self.inner.lock().detail.clone()
	}

	fn touch(&self) {
		self.state.send_modify(|_| {});
	}

	/// Read the URL, complete it with defaults, then load the filter
	/// options and the first page.
	pub async fn mount(&self) {
		let raw = self.location.query();
		let (query, missing) = QueryState::from_query(&raw, self.config.page_size);
		if missing {
			self.location.replace_query(&query.fill_defaults(&raw));
		}
		tracing::debug!(?query, "mounting phone list");
		{
			let mut inner = self.inner.lock();
			inner.search = SearchCommit::new(query.search.clone());
			inner.query = query;
			inner.mounted = true;
		}
		futures::join!(self.load_options(), self.refresh());
	}

	/// Stop all work. Completions arriving afterwards are discarded.
	pub fn unmount(&self) {
		let mut inner = self.inner.lock();
		inner.mounted = false;
		inner.generation += 1;
		if let Some(handle) = inner.in_flight.take() {
			handle.abort();
		}
		if let Some(handle) = inner.mutation_in_flight.take() {
			handle.abort();
			inner.mutation = Mutation::None;
		}
		if let Some(task) = inner.debounce.take() {
			task.abort();
		}
		tracing::debug!("phone list unmounted");
	}

	async fn load_options(&self) {
		let (providers, type_numbers) =
			futures::join!(self.api.list_providers(), self.api.list_type_numbers());
		{
			let mut inner = self.inner.lock();
			if !inner.mounted {
				return;
			}
			match providers {
				Ok(providers) => inner.providers = providers,
				Err(e) => tracing::warn!(error = %e, "failed to load providers"),
			}
			match type_numbers {
				Ok(type_numbers) => inner.type_numbers = type_numbers,
				Err(e) => tracing::warn!(error = %e, "failed to load type numbers"),
			}
		}
		self.touch();
	}

	/// Fetch the page for the current query, superseding any fetch still
	/// in flight.
	pub async fn refresh(&self) {
		let (generation, query, registration) = {
			let mut inner = self.inner.lock();
			if !inner.mounted {
				return;
			}
			if let Some(handle) = inner.in_flight.take() {
				handle.abort();
			}
			inner.generation += 1;
			let (handle, registration) = AbortHandle::new_pair();
			inner.in_flight = Some(handle);

			let previous = self.state.borrow().page().cloned();
			self.state.send_replace(ListState::Fetching { previous });
			(inner.generation, inner.query.clone(), registration)
		};
		let params = query.list_params();
		tracing::debug!(generation, ?params, "fetching phone numbers");

		let result = Abortable::new(self.api.list_available(&params), registration).await;

		let mut inner = self.inner.lock();
		if !inner.mounted || inner.generation != generation {
			tracing::debug!(generation, "discarding superseded fetch");
			return;
		}
		inner.in_flight = None;
		match result {
			Err(Aborted) => {}
			Ok(Ok(page)) => {
				let page = ListPage::from_response(page, &query.type_number);
				tracing::info!(
					generation,
					rows = page.rows.len(),
					total_pages = page.total_pages,
					"phone numbers loaded"
				);
				inner.selection = SelectionSet::new();
				let url = query.merge_into(&self.location.query());
				self.location.replace_query(&url);
				self.state.send_replace(ListState::Fetched(page));
			}
			Ok(Err(e)) => {
				tracing::warn!(generation, error = %e, "failed to fetch phone numbers");
				let previous = self.state.borrow().page().cloned();
				self.state.send_replace(ListState::Failed {
					message: messages::LOAD_FAILED.to_string(),
					previous,
				});
			}
		}
	}

	async fn update_query(&self, update: impl FnOnce(&mut QueryState)) {
		let changed = {
			let mut inner = self.inner.lock();
			let before = inner.query.clone();
			update(&mut inner.query);
			inner.query != before
		};
		if changed {
			self.refresh().await;
		}
	}

	/// Filter by provider name; empty for all providers
	pub async fn set_provider(&self, provider: impl Into<String>) {
		let provider = provider.into();
		self.update_query(|q| q.provider = provider).await;
	}

	/// Filter by type-number name; empty for all types
	pub async fn set_type_filter(&self, type_number: impl Into<String>) {
		let type_number = type_number.into();
		self.update_query(|q| q.type_number = type_number).await;
	}

	/// Go to a page, keeping the page size
	pub async fn set_page(&self, page: u32) {
		self.update_query(|q| q.offset = page).await;
	}

	/// Change the page size. The offset goes back to the configured reset
	/// value.
	pub async fn set_page_size(&self, size: u32) {
		if size == 0 {
			return;
		}
		let reset = self.config.page_size_reset_offset;
		self.update_query(|q| {
			q.quantity = size;
			q.offset = reset;
		})
		.await;
	}

	/// Record a keystroke in the search box and restart the debounce timer
	pub fn input_search(self: &Arc<Self>, text: impl Into<String>) {
		let mut inner = self.inner.lock();
		let seq = inner.search.input(text);
		if let Some(task) = inner.debounce.take() {
			task.abort();
		}
		let Ok(runtime) = tokio::runtime::Handle::try_current() else {
			return;
		};
		let this = Arc::clone(self);
		let delay = self.config.search_debounce;
		inner.debounce = Some(runtime.spawn(async move {
			tokio::time::sleep(delay).await;
			let committed = {
				let mut inner = this.inner.lock();
				if inner.search.seq() == seq {
					inner.debounce = None;
				}
				inner.search.commit_if_current(seq)
			};
			if let Some(search) = committed {
				this.apply_search(search).await;
			}
		}));
	}

	/// Commit the search box now (Enter)
	pub async fn commit_search(&self) {
		let committed = {
			let mut inner = self.inner.lock();
			if let Some(task) = inner.debounce.take() {
				task.abort();
			}
			inner.search.commit()
		};
		if let Some(search) = committed {
			self.apply_search(search).await;
		}
	}

	async fn apply_search(&self, search: String) {
		tracing::debug!(%search, "search committed");
		self.inner.lock().query.search = search;
		self.refresh().await;
	}

	/// Replace the selection
	pub fn set_selection(&self, selection: SelectionSet) {
		self.inner.lock().selection = selection;
		self.touch();
	}

	fn is_mounted(&self) -> bool {
		self.inner.lock().mounted
	}

	/// Send a booking or delete request that [`unmount`](Self::unmount)
	/// can cancel. Returns `None` when the list is (or becomes) unmounted;
	/// the mutation flag is then left as it was.
	async fn run_mutation<T>(
		&self,
		mutation: Mutation,
		request: impl Future<Output = T>,
	) -> Option<T> {
		let registration = {
			let mut inner = self.inner.lock();
			if !inner.mounted {
				return None;
			}
			let (handle, registration) = AbortHandle::new_pair();
			inner.mutation_in_flight = Some(handle);
			inner.mutation = mutation;
			registration
		};
		self.touch();

		let result = Abortable::new(request, registration).await;
		{
			let mut inner = self.inner.lock();
			if !inner.mounted || result.is_err() {
				tracing::debug!(?mutation, "discarding mutation after unmount");
				return None;
			}
			inner.mutation_in_flight = None;
			inner.mutation = Mutation::None;
		}
		self.touch();
		result.ok()
	}

	/// Book every selected phone number.
	///
	/// Rows are left as they are on success; the backend's next listing
	/// drops the booked numbers.
	pub async fn book_selected(&self) -> Result<BookingOutcome> {
		let ids = self.inner.lock().selection.ids();
		if ids.is_empty() {
			self.dialogs
				.alert(AlertLevel::Warning, messages::BOOK_TITLE, messages::SELECT_AT_LEAST_ONE)
				.await;
			return Err(AdminError::Validation(messages::SELECT_AT_LEAST_ONE.to_string()));
		}

		let question = format!("Book {} selected phone number(s)?", ids.len());
		if !self.dialogs.confirm(messages::BOOK_TITLE, &question).await {
			return Ok(BookingOutcome::Declined);
		}

		let Some(result) = self.run_mutation(Mutation::Booking, self.api.book(&ids)).await else {
			return Ok(BookingOutcome::Aborted);
		};

		match result {
			Ok(body) => {
				let mut numbers = booked_numbers(&body);
				if numbers.is_empty() {
					numbers = self
						.state
						.borrow()
						.page()
						.map(|page| {
							page.rows
								.iter()
								.filter(|row| ids.contains(&row.id))
								.map(|row| row.phone_number.clone())
								.collect()
						})
						.unwrap_or_default();
				}
				tracing::info!(count = ids.len(), "phone numbers booked");
				self.set_selection(SelectionSet::new());

				let text = numbers.join("\n");
				let copied = self.dialogs.offer_copy(messages::BOOKED_TITLE, &text).await
					&& self.is_mounted()
					&& self.copy_to_clipboard(&text).await;
				Ok(BookingOutcome::Booked { numbers, copied })
			}
			Err(e) if e.is_quota_exceeded() => {
				tracing::warn!(error = %e, "booking quota exceeded");
				self.dialogs
					.alert(AlertLevel::Error, messages::BOOK_TITLE, messages::QUOTA_EXCEEDED)
					.await;
				Err(e.into())
			}
			Err(e) => {
				tracing::error!(error = %e, "booking failed");
				let message = e.detail().unwrap_or(messages::BOOK_FAILED).to_string();
				self.dialogs
					.alert(AlertLevel::Error, messages::BOOK_TITLE, &message)
					.await;
				self.refresh().await;
				Err(e.into())
			}
		}
	}

	async fn copy_to_clipboard(&self, text: &str) -> bool {
		match self.clipboard.write_text(text) {
			Ok(()) => true,
			Err(e) => {
				tracing::warn!(error = %e, "clipboard write failed");
				self.dialogs
					.alert(AlertLevel::Error, messages::BOOKED_TITLE, &e)
					.await;
				false
			}
		}
	}

	/// Delete one phone number after confirmation
	pub async fn delete_phone(&self, id: &RowId) -> Result<DeleteOutcome> {
		let Some(id) = id.as_numeric() else {
			tracing::warn!(%id, "refusing to delete non-numeric id");
			self.dialogs
				.alert(AlertLevel::Error, messages::DELETE_TITLE, messages::INVALID_ID)
				.await;
			return Err(AdminError::Validation(messages::INVALID_ID.to_string()));
		};

		if !self
			.dialogs
			.confirm(messages::DELETE_TITLE, messages::DELETE_CONFIRM)
			.await
		{
			return Ok(DeleteOutcome::Declined);
		}

		let Some(result) = self
			.run_mutation(Mutation::Deleting, self.api.delete_phone(id))
			.await
		else {
			return Ok(DeleteOutcome::Aborted);
		};

		match result {
			Ok(()) => {
				tracing::info!(id, "phone number deleted");
				self.dialogs
					.alert(AlertLevel::Success, messages::DELETE_TITLE, messages::DELETED)
					.await;
				self.refresh().await;
				Ok(DeleteOutcome::Deleted)
			}
			Err(e) => {
				tracing::warn!(id, error = %e, "failed to delete phone number");
				let message = e.detail().unwrap_or(messages::DELETE_FAILED).to_string();
				self.dialogs
					.alert(AlertLevel::Error, messages::DELETE_TITLE, &message)
					.await;
				Err(e.into())
			}
		}
	}

	/// Load one phone number for the detail panel
	pub async fn show_detail(&self, id: i64) -> Result<PhoneNumber> {
		match self.api.phone_by_id(id).await {
			Ok(phone) => {
				self.inner.lock().detail = Some(phone.clone());
				self.touch();
				Ok(phone)
			}
			Err(e) => {
				tracing::warn!(id, error = %e, "failed to load phone number");
				let message = e.detail().unwrap_or(messages::GENERIC_ERROR).to_string();
				self.dialogs
					.alert(AlertLevel::Error, messages::DETAIL_TITLE, &message)
					.await;
				Err(e.into())
			}
		}
	}

	pub fn close_detail(&self) {
		self.inner.lock().detail = None;
		self.touch();
	}

	/// Render the page: filters, table, pagination and detail panel.
	///
	/// `data-action` keys: `search` (key down commits), `provider:{name}`,
	/// `type-number:{name}`, `book`, `detail:{id}` (through the table's
	/// `action:` prefix), `delete:{id}`, the pager keys and `detail-close`.
	pub fn view(self: &Arc<Self>) -> View {
		let state = self.state();
		let (query, selection, mutation, search, providers, type_numbers, detail) = {
			let inner = self.inner.lock();
			(
				inner.query.clone(),
				inner.selection.clone(),
				inner.mutation,
				inner.search.buffer().to_string(),
				inner.providers.clone(),
				inner.type_numbers.clone(),
				inner.detail.clone(),
			)
		};

		let filters = div()
			.class("phone-filters")
			.child(self.search_box(search))
			.child(self.option_select(
				"provider",
				&query.provider,
				providers.into_iter().map(|p| p.name).collect(),
			))
			.child(self.option_select(
				"type-number",
				&query.type_number,
				type_numbers.into_iter().map(|t| t.name).collect(),
			))
			.child(self.book_button(mutation == Mutation::Booking));

		let page = state.page().cloned();
		let failure = match &state {
			ListState::Failed { message, .. } => Some(p().class("list-error").child(message.clone())),
			_ => None,
		};

		let this = Arc::clone(self);
		let on_selection = move |selection: SelectionSet| this.set_selection(selection);
		let this = Arc::clone(self);
		let on_detail = move |row: &PhoneRow| {
			let this = Arc::clone(&this);
			let id = row.id;
			spawn_task(async move {
				let _ = this.show_detail(id).await;
			});
		};
		let this = Arc::clone(self);
		let on_delete = move |id: RowId| {
			let this = Arc::clone(&this);
			spawn_task(async move {
				let _ = this.delete_phone(&id).await;
			});
		};

		let table = DataTable::new(phone_columns())
			.title("Phone numbers")
			.rows(page.as_ref().map(|p| p.rows.clone()).unwrap_or_default())
			.loading(state.is_fetching())
			.empty_message(page.as_ref().and_then(|p| p.empty).map(|e| e.message().to_string()))
			.selection(SelectionBinding::new(selection, on_selection))
			.action(Action::new("detail", "View", on_detail).class("btn-info"))
			.on_delete(on_delete)
			.render();

		let this = Arc::clone(self);
		let on_page = Arc::new(move |index: u32| {
			let this = Arc::clone(&this);
			spawn_task(async move { this.set_page(index).await });
		});
		let this = Arc::clone(self);
		let on_page_size = Arc::new(move |size: u32| {
			let this = Arc::clone(&this);
			spawn_task(async move { this.set_page_size(size).await });
		});
		let pager = Pager::new(
			query.offset,
			query.quantity,
			page.map(|p| p.total_pages).unwrap_or_default(),
		)
		.render(on_page, on_page_size);

		div()
			.class("phone-list")
			.child(filters)
			.child(failure)
			.child(table)
			.child(pager)
			.child(detail.map(|phone| self.detail_panel(phone)))
			.into_view()
	}

	fn search_box(self: &Arc<Self>, search: String) -> View {
		let this = Arc::clone(self);
		input()
			.attr("type", "text")
			.attr("placeholder", "Search by prefix...")
			.attr("value", search)
			.action("search")
			.on(
				EventType::KeyDown,
				Arc::new(move || {
					let this = Arc::clone(&this);
					spawn_task(async move { this.commit_search().await });
				}),
			)
			.into_view()
	}

	fn option_select(self: &Arc<Self>, kind: &'static str, current: &str, names: Vec<String>) -> View {
		let choices = std::iter::once((String::new(), "All".to_string()))
			.chain(names.into_iter().map(|name| (name.clone(), name)));
		let options: Vec<View> = choices
			.map(|(value, label)| {
				let this = Arc::clone(self);
				let selected = value == current;
				option()
					.attr("value", value.clone())
					.attr_if(selected, "selected")
					.action(format!("{kind}:{value}"))
					.on_click(move || {
						let this = Arc::clone(&this);
						let value = value.clone();
						spawn_task(async move {
							if kind == "provider" {
								this.set_provider(value).await;
							} else {
								this.set_type_filter(value).await;
							}
						});
					})
					.child(label)
					.into_view()
			})
			.collect();
		select().class(format!("{kind}-filter")).children(options).into_view()
	}

	fn book_button(self: &Arc<Self>, busy: bool) -> View {
		let mut book = button().class("btn btn-primary").action("book").child("Book");
		if busy {
			book = book.attr_if(true, "disabled");
		} else {
			let this = Arc::clone(self);
			book = book.on_click(move || {
				let this = Arc::clone(&this);
				spawn_task(async move {
					let _ = this.book_selected().await;
				});
			});
		}
		book.into_view()
	}

	fn detail_panel(self: &Arc<Self>, phone: PhoneNumber) -> View {
		let row = PhoneRow::from(phone);
		let fields = [
			("Phone number", row.phone_number),
			("Provider", row.provider_name),
			("Type", row.type_name),
			("Installation fee", row.installation_fee),
			("Maintenance fee", row.maintenance_fee),
			("Vanity number fee", row.vanity_number_fee),
			("Booked until", row.booked_until),
			("Status", row.status),
		];
		let this = Arc::clone(self);
		div()
			.class("phone-detail")
			.child(h3().child(messages::DETAIL_TITLE))
			.children(fields.into_iter().map(|(label, value)| {
				p().child(span().class("label").child(label)).child(value)
			}))
			.child(
				button()
					.action("detail-close")
					.child("Close")
					.on_click(move || this.close_detail()),
			)
			.into_view()
	}
}

impl<A, L> Drop for PhoneListCoordinator<A, L> {
	fn drop(&mut self) {
		let inner = self.inner.get_mut();
		if let Some(handle) = inner.in_flight.take() {
			handle.abort();
		}
		if let Some(handle) = inner.mutation_in_flight.take() {
			handle.abort();
		}
		if let Some(task) = inner.debounce.take() {
			task.abort();
		}
	}
}
