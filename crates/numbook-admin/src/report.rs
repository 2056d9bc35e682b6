//! Booking report drill-down
//!
//! Loads the booked/deployed counts for a period and, when a slice is
//! selected, a paginated list of the numbers behind it. Chart drawing is
//! left to the host; the coordinator only renders the counts as buttons.

use std::sync::Arc;

use numbook_client::{ReportApi, ReportCounts, ReportDetail, ReportPeriod, ReportSlice};
use numbook_pages::html::{button, div, p, span};
use numbook_pages::{IntoView, View};
use numbook_tables::{ColumnDef, DataTable, Pager, RowId, TableRow};
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::format::{format_datetime_or_zero, format_thousands};
use crate::messages;
use crate::spawn_task;

/// Display label of a slice
pub fn slice_label(slice: ReportSlice) -> &'static str {
	match slice {
		ReportSlice::Booked => "Booked",
		ReportSlice::Released => "Released",
	}
}

/// Count of a slice in `counts`
pub fn slice_count(counts: &ReportCounts, slice: ReportSlice) -> u64 {
	match slice {
		ReportSlice::Booked => counts.booked,
		ReportSlice::Released => counts.deployed,
	}
}

/// Detail row with display-ready fields. Missing dates render as `"0"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
	id: RowId,
	fields: Vec<(&'static str, String)>,
}

impl From<ReportDetail> for ReportRow {
	fn from(detail: ReportDetail) -> Self {
		let id = detail
			.id
			.map(RowId::Int)
			.unwrap_or_else(|| RowId::Text(detail.phone_number.clone()));
		let fields = vec![
			("user_name", detail.user_name),
			("phone_number", detail.phone_number),
			("provider_name", detail.provider_name),
			("type_name", detail.type_name),
			("installation_fee", format_thousands(detail.installation_fee)),
			("maintenance_fee", format_thousands(detail.maintenance_fee)),
			("vanity_number_fee", format_thousands(detail.vanity_number_fee)),
			("booked_until", format_datetime_or_zero(detail.booked_until.as_deref())),
			("booked_at", format_datetime_or_zero(detail.booked_at.as_deref())),
			("released_at", format_datetime_or_zero(detail.released_at.as_deref())),
			("user_name_release", detail.user_name_release.unwrap_or_default()),
			("contract_code", detail.contract_code.unwrap_or_default()),
		];
		Self { id, fields }
	}
}

impl TableRow for ReportRow {
	fn row_id(&self) -> RowId {
		self.id.clone()
	}

	fn field(&self, key: &str) -> Option<String> {
		self.fields
			.iter()
			.find(|(k, _)| *k == key)
			.map(|(_, v)| v.clone())
	}
}

/// Columns of the detail list. Released numbers add release details.
pub fn report_columns(slice: ReportSlice) -> Vec<ColumnDef> {
	let mut columns = vec![
		ColumnDef::new("user_name", "Booked by"),
		ColumnDef::new("phone_number", "Phone number"),
		ColumnDef::new("provider_name", "Provider"),
		ColumnDef::new("type_name", "Type"),
		ColumnDef::new("installation_fee", "Installation fee"),
		ColumnDef::new("maintenance_fee", "Maintenance fee"),
		ColumnDef::new("vanity_number_fee", "Vanity number fee"),
		ColumnDef::new("booked_until", "Booked until"),
		ColumnDef::new("booked_at", "Booked at"),
	];
	if slice == ReportSlice::Released {
		columns.extend([
			ColumnDef::new("released_at", "Released at"),
			ColumnDef::new("user_name_release", "Released by"),
			ColumnDef::new("contract_code", "Contract code"),
		]);
	}
	columns
}

/// Drill-down list state
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDetailState {
	pub slice: ReportSlice,
	pub open: bool,
	pub limit: u32,
	pub offset: u32,
	pub total_pages: u32,
	pub rows: Vec<ReportRow>,
	pub loading: bool,
	pub error: Option<String>,
}

struct ReportInner {
	period: ReportPeriod,
	counts: Option<ReportCounts>,
	error: Option<String>,
	detail: Option<ReportDetailState>,
	counts_generation: u64,
	detail_generation: u64,
}

/// Coordinator of the status report
pub struct ReportCoordinator<A> {
	api: Arc<A>,
	page_size: u32,
	inner: Mutex<ReportInner>,
	changed: watch::Sender<u64>,
}

impl<A: ReportApi + 'static> ReportCoordinator<A> {
	/// `page_size` is the initial detail page size
	pub fn new(api: Arc<A>, period: ReportPeriod, page_size: u32) -> Arc<Self> {
		let (changed, _) = watch::channel(0);
		Arc::new(Self {
			api,
			page_size,
			inner: Mutex::new(ReportInner {
				period,
				counts: None,
				error: None,
				detail: None,
				counts_generation: 0,
				detail_generation: 0,
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

	pub fn period(&self) -> ReportPeriod {
		self.inner.lock().period
	}

	pub fn counts(&self) -> Option<ReportCounts> {
		self.inner.lock().counts
	}

	pub fn error(&self) -> Option<String> {
		self.inner.lock().error.clone()
	}

	pub fn detail(&self) -> Option<ReportDetailState> {
		self.inner.lock().detail.clone()
	}

	/// Whether the loaded counts add up to zero
	pub fn has_no_data(&self) -> bool {
		self.inner
			.lock()
			.counts
			.is_none_or(|counts| counts.total() == 0)
	}

	/// Switch to `period` and reload the counts, and the open detail list
	pub async fn load_counts(&self, period: ReportPeriod) {
		let (generation, detail_open) = {
			let mut inner = self.inner.lock();
			inner.period = period;
			inner.counts_generation += 1;
			(
				inner.counts_generation,
				inner.detail.as_ref().is_some_and(|d| d.open),
			)
		};

		let result = self.api.dashboard(period).await;
		{
			let mut inner = self.inner.lock();
			if inner.counts_generation != generation {
				return;
			}
			match result {
				Ok(counts) => {
					tracing::debug!(?period, booked = counts.booked, deployed = counts.deployed, "report counts loaded");
					inner.counts = Some(counts);
					inner.error = None;
				}
				Err(e) => {
					tracing::warn!(?period, error = %e, "failed to load report counts");
					inner.counts = None;
					inner.error = Some(e.detail().unwrap_or(messages::GENERIC_ERROR).to_string());
				}
			}
		}
		self.touch();

		if detail_open {
			self.fetch_detail().await;
		}
	}

	/// Open the detail list for `slice`.
	///
	/// Re-selecting the slice shown last keeps its page; another slice
	/// starts from page 0. The page size carries over.
	pub async fn select_slice(&self, slice: ReportSlice) {
		{
			let mut inner = self.inner.lock();
			let page_size = self.page_size;
			let detail = inner.detail.get_or_insert_with(|| ReportDetailState {
				slice,
				open: true,
				limit: page_size,
				offset: 0,
				total_pages: 0,
				rows: Vec::new(),
				loading: false,
				error: None,
			});
			if detail.slice != slice {
				detail.slice = slice;
				detail.offset = 0;
				detail.rows.clear();
				detail.total_pages = 0;
			}
			detail.open = true;
		}
		self.fetch_detail().await;
	}

	/// Go to a detail page
	pub async fn set_page(&self, offset: u32) {
		if self.update_detail(|detail| detail.offset = offset) {
			self.fetch_detail().await;
		}
	}

	/// Change the detail page size, starting again from page 0
	pub async fn set_limit(&self, limit: u32) {
		if limit == 0 {
			return;
		}
		if self.update_detail(|detail| {
			detail.limit = limit;
			detail.offset = 0;
		}) {
			self.fetch_detail().await;
		}
	}

	/// Hide the detail list, remembering slice and page
	pub fn close(&self) {
		{
			let mut inner = self.inner.lock();
			inner.detail_generation += 1;
			if let Some(detail) = inner.detail.as_mut() {
				detail.open = false;
				detail.loading = false;
			}
		}
		self.touch();
	}

	fn update_detail(&self, update: impl FnOnce(&mut ReportDetailState)) -> bool {
		let mut inner = self.inner.lock();
		match inner.detail.as_mut() {
			Some(detail) if detail.open => {
				update(detail);
				true
			}
			_ => false,
		}
	}

	async fn fetch_detail(&self) {
		let request = {
			let mut inner = self.inner.lock();
			inner.detail_generation += 1;
			let generation = inner.detail_generation;
			let period = inner.period;
			inner.detail.as_mut().filter(|d| d.open).map(|detail| {
				detail.loading = true;
				detail.error = None;
				(generation, period, detail.slice, detail.limit, detail.offset)
			})
		};
		let Some((generation, period, slice, limit, offset)) = request else {
			return;
		};
		self.touch();

		let result = self.api.report_detail(slice, period, limit, offset).await;
		{
			let mut inner = self.inner.lock();
			if inner.detail_generation != generation {
				return;
			}
			let Some(detail) = inner.detail.as_mut() else {
				return;
			};
			detail.loading = false;
			match result {
				Ok(page) => {
					tracing::debug!(slice = slice.as_str(), rows = page.data.len(), "report detail loaded");
					detail.rows = page.data.into_iter().map(ReportRow::from).collect();
					detail.total_pages = page.total_pages;
				}
				Err(e) => {
					tracing::warn!(slice = slice.as_str(), error = %e, "failed to load report detail");
					detail.error = Some(e.detail().unwrap_or(messages::GENERIC_ERROR).to_string());
				}
			}
		}
		self.touch();
	}

	/// Render counts as slice buttons (`slice:booked`, `slice:released`)
	/// and the open detail list with its pager and `report-close` button.
	pub fn view(self: &Arc<Self>) -> View {
		let (counts, error, detail) = {
			let inner = self.inner.lock();
			(inner.counts, inner.error.clone(), inner.detail.clone())
		};

		let summary = match (error, counts) {
			(Some(message), _) => p().class("report-error").child(message).into_view(),
			(None, Some(counts)) if counts.total() > 0 => div()
				.class("report-slices")
				.children([ReportSlice::Booked, ReportSlice::Released].map(|slice| {
					let this = Arc::clone(self);
					button()
						.class("report-slice")
						.action(format!("slice:{}", slice.as_str()))
						.child(span().child(slice_label(slice)))
						.child(span().class("count").child(slice_count(&counts, slice).to_string()))
						.on_click(move || {
							let this = Arc::clone(&this);
							spawn_task(async move { this.select_slice(slice).await });
						})
				}))
				.into_view(),
			_ => p().class("report-empty").child(messages::REPORT_NO_DATA).into_view(),
		};

		let detail = detail.filter(|d| d.open).map(|detail| {
			let table = DataTable::new(report_columns(detail.slice))
				.title(format!("{} numbers", slice_label(detail.slice)))
				.rows(detail.rows)
				.loading(detail.loading)
				.error(detail.error)
				.empty_message(Some(messages::REPORT_NO_DATA.to_string()))
				.render();

			let this = Arc::clone(self);
			let on_page = Arc::new(move |offset: u32| {
				let this = Arc::clone(&this);
				spawn_task(async move { this.set_page(offset).await });
			});
			let this = Arc::clone(self);
			let on_limit = Arc::new(move |limit: u32| {
				let this = Arc::clone(&this);
				spawn_task(async move { this.set_limit(limit).await });
			});
			let mut pager = Pager::new(detail.offset, detail.limit, detail.total_pages);
			pager.page_sizes = vec![5, 10, 20, 50];

			let this = Arc::clone(self);
			div()
				.class("report-detail")
				.child(table)
				.child(pager.render(on_page, on_limit))
				.child(
					button()
						.action("report-close")
						.child("Close")
						.on_click(move || this.close()),
				)
		});

		div()
			.class("report")
			.child(summary)
			.child(detail)
			.into_view()
	}
}
