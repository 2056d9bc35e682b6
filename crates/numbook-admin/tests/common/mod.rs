//! In-memory backend and dialogs shared by the admin integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use numbook_admin::{AlertLevel, Dialogs, ListConfig};
use numbook_client::{
	ApiError, BookingApi, ListParams, PhoneNumber, PhoneNumberInput, PhoneNumberPage, Provider,
	ProviderInput, ReferenceApi, ReportApi, ReportCounts, ReportDetail, ReportPage, ReportPeriod,
	ReportSlice, Result, TypeNumber, TypeNumberInput,
};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

/// Backend call as recorded by [`FakeBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	List(ListParams),
	Book(Vec<i64>),
	DeletePhone(i64),
	PhoneById(i64),
	ListProviders,
	CreateProvider(ProviderInput),
	UpdateProvider(i64, ProviderInput),
	DeleteProvider(i64),
	ListTypeNumbers,
	CreateTypeNumber(TypeNumberInput),
	UpdateTypeNumber(i64, TypeNumberInput),
	DeleteTypeNumber(i64),
	Dashboard(ReportPeriod),
	ReportDetail {
		slice: ReportSlice,
		period: ReportPeriod,
		limit: u32,
		offset: u32,
	},
}

/// Scripted reply to a list request
pub enum ListReply {
	Ready(Result<PhoneNumberPage>),
	Deferred(oneshot::Receiver<Result<PhoneNumberPage>>),
}

#[derive(Default)]
pub struct FakeBackend {
	calls: Mutex<Vec<Call>>,
	list_replies: Mutex<VecDeque<ListReply>>,
	pub book_result: Mutex<Option<Result<Value>>>,
	book_gate: Mutex<Option<oneshot::Receiver<()>>>,
	pub delete_error: Mutex<Option<ApiError>>,
	pub save_error: Mutex<Option<ApiError>>,
	pub providers: Mutex<Vec<Provider>>,
	pub type_numbers: Mutex<Vec<TypeNumber>>,
	pub counts: Mutex<ReportCounts>,
	pub detail_pages: Mutex<u32>,
}

impl FakeBackend {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().clone()
	}

	pub fn list_calls(&self) -> Vec<ListParams> {
		self.calls
			.lock()
			.iter()
			.filter_map(|call| match call {
				Call::List(params) => Some(params.clone()),
				_ => None,
			})
			.collect()
	}

	pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
		self.calls.lock().iter().filter(|call| matches(call)).count()
	}

	pub fn push_list(&self, reply: ListReply) {
		self.list_replies.lock().push_back(reply);
	}

	pub fn push_page(&self, page: PhoneNumberPage) {
		self.push_list(ListReply::Ready(Ok(page)));
	}

	/// Queue a list reply that resolves when the returned sender fires
	pub fn defer_list(&self) -> oneshot::Sender<Result<PhoneNumberPage>> {
		let (tx, rx) = oneshot::channel();
		self.push_list(ListReply::Deferred(rx));
		tx
	}

	/// Keep the next booking request pending until the returned sender
	/// fires or is dropped
	pub fn hold_book(&self) -> oneshot::Sender<()> {
		let (tx, rx) = oneshot::channel();
		*self.book_gate.lock() = Some(rx);
		tx
	}

	fn record(&self, call: Call) {
		self.calls.lock().push(call);
	}

	fn save_result(&self) -> Result<()> {
		match self.save_error.lock().clone() {
			Some(error) => Err(error),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl BookingApi for FakeBackend {
	async fn list_available(&self, params: &ListParams) -> Result<PhoneNumberPage> {
		self.record(Call::List(params.clone()));
		let reply = self.list_replies.lock().pop_front();
		match reply {
			Some(ListReply::Ready(result)) => result,
			Some(ListReply::Deferred(rx)) => rx
				.await
				.unwrap_or_else(|_| Err(ApiError::Network("reply dropped".into()))),
			None => Ok(PhoneNumberPage::default()),
		}
	}

	async fn book(&self, ids: &[i64]) -> Result<Value> {
		self.record(Call::Book(ids.to_vec()));
		let gate = self.book_gate.lock().take();
		if let Some(gate) = gate {
			let _ = gate.await;
		}
		self.book_result.lock().clone().unwrap_or(Ok(Value::Null))
	}

	async fn delete_phone(&self, id: i64) -> Result<()> {
		self.record(Call::DeletePhone(id));
		match self.delete_error.lock().clone() {
			Some(error) => Err(error),
			None => Ok(()),
		}
	}

	async fn phone_by_id(&self, id: i64) -> Result<PhoneNumber> {
		self.record(Call::PhoneById(id));
		Ok(phone(id, &format!("09000000{id:02}"), "VIP"))
	}

	async fn create_phone(&self, input: &PhoneNumberInput) -> Result<PhoneNumber> {
		Ok(phone(1, &input.phone_number, "VIP"))
	}

	async fn update_phone(&self, id: i64, input: &PhoneNumberInput) -> Result<PhoneNumber> {
		Ok(phone(id, &input.phone_number, "VIP"))
	}

	async fn upload_phone_numbers(&self, _file_name: &str, _content: Vec<u8>) -> Result<Value> {
		Ok(Value::Null)
	}

	async fn quantity_available(&self) -> Result<u64> {
		Ok(0)
	}

	async fn booking_for_option(
		&self,
		_option: &str,
		_quantity: u32,
		_offset: u32,
	) -> Result<PhoneNumberPage> {
		Ok(PhoneNumberPage::default())
	}
}

#[async_trait]
impl ReferenceApi for FakeBackend {
	async fn list_providers(&self) -> Result<Vec<Provider>> {
		self.record(Call::ListProviders);
		Ok(self.providers.lock().clone())
	}

	async fn provider_by_id(&self, id: i64) -> Result<Provider> {
		self.providers
			.lock()
			.iter()
			.find(|p| p.id == Some(id))
			.cloned()
			.ok_or(ApiError::Status {
				status: 404,
				detail: None,
			})
	}

	async fn create_provider(&self, input: &ProviderInput) -> Result<Provider> {
		self.record(Call::CreateProvider(input.clone()));
		self.save_result()?;
		Ok(Provider {
			id: Some(100),
			name: input.name.clone(),
			description: input.description.clone(),
		})
	}

	async fn update_provider(&self, id: i64, input: &ProviderInput) -> Result<Provider> {
		self.record(Call::UpdateProvider(id, input.clone()));
		self.save_result()?;
		Ok(Provider {
			id: Some(id),
			name: input.name.clone(),
			description: input.description.clone(),
		})
	}

	async fn delete_provider(&self, id: i64) -> Result<()> {
		self.record(Call::DeleteProvider(id));
		match self.delete_error.lock().clone() {
			Some(error) => Err(error),
			None => Ok(()),
		}
	}

	async fn list_type_numbers(&self) -> Result<Vec<TypeNumber>> {
		self.record(Call::ListTypeNumbers);
		Ok(self.type_numbers.lock().clone())
	}

	async fn type_number_by_id(&self, id: i64) -> Result<TypeNumber> {
		self.type_numbers
			.lock()
			.iter()
			.find(|t| t.id == Some(id))
			.cloned()
			.ok_or(ApiError::Status {
				status: 404,
				detail: None,
			})
	}

	async fn create_type_number(&self, input: &TypeNumberInput) -> Result<TypeNumber> {
		self.record(Call::CreateTypeNumber(input.clone()));
		self.save_result()?;
		Ok(TypeNumber {
			id: Some(200),
			name: input.name.clone(),
			description: input.description.clone(),
			booking_expiration: input.booking_expiration,
		})
	}

	async fn update_type_number(&self, id: i64, input: &TypeNumberInput) -> Result<TypeNumber> {
		self.record(Call::UpdateTypeNumber(id, input.clone()));
		self.save_result()?;
		Ok(TypeNumber {
			id: Some(id),
			name: input.name.clone(),
			description: input.description.clone(),
			booking_expiration: input.booking_expiration,
		})
	}

	async fn delete_type_number(&self, id: i64) -> Result<()> {
		self.record(Call::DeleteTypeNumber(id));
		Ok(())
	}
}

#[async_trait]
impl ReportApi for FakeBackend {
	async fn dashboard(&self, period: ReportPeriod) -> Result<ReportCounts> {
		self.record(Call::Dashboard(period));
		Ok(*self.counts.lock())
	}

	async fn report_detail(
		&self,
		slice: ReportSlice,
		period: ReportPeriod,
		limit: u32,
		offset: u32,
	) -> Result<ReportPage> {
		self.record(Call::ReportDetail {
			slice,
			period,
			limit,
			offset,
		});
		Ok(ReportPage {
			data: vec![ReportDetail {
				id: Some(i64::from(offset)),
				phone_number: format!("09{offset:08}"),
				..ReportDetail::default()
			}],
			total_pages: *self.detail_pages.lock(),
		})
	}
}

/// Dialog interaction as recorded by [`ScriptedDialogs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
	Alert(AlertLevel, String, String),
	Confirm(String),
	OfferCopy(String),
}

/// Dialogs answering confirmations and copy offers from fixed values
pub struct ScriptedDialogs {
	pub confirm_answer: Mutex<bool>,
	pub copy_answer: Mutex<bool>,
	events: Mutex<Vec<DialogEvent>>,
}

impl ScriptedDialogs {
	pub fn new(confirm: bool, copy: bool) -> Arc<Self> {
		Arc::new(Self {
			confirm_answer: Mutex::new(confirm),
			copy_answer: Mutex::new(copy),
			events: Mutex::new(Vec::new()),
		})
	}

	pub fn events(&self) -> Vec<DialogEvent> {
		self.events.lock().clone()
	}

	/// Messages of every alert shown
	pub fn alerts(&self) -> Vec<(AlertLevel, String)> {
		self.events
			.lock()
			.iter()
			.filter_map(|event| match event {
				DialogEvent::Alert(level, _, message) => Some((*level, message.clone())),
				_ => None,
			})
			.collect()
	}

	pub fn confirmations(&self) -> usize {
		self.events
			.lock()
			.iter()
			.filter(|event| matches!(event, DialogEvent::Confirm(_)))
			.count()
	}
}

#[async_trait]
impl Dialogs for ScriptedDialogs {
	async fn alert(&self, level: AlertLevel, title: &str, message: &str) {
		self.events
			.lock()
			.push(DialogEvent::Alert(level, title.to_string(), message.to_string()));
	}

	async fn confirm(&self, _title: &str, message: &str) -> bool {
		self.events
			.lock()
			.push(DialogEvent::Confirm(message.to_string()));
		*self.confirm_answer.lock()
	}

	async fn offer_copy(&self, _title: &str, text: &str) -> bool {
		self.events
			.lock()
			.push(DialogEvent::OfferCopy(text.to_string()));
		*self.copy_answer.lock()
	}
}

pub fn phone(id: i64, number: &str, type_name: &str) -> PhoneNumber {
	PhoneNumber {
		id,
		phone_number: number.to_string(),
		provider_id: Some(1),
		type_id: Some(1),
		installation_fee: 1_200_000.0,
		maintenance_fee: 50_000.0,
		vanity_number_fee: 0.0,
		provider_name: "Viettel".to_string(),
		type_name: type_name.to_string(),
		booked_until: None,
		status: Some("available".to_string()),
	}
}

pub fn page(phones: Vec<PhoneNumber>, total_pages: u32) -> PhoneNumberPage {
	PhoneNumberPage {
		phone_numbers: phones,
		total_pages,
	}
}

pub fn provider(id: i64, name: &str) -> Provider {
	Provider {
		id: Some(id),
		name: name.to_string(),
		description: String::new(),
	}
}

pub fn config() -> ListConfig {
	ListConfig {
		page_size: 20,
		page_size_reset_offset: 1,
		search_debounce: Duration::from_millis(500),
	}
}
