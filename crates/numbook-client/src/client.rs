//! `reqwest` implementation of the backend seams

use async_trait::async_trait;
use numbook_conf::Settings;
use reqwest::{Client, Method, RequestBuilder, Response, multipart};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{BookingApi, ReferenceApi, ReportApi};
use crate::context::UserContext;
use crate::error::{ApiError, Result};
use crate::models::{
	BookingRequest, ListParams, PhoneNumber, PhoneNumberInput, PhoneNumberPage, Provider,
	ProviderInput, ReportCounts, ReportPage, ReportPeriod, ReportSlice, TypeNumber,
	TypeNumberInput,
};

/// HTTP client for the booking backend
///
/// # Examples
///
/// ```no_run
/// use numbook_client::{ApiClient, BookingApi, ListParams, UserContext};
/// use numbook_conf::Settings;
///
/// # async fn run() -> numbook_client::Result<()> {
/// let client = ApiClient::new(&Settings::default(), UserContext::with_token("ops", "secret"))?;
/// let page = client
///     .list_available(&ListParams { limit: 20, ..Default::default() })
///     .await?;
/// println!("{} pages", page.total_pages);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
	http: Client,
	root: String,
	user: UserContext,
}

impl ApiClient {
	/// Create a client from settings, with the configured timeout
	pub fn new(settings: &Settings, user: UserContext) -> Result<Self> {
		let http = Client::builder()
			.timeout(settings.request_timeout())
			.build()
			.map_err(|e| ApiError::Client(e.to_string()))?;
		Ok(Self::with_client(http, settings.api_root(), user))
	}

	/// Create a client with a custom `reqwest` client and API root
	pub fn with_client(http: Client, root: impl Into<String>, user: UserContext) -> Self {
		Self {
			http,
			root: root.into().trim_end_matches('/').to_string(),
			user,
		}
	}

	/// The user requests are made for
	pub fn user(&self) -> &UserContext {
		&self.user
	}

	fn request(&self, method: Method, path: &str) -> RequestBuilder {
		let url = format!("{}{}", self.root, path);
		tracing::debug!(%method, %url, "backend request");
		let builder = self.http.request(method, url);
		match &self.user.access_token {
			Some(token) => builder.bearer_auth(token),
			None => builder,
		}
	}

	async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
		let response = builder.send().await?;
		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}
		let body = response.text().await.unwrap_or_default();
		let err = ApiError::from_response(status.as_u16(), &body);
		tracing::warn!(status = status.as_u16(), detail = ?err.detail(), "backend rejected request");
		Err(err)
	}

	async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
		let response = self.execute(builder).await?;
		let bytes = response.bytes().await?;
		Ok(serde_json::from_slice(&bytes)?)
	}

	async fn fetch_value(&self, builder: RequestBuilder) -> Result<Value> {
		let response = self.execute(builder).await?;
		let bytes = response.bytes().await?;
		if bytes.is_empty() {
			return Ok(Value::Null);
		}
		Ok(serde_json::from_slice(&bytes)?)
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityWire {
	Plain(u64),
	Object {
		#[serde(alias = "total", alias = "count", alias = "quantity_available")]
		quantity: u64,
	},
}

#[async_trait]
impl BookingApi for ApiClient {
	async fn list_available(&self, params: &ListParams) -> Result<PhoneNumberPage> {
		let req = self
			.request(Method::GET, "/booking/booking-phone-number")
			.query(&[
				("filter", params.search.as_str()),
				("telco", params.telco.as_str()),
			])
			.query(&[("limit", params.limit), ("offset", params.offset)]);
		self.fetch(req).await
	}

	async fn book(&self, ids: &[i64]) -> Result<Value> {
		let body = BookingRequest {
			id_phone_numbers: ids.to_vec(),
		};
		tracing::info!(user = %self.user.username, count = ids.len(), "booking phone numbers");
		self.fetch_value(self.request(Method::POST, "/booking").json(&body))
			.await
	}

	async fn delete_phone(&self, id: i64) -> Result<()> {
		let req = self
			.request(Method::DELETE, "/phone")
			.query(&[("phone_id", id)]);
		self.execute(req).await.map(|_| ())
	}

	async fn phone_by_id(&self, id: i64) -> Result<PhoneNumber> {
		let req = self
			.request(Method::GET, "/phone/by-id")
			.query(&[("phone_id", id)]);
		self.fetch(req).await
	}

	async fn create_phone(&self, input: &PhoneNumberInput) -> Result<PhoneNumber> {
		self.fetch(self.request(Method::POST, "/phone").json(input))
			.await
	}

	async fn update_phone(&self, id: i64, input: &PhoneNumberInput) -> Result<PhoneNumber> {
		let req = self
			.request(Method::PUT, "/phone")
			.query(&[("phone_id", id)])
			.json(input);
		self.fetch(req).await
	}

	async fn upload_phone_numbers(&self, file_name: &str, content: Vec<u8>) -> Result<Value> {
		let part = multipart::Part::bytes(content).file_name(file_name.to_string());
		let form = multipart::Form::new().part("file", part);
		self.fetch_value(
			self.request(Method::POST, "/phone/upload-phone-number")
				.multipart(form),
		)
		.await
	}

	async fn quantity_available(&self) -> Result<u64> {
		let wire: QuantityWire = self
			.fetch(self.request(Method::GET, "/phone/quantity-available"))
			.await?;
		Ok(match wire {
			QuantityWire::Plain(n) | QuantityWire::Object { quantity: n } => n,
		})
	}

	async fn booking_for_option(&self, option: &str, quantity: u32, offset: u32) -> Result<PhoneNumberPage> {
		let req = self
			.request(Method::GET, "/booking/booking-phone-number-for-option")
			.query(&[("quantity", quantity)])
			.query(&[("option", option)])
			.query(&[("offset", offset)]);
		self.fetch(req).await
	}
}

#[async_trait]
impl ReferenceApi for ApiClient {
	async fn list_providers(&self) -> Result<Vec<Provider>> {
		self.fetch(self.request(Method::GET, "/provider/alls")).await
	}

	async fn provider_by_id(&self, id: i64) -> Result<Provider> {
		let req = self
			.request(Method::GET, "/provider/by-id")
			.query(&[("provider_id", id)]);
		self.fetch(req).await
	}

	async fn create_provider(&self, input: &ProviderInput) -> Result<Provider> {
		self.fetch(self.request(Method::POST, "/provider").json(input))
			.await
	}

	async fn update_provider(&self, id: i64, input: &ProviderInput) -> Result<Provider> {
		let req = self
			.request(Method::PUT, "/provider")
			.query(&[("provider_id", id)])
			.json(input);
		self.fetch(req).await
	}

	async fn delete_provider(&self, id: i64) -> Result<()> {
		let req = self
			.request(Method::DELETE, "/provider")
			.query(&[("provider_id", id)]);
		self.execute(req).await.map(|_| ())
	}

	async fn list_type_numbers(&self) -> Result<Vec<TypeNumber>> {
		self.fetch(self.request(Method::GET, "/type_number/alls"))
			.await
	}

	async fn type_number_by_id(&self, id: i64) -> Result<TypeNumber> {
		let req = self
			.request(Method::GET, "/type_number/by-id")
			.query(&[("type_number_id", id)]);
		self.fetch(req).await
	}

	async fn create_type_number(&self, input: &TypeNumberInput) -> Result<TypeNumber> {
		self.fetch(self.request(Method::POST, "/type_number").json(input))
			.await
	}

	async fn update_type_number(&self, id: i64, input: &TypeNumberInput) -> Result<TypeNumber> {
		let req = self
			.request(Method::PUT, "/type_number/type-number-by-id")
			.query(&[("type_number_id", id)])
			.json(input);
		self.fetch(req).await
	}

	async fn delete_type_number(&self, id: i64) -> Result<()> {
		let req = self
			.request(Method::DELETE, "/type_number")
			.query(&[("id_type_number", id)]);
		self.execute(req).await.map(|_| ())
	}
}

#[async_trait]
impl ReportApi for ApiClient {
	async fn dashboard(&self, period: ReportPeriod) -> Result<ReportCounts> {
		let mut req = self
			.request(Method::GET, "/report/dashboard")
			.query(&[("year", period.year)])
			.query(&[("month", period.month)]);
		if let Some(day) = period.day {
			req = req.query(&[("day", day)]);
		}
		self.fetch(req).await
	}

	async fn report_detail(
		&self,
		slice: ReportSlice,
		period: ReportPeriod,
		limit: u32,
		offset: u32,
	) -> Result<ReportPage> {
		let mut req = self
			.request(Method::GET, "/report/detail")
			.query(&[("option", slice.as_str())])
			.query(&[("limit", limit), ("offset", offset)])
			.query(&[("year", period.year)])
			.query(&[("month", period.month)]);
		if let Some(day) = period.day {
			req = req.query(&[("day", day)]);
		}
		self.fetch(req).await
	}
}
