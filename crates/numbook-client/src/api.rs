//! Backend seams
//!
//! Coordinators talk to the backend only through these traits, so they can
//! run against [`ApiClient`](crate::ApiClient) or an in-memory fake.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::{
	ListParams, PhoneNumber, PhoneNumberInput, PhoneNumberPage, Provider, ProviderInput,
	ReportCounts, ReportPage, ReportPeriod, ReportSlice, TypeNumber, TypeNumberInput,
};

/// Phone-number listing and booking
#[async_trait]
pub trait BookingApi: Send + Sync {
	/// `GET /booking/booking-phone-number`
	async fn list_available(&self, params: &ListParams) -> Result<PhoneNumberPage>;

	/// `POST /booking`; returns the response body
	async fn book(&self, ids: &[i64]) -> Result<Value>;

	/// `DELETE /phone`
	async fn delete_phone(&self, id: i64) -> Result<()>;

	/// `GET /phone/by-id`
	async fn phone_by_id(&self, id: i64) -> Result<PhoneNumber>;

	/// `POST /phone`
	async fn create_phone(&self, input: &PhoneNumberInput) -> Result<PhoneNumber>;

	/// `PUT /phone`
	async fn update_phone(&self, id: i64, input: &PhoneNumberInput) -> Result<PhoneNumber>;

	/// `POST /phone/upload-phone-number` (multipart `file`)
	async fn upload_phone_numbers(&self, file_name: &str, content: Vec<u8>) -> Result<Value>;

	/// `GET /phone/quantity-available`
	async fn quantity_available(&self) -> Result<u64>;

	/// `GET /booking/booking-phone-number-for-option`
	async fn booking_for_option(&self, option: &str, quantity: u32, offset: u32) -> Result<PhoneNumberPage>;
}

/// Provider and type-number maintenance
#[async_trait]
pub trait ReferenceApi: Send + Sync {
	/// `GET /provider/alls`
	async fn list_providers(&self) -> Result<Vec<Provider>>;

	/// `GET /provider/by-id`
	async fn provider_by_id(&self, id: i64) -> Result<Provider>;

	/// `POST /provider`
	async fn create_provider(&self, input: &ProviderInput) -> Result<Provider>;

	/// `PUT /provider`
	async fn update_provider(&self, id: i64, input: &ProviderInput) -> Result<Provider>;

	/// `DELETE /provider`
	async fn delete_provider(&self, id: i64) -> Result<()>;

	/// `GET /type_number/alls`
	async fn list_type_numbers(&self) -> Result<Vec<TypeNumber>>;

	/// `GET /type_number/by-id`
	async fn type_number_by_id(&self, id: i64) -> Result<TypeNumber>;

	/// `POST /type_number`
	async fn create_type_number(&self, input: &TypeNumberInput) -> Result<TypeNumber>;

	/// `PUT /type_number/type-number-by-id`
	async fn update_type_number(&self, id: i64, input: &TypeNumberInput) -> Result<TypeNumber>;

	/// `DELETE /type_number`
	async fn delete_type_number(&self, id: i64) -> Result<()>;
}

/// Status report
#[async_trait]
pub trait ReportApi: Send + Sync {
	/// `GET /report/dashboard`
	async fn dashboard(&self, period: ReportPeriod) -> Result<ReportCounts>;

	/// `GET /report/detail`
	async fn report_detail(
		&self,
		slice: ReportSlice,
		period: ReportPeriod,
		limit: u32,
		offset: u32,
	) -> Result<ReportPage>;
}
