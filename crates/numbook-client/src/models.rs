//! Wire models for the booking backend
//!
//! The backend is loose about numeric fields: fees and expirations arrive
//! either as JSON numbers or as numeric strings, and some are `null`. The
//! deserializers below accept all three.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A phone number as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumber {
	pub id: i64,
	#[serde(default)]
	pub phone_number: String,
	#[serde(default)]
	pub provider_id: Option<i64>,
	/// Category id; `/phone/by-id` calls it `type_number_id`
	#[serde(default, alias = "type_number_id")]
	pub type_id: Option<i64>,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub installation_fee: f64,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub maintenance_fee: f64,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub vanity_number_fee: f64,
	#[serde(default)]
	pub provider_name: String,
	#[serde(default)]
	pub type_name: String,
	#[serde(default)]
	pub booked_until: Option<String>,
	#[serde(default)]
	pub status: Option<String>,
}

/// One page of the available-number listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumberPage {
	#[serde(default, alias = "data")]
	pub phone_numbers: Vec<PhoneNumber>,
	#[serde(default)]
	pub total_pages: u32,
}

/// Body for creating or updating a phone number
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhoneNumberInput {
	pub phone_number: String,
	pub provider_id: i64,
	pub type_number_id: i64,
	pub installation_fee: f64,
	pub maintenance_fee: f64,
	pub vanity_number_fee: f64,
}

/// Body of `POST /booking`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
	pub id_phone_numbers: Vec<i64>,
}

/// Parameters of the available-number listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
	/// Phone-number prefix search (`filter`)
	pub search: String,
	/// Provider name (`telco`), empty for all providers
	pub telco: String,
	pub limit: u32,
	pub offset: u32,
}

/// A carrier owning blocks of numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
	#[serde(default)]
	pub name: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub description: String,
}

/// Body for creating or updating a provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderInput {
	pub name: String,
	pub description: String,
}

/// A category of phone number with its booking expiration window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNumber {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
	#[serde(default)]
	pub name: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub description: String,
	/// Expiration window in seconds
	#[serde(default, deserialize_with = "lenient_u64")]
	pub booking_expiration: u64,
}

/// Body for creating or updating a type number.
///
/// The backend takes the expiration as a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeNumberInput {
	pub name: String,
	pub description: String,
	#[serde(serialize_with = "u64_as_string")]
	pub booking_expiration: u64,
}

/// Slice of the status report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSlice {
	/// Numbers booked but not yet deployed
	Booked,
	/// Numbers deployed to a customer
	Released,
}

impl ReportSlice {
	/// Value of the `option` query parameter
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Booked => "booked",
			Self::Released => "released",
		}
	}
}

impl fmt::Display for ReportSlice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Report period; `day` narrows a month to a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
	pub year: i32,
	pub month: u32,
	pub day: Option<u32>,
}

/// Counts behind the status chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCounts {
	#[serde(default, deserialize_with = "lenient_u64")]
	pub booked: u64,
	#[serde(default, deserialize_with = "lenient_u64")]
	pub deployed: u64,
}

impl ReportCounts {
	/// Sum of every slice
	pub fn total(&self) -> u64 {
		self.booked.saturating_add(self.deployed)
	}
}

/// A booked or released number in the report detail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDetail {
	#[serde(default)]
	pub id: Option<i64>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub user_name: String,
	#[serde(default)]
	pub phone_number: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub provider_name: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub type_name: String,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub installation_fee: f64,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub maintenance_fee: f64,
	#[serde(default, deserialize_with = "lenient_f64")]
	pub vanity_number_fee: f64,
	#[serde(default)]
	pub booked_until: Option<String>,
	#[serde(default)]
	pub booked_at: Option<String>,
	#[serde(default)]
	pub released_at: Option<String>,
	#[serde(default)]
	pub user_name_release: Option<String>,
	#[serde(default)]
	pub contract_code: Option<String>,
}

/// One page of report detail rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
	#[serde(default)]
	pub data: Vec<ReportDetail>,
	#[serde(default)]
	pub total_pages: u32,
}

/// Phone numbers named in a booking response.
///
/// Accepts a bare array, or an object holding the array under
/// `phone_numbers` or `data`; items may be strings or objects with a
/// `phone_number` field. Anything else yields an empty list.
pub fn booked_numbers(body: &Value) -> Vec<String> {
	let items = match body {
		Value::Array(items) => items,
		Value::Object(map) => match map.get("phone_numbers").or_else(|| map.get("data")) {
			Some(Value::Array(items)) => items,
			_ => return Vec::new(),
		},
		_ => return Vec::new(),
	};
	items
		.iter()
		.filter_map(|item| match item {
			Value::String(number) => Some(number.clone()),
			Value::Object(map) => map
				.get("phone_number")
				.and_then(Value::as_str)
				.map(str::to_string),
			_ => None,
		})
		.collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
	Int(u64),
	Float(f64),
	Text(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
	match Option::<NumberOrString>::deserialize(deserializer)? {
		None => Ok(0.0),
		Some(NumberOrString::Int(n)) => Ok(n as f64),
		Some(NumberOrString::Float(n)) => Ok(n),
		Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(0.0),
		Some(NumberOrString::Text(s)) => s
			.trim()
			.parse()
			.map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}"))),
	}
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
	match Option::<NumberOrString>::deserialize(deserializer)? {
		None => Ok(0),
		Some(NumberOrString::Int(n)) => Ok(n),
		Some(NumberOrString::Float(n)) if n >= 0.0 => Ok(n as u64),
		Some(NumberOrString::Float(n)) => Err(serde::de::Error::custom(format!(
			"expected a non-negative number, got {n}"
		))),
		Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(0),
		Some(NumberOrString::Text(s)) => s.trim().parse().map_err(|_| {
			serde::de::Error::custom(format!("expected a non-negative integer, got {s:?}"))
		}),
	}
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn u64_as_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.collect_str(value)
}
