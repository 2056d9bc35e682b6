//! REST client for the phone-number booking backend
//!
//! - [`models`]: wire types (`PhoneNumber`, `Provider`, `TypeNumber`, report rows)
//! - [`api`]: the `BookingApi`, `ReferenceApi` and `ReportApi` seams
//! - [`client`]: [`ApiClient`], the `reqwest` implementation of those seams
//! - [`error`]: [`ApiError`] and the booking-quota check
//!
//! Every request carries the bearer token of the [`UserContext`] the client
//! was built with, if it has one.

pub mod api;
pub mod client;
pub mod context;
pub mod error;
pub mod models;

pub use api::{BookingApi, ReferenceApi, ReportApi};
pub use client::ApiClient;
pub use context::UserContext;
pub use error::{ApiError, BOOKING_LIMIT_DETAIL, Result};
pub use models::{
	BookingRequest, ListParams, PhoneNumber, PhoneNumberInput, PhoneNumberPage, Provider,
	ProviderInput, ReportCounts, ReportDetail, ReportPage, ReportPeriod, ReportSlice, TypeNumber,
	TypeNumberInput, booked_numbers,
};
