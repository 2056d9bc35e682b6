use mockito::{Matcher, Server, ServerGuard};
use numbook_client::{
	ApiClient, ApiError, BookingApi, ListParams, PhoneNumberInput, ProviderInput, ReferenceApi,
	ReportApi, ReportPeriod, ReportSlice, TypeNumberInput, UserContext, booked_numbers,
};
use numbook_conf::Settings;
use rstest::*;
use serde_json::json;

async fn setup(user: UserContext) -> (ServerGuard, ApiClient) {
	let server = Server::new_async().await;
	let settings = Settings {
		api_base_url: server.url(),
		..Settings::default()
	};
	let client = ApiClient::new(&settings, user).unwrap();
	(server, client)
}

#[rstest]
#[tokio::test]
async fn test_list_available_sends_filters_and_token() {
	let (mut server, client) = setup(UserContext::with_token("ops", "tok-1")).await;
	let mock = server
		.mock("GET", "/api/v1/booking/booking-phone-number")
		.match_header("authorization", "Bearer tok-1")
		.match_query(Matcher::AllOf(vec![
			Matcher::UrlEncoded("filter".into(), "0903".into()),
			Matcher::UrlEncoded("telco".into(), "Viettel".into()),
			Matcher::UrlEncoded("limit".into(), "20".into()),
			Matcher::UrlEncoded("offset".into(), "2".into()),
		]))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			json!({
				"phone_numbers": [{
					"id": 11,
					"phone_number": "0903111111",
					"provider_name": "Viettel",
					"type_name": "VIP",
					"installation_fee": 1200000
				}],
				"total_pages": 4
			})
			.to_string(),
		)
		.create_async()
		.await;

	let page = client
		.list_available(&ListParams {
			search: "0903".into(),
			telco: "Viettel".into(),
			limit: 20,
			offset: 2,
		})
		.await
		.unwrap();

	mock.assert_async().await;
	assert_eq!(page.total_pages, 4);
	assert_eq!(page.phone_numbers[0].id, 11);
	assert_eq!(page.phone_numbers[0].installation_fee, 1_200_000.0);
}

#[rstest]
#[tokio::test]
async fn test_anonymous_user_sends_no_authorization() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("GET", "/api/v1/provider/alls")
		.match_header("authorization", Matcher::Missing)
		.with_status(200)
		.with_body("[]")
		.create_async()
		.await;

	assert!(client.list_providers().await.unwrap().is_empty());
	mock.assert_async().await;
}

#[rstest]
#[tokio::test]
async fn test_book_posts_ids() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("POST", "/api/v1/booking")
		.match_body(Matcher::Json(json!({"id_phone_numbers": [3, 5]})))
		.with_status(200)
		.with_body(r#"{"phone_numbers": ["0901", "0902"]}"#)
		.create_async()
		.await;

	let body = client.book(&[3, 5]).await.unwrap();
	mock.assert_async().await;
	assert_eq!(booked_numbers(&body), vec!["0901", "0902"]);
}

#[rstest]
#[tokio::test]
async fn test_book_quota_rejection() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	server
		.mock("POST", "/api/v1/booking")
		.with_status(400)
		.with_body(r#"{"detail": "Booking limit exceeded"}"#)
		.create_async()
		.await;

	let err = client.book(&[1]).await.unwrap_err();
	assert!(err.is_quota_exceeded());
	assert_eq!(err.status(), Some(400));
}

#[rstest]
#[tokio::test]
async fn test_delete_phone_surfaces_detail() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("DELETE", "/api/v1/phone")
		.match_query(Matcher::UrlEncoded("phone_id".into(), "42".into()))
		.with_status(404)
		.with_body(r#"{"detail": "Phone number not found"}"#)
		.create_async()
		.await;

	let err = client.delete_phone(42).await.unwrap_err();
	mock.assert_async().await;
	assert_eq!(
		err,
		ApiError::Status {
			status: 404,
			detail: Some("Phone number not found".into())
		}
	);
}

#[rstest]
#[tokio::test]
async fn test_phone_by_id_renames_type_field() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	server
		.mock("GET", "/api/v1/phone/by-id")
		.match_query(Matcher::UrlEncoded("phone_id".into(), "7".into()))
		.with_status(200)
		.with_body(r#"{"id": 7, "phone_number": "0907", "type_number_id": 3}"#)
		.create_async()
		.await;

	let phone = client.phone_by_id(7).await.unwrap();
	assert_eq!(phone.type_id, Some(3));
}

#[fixture]
fn gold_number() -> PhoneNumberInput {
	PhoneNumberInput {
		phone_number: "0905123456".into(),
		provider_id: 2,
		type_number_id: 9,
		installation_fee: 150000.0,
		maintenance_fee: 0.0,
		vanity_number_fee: 50000.0,
	}
}

#[rstest]
#[tokio::test]
async fn test_create_phone_posts_input(gold_number: PhoneNumberInput) {
	let (mut server, client) = setup(UserContext::with_token("ops", "tok-2")).await;
	let mock = server
		.mock("POST", "/api/v1/phone")
		.match_header("authorization", "Bearer tok-2")
		.match_body(Matcher::PartialJson(json!({
			"phone_number": "0905123456",
			"provider_id": 2,
			"type_number_id": 9
		})))
		.with_status(201)
		.with_body(r#"{"id": 31, "phone_number": "0905123456", "type_id": 9}"#)
		.create_async()
		.await;

	let created = client.create_phone(&gold_number).await.unwrap();
	mock.assert_async().await;
	assert_eq!(created.id, 31);
	assert_eq!(created.type_id, Some(9));
}

#[rstest]
#[tokio::test]
async fn test_update_phone_puts_to_phone_id(gold_number: PhoneNumberInput) {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("PUT", "/api/v1/phone")
		.match_query(Matcher::UrlEncoded("phone_id".into(), "31".into()))
		.match_body(Matcher::PartialJson(json!({
			"phone_number": "0905123456",
			"provider_id": 2,
			"type_number_id": 9
		})))
		.with_status(200)
		.with_body(r#"{"id": 31, "phone_number": "0905123456", "vanity_number_fee": "50000"}"#)
		.create_async()
		.await;

	let updated = client.update_phone(31, &gold_number).await.unwrap();
	mock.assert_async().await;
	assert_eq!(updated.vanity_number_fee, 50_000.0);
}

#[rstest]
#[tokio::test]
async fn test_upload_sends_file_field() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("POST", "/api/v1/phone/upload-phone-number")
		.match_header(
			"content-type",
			Matcher::Regex("^multipart/form-data; boundary=".into()),
		)
		.match_body(Matcher::Regex(
			r#"(?s)name="file"; filename="numbers.csv".*0901000001"#.into(),
		))
		.with_status(200)
		.with_body(r#"{"inserted": 2}"#)
		.create_async()
		.await;

	let reply = client
		.upload_phone_numbers("numbers.csv", b"0901000001\n0901000002\n".to_vec())
		.await
		.unwrap();
	mock.assert_async().await;
	assert_eq!(reply, json!({"inserted": 2}));
}

#[rstest]
#[tokio::test]
async fn test_booking_for_option_query() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("GET", "/api/v1/booking/booking-phone-number-for-option")
		.match_query(Matcher::AllOf(vec![
			Matcher::UrlEncoded("quantity".into(), "10".into()),
			Matcher::UrlEncoded("option".into(), "VIP".into()),
			Matcher::UrlEncoded("offset".into(), "3".into()),
		]))
		.with_status(200)
		.with_body(r#"{"data": [{"id": 5, "phone_number": "0905"}], "total_pages": 6}"#)
		.create_async()
		.await;

	let page = client.booking_for_option("VIP", 10, 3).await.unwrap();
	mock.assert_async().await;
	assert_eq!(page.total_pages, 6);
	assert_eq!(page.phone_numbers[0].phone_number, "0905");
}

#[rstest]
#[tokio::test]
async fn test_reference_lookups_by_id() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let provider = server
		.mock("GET", "/api/v1/provider/by-id")
		.match_query(Matcher::UrlEncoded("provider_id".into(), "2".into()))
		.with_status(200)
		.with_body(r#"{"id": 2, "name": "Mobifone", "description": null}"#)
		.create_async()
		.await;
	let type_number = server
		.mock("GET", "/api/v1/type_number/by-id")
		.match_query(Matcher::UrlEncoded("type_number_id".into(), "9".into()))
		.with_status(200)
		.with_body(r#"{"id": 9, "name": "Gold", "booking_expiration": 7200}"#)
		.create_async()
		.await;

	let found = client.provider_by_id(2).await.unwrap();
	assert_eq!(found.name, "Mobifone");
	assert_eq!(found.description, "");

	let found = client.type_number_by_id(9).await.unwrap();
	assert_eq!(found.name, "Gold");
	assert_eq!(found.booking_expiration, 7200);

	provider.assert_async().await;
	type_number.assert_async().await;
}

#[rstest]
#[tokio::test]
async fn test_malformed_body_is_decode_error() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	server
		.mock("GET", "/api/v1/type_number/alls")
		.with_status(200)
		.with_body("not json")
		.create_async()
		.await;

	assert!(matches!(
		client.list_type_numbers().await,
		Err(ApiError::Decode(_))
	));
}

#[rstest]
#[tokio::test]
async fn test_update_provider_and_type_number_paths() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let provider = server
		.mock("PUT", "/api/v1/provider")
		.match_query(Matcher::UrlEncoded("provider_id".into(), "2".into()))
		.match_body(Matcher::Json(json!({"name": "Mobifone", "description": ""})))
		.with_status(200)
		.with_body(r#"{"id": 2, "name": "Mobifone", "description": null}"#)
		.create_async()
		.await;
	let type_number = server
		.mock("PUT", "/api/v1/type_number/type-number-by-id")
		.match_query(Matcher::UrlEncoded("type_number_id".into(), "9".into()))
		.match_body(Matcher::PartialJson(json!({"booking_expiration": "3600"})))
		.with_status(200)
		.with_body(r#"{"id": 9, "name": "Gold", "booking_expiration": "3600"}"#)
		.create_async()
		.await;

	let updated = client
		.update_provider(
			2,
			&ProviderInput {
				name: "Mobifone".into(),
				description: String::new(),
			},
		)
		.await
		.unwrap();
	assert_eq!(updated.name, "Mobifone");

	let updated = client
		.update_type_number(
			9,
			&TypeNumberInput {
				name: "Gold".into(),
				description: String::new(),
				booking_expiration: 3600,
			},
		)
		.await
		.unwrap();
	assert_eq!(updated.booking_expiration, 3600);

	provider.assert_async().await;
	type_number.assert_async().await;
}

#[rstest]
#[tokio::test]
async fn test_delete_type_number_uses_id_type_number() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("DELETE", "/api/v1/type_number")
		.match_query(Matcher::UrlEncoded("id_type_number".into(), "4".into()))
		.with_status(200)
		.create_async()
		.await;

	client.delete_type_number(4).await.unwrap();
	mock.assert_async().await;
}

#[rstest]
#[tokio::test]
async fn test_report_detail_query() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("GET", "/api/v1/report/detail")
		.match_query(Matcher::AllOf(vec![
			Matcher::UrlEncoded("option".into(), "released".into()),
			Matcher::UrlEncoded("limit".into(), "5".into()),
			Matcher::UrlEncoded("offset".into(), "0".into()),
			Matcher::UrlEncoded("year".into(), "2025".into()),
			Matcher::UrlEncoded("month".into(), "3".into()),
			Matcher::UrlEncoded("day".into(), "14".into()),
		]))
		.with_status(200)
		.with_body(r#"{"data": [{"phone_number": "0909", "contract_code": "HD-1"}], "total_pages": 1}"#)
		.create_async()
		.await;

	let page = client
		.report_detail(
			ReportSlice::Released,
			ReportPeriod {
				year: 2025,
				month: 3,
				day: Some(14),
			},
			5,
			0,
		)
		.await
		.unwrap();

	mock.assert_async().await;
	assert_eq!(page.data[0].contract_code.as_deref(), Some("HD-1"));
}

#[rstest]
#[tokio::test]
async fn test_dashboard_omits_day_when_absent() {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	let mock = server
		.mock("GET", "/api/v1/report/dashboard")
		.match_query(Matcher::Exact("year=2024&month=12".into()))
		.with_status(200)
		.with_body(r#"{"booked": 4, "deployed": "6"}"#)
		.create_async()
		.await;

	let counts = client
		.dashboard(ReportPeriod {
			year: 2024,
			month: 12,
			day: None,
		})
		.await
		.unwrap();

	mock.assert_async().await;
	assert_eq!(counts.total(), 10);
}

#[rstest]
#[case(r#"17"#, 17)]
#[case(r#"{"quantity": 8}"#, 8)]
#[case(r#"{"total": 3}"#, 3)]
#[tokio::test]
async fn test_quantity_available_shapes(#[case] body: &str, #[case] expected: u64) {
	let (mut server, client) = setup(UserContext::anonymous()).await;
	server
		.mock("GET", "/api/v1/phone/quantity-available")
		.with_status(200)
		.with_body(body)
		.create_async()
		.await;

	assert_eq!(client.quantity_available().await.unwrap(), expected);
}

#[rstest]
#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
	let settings = Settings {
		api_base_url: "http://127.0.0.1:9".into(),
		..Settings::default()
	};
	let client = ApiClient::new(&settings, UserContext::anonymous()).unwrap();
	assert!(matches!(
		client.list_providers().await,
		Err(ApiError::Network(_))
	));
}
