//! Query-string state of the phone list
//!
//! The URL is the source of truth when the page loads; after that the
//! coordinator owns the state and writes it back once a fetch completes.
//! Parameters the list does not know about are preserved on every write.

use numbook_client::ListParams;
use parking_lot::Mutex;

pub const SEARCH_PARAM: &str = "search";
pub const PROVIDER_PARAM: &str = "provider";
pub const TYPE_PARAM: &str = "typeNumber";
pub const QUANTITY_PARAM: &str = "quantity";
pub const OFFSET_PARAM: &str = "offset";

/// Access to the page URL's query string (without the leading `?`)
pub trait Location: Send + Sync {
	/// Current query string
	fn query(&self) -> String;

	/// Replace the query string without adding a history entry
	fn replace_query(&self, query: &str);
}

/// In-memory [`Location`], for hosts without a browser URL and for tests
#[derive(Debug, Default)]
pub struct MemoryLocation {
	inner: Mutex<MemoryLocationInner>,
}

#[derive(Debug, Default)]
struct MemoryLocationInner {
	query: String,
	writes: usize,
}

impl MemoryLocation {
	/// Create a location holding `query`
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			inner: Mutex::new(MemoryLocationInner {
				query: query.into(),
				writes: 0,
			}),
		}
	}

	/// Number of times the query was replaced
	pub fn writes(&self) -> usize {
		self.inner.lock().writes
	}
}

impl Location for MemoryLocation {
	fn query(&self) -> String {
		self.inner.lock().query.clone()
	}

	fn replace_query(&self, query: &str) {
		let mut inner = self.inner.lock();
		inner.query = query.to_string();
		inner.writes += 1;
	}
}

/// Filters and pagination of the phone list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
	/// Committed search text
	pub search: String,
	/// Provider name, empty for all
	pub provider: String,
	/// Type-number name, empty for all
	pub type_number: String,
	/// Page size
	pub quantity: u32,
	/// Page index
	pub offset: u32,
}

impl QueryState {
	/// State with no filters
	pub fn with_page_size(quantity: u32) -> Self {
		Self {
			search: String::new(),
			provider: String::new(),
			type_number: String::new(),
			quantity,
			offset: 0,
		}
	}

	/// Read state from a query string.
	///
	/// A missing, zero or malformed `quantity` falls back to
	/// `default_quantity`; a missing or malformed `offset` falls back to 0.
	/// The flag is `true` when either parameter was absent and should be
	/// written back.
	pub fn from_query(query: &str, default_quantity: u32) -> (Self, bool) {
		let pairs = parse_pairs(query);
		let get = |key: &str| {
			pairs
				.iter()
				.find(|(k, _)| k == key)
				.map(|(_, v)| v.as_str())
		};

		let quantity = get(QUANTITY_PARAM)
			.and_then(|v| v.trim().parse::<u32>().ok())
			.filter(|q| *q > 0)
			.unwrap_or(default_quantity);
		let offset = get(OFFSET_PARAM)
			.and_then(|v| v.trim().parse::<u32>().ok())
			.unwrap_or(0);
		let missing = get(QUANTITY_PARAM).is_none_or(str::is_empty)
			|| get(OFFSET_PARAM).is_none_or(str::is_empty);

		let state = Self {
			search: get(SEARCH_PARAM).unwrap_or_default().to_string(),
			provider: get(PROVIDER_PARAM).unwrap_or_default().to_string(),
			type_number: get(TYPE_PARAM).unwrap_or_default().to_string(),
			quantity,
			offset,
		};
		(state, missing)
	}

	/// Backend parameters for this state
	pub fn list_params(&self) -> ListParams {
		ListParams {
			search: self.search.clone(),
			telco: self.provider.clone(),
			limit: self.quantity,
			offset: self.offset,
		}
	}

	/// Write this state over `existing`, keeping unrelated parameters.
	///
	/// Empty filters remove their parameter; `quantity` and `offset` are
	/// always present.
	pub fn merge_into(&self, existing: &str) -> String {
		let mut pairs = parse_pairs(existing);
		set_param(&mut pairs, QUANTITY_PARAM, Some(self.quantity.to_string()));
		set_param(&mut pairs, OFFSET_PARAM, Some(self.offset.to_string()));
		set_param(&mut pairs, PROVIDER_PARAM, non_empty(&self.provider));
		set_param(&mut pairs, TYPE_PARAM, non_empty(&self.type_number));
		set_param(&mut pairs, SEARCH_PARAM, non_empty(&self.search));
		encode_pairs(&pairs)
	}

	/// Add `quantity` and `offset` to `existing` only where they are absent
	pub fn fill_defaults(&self, existing: &str) -> String {
		let mut pairs = parse_pairs(existing);
		for (key, value) in [
			(QUANTITY_PARAM, self.quantity.to_string()),
			(OFFSET_PARAM, self.offset.to_string()),
		] {
			if !pairs.iter().any(|(k, v)| k == key && !v.is_empty()) {
				set_param(&mut pairs, key, Some(value));
			}
		}
		encode_pairs(&pairs)
	}
}

fn non_empty(value: &str) -> Option<String> {
	(!value.is_empty()).then(|| value.to_string())
}

fn parse_pairs(query: &str) -> Vec<(String, String)> {
	let query = query.strip_prefix('?').unwrap_or(query);
	match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
		Ok(pairs) => pairs,
		Err(e) => {
			tracing::warn!(error = %e, "ignoring malformed query string");
			Vec::new()
		}
	}
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
	serde_urlencoded::to_string(pairs).unwrap_or_default()
}

fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
	match value {
		Some(value) => match pairs.iter_mut().find(|(k, _)| k == key) {
			Some(pair) => {
				pair.1 = value;
				pairs.retain({
					let mut seen = false;
					move |(k, _)| {
						if k != key {
							return true;
						}
						let keep = !seen;
						seen = true;
						keep
					}
				});
			}
			None => pairs.push((key.to_string(), value)),
		},
		None => pairs.retain(|(k, _)| k != key),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_from_query_reads_every_param() {
		let (state, missing) = QueryState::from_query(
			"search=090&provider=Viettel&typeNumber=VIP&quantity=50&offset=3",
			20,
		);
		assert!(!missing);
		assert_eq!(
			state,
			QueryState {
				search: "090".into(),
				provider: "Viettel".into(),
				type_number: "VIP".into(),
				quantity: 50,
				offset: 3,
			}
		);
	}

	#[rstest]
	#[case("", 20, 0, true)]
	#[case("quantity=0&offset=2", 20, 2, false)]
	#[case("quantity=abc&offset=-1", 20, 0, false)]
	#[case("quantity=10", 10, 0, true)]
	#[case("?offset=4&quantity=", 20, 4, true)]
	fn test_from_query_defaults(
		#[case] query: &str,
		#[case] quantity: u32,
		#[case] offset: u32,
		#[case] missing: bool,
	) {
		let (state, needs_write) = QueryState::from_query(query, 20);
		assert_eq!(state.quantity, quantity);
		assert_eq!(state.offset, offset);
		assert_eq!(needs_write, missing);
	}

	#[rstest]
	fn test_merge_keeps_unknown_params_and_drops_empty_filters() {
		let mut state = QueryState::with_page_size(20);
		state.search = "09 1".into();
		let merged = state.merge_into("tab=phones&provider=Viettel&offset=9");
		assert_eq!(merged, "tab=phones&offset=0&quantity=20&search=09+1");
	}

	#[rstest]
	fn test_round_trip_through_url() {
		let state = QueryState {
			search: "0903".into(),
			provider: "Mobi & Co".into(),
			type_number: "Gold".into(),
			quantity: 50,
			offset: 2,
		};
		let (parsed, missing) = QueryState::from_query(&state.merge_into(""), 20);
		assert!(!missing);
		assert_eq!(parsed, state);
	}

	#[rstest]
	fn test_fill_defaults_only_adds_missing() {
		let state = QueryState::with_page_size(20);
		assert_eq!(state.fill_defaults("quantity=50"), "quantity=50&offset=0");
		assert_eq!(state.fill_defaults(""), "quantity=20&offset=0");
	}

	#[rstest]
	fn test_set_param_collapses_duplicates() {
		let state = QueryState::with_page_size(20);
		assert_eq!(
			state.merge_into("offset=1&offset=2"),
			"offset=0&quantity=20"
		);
	}

	#[rstest]
	fn test_memory_location_counts_writes() {
		let location = MemoryLocation::new("a=1");
		location.replace_query("a=2");
		assert_eq!(location.query(), "a=2");
		assert_eq!(location.writes(), 1);
	}
}
