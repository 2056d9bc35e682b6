//! Admin screens of the phone-number booking dashboard
//!
//! Each screen is a coordinator that owns its state, talks to the backend
//! through the `numbook-client` traits and renders a [`View`](numbook_pages::View):
//!
//! - [`phone_list`]: filter, search, book and delete available numbers
//! - [`reference`]: provider and type-number lists and forms
//! - [`report`]: booked/deployed counts with a paginated drill-down
//!
//! Supporting modules:
//!
//! - [`query`]: URL query-string state and the [`Location`] seam
//! - [`search`]: search buffering and commit de-duplication
//! - [`dialogs`]: the [`Dialogs`] and [`Clipboard`] seams
//! - [`format`]: number, date and expiration formatting
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use numbook_admin::{ListConfig, MemoryClipboard, MemoryLocation, ModalDialogs, PhoneListCoordinator};
//! use numbook_client::{ApiClient, UserContext};
//! use numbook_conf::Settings;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let api = Arc::new(ApiClient::new(&settings, UserContext::anonymous())?);
//! let list = PhoneListCoordinator::new(
//!     api,
//!     Arc::new(MemoryLocation::new("provider=Viettel")),
//!     ModalDialogs::new(),
//!     Arc::new(MemoryClipboard::default()),
//!     ListConfig::from_settings(&settings),
//! );
//! list.mount().await;
//! println!("{}", list.view().render_to_string());
//! # Ok(())
//! # }
//! ```

pub mod dialogs;
pub mod error;
pub mod format;
pub mod messages;
pub mod phone_list;
pub mod query;
pub mod reference;
pub mod report;
pub mod search;

pub use dialogs::{
	AlertLevel, Clipboard, DialogKind, Dialogs, MemoryClipboard, ModalDialogs, OpenDialog,
};
pub use error::{AdminError, Result};
pub use phone_list::{
	BookingOutcome, DeleteOutcome, EmptyKind, ListConfig, ListPage, ListState, Mutation,
	PhoneListCoordinator, PhoneRow,
};
pub use query::{Location, MemoryLocation, QueryState};
pub use reference::{
	EditTarget, FormOutcome, ProviderForm, ProviderRow, ReferenceList, ReferenceResource,
	TypeNumberForm, TypeNumberRow,
};
pub use report::{ReportCoordinator, ReportDetailState, ReportRow};
pub use search::SearchCommit;

/// Run a view handler's async work on the current runtime.
///
/// Events fired outside a runtime are dropped with a warning.
pub(crate) fn spawn_task<F>(task: F)
where
	F: std::future::Future<Output = ()> + Send + 'static,
{
	match tokio::runtime::Handle::try_current() {
		Ok(runtime) => {
			runtime.spawn(task);
		}
		Err(_) => tracing::warn!("view event dropped: no async runtime"),
	}
}
