//! # numbook
//!
//! Admin dashboard toolkit for a phone-number booking backend.
//!
//! This crate re-exports the workspace members behind feature flags so an
//! application can depend on a single crate:
//!
//! - [`pages`]: element tree, event dispatch and HTML rendering
//! - [`tables`]: generic data table with selection, row actions and paging
//! - [`conf`]: layered settings (defaults, TOML file, `NUMBOOK_*` variables)
//! - [`client`]: REST access to phone numbers, providers, type numbers and reports
//! - [`admin`]: list, form and report coordinators built on the crates above
//! - [`logging`]: `tracing-subscriber` setup driven by `NUMBOOK_LOG`
//!
//! ## Feature Flags
//!
//! - `full` (default) - everything below
//! - `minimal` - `pages` and `tables` only, no HTTP stack
//! - `pages`, `tables`, `conf`, `client`, `admin`, `logging` - individual crates
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use numbook::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! numbook::logging::init()?;
//!
//! let settings = Settings::from_env()?;
//! let api = Arc::new(ApiClient::new(&settings, UserContext::anonymous())?);
//! let report = ReportCoordinator::new(
//!     api,
//!     ReportPeriod { year: 2025, month: 3, day: None },
//!     settings.report_page_size,
//! );
//! report.load_counts(report.period()).await;
//! println!("{}", report.view().render_to_string());
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "pages")]
pub use numbook_pages as pages;

#[cfg(feature = "tables")]
pub use numbook_tables as tables;

#[cfg(feature = "conf")]
pub use numbook_conf as conf;

#[cfg(feature = "client")]
pub use numbook_client as client;

#[cfg(feature = "admin")]
pub use numbook_admin as admin;

#[cfg(feature = "logging")]
pub mod logging;

pub mod prelude {
	#[cfg(feature = "pages")]
	pub use crate::pages::{EventType, IntoView, View};

	#[cfg(feature = "tables")]
	pub use crate::tables::{ColumnDef, DataTable, Pager, RenderHint, RowId, SelectionSet, TableRow};

	#[cfg(feature = "conf")]
	pub use crate::conf::{Settings, SettingsError};

	#[cfg(feature = "client")]
	pub use crate::client::{
		ApiClient, ApiError, BookingApi, ReferenceApi, ReportApi, ReportPeriod, ReportSlice,
		UserContext,
	};

	#[cfg(feature = "admin")]
	pub use crate::admin::{
		AlertLevel, Clipboard, Dialogs, ListConfig, Location, ModalDialogs, PhoneListCoordinator,
		ProviderForm, ReferenceList, ReportCoordinator, TypeNumberForm,
	};
}
