//! Data table rendering for numbook
//!
//! A [`DataTable`] is a read-only view over rows owned by someone else. It
//! never fetches data and never mutates it: selection changes, edits,
//! deletes and custom row actions are reported through callbacks.
//!
//! # Features
//!
//! - **Columns**: direct field projection with an optional badge hint
//! - **Selection**: per-row checkboxes plus a select-all header checkbox
//! - **Loading**: a fixed number of skeleton rows while data is in flight
//! - **Errors**: an error message replaces the whole table
//! - **Pagination**: page links and page-size choices for list screens
//!
//! # Example
//!
//! ```rust
//! use numbook_tables::{ColumnDef, DataTable, RowId, TableRow};
//!
//! #[derive(Clone)]
//! struct Provider {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl TableRow for Provider {
//!     fn row_id(&self) -> RowId {
//!         RowId::Int(self.id)
//!     }
//!
//!     fn field(&self, key: &str) -> Option<String> {
//!         match key {
//!             "name" => Some(self.name.clone()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let html = DataTable::new(vec![ColumnDef::new("name", "Name")])
//!     .rows(vec![Provider { id: 1, name: "Viettel".into() }])
//!     .render()
//!     .render_to_string();
//!
//! assert!(html.contains("<td>Viettel</td>"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod pagination;
pub mod row;
pub mod selection;
pub mod table;

// Re-exports for convenience
pub use column::{ColumnDef, RenderHint};
pub use pagination::Pager;
pub use row::{RowId, TableRow};
pub use selection::SelectionSet;
pub use table::{Action, DataTable, SKELETON_ROWS, SelectionBinding};
