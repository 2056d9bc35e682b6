//! numbook pages - view tree for the admin screens
//!
//! Every screen in numbook renders into a [`View`]: a plain tree of elements,
//! text and fragments. A view can be turned into an HTML string for
//! server-side rendering, or walked by a host that mounts it into a DOM.
//!
//! ## Modules
//!
//! - [`view`]: `View`, `ElementView` and the `IntoView` conversion trait
//! - [`html`]: helper constructors for common HTML elements
//!
//! ## Example
//!
//! ```
//! use numbook_pages::html::{div, p};
//! use numbook_pages::IntoView;
//!
//! let view = div()
//!     .attr("class", "card")
//!     .child(p().child("Hello"))
//!     .into_view();
//!
//! assert_eq!(view.render_to_string(), "<div class=\"card\"><p>Hello</p></div>");
//! ```
//!
//! ## Headless events
//!
//! Elements can carry event handlers. Handlers are keyed by the element's
//! `data-action` attribute so that a host without a DOM (tests, terminal
//! front-ends) can fire them through [`View::dispatch`].

#![warn(missing_docs)]

pub mod html;
pub mod view;

pub use view::{ElementView, EventType, IntoView, View, ViewEventHandler};
