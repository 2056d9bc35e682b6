//! HTML element constructors
//!
//! Thin helpers returning an [`ElementView`] for the tags the admin screens
//! use, so view code reads `tr().child(td().child(text))` instead of
//! spelling out `ElementView::new("tr")` everywhere.

use crate::view::ElementView;

/// Macro for defining HTML element creation functions
macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		pub fn $name() -> ElementView {
			ElementView::new($tag)
		}
	};
}

define_element!(
	/// Create a `<div>` element
	///
	/// ## Example
	///
	/// ```
	/// use numbook_pages::html::{div, p};
	///
	/// let container = div().class("container").child(p().child("Content"));
	/// assert_eq!(container.tag_name(), "div");
	/// ```
	div, "div"
);

define_element!(
	/// Create a `<span>` element
	span, "span"
);

define_element!(
	/// Create a `<p>` element (paragraph)
	p, "p"
);

define_element!(
	/// Create a `<h3>` element (heading level 3)
	h3, "h3"
);

/// Create a `<button type="button">` element
///
/// Buttons default to `type="button"` so they never submit an enclosing form.
pub fn button() -> ElementView {
	ElementView::new("button").attr("type", "button")
}

define_element!(
	/// Create an `<input>` element (void)
	input, "input"
);

/// Create an `<input type="checkbox">` element
pub fn checkbox() -> ElementView {
	input().attr("type", "checkbox")
}

define_element!(
	/// Create a `<select>` element
	select, "select"
);

define_element!(
	/// Create an `<option>` element
	option, "option"
);

define_element!(
	/// Create a `<table>` element
	table, "table"
);

define_element!(
	/// Create a `<thead>` element
	thead, "thead"
);

define_element!(
	/// Create a `<tbody>` element
	tbody, "tbody"
);

define_element!(
	/// Create a `<tr>` element
	tr, "tr"
);

define_element!(
	/// Create a `<th>` element
	th, "th"
);

define_element!(
	/// Create a `<td>` element
	td, "td"
);

define_element!(
	/// Create a `<ul>` element (unordered list)
	ul, "ul"
);

define_element!(
	/// Create a `<li>` element
	li, "li"
);

define_element!(
	/// Create a `<nav>` element
	nav, "nav"
);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::IntoView;
	use rstest::rstest;

	#[rstest]
	fn test_button_defaults_to_type_button() {
		let html = button().child("Book").into_view().render_to_string();
		assert_eq!(html, "<button type=\"button\">Book</button>");
	}

	#[rstest]
	fn test_checkbox_is_void() {
		let html = checkbox().into_view().render_to_string();
		assert_eq!(html, "<input type=\"checkbox\" />");
	}
}
