//! View enum and IntoView trait for component rendering.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Attribute used to address an element from [`View::dispatch`].
pub const ACTION_ATTR: &str = "data-action";

/// Type alias for event handler functions.
pub type ViewEventHandler = Arc<dyn Fn() + Send + Sync + 'static>;

/// DOM event kinds a view element can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
	/// `click`
	Click,
	/// `change` (checkboxes, selects)
	Change,
	/// `input` (text fields)
	Input,
	/// `keydown`
	KeyDown,
	/// `submit`
	Submit,
}

impl EventType {
	/// Returns the DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			EventType::Click => "click",
			EventType::Change => "change",
			EventType::Input => "input",
			EventType::KeyDown => "keydown",
			EventType::Submit => "submit",
		}
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A unified representation of renderable content.
///
/// View is the core abstraction for all UI elements.
/// It can represent DOM elements, text nodes or fragments.
#[derive(Debug)]
pub enum View {
	/// A DOM element.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple views (no wrapper element).
	Fragment(Vec<View>),
	/// An empty view (renders nothing).
	Empty,
}

/// Represents a DOM element in the view tree.
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
	is_void: bool,
	event_handlers: Vec<(EventType, ViewEventHandler)>,
}

impl fmt::Debug for ElementView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementView")
			.field("tag", &self.tag)
			.field("attrs", &self.attrs)
			.field("children", &self.children)
			.field("is_void", &self.is_void)
			.field("event_handlers_count", &self.event_handlers.len())
			.finish()
	}
}

impl ElementView {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
			event_handlers: Vec::new(),
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds an attribute only when `condition` holds.
	///
	/// Boolean HTML attributes (`checked`, `disabled`) are rendered with
	/// their own name as value.
	pub fn attr_if(self, condition: bool, name: &'static str) -> Self {
		if condition {
			self.attr(name, name)
		} else {
			self
		}
	}

	/// Sets the `class` attribute.
	pub fn class(self, class: impl Into<Cow<'static, str>>) -> Self {
		self.attr("class", class)
	}

	/// Sets the `data-action` key used by [`View::dispatch`].
	pub fn action(self, key: impl Into<Cow<'static, str>>) -> Self {
		self.attr(ACTION_ATTR, key)
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_view()));
		self
	}

	/// Adds an event handler.
	pub fn on(mut self, event_type: EventType, handler: ViewEventHandler) -> Self {
		self.event_handlers.push((event_type, handler));
		self
	}

	/// Adds a click handler.
	pub fn on_click<F>(self, handler: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.on(EventType::Click, Arc::new(handler))
	}

	/// Adds a change handler.
	pub fn on_change<F>(self, handler: F) -> Self
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.on(EventType::Change, Arc::new(handler))
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the value of the first attribute called `name`.
	pub fn attr_value(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_ref())
	}

	/// Returns whether the element carries a boolean attribute.
	pub fn has_attr(&self, name: &str) -> bool {
		self.attr_value(name).is_some()
	}

	/// Returns whether `class` is one of the element's classes.
	pub fn has_class(&self, class: &str) -> bool {
		self.attr_value("class")
			.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Returns the event handlers.
	pub fn event_handlers(&self) -> &[(EventType, ViewEventHandler)] {
		&self.event_handlers
	}
}

impl View {
	/// Creates an element view.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_view()).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Renders the view to an HTML string.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			View::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					for child in el.child_views() {
						child.render_to_string_inner(output);
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			View::Text(text) => {
				output.push_str(&html_escape(text));
			}
			View::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			View::Empty => {}
		}
	}

	/// Concatenated text of every text node below this view.
	pub fn text_content(&self) -> String {
		let mut output = String::new();
		self.collect_text(&mut output);
		output
	}

	fn collect_text(&self, output: &mut String) {
		match self {
			View::Element(el) => el.children.iter().for_each(|c| c.collect_text(output)),
			View::Text(text) => output.push_str(text),
			View::Fragment(children) => children.iter().for_each(|c| c.collect_text(output)),
			View::Empty => {}
		}
	}

	/// Visits every element in document order.
	pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ElementView)) {
		match self {
			View::Element(el) => {
				visit(el);
				for child in &el.children {
					child.walk(visit);
				}
			}
			View::Fragment(children) => {
				for child in children {
					child.walk(visit);
				}
			}
			View::Text(_) | View::Empty => {}
		}
	}

	/// Returns every element matching `predicate`, in document order.
	pub fn select<'a>(&'a self, predicate: impl Fn(&ElementView) -> bool) -> Vec<&'a ElementView> {
		let mut found = Vec::new();
		self.walk(&mut |el| {
			if predicate(el) {
				found.push(el);
			}
		});
		found
	}

	/// Finds the first element whose `data-action` equals `key`.
	pub fn find_action(&self, key: &str) -> Option<&ElementView> {
		self.select(|el| el.attr_value(ACTION_ATTR) == Some(key))
			.into_iter()
			.next()
	}

	/// Fires `event` on the element addressed by `key`.
	///
	/// Returns `true` when at least one handler ran. Elements without a
	/// handler for `event` (for example disabled checkboxes) return `false`.
	pub fn dispatch(&self, key: &str, event: EventType) -> bool {
		let Some(el) = self.find_action(key) else {
			return false;
		};
		let mut fired = false;
		for (kind, handler) in el.event_handlers() {
			if *kind == event {
				handler();
				fired = true;
			}
		}
		fired
	}
}

/// Trait for types that can be converted into a View.
pub trait IntoView {
	/// Converts self into a View.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		match self {
			Some(v) => v.into_view(),
			None => View::Empty,
		}
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(|v| v.into_view()).collect())
	}
}

impl IntoView for () {
	fn into_view(self) -> View {
		View::Empty
	}
}

impl<A: IntoView, B: IntoView> IntoView for (A, B) {
	fn into_view(self) -> View {
		View::Fragment(vec![self.0.into_view(), self.1.into_view()])
	}
}

impl<A: IntoView, B: IntoView, C: IntoView> IntoView for (A, B, C) {
	fn into_view(self) -> View {
		View::Fragment(vec![
			self.0.into_view(),
			self.1.into_view(),
			self.2.into_view(),
		])
	}
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}
