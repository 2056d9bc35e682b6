//! Pagination controls for tables
//!
//! Pages are addressed by a zero-based index, matching the backend's
//! `offset` parameter.

use std::sync::Arc;

use numbook_pages::html::{button, div, span};
use numbook_pages::{IntoView, View};

/// Callback receiving a page index or a page size.
pub type PageCallback = Arc<dyn Fn(u32) + Send + Sync + 'static>;

/// Page sizes offered when none are configured.
pub const DEFAULT_PAGE_SIZES: [u32; 4] = [10, 20, 50, 100];

/// Page buttons shown on each side of the current page.
pub const PAGES_ON_EACH_SIDE: u32 = 2;

/// Page buttons always shown at the start and the end.
pub const PAGES_ON_ENDS: u32 = 1;

/// Pagination state for a list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
	/// Current page (0-indexed)
	pub page: u32,
	/// Number of rows per page
	pub page_size: u32,
	/// Total number of pages reported by the backend
	pub total_pages: u32,
	/// Page sizes the user can pick from
	pub page_sizes: Vec<u32>,
}

impl Pager {
	/// Creates a new pager
	pub fn new(page: u32, page_size: u32, total_pages: u32) -> Self {
		Self {
			page,
			page_size,
			total_pages,
			page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
		}
	}

	/// Returns whether a previous page exists
	pub fn has_prev(&self) -> bool {
		self.page > 0
	}

	/// Returns whether a next page exists
	pub fn has_next(&self) -> bool {
		self.page.saturating_add(1) < self.total_pages
	}

	/// Page indexes to show as buttons, `None` marking a gap.
	///
	/// Short ranges are listed in full. Longer ones keep the first and last
	/// pages plus a window around the current page.
	pub fn visible_pages(&self) -> Vec<Option<u32>> {
		let total = self.total_pages;
		if total <= PAGES_ON_EACH_SIDE * 2 + 1 + PAGES_ON_ENDS * 2 {
			return (0..total).map(Some).collect();
		}

		let current = self.page.min(total - 1);
		let last_middle = total - 1 - PAGES_ON_ENDS;
		let start = current.saturating_sub(PAGES_ON_EACH_SIDE).max(PAGES_ON_ENDS);
		let end = current.saturating_add(PAGES_ON_EACH_SIDE).min(last_middle);

		let mut pages: Vec<Option<u32>> = (0..PAGES_ON_ENDS).map(Some).collect();
		if start > PAGES_ON_ENDS {
			pages.push(None);
		}
		pages.extend((start..=end).map(Some));
		if end < last_middle {
			pages.push(None);
		}
		pages.extend((total - PAGES_ON_ENDS..total).map(Some));
		pages
	}

	/// Renders page navigation and page-size choices.
	///
	/// Buttons carry the `data-action` keys `page-prev`, `page-next`,
	/// `page:{index}` and `page-size:{size}`. Only the pages from
	/// [`Pager::visible_pages`] get a button.
	pub fn render(&self, on_page: PageCallback, on_page_size: PageCallback) -> View {
		let mut nav = div().class("pagination");

		let prev = self.page.saturating_sub(1);
		let mut prev_button = button().action("page-prev").child("Previous");
		if self.has_prev() {
			let on_page = Arc::clone(&on_page);
			prev_button = prev_button.on_click(move || on_page(prev));
		} else {
			prev_button = prev_button.attr_if(true, "disabled");
		}
		nav = nav.child(prev_button);

		for slot in self.visible_pages() {
			let Some(index) = slot else {
				nav = nav.child(span().class("page-gap").child("..."));
				continue;
			};
			let mut page_button = button()
				.action(format!("page:{index}"))
				.child((index + 1).to_string());
			if index == self.page {
				page_button = page_button.class("active");
			}
			let on_page = Arc::clone(&on_page);
			nav = nav.child(page_button.on_click(move || on_page(index)));
		}

		let next = self.page.saturating_add(1);
		let mut next_button = button().action("page-next").child("Next");
		if self.has_next() {
			let on_page = Arc::clone(&on_page);
			next_button = next_button.on_click(move || on_page(next));
		} else {
			next_button = next_button.attr_if(true, "disabled");
		}
		nav = nav.child(next_button);

		let mut sizes = div().class("page-size").child(span().child("Rows per page"));
		for size in &self.page_sizes {
			let size = *size;
			let mut size_button = button()
				.action(format!("page-size:{size}"))
				.child(size.to_string());
			if size == self.page_size {
				size_button = size_button.class("active");
			}
			let on_page_size = Arc::clone(&on_page_size);
			sizes = sizes.child(size_button.on_click(move || on_page_size(size)));
		}

		(nav, sizes).into_view()
	}
}
