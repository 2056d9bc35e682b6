//! Alerts, confirmations and clipboard access
//!
//! Coordinators never talk to a concrete UI. They await a [`Dialogs`]
//! implementation, so the same flow runs behind a DOM modal, a terminal
//! prompt or a scripted test double.

use std::sync::Arc;

use async_trait::async_trait;
use numbook_pages::html::{button, div, h3, p};
use numbook_pages::{IntoView, View};
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::messages;

/// Severity of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
	Success,
	Info,
	Warning,
	Error,
}

impl AlertLevel {
	/// CSS modifier for this level
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Success => "success",
			Self::Info => "info",
			Self::Warning => "warning",
			Self::Error => "error",
		}
	}
}

/// User-facing dialogs
#[async_trait]
pub trait Dialogs: Send + Sync {
	/// Show a message. Returns once the alert is displayed.
	async fn alert(&self, level: AlertLevel, title: &str, message: &str);

	/// Ask a yes/no question. Dismissing the dialog counts as `false`.
	async fn confirm(&self, title: &str, message: &str) -> bool;

	/// Show `text` and ask whether to copy it. Returns `true` if the user
	/// chose to copy.
	async fn offer_copy(&self, title: &str, text: &str) -> bool;
}

/// Clipboard sink
pub trait Clipboard: Send + Sync {
	/// Replace the clipboard contents
	fn write_text(&self, text: &str) -> Result<(), String>;
}

/// Kind of dialog currently open in [`ModalDialogs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
	Alert(AlertLevel),
	Confirm,
	Copy,
}

/// Dialog waiting for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDialog {
	pub kind: DialogKind,
	pub title: String,
	pub message: String,
}

/// Single-slot modal backing [`Dialogs`] with a rendered overlay.
///
/// Opening a dialog replaces the one shown before; a replaced confirmation
/// resolves as declined.
#[derive(Default)]
pub struct ModalDialogs {
	open: Mutex<Option<(OpenDialog, Option<oneshot::Sender<bool>>)>>,
}

impl ModalDialogs {
	/// Create a closed modal
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Dialog currently shown, if any
	pub fn current(&self) -> Option<OpenDialog> {
		self.open.lock().as_ref().map(|(dialog, _)| dialog.clone())
	}

	/// Answer and close the open dialog
	pub fn respond(&self, accepted: bool) {
		let taken = self.open.lock().take();
		if let Some((_, Some(responder))) = taken {
			let _ = responder.send(accepted);
		}
	}

	fn open(&self, dialog: OpenDialog, responder: Option<oneshot::Sender<bool>>) {
		*self.open.lock() = Some((dialog, responder));
	}

	async fn ask(&self, kind: DialogKind, title: &str, message: &str) -> bool {
		let (tx, rx) = oneshot::channel();
		self.open(
			OpenDialog {
				kind,
				title: title.to_string(),
				message: message.to_string(),
			},
			Some(tx),
		);
		rx.await.unwrap_or(false)
	}

	/// Render the overlay.
	///
	/// Buttons carry the `data-action` keys `dialog-confirm` and
	/// `dialog-cancel`; alerts only have the former.
	pub fn render(self: &Arc<Self>) -> View {
		let Some(dialog) = self.current() else {
			return View::empty();
		};

		let level = match dialog.kind {
			DialogKind::Alert(level) => level.as_str(),
			DialogKind::Confirm | DialogKind::Copy => "confirm",
		};
		let confirm_label = match dialog.kind {
			DialogKind::Alert(_) => "OK",
			DialogKind::Confirm => "Confirm",
			DialogKind::Copy => "Copy",
		};

		let mut actions = div().class("modal-actions");
		if !matches!(dialog.kind, DialogKind::Alert(_)) {
			let modal = Arc::clone(self);
			actions = actions.child(
				button()
					.class("btn btn-secondary")
					.action("dialog-cancel")
					.child("Cancel")
					.on_click(move || modal.respond(false)),
			);
		}
		let modal = Arc::clone(self);
		actions = actions.child(
			button()
				.class("btn btn-primary")
				.action("dialog-confirm")
				.child(confirm_label)
				.on_click(move || modal.respond(true)),
		);

		div()
			.class("modal-overlay")
			.child(
				div()
					.class(format!("modal-dialog modal-{level}"))
					.child(h3().class("modal-title").child(dialog.title))
					.child(p().class("modal-message").child(dialog.message))
					.child(
						matches!(dialog.kind, DialogKind::Copy)
							.then(|| p().class("modal-prompt").child(messages::COPY_PROMPT)),
					)
					.child(actions),
			)
			.into_view()
	}
}

#[async_trait]
impl Dialogs for ModalDialogs {
	async fn alert(&self, level: AlertLevel, title: &str, message: &str) {
		self.open(
			OpenDialog {
				kind: DialogKind::Alert(level),
				title: title.to_string(),
				message: message.to_string(),
			},
			None,
		);
	}

	async fn confirm(&self, title: &str, message: &str) -> bool {
		self.ask(DialogKind::Confirm, title, message).await
	}

	async fn offer_copy(&self, title: &str, text: &str) -> bool {
		self.ask(DialogKind::Copy, title, text).await
	}
}

/// Clipboard kept in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
	contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
	/// Last text written, if any
	pub fn contents(&self) -> Option<String> {
		self.contents.lock().clone()
	}
}

impl Clipboard for MemoryClipboard {
	fn write_text(&self, text: &str) -> Result<(), String> {
		*self.contents.lock() = Some(text.to_string());
		Ok(())
	}
}
