//! Search input buffering
//!
//! Typing only updates the buffer. A value is committed either when the
//! debounce window closes or on an explicit submit, and only when it
//! differs from the last committed value.

/// Search buffer with commit tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCommit {
	buffer: String,
	last_committed: String,
	seq: u64,
}

impl SearchCommit {
	/// Start with `committed` as both the buffer and the last committed value
	pub fn new(committed: impl Into<String>) -> Self {
		let committed = committed.into();
		Self {
			buffer: committed.clone(),
			last_committed: committed,
			seq: 0,
		}
	}

	/// Text currently in the input
	pub fn buffer(&self) -> &str {
		&self.buffer
	}

	/// Value the list was last fetched with
	pub fn last_committed(&self) -> &str {
		&self.last_committed
	}

	/// Sequence number of the latest edit
	pub fn seq(&self) -> u64 {
		self.seq
	}

	/// Record a keystroke. Returns a sequence number identifying this edit.
	pub fn input(&mut self, text: impl Into<String>) -> u64 {
		self.buffer = text.into();
		self.seq += 1;
		self.seq
	}

	/// Commit the buffer, trimmed. Returns the new value when it changed.
	///
	/// ```
	/// use numbook_admin::search::SearchCommit;
	///
	/// let mut search = SearchCommit::default();
	/// search.input(" 0903 ");
	/// assert_eq!(search.commit().as_deref(), Some("0903"));
	/// assert_eq!(search.commit(), None);
	/// ```
	pub fn commit(&mut self) -> Option<String> {
		let value = self.buffer.trim();
		if value == self.last_committed {
			return None;
		}
		self.last_committed = value.to_string();
		Some(self.last_committed.clone())
	}

	/// Commit only if no edit happened after `seq`
	pub fn commit_if_current(&mut self, seq: u64) -> Option<String> {
		if seq != self.seq {
			return None;
		}
		self.commit()
	}
}
