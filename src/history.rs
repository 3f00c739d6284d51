//! Browser URL and session-history abstraction.
//!
//! The router never touches ambient browser globals; it talks to a
//! [`History`] implementation injected at construction. [`MemoryHistory`]
//! is a deterministic in-memory backend for native targets and tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Callback invoked when the user navigates with back/forward.
pub type HistoryListener = Rc<dyn Fn()>;

/// Narrow contract over the host's URL and session history.
pub trait History {
	/// Path portion of the current URL (`/a/b`). Hosts that report no path
	/// may return an empty string; the router treats empty as `/`.
	fn current_path(&self) -> String;

	/// Query portion without the leading `?`; empty when absent.
	fn current_query(&self) -> String;

	/// Fragment portion without the leading `#`; empty when absent.
	fn current_fragment(&self) -> String;

	/// Pushes a new entry onto the session history.
	///
	/// Always a push, never a replace: back navigation must be able to
	/// undo every entry the router creates.
	fn push(&self, url: &str);

	/// Installs the back/forward listener, replacing any previous one.
	fn set_listener(&self, listener: HistoryListener);
}

/// In-memory [`History`] backend.
///
/// Keeps the full entry stack and a cursor; [`back`](MemoryHistory::back)
/// and [`forward`](MemoryHistory::forward) move the cursor and fire the
/// listener, mirroring the browser's popstate event.
pub struct MemoryHistory {
	entries: RefCell<Vec<String>>,
	cursor: Cell<usize>,
	listener: RefCell<Option<HistoryListener>>,
	pushed: RefCell<Vec<String>>,
}

impl MemoryHistory {
	/// Creates a history positioned at `initial`, a full in-app URL such as
	/// `/users/42?tab=posts#bio`.
	pub fn new(initial: impl Into<String>) -> Self {
		Self {
			entries: RefCell::new(vec![initial.into()]),
			cursor: Cell::new(0),
			listener: RefCell::new(None),
			pushed: RefCell::new(Vec::new()),
		}
	}

	/// The current full URL.
	pub fn current(&self) -> String {
		self.entries.borrow()[self.cursor.get()].clone()
	}

	/// Every URL pushed since construction, oldest first.
	///
	/// Test instrumentation: unlike the entry stack, this log is never
	/// truncated by [`push`](History::push), so it grows with every push.
	/// Assert against it in tests; long-lived backends should read
	/// [`current`](MemoryHistory::current) instead.
	pub fn pushed(&self) -> Vec<String> {
		self.pushed.borrow().clone()
	}

	/// Moves one entry back and fires the listener. No-op at the oldest
	/// entry.
	pub fn back(&self) {
		let cursor = self.cursor.get();
		if cursor > 0 {
			self.cursor.set(cursor - 1);
			self.notify();
		}
	}

	/// Moves one entry forward and fires the listener. No-op at the newest
	/// entry.
	pub fn forward(&self) {
		let cursor = self.cursor.get();
		if cursor + 1 < self.entries.borrow().len() {
			self.cursor.set(cursor + 1);
			self.notify();
		}
	}

	fn notify(&self) {
		let listener = self.listener.borrow().clone();
		if let Some(listener) = listener {
			listener();
		}
	}
}

impl History for MemoryHistory {
	fn current_path(&self) -> String {
		split_url(&self.current()).0
	}

	fn current_query(&self) -> String {
		split_url(&self.current()).1
	}

	fn current_fragment(&self) -> String {
		split_url(&self.current()).2
	}

	fn push(&self, url: &str) {
		{
			let mut entries = self.entries.borrow_mut();
			// Pushing drops any forward entries, exactly like the browser.
			entries.truncate(self.cursor.get() + 1);
			entries.push(url.to_string());
			self.cursor.set(entries.len() - 1);
		}
		self.pushed.borrow_mut().push(url.to_string());
	}

	fn set_listener(&self, listener: HistoryListener) {
		*self.listener.borrow_mut() = Some(listener);
	}
}

/// Splits a full in-app URL into (path, query, fragment).
fn split_url(url: &str) -> (String, String, String) {
	let (rest, fragment) = match url.split_once('#') {
		Some((rest, fragment)) => (rest, fragment),
		None => (url, ""),
	};
	let (path, query) = match rest.split_once('?') {
		Some((path, query)) => (path, query),
		None => (rest, ""),
	};
	(path.to_string(), query.to_string(), fragment.to_string())
}
