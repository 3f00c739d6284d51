//! Equality-gated reactive state.
//!
//! [`StateCell`] is a deliberately small reactive primitive: a shared value
//! plus a subscriber list, where `set` notifies only when the supplied
//! equality predicate says the value actually changed.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies a subscriber for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(usize);

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// A reactive cell with equality-gated change notification.
///
/// Clones share the underlying value and subscriber list, so any clone may
/// read, write, or subscribe. Not thread-safe: the router runs on a
/// single-threaded cooperative event loop.
pub struct StateCell<T> {
	inner: Rc<Inner<T>>,
}

struct Inner<T> {
	value: RefCell<T>,
	equals: Box<dyn Fn(&T, &T) -> bool>,
	subscribers: RefCell<Vec<(SubscriberId, Subscriber<T>)>>,
	next_id: Cell<usize>,
}

impl<T> Clone for StateCell<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: 'static> StateCell<T> {
	/// Creates a cell gated by the given equality predicate.
	pub fn new(value: T, equals: impl Fn(&T, &T) -> bool + 'static) -> Self {
		Self {
			inner: Rc::new(Inner {
				value: RefCell::new(value),
				equals: Box::new(equals),
				subscribers: RefCell::new(Vec::new()),
				next_id: Cell::new(0),
			}),
		}
	}

	/// Current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.inner.value.borrow().clone()
	}

	/// Reads the value through a closure without cloning it.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.inner.value.borrow())
	}

	/// Replaces the value.
	///
	/// Subscribers are notified synchronously unless the equality predicate
	/// deems the old and new values equal.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		let changed = {
			let current = self.inner.value.borrow();
			!(self.inner.equals)(&current, &value)
		};

		*self.inner.value.borrow_mut() = value.clone();

		if changed {
			// Snapshot so a subscriber may subscribe, unsubscribe, or set
			// re-entrantly; no cell borrow is held during the calls.
			let subscribers: Vec<Subscriber<T>> = self
				.inner
				.subscribers
				.borrow()
				.iter()
				.map(|(_, subscriber)| Rc::clone(subscriber))
				.collect();

			for subscriber in subscribers {
				subscriber(&value);
			}
		}
	}

	/// Registers a change subscriber.
	///
	/// The callback runs synchronously from within [`set`](Self::set).
	pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriberId {
		let id = SubscriberId(self.inner.next_id.get());
		self.inner.next_id.set(id.0 + 1);
		self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));
		id
	}

	/// Removes a subscriber. Unknown ids are ignored.
	pub fn unsubscribe(&self, id: SubscriberId) {
		self.inner
			.subscribers
			.borrow_mut()
			.retain(|(existing, _)| *existing != id);
	}
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StateCell")
			.field("value", &self.inner.value.borrow())
			.field("subscribers", &self.inner.subscribers.borrow().len())
			.finish()
	}
}
