//! By-type service lookup.
//!
//! The host application registers shared instances (the router itself, API
//! clients, ...) and views resolve them by type from their
//! [`ViewContext`](crate::view::ViewContext).

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A minimal by-type registry.
#[derive(Default)]
pub struct ServiceRegistry {
	entries: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
}

impl ServiceRegistry {
	/// An empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `service`, replacing any previous instance of the type.
	pub fn register<T: 'static>(&self, service: Rc<T>) {
		self.entries
			.borrow_mut()
			.insert(TypeId::of::<T>(), service);
	}

	/// Resolves a previously registered instance by type.
	pub fn resolve<T: 'static>(&self) -> Option<Rc<T>> {
		self.entries
			.borrow()
			.get(&TypeId::of::<T>())
			.cloned()
			.and_then(|any| any.downcast::<T>().ok())
	}
}

impl fmt::Debug for ServiceRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ServiceRegistry")
			.field("entries", &self.entries.borrow().len())
			.finish()
	}
}
