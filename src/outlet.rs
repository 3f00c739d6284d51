//! The outlet: mounts and unmounts page views as the location changes.

use crate::reactive::SubscriberId;
use crate::router::LocationStore;
use crate::services::ServiceRegistry;
use crate::view::{Region, RenderBuffer, SlotFactory, View, ViewContext};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Swaps page views in and out of a live [`Region`] as the location store
/// changes.
///
/// Swaps are strictly serialized: the outgoing view is disposed to
/// completion before the incoming view is built, and the incoming content
/// becomes visible in a single buffered flush. A location change that
/// arrives while a swap is in flight supersedes it; the superseded swap
/// disposes whatever it had built and stops.
pub struct RouterOutlet {
	location: LocationStore,
	services: Rc<ServiceRegistry>,
	not_found: SlotFactory,
	loading: Option<SlotFactory>,
	slot: Region,
	current: RefCell<Option<Box<dyn View>>>,
	generation: Cell<u64>,
	dirty: Rc<Cell<bool>>,
}

impl RouterOutlet {
	/// Creates an outlet rendering into `slot`.
	///
	/// `not_found` renders whenever the location holds no page.
	pub fn new(
		location: LocationStore,
		slot: Region,
		services: Rc<ServiceRegistry>,
		not_found: SlotFactory,
	) -> Self {
		Self {
			location,
			services,
			not_found,
			loading: None,
			slot,
			current: RefCell::new(None),
			generation: Cell::new(0),
			dirty: Rc::new(Cell::new(false)),
		}
	}

	/// Sets a placeholder shown while the incoming view is being built.
	///
	/// Without one, the outgoing content stays visible until the flush.
	pub fn loading(mut self, factory: SlotFactory) -> Self {
		self.loading = Some(factory);
		self
	}

	/// Subscribes to the location store and marks the initial mount
	/// pending. Call [`sync`](RouterOutlet::sync) to apply.
	pub fn attach(self: &Rc<Self>) -> SubscriberId {
		self.dirty.set(true);
		let dirty = Rc::clone(&self.dirty);
		self.location.subscribe(move |_| dirty.set(true))
	}

	/// The region this outlet renders into.
	pub fn slot(&self) -> &Region {
		&self.slot
	}

	/// Applies every pending location change, one swap at a time.
	///
	/// Changes that land while a swap is running are picked up by the next
	/// loop iteration, so callers can drive this from any task without
	/// overlapping mounts.
	pub async fn sync(&self) {
		while self.dirty.replace(false) {
			self.swap().await;
		}
	}

	/// One full swap: dispose outgoing, optionally show loading, build the
	/// incoming view off-screen, flush.
	async fn swap(&self) {
		let token = self.generation.get().wrapping_add(1);
		self.generation.set(token);

		// Release the borrow before awaiting: another task may enter swap
		// while the dispose is parked.
		let outgoing = self.current.borrow_mut().take();
		if let Some(mut outgoing) = outgoing {
			outgoing.dispose().await;
		}
		if self.is_stale(token) {
			return;
		}

		let mut loading = None;
		if let Some(factory) = &self.loading {
			let mut view = factory(Rc::clone(&self.services)).await;
			if self.is_stale(token) {
				view.dispose().await;
				return;
			}
			self.slot.clear();
			view.render(&self.slot).await;
			if self.is_stale(token) {
				self.dispose_loading(Some(view)).await;
				return;
			}
			loading = Some(view);
		}

		let page = self.location.get();
		let mut incoming = match &page {
			Some(page) => {
				debug!(destination = %page.navigation.id(), "mounting page view");
				(page.view)(ViewContext {
					navigation: Rc::clone(&page.navigation),
					services: Rc::clone(&self.services),
				})
				.await
			}
			None => {
				debug!("mounting not-found view");
				(self.not_found)(Rc::clone(&self.services)).await
			}
		};
		if self.is_stale(token) {
			incoming.dispose().await;
			self.dispose_loading(loading).await;
			return;
		}

		let buffer = RenderBuffer::new(&self.slot);
		incoming.render(buffer.region()).await;
		if self.is_stale(token) {
			incoming.dispose().await;
			self.dispose_loading(loading).await;
			return;
		}

		self.dispose_loading(loading).await;
		if self.is_stale(token) {
			incoming.dispose().await;
			return;
		}

		buffer.flush();
		*self.current.borrow_mut() = Some(incoming);
	}

	async fn dispose_loading(&self, loading: Option<Box<dyn View>>) {
		if let Some(mut view) = loading {
			view.dispose().await;
		}
	}

	fn is_stale(&self, token: u64) -> bool {
		self.generation.get() != token
	}
}

impl fmt::Debug for RouterOutlet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterOutlet")
			.field("mounted", &self.current.borrow().is_some())
			.field("has_loading", &self.loading.is_some())
			.finish()
	}
}
