//! Location resolution and navigation.

use crate::error::{Result, RouterError};
use crate::history::History;
use crate::navigation::{Navigation, same_destination};
use crate::params::{Query, RouteParams};
use crate::path::Path;
use crate::reactive::StateCell;
use crate::route::{CompiledRoute, Route, RouteTable};
use crate::view::ViewFactory;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error};

/// Upper bound on redirect chain length. Chains longer than this are
/// assumed to be cycles.
pub const MAX_REDIRECT_DEPTH: usize = 32;

/// A resolved page: the navigation that matched and the view that renders
/// it.
///
/// When a redirect chain was followed, `navigation` is still the value the
/// originally matched route resolved; `view` comes from the chain's
/// terminal route.
#[derive(Clone)]
pub struct Page {
	/// The navigation produced by the matched route's resolver.
	pub navigation: Rc<dyn Navigation>,
	/// The terminal route's view factory.
	pub view: ViewFactory,
}

impl fmt::Debug for Page {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Page")
			.field("destination", &self.navigation.id())
			.finish()
	}
}

/// Reactive holder of the current page; `None` means no route matched.
///
/// Change notification is gated by navigation identity: moving between two
/// instances of the same destination does not notify, even when their
/// parameters differ. Observe parameters separately if you need them.
pub type LocationStore = StateCell<Option<Page>>;

fn location_store() -> LocationStore {
	StateCell::new(None, |old: &Option<Page>, new: &Option<Page>| {
		match (old, new) {
			(Some(old), Some(new)) => {
				same_destination(old.navigation.as_ref(), new.navigation.as_ref())
			}
			(None, None) => true,
			_ => false,
		}
	})
}

/// The navigation router.
///
/// Owns the compiled route table and the location store. Resolution scans
/// the table in declared order and the first matching route wins —
/// overlapping patterns are order-sensitive by design.
pub struct Router {
	table: RouteTable,
	history: Rc<dyn History>,
	location: LocationStore,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.table.len())
			.finish()
	}
}

impl Router {
	/// Builds the router, resolves the current URL into the location store,
	/// and subscribes to back/forward events.
	///
	/// # Errors
	///
	/// Template compilation failures and initial-resolution configuration
	/// errors (missing view, unregistered redirect target) are returned;
	/// they are fatal at startup.
	pub fn new(routes: Vec<Route>, history: Rc<dyn History>) -> Result<Rc<Self>> {
		let table = RouteTable::compile(routes)?;
		let router = Rc::new(Self {
			table,
			history: Rc::clone(&history),
			location: location_store(),
		});

		let initial = router.resolve_current_location()?;
		router.location.set(initial);

		// Back/forward re-runs resolution against the restored URL.
		let weak = Rc::downgrade(&router);
		history.set_listener(Rc::new(move || {
			if let Some(router) = weak.upgrade() {
				router.sync_to_history();
			}
		}));

		Ok(router)
	}

	/// The reactive location.
	pub fn location(&self) -> &LocationStore {
		&self.location
	}

	/// Resolves the URL currently held by the history backend.
	///
	/// Scans the table in declared order; the first route whose path
	/// matches wins. If that route's resolver declines the parameters,
	/// resolution stops and reports no match — later routes are not
	/// consulted.
	///
	/// # Errors
	///
	/// `MissingView` when the terminal route has no view factory, plus any
	/// redirect-chain failure.
	pub fn resolve_current_location(&self) -> Result<Option<Page>> {
		let mut path = self.history.current_path();
		if path.is_empty() {
			path = "/".to_string();
		}

		let mut matched: Option<(&CompiledRoute, HashMap<String, String>)> = None;
		for entry in self.table.iter() {
			if let Some(bindings) = entry.path.matches(&path)? {
				matched = Some((entry, bindings));
				break;
			}
		}

		let Some((entry, bindings)) = matched else {
			debug!(%path, "no route matched");
			return Ok(None);
		};

		let params = RouteParams {
			path: bindings,
			query: Query::parse(&self.history.current_query()),
			hash: self.history.current_fragment(),
		};

		// A declining resolver ends resolution here; later routes are not
		// tried.
		let Some(navigation) = (entry.route.resolver)(&params) else {
			debug!(%path, destination = %entry.route.destination(), "resolver declined");
			return Ok(None);
		};

		let terminal = self.follow_redirects(entry, Rc::clone(&navigation))?;
		let view = terminal
			.route
			.view
			.clone()
			.ok_or(RouterError::MissingView(terminal.route.destination()))?;

		Ok(Some(Page { navigation, view }))
	}

	/// Navigates to an explicit destination.
	///
	/// Pushes a new history entry — never a replace, so back navigation can
	/// undo it — follows any redirect chain (each hop pushes its resolved
	/// URL), and writes the resulting page into the location store.
	/// Subscribers are notified synchronously with respect to the push.
	///
	/// # Errors
	///
	/// `NoRoute` when the destination has no registered route; no URL is
	/// pushed in that case. `MissingParameter`, `MissingView`, and
	/// `RedirectLoop` as resolution dictates.
	pub fn navigate(&self, navigation: Rc<dyn Navigation>) -> Result<()> {
		let entry = self
			.table
			.find(navigation.id())
			.ok_or(RouterError::NoRoute(navigation.id()))?;

		let url = build_url(&entry.path, &navigation.params())?;
		debug!(destination = %navigation.id(), %url, "navigate");
		self.history.push(&url);

		let terminal = self.follow_redirects(entry, Rc::clone(&navigation))?;
		let view = terminal
			.route
			.view
			.clone()
			.ok_or(RouterError::MissingView(terminal.route.destination()))?;

		self.location.set(Some(Page { navigation, view }));
		Ok(())
	}

	/// Walks the redirect chain from `entry`, pushing each hop's resolved
	/// URL, and returns the terminal route.
	fn follow_redirects<'a>(
		&'a self,
		entry: &'a CompiledRoute,
		navigation: Rc<dyn Navigation>,
	) -> Result<&'a CompiledRoute> {
		let mut route = entry;
		let mut current = navigation;
		let mut hops = 0usize;

		while let Some(redirect) = &route.route.redirect {
			hops += 1;
			if hops > MAX_REDIRECT_DEPTH {
				return Err(RouterError::RedirectLoop(MAX_REDIRECT_DEPTH));
			}

			let target = redirect(current.as_ref());
			let next = self
				.table
				.find(target.id())
				.ok_or(RouterError::NoRoute(target.id()))?;

			let url = build_url(&next.path, &target.params())?;
			debug!(from = %route.route.destination(), to = %target.id(), %url, "redirect");
			self.history.push(&url);

			route = next;
			current = target;
		}

		Ok(route)
	}

	fn sync_to_history(&self) {
		match self.resolve_current_location() {
			Ok(page) => self.location.set(page),
			Err(err) => {
				// A configuration error reached from a history event has no
				// caller to propagate to; surface the fallback state.
				error!(%err, "history resolution failed");
				self.location.set(None);
			}
		}
	}
}

/// Composes path + `?query` + `#hash` for a navigation's parameters.
fn build_url(path: &Path, params: &RouteParams) -> Result<String> {
	let mut url = path.resolve(&params.path)?;

	let query = params.query.to_query_string();
	if !query.is_empty() {
		url.push('?');
		url.push_str(&query);
	}

	if !params.hash.is_empty() {
		url.push('#');
		url.push_str(&params.hash);
	}

	Ok(url)
}
