//! Route configuration and the compiled route table.

use crate::error::Result;
use crate::navigation::{Navigation, NavigationId};
use crate::params::RouteParams;
use crate::path::Path;
use crate::view::ViewFactory;
use std::fmt;
use std::rc::Rc;

/// Produces a navigation from matched route parameters, or declines the
/// match by returning `None`.
pub type NavigationResolver = Rc<dyn Fn(&RouteParams) -> Option<Rc<dyn Navigation>>>;

/// Maps the navigation that reached a route to a redirect target.
pub type RedirectFn = Rc<dyn Fn(&dyn Navigation) -> Rc<dyn Navigation>>;

/// A single route definition.
///
/// Associates one navigation destination with a path template, plus an
/// optional view factory and an optional redirect. Immutable once handed to
/// the router.
pub struct Route {
	pub(crate) destination: NavigationId,
	pub(crate) template: String,
	pub(crate) resolver: NavigationResolver,
	pub(crate) view: Option<ViewFactory>,
	pub(crate) redirect: Option<RedirectFn>,
}

impl Route {
	/// Creates a route for `destination` matching `template`.
	///
	/// `resolver` turns matched parameters into the destination's
	/// navigation value; returning `None` declines the match and resolution
	/// reports no match without consulting later routes.
	pub fn new(
		destination: NavigationId,
		template: impl Into<String>,
		resolver: impl Fn(&RouteParams) -> Option<Rc<dyn Navigation>> + 'static,
	) -> Self {
		Self {
			destination,
			template: template.into(),
			resolver: Rc::new(resolver),
			view: None,
			redirect: None,
		}
	}

	/// Sets the view factory rendered when this route terminates
	/// resolution.
	pub fn view(mut self, factory: ViewFactory) -> Self {
		self.view = Some(factory);
		self
	}

	/// Declares a redirect. Chains form when targets also redirect.
	pub fn redirect(
		mut self,
		redirect: impl Fn(&dyn Navigation) -> Rc<dyn Navigation> + 'static,
	) -> Self {
		self.redirect = Some(Rc::new(redirect));
		self
	}

	/// The destination tag this route is registered for.
	pub fn destination(&self) -> NavigationId {
		self.destination
	}

	/// The route's template string.
	pub fn template(&self) -> &str {
		&self.template
	}
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("destination", &self.destination)
			.field("template", &self.template)
			.field("has_view", &self.view.is_some())
			.field("has_redirect", &self.redirect.is_some())
			.finish()
	}
}

/// A route compiled against its template.
pub(crate) struct CompiledRoute {
	pub(crate) route: Route,
	pub(crate) path: Path,
}

/// Ordered, immutable collection of compiled routes.
pub(crate) struct RouteTable {
	entries: Vec<CompiledRoute>,
}

impl RouteTable {
	/// Compiles every template. Any failure is fatal at startup.
	pub(crate) fn compile(routes: Vec<Route>) -> Result<Self> {
		let mut entries = Vec::with_capacity(routes.len());
		for route in routes {
			let path = Path::parse(&route.template)?;
			entries.push(CompiledRoute { route, path });
		}
		Ok(Self { entries })
	}

	/// Declared-order iteration for first-match-wins scanning.
	pub(crate) fn iter(&self) -> impl Iterator<Item = &CompiledRoute> {
		self.entries.iter()
	}

	/// The entry registered for a destination tag.
	pub(crate) fn find(&self, destination: NavigationId) -> Option<&CompiledRoute> {
		self.entries
			.iter()
			.find(|entry| entry.route.destination == destination)
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::RouterError;

	struct Home;

	impl Navigation for Home {
		fn id(&self) -> NavigationId {
			NavigationId("home")
		}
	}

	fn home_route(template: &str) -> Route {
		Route::new(NavigationId("home"), template, |_| {
			Some(Rc::new(Home) as Rc<dyn Navigation>)
		})
	}

	#[test]
	fn test_compile_preserves_declared_order() {
		let table = RouteTable::compile(vec![
			Route::new(NavigationId("a"), "/a", |_| None),
			Route::new(NavigationId("b"), "/b", |_| None),
		])
		.unwrap();

		let destinations: Vec<_> = table.iter().map(|e| e.route.destination()).collect();
		assert_eq!(destinations, vec![NavigationId("a"), NavigationId("b")]);
		assert_eq!(table.len(), 2);
	}

	#[test]
	fn test_compile_failure_is_fatal() {
		let result = RouteTable::compile(vec![home_route("/"), home_route("no-slash")]);

		assert!(matches!(
			result,
			Err(RouterError::InvalidRouteTemplate(_))
		));
	}

	#[test]
	fn test_find_by_destination() {
		let table = RouteTable::compile(vec![
			Route::new(NavigationId("a"), "/a", |_| None),
			Route::new(NavigationId("b"), "/b", |_| None),
		])
		.unwrap();

		assert_eq!(
			table.find(NavigationId("b")).unwrap().route.template(),
			"/b"
		);
		assert!(table.find(NavigationId("c")).is_none());
	}

	#[test]
	fn test_route_debug_flags() {
		let route = home_route("/");
		let debug = format!("{route:?}");

		assert!(debug.contains("has_view: false"));
		assert!(debug.contains("has_redirect: false"));
	}
}
