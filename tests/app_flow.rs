//! End-to-end flows: router, outlet, and history working together.

use async_trait::async_trait;
use futures::executor::block_on;
use musette::{
	History, MemoryHistory, Navigation, NavigationId, Region, Route, RouteParams, Router,
	RouterError, RouterOutlet, ServiceRegistry, View, ViewContext, slot_factory, view_factory,
};
use std::rc::Rc;

struct Home;

impl Navigation for Home {
	fn id(&self) -> NavigationId {
		NavigationId("home")
	}
}

struct UserDetail {
	id: String,
}

impl Navigation for UserDetail {
	fn id(&self) -> NavigationId {
		NavigationId("user-detail")
	}

	fn params(&self) -> RouteParams {
		let mut params = RouteParams::new();
		params.path.insert("id".to_string(), self.id.clone());
		params
	}
}

struct Settings;

impl Navigation for Settings {
	fn id(&self) -> NavigationId {
		NavigationId("settings")
	}
}

struct Preferences;

impl Navigation for Preferences {
	fn id(&self) -> NavigationId {
		NavigationId("preferences")
	}
}

/// Renders its navigation's destination and path parameters.
struct EchoView {
	ctx: ViewContext,
}

#[async_trait(?Send)]
impl View for EchoView {
	async fn render(&mut self, target: &Region) {
		target.push(format!("[{}", self.ctx.navigation.id()));
		let params = self.ctx.navigation.params();
		let mut keys: Vec<_> = params.path.iter().collect();
		keys.sort();
		for (key, value) in keys {
			target.push(format!(" {key}={value}"));
		}
		target.push("]");
	}
}

fn echo_view() -> musette::ViewFactory {
	view_factory(|ctx| async move { Box::new(EchoView { ctx }) as Box<dyn View> })
}

struct TextView(&'static str);

#[async_trait(?Send)]
impl View for TextView {
	async fn render(&mut self, target: &Region) {
		target.push(self.0);
	}
}

fn routes() -> Vec<Route> {
	vec![
		Route::new(NavigationId("home"), "/", |_| {
			Some(Rc::new(Home) as Rc<dyn Navigation>)
		})
		.view(echo_view()),
		Route::new(NavigationId("user-detail"), "/users/:id", |params| {
			let id = params.path.get("id")?.clone();
			Some(Rc::new(UserDetail { id }) as Rc<dyn Navigation>)
		})
		.view(echo_view()),
		Route::new(NavigationId("settings"), "/settings", |_| {
			Some(Rc::new(Settings) as Rc<dyn Navigation>)
		})
		.redirect(|_| Rc::new(Preferences) as Rc<dyn Navigation>),
		Route::new(NavigationId("preferences"), "/preferences", |_| {
			Some(Rc::new(Preferences) as Rc<dyn Navigation>)
		})
		.view(echo_view()),
	]
}

fn outlet_for(router: &Rc<Router>) -> Rc<RouterOutlet> {
	let outlet = Rc::new(RouterOutlet::new(
		router.location().clone(),
		Region::new(),
		Rc::new(ServiceRegistry::new()),
		slot_factory(|_services| async { Box::new(TextView("404")) as Box<dyn View> }),
	));
	outlet.attach();
	outlet
}

#[test]
fn test_initial_url_renders_without_navigation() {
	let history = Rc::new(MemoryHistory::new("/users/42"));
	let router = Router::new(routes(), history).unwrap();
	let outlet = outlet_for(&router);

	block_on(outlet.sync());

	assert_eq!(outlet.slot().content(), "[user-detail id=42]");
}

#[test]
fn test_navigate_updates_history_and_output() {
	let history = Rc::new(MemoryHistory::new("/"));
	let router = Router::new(routes(), Rc::clone(&history) as Rc<dyn History>).unwrap();
	let outlet = outlet_for(&router);
	block_on(outlet.sync());

	router
		.navigate(Rc::new(UserDetail {
			id: "7".to_string(),
		}))
		.unwrap();
	block_on(outlet.sync());

	assert_eq!(history.current(), "/users/7");
	assert_eq!(outlet.slot().content(), "[user-detail id=7]");
}

#[test]
fn test_redirect_lands_on_terminal_view() {
	// Navigating to settings pushes both URLs; the terminal route's view
	// renders the settings navigation that initiated the chain.
	let history = Rc::new(MemoryHistory::new("/"));
	let router = Router::new(routes(), Rc::clone(&history) as Rc<dyn History>).unwrap();
	let outlet = outlet_for(&router);
	block_on(outlet.sync());

	router.navigate(Rc::new(Settings)).unwrap();
	block_on(outlet.sync());

	assert_eq!(
		history.pushed(),
		vec!["/settings".to_string(), "/preferences".to_string()]
	);
	assert_eq!(outlet.slot().content(), "[settings]");
}

#[test]
fn test_unknown_url_renders_not_found() {
	let history = Rc::new(MemoryHistory::new("/nowhere"));
	let router = Router::new(routes(), history).unwrap();
	let outlet = outlet_for(&router);

	block_on(outlet.sync());

	assert_eq!(outlet.slot().content(), "404");
}

#[test]
fn test_failed_navigation_leaves_everything_intact() {
	struct Nowhere;

	impl Navigation for Nowhere {
		fn id(&self) -> NavigationId {
			NavigationId("nowhere")
		}
	}

	let history = Rc::new(MemoryHistory::new("/"));
	let router = Router::new(routes(), Rc::clone(&history) as Rc<dyn History>).unwrap();
	let outlet = outlet_for(&router);
	block_on(outlet.sync());

	let result = router.navigate(Rc::new(Nowhere));

	assert_eq!(result, Err(RouterError::NoRoute(NavigationId("nowhere"))));
	assert!(history.pushed().is_empty());
	block_on(outlet.sync());
	assert_eq!(outlet.slot().content(), "[home]");
}

#[test]
fn test_back_and_forward_drive_the_outlet() {
	let history = Rc::new(MemoryHistory::new("/"));
	let router = Router::new(routes(), Rc::clone(&history) as Rc<dyn History>).unwrap();
	let outlet = outlet_for(&router);
	block_on(outlet.sync());

	router
		.navigate(Rc::new(UserDetail {
			id: "1".to_string(),
		}))
		.unwrap();
	block_on(outlet.sync());
	assert_eq!(outlet.slot().content(), "[user-detail id=1]");

	history.back();
	block_on(outlet.sync());
	assert_eq!(outlet.slot().content(), "[home]");

	history.forward();
	block_on(outlet.sync());
	assert_eq!(outlet.slot().content(), "[user-detail id=1]");
}

#[test]
fn test_views_resolve_registered_services() {
	struct Greeting {
		text: String,
	}

	struct GreetingView {
		ctx: ViewContext,
	}

	#[async_trait(?Send)]
	impl View for GreetingView {
		async fn render(&mut self, target: &Region) {
			match self.ctx.services.resolve::<Greeting>() {
				Some(greeting) => target.push(greeting.text.clone()),
				None => target.push("?"),
			}
		}
	}

	let services = Rc::new(ServiceRegistry::new());
	services.register(Rc::new(Greeting {
		text: "bonjour".to_string(),
	}));

	let history = Rc::new(MemoryHistory::new("/"));
	let router = Router::new(
		vec![
			Route::new(NavigationId("home"), "/", |_| {
				Some(Rc::new(Home) as Rc<dyn Navigation>)
			})
			.view(view_factory(|ctx| async move {
				Box::new(GreetingView { ctx }) as Box<dyn View>
			})),
		],
		history,
	)
	.unwrap();

	let outlet = Rc::new(RouterOutlet::new(
		router.location().clone(),
		Region::new(),
		services,
		slot_factory(|_services| async { Box::new(TextView("404")) as Box<dyn View> }),
	));
	outlet.attach();
	block_on(outlet.sync());

	assert_eq!(outlet.slot().content(), "bonjour");
}
