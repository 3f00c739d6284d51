//! Client-side navigation for single-page applications.
//!
//! Applications declare their destinations as plain types implementing
//! [`Navigation`], register a [`Route`] per destination, and hand the list
//! to a [`Router`]. The router matches URLs against compiled path
//! templates, follows redirect chains, and publishes the resulting
//! [`Page`] through a reactive location store. A [`RouterOutlet`] observes
//! that store and swaps page views in and out of a live [`Region`],
//! disposing the outgoing view before the incoming one becomes visible.
//!
//! The browser is abstracted behind the [`History`] trait; [`MemoryHistory`]
//! backs native targets and tests.
//!
//! ```no_run
//! use musette::{
//! 	MemoryHistory, Navigation, NavigationId, Route, Router, view_factory,
//! };
//! use std::rc::Rc;
//!
//! struct Home;
//!
//! impl Navigation for Home {
//! 	fn id(&self) -> NavigationId {
//! 		NavigationId("home")
//! 	}
//! }
//!
//! # struct HomeView;
//! # #[async_trait::async_trait(?Send)]
//! # impl musette::View for HomeView {
//! # 	async fn render(&mut self, target: &musette::Region) {
//! # 		target.push("home");
//! # 	}
//! # }
//! let routes = vec![
//! 	Route::new(NavigationId("home"), "/", |_| {
//! 		Some(Rc::new(Home) as Rc<dyn Navigation>)
//! 	})
//! 	.view(view_factory(|_ctx| async {
//! 		Box::new(HomeView) as Box<dyn musette::View>
//! 	})),
//! ];
//! let history = Rc::new(MemoryHistory::new("/"));
//! let router = Router::new(routes, history)?;
//! router.navigate(Rc::new(Home))?;
//! # Ok::<(), musette::RouterError>(())
//! ```

pub mod error;
pub mod history;
pub mod navigation;
pub mod outlet;
pub mod params;
pub mod path;
pub mod reactive;
pub mod route;
pub mod router;
pub mod services;
pub mod view;

pub use error::{Result, RouterError};
pub use history::{History, HistoryListener, MemoryHistory};
pub use navigation::{Navigation, NavigationId, same_destination};
pub use outlet::RouterOutlet;
pub use params::{Query, RouteParams};
pub use path::{Path, Segment};
pub use reactive::{StateCell, SubscriberId};
pub use route::{NavigationResolver, RedirectFn, Route};
pub use router::{LocationStore, MAX_REDIRECT_DEPTH, Page, Router};
pub use services::ServiceRegistry;
pub use view::{
	Region, RenderBuffer, SlotFactory, View, ViewContext, ViewFactory, slot_factory, view_factory,
};
