//! Error types for routing operations.

use crate::navigation::NavigationId;
use thiserror::Error;

/// Error type for router operations.
///
/// Every variant surfaces a configuration or programming mistake and is
/// raised immediately, never retried. A URL that simply matches no route is
/// not an error: the location store holds `None` and the outlet renders its
/// not-found fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A route template failed to compile.
	#[error("'{0}' is not a valid route template")]
	InvalidRouteTemplate(String),

	/// A concrete path could not be split into segments at all.
	#[error("'{0}' is not a valid path")]
	InvalidPath(String),

	/// No route has been registered for the navigation destination.
	#[error("no route has been defined for '{0}'")]
	NoRoute(NavigationId),

	/// A placeholder value was absent when rebuilding a concrete path.
	#[error("parameter '{0}' not found")]
	MissingParameter(String),

	/// The matched (or redirected-to) route has no view factory.
	#[error("no view has been defined for '{0}'")]
	MissingView(NavigationId),

	/// A redirect chain exceeded the maximum number of hops.
	#[error("redirect chain exceeded {0} hops")]
	RedirectLoop(usize),
}

/// Result type for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
