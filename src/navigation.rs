//! Navigation identity values.

use crate::params::RouteParams;
use std::fmt;

/// Stable tag identifying one addressable destination.
///
/// Route lookups key on this tag rather than on any runtime type machinery,
/// so two [`Navigation`] implementations describe the same destination iff
/// their tags are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationId(pub &'static str);

impl fmt::Display for NavigationId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// A typed identity value for one addressable page.
///
/// Implementations carry whatever parameters the page needs; [`params`]
/// re-injects them when the router rebuilds the page's URL.
///
/// [`params`]: Navigation::params
pub trait Navigation: 'static {
	/// The destination tag this navigation belongs to.
	fn id(&self) -> NavigationId;

	/// Route parameters carried by this navigation.
	///
	/// Defaults to no parameters, which suits static destinations.
	fn params(&self) -> RouteParams {
		RouteParams::default()
	}
}

/// Destination equality: same tag, parameters ignored.
///
/// Deliberately shallow — it exists so location changes between two
/// instances of the same destination coalesce. It is not a general value
/// equality; compare parameters explicitly when you need one.
pub fn same_destination(a: &dyn Navigation, b: &dyn Navigation) -> bool {
	a.id() == b.id()
}
