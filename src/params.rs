//! Route parameters extracted from a matched URL.

use std::collections::HashMap;
use url::form_urlencoded;

/// Multi-valued URL query with `application/x-www-form-urlencoded` semantics.
///
/// Pairs keep their document order and a name may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	pairs: Vec<(String, String)>,
}

impl Query {
	/// An empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a raw query string (without the leading `?`).
	pub fn parse(raw: &str) -> Self {
		let pairs = form_urlencoded::parse(raw.as_bytes())
			.into_owned()
			.collect();
		Self { pairs }
	}

	/// First value for `name`, if any.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Every value for `name`, in document order.
	pub fn get_all(&self, name: &str) -> Vec<&str> {
		self.pairs
			.iter()
			.filter(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
			.collect()
	}

	/// Appends a pair, keeping any existing values for the same name.
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.pairs.push((name.into(), value.into()));
	}

	/// Returns whether the query has no pairs.
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Number of pairs.
	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	/// Serializes back to a query string (without the leading `?`).
	pub fn to_query_string(&self) -> String {
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		for (key, value) in &self.pairs {
			serializer.append_pair(key, value);
		}
		serializer.finish()
	}
}

/// Parameters extracted from a matched URL.
#[derive(Debug, Clone, Default)]
pub struct RouteParams {
	/// Values captured by path placeholders, keyed by placeholder name.
	pub path: HashMap<String, String>,
	/// The URL query.
	pub query: Query,
	/// The fragment without its leading `#`; empty when absent.
	pub hash: String,
}

impl RouteParams {
	/// Params with no placeholder values, query, or fragment.
	pub fn new() -> Self {
		Self::default()
	}
}
