//! Route template compilation and path matching.
//!
//! A route template like `/users/:id/posts` compiles into a [`Path`]:
//! all-literal templates collapse to [`Path::Static`] and match one exact
//! path; templates with one or more `:name` placeholders become
//! [`Path::Dynamic`] and match per-segment.

use crate::error::{Result, RouterError};
use std::collections::HashMap;
use std::fmt;

/// One segment of a dynamic path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Matched by exact, case-sensitive string equality. No decoding.
	Literal(String),
	/// Captures the concrete segment under the given name.
	Placeholder(String),
}

/// A compiled route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path {
	/// A template without placeholders.
	Static(String),
	/// A template with at least one placeholder, in declared segment order.
	Dynamic(Vec<Segment>),
}

impl Path {
	/// Compiles a route template.
	///
	/// Templates must begin with `/`; the bare `/` compiles to
	/// `Static("/")`. Empty segments (`/a//b`) and empty placeholder names
	/// (`/:`) are rejected.
	///
	/// Duplicate placeholder names are not rejected; during extraction the
	/// last occurrence wins.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidRouteTemplate`] for malformed
	/// templates.
	pub fn parse(template: &str) -> Result<Self> {
		let parts: Vec<&str> = template.split('/').collect();

		// Reject the empty template and templates not starting with '/'.
		if !parts[0].is_empty() || parts.len() == 1 {
			return Err(RouterError::InvalidRouteTemplate(template.to_string()));
		}

		// The bare root template.
		if parts.len() == 2 && parts[1].is_empty() {
			return Ok(Self::Static("/".to_string()));
		}

		let mut segments = Vec::with_capacity(parts.len() - 1);
		let mut literal = String::new();
		let mut dynamic = false;

		for part in &parts[1..] {
			if part.is_empty() {
				return Err(RouterError::InvalidRouteTemplate(template.to_string()));
			}

			if let Some(name) = part.strip_prefix(':') {
				if name.is_empty() {
					return Err(RouterError::InvalidRouteTemplate(template.to_string()));
				}
				dynamic = true;
				segments.push(Segment::Placeholder(name.to_string()));
			} else {
				segments.push(Segment::Literal((*part).to_string()));
			}

			literal.push('/');
			literal.push_str(part);
		}

		if dynamic {
			Ok(Self::Dynamic(segments))
		} else {
			// All-literal templates collapse back to their exact path.
			Ok(Self::Static(literal))
		}
	}

	/// Attempts to match a concrete path, extracting placeholder bindings.
	///
	/// Returns `Ok(None)` when the path does not match: the segment counts
	/// differ, or a literal segment compares unequal. Static paths match by
	/// whole-string equality and never bind parameters.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPath`] when a dynamic pattern is given
	/// a path that cannot be split into segments at all (it contains no
	/// `/`).
	pub fn matches(&self, path: &str) -> Result<Option<HashMap<String, String>>> {
		match self {
			Self::Static(literal) => Ok((literal == path).then(HashMap::new)),
			Self::Dynamic(segments) => {
				let parts: Vec<&str> = path.split('/').collect();

				if parts.len() == 1 {
					return Err(RouterError::InvalidPath(path.to_string()));
				}
				if parts.len() - 1 != segments.len() {
					return Ok(None);
				}

				let mut params = HashMap::new();

				for (segment, part) in segments.iter().zip(&parts[1..]) {
					match segment {
						Segment::Literal(literal) => {
							if literal != part {
								return Ok(None);
							}
						}
						Segment::Placeholder(name) => {
							// Later duplicates overwrite earlier captures.
							params.insert(name.clone(), (*part).to_string());
						}
					}
				}

				Ok(Some(params))
			}
		}
	}

	/// Rebuilds a concrete path by substituting placeholder values.
	///
	/// Static paths resolve to themselves, ignoring `params`.
	///
	/// # Errors
	///
	/// Returns [`RouterError::MissingParameter`] when a placeholder has no
	/// value in `params`.
	pub fn resolve(&self, params: &HashMap<String, String>) -> Result<String> {
		match self {
			Self::Static(literal) => Ok(literal.clone()),
			Self::Dynamic(segments) => {
				let mut path = String::new();

				for segment in segments {
					let value = match segment {
						Segment::Literal(literal) => literal.as_str(),
						Segment::Placeholder(name) => params
							.get(name)
							.ok_or_else(|| RouterError::MissingParameter(name.clone()))?
							.as_str(),
					};
					path.push('/');
					path.push_str(value);
				}

				Ok(path)
			}
		}
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Static(literal) => f.write_str(literal),
			Self::Dynamic(segments) => {
				for segment in segments {
					match segment {
						Segment::Literal(literal) => write!(f, "/{literal}")?,
						Segment::Placeholder(name) => write!(f, "/:{name}")?,
					}
				}
				Ok(())
			}
		}
	}
}
