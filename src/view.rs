//! Host rendering contract.
//!
//! The router drives views through a deliberately small surface: a factory
//! builds a [`View`], the view renders into a [`Region`], and the outlet
//! disposes it before mounting a replacement. Rendering and disposal may
//! both await arbitrary external work.

use crate::navigation::Navigation;
use crate::services::ServiceRegistry;
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// A mounted page view.
#[async_trait(?Send)]
pub trait View {
	/// Renders the view's content into `target`. May await external work
	/// such as data fetches.
	async fn render(&mut self, target: &Region);

	/// Releases the view's resources.
	///
	/// The outlet awaits this to completion before mounting any
	/// replacement.
	async fn dispose(&mut self) {}
}

/// Everything a page view receives when it is constructed.
pub struct ViewContext {
	/// The navigation that resolved to this view.
	pub navigation: Rc<dyn Navigation>,
	/// By-type service lookup.
	pub services: Rc<ServiceRegistry>,
}

/// Builds the view for a matched page. Construction may itself be
/// asynchronous.
pub type ViewFactory = Rc<dyn Fn(ViewContext) -> LocalBoxFuture<'static, Box<dyn View>>>;

/// Builds an auxiliary view — loading placeholder or not-found fallback —
/// that has no navigation of its own.
pub type SlotFactory = Rc<dyn Fn(Rc<ServiceRegistry>) -> LocalBoxFuture<'static, Box<dyn View>>>;

/// Wraps an async closure into a [`ViewFactory`].
pub fn view_factory<F, Fut>(f: F) -> ViewFactory
where
	F: Fn(ViewContext) -> Fut + 'static,
	Fut: Future<Output = Box<dyn View>> + 'static,
{
	Rc::new(move |ctx| Box::pin(f(ctx)))
}

/// Wraps an async closure into a [`SlotFactory`].
pub fn slot_factory<F, Fut>(f: F) -> SlotFactory
where
	F: Fn(Rc<ServiceRegistry>) -> Fut + 'static,
	Fut: Future<Output = Box<dyn View>> + 'static,
{
	Rc::new(move |services| Box::pin(f(services)))
}

enum Node {
	Text(String),
	Child(Region),
}

/// A region of the live output tree.
///
/// Regions form an ordered tree: a region's content is its own text chunks
/// and child regions, in insertion order. Clones share structure, so a
/// region handed to a view stays wired to the tree that contains it.
#[derive(Clone, Default)]
pub struct Region {
	nodes: Rc<RefCell<Vec<Node>>>,
}

impl Region {
	/// An empty region.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a text chunk.
	pub fn push(&self, text: impl Into<String>) {
		self.nodes.borrow_mut().push(Node::Text(text.into()));
	}

	/// Appends and returns a child region.
	///
	/// The child keeps its position among this region's content however its
	/// own content later changes.
	pub fn child(&self) -> Region {
		let child = Region::new();
		self.nodes.borrow_mut().push(Node::Child(child.clone()));
		child
	}

	/// Removes all content.
	pub fn clear(&self) {
		self.nodes.borrow_mut().clear();
	}

	/// Flattened content of the region and its children, in order.
	pub fn content(&self) -> String {
		self.nodes
			.borrow()
			.iter()
			.map(|node| match node {
				Node::Text(text) => text.clone(),
				Node::Child(child) => child.content(),
			})
			.collect()
	}

	/// Returns whether the region renders nothing.
	pub fn is_empty(&self) -> bool {
		self.content().is_empty()
	}

	/// Replaces this region's content with another region's, in one step.
	fn adopt(&self, other: &Region) {
		let mut nodes = self.nodes.borrow_mut();
		nodes.clear();
		nodes.append(&mut other.nodes.borrow_mut());
	}
}

impl fmt::Debug for Region {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Region")
			.field("content", &self.content())
			.finish()
	}
}

/// Write-buffer over a live region.
///
/// Views render into [`region`](RenderBuffer::region); nothing is
/// externally visible until [`flush`](RenderBuffer::flush) moves the
/// buffered content into the live region in one step.
pub struct RenderBuffer {
	live: Region,
	staged: Region,
}

impl RenderBuffer {
	/// Creates a buffer over `live`.
	pub fn new(live: &Region) -> Self {
		Self {
			live: live.clone(),
			staged: Region::new(),
		}
	}

	/// The buffered target views render into.
	pub fn region(&self) -> &Region {
		&self.staged
	}

	/// Commits the buffered content into the live region atomically.
	pub fn flush(self) {
		self.live.adopt(&self.staged);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_region_orders_text_and_children() {
		let root = Region::new();
		root.push("a");
		let middle = root.child();
		root.push("c");
		middle.push("b");

		assert_eq!(root.content(), "abc");
	}

	#[test]
	fn test_child_keeps_position_after_clear() {
		let root = Region::new();
		root.push("<header>");
		let slot = root.child();
		root.push("<footer>");

		slot.push("one");
		assert_eq!(root.content(), "<header>one<footer>");

		slot.clear();
		slot.push("two");
		assert_eq!(root.content(), "<header>two<footer>");
	}

	#[test]
	fn test_buffer_invisible_until_flush() {
		let live = Region::new();
		live.push("old");

		let buffer = RenderBuffer::new(&live);
		buffer.region().push("new");
		assert_eq!(live.content(), "old");

		buffer.flush();
		assert_eq!(live.content(), "new");
	}

	#[test]
	fn test_flush_replaces_everything_at_once() {
		let live = Region::new();
		live.push("loading...");

		let buffer = RenderBuffer::new(&live);
		buffer.region().push("page ");
		buffer.region().push("content");
		buffer.flush();

		assert_eq!(live.content(), "page content");
	}
}
