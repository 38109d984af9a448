use std::collections::HashSet;

use crate::graph::NodeId;
use crate::session::Session;

/// Delay between two revealed path segments.
pub const STEP_DELAY_MS: u32 = 500;

/// Progressive highlight of a found route, one segment at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathAnimation {
	path: Vec<NodeId>,
	revealed: usize,
}

impl PathAnimation {
	pub fn new(path: Vec<NodeId>) -> Self {
		Self { path, revealed: 0 }
	}

	pub fn segment_count(&self) -> usize {
		self.path.len().saturating_sub(1)
	}

	/// Delayed steps before the route is reported. A path without segments
	/// still waits one step.
	pub fn step_count(&self) -> usize {
		self.segment_count().max(1)
	}

	/// Reveal the next segment. Returns false once everything is shown.
	pub fn advance(&mut self) -> bool {
		if self.is_complete() {
			return false;
		}
		self.revealed += 1;
		true
	}

	pub fn is_complete(&self) -> bool {
		self.revealed >= self.segment_count()
	}

	/// Segments highlighted so far, in path order.
	pub fn revealed_segments(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
		self.path
			.windows(2)
			.take(self.revealed)
			.map(|pair| (pair[0], pair[1]))
	}

	/// Endpoints of every revealed segment.
	pub fn lit_nodes(&self) -> HashSet<NodeId> {
		self.revealed_segments().flat_map(|(a, b)| [a, b]).collect()
	}
}

pub struct GraphCanvasState {
	pub session: Session,
	pub animation: Option<PathAnimation>,
	pub width: f64,
	pub height: f64,
	generation: u64,
}

impl GraphCanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			session: Session::new(),
			animation: None,
			width,
			height,
			generation: 0,
		}
	}

	/// Drop the current highlight and invalidate any running animation task.
	pub fn clear_animation(&mut self) -> u64 {
		self.animation = None;
		self.generation += 1;
		self.generation
	}

	/// Replace the highlight with a fresh animation of `path`.
	pub fn start_animation(&mut self, path: Vec<NodeId>) -> u64 {
		let generation = self.clear_animation();
		self.animation = Some(PathAnimation::new(path));
		generation
	}

	/// True while the animation tagged `generation` is still the current one.
	pub fn is_current(&self, generation: u64) -> bool {
		self.generation == generation && self.animation.is_some()
	}
}
