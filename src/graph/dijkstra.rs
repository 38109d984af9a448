use log::debug;

use super::model::{Cost, Graph, NodeId};

/// Outcome of a shortest-path search.
///
/// `path` is the predecessor chain reconstructed backwards from the target.
/// When the target is unreachable the chain stops short of the source, so
/// callers check [`ShortestPath::starts_at`] before treating it as a route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortestPath {
	path: Vec<NodeId>,
	total_cost: Option<Cost>,
}

impl ShortestPath {
	/// Nodes from the first reconstructed node to the target.
	pub fn path(&self) -> &[NodeId] {
		&self.path
	}

	/// Sum of edge weights along [`path`](Self::path); `None` for an empty path.
	pub fn total_cost(&self) -> Option<Cost> {
		self.total_cost
	}

	/// True when the reconstructed path begins at `source`.
	pub fn starts_at(&self, source: NodeId) -> bool {
		self.path.first() == Some(&source)
	}

	/// Consecutive `(from, to)` hops along the path.
	pub fn segments(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
		self.path.windows(2).map(|pair| (pair[0], pair[1]))
	}

	/// Consume the result, keeping only the node sequence.
	pub fn into_path(self) -> Vec<NodeId> {
		self.path
	}
}

/// Run Dijkstra's algorithm from `source` to `target`.
///
/// The unvisited node with the smallest tentative distance is picked by a
/// linear scan in id order; ties go to the lowest id. The search stops as soon
/// as the target is picked. Ids outside the graph are not an error: an unknown
/// target yields an empty path, an unknown source a path holding only the
/// target.
pub fn shortest_path(graph: &Graph, source: NodeId, target: NodeId) -> ShortestPath {
	if !graph.contains(target) {
		return ShortestPath::default();
	}

	let count = graph.node_count();
	let mut distance: Vec<Option<Cost>> = vec![None; count];
	let mut previous: Vec<Option<NodeId>> = vec![None; count];
	let mut visited = vec![false; count];

	if let Some(slot) = distance.get_mut(source.index()) {
		*slot = Some(0);
	}

	while let Some((current, current_distance)) = closest_unvisited(&distance, &visited) {
		if current == target {
			break;
		}
		visited[current.index()] = true;

		for adjacent in graph.neighbors(current) {
			let neighbor = adjacent.neighbor.index();
			if visited[neighbor] {
				continue;
			}
			let candidate = current_distance.saturating_add(Cost::from(adjacent.weight));
			if distance[neighbor].is_none_or(|known| candidate < known) {
				distance[neighbor] = Some(candidate);
				previous[neighbor] = Some(current);
			}
		}
	}

	let path = reconstruct(&previous, target);
	let total_cost = path_cost(graph, &path);
	debug!(
		"shortest path {source} -> {target}: {:?} (cost {:?})",
		path, total_cost
	);
	ShortestPath { path, total_cost }
}

/// Unvisited, reached node with the smallest distance. Strict comparison keeps
/// the earliest id among equals. Unreached nodes never win, which ends the
/// search once everything reachable has been settled.
fn closest_unvisited(distance: &[Option<Cost>], visited: &[bool]) -> Option<(NodeId, Cost)> {
	let mut best: Option<(NodeId, Cost)> = None;
	for (index, (known, done)) in distance.iter().zip(visited).enumerate() {
		let Some(known) = *known else {
			continue;
		};
		if *done {
			continue;
		}
		if best.is_none_or(|(_, best_distance)| known < best_distance) {
			best = Some((NodeId(index), known));
		}
	}
	best
}

fn reconstruct(previous: &[Option<NodeId>], target: NodeId) -> Vec<NodeId> {
	let mut path = vec![target];
	let mut current = target;
	while let Some(&Some(before)) = previous.get(current.index()) {
		path.push(before);
		current = before;
	}
	path.reverse();
	path
}

/// Sum of the weights of the first matching edge between each consecutive pair.
fn path_cost(graph: &Graph, path: &[NodeId]) -> Option<Cost> {
	if path.is_empty() {
		return None;
	}
	path.windows(2).try_fold(0, |total: Cost, pair| {
		graph
			.find_edge(pair[0], pair[1])
			.map(|edge| total.saturating_add(Cost::from(edge.weight)))
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{InvalidEdge, Position};

	fn graph_with(nodes: usize, edges: &[(usize, usize, u32)]) -> Result<Graph, InvalidEdge> {
		let mut graph = Graph::new();
		for i in 0..nodes {
			graph.add_node(Position::new(i as f64 * 50.0, 100.0));
		}
		for &(a, b, weight) in edges {
			graph.add_edge(NodeId(a), NodeId(b), weight)?;
		}
		Ok(graph)
	}

	fn ids(raw: &[usize]) -> Vec<NodeId> {
		raw.iter().copied().map(NodeId).collect()
	}

	#[test]
	fn source_equals_target() -> Result<(), InvalidEdge> {
		let graph = graph_with(3, &[(0, 1, 4), (1, 2, 1)])?;
		let result = shortest_path(&graph, NodeId(1), NodeId(1));
		assert_eq!(result.path(), ids(&[1]));
		assert_eq!(result.total_cost(), Some(0));
		assert!(result.starts_at(NodeId(1)));
		Ok(())
	}

	#[test]
	fn follows_a_line() -> Result<(), InvalidEdge> {
		let graph = graph_with(3, &[(0, 1, 1), (1, 2, 2)])?;
		let result = shortest_path(&graph, NodeId(0), NodeId(2));
		assert_eq!(result.path(), ids(&[0, 1, 2]));
		assert_eq!(result.total_cost(), Some(3));
		Ok(())
	}

	#[test]
	fn prefers_cheaper_detour() -> Result<(), InvalidEdge> {
		let graph = graph_with(4, &[(0, 3, 10), (0, 1, 2), (1, 2, 2), (2, 3, 2)])?;
		let result = shortest_path(&graph, NodeId(0), NodeId(3));
		assert_eq!(result.path(), ids(&[0, 1, 2, 3]));
		assert_eq!(result.total_cost(), Some(6));
		Ok(())
	}

	#[test]
	fn disconnected_target_does_not_start_at_source() -> Result<(), InvalidEdge> {
		let graph = graph_with(4, &[(0, 1, 1), (2, 3, 1)])?;
		let result = shortest_path(&graph, NodeId(0), NodeId(3));
		assert!(!result.starts_at(NodeId(0)));
		assert_eq!(result.path(), ids(&[3]));
		Ok(())
	}

	#[test]
	fn isolated_nodes_have_no_path() -> Result<(), InvalidEdge> {
		let graph = graph_with(2, &[])?;
		let result = shortest_path(&graph, NodeId(0), NodeId(1));
		assert!(!result.starts_at(NodeId(0)));
		Ok(())
	}

	#[test]
	fn unknown_target_gives_empty_path() -> Result<(), InvalidEdge> {
		let graph = graph_with(2, &[(0, 1, 1)])?;
		let result = shortest_path(&graph, NodeId(0), NodeId(5));
		assert!(result.path().is_empty());
		assert_eq!(result.total_cost(), None);
		Ok(())
	}

	#[test]
	fn unknown_source_reaches_nothing() -> Result<(), InvalidEdge> {
		let graph = graph_with(2, &[(0, 1, 1)])?;
		let result = shortest_path(&graph, NodeId(9), NodeId(1));
		assert_eq!(result.path(), ids(&[1]));
		assert!(!result.starts_at(NodeId(9)));
		Ok(())
	}

	#[test]
	fn ties_go_to_the_lowest_id() -> Result<(), InvalidEdge> {
		// Two equal routes 0-1-3 and 0-2-3.
		let graph = graph_with(4, &[(0, 2, 1), (0, 1, 1), (2, 3, 1), (1, 3, 1)])?;
		let first = shortest_path(&graph, NodeId(0), NodeId(3));
		assert_eq!(first.path(), ids(&[0, 1, 3]));
		assert_eq!(first.total_cost(), Some(2));
		for _ in 0..10 {
			assert_eq!(shortest_path(&graph, NodeId(0), NodeId(3)), first);
		}
		Ok(())
	}

	#[test]
	fn zero_weight_edges() -> Result<(), InvalidEdge> {
		let graph = graph_with(3, &[(0, 1, 0), (1, 2, 0), (0, 2, 1)])?;
		let result = shortest_path(&graph, NodeId(0), NodeId(2));
		assert_eq!(result.path(), ids(&[0, 1, 2]));
		assert_eq!(result.total_cost(), Some(0));
		Ok(())
	}

	#[test]
	fn cost_is_summed_from_first_matching_edges() -> Result<(), InvalidEdge> {
		// The later, cheaper duplicate drives the search, the earlier one the cost.
		let graph = graph_with(2, &[(0, 1, 7), (1, 0, 3)])?;
		let result = shortest_path(&graph, NodeId(0), NodeId(1));
		assert_eq!(result.path(), ids(&[0, 1]));
		assert_eq!(result.total_cost(), Some(7));
		Ok(())
	}

	#[test]
	fn segments_pair_consecutive_nodes() -> Result<(), InvalidEdge> {
		let graph = graph_with(3, &[(0, 1, 1), (1, 2, 1)])?;
		let result = shortest_path(&graph, NodeId(2), NodeId(0));
		let hops: Vec<_> = result.segments().collect();
		assert_eq!(hops, vec![(NodeId(2), NodeId(1)), (NodeId(1), NodeId(0))]);
		Ok(())
	}
}
