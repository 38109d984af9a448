//! End-to-end interaction sequences against the session controller.

use dijkstra_canvas::graph::{InvalidEdge, NodeId, Position};
use dijkstra_canvas::session::{ClickOutcome, InvalidQueryInput, QueryOutcome, Session, SessionError};

fn place_all(session: &mut Session, points: &[Position]) -> Vec<NodeId> {
	points
		.iter()
		.filter_map(|&p| {
			session.begin_place_node();
			match session.click(p) {
				ClickOutcome::NodePlaced(id) => Some(id),
				_ => None,
			}
		})
		.collect()
}

fn link(session: &mut Session, from: Position, to: Position, weight: &str) -> Result<(), SessionError> {
	session.begin_connect();
	session.click(from);
	session.click(to);
	session.complete_edge(weight).map(|_| ())
}

#[test]
fn build_query_reset_and_rebuild() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = Session::new();
	let points = [
		Position::new(100.0, 300.0),
		Position::new(250.0, 150.0),
		Position::new(400.0, 300.0),
		Position::new(250.0, 450.0),
	];
	let ids = place_all(&mut session, &points);
	assert_eq!(ids, vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);

	link(&mut session, points[0], points[1], "4")?;
	link(&mut session, points[1], points[2], "4")?;
	link(&mut session, points[0], points[3], "1")?;
	link(&mut session, points[3], points[2], "2")?;

	let outcome = session.run_query("0", "2")?;
	assert_eq!(
		outcome,
		QueryOutcome::Found {
			path: vec![NodeId(0), NodeId(3), NodeId(2)],
			total_cost: 3,
		}
	);

	let back = session.run_query("2", "0")?;
	assert_eq!(
		back,
		QueryOutcome::Found {
			path: vec![NodeId(2), NodeId(3), NodeId(0)],
			total_cost: 3,
		}
	);

	session.reset();
	assert!(matches!(
		session.run_query("0", "2"),
		Err(InvalidQueryInput::OutOfRange { node_count: 0, .. })
	));

	let ids = place_all(&mut session, &points[..2]);
	assert_eq!(ids, vec![NodeId(0), NodeId(1)]);
	assert_eq!(
		session.run_query("0", "1")?,
		QueryOutcome::NoPath {
			source: NodeId(0),
			target: NodeId(1),
		}
	);
	Ok(())
}

#[test]
fn failed_edges_leave_prior_state_untouched() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = Session::new();
	let points = [Position::new(100.0, 100.0), Position::new(300.0, 100.0)];
	place_all(&mut session, &points);
	link(&mut session, points[0], points[1], "5")?;
	let before = session.graph().clone();

	for bad in ["", "abc", "-1", "-0.5"] {
		let err = link(&mut session, points[0], points[1], bad);
		assert!(
			matches!(err, Err(SessionError::InvalidEdge(_))),
			"{bad:?} should be rejected"
		);
	}
	assert_eq!(
		link(&mut session, points[1], points[1], "3"),
		Err(SessionError::InvalidEdge(InvalidEdge::SelfLoop(NodeId(1))))
	);
	assert_eq!(session.graph(), &before);
	assert_eq!(session.run_query("1", "0")?.describe(), "Shortest path: 1 -> 0\nTotal cost: 5");
	Ok(())
}

#[test]
fn decimal_weights_are_truncated() -> Result<(), Box<dyn std::error::Error>> {
	let mut session = Session::new();
	let points = [
		Position::new(100.0, 100.0),
		Position::new(300.0, 100.0),
		Position::new(500.0, 100.0),
	];
	place_all(&mut session, &points);
	link(&mut session, points[0], points[1], "2.5")?;
	link(&mut session, points[1], points[2], "1e1")?;

	let weights: Vec<_> = session.graph().edges().iter().map(|e| e.weight).collect();
	assert_eq!(weights, vec![2, 10]);
	assert_eq!(
		session.run_query("0", "2")?.describe(),
		"Shortest path: 0 -> 1 -> 2\nTotal cost: 12"
	);
	Ok(())
}
