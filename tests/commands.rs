//! End-to-end command behavior over the built-in views.

use graph_viewer::graph::{CommandError, LiveGraph, NodeType, Session, ViewId, ViewStore, submit};

fn store() -> ViewStore {
	ViewStore::builtin().expect("builtin views load")
}

fn new_session(view: ViewId) -> Session {
	Session::new(store(), view)
}

fn count_nodes(graph: &LiveGraph, id: &str) -> usize {
	graph.nodes().iter().filter(|n| n.id == id).count()
}

fn count_edges(graph: &LiveGraph, id: &str) -> usize {
	graph.edges().iter().filter(|e| e.id == id).count()
}

#[test]
fn every_allowed_relation_adds_one_node_and_one_edge() {
	let store = store();
	for id in ViewId::ALL {
		let view = store.view(id);
		for relation in view.allowed_relations() {
			for target in ["x", "load balancer", "Prod  EU 1"] {
				let mut graph = view.seed_graph();
				let text = format!("component cart {relation} {target}");
				let applied = submit(&text, view, &mut graph).expect("command accepted");

				let target_id: String = target
					.to_lowercase()
					.chars()
					.filter(|c| !c.is_whitespace())
					.collect();
				assert_eq!(applied.target_id, target_id);
				assert_eq!(count_nodes(&graph, &target_id), 1, "{text}");
				assert_eq!(count_edges(&graph, &format!("{relation}_{target_id}")), 1, "{text}");
			}
		}
	}
}

#[test]
fn submitting_twice_matches_submitting_once() {
	let store = store();
	let view = store.view(ViewId::View1);
	let (mut once, mut twice) = (view.seed_graph(), view.seed_graph());
	let text = "Component Cart secures Vault";

	submit(text, view, &mut once).expect("first");
	submit(text, view, &mut twice).expect("first");
	let second = submit(text, view, &mut twice).expect("second");

	assert!(second.is_no_op());
	assert_eq!(once, twice);
}

#[test]
fn unknown_relation_is_rejected_without_mutation() {
	let mut session = new_session(ViewId::View1);
	session.set_input("component cart flies to the moon");
	let err = session.submit_input().unwrap_err();

	let CommandError::Format { allowed } = &err;
	assert_eq!(allowed, &["tests", "secures", "monitors"]);
	assert!(err.to_string().contains("'Component Cart <relation> <target>'"));
	assert_eq!(session.graph(), &store().view(ViewId::View1).seed_graph());
}

#[test]
fn relations_are_scoped_to_their_view() {
	let store = store();
	let (tools, envs) = (store.view(ViewId::View1), store.view(ViewId::View2));

	let mut graph = tools.seed_graph();
	assert!(submit("component cart packaged_as bundle", tools, &mut graph).is_err());
	assert_eq!(graph, tools.seed_graph());

	let mut graph = envs.seed_graph();
	assert!(submit("component cart tests bundle", envs, &mut graph).is_err());
	assert_eq!(graph, envs.seed_graph());
}

#[test]
fn switching_views_discards_additions() {
	let mut session = new_session(ViewId::View1);
	session.set_input("component cart tests load balancer");
	session.submit_input().expect("accepted");
	assert!(session.graph().has_node("loadbalancer"));

	session.switch_view(ViewId::View2);
	session.switch_view(ViewId::View1);

	assert_eq!(session.graph(), &store().view(ViewId::View1).seed_graph());
	assert!(!session.graph().has_node("loadbalancer"));
}

#[test]
fn target_label_is_capitalized_and_id_stripped() {
	let mut session = new_session(ViewId::View1);
	session.set_input("component cart tests load balancer");
	session.submit_input().expect("accepted");

	let node = session.graph().node("loadbalancer").expect("node added");
	assert_eq!(node.label, "Load Balancer");
	assert_eq!(node.node_type, NodeType::Tool);

	let edge = session.graph().edge("tests_loadbalancer").expect("edge added");
	assert_eq!(edge.source, "Component_Cart");
	assert_eq!(edge.target, "loadbalancer");
	assert_eq!(edge.label, "tests");
}

#[test]
fn environment_relations_create_typed_nodes() {
	let mut session = new_session(ViewId::View2);
	for (text, id, node_type) in [
		("component cart packaged_as docker image", "dockerimage", NodeType::Artifact),
		("component cart deployed_to aws lambda", "awslambda", NodeType::Resource),
		("component cart deployed_in staging", "staging", NodeType::Environment),
	] {
		session.set_input(text);
		session.submit_input().expect("accepted");
		assert_eq!(session.graph().node(id).map(|n| n.node_type), Some(node_type));
	}
	assert_eq!(session.graph().nodes().len(), 7);
	assert_eq!(session.relayouts(), 3);
}
