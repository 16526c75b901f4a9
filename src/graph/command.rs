//! Text command interpreter.
//!
//! A command has the shape `Component Cart <relation> <target>`, where the
//! relation must be one the active view allows. A matching command adds the
//! target node and the root → target edge to the live graph; both additions
//! are idempotent.

use thiserror::Error;

use super::model::{Edge, LiveGraph, Node, NodeType, edge_id};
use super::views::View;

/// Shape every command must follow, as shown to the user.
pub const COMMAND_FORMAT: &str = "'Component Cart <relation> <target>'";

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
	/// The input does not match the view's command pattern.
	#[error(
		"Invalid format or relation. Use: {}\nAllowed relations: {}",
		COMMAND_FORMAT,
		.allowed.join(", ")
	)]
	Format {
		/// Relations the active view accepts, in declaration order.
		allowed: Vec<String>,
	},
}

/// A successfully matched command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
	/// Matched relation keyword, lowercase.
	pub relation: String,
	/// Target text with all whitespace removed.
	pub target_id: String,
	/// Target text with each word capitalized.
	pub target_label: String,
	/// Type the view assigns to the relation's target.
	pub node_type: NodeType,
}

/// What a submitted command changed in the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
	/// Id of the command's target node.
	pub target_id: String,
	/// Id of the root → target edge.
	pub edge_id: String,
	/// Whether the target node was new.
	pub node_added: bool,
	/// Whether the edge was new.
	pub edge_added: bool,
}

impl Applied {
	/// True when the command's node and edge were both already present.
	pub fn is_no_op(&self) -> bool {
		!self.node_added && !self.edge_added
	}
}

/// Lowercases, trims, and collapses whitespace runs to single spaces.
pub fn normalize(text: &str) -> String {
	text.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
		.to_lowercase()
}

/// Capitalizes the first letter of every space-separated word.
pub fn title_case(text: &str) -> String {
	text.split(' ')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

impl Command {
	/// Matches `text` against the command pattern of `view`.
	pub fn parse(text: &str, view: &View) -> Result<Self, CommandError> {
		let format_error = || CommandError::Format {
			allowed: view.allowed_relations().map(str::to_owned).collect(),
		};

		let msg = normalize(text);
		let caps = view
			.command_pattern()
			.captures(&msg)
			.ok_or_else(format_error)?;
		let (relation, target) = (&caps[1], &caps[2]);
		let node_type = view.node_type_for(relation).ok_or_else(format_error)?;

		Ok(Self {
			relation: relation.to_string(),
			target_id: target.chars().filter(|c| !c.is_whitespace()).collect(),
			target_label: title_case(target),
			node_type,
		})
	}

	/// Id of the edge this command adds.
	pub fn edge_id(&self) -> String {
		edge_id(&self.relation, &self.target_id)
	}

	/// Inserts the command's node and edge into `graph` when absent.
	pub fn apply(&self, root: &str, graph: &mut LiveGraph) -> Applied {
		let node_added = graph.add_node(Node {
			id: self.target_id.clone(),
			label: self.target_label.clone(),
			node_type: self.node_type,
		});
		let edge = Edge::new(root, self.target_id.clone(), self.relation.clone());
		let edge_id = edge.id.clone();
		let edge_added = graph.add_edge(edge);
		Applied {
			target_id: self.target_id.clone(),
			edge_id,
			node_added,
			edge_added,
		}
	}
}

/// Parses `text` for `view` and applies it to `graph`.
///
/// On error the graph is left untouched.
pub fn submit(text: &str, view: &View, graph: &mut LiveGraph) -> Result<Applied, CommandError> {
	let command = Command::parse(text, view)?;
	Ok(command.apply(&view.root, graph))
}
