//! Graph model, predefined views, and the command interpreter that grows the
//! live graph.

pub mod command;
pub mod model;
pub mod session;
pub mod views;

pub use command::{Applied, COMMAND_FORMAT, Command, CommandError, submit};
pub use model::{Edge, LiveGraph, Node, NodeType};
pub use session::Session;
pub use views::{RelationRule, UnknownView, View, ViewId, ViewStore, ViewStoreError};
