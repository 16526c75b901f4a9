pub mod command_bar;
pub mod force_graph;
pub mod view_selector;
