use leptos::prelude::*;
use log::error;

use crate::components::command_bar::CommandBar;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::view_selector::ViewSelector;
use crate::graph::{Session, ViewId, ViewStore};

/// Selector, canvas, and command bar over one shared [`Session`].
#[component]
fn GraphViewer(store: ViewStore) -> impl IntoView {
	let session = RwSignal::new(Session::new(store, ViewId::View1));
	// Memoized so typing in the command bar does not touch the canvas.
	let graph_data = Memo::new(move |_| session.with(|s| s.graph_data()));

	view! {
		<div class="graph-viewer-app">
			<h1>"Graph Viewer"</h1>
			<ViewSelector session=session />
			<div class="graph-viewer-canvas">
				<ForceGraphCanvas data=graph_data />
			</div>
			<CommandBar session=session />
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let viewer = ViewStore::builtin()
		.inspect_err(|e| error!("failed to load views: {e}"))
		.map(|store| view! { <GraphViewer store=store /> });

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{viewer}
		</ErrorBoundary>
	}
}
