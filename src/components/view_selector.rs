use leptos::ev::Event;
use leptos::prelude::*;
use log::warn;

use crate::graph::{Session, ViewId};

/// Drop-down listing the predefined views. Picking one reloads its seed graph.
#[component]
pub fn ViewSelector(session: RwSignal<Session>) -> impl IntoView {
	let options = session.with_untracked(|s| {
		s.views()
			.iter()
			.map(|v| (v.id, v.title.clone()))
			.collect::<Vec<_>>()
	});

	let on_change = move |ev: Event| match event_target_value(&ev).parse::<ViewId>() {
		Ok(id) => session.update(|s| s.switch_view(id)),
		Err(e) => warn!("{e}"),
	};

	view! {
		<select
			class="graph-viewer-select"
			on:change=on_change
			prop:value=move || session.with(|s| s.active_view().as_str())
		>
			{options
				.into_iter()
				.map(|(id, title)| view! { <option value=id.as_str()>{title}</option> })
				.collect_view()}
		</select>
	}
}
