//! Single-line command input with a Send button.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

use crate::graph::Session;

/// Shows `message` in a blocking browser dialog.
fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

/// Text field bound to the session's pending command. Send and the Enter key
/// both submit it; a rejected command raises an alert listing the format and
/// the active view's relations.
#[component]
pub fn CommandBar(session: RwSignal<Session>) -> impl IntoView {
	let submit = move || {
		if let Some(Err(err)) = session.try_update(|s| s.submit_input()) {
			alert(&err.to_string());
		}
	};

	view! {
		<div class="graph-viewer-controls">
			<input
				type="text"
				class="graph-viewer-input"
				placeholder=move || session.with(|s| s.placeholder())
				prop:value=move || session.with(|s| s.input().to_string())
				on:input=move |ev| session.update(|s| s.set_input(event_target_value(&ev)))
				on:keydown=move |ev: KeyboardEvent| {
					if ev.key() == "Enter" {
						submit();
					}
				}
			/>
			<button class="graph-viewer-button" on:click=move |_| submit()>
				"Send"
			</button>
		</div>
	}
}
