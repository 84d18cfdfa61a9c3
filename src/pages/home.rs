use leptos::prelude::*;

use crate::components::graph_canvas::GraphCanvas;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
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

			<div class="fullscreen-graph">
				<GraphCanvas />
				<div class="graph-overlay">
					<h1>"Graph Sketch"</h1>
					<p class="subtitle">
						"Tap to add nodes. Switch to Edges and tap two nodes to connect them. Drag nodes to move them."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
