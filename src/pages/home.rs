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

			<div class="graph-page">
				<div class="graph-overlay">
					<h1>"Shortest Path Explorer"</h1>
					<p class="subtitle">
						"Place nodes, connect them with weighted edges, then run Dijkstra between two of them."
					</p>
				</div>
				<GraphCanvas />
			</div>
		</ErrorBoundary>
	}
}
