//! Side panel describing the focus node, and the review-score legend.

use leptos::prelude::*;

use super::colormap::{REVIEW_DOMAIN, legend_gradient};
use super::highlight::FocusDetails;

/// Info panel for the hovered or selected node.
#[component]
pub fn DetailsPanel(
	#[prop(into)] details: Signal<Option<FocusDetails>>,
	/// CSS color for the related-company pills.
	#[prop(into)]
	related_color: String,
) -> impl IntoView {
	view! {
		<div class="universe-details">
			{move || match details.get() {
				Some(d) => details_body(d, related_color.clone()).into_any(),
				None => {
					view! { <div class="universe-details-empty">"Hover a node to see details"</div> }
						.into_any()
				}
			}}
		</div>
	}
}

fn details_body(details: FocusDetails, related_color: String) -> impl IntoView {
	let more = details.more_label();
	let pill_style = format!("background: {};", details.review_color.to_css());
	let related_style = format!("background: {related_color};");
	let pinned = details.selected.then_some("Selected");
	let related = (!details.related.is_empty()).then(move || {
		view! {
			<div class="universe-related">
				<div class="universe-related-title">"Related"</div>
				<div class="universe-related-list">
					{details
						.related
						.into_iter()
						.map(|name| {
							view! {
								<span class="universe-related-pill" style=related_style.clone()>
									{name}
								</span>
							}
						})
						.collect_view()}
				</div>
				{more.map(|text| view! { <div class="universe-related-more">{text}</div> })}
			</div>
		}
	});

	view! {
		<div class="universe-details-body">
			<div class="universe-kind">{details.kind_label} " " {pinned}</div>
			<div class="universe-name">{details.name}</div>
			<div class="universe-stats">
				<div class="universe-stat">
					<span class="universe-stat-label">"GAMES"</span>
					<span class="universe-stat-value">{details.game_count}</span>
				</div>
				<div class="universe-stat">
					<span class="universe-stat-label">"PLAYERS"</span>
					<span class="universe-stat-value">{details.owners}</span>
				</div>
			</div>
			<div class="universe-review">
				<span class="universe-review-pill" style=pill_style>
					{details.review}
				</span>
			</div>
			{related}
		</div>
	}
}

/// Gradient bar explaining the node colors.
#[component]
pub fn ReviewLegend() -> impl IntoView {
	let bar_style = format!("background: {};", legend_gradient());
	let (low, high) = REVIEW_DOMAIN;

	view! {
		<div class="universe-legend">
			<div class="universe-legend-end">
				<span class="universe-legend-title">"Lower Avg. Review Score"</span>
				<span class="universe-legend-value">{format!("{low}%")}</span>
			</div>
			<div class="universe-legend-bar" style=bar_style></div>
			<div class="universe-legend-end">
				<span class="universe-legend-title">"Higher Avg. Review Score"</span>
				<span class="universe-legend-value">{format!("{high}%")}</span>
			</div>
		</div>
	}
}
