//! UI Components

use leptos::prelude::*;
use storefront_core::{ButtonState, Plan};

/// Label on a button whose checkout is in flight
pub const PENDING_LABEL: &str = "Creating checkout link…";

/// One plan: badge, price, credits, features and the checkout button
#[component]
pub fn PlanCard(
    plan: Plan,
    #[prop(into)] button: Signal<ButtonState>,
    on_select: Callback<String>,
) -> impl IntoView {
    let class = if plan.emphasize { "plan featured" } else { "plan" };
    let button_class = if plan.emphasize { "btn btn-primary" } else { "btn" };
    let plan_id = plan.id.clone();
    let call_to_action = plan.call_to_action.clone();

    let features = plan
        .features
        .iter()
        .map(|feature| {
            let class = if feature.coming_soon { "feature coming-soon" } else { "feature" };
            view! { <li class=class>{feature.label.clone()}</li> }
        })
        .collect_view();

    view! {
        <div class=class>
            {plan.badge.clone().map(|badge| view! { <span class="badge">{badge}</span> })}
            <h2>{plan.name.clone()}</h2>
            <p class="headline">{plan.headline.clone()}</p>

            <div class="price">{plan.price.label.clone()}</div>
            {plan.price.sub_label.clone().map(|sub| view! { <p class="sub-label">{sub}</p> })}

            <div class="credits">
                <strong>{plan.credits.title.clone()}</strong>
                <span>{plan.credits.subtitle.clone()}</span>
            </div>
            {plan.description.clone().map(|text| view! { <p class="description">{text}</p> })}

            <ul>{features}</ul>

            <button
                class=button_class
                disabled=move || button.with(ButtonState::is_pending)
                on:click=move |_| on_select.run(plan_id.clone())
            >
                {move || {
                    if button.with(ButtonState::is_pending) {
                        PENDING_LABEL.to_string()
                    } else {
                        call_to_action.clone()
                    }
                }}
            </button>

            {move || {
                button
                    .with(|b| b.error().map(str::to_string))
                    .map(|message| view! { <p class="error" role="alert">{message}</p> })
            }}
        </div>
    }
}
