//! Pricing Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{json, Map, Value};

use storefront_core::{
    start_checkout, sync_prices, CheckoutError, CheckoutOptions, Plan, PlanCatalog, PricingView,
};

use crate::api::{page_origin, HttpStorefront};
use crate::components::PlanCard;

/// Standard plans with product ids baked in at build time
fn catalog() -> Vec<Plan> {
    PlanCatalog::standard()
        .with_product_ids([
            ("basic", option_env!("STOREFRONT_PRODUCT_BASIC_YEARLY")),
            ("pro", option_env!("STOREFRONT_PRODUCT_PRO_YEARLY")),
            ("max", option_env!("STOREFRONT_PRODUCT_MAX_YEARLY")),
        ])
        .plans()
}

fn checkout_options(plan: &Plan, origin: &str) -> CheckoutOptions {
    let mut metadata = Map::new();
    metadata.insert("plan".into(), Value::String(plan.id.clone()));
    metadata.insert("source".into(), json!("pricing"));

    CheckoutOptions {
        success_url: Some(format!("{origin}/?checkout=success")),
        units: Some(1),
        metadata: Some(metadata),
        ..CheckoutOptions::default()
    }
}

/// Full-page navigation to `url`
fn navigate(url: &str) -> Result<(), CheckoutError> {
    let window =
        web_sys::window().ok_or_else(|| CheckoutError::Redirect("no window".into()))?;
    window
        .location()
        .set_href(url)
        .map_err(|e| CheckoutError::Redirect(format!("{e:?}")))
}

#[component]
pub fn PricingPage() -> impl IntoView {
    let pricing = RwSignal::new(PricingView::new(catalog()));

    // Refresh prices once after first paint
    if pricing.try_update(PricingView::begin_sync).flatten().is_some() {
        let plans = pricing.with_untracked(|v| v.plans().to_vec());
        spawn_local(async move {
            let api = HttpStorefront::from_window();
            let outcome = sync_prices(&api, &plans).await;
            pricing.update(|v| v.finish_sync(outcome));
        });
    }

    let checkout = Callback::new(move |plan_id: String| {
        let Some(plan) = pricing.try_update(|v| v.begin_checkout(&plan_id)).flatten() else {
            return;
        };

        spawn_local(async move {
            let api = HttpStorefront::from_window();
            let options = checkout_options(&plan, &page_origin());
            let result = start_checkout(&api, &plan, options).await;

            let redirect = pricing
                .try_update(|v| v.finish_checkout(&plan.id, result))
                .flatten();

            if let Some(redirect) = redirect {
                if let Err(e) = navigate(&redirect.url) {
                    pricing.update(|v| {
                        v.finish_checkout(&plan.id, Err(e));
                    });
                }
            }
        });
    });

    let plan_cards = move || {
        pricing
            .with(|v| v.plans().to_vec())
            .into_iter()
            .map(|plan| {
                let plan_id = plan.id.clone();
                let button = Signal::derive(move || pricing.with(|v| v.button(&plan_id)));
                view! { <PlanCard plan=plan button=button on_select=checkout /> }
            })
            .collect_view()
    };

    view! {
        <div class="pricing">
            <h1>"Pricing"</h1>
            <p class="subtitle">"Pick a yearly plan and start editing images with AI"</p>

            <Show when=move || pricing.with(|v| v.sync_state().is_syncing())>
                <p class="sync-notice">"Syncing latest prices…"</p>
            </Show>

            {move || {
                pricing
                    .with(|v| v.sync_state().advisory().map(str::to_string))
                    .map(|advisory| {
                        view! {
                            <div class="advisory" role="status">
                                <span>{advisory}</span>
                                <button
                                    class="dismiss"
                                    aria-label="Dismiss"
                                    on:click=move |_| pricing.update(PricingView::dismiss_advisory)
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
            }}

            <div class="plans">{plan_cards}</div>

            <Faq />
        </div>
    }
}

#[component]
fn Faq() -> impl IntoView {
    let entries = [
        (
            "What are credits?",
            "Each generation or edit uses credits. Your allowance is ready right after checkout.",
        ),
        (
            "Can I cancel anytime?",
            "Yes. Cancelling stops the renewal; access lasts until the paid year ends.",
        ),
        (
            "Which payment methods are accepted?",
            "Checkout is hosted by our payment provider and accepts major cards.",
        ),
        (
            "Can I use the images commercially?",
            "Every paid plan includes a commercial license for the images you create.",
        ),
    ];

    view! {
        <section class="faq">
            <h2>"Frequently asked questions"</h2>
            {entries
                .into_iter()
                .map(|(question, answer)| {
                    view! {
                        <details>
                            <summary>{question}</summary>
                            <p>{answer}</p>
                        </details>
                    }
                })
                .collect_view()}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_options_point_back_to_origin() {
        let plans = PlanCatalog::standard().plans();
        let options = checkout_options(&plans[1], "https://shop.example.com");

        assert_eq!(
            options.success_url.as_deref(),
            Some("https://shop.example.com/?checkout=success")
        );
        assert_eq!(options.units, Some(1));
        assert_eq!(
            options.metadata.and_then(|m| m.get("plan").cloned()),
            Some(json!("pro"))
        );
    }
}
