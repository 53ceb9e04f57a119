//! Landing page linking to every registered entity list.

use entities::EndpointRegistry;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    let registry = expect_context::<EndpointRegistry>();
    let links = registry
        .iter()
        .map(|routes| {
            let href = format!("/{}", routes.key);
            let label = routes.label.clone();
            view! {
                <li>
                    <A href=href>{label}</A>
                </li>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="home-page">
            <h1>"TripDesk"</h1>
            <ul class="home-page__links">{links}</ul>
        </div>
    }
}
