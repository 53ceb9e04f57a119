//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use entities::{EndpointRegistry, RefreshBus, RegistryError};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    entity_detail::{EntityDetailPage, ProfilePage},
    entity_edit::EntityEditPage,
    entity_list::EntityListPage,
    home::HomePage,
};
use crate::state::handoff::RecordHandoff;

/// Route keys this app mounts the entity table on.
pub const HOSTED_ROUTE_KEYS: &[&str] = &["users", "hotels", "tours", "vehicle", "restaurant"];

/// Marketplace registry, checked against every hosted route key.
///
/// # Errors
///
/// Returns [`RegistryError::Unregistered`] when a hosted key would fall
/// through to the generic endpoint.
pub fn checked_registry() -> Result<EndpointRegistry, RegistryError> {
    let registry = EndpointRegistry::marketplace();
    registry.validate(HOSTED_ROUTE_KEYS.iter().copied())?;
    Ok(registry)
}

/// Root application component.
///
/// Provides the registry, refresh bus and record hand-off contexts and sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let registry = match checked_registry() {
        Ok(registry) => registry,
        Err(err) => {
            return view! {
                <Title text="TripDesk"/>
                <p class="app-error">{format!("Configuration error: {err}")}</p>
            }
            .into_any();
        }
    };

    provide_context(registry);
    provide_context(RwSignal::new(RefreshBus::new()));
    provide_context(RwSignal::new(RecordHandoff::default()));

    view! {
        <Title text="TripDesk"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("profile"), ParamSegment("id")) view=ProfilePage/>
                <Route path=ParamSegment("route_key") view=EntityListPage/>
                <Route path=(ParamSegment("route_key"), ParamSegment("id")) view=EntityDetailPage/>
                <Route
                    path=(ParamSegment("route_key"), ParamSegment("id"), StaticSegment("edit"))
                    view=EntityEditPage
                />
            </Routes>
        </Router>
    }
    .into_any()
}
