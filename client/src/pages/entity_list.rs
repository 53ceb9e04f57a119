//! List page mounting the entity table for `/{route_key}`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns the rows. It loads them from the registry's list endpoint
//! and reloads whenever the shared `RefreshBus` marks its route key stale,
//! which is how the table's `refresh_data` and other pages' deletes reach it.
//! A bump that lands while a load is in flight is picked up once that load
//! settles: the effect also tracks a settle counter and re-checks staleness.

use entities::{EndpointRegistry, MountGuard, Record, RefreshBus, default_columns};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::advisor_panel::AdvisorPanel;
use crate::components::datatable::EntityTable;
use crate::state::collection::CollectionState;

#[component]
pub fn EntityListPage() -> impl IntoView {
    let registry = expect_context::<EndpointRegistry>();
    let bus = expect_context::<RwSignal<RefreshBus>>();
    let params = use_params_map();
    let route_key = Memo::new(move |_| params.read().get("route_key").unwrap_or_default());

    let rows = RwSignal::new(Vec::<Record>::new());
    let collection = RwSignal::new(CollectionState::default());
    let settled = RwSignal::new(0_u64);

    let guard = MountGuard::new();
    let cleanup_guard = guard.clone();
    on_cleanup(move || cleanup_guard.unmount());

    let load_registry = registry.clone();
    Effect::new(move || {
        let key = route_key.get();
        settled.track();
        let (stale, seq) = bus.with(|b| (collection.with_untracked(|c| c.needs_load(&key, b)), b.seq(&key)));
        if !stale {
            return;
        }
        if collection.try_update(|c| c.begin(&key)).unwrap_or(false) {
            rows.set(Vec::new());
        }
        let registry = load_registry.clone();
        let guard = guard.clone();
        leptos::task::spawn_local(async move {
            let transport = crate::net::api::BrowserTransport::from_storage();
            let result = entities::fetch_collection(&transport, &registry, &key).await;
            if !guard.is_mounted() {
                return;
            }
            if let Err(err) = &result {
                log_load_failure(&key, err);
            }
            if let Some(loaded) = collection.try_update(|c| c.settle(&key, seq, result)).flatten() {
                rows.set(loaded);
            }
            if bus.with_untracked(|b| collection.with_untracked(|c| c.needs_load(&key, b))) {
                settled.update(|n| *n += 1);
            }
        });
    });

    let refresh_data = Callback::new(move |()| {
        bus.update(|b| {
            b.bump(&route_key.get_untracked());
        });
    });

    let label_registry = registry.clone();
    let label = move || label_registry.resolve(&route_key.get()).label.clone();

    view! {
        <div class="entity-page">
            <header class="entity-page__header toolbar">
                <a class="btn" href="/">"Home"</a>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <h1 class="toolbar__title">{label}</h1>
                <span class="toolbar__spacer"></span>
                <button
                    class="btn"
                    disabled=move || collection.with(|c| c.loading)
                    on:click=move |_| refresh_data.run(())
                >
                    "Reload"
                </button>
            </header>
            {move || {
                collection
                    .with(|c| c.error.clone())
                    .map(|err| {
                        view! {
                            <p class="entity-page__error" title=err.details().unwrap_or_default()>
                                {err.user_message()}
                            </p>
                        }
                    })
            }}
            {move || {
                let key = route_key.get();
                let columns = default_columns(&key);
                view! {
                    <EntityTable
                        route_key=key
                        columns=columns
                        rows=rows
                        loading=Signal::derive(move || collection.with(|c| c.loading))
                        refresh_data=refresh_data
                    />
                }
            }}
            <AdvisorPanel/>
        </div>
    }
}

#[cfg(feature = "csr")]
fn log_load_failure(route_key: &str, err: &entities::ApiError) {
    if err.is_connectivity() {
        log::warn!("loading {route_key} failed: {err}");
    } else {
        log::error!("loading {route_key} failed: {err}");
    }
}

#[cfg(not(feature = "csr"))]
fn log_load_failure(route_key: &str, err: &entities::ApiError) {
    let _ = (route_key, err);
}
