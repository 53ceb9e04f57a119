//! Edit form at `/{route_key}/{id}/edit`, pre-populated from the table row.
//!
//! Types without a detail view (restaurants) route their view action here
//! too. Submitting belongs to each type's own form handling; this page only
//! guarantees the form opens with the row the operator picked.

#[cfg(test)]
#[path = "entity_edit_test.rs"]
mod entity_edit_test;

use entities::{EndpointRegistry, Record};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_params_map};

use crate::state::handoff::RecordHandoff;

/// Editable fields: everything but the identifier keys.
pub(crate) fn editable_fields(record: &Record) -> Vec<(String, String)> {
    record
        .fields()
        .keys()
        .filter(|key| key.as_str() != "_id" && key.as_str() != "id")
        .map(|key| (key.clone(), record.text(key).unwrap_or_default()))
        .collect()
}

#[component]
pub fn EntityEditPage() -> impl IntoView {
    let registry = expect_context::<EndpointRegistry>();
    let handoff = expect_context::<RwSignal<RecordHandoff>>();
    let params = use_params_map();
    let route_key = params.read_untracked().get("route_key").unwrap_or_default();
    let page_path = use_location().pathname.get_untracked();

    let label = registry.resolve(&route_key).label.clone();
    let record = handoff.try_update(|h| h.take_for(&page_path)).flatten();
    let list_path = format!("/{route_key}");

    let form = match record {
        Some(record) => {
            let inputs = editable_fields(&record)
                .into_iter()
                .map(|(key, value)| {
                    let value = RwSignal::new(value);
                    view! {
                        <label class="dialog__label">
                            {key}
                            <input
                                class="dialog__input"
                                type="text"
                                prop:value=move || value.get()
                                on:input=move |ev| value.set(event_target_value(&ev))
                            />
                        </label>
                    }
                })
                .collect::<Vec<_>>();
            view! {
                <form class="edit-page__form" on:submit=|ev| ev.prevent_default()>
                    <p class="edit-page__id">"Record " {record.id().to_string()}</p>
                    {inputs}
                </form>
            }
            .into_any()
        }
        None => view! {
            <p class="edit-page__missing">"Open this form from the table to edit a record."</p>
        }
        .into_any(),
    };

    view! {
        <div class="edit-page">
            <header class="edit-page__header toolbar">
                <a class="btn" href=list_path>"Back"</a>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <h1 class="toolbar__title">"Edit " {label}</h1>
            </header>
            {form}
        </div>
    }
}
