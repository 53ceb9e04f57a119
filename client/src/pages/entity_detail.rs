//! Record detail pages: `/{route_key}/{id}` and the user profile route.
//!
//! SYSTEM CONTEXT
//! ==============
//! The table fetches detail records before navigating here and hands them
//! over through `RecordHandoff`. Direct visits load the record from the
//! entity type's view endpoint instead. Deletes go through a one-row
//! `TableState`, so the same busy flag keeps a second confirm from issuing
//! another request. A successful delete bumps the `RefreshBus` so the list
//! reloads when the operator goes back.

#[cfg(test)]
#[path = "entity_detail_test.rs"]
mod entity_detail_test;

use entities::{
    ApiError, EndpointRegistry, EntityRoutes, MountGuard, Notice, NoticeKind, PendingAction, Phase, Record, RecordId,
    RefreshBus, TableState, execute_plan,
};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate, use_params_map};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::notice_banner::NoticeBanner;
use crate::state::handoff::RecordHandoff;

/// Field name and display text, in record order.
pub(crate) fn field_rows(record: &Record) -> Vec<(String, String)> {
    record.fields().keys().map(|key| (key.clone(), record.text(key).unwrap_or_default())).collect()
}

/// The delete button is live once the record is shown and nothing is pending
/// or in flight.
pub(crate) fn can_delete(loaded: bool, table: &TableState) -> bool {
    loaded && *table.phase() == Phase::Idle
}

/// Why a record cannot be loaded directly, when its type has no view route.
pub(crate) fn missing_view_message(routes: &EntityRoutes) -> String {
    format!("{} records have no detail view.", routes.label)
}

#[component]
pub fn EntityDetailPage() -> impl IntoView {
    let params = use_params_map();
    let route_key = params.read_untracked().get("route_key").unwrap_or_default();
    let id = params.read_untracked().get("id").unwrap_or_default();
    view! { <RecordDetail route_key=route_key id=id/> }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let params = use_params_map();
    let id = params.read_untracked().get("id").unwrap_or_default();
    view! { <RecordDetail route_key="users".to_owned() id=id/> }
}

#[component]
fn RecordDetail(route_key: String, id: String) -> impl IntoView {
    let registry = expect_context::<EndpointRegistry>();
    let handoff = expect_context::<RwSignal<RecordHandoff>>();
    let bus = expect_context::<RwSignal<RefreshBus>>();
    let navigate = use_navigate();
    let page_path = use_location().pathname.get_untracked();

    let routes = StoredValue::new(registry.resolve(&route_key).into_owned());
    let record_id = RecordId::from(id);
    let record = RwSignal::new(None::<Record>);
    let notice = RwSignal::new(None::<Notice>);
    let table = RwSignal::new(TableState::new());
    let deleted = RwSignal::new(false);

    let guard = MountGuard::new();
    let cleanup_guard = guard.clone();
    on_cleanup(move || cleanup_guard.unmount());

    let handed = handoff.try_update(|h| h.take_for(&page_path)).flatten();
    match (handed, routes.with_value(|r| r.view_fetch_path(&record_id))) {
        (Some(found), _) => record.set(Some(found)),
        (None, Ok(Some(api_path))) => {
            let guard = guard.clone();
            leptos::task::spawn_local(async move {
                let transport = crate::net::api::BrowserTransport::from_storage();
                let result = entities::fetch_detail(&transport, &api_path).await;
                if !guard.is_mounted() {
                    return;
                }
                match result {
                    Ok(found) => record.set(Some(found)),
                    Err(err) => notice.set(Some(Notice::from_error("Could not load record", &err))),
                }
            });
        }
        (None, Ok(None)) => {
            let message = routes.with_value(missing_view_message);
            notice.set(Some(Notice { kind: NoticeKind::Error, title: "No detail view".to_owned(), message, details: None }));
        }
        (None, Err(err)) => notice.set(Some(Notice::from_error("Could not load record", &ApiError::from(err)))),
    }

    let list_path = format!("/{route_key}");
    let back_path = list_path.clone();
    Effect::new(move || {
        if deleted.get() {
            navigate(&back_path, NavigateOptions::default());
        }
    });

    let delete_key = route_key.clone();
    let on_confirm = Callback::new(move |()| {
        let Some(Ok(plan)) = table.try_update(|t| routes.with_value(|r| t.confirm(r))) else {
            return;
        };
        let key = delete_key.clone();
        let guard = guard.clone();
        leptos::task::spawn_local(async move {
            let transport = crate::net::api::BrowserTransport::from_storage();
            let outcome = execute_plan(&plan, &transport).await;
            if !guard.is_mounted() {
                return;
            }
            let mut rows = record.get_untracked().into_iter().collect::<Vec<_>>();
            let removed = table.try_update(|t| t.finish(&mut rows, &outcome)).and_then(Result::ok).unwrap_or(false);
            if removed {
                bus.update(|b| {
                    b.bump(&key);
                });
                deleted.set(true);
            } else {
                notice.set(table.with_untracked(|t| t.notice().cloned()));
            }
        });
    });
    let on_cancel = Callback::new(move |()| table.update(TableState::cancel));
    let on_dismiss = Callback::new(move |()| notice.set(None));
    let request_delete = move |_: leptos::ev::MouseEvent| {
        record.with_untracked(|found| {
            if let Some(found) = found {
                table.update(|t| {
                    let _ = t.request_delete(std::slice::from_ref(found), found.id());
                });
            }
        });
    };

    view! {
        <div class="detail-page">
            <header class="detail-page__header toolbar">
                <a class="btn" href=list_path>"Back"</a>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <h1 class="toolbar__title">{move || routes.with_value(|r| r.label.clone())}</h1>
                <span class="toolbar__spacer"></span>
                <button
                    class="btn btn--danger"
                    disabled=move || !table.with(|t| can_delete(record.with(Option::is_some), t))
                    on:click=request_delete
                >
                    {move || if table.with(TableState::is_busy) { "Deleting..." } else { "Delete" }}
                </button>
            </header>
            <NoticeBanner notice=notice on_dismiss=on_dismiss/>
            {move || match record.get() {
                Some(found) => {
                    let rows = field_rows(&found)
                        .into_iter()
                        .map(|(key, value)| view! { <tr><th>{key}</th><td>{value}</td></tr> })
                        .collect::<Vec<_>>();
                    view! { <table class="detail-page__fields">{rows}</table> }.into_any()
                }
                None => view! { <p>"Loading..."</p> }.into_any(),
            }}
            <Show when=move || table.with(|t| t.pending().is_some())>
                <ConfirmDialog
                    title="Confirm delete"
                    message=Signal::derive(move || {
                        table.with(|t| t.pending().map(PendingAction::prompt).unwrap_or_default())
                    })
                    on_confirm=on_confirm
                    on_cancel=on_cancel
                />
            </Show>
        </div>
    }
}
