//! Generic entity table: search, selection, paging and delete flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted by list pages with the host's rows signal. All grid logic lives
//! in `entities::TableState`; this component binds it to the DOM, resolves
//! endpoints for its route key from the shared `EndpointRegistry`, and runs
//! confirmed deletes over the browser transport.
//!
//! DESIGN
//! ======
//! Deletes cannot be cancelled once issued. A `MountGuard` is cleared on
//! cleanup and every post-await update checks it first. Navigation is
//! requested through a signal and performed by an effect, so row handlers
//! only capture `Copy` handles.

#[cfg(test)]
#[path = "datatable_test.rs"]
mod datatable_test;

use entities::{
    ApiError, Column, EditDispatch, EndpointRegistry, EntityRoutes, MountGuard, Navigation, Notice, PendingAction, Phase,
    Record, TableState, ViewRoute,
};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::notice_banner::NoticeBanner;
use crate::state::handoff::RecordHandoff;

/// Header checkbox state: every row of a non-empty filtered view is selected.
pub(crate) fn all_selected(table: &TableState, rows: &[Record]) -> bool {
    let view = table.filtered(rows);
    !view.is_empty() && table.selection().covers(&view)
}

pub(crate) fn selection_label(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 selected".to_owned(),
        n => format!("{n} selected"),
    }
}

pub(crate) fn has_view_action(routes: &EntityRoutes) -> bool {
    !matches!(routes.view, ViewRoute::None)
}

pub(crate) const PAGE_SIZES: [usize; 3] = [10, 25, 50];

/// What a body cell shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CellContent {
    Plain(String),
    Badge(String),
}

pub(crate) fn cell_content(column: &Column, record: &Record) -> CellContent {
    let text = column.cell(record);
    if column.is_badge() && !text.is_empty() { CellContent::Badge(text) } else { CellContent::Plain(text) }
}

fn cell_view(column: &Column, record: &Record) -> AnyView {
    match cell_content(column, record) {
        CellContent::Badge(text) => view! { <td><span class="badge">{text}</span></td> }.into_any(),
        CellContent::Plain(text) => view! { <td>{text}</td> }.into_any(),
    }
}

/// Handles every row closure needs.
#[derive(Clone)]
struct TableCtx {
    table: RwSignal<TableState>,
    rows: RwSignal<Vec<Record>>,
    routes: StoredValue<EntityRoutes>,
    columns: StoredValue<Vec<Column>>,
    handoff: RwSignal<RecordHandoff>,
    nav_target: RwSignal<Option<String>>,
    on_edit: Option<Callback<Record>>,
    guard: MountGuard,
}

impl TableCtx {
    fn follow(&self, navigation: Navigation) {
        match navigation {
            Navigation::Page(page) => self.nav_target.set(Some(page)),
            Navigation::EditForm { page, record } => {
                self.handoff.update(|h| h.stash(page.clone(), record));
                self.nav_target.set(Some(page));
            }
            Navigation::FetchDetail { api_path, page } => {
                let ctx = self.clone();
                leptos::task::spawn_local(async move {
                    let transport = crate::net::api::BrowserTransport::from_storage();
                    let result = entities::fetch_detail(&transport, &api_path).await;
                    if !ctx.guard.is_mounted() {
                        return;
                    }
                    match result {
                        Ok(record) => {
                            ctx.handoff.update(|h| h.stash(page.clone(), record));
                            ctx.nav_target.set(Some(page));
                        }
                        Err(err) => {
                            ctx.table.update(|t| t.set_notice(Notice::from_error("Could not load record", &err)));
                        }
                    }
                });
            }
            Navigation::Unavailable => {}
            Navigation::Invalid(err) => {
                self.table.update(|t| t.set_notice(Notice::from_error("Cannot open record", &ApiError::from(err))));
            }
        }
    }

    fn edit(&self, record: &Record) {
        let dispatch = self.routes.with_value(|routes| EditDispatch::resolve(routes, record, self.on_edit.is_some()));
        match (dispatch, self.on_edit) {
            (EditDispatch::Callback(record), Some(on_edit)) => on_edit.run(record),
            (EditDispatch::Navigate(navigation), _) => self.follow(navigation),
            (EditDispatch::Callback(_), None) => {}
        }
    }
}

#[component]
pub fn EntityTable(
    route_key: String,
    columns: Vec<Column>,
    rows: RwSignal<Vec<Record>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(optional)] on_edit: Option<Callback<Record>>,
    #[prop(optional)] refresh_data: Option<Callback<()>>,
) -> impl IntoView {
    let registry = expect_context::<EndpointRegistry>();
    let handoff = expect_context::<RwSignal<RecordHandoff>>();
    let navigate = use_navigate();

    let guard = MountGuard::new();
    let cleanup_guard = guard.clone();
    on_cleanup(move || cleanup_guard.unmount());

    let ctx = TableCtx {
        table: RwSignal::new(TableState::new()),
        rows,
        routes: StoredValue::new(registry.resolve(&route_key).into_owned()),
        columns: StoredValue::new(columns),
        handoff,
        nav_target: RwSignal::new(None),
        on_edit,
        guard,
    };
    let table = ctx.table;

    let nav_target = ctx.nav_target;
    Effect::new(move || {
        if let Some(page) = nav_target.get() {
            nav_target.set(None);
            navigate(&page, NavigateOptions::default());
        }
    });

    let confirm_ctx = ctx.clone();
    let on_confirm = Callback::new(move |()| {
        let ctx = confirm_ctx.clone();
        let plan = ctx.table.try_update(|t| ctx.routes.with_value(|routes| t.confirm(routes)));
        let Some(Ok(plan)) = plan else {
            return;
        };
        leptos::task::spawn_local(async move {
            let transport = crate::net::api::BrowserTransport::from_storage();
            let outcome = entities::execute_plan(&plan, &transport).await;
            if !ctx.guard.is_mounted() {
                return;
            }
            let mut refresh = false;
            ctx.rows.update(|rows| {
                ctx.table.update(|t| refresh = t.finish(rows, &outcome).unwrap_or(false));
            });
            if refresh {
                if let Some(refresh_data) = refresh_data {
                    refresh_data.run(());
                }
            }
        });
    });
    let on_cancel = Callback::new(move |()| table.update(TableState::cancel));
    let on_dismiss = Callback::new(move |()| table.update(TableState::dismiss_notice));

    let not_idle = Signal::derive(move || table.with(|t| t.phase() != &Phase::Idle));
    let columns = ctx.columns;
    let show_view = ctx.routes.with_value(has_view_action);
    let row_ctx = ctx.clone();

    view! {
        <section class="entity-table">
            <NoticeBanner notice=Signal::derive(move || table.with(|t| t.notice().cloned())) on_dismiss=on_dismiss/>
            <div class="entity-table__toolbar">
                <input
                    class="entity-table__search"
                    type="search"
                    placeholder="Search..."
                    prop:value=move || table.with(|t| t.query().to_owned())
                    on:input=move |ev| table.update(|t| t.set_query(event_target_value(&ev)))
                />
                <span class="entity-table__selected">
                    {move || table.with(|t| selection_label(t.selection().len()))}
                </span>
                <button
                    class="btn"
                    disabled=move || not_idle.get() || table.with(|t| t.selection().is_empty())
                    on:click=move |_| table.update(TableState::clear_selection)
                >
                    "Clear"
                </button>
                <button
                    class="btn btn--danger"
                    disabled=move || not_idle.get() || table.with(|t| t.selection().is_empty())
                    on:click=move |_| table.update(|t| {
                        let _ = t.request_bulk_delete();
                    })
                >
                    "Delete selected"
                </button>
            </div>
            <table class="entity-table__grid">
                <thead>
                    <tr>
                        <th>
                            <input
                                type="checkbox"
                                aria-label="Select all"
                                prop:checked=move || table.with(|t| rows.with(|r| all_selected(t, r)))
                                on:change=move |_| {
                                    rows.with_untracked(|r| {
                                        table.update(|t| {
                                            if all_selected(t, r) { t.clear_selection() } else { t.select_all(r) }
                                        });
                                    });
                                }
                            />
                        </th>
                        {columns.with_value(|cols| {
                            cols.iter().map(|c| view! { <th>{c.header.clone()}</th> }).collect::<Vec<_>>()
                        })}
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show
                        when=move || !loading.get()
                        fallback=move || view! { <tr><td class="entity-table__empty">"Loading..."</td></tr> }
                    >
                        {
                            let row_ctx = row_ctx.clone();
                            move || {
                                let visible = table.with(|t| rows.with(|r| t.visible(r)));
                                if visible.is_empty() {
                                    return view! { <tr><td class="entity-table__empty">"No records found."</td></tr> }
                                        .into_any();
                                }
                                visible
                                    .into_iter()
                                    .map(|record| entity_row(row_ctx.clone(), record, show_view, not_idle))
                                    .collect::<Vec<_>>()
                                    .into_any()
                            }
                        }
                    </Show>
                </tbody>
            </table>
            <div class="entity-table__pager">
                <button
                    class="btn"
                    disabled=move || table.with(|t| t.page().index == 0)
                    on:click=move |_| rows.with_untracked(|r| table.update(|t| t.set_page(t.page().index.saturating_sub(1), r)))
                >
                    "Prev"
                </button>
                <span>{move || table.with(|t| rows.with(|r| t.page().range_label(t.filtered(r).len())))}</span>
                <button
                    class="btn"
                    disabled=move || table.with(|t| rows.with(|r| t.page().index + 1 >= t.page().count(t.filtered(r).len())))
                    on:click=move |_| rows.with_untracked(|r| table.update(|t| t.set_page(t.page().index + 1, r)))
                >
                    "Next"
                </button>
                <label class="entity-table__page-size">
                    "Rows per page "
                    <select
                        prop:value=move || table.with(|t| t.page().size.to_string())
                        on:change=move |ev| {
                            if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                                table.update(|t| t.set_page_size(size));
                            }
                        }
                    >
                        {PAGE_SIZES
                            .iter()
                            .map(|size| view! { <option value=size.to_string()>{size.to_string()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
            </div>
            <Show when=move || table.with(TableState::is_busy)>
                <p class="entity-table__busy">"Deleting..."</p>
            </Show>
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
        </section>
    }
}

fn entity_row(ctx: TableCtx, record: Record, show_view: bool, not_idle: Signal<bool>) -> AnyView {
    let table = ctx.table;
    let rows = ctx.rows;
    let id = record.id().clone();
    let cells = ctx.columns.with_value(|cols| {
        cols.iter().map(|c| cell_view(c, &record)).collect::<Vec<_>>()
    });

    let checked_id = id.clone();
    let delete_id = id.clone();
    let view_button = show_view.then(|| {
        let ctx = ctx.clone();
        let record = record.clone();
        view! {
            <button
                class="btn"
                disabled=move || not_idle.get()
                on:click=move |_| ctx.follow(ctx.routes.with_value(|r| r.view_navigation(&record)))
            >
                "View"
            </button>
        }
    });

    view! {
        <tr>
            <td>
                <input
                    type="checkbox"
                    prop:checked=move || table.with(|t| t.selection().contains(&checked_id))
                    on:change=move |_| table.update(|t| {
                        t.toggle(&id);
                    })
                />
            </td>
            {cells}
            <td class="entity-table__actions">
                {view_button}
                <button class="btn" disabled=move || not_idle.get() on:click=move |_| ctx.edit(&record)>
                    "Edit"
                </button>
                <button
                    class="btn btn--danger"
                    disabled=move || not_idle.get()
                    on:click=move |_| rows.with_untracked(|r| table.update(|t| {
                        let _ = t.request_delete(r, &delete_id);
                    }))
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
    .into_any()
}
