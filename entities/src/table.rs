//! Grid state and the confirm → delete → settle flow.
//!
//! DESIGN
//! ======
//! Deletes run in three phases so reactive hosts never hold a borrow of
//! their state across an await:
//!
//! 1. **Confirm**: [`TableState::confirm`] moves `Confirming` to `Busy` and
//!    returns a [`DeletePlan`] of resolved `(id, path)` requests. Ids that
//!    cannot be placed in a path are never sent and count as failures.
//! 2. **Execute**: [`execute_plan`] issues every request before awaiting
//!    any of them and waits until all settle.
//! 3. **Finish**: [`TableState::finish`] applies the [`DeleteOutcome`] to the
//!    host's rows, sets the notice, and returns to `Idle`.
//!
//! One busy flag gates both single and bulk delete, so at most one action
//! is ever pending or in flight.
//!
//! TRADE-OFFS
//! ==========
//! Bulk delete is all-or-nothing for local rows: unless every request
//! succeeded, rows stay as they were and the notice names which ids did and
//! did not go through. The host's refresh callback only runs on success.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use futures::future::join_all;

use crate::error::ApiError;
use crate::filter::filter_rows;
use crate::notice::{Notice, NoticeKind};
use crate::page::Page;
use crate::record::{Record, RecordId};
use crate::registry::{EntityRoutes, Navigation};
use crate::selection::SelectionSet;
use crate::transport::EntityTransport;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("another table action is in progress")]
    Busy,
    #[error("no rows are selected")]
    EmptySelection,
    #[error("no action is awaiting confirmation")]
    NothingToConfirm,
    #[error("no action is in flight")]
    NotInFlight,
    #[error("record {0} is not in the table")]
    UnknownRecord(RecordId),
}

/// Destructive action waiting for the user's yes/no.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    Delete(RecordId),
    BulkDelete(Vec<RecordId>),
}

impl PendingAction {
    /// Question shown in the confirmation dialog.
    #[must_use]
    pub fn prompt(&self) -> String {
        match self {
            Self::Delete(id) => format!("Delete record {id}? This cannot be undone."),
            Self::BulkDelete(ids) if ids.len() == 1 => "Delete 1 selected record? This cannot be undone.".to_owned(),
            Self::BulkDelete(ids) => format!("Delete {} selected records? This cannot be undone.", ids.len()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Confirming(PendingAction),
    Busy,
}

/// Resolved delete requests for one confirmed action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletePlan {
    pub bulk: bool,
    pub requests: Vec<(RecordId, String)>,
    pub rejected: Vec<(RecordId, ApiError)>,
}

/// Per-id results once every request of a plan has settled.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteOutcome {
    pub bulk: bool,
    pub succeeded: Vec<RecordId>,
    pub failed: Vec<(RecordId, ApiError)>,
}

impl DeleteOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Some requests succeeded and some failed.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty() && !self.succeeded.is_empty()
    }

    #[must_use]
    pub fn notice(&self) -> Notice {
        if !self.bulk {
            return match (self.succeeded.first(), self.failed.first()) {
                (_, Some((_, err))) => Notice::from_error("Delete failed", err),
                (Some(id), None) => Notice::success("Deleted", format!("Record {id} was deleted.")),
                (None, None) => Notice::success("Deleted", "Nothing to delete."),
            };
        }

        let total = self.succeeded.len() + self.failed.len();
        if self.is_success() {
            let noun = if total == 1 { "record was" } else { "records were" };
            return Notice::success("Deleted", format!("{total} {noun} deleted."));
        }

        let details = self
            .failed
            .iter()
            .map(|(id, err)| format!("{id}: {}", err.details().unwrap_or_else(|| err.to_string())))
            .collect::<Vec<_>>()
            .join("\n");
        let failed_ids = self.failed.iter().map(|(id, _)| id.to_string()).collect::<Vec<_>>().join(", ");

        if self.is_partial() {
            Notice {
                kind: NoticeKind::Partial,
                title: "Bulk delete incomplete".to_owned(),
                message: format!(
                    "{} of {total} deletions succeeded; failed: {failed_ids}. The table was not changed.",
                    self.succeeded.len()
                ),
                details: Some(details),
            }
        } else {
            let reason = self.failed.first().map(|(_, err)| err.user_message()).unwrap_or_default();
            Notice {
                kind: NoticeKind::Error,
                title: "Bulk delete failed".to_owned(),
                message: format!("None of the {total} selected records were deleted. {reason}"),
                details: Some(details),
            }
        }
    }
}

/// Issue every request in `plan` concurrently and wait for all of them.
///
/// A failing request never cancels the others.
pub async fn execute_plan<T: EntityTransport + ?Sized>(plan: &DeletePlan, transport: &T) -> DeleteOutcome {
    let results = join_all(
        plan.requests
            .iter()
            .map(|(id, path)| async move { (id.clone(), transport.delete(path).await) }),
    )
    .await;

    let mut succeeded = Vec::new();
    let mut failed = plan.rejected.clone();
    for (id, result) in results {
        match result {
            Ok(_) => succeeded.push(id),
            Err(err) => failed.push((id, err)),
        }
    }
    DeleteOutcome { bulk: plan.bulk, succeeded, failed }
}

/// What the edit action should do for a row.
#[derive(Clone, Debug, PartialEq)]
pub enum EditDispatch {
    /// Hand the row to the host's edit callback.
    Callback(Record),
    Navigate(Navigation),
}

impl EditDispatch {
    /// A host-supplied edit callback always wins over the per-type default.
    #[must_use]
    pub fn resolve(routes: &EntityRoutes, record: &Record, has_on_edit: bool) -> Self {
        if has_on_edit {
            Self::Callback(record.clone())
        } else {
            Self::Navigate(routes.edit_navigation(record))
        }
    }
}

/// Transient grid state. Rows belong to the host and are passed in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableState {
    query: String,
    selection: SelectionSet,
    phase: Phase,
    page: Page,
    notice: Option<Notice>,
}

impl TableState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // SEARCH + PAGINATION
    // =========================================================================

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the live search; jumps back to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page.index = 0;
    }

    #[must_use]
    pub fn filtered(&self, rows: &[Record]) -> Vec<Record> {
        filter_rows(rows, &self.query)
    }

    /// Rows on the current page of the filtered view.
    #[must_use]
    pub fn visible(&self, rows: &[Record]) -> Vec<Record> {
        self.page.slice(&self.filtered(rows)).to_vec()
    }

    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn set_page(&mut self, index: usize, rows: &[Record]) {
        let len = self.filtered(rows).len();
        self.page = Page { index, ..self.page }.clamp(len);
    }

    /// Change rows per page; jumps back to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.page = Page { index: 0, size: size.max(1) };
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toggle(&mut self, id: &RecordId) -> bool {
        self.selection.toggle(id)
    }

    /// Select every row of the current filtered view.
    pub fn select_all(&mut self, rows: &[Record]) {
        let view = self.filtered(rows);
        self.selection.select_all(&view);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // =========================================================================
    // CONFIRMATION FLOW
    // =========================================================================

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Busy
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.phase {
            Phase::Confirming(action) => Some(action),
            Phase::Idle | Phase::Busy => None,
        }
    }

    /// Ask to delete one row.
    ///
    /// # Errors
    ///
    /// [`TableError::Busy`] unless idle; [`TableError::UnknownRecord`] when
    /// `id` names no row.
    pub fn request_delete(&mut self, rows: &[Record], id: &RecordId) -> Result<(), TableError> {
        self.ensure_idle()?;
        if !rows.iter().any(|r| r.id() == id) {
            return Err(TableError::UnknownRecord(id.clone()));
        }
        self.phase = Phase::Confirming(PendingAction::Delete(id.clone()));
        Ok(())
    }

    /// Ask to delete every selected row.
    ///
    /// # Errors
    ///
    /// [`TableError::Busy`] unless idle; [`TableError::EmptySelection`]
    /// when nothing is selected.
    pub fn request_bulk_delete(&mut self) -> Result<(), TableError> {
        self.ensure_idle()?;
        if self.selection.is_empty() {
            return Err(TableError::EmptySelection);
        }
        self.phase = Phase::Confirming(PendingAction::BulkDelete(self.selection.to_vec()));
        Ok(())
    }

    /// The user answered "no".
    pub fn cancel(&mut self) {
        if matches!(self.phase, Phase::Confirming(_)) {
            self.phase = Phase::Idle;
        }
    }

    /// The user answered "yes": go busy and resolve request paths.
    ///
    /// # Errors
    ///
    /// [`TableError::NothingToConfirm`] when no action is pending.
    pub fn confirm(&mut self, routes: &EntityRoutes) -> Result<DeletePlan, TableError> {
        let (bulk, ids) = match &self.phase {
            Phase::Confirming(PendingAction::Delete(id)) => (false, vec![id.clone()]),
            Phase::Confirming(PendingAction::BulkDelete(ids)) => (true, ids.clone()),
            Phase::Idle | Phase::Busy => return Err(TableError::NothingToConfirm),
        };
        self.phase = Phase::Busy;
        self.notice = None;
        let mut requests = Vec::with_capacity(ids.len());
        let mut rejected = Vec::new();
        for id in ids {
            match routes.delete_path(&id) {
                Ok(path) => requests.push((id, path)),
                Err(err) => rejected.push((id, ApiError::from(err))),
            }
        }
        Ok(DeletePlan { bulk, requests, rejected })
    }

    /// Apply a settled outcome to the host's rows and return to idle.
    ///
    /// Returns whether the host should re-fetch authoritative state.
    ///
    /// # Errors
    ///
    /// [`TableError::NotInFlight`] when no confirmed action is running.
    pub fn finish(&mut self, rows: &mut Vec<Record>, outcome: &DeleteOutcome) -> Result<bool, TableError> {
        if !self.is_busy() {
            return Err(TableError::NotInFlight);
        }
        self.phase = Phase::Idle;
        self.notice = Some(outcome.notice());

        if !outcome.is_success() {
            return Ok(false);
        }
        for id in &outcome.succeeded {
            if let Some(index) = rows.iter().position(|r| r.id() == id) {
                rows.remove(index);
            }
        }
        if outcome.bulk {
            self.selection.clear();
        } else {
            self.selection.retain_existing(rows);
        }
        let len = self.filtered(rows).len();
        self.page = self.page.clamp(len);
        Ok(true)
    }

    /// Confirm, execute and finish in one call, for hosts that can hold
    /// `&mut self` across the await.
    ///
    /// # Errors
    ///
    /// [`TableError::NothingToConfirm`] when no action is pending.
    pub async fn run_confirmed<T: EntityTransport + ?Sized>(
        &mut self,
        rows: &mut Vec<Record>,
        routes: &EntityRoutes,
        transport: &T,
        refresh_data: Option<&dyn Fn()>,
    ) -> Result<DeleteOutcome, TableError> {
        let plan = self.confirm(routes)?;
        let outcome = execute_plan(&plan, transport).await;
        if self.finish(rows, &outcome)? {
            if let Some(refresh) = refresh_data {
                refresh();
            }
        }
        Ok(outcome)
    }

    // =========================================================================
    // NOTICES
    // =========================================================================

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn ensure_idle(&self) -> Result<(), TableError> {
        if self.phase == Phase::Idle { Ok(()) } else { Err(TableError::Busy) }
    }
}
