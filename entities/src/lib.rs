//! Framework-agnostic core of the TripDesk entity table.
//!
//! This crate holds everything the grid needs that is not rendering: record
//! identity, the search filter, the selection set, the per-entity endpoint
//! registry, and the confirm/delete/bulk-delete flow driven over an async
//! [`EntityTransport`]. The Leptos client and the CLI both consume it.
//!
//! ARCHITECTURE
//! ============
//! Hosting pages own the row collection. [`TableState`] owns only transient
//! grid state (query, selection, confirmation phase, page, notice) and
//! mutates host rows through `&mut Vec<Record>` when a delete settles.

pub mod columns;
pub mod error;
pub mod filter;
pub mod mount;
pub mod notice;
pub mod page;
pub mod record;
pub mod refresh;
pub mod registry;
pub mod selection;
pub mod table;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use columns::{CellFormatter, CellRender, Column, default_columns};
pub use error::ApiError;
pub use filter::{SEARCH_FIELDS, filter_rows, matches_query};
pub use mount::MountGuard;
pub use notice::{Notice, NoticeKind};
pub use page::Page;
pub use record::{Record, RecordError, RecordId, records_from_value};
pub use refresh::RefreshBus;
pub use registry::{EndpointRegistry, EntityRoutes, Navigation, RegistryError, ViewRoute, route_key_from_path};
pub use selection::SelectionSet;
pub use table::{DeleteOutcome, DeletePlan, EditDispatch, PendingAction, Phase, TableError, TableState, execute_plan};
pub use transport::{
    ClientConfig, DEFAULT_REQUEST_TIMEOUT_SECS, EntityTransport, bearer_header_value, fetch_collection, fetch_detail,
};
