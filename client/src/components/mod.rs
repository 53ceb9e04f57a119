//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the entity grid and its dialogs. Route-level data
//! loading stays in `pages`; shared state arrives through Leptos context.

pub mod advisor_panel;
pub mod confirm_dialog;
pub mod datatable;
pub mod notice_banner;
