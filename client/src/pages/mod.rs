//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped loading and delegates rendering of the grid
//! and dialogs to `components`.

pub mod entity_detail;
pub mod entity_edit;
pub mod entity_list;
pub mod home;
