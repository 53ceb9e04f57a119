//! Client-side state shared through Leptos context.
//!
//! DESIGN
//! ======
//! Plain structs wrapped in `RwSignal`s by `App`. Keeping them framework-free
//! lets the transitions be unit tested natively.

pub mod collection;
pub mod handoff;
