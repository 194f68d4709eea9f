//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome and route wrappers while reading shared
//! state from Leptos context providers.

pub mod account_header;
pub mod protected_route;
