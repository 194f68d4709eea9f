//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates auth work to
//! `auth::coordinator` and route checks to `components::protected_route`.

pub mod change_password;
pub mod dashboard;
pub mod forgot_password;
pub(crate) mod form_rules;
pub mod google_role;
pub mod home;
pub mod login;
pub mod paywall;
pub mod reset_password;
pub mod signup;
pub mod unauthorized;
