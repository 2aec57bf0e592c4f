//! Flick N Roll - session and role authorization for the facility dashboard
//!
//! The dashboard's views (courts, bookings, inventory, members, reports)
//! consume this crate for identity and role: a [`SessionManager`] is
//! built once at startup, restored from storage, and consulted by the
//! [`routing`] layer to decide what each path renders.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod routing;
pub mod storage;

pub use auth::{authorize, Principal, Role, SessionManager, SessionState};
pub use config::Config;
pub use error::Error;
