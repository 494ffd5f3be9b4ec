//! # portal-router
//!
//! Navigation for the participant portal SPA: an ordered route table, a
//! typed session read from the `session` cookie, and an access guard that
//! runs before every navigation. The [`routes`] module serves the SPA in
//! history mode, applying the same guard to every page request.

pub mod config;
pub mod nav;
pub mod routes;
pub mod state;
