//! The `todolist` library crate.
//!
//! A multi-tenant to-do list service: user accounts and per-user todos
//! behind password login and stateless bearer-token authentication. This
//! crate holds the authentication core (password hashing, token issuing and
//! validation, identity resolution, ownership checks), the domain models,
//! the HTTP handlers and the error mapping; the `main` binary wires them
//! into an HTTP server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
