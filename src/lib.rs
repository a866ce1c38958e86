//! Core library exports for the grocery admin dashboard.
//!
//! This crate exposes the domain types, forms, the remote-API repository,
//! service and view-state layers used by the grocery admin web application.

#[cfg(feature = "client")]
pub mod domain;
#[cfg(feature = "client")]
pub mod dto;
#[cfg(feature = "client")]
mod error_conversions;
#[cfg(feature = "client")]
pub mod forms;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod viewstate;

/// Fixed session key under which the authenticated session is persisted.
pub const AUTH_SESSION_KEY: &str = "grocery_admin_auth";

/// Session key holding the set of expanded parent-category rows.
pub const EXPANDED_SESSION_KEY: &str = "grocery_admin_expanded";

/// Served in place of a missing category cover image.
pub const DEFAULT_COVER_IMAGE: &str = "/assets/category-placeholder.svg";
