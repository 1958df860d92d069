//! DocShelf library
//!
//! Document taxonomy core: template seeding, live document counts,
//! cascading soft-delete and two-phase uploads.

pub mod app;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod services;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
