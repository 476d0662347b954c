//! HRMS Lite: employee records and daily attendance over HTTP, stored in SQLite.

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod utils;
