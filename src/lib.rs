//! Regis School - school management backend.
//!
//! Actix Web HTTP API over a SeaORM store, plus the public news pages.
//!
//! # Layout
//! - `cache`: in-memory object cache (Moka)
//! - `config`: layered configuration
//! - `entity`: SeaORM entities
//! - `errors`: domain error type
//! - `middlewares`: JWT and role guards
//! - `models`: request, response and domain types
//! - `routes`: HTTP routing
//! - `runtime`: startup and shutdown
//! - `services`: business rules per domain
//! - `storage`: storage trait and the SeaORM backend
//! - `utils`: JWT, passwords, validation and extractors

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
