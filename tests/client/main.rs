//! ApiClient integration tests against stub axum servers.
//!
//! Each test binds a router to port 0 and points a client at it.

#![cfg(feature = "client")]

mod support;
mod requests;
