//! PostQuery integration tests.

mod support;
