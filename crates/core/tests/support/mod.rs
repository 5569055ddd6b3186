//! Shared test helpers for `timetabler-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! the catalog tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod mocks;
