// Library target exists solely for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the data-layer
// modules so harnesses can import types via `typedrill::session::*` /
// `typedrill::store::*`. The UI layer is only exercised through the binary.
#![allow(dead_code)]

pub mod catalog;
pub mod session;
pub mod store;
