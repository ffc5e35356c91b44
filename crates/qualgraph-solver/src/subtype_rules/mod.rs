//! Per-kind subtype rules.
//!
//! Each submodule adds `check_*` methods to
//! [`SubtypeChecker`](crate::subtype::SubtypeChecker); the dispatch table in
//! `subtype.rs` decides which one runs.

mod declared;
mod executables;
mod type_variables;
mod unions;
mod wildcards;
