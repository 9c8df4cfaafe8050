//! Functional core for calgrid.
//!
//! Pure data types and functions: the month grid, event ordering, the
//! draft validator, the local event collection, the editor state machine
//! and the view state. No I/O happens here; storage is reached through the
//! [`storage::EventStore`] trait.

pub mod calendar;
pub mod serde;
pub mod storage;
