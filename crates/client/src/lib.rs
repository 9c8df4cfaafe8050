//! calgrid_client - CLI client and month-view controller for the calgrid API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;
pub mod view;

pub use client::CalgridClient;
pub use error::{ClientError, Result};
pub use view::{fetch_range, CalendarController};
