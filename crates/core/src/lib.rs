//! Domain types and pure logic for the srdesk client SDK.
//!
//! Everything in this crate is I/O-free: DTOs for the SR-management
//! REST API, status enumerations, poll-response classification, and
//! the list-cache freshness rules. The `srdesk-client` crate drives
//! these against the network.

pub mod common_code;
pub mod error;
pub mod list_state;
pub mod notification;
pub mod progress;
pub mod search;
pub mod sr;
pub mod survey;
pub mod types;
pub mod user;
pub mod wiki;
