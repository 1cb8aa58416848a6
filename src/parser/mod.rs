//! Subscription parsing
//!
//! Turns a raw subscription body into canonical [`Proxy`](crate::models::Proxy)
//! records. Individual links that fail to decode are dropped with a warning;
//! only an unrecognizable body is an error.

pub mod explodes;
pub mod parse_settings;
pub mod ruleset;
pub mod subparser;
pub mod types;

pub use parse_settings::{NativeFidelity, ParseSettings};
pub use subparser::{classify_content, explode_sub, parse_subscription};
pub use types::{DecodeError, ParseError, SubscriptionContent};
