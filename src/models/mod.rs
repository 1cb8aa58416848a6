//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the application,
//! separated from the logic that operates on them.
//!
//! # Usage
//!
//! ```rust
//! use clash_converter::models::{Proxy, ProxyKind, ProxyType};
//!
//! let proxy = Proxy::trojan_construct("HK", "hk.example.com", 443, "secret", "", false);
//! assert_eq!(proxy.proxy_type(), ProxyType::Trojan);
//! assert!(matches!(proxy.kind, ProxyKind::Trojan { .. }));
//! ```

mod builder;
pub mod group_category;
pub mod proxy;
pub mod proxy_group_config;

pub use group_category::{GroupCategory, Preset};
pub use proxy::{Proxy, ProxyKind, ProxyType};
pub use proxy_group_config::{BalanceStrategy, ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType};
