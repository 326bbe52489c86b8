//! # Records - Decoded Structure Instances
//!
//! A record is one instance of a named/typed field set. This module provides
//! the closed set of record representations and the ad hoc constructors for
//! records that do not come from a store.
//!
//! ## Module Structure
//!
//! - `view`: the `Record` enum, the zero-copy `BufRecord` view, and the
//!   materialized `OwnedRecord`
//! - `proxy`: `ProxyRecord`, re-viewing a record through another member set
//! - `factory`: single-field construction and record merging
//!
//! ## Access Model
//!
//! All access is by field name, lazily materialized per field. Buffer-backed
//! records borrow from the shared payload where possible; owned records hold
//! their values outright. Proxies and merges forward, so a wrapper chain of
//! any depth still resolves each read against the record that actually holds
//! the bytes.

pub mod factory;
pub mod proxy;
pub mod view;

pub use factory::{merge, record_of, MergedRecord};
pub use proxy::ProxyRecord;
pub use view::{BufRecord, OwnedRecord, Record};

#[cfg(test)]
mod tests;
