#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! calldesk: a terminal desk for logging, editing and forwarding phone call
//! incident reports, with unsaved-change tracking on every editor tab.

pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod storage;
pub mod tui;
