//! Utility functions for string formatting and list filtering.

pub mod format;

pub use format::{cmp_ignore_case, contains_ignore_case, filter_users, format_price, truncate};
