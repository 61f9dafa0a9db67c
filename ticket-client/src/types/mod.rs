// src/types/mod.rs

pub mod datetime;
pub mod query;
pub mod select;

pub use datetime::{local_day_end, local_day_start, wire_datetime, DateTimeField};
pub use query::SortOrder;
pub use select::SelectOption;
