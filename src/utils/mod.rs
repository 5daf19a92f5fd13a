mod aggregation;

pub use aggregation::{aggregate_by_day, date_range};
