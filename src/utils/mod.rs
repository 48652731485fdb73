mod aggregation;

pub use aggregation::{bucket_sums, cumulative_sum};
