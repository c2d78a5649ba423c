use std::time::Duration;

use criterion::{Criterion, Throughput};

// Placement runs are long compared to single samplers; fewer, longer samples.
pub const SAMPLE_SIZE: usize = 15;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(4);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in placed disks (or cells); never zero so criterion can report it.
pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}
