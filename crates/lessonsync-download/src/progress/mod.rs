//! Progress throttling for console redraws.

mod throttle;

pub use throttle::ProgressThrottle;
