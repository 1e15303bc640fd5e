pub mod logging;
pub mod parallel;
