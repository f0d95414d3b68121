pub mod error;
pub mod step;
pub mod step_result;
