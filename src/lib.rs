pub mod computation;
pub mod driver;
pub mod errors;
pub mod types;


// Re-export main types
pub use computation::{Computation, Resume, StepOutcome, Steps};
pub use driver::{run, run_with, wrap, Driver, RunTarget};
pub use errors::ErrorInfo;
pub use types::{json_to_val, val_to_json, Settlement, Val, ValFuture, Yielded};
