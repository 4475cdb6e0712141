//! Registration gateway: the async boundary the form submits through

mod simulated;
mod traits;

pub use simulated::SimulatedGateway;
pub use traits::{Registration, SubmissionGateway, SubmissionOutcome};

#[cfg(test)]
pub use traits::MockSubmissionGateway;
