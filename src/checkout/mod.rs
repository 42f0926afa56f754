//! Checkout Module
//!
//! Turns a cart session into a placed order:
//! - Domain models (checkout status, order drafts and confirmations)
//! - The order service seam with a simulated implementation and retries
//! - The checkout state machine
//! - REST API handlers

pub mod errors;
pub mod flow;
pub mod handlers;
pub mod models;
pub mod submitter;

pub use errors::{CheckoutError, OrderSubmissionError};
pub use flow::CheckoutFlow;
pub use handlers::routes;
pub use models::{CheckoutStatus, OrderConfirmation, OrderDraft, OrderReceipt};
pub use submitter::{
    submit_with_retry, OrderSubmitter, RetryPolicy, SharedOrderSubmitter, SimulatedOrderSubmitter,
};
