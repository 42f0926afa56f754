//! Order submission.
//!
//! Orders are handed to an external order service through [`OrderSubmitter`].
//! The bundled [`SimulatedOrderSubmitter`] waits a fixed delay and accepts
//! every order.

use super::errors::OrderSubmissionError;
use super::models::{OrderDraft, OrderReceipt};
use crate::clock::SharedClock;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub type SharedOrderSubmitter = Arc<dyn OrderSubmitter>;

#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderReceipt, OrderSubmissionError>;
}

/// Accepts every order after `delay`.
pub struct SimulatedOrderSubmitter {
    delay: Duration,
    clock: SharedClock,
}

impl SimulatedOrderSubmitter {
    pub fn new(delay: Duration, clock: SharedClock) -> Self {
        Self { delay, clock }
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedOrderSubmitter {
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderReceipt, OrderSubmissionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let receipt = OrderReceipt::at(self.clock.now());
        tracing::debug!(
            order_number = %receipt.order_number,
            items = draft.item_count(),
            "simulated order accepted"
        );
        Ok(receipt)
    }
}

/// How often and how patiently retryable submission failures are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first; at least 1
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_backoff: Duration::ZERO,
        }
    }

    /// Delay before retrying after failed attempt number `attempt` (1-based).
    /// Doubles with every attempt.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_backoff.saturating_mul(1u32 << exponent)
    }
}

/// Submits `draft`, retrying transient failures per `policy`.
pub async fn submit_with_retry(
    submitter: &dyn OrderSubmitter,
    draft: &OrderDraft,
    policy: &RetryPolicy,
) -> Result<OrderReceipt, OrderSubmissionError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match submitter.submit(draft).await {
            Ok(receipt) => return Ok(receipt),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                let backoff = policy.backoff_for(attempt);
                tracing::warn!(attempt, ?backoff, error = %e, "order submission failed, retrying");
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "order submission failed");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::{Role, User};
    use crate::clock::FixedClock;
    use crate::pricing::PriceSummary;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Replays a fixed sequence of outcomes, then succeeds.
    struct Scripted {
        failures: Mutex<Vec<OrderSubmissionError>>,
        calls: Mutex<u32>,
    }

    impl Scripted {
        fn failing_with(failures: Vec<OrderSubmissionError>) -> Self {
            Self {
                failures: Mutex::new(failures),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl OrderSubmitter for Scripted {
        async fn submit(&self, _: &OrderDraft) -> Result<OrderReceipt, OrderSubmissionError> {
            *self.calls.lock().unwrap() += 1;
            let mut failures = self.failures.lock().unwrap();
            if failures.is_empty() {
                Ok(OrderReceipt::at(Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()))
            } else {
                Err(failures.remove(0))
            }
        }
    }

    fn draft() -> OrderDraft {
        OrderDraft {
            customer: User {
                id: Uuid::nil(),
                email: "ana@example.com".into(),
                name: "Ana".into(),
                role: Role::Customer,
            },
            items: Vec::new(),
            pricing: PriceSummary::compute(Decimal::ZERO, None),
            coupon_code: None,
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_backoff: Duration::from_millis(100),
        };
        assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn retries_transient_failures() {
        let submitter = Scripted::failing_with(vec![
            OrderSubmissionError::Timeout,
            OrderSubmissionError::Network("reset".into()),
        ]);

        let receipt = submit_with_retry(&submitter, &draft(), &fast_policy(3)).await;
        assert!(receipt.is_ok());
        assert_eq!(submitter.calls(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let submitter = Scripted::failing_with(vec![OrderSubmissionError::Timeout; 5]);

        let err = submit_with_retry(&submitter, &draft(), &fast_policy(2))
            .await
            .unwrap_err();
        assert_eq!(err, OrderSubmissionError::Timeout);
        assert_eq!(submitter.calls(), 2);
    }

    #[tokio::test]
    async fn does_not_retry_declined_payments() {
        let submitter =
            Scripted::failing_with(vec![OrderSubmissionError::PaymentDeclined("card".into())]);

        let err = submit_with_retry(&submitter, &draft(), &fast_policy(3))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderSubmissionError::PaymentDeclined(_)));
        assert_eq!(submitter.calls(), 1);
    }

    #[tokio::test]
    async fn simulated_submitter_stamps_clock_time() {
        let placed_at = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();
        let submitter = SimulatedOrderSubmitter::new(Duration::ZERO, Arc::new(FixedClock(placed_at)));

        let receipt = submitter.submit(&draft()).await.unwrap();
        assert_eq!(receipt.placed_at, placed_at);
        assert_eq!(receipt.order_number, format!("AJ{}", placed_at.timestamp_millis()));
    }
}
