//! Bounded retry around transient connection failures
//!
//! The retry utility is a standalone higher-order function: it takes the
//! operation closure and runs it until it succeeds, fails with a
//! non-retryable error, or the attempt ceiling is reached. Only errors
//! classified as connection failures are ever retried; everything else
//! surfaces on first occurrence.
//!
//! # Example
//!
//! ```rust
//! use reinhardt_mongo::retry::{Backoff, RetryPolicy};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new()
//!     .with_max_attempts(5)
//!     .with_backoff(Backoff::Fixed(Duration::from_millis(50)));
//!
//! assert_eq!(policy.max_attempts(), 5);
//! ```

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::Result;

/// Delay strategies between retry attempts
///
/// The default is [`Backoff::None`]: a failed attempt is retried
/// immediately, matching the behavior of the legacy driver wrappers this
/// crate replaces. Backoff is a knob, not a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
	/// Retry immediately with no delay
	None,

	/// Wait a fixed duration between attempts
	Fixed(Duration),

	/// Double the delay after every failed attempt, capped at `max_delay`
	ExponentialBackoff {
		/// Delay before the first retry
		initial_delay: Duration,
		/// Upper bound on the delay
		max_delay: Duration,
	},
}

impl Backoff {
	/// Delay to apply after the given (1-based) failed attempt.
	///
	/// Returns `None` when no sleep is needed.
	pub fn delay(&self, attempt: u32) -> Option<Duration> {
		match self {
			Backoff::None => None,
			Backoff::Fixed(delay) => Some(*delay),
			Backoff::ExponentialBackoff {
				initial_delay,
				max_delay,
			} => {
				let exp = attempt.saturating_sub(1).min(31);
				let delay = initial_delay.saturating_mul(2u32.saturating_pow(exp));
				Some(delay.min(*max_delay))
			}
		}
	}
}

impl Default for Backoff {
	fn default() -> Self {
		Backoff::None
	}
}

/// Retry policy applied to every forwarded collection operation
///
/// Defaults:
/// - `max_attempts`: 3 (total attempts, including the first)
/// - `backoff`: [`Backoff::None`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	max_attempts: u32,
	backoff: Backoff,
}

impl RetryPolicy {
	/// Create a policy with default values
	pub fn new() -> Self {
		Self {
			max_attempts: 3,
			backoff: Backoff::None,
		}
	}

	/// Set the total attempt ceiling
	///
	/// A value of 0 is clamped to 1: every call executes at least once.
	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = max_attempts.max(1);
		self
	}

	/// Set the delay strategy between attempts
	pub fn with_backoff(mut self, backoff: Backoff) -> Self {
		self.backoff = backoff;
		self
	}

	/// Total attempt ceiling
	pub fn max_attempts(&self) -> u32 {
		self.max_attempts
	}

	/// Delay strategy between attempts
	pub fn backoff(&self) -> Backoff {
		self.backoff
	}
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new()
	}
}

/// Runs `op`, retrying connection failures up to the policy's attempt
/// ceiling.
///
/// Non-connection errors propagate immediately on first occurrence. When
/// the ceiling is exhausted the last connection failure is returned
/// unchanged.
pub async fn retry_on_connection_failure<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let mut attempt = 1u32;
	loop {
		match op().await {
			Ok(value) => return Ok(value),
			Err(err) if err.is_connection_failure() && attempt < policy.max_attempts() => {
				warn!(
					attempt,
					max_attempts = policy.max_attempts(),
					error = %err,
					"connection failure, retrying"
				);
				if let Some(delay) = policy.backoff().delay(attempt) {
					tokio::time::sleep(delay).await;
				}
				attempt += 1;
			}
			Err(err) => return Err(err),
		}
	}
}
