//! Picking an order id that the gateway has not seen yet.
//!
//! Candidates are checked with a Search before use. Two callers can still pick
//! the same id between search and authorize; the gateway refuses the second
//! authorization in that case.

use crate::payments::error::{GatewayError, GatewayResult};
use crate::payments::payment::PaymentService;
use crate::payments::types::{Params, PaymentServiceType};
use rand::Rng;
use tracing::debug;

const MAX_DIGITS: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIdGenerator {
    pub prefix: String,
    /// Width of the random numeric suffix.
    pub digits: u32,
    pub max_attempts: u32,
    pub service_types: Vec<PaymentServiceType>,
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self {
            prefix: "ORDER_".to_string(),
            digits: 8,
            max_attempts: 10,
            service_types: vec![PaymentServiceType::Card],
        }
    }
}

impl OrderIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.digits == 0 || self.digits > MAX_DIGITS {
            return Err(GatewayError::validation(
                format!("digits must be between 1 and {}", MAX_DIGITS),
                "digits",
            ));
        }
        if self.max_attempts == 0 {
            return Err(GatewayError::validation(
                "max_attempts must be at least 1",
                "max_attempts",
            ));
        }
        Ok(())
    }

    pub fn candidate(&self) -> String {
        format!("{}{}", self.prefix, random_number(self.digits))
    }
}

/// Uniform random number with exactly `digits` decimal digits.
pub fn random_number(digits: u32) -> u64 {
    let digits = digits.clamp(1, MAX_DIGITS);
    let low = 10u64.pow(digits - 1);
    let high = 10u64.pow(digits) - 1;
    rand::thread_rng().gen_range(low..=high)
}

/// Returns the first candidate whose Search comes back without orders.
///
/// A failed Search aborts immediately; running out of attempts yields
/// [`GatewayError::TooManyAttempts`].
pub async fn find_unused_order_id(
    payments: &PaymentService,
    generator: &OrderIdGenerator,
) -> GatewayResult<String> {
    generator.validate()?;

    for attempt in 1..=generator.max_attempts {
        let candidate = generator.candidate();
        let search = Params::order_search(candidate.as_str(), &generator.service_types);
        let result = payments.search(&search).await?;

        if result.orders().is_empty() {
            debug!(order_id = %candidate, attempt, "found unused order id");
            return Ok(candidate);
        }
        debug!(order_id = %candidate, attempt, "order id already in use");
    }

    Err(GatewayError::TooManyAttempts {
        attempts: generator.max_attempts,
    })
}
