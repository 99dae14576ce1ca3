//! Request pacing and throttling recovery shared by the catalog clients.
//!
//! Every client routes its requests through a [`RateGovernor`]. The governor
//! records the quota headers a server sends back, waits out `429 Too Many
//! Requests` responses before asking the caller to resend, and turns any
//! other non-success status into [`ThrottleError::Api`].
//!
//! ```ignore
//! let governor = RateGovernor::new("anilist");
//! let response = governor.execute(client.post(url).json(&body)).await?;
//! ```

mod error;
mod governor;
mod quota;

pub use error::ThrottleError;
pub use governor::{Outcome, RateGovernor, DEFAULT_MAX_THROTTLES, FALLBACK_WAIT};
pub use quota::QuotaSnapshot;

pub type Result<T> = std::result::Result<T, ThrottleError>;
