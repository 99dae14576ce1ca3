use reqwest::header::HeaderMap;

pub(crate) const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub(crate) const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub(crate) const RESET_HEADER: &str = "x-ratelimit-reset";

/// Last quota window reported by the server.
///
/// Advisory only: nothing in the governor gates a request on these values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotaSnapshot {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    /// Unix timestamp (seconds) at which the window refills.
    pub reset_at: Option<u64>,
}

impl QuotaSnapshot {
    /// Merge whatever quota headers are present; absent headers keep the
    /// previous value.
    pub(crate) fn update(&mut self, headers: &HeaderMap) -> bool {
        let mut changed = false;
        if let Some(limit) = header_number(headers, LIMIT_HEADER) {
            self.limit = Some(limit);
            changed = true;
        }
        if let Some(remaining) = header_number(headers, REMAINING_HEADER) {
            self.remaining = Some(remaining);
            changed = true;
        }
        if let Some(reset_at) = header_number(headers, RESET_HEADER) {
            self.reset_at = Some(reset_at);
            changed = true;
        }
        changed
    }

    /// True once the server has said the current window is used up.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

pub(crate) fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
