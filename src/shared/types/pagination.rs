use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Largest offset the database accepts (SQL integers are signed 64-bit).
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Offset pagination as accepted by the list endpoints (`?skip=0&limit=10`)
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct PageParams {
    /// Number of records to skip. Default: 0
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of records to return (1–100). Default: 10
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Skip clamped to `MAX_SKIP`.
    pub fn effective_skip(&self) -> u64 {
        self.skip.min(MAX_SKIP)
    }

    /// Limit clamped to `1..=MAX_LIMIT`.
    pub fn effective_limit(&self) -> u64 {
        self.limit.clamp(1, MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageParams::new(0, 0).effective_limit(), 1);
        assert_eq!(PageParams::new(0, 1_000).effective_limit(), MAX_LIMIT);
        assert_eq!(PageParams::default().effective_limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn skip_is_clamped_to_signed_range() {
        assert_eq!(PageParams::new(u64::MAX, 10).effective_skip(), MAX_SKIP);
        assert_eq!(PageParams::new(25, 10).effective_skip(), 25);
    }

    #[test]
    fn missing_query_fields_use_defaults() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }
}
