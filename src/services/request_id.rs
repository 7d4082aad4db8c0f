use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier attached to every demo request as `reqid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Current Unix time in milliseconds plus up to a second of random jitter,
    /// so two ids generated in the same millisecond rarely collide.
    pub fn generate() -> Self {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self(now_ms + fastrand::u64(0..1000))
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_is_close_to_now() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let id = RequestId::generate();
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        let value: u64 = id.to_string().parse().unwrap();
        assert!(value >= before);
        assert!(value < after + 1000);
    }

    #[test]
    fn displays_as_plain_number() {
        assert_eq!(RequestId::from(1234).to_string(), "1234");
    }
}
