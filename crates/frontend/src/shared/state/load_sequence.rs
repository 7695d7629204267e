//! Request tokens for page-level loads.
//!
//! Every load takes a token; a response is applied only while its token is
//! still the latest one handed out.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSequence {
    latest: u64,
}

impl LoadSequence {
    /// Start a load; every earlier token becomes stale.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_load_makes_older_stale() {
        let mut seq = LoadSequence::default();
        let first = seq.begin();
        assert!(seq.is_current(first));

        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_nothing_current_before_first_load() {
        let seq = LoadSequence::default();
        assert!(!seq.is_current(1));
    }
}
