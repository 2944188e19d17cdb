pub mod config;
pub mod xlogging;
pub mod xzmq;

pub mod time {
    use std::time::SystemTime;

    pub fn time_now() -> u64 {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::time::time_now;

    #[test]
    fn time_now_is_millis_since_epoch() {
        let now = time_now();
        // 2020-01-01 in millis, sanity bound against seconds/nanos confusion
        assert!(now > 1_577_836_800_000);
        assert!(now < 10_000_000_000_000);
    }
}
