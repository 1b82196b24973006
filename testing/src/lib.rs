//! # Todo Master Testing
//!
//! Test support shared by the workspace:
//!
//! - [`ReducerTest`] runs a reducer scenario without a runtime
//! - [`assertions`] inspect the effects a reducer returned
//! - [`FixedClock`] pins time so generated ids are predictable
//! - [`init_test_tracing`] routes `tracing` output into the test harness


/// Test doubles for environment traits
pub mod mocks {
    use chrono::{DateTime, TimeZone, Utc};
    use todo_master_core::environment::Clock;

    /// Clock frozen at one instant
    ///
    /// ```
    /// use todo_master_core::environment::Clock;
    /// use todo_master_testing::FixedClock;
    ///
    /// let clock = FixedClock::new(chrono::Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixedClock {
        at: DateTime<Utc>,
    }

    impl FixedClock {
        /// Freeze time at `at`
        #[must_use]
        pub const fn new(at: DateTime<Utc>) -> Self {
            Self { at }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.at
        }
    }

    /// Clock frozen at 2025-01-01T00:00:00Z (1 735 689 600 000 ms)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(Utc.timestamp_millis_opt(1_735_689_600_000).single().unwrap_or_default())
    }
}

/// Send `tracing` output to the test writer
///
/// Honours `RUST_LOG`, defaulting to `warn`. Repeated calls are harmless.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
