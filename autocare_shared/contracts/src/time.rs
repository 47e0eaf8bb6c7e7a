use chrono::{DateTime, Datelike, Utc};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar year.
    fn current_year(&self) -> i32 {
        self.now().year()
    }
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, time: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(time);
        self
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.expect_current_year().once().return_const(year);
        self
    }
}
