use chrono::NaiveDate;

/// Regulatory limits and the observation window they are checked over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplianceRules {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    /// Kilolitres per day.
    pub daily_limit: f64,
    /// Kilolitres per calendar year.
    pub annual_limit: f64,
}

impl ComplianceRules {
    pub const DAILY_LIMIT: f64 = 3700.0;
    pub const ANNUAL_LIMIT: f64 = 1_350_500.0;

    /// The licence conditions the service reports against: 2021-12-17 through
    /// 2023-12-16 inclusive.
    pub fn regulatory() -> Self {
        Self {
            window_start: NaiveDate::from_ymd_opt(2021, 12, 17).expect("valid window start"),
            window_end: NaiveDate::from_ymd_opt(2023, 12, 16).expect("valid window end"),
            daily_limit: Self::DAILY_LIMIT,
            annual_limit: Self::ANNUAL_LIMIT,
        }
    }

    pub fn in_window(&self, date: NaiveDate) -> bool {
        date >= self.window_start && date <= self.window_end
    }

    pub fn exceeds_daily(&self, total: f64) -> bool {
        total > self.daily_limit
    }

    pub fn exceeds_annual(&self, total: f64) -> bool {
        total > self.annual_limit
    }
}

impl Default for ComplianceRules {
    fn default() -> Self {
        Self::regulatory()
    }
}
