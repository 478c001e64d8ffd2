/// Time-of-day gate: the whole run is skipped while the local hour falls in
/// the quiet window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveHours {
    quiet_hours: Vec<u32>,
}

impl ActiveHours {
    pub fn new(quiet_hours: Vec<u32>) -> Self {
        Self { quiet_hours }
    }

    /// True unless `hour` (0-23) is one of the quiet hours.
    pub fn is_active(&self, hour: u32) -> bool {
        !self.quiet_hours.contains(&hour)
    }
}

impl Default for ActiveHours {
    // Active on [05:00, 24:00) and [00:00, 03:00) local time.
    fn default() -> Self {
        Self::new(vec![3, 4])
    }
}
