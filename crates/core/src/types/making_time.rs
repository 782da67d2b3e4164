//! Recipe preparation time.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How long a recipe takes to make, split into hours and minutes.
///
/// Displays the way recipe cards show it:
///
/// ```
/// use meal_planner_core::MakingTime;
///
/// assert_eq!(MakingTime::new(1, 30).to_string(), "1 hr 30 min");
/// assert_eq!(MakingTime::new(2, 0).to_string(), "2 hr");
/// assert_eq!(MakingTime::new(0, 45).to_string(), "45 min");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakingTime {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
}

impl MakingTime {
    #[must_use]
    pub const fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Total preparation time in minutes.
    #[must_use]
    pub const fn total_minutes(&self) -> u32 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }
}

impl fmt::Display for MakingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours == 0 {
            return write!(f, "{} min", self.minutes);
        }

        write!(f, "{} hr", self.hours)?;
        if self.minutes > 0 {
            write!(f, " {} min", self.minutes)?;
        }
        Ok(())
    }
}
