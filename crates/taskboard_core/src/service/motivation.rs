//! Motivation meter derived from the completed-today counter.

/// Count at which the meter is full.
pub const METER_CAP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotivationMeter {
    pub completed: u32,
    /// `0..=100`.
    pub percent: u32,
    pub tier: MeterTier,
}

impl MotivationMeter {
    pub fn from_completed(completed: u32) -> Self {
        let percent = completed.min(METER_CAP) * 100 / METER_CAP;
        let tier = if percent < 30 {
            MeterTier::Low
        } else if percent < 70 {
            MeterTier::Medium
        } else {
            MeterTier::High
        };
        Self {
            completed,
            percent,
            tier,
        }
    }
}
