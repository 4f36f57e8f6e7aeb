//! Score calculation for content quality

use crate::{Grade, Status};

/// Points deducted per check by status.
const PENALTY_BAD: u8 = 15;
const PENALTY_WARNING: u8 = 8;
const MAX_SCORE: i32 = 100;

/// Calculator for content quality scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Points a single check costs
    pub fn penalty(status: Status) -> u8 {
        match status {
            Status::Good => 0,
            Status::Warning => PENALTY_WARNING,
            Status::Bad => PENALTY_BAD,
        }
    }

    /// Start at 100, deduct per check, clamp to 0-100
    pub fn calculate(statuses: &[Status]) -> u8 {
        let penalty: i32 = statuses.iter().map(|s| Self::penalty(*s) as i32).sum();
        (MAX_SCORE - penalty).clamp(0, MAX_SCORE) as u8
    }

    /// Get a description of the grade
    pub fn grade_description(grade: Grade) -> &'static str {
        match grade {
            Grade::A => "Excellent - Content is well optimized for search",
            Grade::B => "Good - Content is solid but has room for improvement",
            Grade::C => "Fair - Several checks need attention",
            Grade::D => "Poor - Content has significant SEO gaps",
            Grade::F => "Failing - Content needs major rework before publishing",
        }
    }
}
