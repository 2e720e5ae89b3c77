//! 评分请求

use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{EduMatchError, Result};

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 5;

/// 评分对象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTarget {
    EduCenter(Uuid),
    Course(Uuid),
}

#[derive(Debug, Clone, Deserialize)]
pub struct EduCenterRatingRequest {
    pub score: i32,
    pub edu_center_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseRatingRequest {
    pub score: i32,
    pub course_id: Uuid,
}

/// 分数必须在 [0, 5] 之间
pub fn validate_score(score: i32) -> Result<()> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(EduMatchError::validation(format!(
            "score must be between {MIN_SCORE} and {MAX_SCORE}"
        )))
    }
}

/// 平均分保留一位小数
pub fn round_average(sum: i64, count: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    (sum as f64 / count as f64 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_score_bounds() {
        assert!(validate_score(0).is_ok());
        assert!(validate_score(5).is_ok());
        assert!(validate_score(-1).is_err());
        assert!(validate_score(6).is_err());
    }

    #[test]
    fn test_round_average() {
        assert_eq!(round_average(0, 0), 0.0);
        assert_eq!(round_average(14, 3), 4.7);
        assert_eq!(round_average(9, 2), 4.5);
        assert_eq!(round_average(5, 1), 5.0);
    }
}
