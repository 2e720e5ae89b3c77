use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::{course_ratings, edu_center_ratings};
use crate::errors::{EduMatchError, Result};
use crate::models::ratings::{RatingTarget, round_average};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

/// 按目标 ID 汇总 (总分, 条数) 并换算成一位小数的平均分
fn average_by_target(rows: Vec<(Uuid, i32)>) -> HashMap<Uuid, f64> {
    let mut totals: HashMap<Uuid, (i64, i64)> = HashMap::new();
    for (target_id, score) in rows {
        let entry = totals.entry(target_id).or_default();
        entry.0 += score as i64;
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(id, (sum, count))| (id, round_average(sum, count)))
        .collect()
}

fn map_rating_err(err: DbErr, missing: EduMatchError) -> EduMatchError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => missing,
        _ => EduMatchError::database(format!("创建评分失败: {err}")),
    }
}

impl SeaOrmStorage {
    /// 写入一条评分，不更新任何汇总字段
    pub async fn create_rating_impl(
        &self,
        owner_id: Uuid,
        target: RatingTarget,
        score: i32,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        match target {
            RatingTarget::EduCenter(edu_center_id) => {
                edu_center_ratings::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    score: Set(score),
                    owner_id: Set(owner_id),
                    edu_center_id: Set(edu_center_id),
                    created_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(|e| map_rating_err(e, EduMatchError::EduCenterNotFound))?;
            }
            RatingTarget::Course(course_id) => {
                course_ratings::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    score: Set(score),
                    owner_id: Set(owner_id),
                    course_id: Set(course_id),
                    created_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(|e| map_rating_err(e, EduMatchError::CourseNotFound))?;
            }
        }

        Ok(())
    }

    /// 教育中心平均分，没有评分的中心不在结果中
    pub(crate) async fn edu_center_ratings<C: ConnectionTrait>(
        db: &C,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, f64>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(Uuid, i32)> = edu_center_ratings::Entity::find()
            .select_only()
            .column(edu_center_ratings::Column::EduCenterId)
            .column(edu_center_ratings::Column::Score)
            .filter(edu_center_ratings::Column::EduCenterId.is_in(ids.iter().copied()))
            .into_tuple()
            .all(db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询教育中心评分失败: {e}")))?;

        Ok(average_by_target(rows))
    }

    /// 课程平均分
    pub(crate) async fn course_ratings(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, f64>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(Uuid, i32)> = course_ratings::Entity::find()
            .select_only()
            .column(course_ratings::Column::CourseId)
            .column(course_ratings::Column::Score)
            .filter(course_ratings::Column::CourseId.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询课程评分失败: {e}")))?;

        Ok(average_by_target(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_by_target() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let averages = average_by_target(vec![(a, 5), (a, 4), (a, 5), (b, 0)]);
        assert_eq!(averages[&a], 4.7);
        assert_eq!(averages[&b], 0.0);
        assert_eq!(averages.len(), 2);
    }
}
