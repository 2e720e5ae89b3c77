use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses, Model};
use crate::errors::{EduMatchError, Result};
use crate::models::{
    MAX_PAGE, MAX_PAGE_SIZE, PaginationInfo, PaginationQuery,
    courses::{
        entities::Course,
        requests::{CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

// 课程名重复或所属教育中心不存在
fn map_course_err(err: DbErr, context: &str) -> EduMatchError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => EduMatchError::CourseExists,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => EduMatchError::EduCenterNotFound,
        _ => EduMatchError::database(format!("{context}: {err}")),
    }
}

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            teacher: Set(req.teacher),
            edu_center_id: Set(req.edu_center_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_course_err(e, "创建课程失败"))?;

        Ok(model.into_course(0.0))
    }

    /// 通过 ID 获取课程（不含已删除）
    pub async fn get_course_by_id_impl(&self, id: Uuid) -> Result<Option<Course>> {
        let course = Courses::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询课程失败: {e}")))?;

        match course {
            Some(course) => Ok(self.assemble_courses(vec![course]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出课程，可按教育中心筛选
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: PaginationQuery,
        edu_center_id: Option<Uuid>,
    ) -> Result<CourseListResponse> {
        let page = query.page.clamp(1, MAX_PAGE) as u64;
        let size = query.size.clamp(1, MAX_PAGE_SIZE) as u64;

        let mut select = Courses::find().filter(Column::DeletedAt.is_null());
        if let Some(edu_center_id) = edu_center_id {
            select = select.filter(Column::EduCenterId.eq(edu_center_id));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduMatchError::database(format!("查询课程总数失败: {e}")))?;
        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduMatchError::database(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: self.assemble_courses(courses).await?,
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 更新课程，只更新提供的字段
    pub async fn update_course_impl(&self, req: UpdateCourseRequest) -> Result<Option<Course>> {
        let Some(existing) = Courses::find_by_id(req.id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(name) = req.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            model.description = Set(description);
        }
        if let Some(teacher) = req.teacher {
            model.teacher = Set(teacher);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_course_err(e, "更新课程失败"))?;

        Ok(self.assemble_courses(vec![updated]).await?.pop())
    }

    /// 软删除课程
    pub async fn delete_course_impl(&self, id: Uuid) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = Courses::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn assemble_courses(&self, courses: Vec<Model>) -> Result<Vec<Course>> {
        let ids: Vec<Uuid> = courses.iter().map(|c| c.id).collect();
        let ratings = self.course_ratings(&ids).await?;

        Ok(courses
            .into_iter()
            .map(|course| {
                let rating = ratings.get(&course.id).copied().unwrap_or_default();
                course.into_course(rating)
            })
            .collect())
    }
}
