use super::{SeaOrmStorage, map_db_err};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{EduMatchError, Result};
use crate::models::{
    MAX_PAGE, MAX_PAGE_SIZE, PaginationInfo,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            username: Set(req.username),
            email: Set(req.email.filter(|e| !e.is_empty())),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            avatar: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_db_err(e, EduMatchError::UserExists, "创建用户失败"))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户（不含已删除）
    pub async fn get_user_by_id_impl(&self, id: Uuid) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.clamp(1, MAX_PAGE) as u64;
        let size = query.size.clamp(1, MAX_PAGE_SIZE) as u64;

        let mut select = Users::find().filter(Column::DeletedAt.is_null());

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(search))
                    .add(Column::FirstName.contains(search))
                    .add(Column::LastName.contains(search))
                    .add(Column::Email.contains(search)),
            );
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduMatchError::database(format!("查询用户总数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduMatchError::database(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 更新用户资料
    pub async fn update_user_impl(
        &self,
        id: Uuid,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name.trim().to_string());
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name.trim().to_string());
        }
        if let Some(username) = update.username {
            model.username = Set(username);
        }
        if let Some(email) = update.email {
            // 空字符串表示清除邮箱
            model.email = Set(Some(email).filter(|e| !e.is_empty()));
        }
        if let Some(avatar) = update.avatar {
            model.avatar = Set(Some(avatar));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| map_db_err(e, EduMatchError::UserExists, "更新用户失败"))?;

        Ok(Some(updated.into_user()))
    }

    /// 软删除用户
    pub async fn delete_user_impl(&self, id: Uuid) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = Users::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 用户总数（含已删除）
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("统计用户数量失败: {e}")))
    }
}
