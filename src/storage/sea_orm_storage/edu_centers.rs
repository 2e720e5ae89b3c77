use std::collections::HashMap;

use super::{SeaOrmStorage, map_db_err};
use crate::entity::contacts::{
    ActiveModel as ContactActiveModel, Column as ContactColumn, Entity as Contacts,
    Model as ContactModel,
};
use crate::entity::edu_centers::{ActiveModel, Column, Entity as EduCenters, Model};
use crate::errors::{EduMatchError, Result};
use crate::models::{
    MAX_PAGE, MAX_PAGE_SIZE, PaginationInfo, PaginationQuery,
    edu_centers::{
        entities::{EduCenter, GeoPoint},
        requests::{CreateEduCenterRequest, UpdateEduCenterRequest},
        responses::EduCenterListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建教育中心及其联系方式，两者在同一个事务中写入
    pub async fn create_edu_center_impl(
        &self,
        owner_id: Uuid,
        req: CreateEduCenterRequest,
        cover_image: Option<String>,
    ) -> Result<EduCenter> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduMatchError::database(format!("开启事务失败: {e}")))?;

        match Self::insert_edu_center(&txn, owner_id, req, cover_image).await {
            Ok((center, contact)) => {
                txn.commit()
                    .await
                    .map_err(|e| EduMatchError::database(format!("提交事务失败: {e}")))?;
                // 新建的教育中心还没有评分
                Ok(center.into_edu_center(Some(contact), 0.0))
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("回滚创建教育中心事务失败: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    async fn insert_edu_center(
        txn: &DatabaseTransaction,
        owner_id: Uuid,
        req: CreateEduCenterRequest,
        cover_image: Option<String>,
    ) -> Result<(Model, ContactModel)> {
        let now = chrono::Utc::now().timestamp();
        let center_id = Uuid::new_v4();

        let center = ActiveModel {
            id: Set(center_id),
            name: Set(req.name),
            html_description: Set(req.html_description),
            address: Set(req.address),
            latitude: Set(req.latitude),
            longitude: Set(req.longitude),
            owner_id: Set(owner_id),
            cover_image: Set(cover_image),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(txn)
        .await
        .map_err(|e| map_db_err(e, EduMatchError::EduCenterExists, "创建教育中心失败"))?;

        let contact = ContactActiveModel {
            id: Set(Uuid::new_v4()),
            edu_center_id: Set(center_id),
            instagram: Set(req.contact.instagram),
            telegram: Set(req.contact.telegram),
            website: Set(req.contact.website),
            phone_number: Set(req.contact.phone_number),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await
        .map_err(|e| EduMatchError::database(format!("创建联系方式失败: {e}")))?;

        Ok((center, contact))
    }

    /// 更新教育中心，联系方式原地更新；未上传新封面时保留原封面
    pub async fn update_edu_center_impl(
        &self,
        id: Uuid,
        req: UpdateEduCenterRequest,
        cover_image: Option<String>,
    ) -> Result<Option<EduCenter>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduMatchError::database(format!("开启事务失败: {e}")))?;

        let updated = match Self::apply_edu_center_update(&txn, id, req, cover_image).await {
            // 评分在事务内读取，提交之后不再有会失败的步骤
            Ok(Some((center, contact))) => Self::edu_center_ratings(&txn, &[center.id])
                .await
                .map(|ratings| {
                    let rating = ratings.get(&center.id).copied().unwrap_or_default();
                    Some(center.into_edu_center(Some(contact), rating))
                }),
            other => other.map(|_| None),
        };

        match updated {
            Ok(Some(center)) => {
                txn.commit()
                    .await
                    .map_err(|e| EduMatchError::database(format!("提交事务失败: {e}")))?;
                Ok(Some(center))
            }
            other => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("回滚更新教育中心事务失败: {rollback_err}");
                }
                other
            }
        }
    }

    async fn apply_edu_center_update(
        txn: &DatabaseTransaction,
        id: Uuid,
        req: UpdateEduCenterRequest,
        cover_image: Option<String>,
    ) -> Result<Option<(Model, ContactModel)>> {
        let Some(existing) = EduCenters::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(txn)
            .await
            .map_err(|e| EduMatchError::database(format!("查询教育中心失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let mut model = existing.into_active_model();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(html_description) = req.html_description {
            model.html_description = Set(html_description);
        }
        if let Some(address) = req.address {
            model.address = Set(address);
        }
        if let Some(latitude) = req.latitude {
            model.latitude = Set(latitude);
        }
        if let Some(longitude) = req.longitude {
            model.longitude = Set(longitude);
        }
        if let Some(cover_image) = cover_image {
            model.cover_image = Set(Some(cover_image));
        }
        model.updated_at = Set(now);

        let center = model
            .update(txn)
            .await
            .map_err(|e| map_db_err(e, EduMatchError::EduCenterExists, "更新教育中心失败"))?;

        let patch = req.contact;
        let existing_contact = Contacts::find()
            .filter(ContactColumn::EduCenterId.eq(id))
            .one(txn)
            .await
            .map_err(|e| EduMatchError::database(format!("查询联系方式失败: {e}")))?;

        let contact = match existing_contact {
            Some(existing_contact) => {
                let mut contact = existing_contact.into_active_model();
                if let Some(instagram) = patch.instagram {
                    contact.instagram = Set(instagram);
                }
                if let Some(telegram) = patch.telegram {
                    contact.telegram = Set(telegram);
                }
                if let Some(website) = patch.website {
                    contact.website = Set(website);
                }
                if let Some(phone_number) = patch.phone_number {
                    contact.phone_number = Set(phone_number);
                }
                contact.updated_at = Set(now);
                contact.update(txn).await
            }
            // 历史数据缺少联系方式时补齐
            None => {
                ContactActiveModel {
                    id: Set(Uuid::new_v4()),
                    edu_center_id: Set(id),
                    instagram: Set(patch.instagram.unwrap_or_default()),
                    telegram: Set(patch.telegram.unwrap_or_default()),
                    website: Set(patch.website.unwrap_or_default()),
                    phone_number: Set(patch.phone_number.unwrap_or_default()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await
            }
        }
        .map_err(|e| EduMatchError::database(format!("更新联系方式失败: {e}")))?;

        Ok(Some((center, contact)))
    }

    /// 通过 ID 获取教育中心（不含已删除）
    pub async fn get_edu_center_by_id_impl(&self, id: Uuid) -> Result<Option<EduCenter>> {
        let center = EduCenters::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询教育中心失败: {e}")))?;

        match center {
            Some(center) => Ok(self.assemble_edu_centers(vec![center]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出教育中心
    pub async fn list_edu_centers_with_pagination_impl(
        &self,
        query: PaginationQuery,
    ) -> Result<EduCenterListResponse> {
        let page = query.page.clamp(1, MAX_PAGE) as u64;
        let size = query.size.clamp(1, MAX_PAGE_SIZE) as u64;

        let paginator = EduCenters::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduMatchError::database(format!("查询教育中心总数失败: {e}")))?;
        let centers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduMatchError::database(format!("查询教育中心列表失败: {e}")))?;

        Ok(EduCenterListResponse {
            items: self.assemble_edu_centers(centers).await?,
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 按 ID 批量获取教育中心，结果顺序不保证
    pub async fn get_edu_centers_by_ids_impl(&self, ids: &[Uuid]) -> Result<Vec<EduCenter>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let centers = EduCenters::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .filter(Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询教育中心失败: {e}")))?;

        self.assemble_edu_centers(centers).await
    }

    /// 所有未删除教育中心的坐标
    pub async fn list_edu_center_points_impl(&self) -> Result<Vec<GeoPoint>> {
        let rows: Vec<(Uuid, f64, f64)> = EduCenters::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Latitude)
            .column(Column::Longitude)
            .filter(Column::DeletedAt.is_null())
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询教育中心坐标失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(id, latitude, longitude)| GeoPoint {
                id,
                latitude,
                longitude,
            })
            .collect())
    }

    /// 软删除教育中心
    pub async fn delete_edu_center_impl(&self, id: Uuid) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = EduCenters::update_many()
            .col_expr(Column::DeletedAt, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| EduMatchError::database(format!("删除教育中心失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 为一批教育中心补上联系方式和评分
    async fn assemble_edu_centers(&self, centers: Vec<Model>) -> Result<Vec<EduCenter>> {
        let ids: Vec<Uuid> = centers.iter().map(|c| c.id).collect();
        let mut contacts = Self::contacts_by_center(&self.db, &ids).await?;
        let ratings = Self::edu_center_ratings(&self.db, &ids).await?;

        Ok(centers
            .into_iter()
            .map(|center| {
                let contact = contacts.remove(&center.id);
                let rating = ratings.get(&center.id).copied().unwrap_or_default();
                center.into_edu_center(contact, rating)
            })
            .collect())
    }

    async fn contacts_by_center<C: ConnectionTrait>(
        db: &C,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, ContactModel>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let contacts = Contacts::find()
            .filter(ContactColumn::EduCenterId.is_in(ids.iter().copied()))
            .all(db)
            .await
            .map_err(|e| EduMatchError::database(format!("查询联系方式失败: {e}")))?;

        Ok(contacts.into_iter().map(|c| (c.edu_center_id, c)).collect())
    }
}
