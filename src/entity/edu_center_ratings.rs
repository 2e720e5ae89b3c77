//! 教育中心评分实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "edu_center_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub score: i32,
    pub owner_id: Uuid,
    pub edu_center_id: Uuid,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::edu_centers::Entity",
        from = "Column::EduCenterId",
        to = "super::edu_centers::Column::Id"
    )]
    EduCenter,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::edu_centers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EduCenter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
