//! 联系方式实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub edu_center_id: Uuid,
    pub instagram: String,
    pub telegram: String,
    pub website: String,
    pub phone_number: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::edu_centers::Entity",
        from = "Column::EduCenterId",
        to = "super::edu_centers::Column::Id"
    )]
    EduCenter,
}

impl Related<super::edu_centers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EduCenter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_contact(self) -> crate::models::edu_centers::entities::Contact {
        crate::models::edu_centers::entities::Contact {
            instagram: self.instagram,
            telegram: self.telegram,
            website: self.website,
            phone_number: self.phone_number,
        }
    }
}
