use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Avatar).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::DeletedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 创建教育中心表
        manager
            .create_table(
                Table::create()
                    .table(EduCenters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EduCenters::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EduCenters::Name).string().not_null())
                    .col(ColumnDef::new(EduCenters::HtmlDescription).text().not_null())
                    .col(ColumnDef::new(EduCenters::Address).string().not_null())
                    .col(ColumnDef::new(EduCenters::Latitude).double().not_null())
                    .col(ColumnDef::new(EduCenters::Longitude).double().not_null())
                    .col(ColumnDef::new(EduCenters::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(EduCenters::CoverImage).string().null())
                    .col(
                        ColumnDef::new(EduCenters::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EduCenters::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EduCenters::DeletedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(EduCenters::Table, EduCenters::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建联系方式表（与教育中心一对一）
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Contacts::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Contacts::EduCenterId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Contacts::Instagram).string().not_null())
                    .col(ColumnDef::new(Contacts::Telegram).string().not_null())
                    .col(ColumnDef::new(Contacts::Website).string().not_null())
                    .col(ColumnDef::new(Contacts::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Contacts::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Contacts::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Contacts::Table, Contacts::EduCenterId)
                            .to(EduCenters::Table, EduCenters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::Teacher).string().not_null())
                    .col(ColumnDef::new(Courses::EduCenterId).uuid().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::DeletedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::EduCenterId)
                            .to(EduCenters::Table, EduCenters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教育中心评分表
        manager
            .create_table(
                Table::create()
                    .table(EduCenterRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EduCenterRatings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EduCenterRatings::Score).integer().not_null())
                    .col(ColumnDef::new(EduCenterRatings::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(EduCenterRatings::EduCenterId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EduCenterRatings::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EduCenterRatings::Table, EduCenterRatings::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EduCenterRatings::Table, EduCenterRatings::EduCenterId)
                            .to(EduCenters::Table, EduCenters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程评分表
        manager
            .create_table(
                Table::create()
                    .table(CourseRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseRatings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseRatings::Score).integer().not_null())
                    .col(ColumnDef::new(CourseRatings::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(CourseRatings::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseRatings::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseRatings::Table, CourseRatings::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseRatings::Table, CourseRatings::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一所有者下教育中心名称唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_edu_centers_owner_name")
                    .table(EduCenters::Table)
                    .col(EduCenters::OwnerId)
                    .col(EduCenters::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 同一教育中心下课程名称唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_center_name")
                    .table(Courses::Table)
                    .col(Courses::EduCenterId)
                    .col(Courses::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_edu_center_ratings_center")
                    .table(EduCenterRatings::Table)
                    .col(EduCenterRatings::EduCenterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_ratings_course")
                    .table(CourseRatings::Table)
                    .col(CourseRatings::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(CourseRatings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EduCenterRatings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EduCenters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    FirstName,
    LastName,
    Username,
    Email,
    PasswordHash,
    Role,
    Avatar,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum EduCenters {
    #[sea_orm(iden = "edu_centers")]
    Table,
    Id,
    Name,
    HtmlDescription,
    Address,
    Latitude,
    Longitude,
    OwnerId,
    CoverImage,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Contacts {
    #[sea_orm(iden = "contacts")]
    Table,
    Id,
    EduCenterId,
    Instagram,
    Telegram,
    Website,
    PhoneNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    Description,
    Teacher,
    EduCenterId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum EduCenterRatings {
    #[sea_orm(iden = "edu_center_ratings")]
    Table,
    Id,
    Score,
    OwnerId,
    EduCenterId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CourseRatings {
    #[sea_orm(iden = "course_ratings")]
    Table,
    Id,
    Score,
    OwnerId,
    CourseId,
    CreatedAt,
}
