//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod contacts;
pub mod course_ratings;
pub mod courses;
pub mod edu_center_ratings;
pub mod edu_centers;
pub mod users;
