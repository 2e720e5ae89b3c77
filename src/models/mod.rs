//! 请求、响应与业务实体模型

pub mod auth;
pub mod common;
pub mod courses;
pub mod edu_centers;
pub mod ratings;
pub mod users;

pub use common::*;
