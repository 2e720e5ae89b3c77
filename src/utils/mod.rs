pub mod extractor;
pub mod file_magic;
pub mod geo;
pub mod image_store;
pub mod jwt;
pub mod multipart;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use extractor::SafeUuid;
pub use file_magic::validate_magic_bytes;
pub use image_store::ImageStore;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
