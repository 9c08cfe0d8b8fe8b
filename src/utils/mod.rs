pub mod format;
pub mod image_url;
pub mod logger;
