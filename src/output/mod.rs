pub mod auth_formatter;
pub mod color;
pub mod file_formatter;
pub mod formatter;
pub mod pager;
pub mod size;
pub mod storage_formatter;
pub mod width;
