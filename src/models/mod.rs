pub mod file;
pub mod folder;
pub mod storage;
pub mod user;
