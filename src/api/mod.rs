pub mod auth;
pub mod client;
pub mod files;
pub mod folders;
pub mod storage;
