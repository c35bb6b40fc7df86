pub mod browse;
pub mod config;
pub mod export;
pub mod link;
pub mod list;
pub mod render;
pub mod show;
