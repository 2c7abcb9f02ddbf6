pub mod activity;
pub mod daily_log;
pub mod exercise;
pub mod meal;
pub mod user;
