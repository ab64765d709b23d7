pub mod limit;
pub mod user;
