pub mod dispatch;
pub mod question;
pub mod recent;
pub mod schema;
pub mod search;
pub mod shared;
pub mod user;
