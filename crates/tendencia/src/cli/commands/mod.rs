pub mod dashboard;
pub mod probe;
pub mod question;
pub mod schema;
