pub mod assessment;
pub mod content;
pub mod question;
pub mod template;
pub mod user;
