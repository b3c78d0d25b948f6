pub mod file;
pub mod moderation;
