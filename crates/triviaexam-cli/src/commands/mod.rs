pub mod grade;
pub mod init;
pub mod questions;
pub mod serve;
pub mod validate;
