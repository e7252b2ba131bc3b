pub mod check;
pub mod files;
pub mod generate;
pub mod helper;
pub mod init;
