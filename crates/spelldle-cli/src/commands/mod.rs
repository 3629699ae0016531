pub mod check;
pub mod init;
pub mod lessons;
pub mod play;
pub mod validate;
