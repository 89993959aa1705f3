pub mod init;
pub mod reassign;
pub mod repos;
