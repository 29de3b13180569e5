pub mod backup;
pub mod import;
pub mod init;
pub mod serve;
