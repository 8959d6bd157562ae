pub mod extract;
pub mod history;
pub mod init_config;
pub mod status;
