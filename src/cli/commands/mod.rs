mod discover;
mod init;
mod migrate;

pub use discover::cmd_discover;
pub use init::cmd_init;
pub use migrate::cmd_migrate;
