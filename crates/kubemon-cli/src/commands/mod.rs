pub mod changes;
pub mod completion;
pub mod config;
pub mod mark_all_read;
pub mod mark_read;
pub mod save;
pub mod server_info;
pub mod stats;
pub mod watch;
