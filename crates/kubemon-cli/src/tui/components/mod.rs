pub mod change_list;
pub mod config_panel;
pub mod filter_bar;
pub mod help_modal;
pub mod notifications;
pub mod stats_panel;

pub use change_list::render_change_list;
pub use config_panel::render_config_panel;
pub use filter_bar::render_filter_bar;
pub use help_modal::render_help_modal;
pub use notifications::render_notifications;
pub use stats_panel::render_stats_panel;
