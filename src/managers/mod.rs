// State managers over the store connection: visit history and settings.

pub mod config_manager;
pub mod history_manager;
