pub mod command_mode;
pub mod insert_mode;
pub mod normal_mode;
pub mod search_mode;
