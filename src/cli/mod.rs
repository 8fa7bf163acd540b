//! Terminal front end: the interactive menu and one-shot commands.

pub mod commands;
pub mod menu;
pub mod prompt;
