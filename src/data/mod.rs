pub mod callbacks;
pub mod commands;
pub mod config;
pub mod dialogue;
pub mod menu;
pub mod notify;
pub mod session;
