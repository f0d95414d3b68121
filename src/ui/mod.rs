pub mod app;
pub mod output;
pub mod settings;
pub mod settings_io;
