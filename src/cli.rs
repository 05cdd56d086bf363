pub mod args;
pub mod color_when;
pub mod config_file;
pub mod documents;
