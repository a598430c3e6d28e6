pub mod config_ops;
pub mod generate_ops;
pub mod voiceover_ops;
