use std::path::Path;

use plate_core::settings::{self, Settings};

use crate::io::{read_text, CliError};

/// Install the settings file (if any) and return the effective settings.
/// Must run before anything else reads the settings singleton.
pub fn load_settings(file: Option<&Path>) -> Result<&'static Settings, CliError> {
    if let Some(path) = file {
        settings::init_custom(read_text(path)?)?;
    }
    Ok(settings::settings())
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}
