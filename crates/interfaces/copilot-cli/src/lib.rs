pub mod commands;

use clap::ValueEnum;
use copilot_app_core::AuthMode;

#[derive(ValueEnum, Clone, Debug, Copy)]
pub enum CliAuthMode {
    None,
    Required,
}

impl From<CliAuthMode> for AuthMode {
    fn from(m: CliAuthMode) -> Self {
        match m {
            CliAuthMode::None => AuthMode::None,
            CliAuthMode::Required => AuthMode::Required,
        }
    }
}
