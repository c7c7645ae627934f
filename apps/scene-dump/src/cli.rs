use std::{ffi::OsString, path::PathBuf};

use clap::{error::ErrorKind, Parser};

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// Prints the node hierarchy, materials, meshes and animations of a model.
#[derive(Parser, Debug)]
#[command(name = PROGRAM_NAME, version)]
pub struct Args {
    /// Model file to dump (glTF, GLB or OBJ).
    #[arg(allow_hyphen_values = true)]
    pub model_file: PathBuf,
}

pub enum Command {
    Dump(Args),
    /// Wrong argument count or unknown flags.
    Usage,
    /// `--help` or `--version`, already rendered by clap.
    Info(String),
}

pub fn usage() -> String {
    format!("{} <model-file>", PROGRAM_NAME)
}

pub fn parse<I, T>(args: I) -> Command
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => Command::Dump(args),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Command::Info(err.render().to_string())
            }
            kind => {
                log::debug!("Rejected command line: {}", kind);
                Command::Usage
            }
        },
    }
}
