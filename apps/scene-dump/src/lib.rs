use std::{
    ffi::OsString,
    io::{self, Write},
    process::ExitCode,
};

use anyhow::Result;
use appearance_model::Scene;
use cli::Command;

pub mod cli;
pub mod hierarchy;
pub mod loader;
pub mod report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Dumped,
    Usage,
    Info,
    LoadFailed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Dumped | Outcome::Info => ExitCode::SUCCESS,
            Outcome::Usage | Outcome::LoadFailed => ExitCode::FAILURE,
        }
    }
}

/// Set to any value to log a profile of the import and post-processing.
pub const PROFILE_ENV: &str = "SCENE_DUMP_PROFILE";

pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module("gltf", log::LevelFilter::Warn)
        .filter_module("tobj", log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

/// Expects [`init_logging`] to have been called.
pub fn internal_main() -> ExitCode {
    let profiling = std::env::var_os(PROFILE_ENV).is_some();
    if profiling {
        appearance_profiling::log_frames();
        appearance_profiling::set_enabled(true);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run(std::env::args_os(), &mut out).and_then(|outcome| {
        out.flush()?;
        Ok(outcome)
    });

    if profiling {
        appearance_profiling::finish_frame();
    }

    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Parses `args` and dumps the requested model to `out`.
pub fn run<I, T>(args: I, out: &mut impl Write) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match cli::parse(args) {
        Command::Dump(args) => args,
        Command::Usage => {
            writeln!(out, "{}", cli::usage())?;
            return Ok(Outcome::Usage);
        }
        Command::Info(text) => {
            write!(out, "{}", text)?;
            return Ok(Outcome::Info);
        }
    };

    let Some(scene) = loader::load_scene(&args.model_file, out)? else {
        writeln!(out, "Couldn't load {}", args.model_file.display())?;
        return Ok(Outcome::LoadFailed);
    };

    dump_scene(&scene, out)?;
    Ok(Outcome::Dumped)
}

/// Writes the hierarchy followed by the node, material, mesh and animation
/// sections.
pub fn dump_scene(scene: &Scene, out: &mut impl Write) -> io::Result<()> {
    appearance_profiling::profile_function!();

    let nodes = hierarchy::flatten_nodes(&scene.root, out)?;
    hierarchy::log_unresolved_references(scene, &nodes);

    report::write_node_details(&nodes, out)?;
    report::write_materials(&scene.materials, out)?;
    report::write_meshes(&scene.meshes, out)?;
    report::write_animations(&scene.animations, out)?;
    Ok(())
}
