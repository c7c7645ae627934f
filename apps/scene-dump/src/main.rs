use std::process::ExitCode;

fn main() -> ExitCode {
    scene_dump::init_logging();

    let worker = std::thread::Builder::new()
        .stack_size(1024 * 1024 * 512)
        .spawn(scene_dump::internal_main);

    match worker {
        Ok(worker) => match worker.join() {
            Ok(exit_code) => exit_code,
            Err(panic) => std::panic::resume_unwind(panic),
        },
        Err(err) => {
            log::warn!("Failed to spawn worker thread, running on the main thread: {}", err);
            scene_dump::internal_main()
        }
    }
}
