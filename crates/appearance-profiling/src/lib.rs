use std::sync::Arc;

pub use puffin;

#[macro_export]
macro_rules! profile_function {
    () => {
        $crate::puffin::profile_function!();
    };
    ($data:expr) => {
        $crate::puffin::profile_function!($data);
    };
}

#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        $crate::puffin::profile_scope!($name);
    };
    ($name:expr, $data:expr) => {
        $crate::puffin::profile_scope!($name, $data);
    };
}

/// Scopes are only recorded while profiling is enabled.
pub fn set_enabled(enabled: bool) {
    puffin::set_scopes_on(enabled);
}

pub fn is_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Closes the current frame and hands it to every registered sink.
pub fn finish_frame() {
    profile_function!();
    puffin::GlobalProfiler::lock().new_frame();
}

/// Logs the wall time and scope count of every finished frame.
pub fn log_frames() -> puffin::FrameSinkId {
    puffin::GlobalProfiler::lock().add_sink(Box::new(|frame: Arc<puffin::FrameData>| {
        let meta = frame.meta();
        let (start_ns, end_ns) = meta.range_ns;
        log::info!(
            "Profiled frame {}: {} scopes in {:.3} ms",
            meta.frame_index,
            meta.num_scopes,
            (end_ns - start_ns) as f64 / 1_000_000.0
        );
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn busy_work() -> u64 {
        profile_function!();
        (0..1000u64).sum()
    }

    #[test]
    fn finished_frames_reach_sinks() {
        let scopes = Arc::new(AtomicUsize::new(0));
        let counter = scopes.clone();
        let sink = puffin::GlobalProfiler::lock().add_sink(Box::new(move |frame: Arc<puffin::FrameData>| {
            counter.fetch_add(frame.meta().num_scopes, Ordering::SeqCst);
        }));

        set_enabled(true);
        assert!(is_enabled());
        {
            profile_scope!("import");
            assert_eq!(busy_work(), 499_500);
        }
        finish_frame();
        set_enabled(false);
        puffin::GlobalProfiler::lock().remove_sink(sink);

        assert!(scopes.load(Ordering::SeqCst) >= 2);
    }
}
