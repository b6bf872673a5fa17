//! Integration tests for the Aviator core
//!
//! Drive the full runtime (engine, renderer, surface) on a virtual clock
//! through complete round lifecycles.


#[cfg(test)]
pub(crate) mod helpers {
    use crate::config::Config;
    use crate::round::{CrashReport, RoundStatus, TickOutcome};
    use crate::runtime::Runtime;
    use crate::test_utils::{FrameClock, RecordingSurface};

    /// 60 Hz frame step in milliseconds.
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    const MAX_FRAMES: usize = 100_000;

    pub fn runtime(width: u32, height: u32) -> Runtime<RecordingSurface> {
        Runtime::from_config(&Config::default(), RecordingSurface::new(width, height))
    }

    /// Render frames until the round crashes.
    pub fn run_until_crash(runtime: &mut Runtime<RecordingSurface>, clock: &mut FrameClock) -> CrashReport {
        for _ in 0..MAX_FRAMES {
            let report = runtime.frame(clock.advance());
            if let Some(TickOutcome::Crashed(crash)) = report.tick {
                return crash;
            }
        }
        panic!("round never crashed");
    }

    /// Render frames until a round is playing again.
    pub fn run_until_playing(runtime: &mut Runtime<RecordingSurface>, clock: &mut FrameClock) {
        for _ in 0..MAX_FRAMES {
            runtime.frame(clock.advance());
            if runtime.engine().status() == RoundStatus::Playing {
                return;
            }
        }
        panic!("round never restarted");
    }
}
