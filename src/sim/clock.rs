//! Frame time to fixed simulation steps

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we try to catch up on
const MAX_FRAME_DT: f32 = 0.1;

/// Accumulates variable frame time and hands out whole `SIM_DT` steps
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's elapsed time and return how many ticks to run.
    ///
    /// At most `MAX_SUBSTEPS` per frame; time beyond that is dropped so a
    /// stall never snowballs into a burst of catch-up ticks.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation time", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
