//! Frame scheduler: the render/update tick and input dispatch, interleaved on
//! one task.

mod scheduler;

pub use scheduler::{RunExit, Scheduler, DEFAULT_FRAME_RATE};
