//! Run flag shared between the simulation loop and whatever handles input

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clonable "keep running" flag.
///
/// Input handlers call [`RunFlag::stop`] from any thread; the loop checks
/// [`RunFlag::is_running`] once per frame, between sweeps.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}
