//! Invalid-field markers with a fixed lifetime
//!
//! Every mark schedules its own clear; later actions never extend or cancel
//! it.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use storefront_model::FormField;
use storefront_surface::Surface;
use tokio::task::JoinHandle;

/// Marks form fields invalid and clears them after `ttl`
#[derive(Debug)]
pub struct ValidationMarkers {
    ttl: Duration,
    timers: Mutex<Vec<JoinHandle<()>>>,
}

impl ValidationMarkers {
    /// Markers that clear themselves after `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            timers: Mutex::new(Vec::new()),
        }
    }

    /// Marker lifetime
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mark `fields` on the surface now and schedule their clear
    ///
    /// Must be called from within a tokio runtime.
    pub fn mark(&self, surface: &Arc<Mutex<Surface>>, fields: &[FormField]) {
        if fields.is_empty() {
            return;
        }
        {
            let mut surface = surface.lock();
            for field in fields {
                if let Err(e) = surface.mark_invalid(*field) {
                    tracing::warn!(%field, error = %e, "cannot mark field");
                }
            }
        }

        let surface = Arc::clone(surface);
        let fields = fields.to_vec();
        let ttl = self.ttl;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut surface = surface.lock();
            for field in fields {
                let _ = surface.clear_invalid(field);
            }
            tracing::debug!("invalid-field markers cleared");
        });

        let mut timers = self.timers.lock();
        timers.retain(|t| !t.is_finished());
        timers.push(timer);
    }

    /// Number of clears still scheduled
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.lock().iter().filter(|t| !t.is_finished()).count()
    }
}

impl Drop for ValidationMarkers {
    fn drop(&mut self) {
        for timer in self.timers.get_mut().drain(..) {
            timer.abort();
        }
    }
}
