//! Audio preferences and the spread sound cue.
//!
//! The engine never produces sound itself; it exposes a seam. A host that
//! wants a bell on every click-spread installs a [`Chime`] and shares an
//! [`AudioSettings`] handle it can mute from its own controls. The particle
//! physics never reads either; only the cue path does.
//!
//! ```ignore
//! let audio = AudioSettings::new();
//! let for_host = audio.clone(); // same underlying flag
//!
//! Simulation::new()
//!     .with_audio(audio)
//!     .with_chime(Box::new(MyBell::load()?))
//!     .run()?;
//!
//! for_host.set_muted(true); // silences future spreads
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, read-mostly audio preferences.
///
/// Cloning is cheap and every clone observes the same flag, so a host can
/// keep one handle and hand another to the simulation.
#[derive(Debug, Clone, Default)]
pub struct AudioSettings {
    muted: Arc<AtomicBool>,
}

impl AudioSettings {
    /// Create unmuted settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create settings that start muted.
    pub fn muted() -> Self {
        Self {
            muted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether cues are currently muted.
    #[inline]
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Mute or unmute cues.
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    /// Flip the mute flag; returns the new state.
    pub fn toggle(&self) -> bool {
        !self.muted.fetch_xor(true, Ordering::Relaxed)
    }
}

/// A short sound cue played on user-triggered spreads.
///
/// Implementations own whatever audio backend they like; the engine only
/// calls [`ring`](Chime::ring), and only when the shared settings are not
/// muted.
pub trait Chime: Send {
    /// Play the cue once. Overlapping rings are the implementation's
    /// business; rapid clicking should be able to overlap rings.
    fn ring(&mut self);
}

/// The default chime: silence.
#[derive(Debug, Default)]
pub struct NullChime;

impl Chime for NullChime {
    fn ring(&mut self) {}
}
