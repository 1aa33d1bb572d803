//! Sound effect collaborator.
//!
//! The canvas only ever fires effects and forgets them; a failing backend is
//! logged by the caller and never changes canvas state.

use anyhow::bail;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Volume used for short interface effects.
pub const EFFECT_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// A pathway was created.
    Connect,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Connect => "connect",
        }
    }
}

impl fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait SoundEffects {
    fn play(&self, effect: SoundEffect) -> anyhow::Result<()>;
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl SoundEffects for NullAudio {
    fn play(&self, _effect: SoundEffect) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Honours a shared mute flag and plays only effects it has registered.
///
/// There is no output device here: a played effect is logged with its volume,
/// which is what hosts without an audio backend need.
#[derive(Debug, Clone)]
pub struct MutedAwareAudio {
    muted: Arc<AtomicBool>,
    volume: f32,
    registry: HashSet<SoundEffect>,
}

impl Default for MutedAwareAudio {
    fn default() -> Self {
        Self::new(false, EFFECT_VOLUME)
    }
}

impl MutedAwareAudio {
    pub fn new(muted: bool, volume: f32) -> Self {
        Self {
            muted: Arc::new(AtomicBool::new(muted)),
            volume: volume.clamp(0.0, 1.0),
            registry: HashSet::from([SoundEffect::Connect]),
        }
    }

    /// Handle for toggling mute from elsewhere (a settings panel).
    pub fn mute_handle(&self) -> Arc<AtomicBool> {
        self.muted.clone()
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn unregister(&mut self, effect: SoundEffect) {
        self.registry.remove(&effect);
    }
}

impl SoundEffects for MutedAwareAudio {
    fn play(&self, effect: SoundEffect) -> anyhow::Result<()> {
        if self.is_muted() {
            return Ok(());
        }
        if !self.registry.contains(&effect) {
            bail!("Sound effect not registered: {effect}");
        }
        tracing::debug!(effect = %effect, volume = self.volume, "Playing sound effect");
        Ok(())
    }
}

/// Records every effect played. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    played: Arc<Mutex<Vec<SoundEffect>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundEffect> {
        self.played.lock().clone()
    }
}

impl SoundEffects for RecordingAudio {
    fn play(&self, effect: SoundEffect) -> anyhow::Result<()> {
        self.played.lock().push(effect);
        Ok(())
    }
}

/// Fails every call, for exercising error paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingAudio;

impl SoundEffects for FailingAudio {
    fn play(&self, effect: SoundEffect) -> anyhow::Result<()> {
        bail!("Audio device unavailable for {effect}")
    }
}
