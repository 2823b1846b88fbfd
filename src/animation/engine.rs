//! Playback clock over a loaded [`ChemxDocument`].
//!
//! The host drives the engine from its per-frame hook by calling
//! [`AnimationEngine::tick`]. While running, each tick advances playback
//! time by the wall-clock delta since the previous tick, wraps at the
//! document duration, and hands the interpolated frame to the callback.
//! While paused, ticks do nothing, so no callback fires between
//! [`pause`](AnimationEngine::pause) and the next
//! [`play`](AnimationEngine::play).

use web_time::{Duration, Instant};

use super::interpolation::{
    interpolate_keyframes, FrameState, InterpolationContext,
};
use crate::model::ChemxDocument;
use crate::options::AnimationOptions;

/// Receives every frame the engine emits.
pub type FrameCallback = Box<dyn FnMut(&FrameState)>;

/// Where a playback time falls relative to the keyframes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bracket {
    /// No keyframes at all.
    Empty,
    /// Emit this keyframe unchanged.
    Verbatim(usize),
    /// Blend keyframe `index` toward `index + 1` by `frac`.
    Between { index: usize, frac: f32 },
}

/// Drives playback of one document.
///
/// The document is owned by the engine; later edits to the keyframe store
/// are not observed. Construct only from documents that passed
/// [`ChemxDocument::ensure_playable`]; an empty document plays as nothing.
pub struct AnimationEngine {
    document: ChemxDocument,
    options: AnimationOptions,
    /// Playback position in milliseconds.
    time_ms: f64,
    running: bool,
    /// Wall-clock instant of the previous tick while running.
    last_tick: Option<Instant>,
    on_frame: FrameCallback,
}

impl AnimationEngine {
    /// Engine positioned at t = 0, paused.
    pub fn new(
        document: ChemxDocument,
        options: AnimationOptions,
        on_frame: FrameCallback,
    ) -> Self {
        Self {
            document,
            options,
            time_ms: 0.0,
            running: false,
            last_tick: None,
            on_frame,
        }
    }

    /// Start playback from the current time. Idempotent while running.
    pub fn play(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_tick = Some(now);
        log::debug!("playback started at t={:.0} ms", self.time_ms);
    }

    /// Stop playback. Idempotent while paused.
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_tick = None;
        log::debug!("playback paused at t={:.0} ms", self.time_ms);
    }

    /// Rewind to t = 0 and emit the first keyframe verbatim.
    ///
    /// The running flag is left as it was.
    pub fn reset(&mut self) {
        self.time_ms = 0.0;
        if let Some(first) = self.document.keyframes.first() {
            let frame = FrameState::from_keyframe(first);
            (self.on_frame)(&frame);
        }
    }

    /// Per-frame update. Does nothing unless running.
    pub fn tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        let delta = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.step(delta);
    }

    /// Per-frame update with an explicit delta, for hosts that keep their
    /// own clock. Does nothing unless running.
    pub fn advance(&mut self, delta: Duration) {
        if self.running {
            self.step(delta);
        }
    }

    /// Jump to `time_ms` (clamped into the playable range) and emit.
    pub fn seek(&mut self, time_ms: f64) {
        self.time_ms = self.wrap(time_ms.max(0.0));
        self.emit();
    }

    fn step(&mut self, delta: Duration) {
        let speed = f64::from(self.options.playback_speed.max(0.0));
        let elapsed_ms = delta.as_secs_f64() * 1000.0 * speed;
        self.time_ms = self.wrap(self.time_ms + elapsed_ms);
        self.emit();
    }

    /// Loop back to 0 once the duration is reached.
    fn wrap(&self, time_ms: f64) -> f64 {
        if time_ms >= self.document.duration as f64 {
            0.0
        } else {
            time_ms
        }
    }

    fn emit(&mut self) {
        let frame = self.frame_at(self.time_ms);
        (self.on_frame)(&frame);
    }

    /// Interpolated state at `time_ms`, without touching playback state.
    #[must_use]
    pub fn frame_at(&self, time_ms: f64) -> FrameState {
        let keyframes = &self.document.keyframes;
        match self.bracket(time_ms) {
            Bracket::Empty => FrameState::default(),
            Bracket::Verbatim(i) => FrameState::from_keyframe(&keyframes[i]),
            Bracket::Between { index, frac } => {
                let ctx = InterpolationContext::simple(
                    frac,
                    self.options.easing.evaluate(frac),
                );
                interpolate_keyframes(
                    &keyframes[index],
                    &keyframes[index + 1],
                    &ctx,
                    self.options.bond_fade,
                )
            }
        }
    }

    /// Linear scan for `k_i.timestamp <= t < k_{i+1}.timestamp`.
    fn bracket(&self, time_ms: f64) -> Bracket {
        let keyframes = &self.document.keyframes;
        let Some(first) = keyframes.first() else {
            return Bracket::Empty;
        };
        if time_ms < first.timestamp as f64 {
            return Bracket::Verbatim(0);
        }
        for (index, pair) in keyframes.windows(2).enumerate() {
            let start = pair[0].timestamp as f64;
            let end = pair[1].timestamp as f64;
            if start <= time_ms && time_ms < end {
                let frac = ((time_ms - start) / (end - start)) as f32;
                return Bracket::Between { index, frac };
            }
        }
        Bracket::Verbatim(keyframes.len() - 1)
    }

    /// Current playback time in milliseconds.
    pub fn current_time(&self) -> f64 {
        self.time_ms
    }

    /// Whether ticks currently advance playback.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The document being played.
    pub fn document(&self) -> &ChemxDocument {
        &self.document
    }

    /// Replace playback options (easing, fade, speed) without rewinding.
    pub fn set_options(&mut self, options: AnimationOptions) {
        self.options = options;
    }
}
