//! Playback clock with explicit event listeners.
//!
//! The player does not decode anything; the host feeds it the clip duration
//! once the media is prepared and calls [`Player::tick`] every frame. Widgets
//! that need to react (caption overlay, scrub bar) subscribe through
//! [`Player::on_event`] instead of hooking engine lifecycle callbacks.

/// Notifications emitted by [`Player`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerEvent {
    /// Media is ready; duration is known
    Prepared { duration: f32 },
    /// Per-frame update while playing
    Tick { position: f32, second: u64 },
    /// Position changed by a seek
    Seeked { position: f32 },
    /// Playback reached the end of the clip
    Finished,
}

type Listener = Box<dyn FnMut(&PlayerEvent)>;

/// Playback state for one clip.
pub struct Player {
    duration: Option<f32>,
    position: f32,
    speed: f32,
    playing: bool,
    listeners: Vec<Listener>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            duration: None,
            position: 0.0,
            speed: 1.0,
            playing: false,
            listeners: Vec::new(),
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("duration", &self.duration)
            .field("position", &self.position)
            .field("speed", &self.speed)
            .field("playing", &self.playing)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every subsequent event.
    pub fn on_event(&mut self, listener: impl FnMut(&PlayerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: PlayerEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Media finished loading. Resets position to the start.
    pub fn prepare(&mut self, duration: f32) {
        let duration = duration.max(0.0);
        self.duration = Some(duration);
        self.position = 0.0;
        self.playing = false;
        tracing::debug!(duration, "player prepared");
        self.emit(PlayerEvent::Prepared { duration });
    }

    pub fn is_prepared(&self) -> bool {
        self.duration.is_some()
    }

    /// Start playback. No effect before [`Player::prepare`].
    pub fn play(&mut self) {
        if self.is_prepared() {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// Position in seconds.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Whole playback second used for caption lookup.
    pub fn current_second(&self) -> u64 {
        self.position.max(0.0).floor() as u64
    }

    /// Position as a fraction of the duration (0 when unknown or zero-length).
    pub fn fraction(&self) -> f32 {
        match self.duration {
            Some(d) if d > 0.0 => self.position / d,
            _ => 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the playback rate. Non-positive or non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        } else {
            tracing::warn!(speed, "ignoring invalid playback speed");
        }
    }

    /// Seek to a normalized position; out-of-range values are clamped to the clip.
    pub fn seek_normalized(&mut self, normalized: f32) {
        let Some(duration) = self.duration else {
            return;
        };
        let normalized = if normalized.is_finite() {
            normalized.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.position = normalized * duration;
        self.emit(PlayerEvent::Seeked {
            position: self.position,
        });
    }

    /// Advance the clock by `dt` real seconds scaled by the playback speed.
    pub fn tick(&mut self, dt: f32) {
        let Some(duration) = self.duration else {
            return;
        };
        if !self.playing {
            return;
        }

        self.position = (self.position + dt.max(0.0) * self.speed).min(duration);
        self.emit(PlayerEvent::Tick {
            position: self.position,
            second: self.current_second(),
        });

        if self.position >= duration {
            self.playing = false;
            self.emit(PlayerEvent::Finished);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_player() -> (Player, Rc<RefCell<Vec<PlayerEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut player = Player::new();
        let sink = Rc::clone(&events);
        player.on_event(move |e| sink.borrow_mut().push(*e));
        (player, events)
    }

    #[test]
    fn emits_prepared_then_ticks() {
        let (mut player, events) = recording_player();
        player.prepare(3.0);
        player.play();
        player.tick(1.5);

        assert_eq!(
            *events.borrow(),
            vec![
                PlayerEvent::Prepared { duration: 3.0 },
                PlayerEvent::Tick {
                    position: 1.5,
                    second: 1
                },
            ]
        );
    }

    #[test]
    fn speed_scales_clock() {
        let mut player = Player::new();
        player.prepare(10.0);
        player.set_speed(2.0);
        player.play();
        player.tick(1.0);

        assert_eq!(player.position(), 2.0);
        assert_eq!(player.current_second(), 2);
    }

    #[test]
    fn rejects_invalid_speed() {
        let mut player = Player::new();
        player.set_speed(0.0);
        player.set_speed(f32::NAN);

        assert_eq!(player.speed(), 1.0);
    }

    #[test]
    fn finishes_at_end() {
        let (mut player, events) = recording_player();
        player.prepare(1.0);
        player.play();
        player.tick(5.0);

        assert_eq!(player.position(), 1.0);
        assert!(!player.is_playing());
        assert_eq!(events.borrow().last(), Some(&PlayerEvent::Finished));
    }

    #[test]
    fn seek_clamps_to_clip() {
        let mut player = Player::new();
        player.prepare(8.0);

        player.seek_normalized(1.5);
        assert_eq!(player.position(), 8.0);

        player.seek_normalized(-0.5);
        assert_eq!(player.position(), 0.0);

        player.seek_normalized(0.25);
        assert_eq!(player.position(), 2.0);
        assert_eq!(player.fraction(), 0.25);
    }

    #[test]
    fn ignores_play_and_tick_before_prepare() {
        let (mut player, events) = recording_player();
        player.play();
        player.tick(1.0);
        player.seek_normalized(0.5);

        assert!(!player.is_playing());
        assert!(events.borrow().is_empty());
    }
}
