use std::time::Duration;

use rap_core::describe::{hand_position_phrase, tick_mark_phrase, Narrator};
use rap_core::input::{both_hands_key, key_action_for_key, tick_mark_for_digit};
use rap_core::sound::{ClosenessSound, ToneEvent};
use rap_core::{Case, FeedbackEvent, RapConfig, RatioModel, RatioTerm};

use crate::script::Command;

pub const FRAME_DT: Duration = Duration::from_micros(16_667);

/// One simulated screen: the model plus the sound and narration consumers.
pub struct Session {
    pub model: RatioModel,
    sound: ClosenessSound,
    narrator: Narrator,
    events: Vec<FeedbackEvent>,
    tones: Vec<ToneEvent>,
    pub tones_played: usize,
}

impl Session {
    pub fn new(config: RapConfig) -> anyhow::Result<Self> {
        let mut model = RatioModel::new(config)?;
        model.state_mut().on_locked_changed(|locked| {
            log::info!("[ui] lock icon {}", if *locked { "closed" } else { "open" });
        });
        let mut sound = ClosenessSound::default();
        sound.update(&model.reading());
        Ok(Self {
            model,
            sound,
            narrator: Narrator::default(),
            events: Vec::new(),
            tones: Vec::new(),
            tones_played: 0,
        })
    }

    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::Drag(term, value) => {
                self.sound.set_interacting(true);
                self.model.set_term_value(*term, *value, &mut self.events);
            }
            Command::Press { term, key, shift } => match key_action_for_key(key) {
                Some(action) => {
                    self.sound.set_interacting(true);
                    self.model
                        .keyboard_action(*term, action, *shift, &mut self.events);
                }
                None => log::warn!("[keys] {} does not move a hand", key),
            },
            Command::Key { key, shift } => {
                if let Some(index) = tick_mark_for_digit(key) {
                    self.model.jump_to_tick_mark(index, &mut self.events);
                } else if let Some((term, action)) = both_hands_key(key) {
                    self.sound.set_interacting(true);
                    self.model
                        .keyboard_action(term, action, *shift, &mut self.events);
                } else {
                    log::warn!("[keys] {} is not bound", key);
                }
            }
            Command::Blur(term) => {
                self.model.interaction_ended(*term);
                self.sound.set_interacting(false);
            }
            Command::Lock(locked) => self.model.set_locked(*locked, &mut self.events),
            Command::Target(ratio) => {
                let applied = self.model.set_target_ratio(*ratio, &mut self.events);
                log::info!("[ui] target ratio {:.4}", applied);
            }
            Command::Snap => {
                self.model.set_ratio_to_target(&mut self.events);
            }
            Command::Tick(frames) => {
                for _ in 0..*frames {
                    self.model.step(FRAME_DT, &mut self.events);
                    self.sound.update(&self.model.reading());
                    self.sound.tick(FRAME_DT, &mut self.tones);
                }
            }
            Command::Describe => self.describe(),
            Command::Reset => {
                self.model.reset();
                self.narrator.reset();
                self.sound.reset();
                self.events.clear();
            }
        }
        self.flush();
    }

    fn describe(&mut self) {
        let snapshot = self.model.snapshot();
        let range = self.model.config().term_range;
        let count = self.model.config().tick_mark_count;
        for term in RatioTerm::ALL {
            let value = snapshot.tuple.get_for_term(term);
            let ticks = self.model.describe_tick_marks(term, false);
            log::info!(
                "[describe] {}, {}",
                hand_position_phrase(term, value, range, Case::Capitalized),
                tick_mark_phrase(&ticks, count)
            );
        }
        log::info!(
            "[describe] Hands are {}.",
            self.narrator
                .distance
                .describe(snapshot.tuple, range, Case::Lower)
        );
        log::info!(
            "[describe] {}.",
            self.narrator.ratio.describe(&snapshot.reading, Case::Capitalized)
        );
    }

    fn flush(&mut self) {
        self.sound.update(&self.model.reading());
        for event in self.events.drain(..) {
            log::info!("[feedback] {:?}", event);
            self.tones.extend(self.sound.on_feedback(&event));
        }
        for tone in self.tones.drain(..) {
            log::debug!(
                "[sound] {:?} {:.1} Hz vel={:.2} dur={:.2}s",
                tone.voice,
                tone.frequency_hz,
                tone.velocity,
                tone.duration_sec
            );
            self.tones_played += 1;
        }
        let snapshot = self.model.snapshot();
        log::debug!(
            "[ratio] ({:.4}, {:.4}) fitness={:.3} in_proportion={} moving_together={}",
            snapshot.tuple.antecedent(),
            snapshot.tuple.consequent(),
            snapshot.reading.fitness,
            snapshot.reading.in_proportion,
            snapshot.moving_together
        );
    }
}
