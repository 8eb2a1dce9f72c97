//! Playback session
//!
//! A [`Session`] owns everything produced from one loaded source: the model,
//! one [`Trace`] per object, one [`RuntimeState`] per object and the console.
//! The host drives it with [`Session::tick`] and the control methods; nothing
//! here reads a clock.
//!
//! # States
//!
//! ```text
//! Idle → Ready → Stepping(0) → … → Stepping(last) → ObjectComplete
//!          ↑                                              │
//!          └──────────── next object ─────────────────────┤
//!                                                         ↓
//!                                                    AllComplete
//! ```

use super::config::PlaybackConfig;
use super::console::ConsoleLog;
use super::errors::PlaybackError;
use super::runtime::RuntimeState;
use crate::parser::errors::ExtractError;
use crate::parser::model::{ObjectSite, SourceModel, TypedName};
use crate::parser::parse::{parse_source, ParseOptions};
use crate::trace::{ConstructionStep, StepEffect, StepPhase, Trace, TraceBuilder};
use std::time::Duration;
use tracing::{debug, trace};

/// Appended once when the last object finishes
pub const ALL_COMPLETE_NOTICE: &str = "✓ All objects constructed";

/// Position within the loaded traces
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_object_index: usize,
    /// `None` until the first step of the current object starts; equal to
    /// the trace length once the object is complete
    pub current_step_index: Option<usize>,
    /// Progress through the current step, in `0.0..=1.0`
    pub step_progress: f64,
    pub auto_play: bool,
    pub paused: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_object_index: 0,
            current_step_index: None,
            step_progress: 0.0,
            auto_play: false,
            paused: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Ready,
    Stepping(usize),
    ObjectComplete,
    AllComplete,
}

/// A member of one object as currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberValue<'a> {
    pub member: &'a TypedName,
    pub initialized: bool,
    /// Value assigned by the trace; `None` when unresolved
    pub value: Option<&'a str>,
}

#[derive(Debug)]
struct Loaded {
    source: String,
    model: SourceModel,
    traces: Vec<Trace>,
    runtime: Vec<RuntimeState>,
}

#[derive(Debug)]
pub struct Session {
    config: PlaybackConfig,
    parse_options: ParseOptions,
    loaded: Option<Loaded>,
    state: PlaybackState,
    console: ConsoleLog,
    effect_fired: bool,
    message_fired: bool,
    confirm_fired: bool,
    object_complete: bool,
    all_complete: bool,
}

impl Session {
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_parse_options(config, ParseOptions::default())
    }

    pub fn with_parse_options(config: PlaybackConfig, parse_options: ParseOptions) -> Self {
        let console = ConsoleLog::new(config.console_capacity);
        Session {
            config,
            parse_options,
            loaded: None,
            state: PlaybackState::default(),
            console,
            effect_fired: false,
            message_fired: false,
            confirm_fired: false,
            object_complete: false,
            all_complete: false,
        }
    }

    /// Parse `source` and replace the session contents.
    ///
    /// On error the previous contents and playback position are untouched.
    pub fn load_source(&mut self, source: &str) -> Result<(), ExtractError> {
        let model = parse_source(source, &self.parse_options)?;

        let builder = TraceBuilder::new(&model.class).with_entry_point(model.entry_point.is_some());
        let traces: Vec<Trace> = model.objects.iter().map(|site| builder.build(site)).collect();
        let runtime = model
            .objects
            .iter()
            .map(|_| RuntimeState::new(model.class.member_names()))
            .collect();

        debug!(
            class = %model.class.name,
            objects = traces.len(),
            steps = traces.iter().map(Trace::len).sum::<usize>(),
            "loaded source"
        );

        self.loaded = Some(Loaded {
            source: source.to_string(),
            model,
            traces,
            runtime,
        });
        self.restart();
        Ok(())
    }

    // ---- control ----

    /// Move to the next step, object or terminal state
    pub fn advance(&mut self) -> PlaybackStatus {
        let status = self.status();
        match status {
            PlaybackStatus::Idle | PlaybackStatus::AllComplete => {}
            PlaybackStatus::Ready => self.enter_step(0),
            PlaybackStatus::Stepping(i) => {
                let len = self.active_trace().map_or(0, Trace::len);
                if i + 1 < len {
                    self.enter_step(i + 1);
                } else {
                    // one past the last step
                    self.state.current_step_index = Some(len);
                    self.object_complete = true;
                    self.state.step_progress = 0.0;
                }
            }
            PlaybackStatus::ObjectComplete => {
                let next = self.state.current_object_index + 1;
                if next < self.sites().len() {
                    self.state.current_object_index = next;
                    self.state.current_step_index = None;
                    self.state.step_progress = 0.0;
                    self.object_complete = false;
                    self.console.clear();
                } else {
                    self.all_complete = true;
                    self.console.push(ALL_COMPLETE_NOTICE);
                }
            }
        }

        let new_status = self.status();
        if new_status != status {
            debug!(
                from = ?status,
                to = ?new_status,
                object = self.state.current_object_index,
                "advance"
            );
        }
        new_status
    }

    /// Back to the first object with every runtime state cleared
    pub fn restart(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        for state in &mut loaded.runtime {
            state.reset();
        }

        self.state = PlaybackState::default();
        self.console.clear();
        self.effect_fired = false;
        self.message_fired = false;
        self.confirm_fired = false;
        self.object_complete = false;
        self.all_complete = false;
        debug!("restart");
    }

    pub fn set_auto_play(&mut self, on: bool) {
        self.state.auto_play = on;
    }

    pub fn set_paused(&mut self, on: bool) {
        self.state.paused = on;
    }

    /// Advance time by `dt`
    pub fn tick(&mut self, dt: Duration) {
        if self.state.paused {
            return;
        }

        match self.status() {
            PlaybackStatus::Stepping(_) => {
                let delta = if self.config.step_duration.is_zero() {
                    1.0
                } else {
                    dt.as_secs_f64() / self.config.step_duration.as_secs_f64()
                };
                self.state.step_progress = (self.state.step_progress + delta).min(1.0);
                self.fire_pending();

                if self.state.auto_play && self.state.step_progress >= 1.0 {
                    self.advance();
                }
            }
            PlaybackStatus::Ready | PlaybackStatus::ObjectComplete if self.state.auto_play => {
                self.advance();
            }
            _ => {}
        }
    }

    /// Jump to step `index` of the current object.
    ///
    /// Effects, messages and confirmations of earlier steps are applied;
    /// later ones are cleared.
    pub fn jump_to_step(&mut self, index: usize) -> Result<(), PlaybackError> {
        let object = self.state.current_object_index;
        let loaded = self.loaded.as_mut().ok_or(PlaybackError::NothingLoaded)?;
        let trace = &loaded.traces[object];
        if index >= trace.len() {
            return Err(PlaybackError::StepOutOfRange {
                index,
                len: trace.len(),
            });
        }

        let runtime = &mut loaded.runtime[object];
        runtime.reset();
        self.console.clear();
        for step in &trace.steps[..index] {
            apply_effect(runtime, step);
            for message in step.console_message.iter().chain(&step.effect_message) {
                self.console.push(message.clone());
            }
        }

        self.object_complete = false;
        self.all_complete = false;
        self.enter_step(index);
        debug!(object, step = index, "jump");
        Ok(())
    }

    fn enter_step(&mut self, index: usize) {
        self.state.current_step_index = Some(index);
        self.state.step_progress = 0.0;
        self.effect_fired = false;
        self.message_fired = false;
        self.confirm_fired = false;
        trace!(step = index, "enter step");
    }

    /// Fire the current step's effect and message once their thresholds pass.
    ///
    /// The effect's confirmation is logged when the step finishes.
    fn fire_pending(&mut self) {
        let progress = self.state.step_progress;
        let object = self.state.current_object_index;
        let (Some(loaded), Some(step_index)) =
            (self.loaded.as_mut(), self.state.current_step_index)
        else {
            return;
        };
        let Some(step) = loaded.traces[object].get(step_index) else {
            return;
        };

        if !self.effect_fired && progress >= self.config.effect_threshold {
            self.effect_fired = true;
            apply_effect(&mut loaded.runtime[object], step);
        }
        if !self.message_fired && progress >= self.config.message_threshold {
            self.message_fired = true;
            if let Some(message) = &step.console_message {
                self.console.push(message.clone());
            }
        }
        if !self.confirm_fired && progress >= 1.0 {
            self.confirm_fired = true;
            if let Some(message) = &step.effect_message {
                self.console.push(message.clone());
            }
        }
    }

    // ---- views ----

    pub fn status(&self) -> PlaybackStatus {
        if self.loaded.is_none() {
            PlaybackStatus::Idle
        } else if self.all_complete {
            PlaybackStatus::AllComplete
        } else if self.object_complete {
            PlaybackStatus::ObjectComplete
        } else {
            match self.state.current_step_index {
                None => PlaybackStatus::Ready,
                Some(i) => PlaybackStatus::Stepping(i),
            }
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    pub fn source(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.source.as_str())
    }

    pub fn model(&self) -> Option<&SourceModel> {
        self.loaded.as_ref().map(|l| &l.model)
    }

    pub fn sites(&self) -> &[ObjectSite] {
        self.loaded.as_ref().map_or(&[], |l| l.model.objects.as_slice())
    }

    pub fn traces(&self) -> &[Trace] {
        self.loaded.as_ref().map_or(&[], |l| l.traces.as_slice())
    }

    pub fn active_trace(&self) -> Option<&Trace> {
        self.traces().get(self.state.current_object_index)
    }

    pub fn current_step(&self) -> Option<&ConstructionStep> {
        let index = self.state.current_step_index?;
        self.active_trace()?.get(index)
    }

    pub fn runtime_states(&self) -> &[RuntimeState] {
        self.loaded.as_ref().map_or(&[], |l| l.runtime.as_slice())
    }

    /// Members of object `object_index` with the values playback has set so far
    pub fn member_values(&self, object_index: usize) -> Vec<MemberValue<'_>> {
        let Some(loaded) = self.loaded.as_ref() else {
            return Vec::new();
        };
        let (Some(trace), Some(runtime)) = (
            loaded.traces.get(object_index),
            loaded.runtime.get(object_index),
        ) else {
            return Vec::new();
        };

        loaded
            .model
            .class
            .members
            .iter()
            .map(|member| {
                let value = trace
                    .steps
                    .iter()
                    .find(|s| matches!(s.phase, StepPhase::MemberInit(ref m) if *m == member.name))
                    .and_then(|s| s.resolved_value.as_deref());
                MemberValue {
                    member,
                    initialized: runtime.is_initialized(&member.name),
                    value,
                }
            })
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

fn apply_effect(runtime: &mut RuntimeState, step: &ConstructionStep) {
    match step.effect() {
        Some(StepEffect::InitializeMember(member)) => runtime.initialize(member),
        Some(StepEffect::MarkCreated) => runtime.created = true,
        None => {}
    }
}
