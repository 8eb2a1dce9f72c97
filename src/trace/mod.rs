//! Construction traces
//!
//! A [`Trace`] is the ordered list of [`ConstructionStep`]s that simulate the
//! construction of one object. Phases always appear in this order:
//!
//! ```text
//! CallSite < EnterConstructor < ArgumentBinding? < MemberInit* < Complete < PostCallMethod?
//! ```
//!
//! Traces are produced by [`builder::TraceBuilder`] and consumed by the
//! playback session.

pub mod builder;

pub use builder::TraceBuilder;

/// Shown when a member's value cannot be determined
pub const UNRESOLVED: &str = "?";

/// Stage of a simulated construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPhase {
    CallSite,
    EnterConstructor,
    ArgumentBinding,
    MemberInit(String),
    Complete,
    PostCallMethod,
}

impl StepPhase {
    /// Position in the fixed phase order; member inits share one rank
    pub fn rank(&self) -> u8 {
        match self {
            StepPhase::CallSite => 0,
            StepPhase::EnterConstructor => 1,
            StepPhase::ArgumentBinding => 2,
            StepPhase::MemberInit(_) => 3,
            StepPhase::Complete => 4,
            StepPhase::PostCallMethod => 5,
        }
    }
}

/// Where control is while a step runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepScope {
    /// Inside `main`
    EntryPoint,
    /// At file scope (no `main` in the snippet)
    Global,
    Constructor,
}

/// Runtime side effect fired when a step is far enough along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEffect<'a> {
    InitializeMember(&'a str),
    MarkCreated,
}

/// One stage of a simulated construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionStep {
    /// 1-based position in the trace
    pub ordinal: usize,
    pub phase: StepPhase,
    pub label: String,
    pub scope: StepScope,
    /// 0-based source line to highlight
    pub highlight_line: Option<usize>,
    pub console_message: Option<String>,
    /// Confirmation logged once the step has fully played; only set for
    /// steps with an effect
    pub effect_message: Option<String>,
    /// Value a member receives; only set for member inits
    pub resolved_value: Option<String>,
}

impl ConstructionStep {
    pub fn effect(&self) -> Option<StepEffect<'_>> {
        match &self.phase {
            StepPhase::MemberInit(member) => Some(StepEffect::InitializeMember(member)),
            StepPhase::Complete => Some(StepEffect::MarkCreated),
            _ => None,
        }
    }

    pub fn is_in_constructor(&self) -> bool {
        self.scope == StepScope::Constructor
    }
}

/// The full step sequence for one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub object_name: String,
    pub steps: Vec<ConstructionStep>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ConstructionStep> {
        self.steps.get(index)
    }

    pub fn phases(&self) -> impl Iterator<Item = &StepPhase> {
        self.steps.iter().map(|s| &s.phase)
    }
}
