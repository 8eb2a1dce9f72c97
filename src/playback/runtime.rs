use rustc_hash::FxHashMap;

/// Simulated lifecycle of one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeState {
    pub created: bool,
    /// Member name → initialized
    pub initialized: FxHashMap<String, bool>,
}

impl RuntimeState {
    pub fn new<'a>(members: impl IntoIterator<Item = &'a str>) -> Self {
        RuntimeState {
            created: false,
            initialized: members.into_iter().map(|m| (m.to_string(), false)).collect(),
        }
    }

    pub fn reset(&mut self) {
        self.created = false;
        for flag in self.initialized.values_mut() {
            *flag = false;
        }
    }

    pub fn initialize(&mut self, member: &str) {
        if let Some(flag) = self.initialized.get_mut(member) {
            *flag = true;
        }
    }

    pub fn is_initialized(&self, member: &str) -> bool {
        self.initialized.get(member).copied().unwrap_or(false)
    }

    pub fn initialized_count(&self) -> usize {
        self.initialized.values().filter(|&&v| v).count()
    }
}
