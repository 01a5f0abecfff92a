//! Opaque action entries bound to a list row by the host.

/// An entry of the declarative action list. The row only reads its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    label: String,
}

impl Action {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<&str> for Action {
    fn from(label: &str) -> Self {
        Action::new(label)
    }
}

/// Ordered action storage supporting the list-binding operations the host
/// drives: append, count, at, clear.
#[derive(Debug, Clone, Default)]
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    /// Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_actions = !self.actions.is_empty();
        self.actions.clear();
        had_actions
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(Action::label)
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}
