use serde::{Deserialize, Serialize};

/// Rendering tag carried by an array element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementState {
    #[default]
    Default,
    Checking,
    Checked,
    Found,
    Range,
    Comparing,
    Swapping,
    Sorted,
    Pivot,
}

impl ElementState {
    /// Per-step markers that must not outlive the step that set them
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ElementState::Checking
                | ElementState::Comparing
                | ElementState::Swapping
                | ElementState::Pivot
        )
    }

    /// The state a transient marker resolves to when a run is cut short
    pub fn settled(self) -> Self {
        match self {
            ElementState::Checking => ElementState::Checked,
            s if s.is_transient() => ElementState::Default,
            s => s,
        }
    }
}

/// A single array slot; its index is its identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayElement {
    pub value: i64,
    #[serde(default)]
    pub state: ElementState,
}

impl ArrayElement {
    pub fn new(value: i64) -> Self {
        ArrayElement {
            value,
            state: ElementState::Default,
        }
    }
}

/// Immutable copy of an array run handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySnapshot {
    pub elements: Vec<ArrayElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
}

impl ArraySnapshot {
    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }
}

/// Build fresh elements with every state reset to `Default`
pub fn elements_from(values: &[i64]) -> Vec<ArrayElement> {
    values.iter().copied().map(ArrayElement::new).collect()
}

/// Resolve leftover transient markers in place
pub fn settle_elements(elements: &mut [ArrayElement]) {
    for element in elements.iter_mut() {
        element.state = element.state.settled();
    }
}
