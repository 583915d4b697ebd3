use crate::model::element::{elements_from, settle_elements};
use crate::model::{ArrayElement, ArraySnapshot, ElementState};

/// The array owned by a sorting or searching run
#[derive(Debug, Clone)]
pub(crate) struct Board {
    elements: Vec<ArrayElement>,
}

impl Board {
    pub(crate) fn new(values: &[i64]) -> Self {
        Board {
            elements: elements_from(values),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn value(&self, index: usize) -> i64 {
        self.elements[index].value
    }

    pub(crate) fn set_value(&mut self, index: usize, value: i64) {
        self.elements[index].value = value;
    }

    pub(crate) fn state(&self, index: usize) -> ElementState {
        self.elements[index].state
    }

    pub(crate) fn mark(&mut self, index: usize, state: ElementState) {
        self.elements[index].state = state;
    }

    pub(crate) fn mark_all(&mut self, state: ElementState) {
        for element in &mut self.elements {
            element.state = state;
        }
    }

    /// Exchange two values; states stay with their slots
    pub(crate) fn swap_values(&mut self, a: usize, b: usize) {
        let tmp = self.elements[a].value;
        self.elements[a].value = self.elements[b].value;
        self.elements[b].value = tmp;
    }

    /// Drop transient markers left by the previous step, except on `keep`
    pub(crate) fn clear_transient(&mut self, keep: &[usize]) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            if element.state.is_transient() && !keep.contains(&i) {
                element.state = ElementState::Default;
            }
        }
    }

    pub(crate) fn settle(&mut self) {
        settle_elements(&mut self.elements);
    }

    pub(crate) fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    pub(crate) fn snapshot(&self, current_index: Option<usize>, target: Option<i64>) -> ArraySnapshot {
        ArraySnapshot {
            elements: self.elements.clone(),
            current_index,
            target,
        }
    }
}
