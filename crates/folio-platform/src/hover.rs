//! Hovered-chain tracking with mouseenter/mouseleave semantics.

use crate::document::ElementId;

/// The chain of elements currently under the pointer, innermost first.
#[derive(Debug, Default)]
pub struct HoverTracker {
    chain: Vec<ElementId>,
}

/// Elements that stopped and started being hovered.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HoverChange {
    /// Innermost first.
    pub left: Vec<ElementId>,
    /// Outermost first.
    pub entered: Vec<ElementId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(&self) -> &[ElementId] {
        &self.chain
    }

    pub fn is_hovered(&self, id: ElementId) -> bool {
        self.chain.contains(&id)
    }

    /// Replace the hovered chain (innermost first) and report the difference.
    pub fn update(&mut self, chain: Vec<ElementId>) -> HoverChange {
        let left = self
            .chain
            .iter()
            .filter(|id| !chain.contains(id))
            .copied()
            .collect();
        let entered = chain
            .iter()
            .rev()
            .filter(|id| !self.chain.contains(id))
            .copied()
            .collect();
        self.chain = chain;
        HoverChange { left, entered }
    }

    /// Pointer left the viewport: everything is left.
    pub fn clear(&mut self) -> HoverChange {
        self.update(Vec::new())
    }

    /// Drop removed elements without reporting a leave.
    pub fn forget(&mut self, removed: &[ElementId]) {
        self.chain.retain(|id| !removed.contains(id));
    }
}
