//! Control flow signal returned by visitors while walking an entity tree

/// What a visitor wants to happen next.
///
/// Variants are declared from least to most terminal so that the derived
/// ordering is the priority used by [`VisitControl::combine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VisitControl {
    /// Visit the children of the current entity before its next sibling
    #[default]
    Recurse,

    /// Skip the children of the current entity
    Continue,

    /// Skip the remaining siblings of the current entity
    Break,

    /// Stop the whole walk, reporting success
    AbortWithSuccess,

    /// Stop the whole walk, reporting failure
    AbortWithFailure,
}

impl VisitControl {
    /// The more terminal of two results
    pub fn combine(self, other: VisitControl) -> VisitControl {
        self.max(other)
    }

    pub fn is_abort(self) -> bool {
        matches!(self, VisitControl::AbortWithSuccess | VisitControl::AbortWithFailure)
    }
}
