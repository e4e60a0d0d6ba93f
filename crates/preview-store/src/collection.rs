//! Logical collections and their slot keys

use std::fmt;

/// Prefix shared by every slot key
pub const SLOT_PREFIX: &str = "preview_";

/// One of the six persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// List of projects
    Projects,
    /// Vision per project id
    Visions,
    /// Use case list per project id
    UseCases,
    /// RACI entry list per project id
    Raci,
    /// Value record list per project id
    Values,
    /// 90-day plan per use case id
    Plans,
}

impl Collection {
    /// Every collection, in seeding order
    pub const ALL: [Collection; 6] = [
        Collection::Projects,
        Collection::Visions,
        Collection::UseCases,
        Collection::Raci,
        Collection::Values,
        Collection::Plans,
    ];

    /// Short name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Visions => "visions",
            Collection::UseCases => "usecases",
            Collection::Raci => "raci",
            Collection::Values => "values",
            Collection::Plans => "plans",
        }
    }

    /// Backend key
    #[inline]
    #[must_use]
    pub fn slot(&self) -> String {
        format!("{SLOT_PREFIX}{}", self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slots_are_distinct_and_prefixed() {
        let slots: HashSet<_> = Collection::ALL.iter().map(Collection::slot).collect();
        assert_eq!(slots.len(), 6);
        assert!(slots.iter().all(|s| s.starts_with(SLOT_PREFIX)));
        assert_eq!(Collection::UseCases.slot(), "preview_usecases");
    }
}
