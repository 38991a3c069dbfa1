/// Which nodes a traversal reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Visibility {
    /// Only nodes without a tombstone.
    Soft,
    /// Every physical node.
    Hard,
}

impl Visibility {
    pub(crate) fn shows(self, deleted: bool) -> bool {
        match self {
            Self::Soft => !deleted,
            Self::Hard => true,
        }
    }
}

/// What a recursive insert did once it reached the position of the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// The value wasn't in the tree so a new node was linked in.
    Created,
    /// An equal, tombstoned node had its tombstone cleared.
    Revived,
    /// An equal, live node already exists. Nothing changed.
    Present,
}

/// The state of the entry a hard removal unlinked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Removal {
    /// The removed value was visible.
    Live,
    /// The removed value was already soft-deleted.
    Tombstoned,
}

impl Removal {
    pub(crate) fn of(deleted: bool) -> Self {
        if deleted {
            Self::Tombstoned
        } else {
            Self::Live
        }
    }
}
