/// Errors returned by [`Tree`][crate::Tree] lookups and removals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The tree has no live values to answer a min/max query with.
    #[error("the tree holds no live values")]
    EmptyCollection,
    /// No live value in the tree is equal to the requested one.
    #[error("no live value matches the requested one")]
    NotFound,
}
