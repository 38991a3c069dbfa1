use quickcheck::{Arbitrary, Gen};

mod lazy;

/// An enum for the various kinds of "things" to do to
/// the tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<E> {
    /// Insert the E into the tree
    Insert(E),
    /// Soft-delete the E
    Remove(E),
    /// Physically remove the E
    RemoveHard(E),
}

impl<E> Arbitrary for Op<E>
where
    E: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(E::arbitrary(g)),
            1 => Op::Remove(E::arbitrary(g)),
            2 => Op::RemoveHard(E::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
