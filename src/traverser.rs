//! Visitors used by [`Tree::traverse_soft`][crate::Tree::traverse_soft] and
//! [`Tree::traverse_hard`][crate::Tree::traverse_hard].
//!
//! Any `FnMut(&E)` closure is a [`Traverser`], so most callers never name the
//! trait:
//!
//! ```
//! use lazy_bst::Tree;
//!
//! let tree: Tree<_> = [2, 1, 3].into_iter().collect();
//!
//! let mut sum = 0;
//! tree.traverse_soft(&mut |x: &i32| sum += x);
//! assert_eq!(sum, 6);
//! ```

use std::fmt;
use std::io;

/// Receives each value of a traversal, in ascending order.
pub trait Traverser<E: ?Sized> {
    /// Called once per visited value.
    fn visit(&mut self, x: &E);
}

impl<E, F> Traverser<E> for F
where
    E: ?Sized,
    F: FnMut(&E),
{
    fn visit(&mut self, x: &E) {
        self(x)
    }
}

/// A [`Traverser`] that writes every visited value on its own line.
///
/// Writing stops at the first I/O error, which is handed back by
/// [`finish`][Printer::finish].
///
/// # Examples
///
/// ```
/// use lazy_bst::{Printer, Tree};
///
/// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
///
/// let mut printer = Printer::new(Vec::new());
/// tree.traverse_soft(&mut printer);
///
/// assert_eq!(printer.finish().unwrap(), b"1\n2\n3\n");
/// ```
pub struct Printer<W> {
    out: W,
    result: io::Result<()>,
}

impl Printer<io::Stdout> {
    /// A printer writing to standard output.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::{Printer, Tree};
    ///
    /// let tree: Tree<_> = ["b", "a", "c"].into_iter().collect();
    ///
    /// let mut printer = Printer::stdout();
    /// tree.traverse_soft(&mut printer);
    /// printer.finish().unwrap();
    /// ```
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> Printer<W>
where
    W: io::Write,
{
    /// Wraps the given writer.
    pub fn new(out: W) -> Self {
        Self { out, result: Ok(()) }
    }

    /// Flushes the writer and returns it, or the first error hit while printing.
    pub fn finish(mut self) -> io::Result<W> {
        self.result?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<E, W> Traverser<E> for Printer<W>
where
    E: fmt::Display + ?Sized,
    W: io::Write,
{
    fn visit(&mut self, x: &E) {
        if self.result.is_ok() {
            self.result = writeln!(self.out, "{}", x);
        }
    }
}

impl<W> fmt::Debug for Printer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("failed", &self.result.is_err())
            .finish()
    }
}
