/// Scope function for chaining on arbitrary values.
pub trait LetAlso: Sized {
    /// Passes the value into `f` and returns the result.
    fn let_owned<R, F>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> LetAlso for T {}
