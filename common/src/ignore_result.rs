// suppresses rustc's 'unused result which must be used' when a Result is known
// to be Ok and its value is not needed, e.g. write!() into an IndentPrinter
pub trait IgnoreResult: Sized {
  fn ignore(self) {}
}

impl<V, E> IgnoreResult for Result<V, E> {}

impl<T> IgnoreResult for Option<T> {}
