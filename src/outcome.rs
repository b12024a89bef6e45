//! Two-variant success/failure container returned by the upload pipeline.
//!
//! Business rejections travel back to the transport as an `Outcome` value
//! instead of an early `?` return, so the caller always gets a tagged result and
//! decides what to do with each variant.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tagged<T, E> {
    Success(T),
    Failure(E),
}

/// Either a success payload or a failure payload, never both.
///
/// The variant is fixed at construction; the only constructors are
/// [`Outcome::success`] and [`Outcome::failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an Outcome may carry a failure that should be handled"]
pub struct Outcome<T, E>(Tagged<T, E>);

impl<T, E> Outcome<T, E> {
    pub fn success(value: T) -> Self {
        Outcome(Tagged::Success(value))
    }

    pub fn failure(error: E) -> Self {
        Outcome(Tagged::Failure(error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self.0, Tagged::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.0, Tagged::Failure(_))
    }

    pub fn success_ref(&self) -> Option<&T> {
        match &self.0 {
            Tagged::Success(value) => Some(value),
            Tagged::Failure(_) => None,
        }
    }

    pub fn failure_ref(&self) -> Option<&E> {
        match &self.0 {
            Tagged::Success(_) => None,
            Tagged::Failure(error) => Some(error),
        }
    }

    pub fn into_success(self) -> Option<T> {
        self.into_result().ok()
    }

    pub fn into_failure(self) -> Option<E> {
        self.into_result().err()
    }

    /// Convert into a `Result` for exhaustive matching at the call site.
    pub fn into_result(self) -> Result<T, E> {
        match self.0 {
            Tagged::Success(value) => Ok(value),
            Tagged::Failure(error) => Err(error),
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self.0 {
            Tagged::Success(value) => Outcome::success(f(value)),
            Tagged::Failure(error) => Outcome::failure(error),
        }
    }

    pub fn map_failure<G, F>(self, f: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self.0 {
            Tagged::Success(value) => Outcome::success(value),
            Tagged::Failure(error) => Outcome::failure(f(error)),
        }
    }
}

impl<T> Outcome<T, T> {
    /// Return the carried payload regardless of the variant.
    ///
    /// Only available when both sides share a type; check the tag first when
    /// the distinction matters.
    pub fn unwrap_either(self) -> T {
        match self.0 {
            Tagged::Success(value) | Tagged::Failure(value) => value,
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::success(value),
            Err(error) => Outcome::failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}
