//! The assertion matcher contract and its combinators.

use super::message::format_message;
use crate::convert::{Error, Input};
use std::fmt;
use std::marker::PhantomData;

/// Matcher evaluates an actual value and describes why it did or did not match.
pub trait Matcher {
    /// Returns whether `actual` matches. Errors are hard failures, distinct
    /// from a `false` outcome, and are not inverted by [`not`].
    fn matches(&self, actual: &dyn Input) -> Result<bool, Error>;

    /// Describes a failed positive assertion.
    fn failure_message(&self, actual: &dyn Input) -> String;

    /// Describes a failed negated assertion.
    fn negated_failure_message(&self, actual: &dyn Input) -> String;
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn matches(&self, actual: &dyn Input) -> Result<bool, Error> {
        (**self).matches(actual)
    }

    fn failure_message(&self, actual: &dyn Input) -> String {
        (**self).failure_message(actual)
    }

    fn negated_failure_message(&self, actual: &dyn Input) -> String {
        (**self).negated_failure_message(actual)
    }
}

/// Not inverts the outcome of a matcher.
#[derive(Debug, Clone)]
pub struct Not<M> {
    matcher: M,
}

/// Inverts `matcher`. Errors still propagate as errors.
pub fn not<M: Matcher>(matcher: M) -> Not<M> {
    Not { matcher }
}

impl<M: Matcher> Matcher for Not<M> {
    fn matches(&self, actual: &dyn Input) -> Result<bool, Error> {
        self.matcher.matches(actual).map(|matched| !matched)
    }

    fn failure_message(&self, actual: &dyn Input) -> String {
        self.matcher.negated_failure_message(actual)
    }

    fn negated_failure_message(&self, actual: &dyn Input) -> String {
        self.matcher.failure_message(actual)
    }
}

/// And succeeds when every matcher succeeds.
pub struct And {
    matchers: Vec<Box<dyn Matcher>>,
}

/// Combines matchers; evaluation stops at the first one that fails.
pub fn and(matchers: Vec<Box<dyn Matcher>>) -> And {
    And { matchers }
}

impl Matcher for And {
    fn matches(&self, actual: &dyn Input) -> Result<bool, Error> {
        for matcher in &self.matchers {
            if !matcher.matches(actual)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn failure_message(&self, actual: &dyn Input) -> String {
        for matcher in &self.matchers {
            if !matches!(matcher.matches(actual), Ok(true)) {
                return matcher.failure_message(actual);
            }
        }
        format_message(actual, "to satisfy all matchers", self.matchers.len())
    }

    fn negated_failure_message(&self, actual: &dyn Input) -> String {
        format_message(
            actual,
            "not to satisfy all of these matchers",
            self.matchers.len(),
        )
    }
}

impl fmt::Debug for And {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("And")
            .field("matchers", &self.matchers.len())
            .finish()
    }
}

/// WithTransform applies a transformation before handing the result to a
/// matcher.
pub struct WithTransform<F, T, M> {
    transform: F,
    matcher: M,
    _output: PhantomData<fn() -> T>,
}

/// Matches `matcher` against `transform(actual)`. A failing transform is a
/// hard failure of the assertion.
pub fn with_transform<F, T, M>(transform: F, matcher: M) -> WithTransform<F, T, M>
where
    F: Fn(&dyn Input) -> Result<T, Error>,
    T: Input,
    M: Matcher,
{
    WithTransform {
        transform,
        matcher,
        _output: PhantomData,
    }
}

impl<F, T, M> Matcher for WithTransform<F, T, M>
where
    F: Fn(&dyn Input) -> Result<T, Error>,
    T: Input,
    M: Matcher,
{
    fn matches(&self, actual: &dyn Input) -> Result<bool, Error> {
        let transformed = (self.transform)(actual)?;
        self.matcher.matches(&transformed)
    }

    fn failure_message(&self, actual: &dyn Input) -> String {
        match (self.transform)(actual) {
            Ok(transformed) => self.matcher.failure_message(&transformed),
            Err(err) => format_message(actual, "to transform without error, got", err),
        }
    }

    fn negated_failure_message(&self, actual: &dyn Input) -> String {
        match (self.transform)(actual) {
            Ok(transformed) => self.matcher.negated_failure_message(&transformed),
            Err(err) => format_message(actual, "to transform without error, got", err),
        }
    }
}

/// Expectation binds an actual value for assertion.
#[derive(Debug)]
pub struct Expectation<'a> {
    actual: &'a dyn Input,
}

/// Starts an assertion on `actual`.
pub fn expect(actual: &dyn Input) -> Expectation<'_> {
    Expectation { actual }
}

impl Expectation<'_> {
    /// Checks the matcher and returns the failure description instead of
    /// panicking.
    pub fn check(&self, matcher: &dyn Matcher, negated: bool) -> Result<(), String> {
        match matcher.matches(self.actual) {
            Err(err) => Err(format!("matcher returned an error: {}", err)),
            Ok(matched) if matched != negated => Ok(()),
            Ok(_) if negated => Err(matcher.negated_failure_message(self.actual)),
            Ok(_) => Err(matcher.failure_message(self.actual)),
        }
    }

    /// Panics with the failure message unless the matcher matches.
    #[track_caller]
    pub fn to(&self, matcher: impl Matcher) {
        if let Err(message) = self.check(&matcher, false) {
            panic!("{}", message);
        }
    }

    /// Panics with the negated failure message if the matcher matches.
    #[track_caller]
    pub fn to_not(&self, matcher: impl Matcher) {
        if let Err(message) = self.check(&matcher, true) {
            panic!("{}", message);
        }
    }
}
