//! Bounded retry combinator shared by the team, week, and season loops
//!
//! Level 4 - Utilities

/// Every try came back empty
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("gave up after {tries} tries")]
pub struct Exhausted {
    pub tries: usize,
}

/// Call `f` until it produces a value or `max_tries` calls have been made.
///
/// `f` receives the zero-based try number and returns:
/// - `Ok(Some(value))` to stop with a result
/// - `Ok(None)` for a transient miss, which is retried
/// - `Err(e)` for a fatal error, which stops immediately
///
/// The outer `Result` carries fatal errors; the inner one reports
/// whether the budget ran out.
pub fn attempt<T, E, F>(max_tries: usize, mut f: F) -> Result<Result<T, Exhausted>, E>
where
    F: FnMut(usize) -> Result<Option<T>, E>,
{
    for try_no in 0..max_tries {
        if let Some(value) = f(try_no)? {
            return Ok(Ok(value));
        }
    }
    Ok(Err(Exhausted { tries: max_tries }))
}
