use std::cell::Cell;
use std::rc::Rc;

/// API fetch state enum
#[derive(Clone, PartialEq, Debug)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&String> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Hands out increasing request numbers so that only the newest response
/// of a kind is applied.
///
/// Clones share the counter.
#[derive(Clone, Default, Debug)]
pub struct RequestSequence {
    latest: Rc<Cell<u64>>,
}

impl RequestSequence {
    /// Starts a new request and returns its ticket.
    pub fn next(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

impl PartialEq for RequestSequence {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.latest, &other.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let sequence = RequestSequence::default();
        let first = sequence.next();
        let second = sequence.clone().next();
        assert!(!sequence.is_latest(first));
        assert!(sequence.is_latest(second));
    }

    #[test]
    fn test_fetch_state_accessors() {
        let state: FetchState<Vec<i32>> = FetchState::Success(vec![1]);
        assert_eq!(state.data(), Some(&vec![1]));
        assert!(FetchState::<()>::Loading.is_loading());
        let failed = FetchState::<()>::Error("boom".into());
        assert_eq!(failed.error().map(String::as_str), Some("boom"));
    }
}
