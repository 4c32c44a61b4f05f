use crate::model::account::Account;

use super::client_route;

/// Session as observed by a screen. `Loading` only exists on the client
/// while the provider has not answered yet.
#[derive(Debug, Clone)]
pub enum SessionState {
    Loading,
    Present(Account),
    Absent,
}

#[derive(Debug, Clone)]
pub enum GateDecision {
    /// Render a neutral waiting state, neither content nor redirect.
    Wait,
    Allow(Account),
    RedirectTo(&'static str),
}

pub fn guard(session: SessionState) -> GateDecision {
    match session {
        SessionState::Loading => GateDecision::Wait,
        SessionState::Present(account) => GateDecision::Allow(account),
        SessionState::Absent => GateDecision::RedirectTo(client_route::AUTH),
    }
}

impl From<Option<Account>> for SessionState {
    fn from(value: Option<Account>) -> Self {
        match value {
            Some(account) => SessionState::Present(account),
            None => SessionState::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::now_v7(),
            email: "a@b.com".to_string(),
            password: "".to_string(),
            created_date: None,
            updated_date: None,
        }
    }

    #[test]
    fn test_loading_waits_without_redirect() {
        assert!(matches!(guard(SessionState::Loading), GateDecision::Wait));
    }

    #[test]
    fn test_absent_redirects_to_auth() {
        assert!(matches!(
            guard(SessionState::Absent),
            GateDecision::RedirectTo("/auth")
        ));
        assert!(matches!(
            guard(None.into()),
            GateDecision::RedirectTo("/auth")
        ));
    }

    #[test]
    fn test_present_allows() {
        let account = account();
        match guard(Some(account.clone()).into()) {
            GateDecision::Allow(x) => assert_eq!(x.id, account.id),
            other => panic!("unexpected decision {:?}", other),
        }
    }
}
