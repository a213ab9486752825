//! Module `state`
//!
//! The linear protocol state of a control channel session.

/// Handshake progress of a session. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    Connected,
    TlsNegotiated,
    Authenticated,
    ProtectionConfigured,
    /// Transfer mode configured; commands and transfers may run
    Ready,
}

impl SessionState {
    /// The state a step must start from to move into `self`.
    pub fn predecessor(self) -> Option<SessionState> {
        match self {
            SessionState::Connected => None,
            SessionState::TlsNegotiated => Some(SessionState::Connected),
            SessionState::Authenticated => Some(SessionState::TlsNegotiated),
            SessionState::ProtectionConfigured => Some(SessionState::Authenticated),
            SessionState::Ready => Some(SessionState::ProtectionConfigured),
        }
    }

    /// Whether the control channel is encrypted in this state.
    pub fn is_secured(self) -> bool {
        self >= SessionState::TlsNegotiated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_linear() {
        let order = [
            SessionState::Connected,
            SessionState::TlsNegotiated,
            SessionState::Authenticated,
            SessionState::ProtectionConfigured,
            SessionState::Ready,
        ];
        for pair in order.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[1].predecessor(), Some(pair[0]));
        }
        assert_eq!(SessionState::Connected.predecessor(), None);
    }

    #[test]
    fn test_secured_after_tls() {
        assert!(!SessionState::Connected.is_secured());
        assert!(SessionState::TlsNegotiated.is_secured());
        assert!(SessionState::Ready.is_secured());
    }
}
