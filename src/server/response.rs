use axum::http::StatusCode;

use crate::error::{ErrorKind, ExplorerError};

/// What a failed request was trying to show, for the error page wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    RecentBlocks,
    Block,
    Height,
    Transaction,
    Search,
}

impl Subject {
    fn noun(self) -> &'static str {
        match self {
            Self::RecentBlocks => "recent blocks",
            Self::Block | Self::Height => "block",
            Self::Transaction => "transaction",
            Self::Search => "search result",
        }
    }
}

pub fn status_for(err: &ExplorerError) -> StatusCode {
    match err {
        ExplorerError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ExplorerError::DataUnavailable { source, .. } => match source.as_ref() {
            ExplorerError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        },
        _ => match err.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unavailable | ErrorKind::Malformed => StatusCode::BAD_GATEWAY,
        },
    }
}

/// Short message shown to the browser. Never carries daemon detail.
pub fn user_message(err: &ExplorerError, subject: Subject) -> String {
    match err {
        ExplorerError::InvalidHash(_) => match subject {
            Subject::Transaction => "Invalid transaction id".to_string(),
            _ => "Invalid block hash".to_string(),
        },
        ExplorerError::InvalidHeight(raw) => format!("Invalid block number: {raw}"),
        ExplorerError::UnknownSearchTerm(term) => format!("Unknown search value: {term}"),
        _ => match (err.kind(), subject) {
            (_, Subject::RecentBlocks) => "Unable to retrieve recent blocks".to_string(),
            (ErrorKind::NotFound, Subject::Height) => "No block at that height".to_string(),
            (ErrorKind::NotFound, Subject::Transaction) => "Transaction not found".to_string(),
            (ErrorKind::NotFound, _) => "Block not found".to_string(),
            _ => format!("Unable to retrieve {}", subject.noun()),
        },
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{status_for, user_message, Subject};
    use crate::error::ExplorerError;

    #[test]
    fn statuses_follow_the_error_kind() {
        let cases = vec![
            (ExplorerError::InvalidHash("x".to_string()), StatusCode::BAD_REQUEST),
            (ExplorerError::InvalidHeight("x".to_string()), StatusCode::BAD_REQUEST),
            (ExplorerError::UnknownSearchTerm("x".to_string()), StatusCode::BAD_REQUEST),
            (ExplorerError::NotFound("gone".to_string()), StatusCode::NOT_FOUND),
            (ExplorerError::Transport("refused".to_string()), StatusCode::BAD_GATEWAY),
            (ExplorerError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (ExplorerError::Malformed("shape".to_string()), StatusCode::BAD_GATEWAY),
            (
                ExplorerError::DataUnavailable {
                    step: 4,
                    source: Box::new(ExplorerError::Timeout),
                },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ExplorerError::DataUnavailable {
                    step: 4,
                    source: Box::new(ExplorerError::NotFound("pruned".to_string())),
                },
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(status_for(&err), expected, "{err}");
        }
    }

    #[test]
    fn messages_hide_daemon_detail() {
        let err = ExplorerError::Rpc {
            code: -1,
            message: "secret internal stack trace".to_string(),
        };
        let message = user_message(&err, Subject::Block);
        assert_eq!(message, "Unable to retrieve block");
        assert!(!message.contains("secret"));
    }

    #[test]
    fn not_found_messages_name_the_entity() {
        let err = ExplorerError::NotFound("Block not found".to_string());
        assert_eq!(user_message(&err, Subject::Block), "Block not found");
        assert_eq!(user_message(&err, Subject::Transaction), "Transaction not found");
        assert_eq!(user_message(&err, Subject::Height), "No block at that height");
    }

    #[test]
    fn invalid_hash_wording_depends_on_route() {
        let err = ExplorerError::InvalidHash("zz".to_string());
        assert_eq!(user_message(&err, Subject::Block), "Invalid block hash");
        assert_eq!(user_message(&err, Subject::Transaction), "Invalid transaction id");
    }
}
