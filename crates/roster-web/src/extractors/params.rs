//! Query and form parameters for the user pages.

use roster_core::{RosterError, RosterResult, UserId};
use serde::Deserialize;

/// `GET /users` query.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "lastName", default)]
    pub last_name: String,
}

/// Single `userId` parameter.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// Multi-valued `userIds` parameter.
///
/// Accepts repeated keys (`userIds=1&userIds=2`), comma-separated values
/// (`userIds=1,2`), or a mix of both.
#[derive(Debug, Default, Deserialize)]
pub struct UserIdsParams {
    #[serde(rename = "userIds", default)]
    pub user_ids: Vec<String>,
}

impl UserIdsParams {
    /// Parses every supplied id, in order. Blank entries are skipped.
    pub fn parse(&self) -> RosterResult<Vec<UserId>> {
        parse_user_ids(&self.user_ids)
    }
}

/// Parses raw `userIds` values into typed ids.
pub fn parse_user_ids(raw: &[String]) -> RosterResult<Vec<UserId>> {
    raw.iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            UserId::parse(piece)
                .map_err(|_| RosterError::validation(format!("Invalid user id: '{}'", piece)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_repeated_and_comma_separated() {
        let ids = parse_user_ids(&raw(&["3", "1,2", " 4 "])).unwrap();
        assert_eq!(ids, vec![UserId(3), UserId(1), UserId(2), UserId(4)]);
    }

    #[test]
    fn test_parse_skips_blank_entries() {
        let ids = parse_user_ids(&raw(&["", "1,,2,"])).unwrap();
        assert_eq!(ids, vec![UserId(1), UserId(2)]);
        assert!(parse_user_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_id() {
        let err = parse_user_ids(&raw(&["1", "abc"])).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("abc"));
    }
}
