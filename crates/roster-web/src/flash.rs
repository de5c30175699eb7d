//! One-shot flash notices carried across a redirect in a cookie.
//!
//! The cookie holds `{level}.{code}` rather than the message text, so the
//! value stays within the cookie character set and cannot be forged into
//! arbitrary markup.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the flash cookie.
pub const FLASH_COOKIE: &str = "roster_flash";

/// Where every mutating user operation lands.
pub const USERS_PATH: &str = "/users";

/// Severity of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    /// Confirmation of a completed operation.
    Message,
    /// Explanation of why an operation did not happen.
    Error,
}

impl FlashLevel {
    /// Returns the level's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Error => "error",
        }
    }
}

/// A status notice shown once on the next user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    UserRegistered,
    UserUpdated,
    UserDeleted,
    UsersDeleted,
    UserNotFound,
    NoUserSelected,
    NoUsersSelected,
}

impl Notice {
    const ALL: [Self; 7] = [
        Self::UserRegistered,
        Self::UserUpdated,
        Self::UserDeleted,
        Self::UsersDeleted,
        Self::UserNotFound,
        Self::NoUserSelected,
        Self::NoUsersSelected,
    ];

    /// Returns the notice's severity.
    #[must_use]
    pub const fn level(self) -> FlashLevel {
        match self {
            Self::UserRegistered | Self::UserUpdated | Self::UserDeleted | Self::UsersDeleted => {
                FlashLevel::Message
            }
            Self::UserNotFound | Self::NoUserSelected | Self::NoUsersSelected => FlashLevel::Error,
        }
    }

    /// Returns the stable code stored in the cookie.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UserRegistered => "user-registered",
            Self::UserUpdated => "user-updated",
            Self::UserDeleted => "user-deleted",
            Self::UsersDeleted => "users-deleted",
            Self::UserNotFound => "user-not-found",
            Self::NoUserSelected => "no-user-selected",
            Self::NoUsersSelected => "no-users-selected",
        }
    }

    /// Returns the human-readable text.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::UserRegistered => "User registered successfully.",
            Self::UserUpdated => "User updated successfully.",
            Self::UserDeleted => "User deleted successfully.",
            Self::UsersDeleted => "Selected users deleted successfully.",
            Self::UserNotFound => "User not found.",
            Self::NoUserSelected => "No user selected for update.",
            Self::NoUsersSelected => "No users selected for deletion.",
        }
    }

    /// Returns the cookie value for this notice.
    #[must_use]
    pub fn cookie_value(self) -> String {
        format!("{}.{}", self.level().as_str(), self.code())
    }

    /// Parses a cookie value back into a notice.
    #[must_use]
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let (level, code) = value.split_once('.')?;
        Self::ALL
            .into_iter()
            .find(|notice| notice.code() == code && notice.level().as_str() == level)
    }
}

fn flash_cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Stores `notice` in the jar and redirects to the user list.
#[must_use]
pub fn redirect_with(jar: CookieJar, notice: Notice) -> (CookieJar, Redirect) {
    (jar.add(flash_cookie(notice.cookie_value())), Redirect::to(USERS_PATH))
}

/// Reads the pending notice, if any, and clears it from the jar.
#[must_use]
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(value) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Notice::from_cookie_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_round_trips_every_notice() {
        for notice in Notice::ALL {
            assert_eq!(Notice::from_cookie_value(&notice.cookie_value()), Some(notice));
        }
    }

    #[test]
    fn test_mismatched_level_is_ignored() {
        assert_eq!(Notice::from_cookie_value("message.user-not-found"), None);
        assert_eq!(Notice::from_cookie_value("garbage"), None);
    }

    #[test]
    fn test_levels() {
        assert_eq!(Notice::UserRegistered.cookie_value(), "message.user-registered");
        assert_eq!(Notice::UserNotFound.cookie_value(), "error.user-not-found");
    }

    #[test]
    fn test_take_clears_the_cookie() {
        let jar = CookieJar::new().add(flash_cookie(Notice::UserDeleted.cookie_value()));

        let (jar, notice) = take(jar);

        assert_eq!(notice, Some(Notice::UserDeleted));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_take_without_cookie() {
        let (_jar, notice) = take(CookieJar::new());
        assert_eq!(notice, None);
    }
}
