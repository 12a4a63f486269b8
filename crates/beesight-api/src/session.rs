use axum_extra::extract::CookieJar;
use serde::Deserialize;

pub const SESSION_COOKIE: &str = "session_token";

/// Session cookie settings, read from the `[session]` config section.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SessionConfig {
    /// Mark the cookie `Secure`. Turn off only for plain-http development.
    pub secure: bool,
    pub max_age_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure: true,
            max_age_secs: 604800,
        }
    }
}

/// `Set-Cookie` value that stores the backend bearer token.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
        if config.secure { " Secure;" } else { "" },
        config.max_age_secs
    )
}

/// `Set-Cookie` value that drops the session.
pub fn cleared_session_cookie(config: &SessionConfig) -> String {
    format!(
        "{SESSION_COOKIE}=; HttpOnly;{} SameSite=Strict; Path=/; Max-Age=0",
        if config.secure { " Secure;" } else { "" }
    )
}

pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    #[test]
    fn cookie_attributes_follow_config() {
        let secure = session_cookie("abc", &SessionConfig::default());
        assert_eq!(
            secure,
            "session_token=abc; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=604800"
        );

        let plain = SessionConfig {
            secure: false,
            max_age_secs: 60,
        };
        assert_eq!(
            session_cookie("abc", &plain),
            "session_token=abc; HttpOnly; SameSite=Strict; Path=/; Max-Age=60"
        );
        assert!(cleared_session_cookie(&plain).contains("Max-Age=0"));
    }

    #[test]
    fn reads_token_from_jar() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session_token=tok-1"),
        );
        assert_eq!(session_token(&CookieJar::from_headers(&headers)).as_deref(), Some("tok-1"));

        let mut empty = HeaderMap::new();
        empty.insert(header::COOKIE, HeaderValue::from_static("session_token="));
        assert_eq!(session_token(&CookieJar::from_headers(&empty)), None);
    }
}
