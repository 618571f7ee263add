use axum::http::{header, HeaderMap, HeaderValue};

use super::PrincipalKind;

/// Find a cookie by name in the request's `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a freshly issued session token.
pub fn session_cookie(kind: PrincipalKind, token: &str, secure: bool) -> HeaderValue {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        kind.cookie_name(),
        token,
        kind.ttl_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    // JWTs are base64url with dots, always a valid header value
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| clear_cookie(kind))
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_cookie(kind: PrincipalKind) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        kind.cookie_name()
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(""))
}
