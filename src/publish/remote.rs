use url::Url;

const TOKEN_USER: &str = "x-access-token";

/// Embed `token` as basic-auth credentials in an HTTPS remote URL.
///
/// Returns `None` for any other scheme (ssh, scp-like `git@host:path`, file
/// paths, plain http): the token is only ever sent over TLS. Existing
/// userinfo is replaced and reserved characters in the token are
/// percent-encoded.
pub(crate) fn authenticated_url(remote: &str, token: &str) -> Option<Url> {
    let mut url = Url::parse(remote).ok()?;
    if url.scheme() != "https" {
        return None;
    }
    url.set_username(TOKEN_USER).ok()?;
    url.set_password(Some(token)).ok()?;
    Some(url)
}

/// Mask every occurrence of `secret` in `text`
pub(crate) fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "***")
}
