/// Redirect target that carries a deliberately bogus `.:.` credential so the
/// browser drops its cached Basic auth and prompts again
pub fn logout_url(host: &str) -> String {
    let host = host.trim();
    let host = if host.is_empty() { "localhost" } else { host };
    format!("http://.:.@{}", host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_invalid_credential_and_keeps_host() {
        assert_eq!(logout_url("panel.example:5000"), "http://.:.@panel.example:5000");
    }

    #[test]
    fn falls_back_to_localhost() {
        assert_eq!(logout_url(""), "http://.:.@localhost");
    }
}
