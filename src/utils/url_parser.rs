use once_cell::sync::Lazy;
use regex::Regex;
use url::{Host, Url};

// `.` does not cross newlines, so a match stays on one line.
static WGET_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"wget -O .*\.iso '").expect("wget pattern is a valid regex"));

/// Recover a bare image URL from form input.
///
/// Operators often paste the whole `wget -O name.iso 'https://...'` command
/// instead of the URL; the command part and trailing quotes are removed.
pub fn normalize_download_url(raw: &str) -> String {
    let url = raw.trim();
    if !url.starts_with("wget") {
        return url.to_string();
    }
    WGET_COMMAND
        .replace_all(url, "")
        .trim_end_matches('\'')
        .to_string()
}

/// General URL syntax check for image locations.
pub fn is_valid_url(raw: &str) -> bool {
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    // Schemes the creation script's downloader can fetch.
    if !matches!(parsed.scheme(), "http" | "https" | "ftp" | "ftps") {
        return false;
    }
    match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        None => false,
    }
}

fn is_valid_domain(domain: &str) -> bool {
    if domain == "localhost" {
        return true;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty() || l.starts_with('-') || l.ends_with('-')) {
        return false;
    }
    let tld = labels[labels.len() - 1];
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_pasted_wget_command() {
        assert_eq!(
            normalize_download_url("wget -O x.iso 'https://example.com/a.iso'"),
            "https://example.com/a.iso"
        );
    }

    #[test]
    fn strips_wget_command_with_long_output_path() {
        assert_eq!(
            normalize_download_url(
                "  wget -O /tmp/discovery_image_abc.iso 'https://api.example.com/images/abc?arch=x86_64&type=minimal-iso'  "
            ),
            "https://api.example.com/images/abc?arch=x86_64&type=minimal-iso"
        );
    }

    #[test]
    fn plain_urls_are_only_trimmed() {
        assert_eq!(
            normalize_download_url("  https://example.com/a.iso'  "),
            "https://example.com/a.iso'"
        );
    }

    #[test]
    fn wget_without_pattern_keeps_text_but_drops_trailing_quotes() {
        assert_eq!(normalize_download_url("wget https://x.io/a.iso''"), "wget https://x.io/a.iso");
    }

    #[test]
    fn greedy_match_stops_at_line_end() {
        assert_eq!(
            normalize_download_url("wget -O a.iso 'x.iso 'https://e.com/b.iso'\nwget -O c.iso 'https://e.com/d.iso'"),
            "https://e.com/b.iso'\nhttps://e.com/d.iso"
        );
    }

    #[test]
    fn bare_command_strips_to_empty() {
        assert_eq!(normalize_download_url("wget -O a.iso ''"), "");
    }

    #[test]
    fn accepts_common_image_urls() {
        assert!(is_valid_url("https://example.com/a.iso"));
        assert!(is_valid_url("http://10.0.0.5:8080/images/a.iso"));
        assert!(is_valid_url("https://api.example.com/images/abc?arch=x86_64&type=minimal-iso"));
        assert!(is_valid_url("ftp://mirror.example.org/pub/a.iso"));
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(!is_valid_url("example.com/a.iso"));
        assert!(!is_valid_url("https://exa mple.com/a.iso"));
        assert!(!is_valid_url("file:///etc/passwd"));
        assert!(!is_valid_url("https://nodot/a.iso"));
        assert!(!is_valid_url("https://example.123/a.iso"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn only_schemes_the_downloader_fetches_are_accepted() {
        assert!(is_valid_url("ftps://mirror.example.org/a.iso"));
        assert!(!is_valid_url("sftp://mirror.example.org/a.iso"));
        assert!(!is_valid_url("git://example.com/repo"));
        assert!(!is_valid_url("rtsp://example.com/stream"));
    }

    #[test]
    fn localhost_is_accepted_for_a_local_mirror() {
        assert!(is_valid_url("http://localhost:8000/a.iso"));
        assert!(!is_valid_url("http://otherhost:8000/a.iso"));
    }
}
