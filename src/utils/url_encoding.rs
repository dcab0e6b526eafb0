use std::collections::HashMap;

/// Parse URL-encoded form body into a HashMap; repeated keys keep submission order
pub fn parse_urlencoded_body(body: &axum::body::Bytes) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    let raw = String::from_utf8_lossy(body);
    for pair in raw.split('&') {
        if pair.is_empty() { continue; }
        let mut parts = pair.splitn(2, '=');
        let key = decode_component(parts.next().unwrap_or(""));
        let val = decode_component(parts.next().unwrap_or(""));
        map.entry(key).or_default().push(val);
    }
    map
}

// Browsers encode spaces as '+' in form bodies.
fn decode_component(enc: &str) -> String {
    let plus_decoded = enc.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|s| s.into_owned())
        .unwrap_or(plus_decoded)
}
