/// True when the value is a non-empty run of ASCII digits
pub fn is_node_count(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
