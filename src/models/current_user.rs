/// Operator that passed Basic authentication; stored as a request extension.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: String,
}
