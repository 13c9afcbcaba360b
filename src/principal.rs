use std::fmt;

/// The authenticated user on whose behalf a request runs
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Principal {
    username: String,
}

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.username)
    }
}
