use std::{
    fmt,
    fmt::{Debug, Display},
};

/// Holds a credential (e.g. a bearer token) so that it never leaks into logs by accident.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret<T>
where T: Clone + Default
{
    value: T,
}

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl<T: Clone + Default> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T: Clone + Default> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

#[cfg(test)]
mod test {
    use super::Secret;

    #[test]
    fn secrets_are_redacted() {
        let token = Secret::new("eyJhbGciOiJIUzI1NiJ9".to_string());
        assert_eq!(format!("{token}"), "****");
        assert_eq!(format!("{token:?}"), "****");
        assert_eq!(token.reveal(), "eyJhbGciOiJIUzI1NiJ9");
    }
}
