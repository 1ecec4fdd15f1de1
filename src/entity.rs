//! The entity greeted by the case.

use std::io::{self, Write};

/// A person-like record with a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the greeting line without a trailing newline.
    pub fn greeting(&self) -> String {
        format!("Hello, {}!", self.name)
    }

    /// Write the greeting line to `out`.
    pub fn greet<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.greeting())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_alice() {
        let person = Person::new("Alice");
        assert_eq!(person.greeting(), "Hello, Alice!");
        assert_eq!(person.name(), "Alice");
    }

    #[test]
    fn test_greet_writes_one_line() {
        let mut buf = Vec::new();
        Person::new("Bob").greet(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Hello, Bob!\n");
    }
}
