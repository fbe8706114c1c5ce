use std::fmt;

/// A printing identified by card name and set label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId {
    pub name: String,
    pub set: String,
}

impl CardId {
    pub fn new(name: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            set: set.into(),
        }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' '{}'", self.name, self.set)
    }
}
