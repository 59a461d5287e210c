use std::fmt;

/// One parsed line of relationship notation.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub entity_a: String,
    pub attributes_a: Vec<String>,
    pub primary_keys_a: Vec<String>,
    pub entity_b: String,
    pub attributes_b: Vec<String>,
    pub primary_keys_b: Vec<String>,
    pub kind: RelationKind,
    /// The line this relation was parsed from.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelationKind {
    /// `n - 1`
    ManyToOne,
    /// `1 - 1`, or `cha - con` when `hierarchical` is set.
    OneToOne { hierarchical: bool },
    Other(String),
}

impl RelationKind {
    pub fn from_descriptor(descriptor: &str) -> Self {
        match descriptor.trim() {
            "n - 1" => RelationKind::ManyToOne,
            "1 - 1" => RelationKind::OneToOne { hierarchical: false },
            "cha - con" => RelationKind::OneToOne { hierarchical: true },
            other => RelationKind::Other(other.to_string()),
        }
    }

    pub fn descriptor(&self) -> &str {
        match self {
            RelationKind::ManyToOne => "n - 1",
            RelationKind::OneToOne { hierarchical: false } => "1 - 1",
            RelationKind::OneToOne { hierarchical: true } => "cha - con",
            RelationKind::Other(s) => s,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor())
    }
}
