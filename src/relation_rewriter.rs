use tracing::debug;

use crate::relation_ast::*;

/// Rewrites a relation so the implied key becomes an explicit attribute.
///
/// `n - 1` moves the first attribute of the "one" side into the "many" side
/// as a foreign key. `1 - 1` and `cha - con` prefix the child's attributes
/// with the parent's first attribute and always report `1 - 1`. Any other
/// kind returns the source line untouched.
pub fn rewrite(relation: &Relation) -> String {
    match &relation.kind {
        RelationKind::ManyToOne => rewrite_many_to_one(relation),
        RelationKind::OneToOne { .. } => rewrite_one_to_one(relation),
        RelationKind::Other(kind) => {
            debug!(%kind, "no rewrite rule for relation kind");
            relation.source.clone()
        }
    }
}

fn rewrite_many_to_one(relation: &Relation) -> String {
    let Some(foreign_key) = relation.attributes_b.first() else {
        return relation.source.clone();
    };
    debug!(
        from = %relation.entity_a,
        to = %relation.entity_b,
        %foreign_key,
        "adding foreign key"
    );

    // Not deduplicated: the key is appended even if entity A already has it.
    let mut attrs_a = relation.attributes_a.clone();
    attrs_a.push(foreign_key.clone());

    let mut attrs_b = vec![foreign_key.clone()];
    for attr in &relation.attributes_b {
        if attr != foreign_key && !attrs_b.contains(attr) {
            attrs_b.push(attr.clone());
        }
    }

    format!(
        "[{}] ({}) ({}:FK) - [{}] ({}): {}",
        relation.entity_a,
        attrs_a.join(", "),
        foreign_key,
        relation.entity_b,
        attrs_b.join(", "),
        relation.kind,
    )
}

fn rewrite_one_to_one(relation: &Relation) -> String {
    let Some(parent_id) = relation.attributes_a.first() else {
        return relation.source.clone();
    };
    debug!(
        parent = %relation.entity_a,
        child = %relation.entity_b,
        %parent_id,
        "sharing parent identifier"
    );

    format!(
        "[{}] ({}) - [{}] ({}, {}): {}",
        relation.entity_a,
        relation.attributes_a.join(", "),
        relation.entity_b,
        parent_id,
        relation.attributes_b.join(", "),
        RelationKind::OneToOne { hierarchical: false },
    )
}
