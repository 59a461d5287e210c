pub mod batch;
pub mod error;
pub mod relation_ast;
pub mod relation_parser;
pub mod relation_rewriter;

pub use error::{Error, Result};
pub use relation_ast::{Relation, RelationKind};

pub fn parse(line: &str) -> Result<Relation> {
    relation_parser::parse_relation(line)
}

pub fn rewrite(relation: &Relation) -> String {
    relation_rewriter::rewrite(relation)
}

pub fn transform(line: &str) -> Result<String> {
    let relation = parse(line)?;
    Ok(rewrite(&relation))
}
