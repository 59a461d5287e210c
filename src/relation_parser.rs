use winnow::prelude::*;
use winnow::combinator::preceded;
use winnow::token::{rest, take_while};

use crate::error::{Error, Result};
use crate::relation_ast::*;

/// Parses one trimmed line of `[A] (attrs) (keys) - [B] (attrs) (keys): kind`.
///
/// A bracketed name or parenthesized list ends at the first closing
/// delimiter that lets the rest of the line match, so `(id, total(usd))`
/// is read as the two attributes `id` and `total(usd)`.
pub fn parse_relation(line: &str) -> Result<Relation> {
    let (left, right, kind) = relation_line(line).ok_or_else(|| Error::MalformedNotation {
        line: line.to_string(),
    })?;

    Ok(Relation {
        entity_a: left.name.to_string(),
        attributes_a: split_attributes(left.attributes),
        primary_keys_a: left.keys.map(split_keys).unwrap_or_default(),
        entity_b: right.name.to_string(),
        attributes_b: split_attributes(right.attributes),
        primary_keys_b: right.keys.map(split_keys).unwrap_or_default(),
        kind,
        source: line.to_string(),
    })
}

/// Raw text captured for one `[name] (attributes) (keys)` block.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EntityBlock<'s> {
    name: &'s str,
    attributes: &'s str,
    keys: Option<&'s str>,
}

fn relation_line(line: &str) -> Option<(EntityBlock<'_>, EntityBlock<'_>, RelationKind)> {
    entity_blocks(line).into_iter().find_map(|(left, mut input)| {
        separator.parse_next(&mut input).ok()?;
        entity_blocks(input).into_iter().find_map(|(right, mut input)| {
            let kind = preceded(": ", relation_kind).parse_next(&mut input).ok()?;
            Some((left, right, kind))
        })
    })
}

/// Every reading of an entity block at the start of `input`, in the order
/// they should be tried, each paired with the input left after it.
fn entity_blocks(input: &str) -> Vec<(EntityBlock<'_>, &str)> {
    let mut blocks = Vec::new();
    for (name, after_name) in delimited_candidates(input, '[', ']') {
        if name.is_empty() {
            continue;
        }
        for (attributes, after_attrs) in delimited_candidates(after_name.trim_start(), '(', ')') {
            for (keys, after_keys) in delimited_candidates(after_attrs.trim_start(), '(', ')') {
                let block = EntityBlock { name, attributes, keys: Some(keys) };
                blocks.push((block, after_keys));
            }
            let block = EntityBlock { name, attributes, keys: None };
            blocks.push((block, after_attrs));
        }
    }
    blocks
}

/// All `open ... close` spans at the start of `input`, shortest first.
/// A span never crosses a line break.
fn delimited_candidates(input: &str, open: char, close: char) -> Vec<(&str, &str)> {
    let Some(body) = input.strip_prefix(open) else {
        return Vec::new();
    };
    body.char_indices()
        .take_while(|&(_, c)| c != '\n')
        .filter(|&(_, c)| c == close)
        .map(|(i, _)| (&body[..i], &body[i + close.len_utf8()..]))
        .collect()
}

fn whitespace<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(0.., char::is_whitespace).parse_next(input)
}

fn separator(input: &mut &str) -> winnow::Result<()> {
    (whitespace, "-", whitespace).void().parse_next(input)
}

// Runs to the end of the input; a stray `\r` stays part of the descriptor.
fn relation_kind(input: &mut &str) -> winnow::Result<RelationKind> {
    rest.verify(|descriptor: &str| !descriptor.is_empty())
        .map(RelationKind::from_descriptor)
        .parse_next(input)
}

fn split_attributes(list: &str) -> Vec<String> {
    list.split(',').map(|attr| attr.trim().to_string()).collect()
}

// `id:PK` keeps only `id`; blank entries are dropped.
fn split_keys(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|key| !key.trim().is_empty())
        .map(|key| key.split_once(':').map_or(key, |(name, _)| name).trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_candidates_shortest_first() {
        let spans = delimited_candidates("(a, b(c)) rest", '(', ')');
        assert_eq!(spans, vec![("a, b(c", ") rest"), ("a, b(c)", " rest")]);
    }

    #[test]
    fn delimited_candidates_need_opener() {
        assert!(delimited_candidates(" (a)", '(', ')').is_empty());
    }

    #[test]
    fn delimited_candidates_stop_at_line_break() {
        let spans = delimited_candidates("(a\n)", '(', ')');
        assert!(spans.is_empty());
    }

    #[test]
    fn delimited_candidates_unclosed() {
        assert!(delimited_candidates("(id, name", '(', ')').is_empty());
    }

    #[test]
    fn entity_blocks_try_keys_before_no_keys() {
        let blocks = entity_blocks("[A] (x)  (x:PK) - rest");
        assert_eq!(
            blocks,
            vec![
                (EntityBlock { name: "A", attributes: "x", keys: Some("x:PK") }, " - rest"),
                (EntityBlock { name: "A", attributes: "x", keys: None }, "  (x:PK) - rest"),
                (EntityBlock { name: "A", attributes: "x)  (x:PK", keys: None }, " - rest"),
            ]
        );
    }

    #[test]
    fn entity_blocks_skip_empty_name() {
        assert!(entity_blocks("[] (x)").is_empty());
    }

    #[test]
    fn separator_accepts_unicode_whitespace() {
        let mut input = "\u{a0}-\u{b}\u{c}[B]";
        separator(&mut input).unwrap();
        assert_eq!(input, "[B]");
    }

    #[test]
    fn relation_kind_keeps_carriage_return() {
        let mut input = "n - 1\rjunk";
        let kind = relation_kind(&mut input).unwrap();
        assert_eq!(kind, RelationKind::Other("n - 1\rjunk".to_string()));
        assert_eq!(input, "");
    }

    #[test]
    fn relation_kind_trims_descriptor() {
        let mut input = "cha - con  ";
        let kind = relation_kind(&mut input).unwrap();
        assert_eq!(kind, RelationKind::OneToOne { hierarchical: true });
    }

    #[test]
    fn split_attributes_trims_and_keeps_order() {
        assert_eq!(split_attributes(" b , a,c "), vec!["b", "a", "c"]);
    }

    #[test]
    fn split_attributes_empty_list_yields_one_blank() {
        assert_eq!(split_attributes(""), vec![""]);
    }

    #[test]
    fn split_keys_drops_tags_and_blanks() {
        assert_eq!(split_keys("id:PK, , code : UK,name"), vec!["id", "code", "name"]);
    }

    #[test]
    fn split_keys_only_first_colon_splits() {
        assert_eq!(split_keys("a:b:c"), vec!["a"]);
    }

    #[test]
    fn parse_full_line() {
        let line = "[Student] (id, name) (id:PK) - [Course] (course_id, title) (course_id): n - 1";
        let rel = parse_relation(line).unwrap();
        assert_eq!(rel.entity_a, "Student");
        assert_eq!(rel.attributes_a, vec!["id", "name"]);
        assert_eq!(rel.primary_keys_a, vec!["id"]);
        assert_eq!(rel.entity_b, "Course");
        assert_eq!(rel.attributes_b, vec!["course_id", "title"]);
        assert_eq!(rel.primary_keys_b, vec!["course_id"]);
        assert_eq!(rel.kind, RelationKind::ManyToOne);
        assert_eq!(rel.source, line);
    }

    #[test]
    fn parse_nested_parens_in_attributes() {
        let rel = parse_relation("[Order] (id, total(usd)) - [C] (cid): n - 1").unwrap();
        assert_eq!(rel.attributes_a, vec!["id", "total(usd)"]);
        assert!(rel.primary_keys_a.is_empty());
        assert_eq!(rel.attributes_b, vec!["cid"]);
    }

    #[test]
    fn parse_nested_parens_in_keys() {
        let rel = parse_relation("[A] (x) (x:NUM(3)) - [B] (y) (y:CHAR(2)): 1 - 1").unwrap();
        assert_eq!(rel.primary_keys_a, vec!["x"]);
        assert_eq!(rel.attributes_b, vec!["y"]);
        assert_eq!(rel.primary_keys_b, vec!["y"]);
    }

    #[test]
    fn parse_closing_bracket_inside_name() {
        let rel = parse_relation("[A]x] (a) - [B] (b): n - 1").unwrap();
        assert_eq!(rel.entity_a, "A]x");
        assert_eq!(rel.entity_b, "B");
    }

    #[test]
    fn parse_unicode_whitespace_around_separator() {
        let rel = parse_relation("[A] (a)\u{a0}-\u{a0}[B] (b): n - 1").unwrap();
        assert_eq!(rel.entity_b, "B");
        assert_eq!(rel.kind, RelationKind::ManyToOne);
    }

    #[test]
    fn parse_keeps_text_after_carriage_return() {
        let rel = parse_relation("[A] (a) - [B] (b): n - 1\rjunk").unwrap();
        assert_eq!(rel.kind, RelationKind::Other("n - 1\rjunk".to_string()));
    }

    #[test]
    fn parse_requires_space_after_colon() {
        assert!(parse_relation("[A] (x) - [B] (y):n - 1").is_err());
    }

    #[test]
    fn parse_rejects_space_before_colon() {
        assert!(parse_relation("[A] (x) - [B] (y) : n - 1").is_err());
    }

    #[test]
    fn parse_rejects_missing_kind() {
        assert!(parse_relation("[A] (x) - [B] (y): ").is_err());
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(parse_relation("[A] (x) [B] (y): n - 1").is_err());
    }

    #[test]
    fn parse_error_carries_line() {
        match parse_relation("[A] (x)") {
            Err(Error::MalformedNotation { line }) => assert_eq!(line, "[A] (x)"),
            other => panic!("expected MalformedNotation, got {other:?}"),
        }
    }
}
