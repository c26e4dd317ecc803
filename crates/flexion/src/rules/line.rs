//! Shared line grammar for rule files.
//!
//! Every rule line has the shape `LEFT+CONDITION->RIGHT`, with the
//! condition optional: both `LEFT->RIGHT` and the explicit unconditional
//! `LEFT+->RIGHT` are legal. LEFT may itself contain `+` (regex
//! repetition), so the splitter anchors on the *last* `->` and the *last*
//! `+` before it, and only treats that tail as a condition when it parses
//! as one.
//!
//! Condition values come in three notations: a single value (`Case=Nom`),
//! a choice (`Case=[Nom,Acc]`), and two schema-expanded forms, `Case=*`
//! for every legal value and `Case=[^Nom]` for every legal value but the
//! listed ones. The expanded forms still *cover* the category: a lexicon
//! rule with `Case=*` consumes Case.
//!
//! Lines starting with `!` are comments. Blank lines are ignored. A line
//! that cannot be compiled is skipped, never fatal; callers collect the
//! skips for reporting.

use winnow::combinator::{alt, delimited, separated};
use winnow::prelude::*;
use winnow::token::take_while;

use super::condition::RuleCondition;
use crate::schema::Schema;
use crate::types::title_case;

/// A syntactically split rule line, condition validated against the
/// schema but LEFT/RIGHT not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawRule {
    pub left: String,
    pub condition: RuleCondition,
    pub right: String,
}

/// Split one line. `Ok(None)` for blanks and comments, `Err(reason)` for
/// lines that must be skipped.
pub(crate) fn parse_line(line: &str, schema: &Schema) -> Result<Option<RawRule>, String> {
    if line.trim().is_empty() || line.trim_start().starts_with('!') {
        return Ok(None);
    }
    let Some(arrow) = line.rfind("->") else {
        return Err("missing '->'".to_string());
    };
    let head = &line[..arrow];
    // RIGHT is taken verbatim; replacements may carry meaningful spaces.
    let right = &line[arrow + 2..];

    let (left, condition) = match head.rfind('+') {
        // `LEFT+->RIGHT` is the explicit unconditional spelling.
        Some(plus) if head[plus + 1..].is_empty() => (&head[..plus], RuleCondition::new()),
        Some(plus) => match condition_pairs(&head[plus + 1..]) {
            Some(pairs) => (&head[..plus], compile_condition(pairs, schema)?),
            // No condition after the '+': it belongs to LEFT.
            None => (head, RuleCondition::new()),
        },
        None => (head, RuleCondition::new()),
    };
    if left.is_empty() {
        return Err("empty pattern".to_string());
    }
    Ok(Some(RawRule {
        left: left.to_string(),
        condition,
        right: right.to_string(),
    }))
}

/// Value notation on the right of an `=`.
#[derive(Debug, Clone)]
enum ValueSpec {
    /// `*`: every schema value of the category.
    Any,
    /// `[^A,B]`: every schema value except the listed ones.
    Exclude(Vec<String>),
    /// `A` or `[A,B]`.
    List(Vec<String>),
}

/// Normalize spellings, expand `*` and `[^...]`, and check every pair
/// against the schema.
fn compile_condition(
    pairs: Vec<(String, ValueSpec)>,
    schema: &Schema,
) -> Result<RuleCondition, String> {
    let mut condition = RuleCondition::new();
    for (category, spec) in pairs {
        let category = title_case(&category);
        let Some(legal) = schema.values(&category) else {
            return Err(format!("unknown category '{category}'"));
        };
        let values = match spec {
            ValueSpec::Any => legal.to_vec(),
            ValueSpec::List(raw) => normalize_values(&category, raw, legal)?,
            ValueSpec::Exclude(raw) => {
                let barred = normalize_values(&category, raw, legal)?;
                legal
                    .iter()
                    .filter(|value| !barred.contains(value))
                    .cloned()
                    .collect()
            }
        };
        condition.insert(category, values);
    }
    Ok(condition)
}

fn normalize_values(
    category: &str,
    raw: Vec<String>,
    legal: &[String],
) -> Result<Vec<String>, String> {
    let mut normalized = Vec::with_capacity(raw.len());
    for value in raw {
        let value = title_case(&value);
        if !legal.contains(&value) {
            return Err(format!("unknown value '{value}' for category '{category}'"));
        }
        normalized.push(value);
    }
    Ok(normalized)
}

/// Try the condition grammar on a candidate segment. `None` when the
/// segment is not a condition at all.
fn condition_pairs(text: &str) -> Option<Vec<(String, ValueSpec)>> {
    let mut input = text;
    let pairs = pair_list(&mut input).ok()?;
    input.is_empty().then_some(pairs)
}

fn pair_list(input: &mut &str) -> ModalResult<Vec<(String, ValueSpec)>> {
    separated(1.., pair, '|').parse_next(input)
}

/// Parse one pair: `Category=` followed by a value spec.
fn pair(input: &mut &str) -> ModalResult<(String, ValueSpec)> {
    (ident, '=', values)
        .map(|(category, _, values)| (category.to_string(), values))
        .parse_next(input)
}

fn values(input: &mut &str) -> ModalResult<ValueSpec> {
    alt((
        '*'.value(ValueSpec::Any),
        exclude_list,
        value_list.map(ValueSpec::List),
        ident.map(|v: &str| ValueSpec::List(vec![v.to_string()])),
    ))
    .parse_next(input)
}

fn exclude_list(input: &mut &str) -> ModalResult<ValueSpec> {
    delimited(
        ('[', '^'),
        separated(1.., ident.map(|v: &str| v.to_string()), ','),
        ']',
    )
    .map(ValueSpec::Exclude)
    .parse_next(input)
}

fn value_list(input: &mut &str) -> ModalResult<Vec<String>> {
    delimited(
        '[',
        separated(1.., ident.map(|v: &str| v.to_string()), ','),
        ']',
    )
    .parse_next(input)
}

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric()).parse_next(input)
}
