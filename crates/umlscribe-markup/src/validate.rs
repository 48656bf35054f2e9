//! Grammar checks for normalized markup.
//!
//! [`validate`] runs these stages in order and reports everything it finds:
//!
//! 1. **Empty input** - short-circuits with a single violation
//! 2. **Delimiters** - start and end tags of the dialect, or of the family
//!    detected from the text when no dialect is given
//! 3. **Dialect rules** - required, forbidden and advisory patterns from
//!    [`umlscribe_core::grammar`]
//! 4. **Generic syntax** - bracket balance, doubled arrows, `Type+` annotations

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use umlscribe_core::{Delimiters, Dialect, ViolationCode, grammar};

use crate::{
    error::{ValidationVerdict, Violation, ViolationCollector},
    span::Span,
};

const BRACKET_PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

static DOUBLED_ARROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-->[ \t]*-->").expect("doubled arrow pattern is valid"));
static TYPE_PLUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":[ \t]*\w+\+").expect("type annotation pattern is valid"));
static START_CHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*@startchen\b").expect("chen tag pattern is valid"));

struct CompiledRule {
    rule: grammar::Rule,
    regex: Regex,
}

struct CompiledGrammar {
    required: Vec<CompiledRule>,
    forbidden: Vec<CompiledRule>,
    advisory: Vec<CompiledRule>,
}

impl CompiledGrammar {
    fn compile(dialect: Dialect) -> Self {
        let rules = grammar::rules(dialect);
        Self {
            required: compile_rules(rules.required),
            forbidden: compile_rules(rules.forbidden),
            advisory: compile_rules(rules.advisory),
        }
    }
}

fn compile_rules(rules: &[grammar::Rule]) -> Vec<CompiledRule> {
    rules
        .iter()
        .map(|rule| CompiledRule {
            rule: *rule,
            regex: Regex::new(rule.pattern)
                .unwrap_or_else(|err| panic!("invalid grammar rule {}: {err}", rule.code)),
        })
        .collect()
}

static GRAMMARS: Lazy<Vec<CompiledGrammar>> =
    Lazy::new(|| Dialect::ALL.iter().map(|d| CompiledGrammar::compile(*d)).collect());

fn compiled(dialect: Dialect) -> &'static CompiledGrammar {
    // `Dialect::ALL` lists variants in declaration order.
    &GRAMMARS[dialect as usize]
}

/// Validate markup against the grammar of a dialect.
///
/// When `dialect` is `None`, only the structural and generic checks run,
/// against the delimiter family detected from the text.
///
/// # Example
///
/// ```
/// # use umlscribe_markup::validate;
/// # use umlscribe_core::Dialect;
///
/// let verdict = validate("@startuml\nclass Dog\nAnimal <|-- Dog\n@enduml", Some(Dialect::Class));
/// assert!(verdict.is_valid());
///
/// let verdict = validate("class Dog", Some(Dialect::Class));
/// assert_eq!(
///     verdict.messages(),
///     vec!["Missing @startuml directive", "Missing @enduml directive"]
/// );
/// ```
pub fn validate(code: &str, dialect: Option<Dialect>) -> ValidationVerdict {
    let mut collector = ViolationCollector::new();

    if code.trim().is_empty() {
        collector.emit(
            Violation::error(ViolationCode::E001, "Empty code provided")
                .with_help("generate a diagram between start and end tags"),
        );
        return collector.finish();
    }

    let delimiters = match dialect {
        Some(dialect) => dialect.delimiters(),
        None if START_CHEN.is_match(code) => Delimiters::CHEN,
        None => Delimiters::UML,
    };
    check_delimiters(code, delimiters, &mut collector);

    if let Some(dialect) = dialect {
        check_grammar(code, compiled(dialect), &mut collector);
    }

    check_brackets(code, &mut collector);
    check_doubled_arrows(code, &mut collector);
    check_type_annotations(code, &mut collector);

    let verdict = collector.finish();
    debug!(
        dialect:? = dialect,
        violations = verdict.violations().len(),
        advisories = verdict.advisories().len();
        "Validated markup"
    );
    verdict
}

fn check_delimiters(code: &str, delimiters: Delimiters, collector: &mut ViolationCollector) {
    let has_line = |tag: &str| code.lines().any(|line| line.trim() == tag);
    // A start tag may carry a diagram name: `@startuml Orders`.
    let has_start = code.lines().any(|line| {
        line.trim()
            .strip_prefix(delimiters.start())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
    });

    if !has_start {
        collector.emit(
            Violation::error(
                ViolationCode::E002,
                format!("Missing {} directive", delimiters.start()),
            )
            .with_help(format!("begin the diagram with `{}`", delimiters.start())),
        );
    }
    if !has_line(delimiters.end()) {
        collector.emit(
            Violation::error(
                ViolationCode::E003,
                format!("Missing {} directive", delimiters.end()),
            )
            .with_help(format!("end the diagram with `{}`", delimiters.end())),
        );
    }
}

fn check_grammar(code: &str, grammar: &CompiledGrammar, collector: &mut ViolationCollector) {
    for compiled in &grammar.required {
        if !compiled.regex.is_match(code) {
            collector.emit(
                Violation::error(compiled.rule.code, compiled.rule.message)
                    .with_help(compiled.rule.help),
            );
        }
    }

    for compiled in &grammar.forbidden {
        if let Some(found) = compiled.regex.find(code) {
            collector.emit(
                Violation::error(compiled.rule.code, compiled.rule.message)
                    .with_label(Span::new(found.range()), "not allowed here")
                    .with_help(compiled.rule.help),
            );
        }
    }

    for compiled in &grammar.advisory {
        if !compiled.regex.is_match(code) {
            collector.emit(
                Violation::warning(compiled.rule.code, compiled.rule.message)
                    .with_help(compiled.rule.help),
            );
        }
    }
}

/// Report each bracket kind whose brackets do not pair up.
///
/// The span points at the first closing bracket without an opener, or else
/// at the first opener that is never closed.
fn check_brackets(code: &str, collector: &mut ViolationCollector) {
    for (open, close) in BRACKET_PAIRS {
        let mut opened = 0usize;
        let mut closed = 0usize;
        let mut stack: Vec<usize> = Vec::new();
        let mut stray_close: Option<usize> = None;

        for (offset, ch) in code.char_indices() {
            if ch == open {
                opened += 1;
                stack.push(offset);
            } else if ch == close {
                closed += 1;
                if stack.pop().is_none() && stray_close.is_none() {
                    stray_close = Some(offset);
                }
            }
        }

        let (offset, label) = match (stray_close, stack.first()) {
            (Some(offset), _) => (offset, "no matching opening bracket"),
            (None, Some(&offset)) => (offset, "unclosed bracket"),
            (None, None) => continue,
        };
        collector.emit(
            Violation::error(
                ViolationCode::E004,
                format!("Unmatched {open}{close} brackets: {opened} opening, {closed} closing"),
            )
            .with_label(Span::new(offset..offset + 1), label)
            .with_help(format!("close every `{open}` with a matching `{close}`")),
        );
    }
}

fn check_doubled_arrows(code: &str, collector: &mut ViolationCollector) {
    if let Some(found) = DOUBLED_ARROW.find(code) {
        collector.emit(
            Violation::error(ViolationCode::E005, "Invalid arrow syntax: --> -->")
                .with_label(Span::new(found.range()), "doubled arrow")
                .with_help("use a single `-->` between two elements"),
        );
    }
}

fn check_type_annotations(code: &str, collector: &mut ViolationCollector) {
    if let Some(found) = TYPE_PLUS.find(code) {
        collector.emit(
            Violation::error(
                ViolationCode::E006,
                "Invalid type syntax (Type+ is not valid)",
            )
            .with_label(Span::new(found.range()), "invalid type")
            .with_help("drop the `+`, or use a collection type such as `List<Type>`"),
        );
    }
}
