//! Deterministic cleanup of generated markup.
//!
//! [`normalize`] turns raw model output into markup that follows the
//! conventions of its dialect. A single pass runs these steps in order:
//!
//! 1. **Extract** the delimited block, canonicalizing the tags
//! 2. **Substitute** with the common rule table, then the dialect's table
//! 3. **Repair** dialect structure that regexes cannot express (synthesized
//!    participants, `start`/`stop` markers)
//! 4. **Style** UML dialects with the standard `skinparam` directives
//! 5. **Collapse** whitespace
//!
//! Passes repeat until the text stops changing, so normalizing twice gives
//! the same result as normalizing once.

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use umlscribe_core::{Delimiters, Dialect};

use crate::substitution;

/// The standard styling directives as `(key, line)` pairs.
pub const STYLING: [(&str, &str); 4] = [
    ("monochrome", "skinparam monochrome true"),
    ("shadowing", "skinparam shadowing false"),
    ("classattributeiconsize", "skinparam classAttributeIconSize 0"),
    ("style", "skinparam style strictuml"),
];

const MAX_PASSES: usize = 8;

const PARTICIPANT_KEYWORDS: &str =
    "participant|actor|boundary|control|entity|database|collections|queue";

static START_UML: Lazy<Regex> = Lazy::new(|| tag_regex("@startuml"));
static END_UML: Lazy<Regex> = Lazy::new(|| tag_regex("@enduml"));
static START_CHEN: Lazy<Regex> = Lazy::new(|| tag_regex("@startchen"));
static END_CHEN: Lazy<Regex> = Lazy::new(|| tag_regex("@endchen"));

static PARTICIPANT_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?m)^[ \t]*(?:{PARTICIPANT_KEYWORDS})[ \t]+\S"))
        .expect("participant declaration pattern is valid")
});
static MESSAGE_ENDPOINTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(\w+)[ \t]*(?:->>|-->|->|<--|<-)[ \t]*(\w+)")
        .expect("message endpoint pattern is valid")
});
static ACTIVITY_STEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*:[^;\n]+;").expect("activity step pattern is valid"));
static START_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*start[ \t]*$").expect("start marker pattern is valid"));
static STOP_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:stop|end)[ \t]*$").expect("stop marker pattern is valid")
});

static TITLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^title[ \t]+").expect("title prefix pattern is valid"));

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?i-u){}\b", regex::escape(tag))).expect("tag pattern is valid")
}

fn starts_with_tag(text: &str, delimiters: Delimiters) -> bool {
    text.starts_with(delimiters.start())
        && tag_patterns(delimiters)
            .0
            .find(text)
            .is_some_and(|found| found.start() == 0)
}

fn tag_patterns(delimiters: Delimiters) -> (&'static Regex, &'static Regex) {
    if delimiters == Delimiters::CHEN {
        (&START_CHEN, &END_CHEN)
    } else {
        (&START_UML, &END_UML)
    }
}

/// Normalize raw generated text into markup of the given dialect.
///
/// Never fails. Empty or whitespace-only input yields an empty string.
///
/// # Example
///
/// ```
/// # use umlscribe_markup::normalize;
/// # use umlscribe_core::Dialect;
///
/// let raw = "Here you go:\n@startuml\nclass Dog\nDog --|> Animal\n@enduml\nEnjoy!";
/// let code = normalize(raw, Dialect::Class);
///
/// assert!(code.starts_with("@startuml"));
/// assert!(code.contains("Animal <|-- Dog"));
/// assert!(code.ends_with("@enduml"));
/// ```
pub fn normalize(raw: &str, dialect: Dialect) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let mut current = single_pass(raw, dialect);
    let mut passes = 1;
    while passes < MAX_PASSES {
        let next = single_pass(&current, dialect);
        passes += 1;
        if next == current {
            break;
        }
        current = next;
    }

    debug!(
        dialect = dialect.slug(),
        passes:?,
        input_len = raw.len(),
        output_len = current.len();
        "Normalized markup"
    );
    current
}

fn single_pass(text: &str, dialect: Dialect) -> String {
    let text = extract_block(text, dialect);
    let text = substitution::common().apply(&text);
    let text = substitution::for_dialect(dialect).apply(&text);
    let text = repair_structure(&text, dialect);
    let text = apply_styling(&text, dialect);
    let text = collapse_whitespace(&text);
    trace!(dialect = dialect.slug(), text:?; "Normalization pass");
    text
}

/// Keep only the delimited block, with canonical tags.
///
/// A missing end tag is synthesized, and text after the start tag on its
/// line becomes a `title` line. Text without a start tag is returned
/// unchanged. ER output wrapped in UML tags is rewrapped in Chen tags.
fn extract_block(text: &str, dialect: Dialect) -> String {
    let delimiters = dialect.delimiters();
    let mut text = text.to_string();

    if dialect == Dialect::EntityRelationship
        && !START_CHEN.is_match(&text)
        && START_UML.is_match(&text)
    {
        text = START_UML
            .replace_all(&text, Delimiters::CHEN.start())
            .into_owned();
        text = END_UML.replace_all(&text, Delimiters::CHEN.end()).into_owned();
    }

    let (start, end) = tag_patterns(delimiters);
    let Some(found) = start.find(&text) else {
        return text;
    };

    let body = &text[found.end()..];
    let (inner, close_tag) = match end.find(body) {
        Some(close) => (&body[..close.start()], ""),
        None => (body, "\n"),
    };
    format!(
        "{}{}{}{}",
        delimiters.start(),
        title_from_tag_line(inner),
        close_tag,
        delimiters.end()
    )
}

/// Moves text that follows the start tag on its line into a `title` line.
fn title_from_tag_line(inner: &str) -> String {
    let (head, tail) = match inner.split_once('\n') {
        Some((head, tail)) => (head, Some(tail)),
        None => (inner, None),
    };
    let head = head.trim();
    if head.is_empty() {
        return inner.to_string();
    }

    let title = TITLE_PREFIX.replace(head, "");
    match tail {
        Some(tail) => format!("\ntitle {title}\n{tail}"),
        None => format!("\ntitle {title}\n"),
    }
}

/// Structural fixes that depend on the whole block.
fn repair_structure(text: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Sequence => synthesize_participants(text, dialect.delimiters()),
        Dialect::Activity => insert_start_stop(text, dialect.delimiters()),
        Dialect::Class | Dialect::Component | Dialect::UseCase | Dialect::EntityRelationship => {
            text.to_string()
        }
    }
}

/// Declare every message endpoint as a participant when none is declared.
fn synthesize_participants(text: &str, delimiters: Delimiters) -> String {
    if PARTICIPANT_DECLARATION.is_match(text) {
        return text.to_string();
    }

    let mut names: Vec<&str> = Vec::new();
    for caps in MESSAGE_ENDPOINTS.captures_iter(text) {
        for name in [caps.get(1), caps.get(2)].into_iter().flatten() {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
    }
    if names.is_empty() {
        return text.to_string();
    }

    debug!(count = names.len(); "Synthesizing participant declarations");
    let declarations: Vec<String> = names
        .iter()
        .map(|name| format!("participant {name}"))
        .collect();
    insert_after_start(text, delimiters, &declarations.join("\n"))
}

/// Bracket activity steps with `start` and `stop` markers.
fn insert_start_stop(text: &str, delimiters: Delimiters) -> String {
    if !ACTIVITY_STEP.is_match(text) {
        return text.to_string();
    }

    let mut text = text.to_string();
    if !START_MARKER.is_match(&text) {
        text = insert_after_start(&text, delimiters, "start");
    }
    if !STOP_MARKER.is_match(&text) {
        text = insert_before_end(&text, delimiters, "stop");
    }
    text
}

/// Insert the standard styling directives that are not yet present.
fn apply_styling(text: &str, dialect: Dialect) -> String {
    if !dialect.supports_styling() {
        return text.to_string();
    }
    let delimiters = dialect.delimiters();
    if !starts_with_tag(text, delimiters) {
        return text.to_string();
    }

    let present: Vec<String> = text
        .lines()
        .filter_map(|line| {
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (Some(keyword), Some(key)) if keyword.eq_ignore_ascii_case("skinparam") => {
                    Some(key.to_ascii_lowercase())
                }
                _ => None,
            }
        })
        .collect();

    let missing: Vec<&str> = STYLING
        .iter()
        .filter(|(key, _)| !present.iter().any(|p| p.as_str() == *key))
        .map(|(_, line)| *line)
        .collect();
    if missing.is_empty() {
        return text.to_string();
    }

    insert_after_start(text, delimiters, &missing.join("\n"))
}

fn insert_after_start(text: &str, delimiters: Delimiters, lines: &str) -> String {
    if starts_with_tag(text, delimiters) {
        let rest = &text[delimiters.start().len()..];
        format!("{}\n{}{}", delimiters.start(), lines, rest_with_newline(rest))
    } else {
        format!("{lines}\n{text}")
    }
}

fn insert_before_end(text: &str, delimiters: Delimiters, lines: &str) -> String {
    match text.trim_end().strip_suffix(delimiters.end()) {
        Some(body) => format!("{}\n{}\n{}", body.trim_end(), lines, delimiters.end()),
        None => format!("{}\n{lines}", text.trim_end()),
    }
}

fn rest_with_newline(rest: &str) -> String {
    if rest.starts_with('\n') || rest.is_empty() {
        rest.to_string()
    } else {
        format!("\n{rest}")
    }
}

/// Strip trailing whitespace, drop blank lines and trim the result.
fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("", Dialect::Class), "");
        assert_eq!(normalize("  \n\t \n", Dialect::Sequence), "");
    }

    #[test]
    fn test_extract_discards_surrounding_prose() {
        let raw = "Sure! Here is the diagram:\n@STARTUML\nclass Dog\n@EndUml\nHope this helps.";
        let code = normalize(raw, Dialect::Class);

        assert!(code.starts_with("@startuml\n"));
        assert!(code.ends_with("\nclass Dog\n@enduml"));
        assert!(!code.contains("Sure!"));
        assert!(!code.contains("Hope"));
    }

    #[test]
    fn test_extract_synthesizes_end_tag() {
        let code = normalize("@startuml\nclass Dog", Dialect::Class);
        assert!(code.ends_with("class Dog\n@enduml"));
    }

    #[test]
    fn test_text_without_tags_is_kept() {
        assert_eq!(
            normalize("garbage text with no tags", Dialect::Class),
            "garbage text with no tags"
        );
    }

    #[test]
    fn test_styling_inserted_once() {
        let code = normalize("@startuml\nskinparam shadowing true\nclass A\n@enduml", Dialect::Class);

        assert_eq!(code.matches("skinparam shadowing").count(), 1);
        assert!(code.contains("skinparam shadowing true"));
        assert!(code.contains("skinparam monochrome true"));
        assert!(code.contains("skinparam classAttributeIconSize 0"));
        assert!(code.contains("skinparam style strictuml"));
        assert!(code.starts_with("@startuml\nskinparam"));
    }

    #[test]
    fn test_class_scenario() {
        let raw = "@startuml\nclass Dog {\n  + name:string\n}\nDog --|> Animal\nWheel --* Car\n@enduml";
        let code = normalize(raw, Dialect::Class);

        assert!(code.contains("  +name : String"));
        assert!(code.contains("Animal <|-- Dog"));
        assert!(code.contains("Car *-- Wheel"));
        assert!(!code.contains("--|>"));
    }

    #[test]
    fn test_sequence_participants_synthesized() {
        let raw = "@startuml\nUser->Api: login\nApi-->User: token\n@enduml";
        let code = normalize(raw, Dialect::Sequence);

        let expected = "@startuml\n\
            skinparam monochrome true\n\
            skinparam shadowing false\n\
            skinparam classAttributeIconSize 0\n\
            skinparam style strictuml\n\
            participant User\n\
            participant Api\n\
            User -> Api : login\n\
            Api --> User : token\n\
            @enduml";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_sequence_declared_participants_untouched() {
        let raw = "@startuml\nactor User\nUser -> Api : login\n@enduml";
        let code = normalize(raw, Dialect::Sequence);
        assert!(!code.contains("participant"));
    }

    #[test]
    fn test_activity_start_stop_inserted() {
        let raw = "@startuml\n: Load ;\n:Save;\n@enduml";
        let code = normalize(raw, Dialect::Activity);

        assert!(code.contains("skinparam style strictuml\nstart\n:Load;\n:Save;\nstop\n@enduml"));
    }

    #[test]
    fn test_activity_existing_markers_kept() {
        let raw = "@startuml\nstart\n:Load;\nend\n@enduml";
        let code = normalize(raw, Dialect::Activity);
        assert_eq!(code.matches("start\n").count(), 1);
        assert!(!code.contains("stop"));
    }

    #[test]
    fn test_start_tag_name_becomes_title() {
        let raw = "@startuml Orders\nclass Order\n@enduml";
        let code = normalize(raw, Dialect::Class);

        assert!(code.contains("skinparam style strictuml\ntitle Orders\nclass Order"));
        assert!(code.lines().all(|line| line.trim() != "Orders"));
        assert_eq!(normalize(&code, Dialect::Class), code);
    }

    #[test]
    fn test_start_tag_title_keyword_not_doubled() {
        let code = normalize("@startchen title Shop\nentity A {\n}\n@endchen", Dialect::EntityRelationship);
        assert_eq!(code, "@startchen\ntitle Shop\nentity A {\n}\n@endchen");
    }

    #[test]
    fn test_er_uml_tags_rewritten() {
        let raw = "@startuml\nskinparam monochrome true\nclass Customer {\n  -name: String\n}\n@enduml";
        let code = normalize(raw, Dialect::EntityRelationship);

        assert_eq!(code, "@startchen\nentity Customer {\n  name : STRING\n}\n@endchen");
    }

    #[test]
    fn test_er_stray_uml_tags_removed() {
        let raw = "@startchen\n@startuml\nentity A {\n  id : int\n}\n@enduml\n@endchen";
        let code = normalize(raw, Dialect::EntityRelationship);

        assert_eq!(code, "@startchen\nentity A {\n  id : INTEGER\n}\n@endchen");
    }

    #[test]
    fn test_er_never_styled() {
        let code = normalize("@startchen\nentity A {\n}\n@endchen", Dialect::EntityRelationship);
        assert!(!code.contains("skinparam"));
    }

    #[test]
    fn test_normalize_is_idempotent_on_examples() {
        let samples = [
            ("@startuml\nA --> B --> C\nclass A {{\n+x:int+\n}}\n@enduml", Dialect::Class),
            ("prose @startuml\nA->B\nnote over of A: hi\n", Dialect::Sequence),
            ("@startuml\n:a;\nif(x)then(y)\n:b;\nend if\n@enduml", Dialect::Activity),
            ("@startuml\n[ A ]<--[ B ]\n@enduml", Dialect::Component),
            ("@startuml\nactor U\nU-->( Login )\nA <<include>> B\n@enduml", Dialect::UseCase),
            ("@startuml\nclass A {\n+id: int\n+get()\n}\nA \"1\" --> \"*\" B\n", Dialect::EntityRelationship),
        ];
        for (raw, dialect) in samples {
            let once = normalize(raw, dialect);
            assert_eq!(normalize(&once, dialect), once, "{dialect}: {raw:?}");
        }
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        // =====================================================================
        // Strategies
        // =====================================================================

        /// Delimiters, declarations and relationship lines.
        fn structural_line() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("@startuml".to_string()),
                Just("@enduml".to_string()),
                Just("@startchen".to_string()),
                Just("@endchen".to_string()),
                Just("skinparam monochrome true".to_string()),
                "[ \t]{0,2}(class|entity|participant|actor|usecase) [A-Za-z]{1,6}( \\{)?",
                "[A-Za-z]{1,5} ?(-->|--\\|>|--\\*|\\.\\.\\|>|<--|->|->>|--|o-|\\*--|<\\|--|<<include>>) ?[A-Za-z]{1,5}( ?: ?[a-z ]{0,8})?",
                "[A-Za-z]{1,5} \"(1|\\*|many)\" ?(-->|--|\\*--) ?\"(1|\\*|many)\" [A-Za-z]{1,5}",
            ]
        }

        /// Members, activities, labels, notes and noise.
        fn content_line() -> impl Strategy<Value = String> {
            prop_oneof![
                "[ \t]{0,2}[+#~-]? ?[a-z]{1,5} ?: ?(string|int|bool|double|Date|[A-Z][a-z]{0,4})\\+?",
                "[ \t]*: ?[a-z ]{0,8} ?;",
                "(if ?\\([a-z?]{0,5}\\) ?then ?\\(yes\\)|else ?\\(no\\)|end ?if|start|stop)",
                "\\[ ?[A-Za-z ]{1,6} ?\\]( ?as [A-Za-z]{1,4})?",
                "\\(\\(? ?[A-Za-z ]{1,6} ?\\)\\)?",
                "note (left|right|over) (of )?[A-Za-z]{1,4} ?: ?[a-z]{0,5}",
                "[{}() \t]{0,4}",
                "[a-z ]{0,12}",
            ]
        }

        /// Lines built from the fragments models actually produce.
        fn markup_line() -> impl Strategy<Value = String> {
            prop_oneof![structural_line(), content_line()]
        }

        fn markup() -> impl Strategy<Value = String> {
            prop::collection::vec(markup_line(), 0..14).prop_map(|lines| lines.join("\n"))
        }

        fn dialect() -> impl Strategy<Value = Dialect> {
            prop::sample::select(Dialect::ALL.to_vec())
        }

        // =====================================================================
        // Property Test Functions
        // =====================================================================

        fn check_idempotent(raw: &str, dialect: Dialect) -> Result<(), TestCaseError> {
            let once = normalize(raw, dialect);
            let twice = normalize(&once, dialect);
            prop_assert_eq!(twice, once);
            Ok(())
        }

        fn check_no_blank_lines(raw: &str, dialect: Dialect) -> Result<(), TestCaseError> {
            let code = normalize(raw, dialect);
            prop_assert!(code.lines().all(|line| !line.trim().is_empty()));
            prop_assert_eq!(code.trim(), code.as_str());
            Ok(())
        }

        fn check_er_has_no_styling(raw: &str) -> Result<(), TestCaseError> {
            let code = normalize(raw, Dialect::EntityRelationship);
            prop_assert!(!code.to_ascii_lowercase().contains("skinparam"));
            Ok(())
        }

        // =====================================================================
        // Proptest Wrappers
        // =====================================================================

        proptest! {
            #[test]
            fn normalize_is_idempotent(raw in markup(), dialect in dialect()) {
                check_idempotent(&raw, dialect)?;
            }

            #[test]
            fn normalize_is_idempotent_on_any_text(raw in "\\PC{0,80}", dialect in dialect()) {
                check_idempotent(&raw, dialect)?;
            }

            #[test]
            fn normalize_drops_blank_lines(raw in markup(), dialect in dialect()) {
                check_no_blank_lines(&raw, dialect)?;
            }

            #[test]
            fn normalize_never_styles_er(raw in markup()) {
                check_er_has_no_styling(&raw)?;
            }
        }
    }
}
