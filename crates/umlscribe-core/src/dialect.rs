//! Diagram dialects and their delimiter tags.
//!
//! A [`Dialect`] selects which normalization rules, validation rules and
//! fallback template apply to a piece of markup. Dialects are chosen by an
//! upstream classifier and never change while a request is processed.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The diagram grammars supported by umlscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// UML class diagram.
    Class,
    /// UML sequence diagram.
    Sequence,
    /// Activity diagram, also used for flowcharts.
    Activity,
    /// UML component diagram.
    Component,
    /// UML use-case diagram.
    UseCase,
    /// Entity-relationship diagram in Chen notation.
    EntityRelationship,
}

/// Start and end tags bounding a markup block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    start: &'static str,
    end: &'static str,
}

impl Delimiters {
    /// Delimiters shared by every UML dialect.
    pub const UML: Delimiters = Delimiters {
        start: "@startuml",
        end: "@enduml",
    };

    /// Delimiters of Chen entity-relationship diagrams.
    pub const CHEN: Delimiters = Delimiters {
        start: "@startchen",
        end: "@endchen",
    };

    /// Returns the start tag, e.g. `@startuml`.
    pub fn start(&self) -> &'static str {
        self.start
    }

    /// Returns the end tag, e.g. `@enduml`.
    pub fn end(&self) -> &'static str {
        self.end
    }
}

/// Error returned when a label does not name a known dialect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown diagram type `{0}`")]
pub struct UnknownDialect(pub String);

impl Dialect {
    /// Every dialect, in declaration order.
    pub const ALL: [Dialect; 6] = [
        Dialect::Class,
        Dialect::Sequence,
        Dialect::Activity,
        Dialect::Component,
        Dialect::UseCase,
        Dialect::EntityRelationship,
    ];

    /// Returns the delimiter tags this dialect's markup must use.
    pub fn delimiters(self) -> Delimiters {
        match self {
            Dialect::EntityRelationship => Delimiters::CHEN,
            _ => Delimiters::UML,
        }
    }

    /// Returns `true` if the dialect's grammar accepts `skinparam` styling.
    pub fn supports_styling(self) -> bool {
        !matches!(self, Dialect::EntityRelationship)
    }

    /// Returns the canonical human-readable name used in prompts and reports.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Class => "Class Diagram",
            Dialect::Sequence => "Sequence Diagram",
            Dialect::Activity => "Flowchart Diagram",
            Dialect::Component => "Component Diagram",
            Dialect::UseCase => "Usecase Diagram",
            Dialect::EntityRelationship => "ER Diagram",
        }
    }

    /// Returns a short identifier suitable for command lines and file names.
    pub fn slug(self) -> &'static str {
        match self {
            Dialect::Class => "class",
            Dialect::Sequence => "sequence",
            Dialect::Activity => "activity",
            Dialect::Component => "component",
            Dialect::UseCase => "usecase",
            Dialect::EntityRelationship => "er",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    /// Parses the loose labels produced by classifiers and users.
    ///
    /// Matching ignores case, a leading `UML`, a trailing `diagram`, and
    /// separators, so `"UML Class Diagram"`, `"class"` and `"Class-Diagram"`
    /// all name [`Dialect::Class`].
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let mut key: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if let Some(rest) = key.strip_prefix("uml") {
            key = rest.to_string();
        }
        if let Some(rest) = key.strip_suffix("diagram") {
            key = rest.to_string();
        }

        match key.as_str() {
            "class" => Ok(Dialect::Class),
            "sequence" => Ok(Dialect::Sequence),
            "activity" | "flowchart" | "flow" => Ok(Dialect::Activity),
            "component" => Ok(Dialect::Component),
            "usecase" => Ok(Dialect::UseCase),
            "er" | "erd" | "entityrelationship" | "chen" => Ok(Dialect::EntityRelationship),
            _ => Err(UnknownDialect(label.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifier_labels() {
        assert_eq!("UML Class Diagram".parse(), Ok(Dialect::Class));
        assert_eq!("UML Sequence Diagram".parse(), Ok(Dialect::Sequence));
        assert_eq!("Flowchart".parse(), Ok(Dialect::Activity));
        assert_eq!("Activity Diagram".parse(), Ok(Dialect::Activity));
        assert_eq!("Component Diagram".parse(), Ok(Dialect::Component));
        assert_eq!("Use Case Diagram".parse(), Ok(Dialect::UseCase));
        assert_eq!("Usecase Diagram".parse(), Ok(Dialect::UseCase));
        assert_eq!("ER Diagram".parse(), Ok(Dialect::EntityRelationship));
    }

    #[test]
    fn test_parse_short_labels() {
        assert_eq!("class".parse(), Ok(Dialect::Class));
        assert_eq!("ERD".parse(), Ok(Dialect::EntityRelationship));
        assert_eq!("use-case".parse(), Ok(Dialect::UseCase));
    }

    #[test]
    fn test_parse_slug_and_name_agree() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.slug().parse(), Ok(dialect));
            assert_eq!(dialect.name().parse(), Ok(dialect));
        }
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = "Gantt Chart".parse::<Dialect>().unwrap_err();
        assert_eq!(err.to_string(), "unknown diagram type `Gantt Chart`");
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(Dialect::Class.delimiters(), Delimiters::UML);
        assert_eq!(Dialect::EntityRelationship.delimiters().start(), "@startchen");
        assert_eq!(Dialect::EntityRelationship.delimiters().end(), "@endchen");
    }

    #[test]
    fn test_styling_support() {
        assert!(Dialect::Sequence.supports_styling());
        assert!(!Dialect::EntityRelationship.supports_styling());
    }
}
