//! Violation codes for the umlscribe validation system.
//!
//! Codes are organized by the kind of rule that produced them:
//! - `E0xx` - Structural violations (delimiters, brackets, arrows)
//! - `E1xx` - Dialect violations (grammar rules of one dialect)
//! - `W0xx` - Advisories (never affect validity)

use std::fmt;

use serde::Serialize;

/// Codes identifying each kind of grammar violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationCode {
    // =========================================================================
    // Structural Violations (E0xx)
    // =========================================================================
    /// Empty input.
    ///
    /// The markup was empty or contained only whitespace.
    E001,

    /// Missing start tag.
    ///
    /// The markup does not open with the dialect's start tag, e.g. `@startuml`.
    E002,

    /// Missing end tag.
    ///
    /// The markup does not close with the dialect's end tag, e.g. `@enduml`.
    E003,

    /// Unbalanced brackets.
    ///
    /// The number of opening and closing brackets of one kind differ.
    E004,

    /// Doubled arrow.
    ///
    /// Two arrows follow each other, as in `A --> --> B`.
    E005,

    /// Invalid type annotation.
    ///
    /// A type is suffixed with `+`, as in `items : Item+`.
    E006,

    // =========================================================================
    // Dialect Violations (E1xx)
    // =========================================================================
    /// No class declarations.
    ///
    /// A class diagram must declare at least one class.
    E100,

    /// Legacy inheritance arrow.
    ///
    /// Inheritance is written `Parent <|-- Child`, never `Child --|> Parent`.
    E101,

    /// Legacy composition arrow.
    ///
    /// Composition is written `Whole *-- Part`, never `Part --* Whole`.
    E102,

    /// Legacy realization arrow.
    ///
    /// Realization is written `Interface <|.. Impl`, never `Impl ..|> Interface`.
    E103,

    /// Construct from another dialect.
    ///
    /// A declaration belongs to a different diagram type, such as a
    /// `participant` inside a class diagram.
    E104,

    /// No participants.
    ///
    /// A sequence diagram must declare at least one participant.
    E110,

    /// No messages.
    ///
    /// A sequence diagram must contain at least one message arrow.
    E111,

    /// No activities.
    ///
    /// An activity diagram needs start/stop markers or `:activity;` steps.
    E120,

    /// No components.
    ///
    /// A component diagram must declare at least one component.
    E130,

    /// No connections.
    ///
    /// A component diagram must connect its components with arrows.
    E131,

    /// No actors or use cases.
    ///
    /// A use-case diagram must declare at least one actor or use case.
    E140,

    /// UML delimiters in an ER diagram.
    ///
    /// Chen diagrams are bounded by `@startchen`/`@endchen` only.
    E150,

    /// No entities.
    ///
    /// An ER diagram must declare at least one `entity X {` block.
    E151,

    /// Styling directive in an ER diagram.
    ///
    /// Chen diagrams do not accept `skinparam` lines.
    E152,

    /// Class keyword in an ER diagram.
    ///
    /// Chen diagrams declare `entity` blocks, not `class` blocks.
    E153,

    /// Visibility sigil in an ER diagram.
    ///
    /// Attributes of Chen entities carry no `+`, `-`, `#` or `~` prefix.
    E154,

    /// Method in an ER diagram.
    ///
    /// Chen entities hold attributes only.
    E155,

    /// Inheritance arrow in an ER diagram.
    ///
    /// Chen diagrams connect entities through relationships with `-1-`/`-N-`.
    E156,

    // =========================================================================
    // Advisories (W0xx)
    // =========================================================================
    /// No relationships between classes.
    W001,

    /// No relationships between entities.
    W002,
}

/// The broad class a violation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationClass {
    /// Dialect-independent well-formedness: delimiters, brackets, arrows.
    Structural,
    /// A rule of one dialect's grammar.
    Dialect,
}

impl ViolationCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Structural violations
            ViolationCode::E001 => "E001",
            ViolationCode::E002 => "E002",
            ViolationCode::E003 => "E003",
            ViolationCode::E004 => "E004",
            ViolationCode::E005 => "E005",
            ViolationCode::E006 => "E006",
            // Dialect violations
            ViolationCode::E100 => "E100",
            ViolationCode::E101 => "E101",
            ViolationCode::E102 => "E102",
            ViolationCode::E103 => "E103",
            ViolationCode::E104 => "E104",
            ViolationCode::E110 => "E110",
            ViolationCode::E111 => "E111",
            ViolationCode::E120 => "E120",
            ViolationCode::E130 => "E130",
            ViolationCode::E131 => "E131",
            ViolationCode::E140 => "E140",
            ViolationCode::E150 => "E150",
            ViolationCode::E151 => "E151",
            ViolationCode::E152 => "E152",
            ViolationCode::E153 => "E153",
            ViolationCode::E154 => "E154",
            ViolationCode::E155 => "E155",
            ViolationCode::E156 => "E156",
            // Advisories
            ViolationCode::W001 => "W001",
            ViolationCode::W002 => "W002",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Structural violations
            ViolationCode::E001 => "empty input",
            ViolationCode::E002 => "missing start tag",
            ViolationCode::E003 => "missing end tag",
            ViolationCode::E004 => "unbalanced brackets",
            ViolationCode::E005 => "doubled arrow",
            ViolationCode::E006 => "invalid type annotation",
            // Dialect violations
            ViolationCode::E100 => "no class declarations",
            ViolationCode::E101 => "legacy inheritance arrow",
            ViolationCode::E102 => "legacy composition arrow",
            ViolationCode::E103 => "legacy realization arrow",
            ViolationCode::E104 => "construct from another dialect",
            ViolationCode::E110 => "no participants",
            ViolationCode::E111 => "no messages",
            ViolationCode::E120 => "no activities",
            ViolationCode::E130 => "no components",
            ViolationCode::E131 => "no connections",
            ViolationCode::E140 => "no actors or use cases",
            ViolationCode::E150 => "uml delimiters in er diagram",
            ViolationCode::E151 => "no entities",
            ViolationCode::E152 => "styling directive in er diagram",
            ViolationCode::E153 => "class keyword in er diagram",
            ViolationCode::E154 => "visibility sigil in er diagram",
            ViolationCode::E155 => "method in er diagram",
            ViolationCode::E156 => "inheritance arrow in er diagram",
            // Advisories
            ViolationCode::W001 => "no class relationships",
            ViolationCode::W002 => "no entity relationships",
        }
    }

    /// Returns the class of rule this code belongs to.
    pub fn class(&self) -> ViolationClass {
        match self {
            ViolationCode::E001
            | ViolationCode::E002
            | ViolationCode::E003
            | ViolationCode::E004
            | ViolationCode::E005
            | ViolationCode::E006 => ViolationClass::Structural,
            _ => ViolationClass::Dialect,
        }
    }

    /// Returns `true` for advisory codes.
    pub fn is_advisory(&self) -> bool {
        matches!(self, ViolationCode::W001 | ViolationCode::W002)
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ViolationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationClass::Structural => write!(f, "structural"),
            ViolationClass::Dialect => write!(f, "dialect"),
        }
    }
}
