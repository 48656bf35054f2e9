//! Per-dialect grammar rule tables.
//!
//! Each dialect owns a [`GrammarRules`] value made of three rule lists:
//!
//! - **required**: the pattern must match somewhere in the markup
//! - **forbidden**: the pattern must not match anywhere in the markup
//! - **advisory**: the pattern is expected; its absence is reported as a
//!   warning that never affects validity
//!
//! Patterns are regular expression sources. They are compiled once by the
//! validator, so this module stays free of any regex dependency.

use crate::{code::ViolationCode, dialect::Dialect};

/// A single grammar rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Code reported when the rule is broken.
    pub code: ViolationCode,
    /// Regular expression source.
    pub pattern: &'static str,
    /// Message reported when the rule is broken.
    pub message: &'static str,
    /// Suggested fix.
    pub help: &'static str,
}

/// The grammar of one dialect.
#[derive(Debug, Clone, Copy)]
pub struct GrammarRules {
    /// Constructs that must be present.
    pub required: &'static [Rule],
    /// Constructs that must be absent.
    pub forbidden: &'static [Rule],
    /// Constructs whose absence is worth a warning.
    pub advisory: &'static [Rule],
    /// Canonical relationship tokens, listed in repair prompts.
    pub relationship_tokens: &'static [&'static str],
}

const CLASS_BLOCK: &str = r"(?im)^[ \t]*(?:abstract[ \t]+)?class[ \t]+\w+[^\n]*\{";
const PARTICIPANT: &str = r"(?im)^[ \t]*participant\b";

const FOREIGN_CLASS_BLOCK: Rule = Rule {
    code: ViolationCode::E104,
    pattern: CLASS_BLOCK,
    message: "Class declarations do not belong in this diagram type",
    help: "remove the class block or switch to a class diagram",
};

const FOREIGN_PARTICIPANT: Rule = Rule {
    code: ViolationCode::E104,
    pattern: PARTICIPANT,
    message: "Participant declarations belong in sequence diagrams only",
    help: "remove the participant declaration",
};

static CLASS: GrammarRules = GrammarRules {
    required: &[Rule {
        code: ViolationCode::E100,
        pattern: r"(?im)^[ \t]*(?:abstract[ \t]+)?(?:class|interface|enum)[ \t]+\w+",
        message: "No class definitions found in class diagram",
        help: "declare classes with `class Name { ... }`",
    }],
    forbidden: &[
        Rule {
            code: ViolationCode::E101,
            pattern: r"--\|>",
            message: "Use <|-- for inheritance, not --|>",
            help: "write `Parent <|-- Child`",
        },
        Rule {
            code: ViolationCode::E102,
            pattern: r"--\*",
            message: "Use *-- for composition, not --*",
            help: "write `Whole *-- Part`",
        },
        Rule {
            code: ViolationCode::E103,
            pattern: r"\.\.\|>",
            message: "Use <|.. for realization, not ..|>",
            help: "write `Interface <|.. Implementation`",
        },
        FOREIGN_PARTICIPANT,
    ],
    advisory: &[Rule {
        code: ViolationCode::W001,
        pattern: r"<\|--|<\|\.\.|\*--|o--|-->|\.\.>|[ \t]--[ \t]",
        message: "No relationships between classes",
        help: "connect related classes with `<|--`, `*--`, `o--` or `-->`",
    }],
    relationship_tokens: &["<|--", "<|..", "*--", "o--", "-->", "..>", "--"],
};

static SEQUENCE: GrammarRules = GrammarRules {
    required: &[
        Rule {
            code: ViolationCode::E110,
            pattern: r"(?im)^[ \t]*(?:participant|actor|boundary|control|entity|database|collections|queue)[ \t]+\S+",
            message: "No participants found in sequence diagram",
            help: "declare participants with `participant Name`",
        },
        Rule {
            code: ViolationCode::E111,
            pattern: r"(?m)^[ \t]*\w+[ \t]*(?:-{1,2}>{1,2}|<-{1,2})[ \t]*\w+",
            message: "No messages found in sequence diagram",
            help: "send messages with `Sender -> Receiver : message`",
        },
    ],
    forbidden: &[FOREIGN_CLASS_BLOCK],
    advisory: &[],
    relationship_tokens: &["->", "-->", "->>"],
};

static ACTIVITY: GrammarRules = GrammarRules {
    required: &[Rule {
        code: ViolationCode::E120,
        pattern: r"(?im)^[ \t]*(?:start|stop|end)[ \t]*$|:[^;\n]+;",
        message: "No activities found in flowchart/activity diagram",
        help: "add `start`, `:activity;` steps and `stop`",
    }],
    forbidden: &[FOREIGN_CLASS_BLOCK, FOREIGN_PARTICIPANT],
    advisory: &[],
    relationship_tokens: &["->", "if (...) then (...)", "else (...)", "endif"],
};

static COMPONENT: GrammarRules = GrammarRules {
    required: &[
        Rule {
            code: ViolationCode::E130,
            pattern: r"(?im)\[[^\]\n]+\]|^[ \t]*(?:component|interface)[ \t]+\S+",
            message: "No components found in component diagram",
            help: "declare components with `[Name] as Alias`",
        },
        Rule {
            code: ViolationCode::E131,
            pattern: r"-+>|<-+|\.+>|<\.+|\S[ \t]+--[ \t]+\S",
            message: "No connections found in component diagram",
            help: "connect components with `A --> B : label`",
        },
    ],
    forbidden: &[FOREIGN_CLASS_BLOCK, FOREIGN_PARTICIPANT],
    advisory: &[],
    relationship_tokens: &["-->", "..>", "--"],
};

static USE_CASE: GrammarRules = GrammarRules {
    required: &[Rule {
        code: ViolationCode::E140,
        pattern: r"(?im)^[ \t]*(?:actor|usecase)[ \t]+\S+|\([^()\n]+\)",
        message: "No actors or use cases found in use case diagram",
        help: "declare `actor Name` and `(Use Case)` elements",
    }],
    forbidden: &[FOREIGN_CLASS_BLOCK, FOREIGN_PARTICIPANT],
    advisory: &[],
    relationship_tokens: &["-->", "..> : <<include>>", "..> : <<extend>>", "<|--"],
};

static ENTITY_RELATIONSHIP: GrammarRules = GrammarRules {
    required: &[Rule {
        code: ViolationCode::E151,
        pattern: r"(?im)^[ \t]*entity[ \t]+\w+[ \t]*\{",
        message: "No entities found in ER diagram",
        help: "declare entities with `entity NAME { attribute : TYPE }`",
    }],
    forbidden: &[
        Rule {
            code: ViolationCode::E150,
            pattern: r"(?im)^[ \t]*@(?:start|end)uml\b",
            message: "ER Diagrams must use @startchen/@endchen format",
            help: "replace `@startuml`/`@enduml` with `@startchen`/`@endchen`",
        },
        Rule {
            code: ViolationCode::E152,
            pattern: r"(?im)^[ \t]*skinparam\b",
            message: "ER diagrams do not support skinparam directives",
            help: "remove the skinparam line",
        },
        Rule {
            code: ViolationCode::E153,
            pattern: r"(?im)^[ \t]*class[ \t]+\w+",
            message: "Use entity instead of class in ER diagrams",
            help: "write `entity NAME {`",
        },
        Rule {
            code: ViolationCode::E154,
            pattern: r"(?m)^[ \t]*[+\-#~][ \t]*\w+",
            message: "ER attributes must not carry visibility markers",
            help: "write attributes as `name : TYPE`",
        },
        Rule {
            code: ViolationCode::E155,
            pattern: r"(?m)^[ \t]*[+\-#~]?[ \t]*\w+[ \t]*\([^)\n]*\)",
            message: "ER entities must not declare methods",
            help: "keep only attributes inside entity blocks",
        },
        Rule {
            code: ViolationCode::E156,
            pattern: r"<\|--|--\|>|<\|\.\.|\.\.\|>",
            message: "ER diagrams do not support inheritance arrows",
            help: "connect entities through a relationship with `-1-` or `-N-`",
        },
    ],
    advisory: &[Rule {
        code: ViolationCode::W002,
        pattern: r"-[1N]-",
        message: "No relationships between entities",
        help: "declare `relationship NAME {}` and connect it with `-1-`/`-N-`",
    }],
    relationship_tokens: &["-1-", "-N-"],
};

/// Returns the grammar rules of a dialect.
pub fn rules(dialect: Dialect) -> &'static GrammarRules {
    match dialect {
        Dialect::Class => &CLASS,
        Dialect::Sequence => &SEQUENCE,
        Dialect::Activity => &ACTIVITY,
        Dialect::Component => &COMPONENT,
        Dialect::UseCase => &USE_CASE,
        Dialect::EntityRelationship => &ENTITY_RELATIONSHIP,
    }
}
