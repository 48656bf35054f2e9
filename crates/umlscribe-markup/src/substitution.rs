//! Ordered substitution tables used by the normalizer.
//!
//! Every entry is a named `(pattern, replacement, rationale)` rule. Tables
//! apply top to bottom, so a later rule sees the output of an earlier one.
//! Intra-line rules match `[ \t]` rather than `\s` so they never join lines.

use once_cell::sync::Lazy;
use regex::Regex;
use umlscribe_core::Dialect;

/// A regex substitution with a name and the reason it exists.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub rationale: &'static str,
}

/// A compiled substitution table.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<(SubstitutionRule, Regex)>,
}

impl RuleSet {
    fn compile(table: &[SubstitutionRule]) -> Self {
        let rules = table
            .iter()
            .map(|rule| {
                let regex = Regex::new(rule.pattern)
                    .unwrap_or_else(|err| panic!("invalid rule `{}`: {err}", rule.name));
                (*rule, regex)
            })
            .collect();
        Self { rules }
    }

    /// Apply every rule in order.
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, (rule, regex)| {
                regex.replace_all(&acc, rule.replacement).into_owned()
            })
    }

    /// Get the names of the rules in this set, in application order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|(rule, _)| rule.name)
    }
}

const COMMON: &[SubstitutionRule] = &[
    SubstitutionRule {
        name: "type_plus_annotation",
        pattern: r":[ \t]*(\w+)\+",
        replacement: ": ${1}",
        rationale: "`Type+` is not a valid type",
    },
    SubstitutionRule {
        name: "chained_arrows",
        pattern: r"-->(?:[ \t]*\w+[ \t]*-->)+",
        replacement: "-->",
        rationale: "an arrow connects exactly two endpoints",
    },
    SubstitutionRule {
        name: "doubled_arrows",
        pattern: r"-->(?:[ \t]*-->)+",
        replacement: "-->",
        rationale: "`--> -->` is not an arrow",
    },
    SubstitutionRule {
        name: "doubled_open_brace",
        pattern: r"\{(?:[ \t]*\{)+",
        replacement: "{",
        rationale: "blocks open with a single brace",
    },
    SubstitutionRule {
        name: "doubled_close_brace",
        pattern: r"\}(?:[ \t]*\})+",
        replacement: "}",
        rationale: "blocks close with a single brace",
    },
    SubstitutionRule {
        name: "doubled_parentheses",
        pattern: r"\(\(([^()\n]*)\)\)",
        replacement: "(${1})",
        rationale: "labels are wrapped in one pair of parentheses",
    },
    SubstitutionRule {
        name: "doubled_brackets",
        pattern: r"\[\[([^\[\]\n]*)\]\]",
        replacement: "[${1}]",
        rationale: "labels are wrapped in one pair of brackets",
    },
];

const CLASS: &[SubstitutionRule] = &[
    SubstitutionRule {
        name: "method_spacing",
        pattern: r"(?m)^([ \t]*)([+\-#~])[ \t]*(\w+)[ \t]*\(([^)\n]*)\)[ \t]*:[ \t]*(\w+)",
        replacement: "${1}${2}${3}(${4}) : ${5}",
        rationale: "members read `+name(args) : Type`",
    },
    SubstitutionRule {
        name: "attribute_spacing",
        pattern: r"(?m)^([ \t]*)([+\-#~])[ \t]*(\w+)[ \t]*:[ \t]*(\w+)",
        replacement: "${1}${2}${3} : ${4}",
        rationale: "attributes read `+name : Type`",
    },
    SubstitutionRule {
        name: "string_type",
        pattern: r":[ \t]*(?:string|str)\b",
        replacement: ": String",
        rationale: "primitive type names are capitalized",
    },
    SubstitutionRule {
        name: "integer_type",
        pattern: r":[ \t]*(?:integer|int)\b",
        replacement: ": Integer",
        rationale: "primitive type names are capitalized",
    },
    SubstitutionRule {
        name: "boolean_type",
        pattern: r":[ \t]*(?:boolean|bool)\b",
        replacement: ": Boolean",
        rationale: "primitive type names are capitalized",
    },
    SubstitutionRule {
        name: "double_type",
        pattern: r":[ \t]*(?:float|double)\b",
        replacement: ": Double",
        rationale: "primitive type names are capitalized",
    },
    SubstitutionRule {
        name: "legacy_inheritance",
        pattern: r#"("[^"\n]+"|\w+)(?:[ \t]+("[^"\n]*"))?[ \t]*--\|>[ \t]*(?:("[^"\n]*")[ \t]+)?("[^"\n]+"|\w+)"#,
        replacement: "${4} ${3} <|-- ${2} ${1}",
        rationale: "inheritance points from parent to child as `Parent <|-- Child`",
    },
    SubstitutionRule {
        name: "short_inheritance",
        pattern: r#"("[^"\n]+"|\w+)(?:[ \t]+("[^"\n]*"))?[ \t]*-\|>[ \t]*(?:("[^"\n]*")[ \t]+)?("[^"\n]+"|\w+)"#,
        replacement: "${4} ${3} <|-- ${2} ${1}",
        rationale: "inheritance points from parent to child as `Parent <|-- Child`",
    },
    SubstitutionRule {
        name: "legacy_realization",
        pattern: r#"("[^"\n]+"|\w+)(?:[ \t]+("[^"\n]*"))?[ \t]*\.\.\|>[ \t]*(?:("[^"\n]*")[ \t]+)?("[^"\n]+"|\w+)"#,
        replacement: "${4} ${3} <|.. ${2} ${1}",
        rationale: "realization reads `Interface <|.. Impl`",
    },
    SubstitutionRule {
        name: "short_realization",
        pattern: r"(\w+)[ \t]*<\|\.[ \t]*(\w+)",
        replacement: "${1} <|.. ${2}",
        rationale: "the realization arrow has two dots",
    },
    SubstitutionRule {
        name: "legacy_composition",
        pattern: r#"("[^"\n]+"|\w+)(?:[ \t]+("[^"\n]*"))?[ \t]*--\*[ \t]*(?:("[^"\n]*")[ \t]+)?("[^"\n]+"|\w+)"#,
        replacement: "${4} ${3} *-- ${2} ${1}",
        rationale: "composition reads `Whole *-- Part`",
    },
    SubstitutionRule {
        name: "legacy_aggregation",
        pattern: r#"("[^"\n]+"|\w+)(?:[ \t]+("[^"\n]*"))?[ \t]*--o[ \t]+(?:("[^"\n]*")[ \t]+)?("[^"\n]+"|\w+)"#,
        replacement: "${4} ${3} o-- ${2} ${1}",
        rationale: "aggregation reads `Whole o-- Part`",
    },
    SubstitutionRule {
        name: "short_aggregation",
        pattern: r"(\w+)[ \t]+o-[ \t]*(\w+)",
        replacement: "${1} o-- ${2}",
        rationale: "the aggregation arrow has two dashes",
    },
    SubstitutionRule {
        name: "reversed_dependency",
        pattern: r#"("[^"\n]+"|\w+)(?:[ \t]+("[^"\n]*"))?[ \t]*<--[ \t]*(?:("[^"\n]*")[ \t]+)?("[^"\n]+"|\w+)"#,
        replacement: "${4} ${3} --> ${2} ${1}",
        rationale: "dependencies point forward",
    },
    SubstitutionRule {
        name: "relationship_spacing",
        pattern: r#"(\w|")[ \t]*(<\|--|<\|\.\.|\*--|o--|-->|\.\.>)[ \t]*(\w|")"#,
        replacement: "${1} ${2} ${3}",
        rationale: "relationships read `A <arrow> B`",
    },
    SubstitutionRule {
        name: "two_sided_cardinality",
        pattern: r#"(\w+)[ \t]+"([^"\n]+)"[ \t]*(<\|--|\*--|o--|-->|\.\.>|--)[ \t]*"([^"\n]+)"[ \t]*(\w+)"#,
        replacement: r#"${1} "${2}" ${3} "${4}" ${5}"#,
        rationale: "cardinalities are quoted and spaced",
    },
    SubstitutionRule {
        name: "left_cardinality",
        pattern: r#"(\w+)[ \t]+"([^"\n]+)"[ \t]*(<\|--|\*--|o--|-->|\.\.>|--)[ \t]*(\w+)"#,
        replacement: r#"${1} "${2}" ${3} ${4}"#,
        rationale: "cardinalities are quoted and spaced",
    },
    SubstitutionRule {
        name: "right_cardinality",
        pattern: r#"(\w+)[ \t]*(<\|--|\*--|o--|-->|\.\.>|--)[ \t]*"([^"\n]+)"[ \t]*(\w+)"#,
        replacement: r#"${1} ${2} "${3}" ${4}"#,
        rationale: "cardinalities are quoted and spaced",
    },
];

const SEQUENCE: &[SubstitutionRule] = &[
    SubstitutionRule {
        name: "quoted_participant_alias",
        pattern: r#"(?m)^([ \t]*)(participant|actor|boundary|control|entity|database|collections|queue)[ \t]+"([^"\n]+)"[ \t]+as[ \t]+(\w+)"#,
        replacement: r#"${1}${2} "${3}" as ${4}"#,
        rationale: "participant aliases read `participant \"Name\" as Alias`",
    },
    SubstitutionRule {
        name: "participant_spacing",
        pattern: r"(?m)^([ \t]*)(participant|actor|boundary|control|entity|database|collections|queue)[ \t]+(\w+)",
        replacement: "${1}${2} ${3}",
        rationale: "one space separates the keyword and the name",
    },
    SubstitutionRule {
        name: "labeled_message_spacing",
        pattern: r"(?m)^([ \t]*)(\w+)[ \t]*(->>|-->|->|<--|<-)[ \t]*(\w+)[ \t]*:[ \t]*",
        replacement: "${1}${2} ${3} ${4} : ",
        rationale: "messages read `A -> B : text`",
    },
    SubstitutionRule {
        name: "message_spacing",
        pattern: r"(?m)^([ \t]*)(\w+)[ \t]*(->>|-->|->|<--|<-)[ \t]*(\w+)[ \t]*$",
        replacement: "${1}${2} ${3} ${4}",
        rationale: "messages read `A -> B`",
    },
    SubstitutionRule {
        name: "side_note",
        pattern: r"(?m)^([ \t]*)note[ \t]+(left|right)[ \t]+(?:of[ \t]+)?(\w+)[ \t]*:[ \t]*",
        replacement: "${1}note ${2} of ${3} : ",
        rationale: "side notes read `note left of X : text`",
    },
    SubstitutionRule {
        name: "over_note",
        pattern: r"(?m)^([ \t]*)note[ \t]+over[ \t]+(?:of[ \t]+)?(\w+(?:[ \t]*,[ \t]*\w+)*)[ \t]*:[ \t]*",
        replacement: "${1}note over ${2} : ",
        rationale: "`note over` never takes `of`",
    },
];

const ACTIVITY: &[SubstitutionRule] = &[
    SubstitutionRule {
        name: "activity_label_trim",
        pattern: r"(?m)^([ \t]*):[ \t]*([^;\n]*?)[ \t]*;",
        replacement: "${1}:${2};",
        rationale: "activity labels carry no padding",
    },
    SubstitutionRule {
        name: "if_then_spacing",
        pattern: r"(?m)^([ \t]*)if[ \t]*\(([^)\n]*)\)[ \t]*then[ \t]*\(([^)\n]*)\)",
        replacement: "${1}if (${2}) then (${3})",
        rationale: "conditions read `if (test) then (yes)`",
    },
    SubstitutionRule {
        name: "else_spacing",
        pattern: r"(?m)^([ \t]*)else[ \t]*\(([^)\n]*)\)",
        replacement: "${1}else (${2})",
        rationale: "alternatives read `else (no)`",
    },
    SubstitutionRule {
        name: "endif_spelling",
        pattern: r"(?m)^([ \t]*)end[ \t]+if\b",
        replacement: "${1}endif",
        rationale: "conditions close with `endif`",
    },
];

const COMPONENT: &[SubstitutionRule] = &[
    SubstitutionRule {
        name: "bracket_label_trim",
        pattern: r"\[[ \t]*([^\]\n]*?)[ \t]*\]",
        replacement: "[${1}]",
        rationale: "component labels carry no padding",
    },
    SubstitutionRule {
        name: "bracket_alias_spacing",
        pattern: r"\][ \t]*as[ \t]+(\w+)",
        replacement: "] as ${1}",
        rationale: "aliases read `[Name] as Alias`",
    },
    SubstitutionRule {
        name: "keyword_alias_spacing",
        pattern: r#"(?m)^([ \t]*)(component|interface)[ \t]+("[^"\n]+"|\w+)[ \t]+as[ \t]+(\w+)"#,
        replacement: "${1}${2} ${3} as ${4}",
        rationale: "aliases read `component Name as Alias`",
    },
    SubstitutionRule {
        name: "reversed_connection",
        pattern: r"(\w+|\[[^\]\n]+\])[ \t]*<--[ \t]*(\w+|\[[^\]\n]+\])",
        replacement: "${2} --> ${1}",
        rationale: "connections point forward",
    },
    SubstitutionRule {
        name: "reversed_dotted_connection",
        pattern: r"(\w+|\[[^\]\n]+\])[ \t]*<\.\.[ \t]*(\w+|\[[^\]\n]+\])",
        replacement: "${2} ..> ${1}",
        rationale: "connections point forward",
    },
    SubstitutionRule {
        name: "connection_spacing",
        pattern: r"(\w|\])[ \t]*(-->|\.\.>|--|->)[ \t]*(\w|\[)",
        replacement: "${1} ${2} ${3}",
        rationale: "connections read `A --> B`",
    },
];

const USE_CASE: &[SubstitutionRule] = &[
    SubstitutionRule {
        name: "element_alias_spacing",
        pattern: r#"(?m)^([ \t]*)(actor|usecase)[ \t]+("[^"\n]+"|\w+)[ \t]+as[ \t]+(\w+)"#,
        replacement: "${1}${2} ${3} as ${4}",
        rationale: "aliases read `actor \"Name\" as Alias`",
    },
    SubstitutionRule {
        name: "use_case_trim",
        pattern: r"\([ \t]*([^()\n]*?)[ \t]*\)",
        replacement: "(${1})",
        rationale: "use-case labels carry no padding",
    },
    SubstitutionRule {
        name: "use_case_alias_spacing",
        pattern: r"\)[ \t]*as[ \t]+(\w+)",
        replacement: ") as ${1}",
        rationale: "aliases read `(Use Case) as Alias`",
    },
    SubstitutionRule {
        name: "stereotype_relation",
        pattern: r"(?m)^([ \t]*)(\w+)[ \t]*(?:-+>|\.+>)?[ \t]*<<[ \t]*(include|extend)[ \t]*>>[ \t]*(?:-+>|\.+>)?[ \t]*(\w+)[ \t]*$",
        replacement: "${1}${2} ..> ${4} : <<${3}>>",
        rationale: "include/extend are dotted arrows with a stereotype label",
    },
    SubstitutionRule {
        name: "labeled_stereotype_relation",
        pattern: r"(?m)^([ \t]*)(\w+)[ \t]*(?:-+>|\.+>)[ \t]*(\w+)[ \t]*:[ \t]*<{0,2}[ \t]*(include|extend)[ \t]*>{0,2}[ \t]*$",
        replacement: "${1}${2} ..> ${3} : <<${4}>>",
        rationale: "include/extend are dotted arrows with a stereotype label",
    },
    SubstitutionRule {
        name: "association_spacing",
        pattern: r"(\w|\))[ \t]*(-->|\.\.>|--|->)[ \t]*(\w|\()",
        replacement: "${1} ${2} ${3}",
        rationale: "associations read `Actor --> (Use Case)`",
    },
];

const ENTITY_RELATIONSHIP: &[SubstitutionRule] = &[
    SubstitutionRule {
        name: "uml_delimiter_lines",
        pattern: r"(?im)^[ \t]*@(?:start|end)uml\b[^\n]*(?:\n|$)",
        replacement: "",
        rationale: "Chen diagrams are bounded by Chen tags only",
    },
    SubstitutionRule {
        name: "skinparam_lines",
        pattern: r"(?im)^[ \t]*skinparam\b[^\n]*(?:\n|$)",
        replacement: "",
        rationale: "Chen diagrams accept no styling directives",
    },
    SubstitutionRule {
        name: "class_to_entity",
        pattern: r"(?im)^([ \t]*)class[ \t]+(\w+)",
        replacement: "${1}entity ${2}",
        rationale: "Chen diagrams declare entities",
    },
    SubstitutionRule {
        name: "block_spacing",
        pattern: r"(?m)^([ \t]*)(entity|relationship)[ \t]+(\w+)[ \t]*\{",
        replacement: "${1}${2} ${3} {",
        rationale: "blocks read `entity NAME {`",
    },
    SubstitutionRule {
        name: "method_lines",
        pattern: r"(?m)^[ \t]*[+\-#~]?[ \t]*\w+[ \t]*\([^)\n]*\)[^\n]*(?:\n|$)",
        replacement: "",
        rationale: "entities hold attributes only",
    },
    SubstitutionRule {
        name: "visibility_sigils",
        pattern: r"(?m)^([ \t]*)[+\-#~][ \t]*(\w)",
        replacement: "${1}${2}",
        rationale: "attributes carry no visibility",
    },
    SubstitutionRule {
        name: "attribute_spacing",
        pattern: r"(?m)^([ \t]*)(\w+)[ \t]*:[ \t]*(\w+)",
        replacement: "${1}${2} : ${3}",
        rationale: "attributes read `name : TYPE`",
    },
    SubstitutionRule {
        name: "string_type",
        pattern: r"(?i):[ \t]*(?:string|str|varchar|text)\b",
        replacement: ": STRING",
        rationale: "attribute types are upper-case",
    },
    SubstitutionRule {
        name: "integer_type",
        pattern: r"(?i):[ \t]*(?:integer|int|long|bigint)\b",
        replacement: ": INTEGER",
        rationale: "attribute types are upper-case",
    },
    SubstitutionRule {
        name: "boolean_type",
        pattern: r"(?i):[ \t]*(?:boolean|bool)\b",
        replacement: ": BOOLEAN",
        rationale: "attribute types are upper-case",
    },
    SubstitutionRule {
        name: "decimal_type",
        pattern: r"(?i):[ \t]*(?:decimal|float|double|number|money)\b",
        replacement: ": DECIMAL",
        rationale: "attribute types are upper-case",
    },
    SubstitutionRule {
        name: "datetime_type",
        pattern: r"(?i):[ \t]*(?:datetime|timestamp)\b",
        replacement: ": DATETIME",
        rationale: "attribute types are upper-case",
    },
    SubstitutionRule {
        name: "date_type",
        pattern: r"(?i):[ \t]*date\b",
        replacement: ": DATE",
        rationale: "attribute types are upper-case",
    },
    SubstitutionRule {
        name: "many_cardinality",
        pattern: r#"(\w+)[ \t]+"[^"\n]*"[ \t]*(?:<\|--|-->|<--|\.\.>|\*--|o--|--|-[1N]-)[ \t]*"(?:\*|[nN]|many|[0-9]+\.\.\*|[0-9]+\.\.[nN])"[ \t]*(\w+)"#,
        replacement: "${1} -N- ${2}",
        rationale: "Chen cardinality is `-N-` for many",
    },
    SubstitutionRule {
        name: "single_cardinality",
        pattern: r#"(\w+)[ \t]+"[^"\n]*"[ \t]*(?:<\|--|-->|<--|\.\.>|\*--|o--|--|-[1N]-)[ \t]*"[^"\n]*"[ \t]*(\w+)"#,
        replacement: "${1} -1- ${2}",
        rationale: "Chen cardinality is `-1-` for one",
    },
    SubstitutionRule {
        name: "association_arrows",
        pattern: r"(\w+)[ \t]*(?:-->|<--|\.\.>|\*--|o--)[ \t]*(\w+)",
        replacement: "${1} -N- ${2}",
        rationale: "directed associations become one-to-many links",
    },
    SubstitutionRule {
        name: "plain_arrows",
        pattern: r"(\w+)[ \t]*(?:<\|--|--\|>|<\|\.\.|\.\.\|>|--)[ \t]*(\w+)",
        replacement: "${1} -1- ${2}",
        rationale: "other links become one-to-one links",
    },
    SubstitutionRule {
        name: "chen_link_spacing",
        pattern: r"(\w+)[ \t]*-([1N])-[ \t]*(\w+)",
        replacement: "${1} -${2}- ${3}",
        rationale: "links read `A -1- B`",
    },
];

static COMMON_SET: Lazy<RuleSet> = Lazy::new(|| RuleSet::compile(COMMON));
static CLASS_SET: Lazy<RuleSet> = Lazy::new(|| RuleSet::compile(CLASS));
static SEQUENCE_SET: Lazy<RuleSet> = Lazy::new(|| RuleSet::compile(SEQUENCE));
static ACTIVITY_SET: Lazy<RuleSet> = Lazy::new(|| RuleSet::compile(ACTIVITY));
static COMPONENT_SET: Lazy<RuleSet> = Lazy::new(|| RuleSet::compile(COMPONENT));
static USE_CASE_SET: Lazy<RuleSet> = Lazy::new(|| RuleSet::compile(USE_CASE));
static ENTITY_RELATIONSHIP_SET: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::compile(ENTITY_RELATIONSHIP));

/// Rules applied to every dialect.
pub fn common() -> &'static RuleSet {
    &COMMON_SET
}

/// Rules specific to one dialect.
pub fn for_dialect(dialect: Dialect) -> &'static RuleSet {
    match dialect {
        Dialect::Class => &CLASS_SET,
        Dialect::Sequence => &SEQUENCE_SET,
        Dialect::Activity => &ACTIVITY_SET,
        Dialect::Component => &COMPONENT_SET,
        Dialect::UseCase => &USE_CASE_SET,
        Dialect::EntityRelationship => &ENTITY_RELATIONSHIP_SET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_compile() {
        assert!(common().names().count() > 0);
        for dialect in Dialect::ALL {
            assert!(for_dialect(dialect).names().count() > 0, "{dialect}");
        }
    }

    #[test]
    fn test_rule_names_unique_per_table() {
        for table in [
            COMMON,
            CLASS,
            SEQUENCE,
            ACTIVITY,
            COMPONENT,
            USE_CASE,
            ENTITY_RELATIONSHIP,
        ] {
            let mut names: Vec<_> = table.iter().map(|rule| rule.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), table.len());
        }
    }

    #[test]
    fn test_common_rules() {
        let set = common();
        assert_eq!(set.apply("items :Item+"), "items : Item");
        assert_eq!(set.apply("A --> B --> C"), "A --> C");
        assert_eq!(set.apply("A --> --> B"), "A --> B");
        assert_eq!(set.apply("class A { {"), "class A {");
        assert_eq!(set.apply("}}"), "}");
        assert_eq!(set.apply("((Login))"), "(Login)");
        assert_eq!(set.apply("[[Web]]"), "[Web]");
    }

    #[test]
    fn test_class_relationship_rewrites() {
        let set = for_dialect(Dialect::Class);
        assert_eq!(set.apply("Dog --|> Animal"), "Animal <|-- Dog");
        assert_eq!(set.apply("Dog -|> Animal"), "Animal <|-- Dog");
        assert_eq!(set.apply("Impl ..|> Api"), "Api <|.. Impl");
        assert_eq!(set.apply("Api <|. Impl"), "Api <|.. Impl");
        assert_eq!(set.apply("Wheel --* Car"), "Car *-- Wheel");
        assert_eq!(set.apply("Player --o Team"), "Team o-- Player");
        assert_eq!(set.apply("Team o- Player"), "Team o-- Player");
        assert_eq!(set.apply("A <-- B"), "B --> A");
        assert_eq!(set.apply("A*--B"), "A *-- B");
    }

    #[test]
    fn test_class_relationship_rewrites_keep_quoted_names_and_cardinalities() {
        let set = for_dialect(Dialect::Class);
        let cases = [
            (r#""Order Item" --|> Base"#, r#"Base <|-- "Order Item""#),
            (r#"Dog -|> "Base Animal""#, r#""Base Animal" <|-- Dog"#),
            (r#""Sql Repo" ..|> "Repo Api""#, r#""Repo Api" <|.. "Sql Repo""#),
            (r#"Wheel "4" --* "1" Car"#, r#"Car "1" *-- "4" Wheel"#),
            (r#"Wheel "4" --* Car"#, r#"Car *-- "4" Wheel"#),
            (r#"Wheel --* "1" Car"#, r#"Car "1" *-- Wheel"#),
            (r#"Player "*" --o "1" Team"#, r#"Team "1" o-- "*" Player"#),
            (r#"Order "1" <-- "*" Customer"#, r#"Customer "*" --> "1" Order"#),
        ];

        for (input, expected) in cases {
            assert_eq!(set.apply(input), expected, "rewriting `{input}`");
        }
    }

    #[test]
    fn test_class_member_rewrites() {
        let set = for_dialect(Dialect::Class);
        assert_eq!(set.apply("  +name:string"), "  +name : String");
        assert_eq!(set.apply("  -count :int"), "  -count : Integer");
        assert_eq!(set.apply("  #active: bool"), "  #active : Boolean");
        assert_eq!(set.apply("  ~ratio : float"), "  ~ratio : Double");
        assert_eq!(set.apply("  + getName( ) :string"), "  +getName( ) : String");
    }

    #[test]
    fn test_class_cardinality_spacing() {
        let set = for_dialect(Dialect::Class);
        assert_eq!(
            set.apply(r#"Order "1"*--"many" Item"#),
            r#"Order "1" *-- "many" Item"#
        );
    }

    #[test]
    fn test_sequence_rewrites() {
        let set = for_dialect(Dialect::Sequence);
        assert_eq!(set.apply("participant   Api"), "participant Api");
        assert_eq!(set.apply("User->Api:login"), "User -> Api : login");
        assert_eq!(set.apply("Api-->User"), "Api --> User");
        assert_eq!(set.apply("note left Api: cached"), "note left of Api : cached");
        assert_eq!(set.apply("note over of Api: busy"), "note over Api : busy");
        assert_eq!(set.apply("note over Api,Db: busy"), "note over Api,Db : busy");
    }

    #[test]
    fn test_activity_rewrites() {
        let set = for_dialect(Dialect::Activity);
        assert_eq!(set.apply(":  Load data ;"), ":Load data;");
        assert_eq!(set.apply("if(ok?)then(yes)"), "if (ok?) then (yes)");
        assert_eq!(set.apply("else(no)"), "else (no)");
        assert_eq!(set.apply("end if"), "endif");
    }

    #[test]
    fn test_component_rewrites() {
        let set = for_dialect(Dialect::Component);
        assert_eq!(set.apply("[ Web App ]as Web"), "[Web App] as Web");
        assert_eq!(set.apply("Web<--Api"), "Api --> Web");
        assert_eq!(set.apply("[Web]-->[Api]"), "[Web] --> [Api]");
    }

    #[test]
    fn test_use_case_rewrites() {
        let set = for_dialect(Dialect::UseCase);
        assert_eq!(set.apply("( Login )as UC1"), "(Login) as UC1");
        assert_eq!(set.apply("Checkout <<include>> Pay"), "Checkout ..> Pay : <<include>>");
        assert_eq!(set.apply("Checkout .> Pay : extend"), "Checkout ..> Pay : <<extend>>");
        assert_eq!(set.apply("User-->(Login)"), "User --> (Login)");
    }

    #[test]
    fn test_er_rewrites() {
        let set = for_dialect(Dialect::EntityRelationship);
        assert_eq!(set.apply("class Customer {"), "entity Customer {");
        assert_eq!(set.apply("  -name: String"), "  name : STRING");
        assert_eq!(set.apply("  +getName() : String\n  id : int"), "  id : INTEGER");
        assert_eq!(set.apply("  created : timestamp"), "  created : DATETIME");
        assert_eq!(set.apply("  born : date"), "  born : DATE");
        assert_eq!(set.apply("skinparam monochrome true\nentity A {"), "entity A {");
        assert_eq!(set.apply("Customer --> Order"), "Customer -N- Order");
        assert_eq!(set.apply("Customer -- Address"), "Customer -1- Address");
        assert_eq!(set.apply(r#"Customer "1" -- "*" Order"#), "Customer -N- Order");
        assert_eq!(set.apply(r#"Customer "1" -- "1" Card"#), "Customer -1- Card");
        assert_eq!(set.apply("A-N-B"), "A -N- B");
    }
}
