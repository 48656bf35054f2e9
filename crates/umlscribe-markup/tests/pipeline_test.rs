//! Normalize-then-validate behavior on realistic model output.

use umlscribe_core::{Dialect, ViolationCode, fallback};
use umlscribe_markup::{normalize, validate};

#[test]
fn test_untagged_garbage_stays_invalid() {
    let code = normalize("garbage text with no tags", Dialect::Class);
    let verdict = validate(&code, Some(Dialect::Class));

    assert!(!verdict.is_valid());
    assert_eq!(
        verdict.messages(),
        vec![
            "Missing @startuml directive",
            "Missing @enduml directive",
            "No class definitions found in class diagram",
        ]
    );
}

#[test]
fn test_class_block_wrapped_in_prose() {
    let raw = r#"Here is the class diagram for the meeting:

```plantuml
@startuml
class Order {
  +id:int
  +total : float
  +place() : bool
}
class Customer {
  +name : string
}
Customer "1" --> "*" Order : places
@enduml
```

Let me know if you need changes."#;

    let code = normalize(raw, Dialect::Class);
    let verdict = validate(&code, Some(Dialect::Class));

    assert!(verdict.is_valid(), "{verdict}");
    assert!(code.starts_with("@startuml\nskinparam monochrome true"));
    assert!(code.ends_with("@enduml"));
    assert!(code.contains("  +id : Integer"));
    assert!(code.contains("  +total : Double"));
    assert!(code.contains("  +place() : Boolean"));
    assert!(!code.contains("```"));
}

#[test]
fn test_er_visibility_sigil_stripped() {
    let raw = "@startchen\nentity Customer {\n  -name: String\n}\n@endchen";
    let code = normalize(raw, Dialect::EntityRelationship);
    let verdict = validate(&code, Some(Dialect::EntityRelationship));

    assert_eq!(code, "@startchen\nentity Customer {\n  name : STRING\n}\n@endchen");
    assert!(verdict.is_valid(), "{verdict}");
    assert_eq!(verdict.advisories()[0].code(), ViolationCode::W002);
}

#[test]
fn test_er_written_as_class_diagram_is_repaired() {
    let raw = "@startuml\nskinparam shadowing false\nclass Customer {\n  +id : int\n  +name : varchar\n  +getOrders()\n}\nclass Order {\n  +id : int\n  +placed : timestamp\n}\nCustomer \"1\" --> \"*\" Order\n@enduml";
    let code = normalize(raw, Dialect::EntityRelationship);
    let verdict = validate(&code, Some(Dialect::EntityRelationship));

    let expected = "@startchen\n\
        entity Customer {\n  id : INTEGER\n  name : STRING\n}\n\
        entity Order {\n  id : INTEGER\n  placed : DATETIME\n}\n\
        Customer -N- Order\n\
        @endchen";
    assert_eq!(code, expected);
    assert!(verdict.is_valid(), "{verdict}");
    assert!(verdict.advisories().is_empty());
}

#[test]
fn test_sequence_without_declarations_validates() {
    let raw = "@startuml\nUser->Api: login\nApi->Db: query\nDb-->Api: rows\nApi-->User: token\n@enduml";
    let code = normalize(raw, Dialect::Sequence);
    let verdict = validate(&code, Some(Dialect::Sequence));

    assert!(verdict.is_valid(), "{verdict}");
    assert_eq!(code.matches("participant ").count(), 3);
}

#[test]
fn test_activity_without_markers_validates() {
    let raw = "@startuml\n:Collect requirements;\nif(approved?)then(yes)\n:Build;\nelse(no)\n:Revise;\nend if\n@enduml";
    let code = normalize(raw, Dialect::Activity);
    let verdict = validate(&code, Some(Dialect::Activity));

    assert!(verdict.is_valid(), "{verdict}");
    assert!(code.contains("\nstart\n"));
    assert!(code.contains("if (approved?) then (yes)"));
    assert!(code.contains("\nendif\nstop\n@enduml"));
}

#[test]
fn test_use_case_stereotypes_validate() {
    let raw = "@startuml\nactor Customer\n( Checkout )as CO\n(Pay) as PAY\nCustomer-->CO\nCO <<include>> PAY\n@enduml";
    let code = normalize(raw, Dialect::UseCase);
    let verdict = validate(&code, Some(Dialect::UseCase));

    assert!(verdict.is_valid(), "{verdict}");
    assert!(code.contains("(Checkout) as CO"));
    assert!(code.contains("CO ..> PAY : <<include>>"));
}

#[test]
fn test_fallbacks_are_valid() {
    for dialect in Dialect::ALL {
        let verdict = validate(fallback::template(dialect), Some(dialect));
        assert!(verdict.is_valid(), "{dialect}: {verdict}");
    }
}

#[test]
fn test_fallbacks_are_normalization_fixed_points() {
    for dialect in Dialect::ALL {
        let template = fallback::template(dialect);
        assert_eq!(normalize(template, dialect), template, "{dialect}");
    }
}

#[test]
fn test_fallback_of_one_dialect_fails_another() {
    let verdict = validate(
        fallback::template(Dialect::Class),
        Some(Dialect::EntityRelationship),
    );
    assert!(!verdict.is_valid());
}

#[test]
fn test_named_start_tags_validate() {
    let raw = "@startuml Orders\nclass Order {\n  +id : int\n}\nclass Item\nOrder *-- Item\n@enduml";
    let code = normalize(raw, Dialect::Class);
    let verdict = validate(&code, Some(Dialect::Class));

    assert!(verdict.is_valid(), "{verdict}");
    assert!(code.contains("\ntitle Orders\n"));
    assert!(!code.contains("\n Orders"));

    let raw = "@startchen Shop\nentity CUSTOMER {\n  name : STRING\n}\nrelationship BUYS {\n}\nCUSTOMER -N- BUYS\n@endchen";
    let code = normalize(raw, Dialect::EntityRelationship);
    let verdict = validate(&code, Some(Dialect::EntityRelationship));

    assert!(verdict.is_valid(), "{verdict}");
    assert!(code.starts_with("@startchen\ntitle Shop\nentity CUSTOMER {"));
}

#[test]
fn test_legacy_arrows_with_quoted_names_validate() {
    let raw = "@startuml\nclass Car\nclass Wheel\nclass Base\nclass \"Order Item\"\nWheel \"4\" --* \"1\" Car\n\"Order Item\" --|> Base\n@enduml";
    let code = normalize(raw, Dialect::Class);
    let verdict = validate(&code, Some(Dialect::Class));

    assert!(verdict.is_valid(), "{verdict}");
    assert!(code.contains("Car \"1\" *-- \"4\" Wheel"), "{code}");
    assert!(code.contains("Base <|-- \"Order Item\""), "{code}");
}
