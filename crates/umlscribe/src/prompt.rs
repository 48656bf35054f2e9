//! Prompt construction.
//!
//! Templates use `{name}` placeholders filled in a single pass, so request
//! text that happens to contain a placeholder is never expanded again.

use umlscribe_core::{Dialect, grammar};

use crate::{config::PromptConfig, request::GenerationRequest};

/// Generic suggestions sent with the improvement pass.
pub const IMPROVEMENT_SUGGESTIONS: [&str; 4] = [
    "Code is syntactically correct but could be improved",
    "Consider adding more descriptive labels and relationships",
    "Ensure all important entities and interactions are represented",
    "Optimize layout and readability",
];

const UML_HEADER: &str = "\
CRITICAL SYNTAX RULES - FOLLOW EXACTLY:
1. Start with @startuml, end with @enduml
2. Add these styling lines after @startuml:
   skinparam monochrome true
   skinparam shadowing false
   skinparam classAttributeIconSize 0
   skinparam style strictuml
";

const CLASS: &str = "\
You are a PlantUML expert. Create a syntactically PERFECT class diagram.

INPUT DATA:
- Transcript: \"{transcript}\"
- Summary: \"{summary}\"
- Keywords: {keywords}

{header}
3. Class syntax: class ClassName {
   -privateAttribute : Type
   +publicMethod() : ReturnType
   }
4. Inheritance: ParentClass <|-- ChildClass
5. Association: ClassA --> ClassB
6. Composition: Whole *-- Part
7. Multiplicity: ClassA \"1\" --> \"*\" ClassB

REQUIREMENTS:
- Identify 3-5 key classes from the transcript
- Include 2-3 attributes per class with visibility (-, +, #)
- Include 1-2 methods per class
- Show relationships between classes
- Ensure every { has a matching }

Generate ONLY the PlantUML code. No explanations.
";

const SEQUENCE: &str = "\
You are a PlantUML expert. Create a syntactically PERFECT sequence diagram.

INPUT DATA:
- Transcript: \"{transcript}\"
- Summary: \"{summary}\"
- Keywords: {keywords}

{header}
3. Participant syntax: participant ActorName
4. Message syntax: ActorA -> ActorB : message description
5. Response syntax: ActorB --> ActorA : response description
6. Activation: activate ActorName / deactivate ActorName
7. Note syntax: note right of ActorName : note text

REQUIREMENTS:
- Identify 3-5 key participants from the transcript
- Declare every participant before its first message
- Use -> for calls and --> for responses
- Include activations for processing

Generate ONLY the PlantUML code. No explanations.
";

const ACTIVITY: &str = "\
You are a PlantUML expert. Create a syntactically PERFECT activity diagram (flowchart).

INPUT DATA:
- Transcript: \"{transcript}\"
- Summary: \"{summary}\"
- Keywords: {keywords}

{header}
3. Always start with: start
4. Activities: :Activity Description;
5. Decisions: if (Condition?) then (yes) ... else (no) ... endif
6. Parallel: fork ... fork again ... end fork
7. Always end with: stop

REQUIREMENTS:
- Extract workflow steps from the transcript
- Include decision points with if/then/else
- Put each activity on its own line

Generate ONLY the PlantUML code. No explanations.
";

const COMPONENT: &str = "\
You are a PlantUML expert. Create a syntactically PERFECT component diagram.

INPUT DATA:
- Transcript: \"{transcript}\"
- Summary: \"{summary}\"
- Keywords: {keywords}

{header}
3. Components: [ComponentName] as Alias
4. Interfaces: interface \"InterfaceName\" as Alias
5. Databases: database \"DatabaseName\" as Alias
6. Connections: ComponentA --> ComponentB : connection type
7. Grouping: package \"PackageName\" { ... }

REQUIREMENTS:
- Identify system components from the transcript
- Show data flow and dependencies
- Label connections with the interaction type

Generate ONLY the PlantUML code. No explanations.
";

const USE_CASE: &str = "\
You are a PlantUML expert. Create a syntactically PERFECT use case diagram.

INPUT DATA:
- Transcript: \"{transcript}\"
- Summary: \"{summary}\"
- Keywords: {keywords}

{header}
3. Actors: actor \"Actor Name\" as Alias or actor ActorName
4. Use cases: (Use Case Name) as Alias
5. Associations: Actor --> UseCase
6. Actor inheritance: ParentActor <|-- ChildActor
7. Include: Base ..> Included : <<include>>
8. Extend: Extension ..> Base : <<extend>>

REQUIREMENTS:
- Identify actors and use cases from the transcript
- Connect actors to their use cases with -->
- Add include/extend relationships if mentioned

Generate ONLY the PlantUML code. No explanations.
";

const ENTITY_RELATIONSHIP: &str = "\
You are a PlantUML expert generating an Entity Relationship Diagram using Chen's notation.
This is NOT a UML class diagram. Do not use UML syntax.

INPUT DATA:
- Transcript: \"{transcript}\"
- Summary: \"{summary}\"
- Keywords: {keywords}

FORBIDDEN SYNTAX:
- @startuml / @enduml
- skinparam lines
- the class keyword
- +, -, # visibility modifiers
- inheritance arrows (<|--, --|>)
- methods or parentheses
- aliases (the word `as`)

MANDATORY STRUCTURE:
1. Start with @startchen, end with @endchen
2. Entities:
   entity ENTITY_NAME {
     AttributeName : TYPE
     KeyName : INTEGER <<key>>
   }
3. Relationships: relationship REL_NAME {}
4. Connections, after all definitions:
   ENTITY1 -1- REL
   REL -N- ENTITY2

Declare all entities first, then all relationships, then all connections.

Generate ONLY the PlantUML code. No explanations.
";

const REVISION: &str = "\
You are a PlantUML expert reviewing and improving your own generated code.

ORIGINAL CONTEXT:
- Diagram Type: {dialect}
- Transcript: {transcript}
- Summary: {summary}
- Keywords: {keywords}

YOUR PREVIOUSLY GENERATED CODE:
{code}

VALIDATION ISSUES FOUND:
{issues}

REVISION INSTRUCTIONS:
1. Fix every issue listed above
2. Keep the diagram faithful to the transcript
3. Start with {start} and end with {end}
4. Use only these relationship forms: {tokens}

CRITICAL RULES:
- Generate ONLY the improved PlantUML code
- No explanations or comments outside the code
- Maintain the same diagram type: {dialect}

IMPROVED CODE:
";

const SQL: &str = "\
You are a database expert. Convert the following PlantUML Entity Relationship diagram into SQL CREATE TABLE statements.

ENTITY RELATIONSHIP DIAGRAM:
{markup}

CONVERSION RULES:
1. Convert each `entity` to a `CREATE TABLE` statement
2. Convert attributes to columns with SQL types:
   - INTEGER -> INT or BIGINT
   - STRING -> VARCHAR(255)
   - DATE -> DATE
   - DECIMAL -> DECIMAL(10,2)
   - BOOLEAN -> BOOLEAN
3. Mark attributes tagged `<<key>>` as PRIMARY KEY
4. Create FOREIGN KEY constraints from the entity connections

Output ONLY the SQL code in a ```sql code block. Generate the COMPLETE code.

SQL CODE:
```sql";

const JAVA: &str = "\
You are a Java expert. Convert the following PlantUML class diagram into complete Java class definitions.

UML CLASS DIAGRAM:
{markup}

CONVERSION RULES:
1. Convert each `class` to a Java class
2. Visibility: + -> public, - -> private, # -> protected
3. Types: String -> String, Integer -> int, DateTime -> LocalDateTime, Boolean -> boolean
4. Generate a default and a parameterized constructor, getters and setters
5. Implement inheritance with extends and associations as fields or collections
6. Include the imports the code needs

Output ONLY the Java code in a ```java code block. Generate the COMPLETE code.

JAVA CODE:
```java";

const AUTO_DETECT: &str = "\
The following input is written in PlantUML syntax. Determine whether it is a UML class diagram or an entity relationship diagram.

- A class diagram uses the `class` keyword, visibility modifiers (+, -, #), methods with parentheses and arrows such as <|--, *--, o--, -->.
- An entity relationship diagram uses `entity` blocks, `relationship` blocks and connections such as -1- and -N-.

If it is a class diagram, generate complete Java classes in a ```java code block.
If it is an entity relationship diagram, generate SQL CREATE TABLE statements in a ```sql code block.

PLANTUML INPUT:
{markup}

Output ONLY the code block. No explanations.
";

/// Builds the first prompt of a request.
pub fn initial(request: &GenerationRequest, config: &PromptConfig) -> String {
    let template = match request.dialect() {
        Dialect::Class => CLASS,
        Dialect::Sequence => SEQUENCE,
        Dialect::Activity => ACTIVITY,
        Dialect::Component => COMPONENT,
        Dialect::UseCase => USE_CASE,
        Dialect::EntityRelationship => ENTITY_RELATIONSHIP,
    };
    let keywords = keyword_list(request.keywords());

    fill(
        template,
        &[
            ("header", UML_HEADER),
            ("transcript", excerpt(request.transcript(), config.transcript_limit())),
            (
                "summary",
                excerpt(request.summary().unwrap_or_default(), config.summary_limit()),
            ),
            ("keywords", keywords.as_str()),
        ],
    )
}

/// Builds a repair prompt listing the violations of `code`.
pub fn repair(
    code: &str,
    violations: &[String],
    request: &GenerationRequest,
    config: &PromptConfig,
) -> String {
    let issues = if violations.is_empty() {
        "No specific errors detected".to_string()
    } else {
        violations
            .iter()
            .map(|violation| format!("- {violation}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    revision(code, &issues, request, config)
}

/// Builds an improvement prompt for code that already validates.
pub fn improvement(
    code: &str,
    advisories: &[String],
    request: &GenerationRequest,
    config: &PromptConfig,
) -> String {
    let issues: Vec<String> = advisories
        .iter()
        .cloned()
        .chain(IMPROVEMENT_SUGGESTIONS.iter().map(|suggestion| suggestion.to_string()))
        .collect();
    repair(code, &issues, request, config)
}

/// Builds a code-artifact prompt. Returns the prompt and the expected
/// language, if the dialect implies one.
pub fn artifact(markup: &str, dialect: Option<Dialect>) -> (String, Option<&'static str>) {
    let (template, language) = match dialect {
        Some(Dialect::Class) => (JAVA, Some("java")),
        Some(Dialect::EntityRelationship) => (SQL, Some("sql")),
        _ => (AUTO_DETECT, None),
    };
    (fill(template, &[("markup", markup)]), language)
}

fn revision(code: &str, issues: &str, request: &GenerationRequest, config: &PromptConfig) -> String {
    let dialect = request.dialect();
    let delimiters = dialect.delimiters();
    let tokens = grammar::rules(dialect).relationship_tokens.join(", ");
    let keywords = keyword_list(request.keywords());

    fill(
        REVISION,
        &[
            ("dialect", dialect.name()),
            (
                "transcript",
                excerpt(request.transcript(), config.repair_transcript_limit()),
            ),
            (
                "summary",
                excerpt(
                    request.summary().unwrap_or_default(),
                    config.repair_summary_limit(),
                ),
            ),
            ("keywords", keywords.as_str()),
            ("code", code),
            ("issues", issues),
            ("start", delimiters.start()),
            ("end", delimiters.end()),
            ("tokens", tokens.as_str()),
        ],
    )
}

fn keyword_list(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "None provided".to_string()
    } else {
        keywords.join(", ")
    }
}

/// Returns at most `limit` characters of `text`.
pub(crate) fn excerpt(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Replaces `{name}` placeholders in one left-to-right pass. Unknown
/// placeholders and lone braces are copied verbatim.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match replacement {
            Some((value, close)) => {
                output.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}
