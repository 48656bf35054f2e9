//! Static fallback diagrams.
//!
//! When generation cannot produce valid markup, the dialect's fallback
//! template is returned instead. Templates are fixed text: they carry no
//! request context, so their validity never depends on caller input.

use crate::dialect::Dialect;

const CLASS: &str = "@startuml
skinparam monochrome true
skinparam shadowing false
skinparam classAttributeIconSize 0
skinparam style strictuml
class BaseEntity {
  -id : String
  -createdAt : DateTime
  +getId() : String
  +setId(id : String) : void
}
class DomainEntity {
  -name : String
  -description : String
  +getName() : String
  +setName(name : String) : void
}
class RelatedEntity {
  -type : String
  +getType() : String
}
BaseEntity <|-- DomainEntity
DomainEntity \"1\" --> \"*\" RelatedEntity
@enduml";

const SEQUENCE: &str = "@startuml
skinparam monochrome true
skinparam shadowing false
skinparam classAttributeIconSize 0
skinparam style strictuml
participant User
participant System
participant Service
participant Database
User -> System : Submit request
activate System
System -> Service : Process request
activate Service
Service -> Database : Query data
Database --> Service : Return data
Service --> System : Return result
deactivate Service
System --> User : Show confirmation
deactivate System
@enduml";

const ACTIVITY: &str = "@startuml
skinparam monochrome true
skinparam shadowing false
skinparam classAttributeIconSize 0
skinparam style strictuml
start
:Initialize Process;
if (Input Valid?) then (yes)
  :Process Data;
  if (Processing Success?) then (yes)
    :Generate Output;
  else (no)
    :Handle Error;
  endif
else (no)
  :Reject Input;
endif
:Finalize;
stop
@enduml";

const COMPONENT: &str = "@startuml
skinparam monochrome true
skinparam shadowing false
skinparam classAttributeIconSize 0
skinparam style strictuml
[Frontend Application] as Frontend
[API Gateway] as Gateway
[Business Service] as Service
[Data Access Layer] as DAL
database \"Database\" as DB
Frontend --> Gateway : HTTP/REST
Gateway --> Service : Internal API
Service --> DAL : Data Operations
DAL --> DB : SQL Queries
@enduml";

const USE_CASE: &str = "@startuml
skinparam monochrome true
skinparam shadowing false
skinparam classAttributeIconSize 0
skinparam style strictuml
left to right direction
actor \"Primary User\" as User
actor \"Administrator\" as Admin
User <|-- Admin
usecase \"Manage System\" as ManageSys
usecase \"Use Application\" as UseApp
usecase \"View Reports\" as ViewReports
User --> UseApp
User --> ViewReports
Admin --> ManageSys
@enduml";

const ENTITY_RELATIONSHIP: &str = "@startchen
entity CUSTOMER {
  CustomerID : INTEGER <<key>>
  Name : STRING
  Email : STRING
  Phone : STRING
}
entity ORDER {
  OrderID : INTEGER <<key>>
  OrderDate : DATE
  TotalAmount : DECIMAL
}
entity PRODUCT {
  ProductID : INTEGER <<key>>
  ProductName : STRING
  Price : DECIMAL
}
relationship PLACES {
}
relationship CONTAINS {
  Quantity : INTEGER
  UnitPrice : DECIMAL
}
CUSTOMER -1- PLACES
PLACES -N- ORDER
ORDER -1- CONTAINS
CONTAINS -N- PRODUCT
@endchen";

/// Returns the fallback template of a dialect.
pub fn template(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Class => CLASS,
        Dialect::Sequence => SEQUENCE,
        Dialect::Activity => ACTIVITY,
        Dialect::Component => COMPONENT,
        Dialect::UseCase => USE_CASE,
        Dialect::EntityRelationship => ENTITY_RELATIONSHIP,
    }
}
