use oas2xsd_core::{convert_str, AppError, FilterConfig};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

const PERSON_SPEC: &str = r#"
openapi: 3.0.0
info:
  title: SS12000 subset
  version: 1.0.0
paths:
  /persons:
    get:
      responses:
        '200':
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Person'
components:
  schemas:
    Person:
      type: object
      properties:
        name:
          type: string
        age:
          type: integer
      required:
        - name
"#;

#[test]
fn test_person_end_to_end() {
    let xsd = convert_str(PERSON_SPEC, None, &FilterConfig::default()).unwrap();

    assert!(xsd.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xsd.contains("<xs:complexType name=\"Person\">"));
    assert!(xsd.contains("<xs:element name=\"name\" minOccurs=\"1\" type=\"xs:string\"/>"));
    assert!(xsd.contains("<xs:element name=\"age\" minOccurs=\"0\" type=\"xs:integer\"/>"));
    assert!(xsd.contains("<xs:element name=\"Person\" type=\"tns:Person\"/>"));
}

#[test]
fn test_idempotence() {
    let first = convert_str(PERSON_SPEC, None, &FilterConfig::default()).unwrap();
    let second = convert_str(PERSON_SPEC, None, &FilterConfig::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_standalone_definitions_are_unique() {
    let xsd = convert_str(PERSON_SPEC, None, &FilterConfig::default()).unwrap();
    let count = xsd.matches("<xs:complexType name=\"Person\">").count();
    assert_eq!(count, 1);
}

const FILTER_SPEC: &str = r#"
openapi: 3.0.0
info:
  title: SS12000 subset
  version: 1.0.0
paths:
  /persons:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/CreatePerson'
      responses:
        '200':
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Person'
components:
  schemas:
    CreatePerson:
      type: object
      properties:
        name:
          type: string
    Person:
      type: object
      properties:
        name:
          type: string
    Unused:
      type: object
"#;

#[test]
fn test_exclude_request_body_types_toggle() {
    let without_flag = convert_str(FILTER_SPEC, None, &FilterConfig::default()).unwrap();
    assert!(without_flag.contains("<xs:complexType name=\"CreatePerson\">"));

    let config = FilterConfig {
        exclude_request_body_types: true,
        ..Default::default()
    };
    let with_flag = convert_str(FILTER_SPEC, None, &config).unwrap();
    assert!(!with_flag.contains("CreatePerson"));
    assert!(with_flag.contains("<xs:complexType name=\"Person\">"));
    // A type never used under paths is not request-body-only.
    assert!(with_flag.contains("<xs:complexType name=\"Unused\">"));
}

#[test]
fn test_include_overrides_exclude() {
    let config = FilterConfig {
        include: names(&["Person"]),
        exclude: names(&["Person", "CreatePerson", "Unused"]),
        exclude_request_body_types: true,
        ..Default::default()
    };
    let xsd = convert_str(FILTER_SPEC, None, &config).unwrap();
    assert!(xsd.contains("<xs:complexType name=\"Person\">"));
    assert!(!xsd.contains("CreatePerson"));
    assert!(!xsd.contains("Unused"));
}

#[test]
fn test_include_keeps_transitive_children() {
    let spec = r#"
openapi: 3.0.0
info:
  title: SS12000 subset
  version: 1.0.0
paths: {}
components:
  schemas:
    Person:
      type: object
      properties:
        home:
          $ref: '#/components/schemas/Address'
    Address:
      type: object
      properties:
        street:
          type: string
    Unrelated:
      type: object
"#;
    let config = FilterConfig {
        include: names(&["Person"]),
        ..Default::default()
    };
    let xsd = convert_str(spec, None, &config).unwrap();
    assert!(xsd.contains("<xs:complexType name=\"Person\">"));
    assert!(xsd.contains("<xs:complexType name=\"Address\">"));
    assert!(!xsd.contains("Unrelated"));
}

#[test]
fn test_enum_order_is_preserved() {
    let spec = r#"
openapi: 3.0.0
info:
  title: SS12000 subset
  version: 1.0.0
paths: {}
components:
  schemas:
    SchoolType:
      type: string
      enum: [GR, GY, FS]
"#;
    let xsd = convert_str(spec, None, &FilterConfig::default()).unwrap();
    let gr = xsd.find("<xs:enumeration value=\"GR\"/>").unwrap();
    let gy = xsd.find("<xs:enumeration value=\"GY\"/>").unwrap();
    let fs = xsd.find("<xs:enumeration value=\"FS\"/>").unwrap();
    assert!(gr < gy && gy < fs);
}

const EXPAND_SPEC: &str = r#"
openapi: 3.0.0
info:
  title: SS12000 subset
  version: 1.0.0
paths: {}
components:
  schemas:
    Person:
      type: object
      properties:
        home:
          $ref: '#/components/schemas/Address'
    Organisation:
      type: object
      properties:
        address:
          $ref: '#/components/schemas/Address'
    Address:
      type: object
      properties:
        street:
          type: string
"#;

#[test]
fn test_expand_inlines_every_reference_site() {
    let config = FilterConfig {
        expand: names(&["Address"]),
        ..Default::default()
    };
    let xsd = convert_str(EXPAND_SPEC, None, &config).unwrap();

    // Never standalone.
    assert!(!xsd.contains("<xs:complexType name=\"Address\">"));
    assert!(!xsd.contains("<xs:element name=\"Address\""));
    // Both reference sites carry the inlined body.
    assert_eq!(xsd.matches("<xs:element name=\"street\"").count(), 2);
}

#[test]
fn test_self_referential_expand_is_finite() {
    let spec = r#"
openapi: 3.0.0
info:
  title: SS12000 subset
  version: 1.0.0
paths: {}
components:
  schemas:
    Root:
      type: object
      properties:
        tree:
          $ref: '#/components/schemas/Tree'
    Tree:
      type: object
      properties:
        child:
          $ref: '#/components/schemas/Tree'
"#;
    let config = FilterConfig {
        expand: names(&["Tree"]),
        ..Default::default()
    };
    let xsd = convert_str(spec, None, &config).unwrap();
    // One level of inlining, then a type reference stops the descent.
    assert!(xsd.contains("<xs:element name=\"child\" minOccurs=\"0\" type=\"tns:Tree\"/>"));
    // Well-formedness smoke check: every start tag is closed.
    assert_eq!(
        xsd.matches("<xs:complexType").count(),
        xsd.matches("</xs:complexType>").count()
    );
}

#[test]
fn test_json_input() {
    let spec = r#"{
        "openapi": "3.0.0",
        "info": { "title": "t", "version": "1" },
        "paths": {},
        "components": {
            "schemas": {
                "Person": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } }
                }
            }
        }
    }"#;
    let xsd = convert_str(spec, None, &FilterConfig::default()).unwrap();
    assert!(xsd.contains("<xs:complexType name=\"Person\">"));
}

#[test]
fn test_missing_sections_fail() {
    let result = convert_str("openapi: 3.0.0\npaths: {}\n", None, &FilterConfig::default());
    assert!(matches!(result, Err(AppError::Structure(_))));
}
