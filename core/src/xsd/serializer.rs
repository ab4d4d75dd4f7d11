#![deny(missing_docs)]

//! # XSD Serialization
//!
//! Renders the mapped definitions into one `xs:schema` document with
//! `quick-xml`. The whole document is assembled in memory; callers write it
//! out only after serialization succeeds, so a failed run leaves no partial
//! output behind.

use crate::error::{AppError, AppResult};
use crate::xsd::model::{Particle, Restriction, XsdElement, XsdNode};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// The XML Schema namespace.
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Target namespace of the emitted schema.
pub const TARGET_NAMESPACE: &str = "urn:ss12000:schema";

/// Serializes the mapped definitions into a complete XSD document.
///
/// Node order is preserved as given (first-discovery order, not
/// alphabetical); identical input yields byte-identical output.
pub fn serialize_schema(nodes: &[XsdNode]) -> AppResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let mut root = BytesStart::new("xs:schema");
    root.push_attribute(("xmlns:xs", XS_NAMESPACE));
    root.push_attribute(("xmlns:tns", TARGET_NAMESPACE));
    root.push_attribute(("targetNamespace", TARGET_NAMESPACE));
    root.push_attribute(("elementFormDefault", "qualified"));
    writer.write_event(Event::Start(root)).map_err(xml_error)?;

    for node in nodes {
        write_node(&mut writer, node)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("xs:schema")))
        .map_err(xml_error)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes)
        .map_err(|e| AppError::General(format!("emitted XSD is not valid UTF-8: {}", e)))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XsdNode) -> AppResult<()> {
    match node {
        XsdNode::ComplexType { name, particle } => {
            let mut start = BytesStart::new("xs:complexType");
            if let Some(name) = name {
                start.push_attribute(("name", name.as_str()));
            }
            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            write_particle(writer, particle)?;
            writer
                .write_event(Event::End(BytesEnd::new("xs:complexType")))
                .map_err(xml_error)?;
        }
        XsdNode::SimpleType { name, restriction } => {
            let mut start = BytesStart::new("xs:simpleType");
            if let Some(name) = name {
                start.push_attribute(("name", name.as_str()));
            }
            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            write_restriction(writer, restriction)?;
            writer
                .write_event(Event::End(BytesEnd::new("xs:simpleType")))
                .map_err(xml_error)?;
        }
        XsdNode::Element(element) => write_element(writer, element)?,
    }
    Ok(())
}

fn write_particle(writer: &mut Writer<Vec<u8>>, particle: &Particle) -> AppResult<()> {
    let (tag, elements) = match particle {
        Particle::Sequence(elements) => ("xs:sequence", elements),
        Particle::Choice(elements) => ("xs:choice", elements),
    };
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_error)?;
    for element in elements {
        write_element(writer, element)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_error)?;
    Ok(())
}

fn write_restriction(writer: &mut Writer<Vec<u8>>, restriction: &Restriction) -> AppResult<()> {
    let mut start = BytesStart::new("xs:restriction");
    start.push_attribute(("base", restriction.base.as_str()));

    if restriction.enumerations.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for value in &restriction.enumerations {
        let mut facet = BytesStart::new("xs:enumeration");
        facet.push_attribute(("value", value.as_str()));
        writer.write_event(Event::Empty(facet)).map_err(xml_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("xs:restriction")))
        .map_err(xml_error)?;
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XsdElement) -> AppResult<()> {
    let mut start = BytesStart::new("xs:element");
    start.push_attribute(("name", element.name.as_str()));
    if let Some(min) = element.min_occurs {
        start.push_attribute(("minOccurs", min.to_string().as_str()));
    }
    if element.unbounded {
        start.push_attribute(("maxOccurs", "unbounded"));
    }
    if let Some(type_ref) = &element.type_ref {
        start.push_attribute(("type", type_ref.as_str()));
    }

    match &element.inline {
        Some(body) => {
            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            write_node(writer, body)?;
            writer
                .write_event(Event::End(BytesEnd::new("xs:element")))
                .map_err(xml_error)?;
        }
        None => writer.write_event(Event::Empty(start)).map_err(xml_error)?,
    }
    Ok(())
}

fn xml_error<E: std::fmt::Display>(error: E) -> AppError {
    AppError::General(format!("XML write failed: {}", error))
}
