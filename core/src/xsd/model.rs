#![deny(missing_docs)]

//! # XSD Output Model
//!
//! A small tree the serializer can render without knowing anything about
//! OpenAPI. Anonymous (inline) nodes carry `name: None`.

/// One top-level or inline XSD construct.
#[derive(Debug, Clone, PartialEq)]
pub enum XsdNode {
    /// `xs:complexType`, named when standalone, anonymous when inlined.
    ComplexType {
        /// Type name, `None` for inline bodies.
        name: Option<String>,
        /// The content model.
        particle: Particle,
    },
    /// `xs:simpleType` restriction (enums and named scalar types).
    SimpleType {
        /// Type name, `None` for inline bodies.
        name: Option<String>,
        /// The restriction body.
        restriction: Restriction,
    },
    /// A standalone `xs:element` (document roots and type aliases).
    Element(XsdElement),
}

/// Content model of a complex type.
#[derive(Debug, Clone, PartialEq)]
pub enum Particle {
    /// `xs:sequence` of elements.
    Sequence(Vec<XsdElement>),
    /// `xs:choice` between elements.
    Choice(Vec<XsdElement>),
}

/// `xs:restriction` with enumeration facets.
#[derive(Debug, Clone, PartialEq)]
pub struct Restriction {
    /// Base type (e.g. `xs:string`).
    pub base: String,
    /// `xs:enumeration` values, in declared order. Empty for plain aliases.
    pub enumerations: Vec<String>,
}

/// An `xs:element`, carrying either a type reference or an inline body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XsdElement {
    /// Element name.
    pub name: String,
    /// `type="..."` attribute; exclusive with `inline`.
    pub type_ref: Option<String>,
    /// `minOccurs`; the attribute is omitted when `None`.
    pub min_occurs: Option<u32>,
    /// Emits `maxOccurs="unbounded"` when set.
    pub unbounded: bool,
    /// Inline anonymous body; exclusive with `type_ref`.
    pub inline: Option<Box<XsdNode>>,
}

impl XsdElement {
    /// Element with a type reference.
    pub fn typed(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        XsdElement {
            name: name.into(),
            type_ref: Some(type_ref.into()),
            ..Default::default()
        }
    }

    /// Element with an inline anonymous body.
    pub fn inline(name: impl Into<String>, body: XsdNode) -> Self {
        XsdElement {
            name: name.into(),
            inline: Some(Box::new(body)),
            ..Default::default()
        }
    }

    /// Sets `minOccurs` from the required flag (`1` required, `0` optional).
    pub fn with_required(mut self, required: bool) -> Self {
        self.min_occurs = Some(if required { 1 } else { 0 });
        self
    }

    /// Marks the element repeating (`maxOccurs="unbounded"`).
    pub fn repeated(mut self) -> Self {
        self.unbounded = true;
        self
    }
}
