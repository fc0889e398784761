//! Semantic annotations attached by the resolution phase.
//!
//! The parser never produces these. They are opaque handles into whatever
//! tables a resolver keeps, and the incremental engine only moves them
//! between structurally equal nodes.

use std::fmt;

/// Opaque handle to a resolved type.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Opaque handle to a resolved element (variable, method, class, ...).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ElementId(u32);

impl ElementId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ElementId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// Which annotation fields a node kind carries.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AnnotationShape {
    /// Declarations, statements, clauses.
    None,
    /// Expressions: static and propagated type.
    Typed,
    /// Identifiers and operator expressions: types plus resolved elements.
    TypedWithElement,
    /// Type names: the denoted type, kept in `static_type`.
    TypeOnly,
    /// Metadata annotations and constructor names: the resolved element only.
    ElementOnly,
}

/// Annotation fields of one node.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Annotations {
    pub static_type: Option<TypeId>,
    pub propagated_type: Option<TypeId>,
    pub static_element: Option<ElementId>,
    pub propagated_element: Option<ElementId>,
}

impl Annotations {
    pub const EMPTY: Annotations = Annotations {
        static_type: None,
        propagated_type: None,
        static_element: None,
        propagated_element: None,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Keep only the fields `shape` allows.
    #[must_use]
    pub fn restricted_to(self, shape: AnnotationShape) -> Annotations {
        match shape {
            AnnotationShape::None => Annotations::EMPTY,
            AnnotationShape::Typed => Annotations {
                static_type: self.static_type,
                propagated_type: self.propagated_type,
                ..Annotations::EMPTY
            },
            AnnotationShape::TypedWithElement => self,
            AnnotationShape::TypeOnly => Annotations {
                static_type: self.static_type,
                ..Annotations::EMPTY
            },
            AnnotationShape::ElementOnly => Annotations {
                static_element: self.static_element,
                ..Annotations::EMPTY
            },
        }
    }
}
