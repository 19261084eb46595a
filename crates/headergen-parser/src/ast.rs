//! Owned cursor tree handed over by the C++ front-end
//!
//! The entity parsers never talk to a compiler directly. They walk an
//! [`AstNode`] tree, which can be built in memory (tests, embedding) or
//! deserialized from a dump produced by an external front-end driver.

use headergen_core::{
    AccessSpecifier, TemplateParamInfo, TemplateParamKind, TypeDescriptor, TypeInfo, TypePart,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of a cursor, restricted to what the entity parsers care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorKind {
    TranslationUnit,
    Namespace,
    ClassDecl,
    StructDecl,
    ClassTemplate,
    EnumDecl,
    EnumConstantDecl,
    FieldDecl,
    VarDecl,
    FunctionDecl,
    CxxMethod,
    ParmDecl,
    CxxBaseSpecifier,
    CxxAccessSpecifier,
    AnnotateAttr,
    CxxFinalAttr,
    CxxOverrideAttr,
    TemplateTypeParameter,
    NonTypeTemplateParameter,
    TemplateTemplateParameter,
    #[default]
    Unexposed,
}

impl CursorKind {
    /// Class, struct or class template
    pub fn is_record(&self) -> bool {
        matches!(
            self,
            CursorKind::ClassDecl | CursorKind::StructDecl | CursorKind::ClassTemplate
        )
    }
}

/// Position of a cursor in the sources
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

/// Access specifier as serialized in dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AstAccess {
    #[default]
    Invalid,
    Public,
    Protected,
    Private,
}

impl From<AstAccess> for AccessSpecifier {
    fn from(access: AstAccess) -> Self {
        match access {
            AstAccess::Invalid => AccessSpecifier::Invalid,
            AstAccess::Public => AccessSpecifier::Public,
            AstAccess::Protected => AccessSpecifier::Protected,
            AstAccess::Private => AccessSpecifier::Private,
        }
    }
}

impl From<AccessSpecifier> for AstAccess {
    fn from(access: AccessSpecifier) -> Self {
        match access {
            AccessSpecifier::Invalid => AstAccess::Invalid,
            AccessSpecifier::Public => AstAccess::Public,
            AccessSpecifier::Protected => AstAccess::Protected,
            AccessSpecifier::Private => AstAccess::Private,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeKind {
    Builtin,
    Record,
    Enum,
    Pointer,
    LValueReference,
    RValueReference,
    ConstantArray,
    Dependent,
    #[default]
    Other,
}

/// A type as reported by the front-end
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AstType {
    pub spelling: String,

    /// Empty when identical to `spelling`
    pub canonical_spelling: String,
    pub kind: TypeKind,
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_restrict: bool,

    /// Negative when unknown (incomplete or dependent types)
    pub size: i64,

    /// Target of pointers and references, element of arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointee: Option<Box<AstType>>,
    pub array_size: u32,
}

impl AstType {
    pub fn new(kind: TypeKind, spelling: impl Into<String>, size: i64) -> Self {
        Self {
            spelling: spelling.into(),
            kind,
            size,
            ..Self::default()
        }
    }

    pub fn builtin(spelling: impl Into<String>, size: i64) -> Self {
        Self::new(TypeKind::Builtin, spelling, size)
    }

    pub fn record(spelling: impl Into<String>, size: i64) -> Self {
        Self::new(TypeKind::Record, spelling, size)
    }

    /// `pointee *`
    pub fn pointer_to(pointee: AstType) -> Self {
        Self {
            spelling: format!("{} *", pointee.spelling),
            kind: TypeKind::Pointer,
            size: 8,
            pointee: Some(Box::new(pointee)),
            ..Self::default()
        }
    }

    /// `pointee &`
    pub fn lvalue_reference_to(pointee: AstType) -> Self {
        Self {
            spelling: format!("{} &", pointee.spelling),
            kind: TypeKind::LValueReference,
            size: pointee.size,
            pointee: Some(Box::new(pointee)),
            ..Self::default()
        }
    }

    /// `element[extent]`
    pub fn array_of(element: AstType, extent: u32) -> Self {
        Self {
            spelling: format!("{}[{}]", element.spelling, extent),
            kind: TypeKind::ConstantArray,
            size: element.size.max(0) * i64::from(extent),
            pointee: Some(Box::new(element)),
            array_size: extent,
            ..Self::default()
        }
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        if !self.spelling.starts_with("const ") {
            self.spelling = format!("const {}", self.spelling);
        }
        self
    }

    pub fn with_canonical(mut self, canonical: impl Into<String>) -> Self {
        self.canonical_spelling = canonical.into();
        self
    }

    fn descriptor(&self) -> TypeDescriptor {
        let mut descriptor = match self.kind {
            TypeKind::Pointer => TypeDescriptor::PTR,
            TypeKind::LValueReference => TypeDescriptor::LREF,
            TypeKind::RValueReference => TypeDescriptor::RREF,
            TypeKind::ConstantArray => TypeDescriptor::C_ARRAY,
            _ => TypeDescriptor::VALUE,
        };
        if self.is_const {
            descriptor |= TypeDescriptor::CONST;
        }
        if self.is_volatile {
            descriptor |= TypeDescriptor::VOLATILE;
        }
        if self.is_restrict {
            descriptor |= TypeDescriptor::RESTRICT;
        }
        descriptor
    }

    /// Build the model type, one [`TypePart`] per level, outermost first
    pub fn to_type_info(&self) -> TypeInfo {
        let mut type_parts = Vec::new();
        let mut level = Some(self);

        while let Some(current) = level {
            type_parts.push(TypePart {
                descriptor: current.descriptor(),
                additional_data: if current.kind == TypeKind::ConstantArray {
                    current.array_size
                } else {
                    0
                },
            });

            level = match current.kind {
                TypeKind::Pointer
                | TypeKind::LValueReference
                | TypeKind::RValueReference
                | TypeKind::ConstantArray => current.pointee.as_deref(),
                _ => None,
            };
        }

        let canonical_full_name = if self.canonical_spelling.is_empty() {
            self.spelling.clone()
        } else {
            self.canonical_spelling.clone()
        };

        TypeInfo {
            full_name: self.spelling.clone(),
            canonical_full_name,
            type_parts,
            size_in_bytes: usize::try_from(self.size).unwrap_or(0),
            template_params: Vec::new(),
        }
    }
}

/// One cursor and its children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AstNode {
    pub kind: CursorKind,
    pub spelling: String,

    /// Unified symbol resolution string, empty when the cursor has none
    pub usr: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub access: AstAccess,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<AstType>,

    /// Return type of functions and methods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_type: Option<AstType>,

    /// Underlying integer type of enums
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_type: Option<AstType>,

    /// Struct or class kind of a class template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_cursor_kind: Option<CursorKind>,

    /// Negative for static or invalid fields
    pub field_offset_bits: i64,
    pub enum_value: i64,

    /// USR of the declaration a base specifier refers to
    pub referenced_usr: String,

    pub is_definition: bool,
    pub is_static: bool,
    pub is_mutable: bool,
    pub is_inline: bool,
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_const: bool,
    pub is_defaulted: bool,

    pub children: Vec<AstNode>,
}

impl Default for AstNode {
    fn default() -> Self {
        Self {
            kind: CursorKind::default(),
            spelling: String::new(),
            usr: String::new(),
            location: None,
            access: AstAccess::default(),
            ty: None,
            result_type: None,
            underlying_type: None,
            template_cursor_kind: None,
            field_offset_bits: -1,
            enum_value: 0,
            referenced_usr: String::new(),
            is_definition: true,
            is_static: false,
            is_mutable: false,
            is_inline: false,
            is_virtual: false,
            is_pure_virtual: false,
            is_const: false,
            is_defaulted: false,
            children: Vec::new(),
        }
    }
}

impl AstNode {
    pub fn new(kind: CursorKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            ..Self::default()
        }
    }

    /// Annotation attribute carrying `text`
    pub fn annotation(text: impl Into<String>) -> Self {
        Self::new(CursorKind::AnnotateAttr, text)
    }

    /// Prepend an annotation attribute, where the front-end places it
    pub fn annotated(mut self, text: impl Into<String>) -> Self {
        self.children.insert(0, Self::annotation(text));
        self
    }

    pub fn with_child(mut self, child: AstNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = AstNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_usr(mut self, usr: impl Into<String>) -> Self {
        self.usr = usr.into();
        self
    }

    pub fn at(mut self, file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        self.location = Some(SourceLocation {
            file: file.into(),
            line,
            column,
        });
        self
    }

    pub fn with_access(mut self, access: AccessSpecifier) -> Self {
        self.access = access.into();
        self
    }

    pub fn with_type(mut self, ty: AstType) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_result_type(mut self, ty: AstType) -> Self {
        self.result_type = Some(ty);
        self
    }

    pub fn with_underlying_type(mut self, ty: AstType) -> Self {
        self.underlying_type = Some(ty);
        self
    }

    pub fn with_template_cursor_kind(mut self, kind: CursorKind) -> Self {
        self.template_cursor_kind = Some(kind);
        self
    }

    pub fn with_field_offset_bits(mut self, bits: i64) -> Self {
        self.field_offset_bits = bits;
        self
    }

    pub fn with_enum_value(mut self, value: i64) -> Self {
        self.enum_value = value;
        self
    }

    pub fn with_referenced_usr(mut self, usr: impl Into<String>) -> Self {
        self.referenced_usr = usr.into();
        self
    }

    /// Mark as a declaration without definition
    pub fn forward_declaration(mut self) -> Self {
        self.is_definition = false;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_mutable(mut self) -> Self {
        self.is_mutable = true;
        self
    }

    pub fn with_inline(mut self) -> Self {
        self.is_inline = true;
        self
    }

    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn with_pure_virtual(mut self) -> Self {
        self.is_virtual = true;
        self.is_pure_virtual = true;
        self
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_defaulted(mut self) -> Self {
        self.is_defaulted = true;
        self
    }

    /// Annotation text if the first child is an annotation attribute
    pub fn leading_annotation(&self) -> Option<&str> {
        self.children
            .first()
            .filter(|child| child.kind == CursorKind::AnnotateAttr)
            .map(|child| child.spelling.as_str())
    }

    /// Children following the leading annotation, if any
    pub fn body(&self) -> &[AstNode] {
        match self.leading_annotation() {
            Some(_) => &self.children[1..],
            None => &self.children,
        }
    }

    pub fn has_child_of_kind(&self, kind: CursorKind) -> bool {
        self.children.iter().any(|child| child.kind == kind)
    }

    /// Template parameters declared by a class template
    pub fn template_params(&self) -> Vec<TemplateParamInfo> {
        self.children
            .iter()
            .filter_map(|child| {
                let kind = match child.kind {
                    CursorKind::TemplateTypeParameter => TemplateParamKind::Type,
                    CursorKind::NonTypeTemplateParameter => TemplateParamKind::NonType,
                    CursorKind::TemplateTemplateParameter => TemplateParamKind::Template,
                    _ => return None,
                };
                let type_name = match kind {
                    TemplateParamKind::NonType => child.ty.as_ref().map(|t| t.spelling.clone()),
                    _ => None,
                };
                Some(TemplateParamInfo {
                    kind,
                    name: child.spelling.clone(),
                    type_name,
                })
            })
            .collect()
    }

    /// Depth-first iteration over this node and every descendant
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator returned by [`AstNode::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
