//! Type descriptions attached to fields, variables, functions and records

use bitflags::bitflags;

bitflags! {
    /// Descriptor of one level of a type, outermost level first
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeDescriptor: u16 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
        const RESTRICT = 1 << 2;
        const PTR = 1 << 3;
        const LREF = 1 << 4;
        const RREF = 1 << 5;
        const C_ARRAY = 1 << 6;
        const VALUE = 1 << 7;
    }
}

/// One level of a type: `int const*` is `[PTR, CONST | VALUE]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypePart {
    pub descriptor: TypeDescriptor,

    /// Extent for [`TypeDescriptor::C_ARRAY`] parts, 0 otherwise
    pub additional_data: u32,
}

impl TypePart {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            additional_data: 0,
        }
    }
}

/// Kind of a template parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateParamKind {
    /// `typename T`
    Type,
    /// `int N`
    NonType,
    /// `template <typename> typename U`
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParamInfo {
    pub kind: TemplateParamKind,
    pub name: String,

    /// Spelling of the parameter type for non-type parameters
    pub type_name: Option<String>,
}

/// Description of a C++ type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfo {
    /// Spelling with qualifiers, namespaces and template arguments
    pub full_name: String,

    /// Spelling with every alias resolved
    pub canonical_full_name: String,

    pub type_parts: Vec<TypePart>,

    /// 0 for incomplete, dependent or invalid types
    pub size_in_bytes: usize,

    /// Non-empty when the type is a template
    pub template_params: Vec<TemplateParamInfo>,
}

impl TypeInfo {
    /// A plain value type with no qualifiers
    pub fn value(name: impl Into<String>, size_in_bytes: usize) -> Self {
        let full_name = name.into();
        Self {
            canonical_full_name: full_name.clone(),
            full_name,
            type_parts: vec![TypePart::new(TypeDescriptor::VALUE)],
            size_in_bytes,
            template_params: Vec::new(),
        }
    }

    /// Whether the outermost level is const
    pub fn is_const(&self) -> bool {
        self.type_parts
            .first()
            .is_some_and(|part| part.descriptor.contains(TypeDescriptor::CONST))
    }

    pub fn is_pointer(&self) -> bool {
        self.outermost_is(TypeDescriptor::PTR)
    }

    pub fn is_reference(&self) -> bool {
        self.outermost_is(TypeDescriptor::LREF) || self.outermost_is(TypeDescriptor::RREF)
    }

    pub fn is_template(&self) -> bool {
        !self.template_params.is_empty()
    }

    /// Spelling with top-level `const`/`volatile` removed
    pub fn unqualified_name(&self) -> String {
        let mut name = self.full_name.trim();
        for qualifier in ["const ", "volatile "] {
            name = name.strip_prefix(qualifier).unwrap_or(name).trim_start();
        }
        for qualifier in [" const", " volatile"] {
            name = name.strip_suffix(qualifier).unwrap_or(name).trim_end();
        }
        name.to_string()
    }

    fn outermost_is(&self, descriptor: TypeDescriptor) -> bool {
        self.type_parts
            .first()
            .is_some_and(|part| part.descriptor.contains(descriptor))
    }
}

impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}
