//! Settings loaded once from a TOML document and shared read-only
//!
//! ```toml
//! [manager]
//! to_process_directories = ["Include"]
//! supported_extensions = [".h", ".hpp"]
//!
//! [parsing]
//! should_parse_all_fields = true
//!
//! [parsing.properties]
//! class_macro_name = "KGClass"
//!
//! [codegen]
//! output_directory = "Generated"
//! ```

use crate::entity::EntityKind;
use crate::error::SettingsError;
use crate::property::PropertySyntax;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Token replaced by the source file stem in file name and macro patterns
pub const FILENAME_TOKEN: &str = "##FILENAME##";

/// Token replaced by the class full name in the class footer macro pattern
pub const CLASS_FULL_NAME_TOKEN: &str = "##CLASSFULLNAME##";

/// Complete configuration of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub manager: ManagerSettings,
    pub parsing: ParsingSettings,
    pub codegen: CodeGenSettings,
    pub logging: LoggingSettings,
}

/// Which files are processed and how many workers process them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSettings {
    /// Processed even when inside an ignored directory
    pub to_process_files: Vec<PathBuf>,

    /// Scanned recursively, symlinks followed
    pub to_process_directories: Vec<PathBuf>,
    pub ignored_files: Vec<PathBuf>,

    /// Never descended into
    pub ignored_directories: Vec<PathBuf>,

    /// Extensions including the leading dot
    pub supported_extensions: Vec<String>,

    /// Worker count, 0 selects the hardware concurrency
    pub thread_count: usize,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            to_process_files: Vec::new(),
            to_process_directories: Vec::new(),
            ignored_files: Vec::new(),
            ignored_directories: Vec::new(),
            supported_extensions: vec![".h".to_string(), ".hpp".to_string()],
            thread_count: 0,
        }
    }
}

impl ManagerSettings {
    /// Configured worker count, or the hardware concurrency (at least 1)
    pub fn effective_thread_count(&self) -> usize {
        if self.thread_count > 0 {
            return self.thread_count;
        }

        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .max(1)
    }

    /// Whether `path` carries one of the supported extensions
    pub fn is_supported_extension(&self, path: &Path) -> bool {
        let Some(extension) = path.extension() else {
            return false;
        };
        let extension = format!(".{}", extension.to_string_lossy());

        self.supported_extensions
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(&extension))
    }
}

/// Entity selection and front-end configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingSettings {
    pub should_parse_all_namespaces: bool,
    pub should_parse_all_classes: bool,
    pub should_parse_all_structs: bool,
    pub should_parse_all_variables: bool,
    pub should_parse_all_fields: bool,
    pub should_parse_all_functions: bool,
    pub should_parse_all_methods: bool,
    pub should_parse_all_enums: bool,
    pub should_parse_all_enum_values: bool,

    pub should_abort_parsing_on_first_error: bool,

    /// Forward front-end diagnostics to the logger
    pub should_log_diagnostic: bool,

    /// Compiler queried for its system include directories, empty to skip
    pub compiler_exe_name: String,
    pub project_include_directories: Vec<PathBuf>,
    pub cpp_version: u32,

    /// Macro defined while parsing so that the macro shim stays inactive
    pub parsing_macro: String,

    pub properties: PropertyParsingSettings,
}

impl Default for ParsingSettings {
    fn default() -> Self {
        Self {
            should_parse_all_namespaces: true,
            should_parse_all_classes: false,
            should_parse_all_structs: false,
            should_parse_all_variables: false,
            should_parse_all_fields: false,
            should_parse_all_functions: false,
            should_parse_all_methods: false,
            should_parse_all_enums: false,
            should_parse_all_enum_values: true,
            should_abort_parsing_on_first_error: true,
            should_log_diagnostic: false,
            compiler_exe_name: String::new(),
            project_include_directories: Vec::new(),
            cpp_version: 17,
            parsing_macro: "KODGEN_PARSING".to_string(),
            properties: PropertyParsingSettings::default(),
        }
    }
}

impl ParsingSettings {
    /// Whether every entity of `kind` is selected regardless of annotations
    pub fn should_parse_all(&self, kind: EntityKind) -> bool {
        if kind == EntityKind::NAMESPACE {
            self.should_parse_all_namespaces
        } else if kind == EntityKind::CLASS {
            self.should_parse_all_classes
        } else if kind == EntityKind::STRUCT {
            self.should_parse_all_structs
        } else if kind == EntityKind::VARIABLE {
            self.should_parse_all_variables
        } else if kind == EntityKind::FIELD {
            self.should_parse_all_fields
        } else if kind == EntityKind::FUNCTION {
            self.should_parse_all_functions
        } else if kind == EntityKind::METHOD {
            self.should_parse_all_methods
        } else if kind == EntityKind::ENUM {
            self.should_parse_all_enums
        } else if kind == EntityKind::ENUM_VALUE {
            self.should_parse_all_enum_values
        } else {
            false
        }
    }
}

/// Annotation syntax and markup macro names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyParsingSettings {
    #[serde(flatten)]
    pub syntax: PropertySyntax,

    /// Property forcing every entity nested in the annotated one to be selected
    pub parse_all_nested_property: String,

    pub namespace_macro_name: String,
    pub class_macro_name: String,
    pub struct_macro_name: String,
    pub variable_macro_name: String,
    pub field_macro_name: String,
    pub function_macro_name: String,
    pub method_macro_name: String,
    pub enum_macro_name: String,
    pub enum_value_macro_name: String,
}

impl Default for PropertyParsingSettings {
    fn default() -> Self {
        Self {
            syntax: PropertySyntax::default(),
            parse_all_nested_property: "ParseAllNested".to_string(),
            namespace_macro_name: "KGNamespace".to_string(),
            class_macro_name: "KGClass".to_string(),
            struct_macro_name: "KGStruct".to_string(),
            variable_macro_name: "KGVariable".to_string(),
            field_macro_name: "KGField".to_string(),
            function_macro_name: "KGFunction".to_string(),
            method_macro_name: "KGMethod".to_string(),
            enum_macro_name: "KGEnum".to_string(),
            enum_value_macro_name: "KGEnumVal".to_string(),
        }
    }
}

/// Every single entity kind, in tag order
pub const SINGLE_ENTITY_KINDS: [EntityKind; 9] = [
    EntityKind::NAMESPACE,
    EntityKind::CLASS,
    EntityKind::STRUCT,
    EntityKind::VARIABLE,
    EntityKind::FIELD,
    EntityKind::FUNCTION,
    EntityKind::METHOD,
    EntityKind::ENUM,
    EntityKind::ENUM_VALUE,
];

/// Annotation prefix identifying the entity kind an annotation was written for
pub fn annotation_tag(kind: EntityKind) -> &'static str {
    if kind == EntityKind::NAMESPACE {
        "KGN:"
    } else if kind == EntityKind::CLASS {
        "KGC:"
    } else if kind == EntityKind::STRUCT {
        "KGS:"
    } else if kind == EntityKind::VARIABLE {
        "KGV:"
    } else if kind == EntityKind::FIELD {
        "KGF:"
    } else if kind == EntityKind::FUNCTION {
        "KGFu:"
    } else if kind == EntityKind::METHOD {
        "KGM:"
    } else if kind == EntityKind::ENUM {
        "KGE:"
    } else if kind == EntityKind::ENUM_VALUE {
        "KGEV:"
    } else {
        ""
    }
}

impl PropertyParsingSettings {
    /// Markup macro name for a single entity kind
    pub fn macro_name(&self, kind: EntityKind) -> &str {
        if kind == EntityKind::NAMESPACE {
            &self.namespace_macro_name
        } else if kind == EntityKind::CLASS {
            &self.class_macro_name
        } else if kind == EntityKind::STRUCT {
            &self.struct_macro_name
        } else if kind == EntityKind::VARIABLE {
            &self.variable_macro_name
        } else if kind == EntityKind::FIELD {
            &self.field_macro_name
        } else if kind == EntityKind::FUNCTION {
            &self.function_macro_name
        } else if kind == EntityKind::METHOD {
            &self.method_macro_name
        } else if kind == EntityKind::ENUM {
            &self.enum_macro_name
        } else if kind == EntityKind::ENUM_VALUE {
            &self.enum_value_macro_name
        } else {
            ""
        }
    }

    /// `(macro name, annotation tag)` for every entity kind
    pub fn markup_macros(&self) -> Vec<(&str, &'static str)> {
        SINGLE_ENTITY_KINDS
            .iter()
            .map(|kind| (self.macro_name(*kind), annotation_tag(*kind)))
            .collect()
    }
}

/// Output locations and naming of generated files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeGenSettings {
    pub output_directory: PathBuf,
    pub generated_header_file_name_pattern: String,
    pub generated_source_file_name_pattern: String,
    pub class_footer_macro_pattern: String,
    pub header_file_footer_macro_pattern: String,

    /// Macro prefixed to exported symbol declarations, may be empty
    pub export_symbol_macro_name: String,

    /// Macro prefixed to internal symbol declarations, may be empty
    pub internal_symbol_macro_name: String,
    pub entity_macros_file_name: String,
}

impl Default for CodeGenSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("Generated"),
            generated_header_file_name_pattern: format!("{FILENAME_TOKEN}.h.h"),
            generated_source_file_name_pattern: format!("{FILENAME_TOKEN}.src.h"),
            class_footer_macro_pattern: format!("{CLASS_FULL_NAME_TOKEN}_GENERATED"),
            header_file_footer_macro_pattern: format!("File_{FILENAME_TOKEN}_GENERATED"),
            export_symbol_macro_name: String::new(),
            internal_symbol_macro_name: String::new(),
            entity_macros_file_name: "EntityMacros.h".to_string(),
        }
    }
}

impl CodeGenSettings {
    pub fn generated_header_path(&self, source: &Path) -> PathBuf {
        self.output_directory.join(
            self.generated_header_file_name_pattern
                .replace(FILENAME_TOKEN, &file_stem(source)),
        )
    }

    pub fn generated_source_path(&self, source: &Path) -> PathBuf {
        self.output_directory.join(
            self.generated_source_file_name_pattern
                .replace(FILENAME_TOKEN, &file_stem(source)),
        )
    }

    pub fn entity_macros_path(&self) -> PathBuf {
        self.output_directory.join(&self.entity_macros_file_name)
    }

    /// Footer macro expected at the end of the body of the class `full_name`
    pub fn class_footer_macro(&self, full_name: &str) -> String {
        self.class_footer_macro_pattern
            .replace(CLASS_FULL_NAME_TOKEN, &to_identifier(full_name))
    }

    /// Footer macro expected at the end of `source`
    pub fn header_file_footer_macro(&self, source: &Path) -> String {
        self.header_file_footer_macro_pattern
            .replace(FILENAME_TOKEN, &to_identifier(&file_stem(source)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load from a file, resolving relative paths against its directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut settings = Self::from_str(&content)?;
        if let Some(base) = path.parent() {
            settings.resolve_relative_paths(base);
        }
        Ok(settings)
    }

    /// Parse from TOML text, paths are kept as written
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Make every relative path absolute with respect to `base`
    pub fn resolve_relative_paths(&mut self, base: &Path) {
        let resolve = |paths: &mut Vec<PathBuf>| {
            for path in paths.iter_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };

        resolve(&mut self.manager.to_process_files);
        resolve(&mut self.manager.to_process_directories);
        resolve(&mut self.manager.ignored_files);
        resolve(&mut self.manager.ignored_directories);
        resolve(&mut self.parsing.project_include_directories);

        if self.codegen.output_directory.is_relative() {
            self.codegen.output_directory = base.join(&self.codegen.output_directory);
        }
    }

    /// Check the settings for inconsistencies
    pub fn validate(&self) -> Result<(), SettingsError> {
        let codegen = &self.codegen;
        if codegen.output_directory.as_os_str().is_empty() {
            return Err(SettingsError::Invalid(
                "codegen.output_directory cannot be empty".to_string(),
            ));
        }

        for (key, pattern) in [
            ("generated_header_file_name_pattern", &codegen.generated_header_file_name_pattern),
            ("generated_source_file_name_pattern", &codegen.generated_source_file_name_pattern),
        ] {
            if !pattern.contains(FILENAME_TOKEN) {
                return Err(SettingsError::Invalid(format!(
                    "codegen.{key} must contain {FILENAME_TOKEN}"
                )));
            }
        }

        if codegen.generated_header_file_name_pattern == codegen.generated_source_file_name_pattern {
            return Err(SettingsError::Invalid(
                "generated header and source file name patterns must differ".to_string(),
            ));
        }

        if !codegen.class_footer_macro_pattern.contains(CLASS_FULL_NAME_TOKEN) {
            return Err(SettingsError::Invalid(format!(
                "codegen.class_footer_macro_pattern must contain {CLASS_FULL_NAME_TOKEN}"
            )));
        }

        if codegen.entity_macros_file_name.is_empty() {
            return Err(SettingsError::Invalid(
                "codegen.entity_macros_file_name cannot be empty".to_string(),
            ));
        }

        let syntax = &self.parsing.properties.syntax;
        let [open, close] = syntax.argument_enclosers;
        if open == close {
            return Err(SettingsError::Invalid(
                "argument enclosers must be two distinct characters".to_string(),
            ));
        }
        for separator in [syntax.property_separator, syntax.argument_separator] {
            if separator == open || separator == close || separator.is_whitespace() {
                return Err(SettingsError::Invalid(format!(
                    "'{separator}' cannot be used as a separator"
                )));
            }
        }

        for kind in SINGLE_ENTITY_KINDS {
            if self.parsing.properties.macro_name(kind).is_empty() {
                return Err(SettingsError::Invalid(format!(
                    "the {kind} macro name cannot be empty"
                )));
            }
        }

        if self.parsing.parsing_macro.is_empty() {
            return Err(SettingsError::Invalid(
                "parsing.parsing_macro cannot be empty".to_string(),
            ));
        }

        if let Some(extension) = self
            .manager
            .supported_extensions
            .iter()
            .find(|e| !e.starts_with('.'))
        {
            return Err(SettingsError::Invalid(format!(
                "supported extension '{extension}' must start with '.'"
            )));
        }

        Ok(())
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Replace every character that cannot appear in a C++ identifier by `_`
pub fn to_identifier(name: &str) -> String {
    name.replace("::", "_")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
