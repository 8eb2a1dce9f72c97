// Structural model extracted from a C++ snippet

use rustc_hash::FxHashMap;
use std::fmt;

/// A typed name: a class member or a constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedName {
    pub name: String,
    pub type_name: String,
}

impl TypedName {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for TypedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}

/// Which heuristic produced the member → parameter binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTier {
    /// `member = param` found in the constructor body
    BodyAssignment,
    /// Member and parameter names are equal or contain one another
    NameSimilarity,
    /// i-th member paired with i-th parameter
    Positional,
    /// Nothing could be bound (no members or no parameters)
    Unbound,
}

impl fmt::Display for BindingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BindingTier::BodyAssignment => "body assignment",
            BindingTier::NameSimilarity => "name similarity",
            BindingTier::Positional => "positional",
            BindingTier::Unbound => "unbound",
        };
        f.write_str(text)
    }
}

/// Where the constructor was found and what its signature looked like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorSignature {
    pub line_index: usize,
    /// Parameter text between the parentheses, as written
    pub raw_params: String,
    /// Member initializer list after `:`, without the colon
    pub initializer_list: Option<String>,
}

/// Structural summary of the one class in the snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassModel {
    pub name: String,
    pub line_index: usize,
    pub members: Vec<TypedName>,
    pub constructor_params: Vec<TypedName>,
    pub constructor_body: String,
    pub constructor: Option<ConstructorSignature>,
    /// member name → parameter name
    pub binding: FxHashMap<String, String>,
    pub binding_tier: BindingTier,
}

impl ClassModel {
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Position of a constructor parameter by name
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.constructor_params.iter().position(|p| p.name == name)
    }

    /// Parameter bound to `member`, if any
    pub fn bound_param(&self, member: &str) -> Option<&str> {
        self.binding.get(member).map(String::as_str)
    }

    /// Resolve the value a member receives when `site` is constructed.
    ///
    /// A bound member takes the argument at its parameter's position. An
    /// unbound member falls back to the argument at its own position. `None`
    /// means the value cannot be determined from the snippet.
    pub fn resolve_member_value(&self, member_index: usize, site: &ObjectSite) -> Option<String> {
        let member = self.members.get(member_index)?;

        if let Some(param_index) = self
            .bound_param(&member.name)
            .and_then(|param| self.param_index(param))
        {
            return site.arguments.get(param_index).cloned();
        }

        site.arguments.get(member_index).cloned()
    }

    /// `Class(type a, type b)` as shown to the user
    pub fn constructor_display(&self) -> String {
        let params: Vec<String> = self
            .constructor_params
            .iter()
            .map(ToString::to_string)
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// The syntax an object declaration was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationForm {
    /// `Class name(args);`
    Direct,
    /// `Class name = Class(args);`
    CopyInit,
    /// `Class* name = new Class(args);`
    HeapNew,
    /// `auto name = Class(args);`
    Auto,
    /// `Class name;`
    Default,
    /// `Class name = {args};`
    BraceAssign,
    /// `Class name{args};`
    BraceInit,
    /// `Class name` followed shortly by `(`, `=` or `;`
    Loose,
}

/// A method call on an object found right after its declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
    pub line_index: usize,
}

/// One discovered declaration of an instance of the class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSite {
    pub name: String,
    /// Literal argument expressions, quotes stripped
    pub arguments: Vec<String>,
    pub line_index: Option<usize>,
    pub form: DeclarationForm,
    pub follow_up_call: Option<MethodCall>,
}

/// Location of `main` when the snippet has one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoint {
    pub line_index: usize,
}

/// Everything extracted from one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModel {
    pub class: ClassModel,
    pub objects: Vec<ObjectSite>,
    pub entry_point: Option<EntryPoint>,
}
