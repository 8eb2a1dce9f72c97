//! Class and member extraction
//!
//! Finds the first `class Name {` in comment-free text, delimits its body with
//! the brace matcher and collects member declarations of the form
//! `type name;` or `type name = ...;`.
//!
//! Member scanning is a pattern heuristic, not a grammar. Method bodies are
//! blanked first so that locals inside them are not mistaken for members, and
//! candidates whose type position holds a statement keyword are dropped.

use super::errors::ExtractError;
use super::model::TypedName;
use super::scanner::{blank_nested_blocks, find_matching_brace, line_of};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+([A-Za-z_]\w*)\s*\{").expect("class pattern is valid")
});

static MEMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?P<ty>[A-Za-z_][\w:]*(?:\s*<[^;{}()=]*>)?)(?P<sep>\s*[*&]+\s*|\s+)(?P<name>[A-Za-z_]\w*)\s*[=;\[]",
    )
    .expect("member pattern is valid")
});

/// Words that can precede an identifier in a class body without declaring a member
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "delete", "throw", "goto", "using", "typedef", "friend", "else", "new", "case",
    "class", "struct", "enum", "namespace",
];

/// Identifiers that are never member names
const RESERVED_NAMES: &[&str] = &["operator", "const", "override", "final", "noexcept"];

/// The located class: name, position and raw body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub line_index: usize,
    /// Byte range of the body inside the scanned text, braces excluded
    pub body_start: usize,
    pub body_end: usize,
    pub members: Vec<TypedName>,
}

/// Locate the first class in `code` and extract its members
pub fn extract_class(code: &str) -> Result<ClassDecl, ExtractError> {
    let caps = CLASS_RE.captures(code).ok_or(ExtractError::NoClassFound)?;
    let whole = caps.get(0).ok_or(ExtractError::NoClassFound)?;
    let name = caps[1].to_string();

    let body_start = whole.end();
    let body_end = find_matching_brace(code, body_start)?;
    let members = extract_members(&code[body_start..body_end], &name);

    debug!(class = %name, members = members.len(), "found class");

    Ok(ClassDecl {
        name,
        line_index: line_of(code, whole.start()),
        body_start,
        body_end,
        members,
    })
}

/// Collect ordered, unique member declarations from a class body
pub fn extract_members(body: &str, class_name: &str) -> Vec<TypedName> {
    let scan = blank_nested_blocks(body);
    let mut members: Vec<TypedName> = Vec::new();

    for caps in MEMBER_RE.captures_iter(&scan) {
        let ty = caps["ty"].trim();
        let name = &caps["name"];

        let leading_word = ty.split(|c: char| c.is_whitespace() || c == '<').next().unwrap_or(ty);
        if STATEMENT_KEYWORDS.contains(&leading_word)
            || RESERVED_NAMES.contains(&name)
            || name == class_name
            || members.iter().any(|m| m.name == name)
        {
            continue;
        }

        let sigils = caps["sep"].trim();
        let type_name = format!("{ty}{sigils}");
        debug!(member = name, ty = %type_name, "found member");
        members.push(TypedName::new(name, type_name));
    }

    members
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(members: &[TypedName]) -> Vec<&str> {
        members.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_extract_simple_class() {
        let code = "class Student { private: string name; int age; public: Student(string n, int a){ name=n; age=a; } };";
        let class = extract_class(code).unwrap();

        assert_eq!(class.name, "Student");
        assert_eq!(class.line_index, 0);
        assert_eq!(names(&class.members), vec!["name", "age"]);
        assert_eq!(class.members[0].type_name, "string");
        assert_eq!(class.members[1].type_name, "int");
        assert_eq!(&code[class.body_end..class.body_end + 1], "}");
    }

    #[test]
    fn test_no_class() {
        assert_eq!(
            extract_class("int main() { return 0; }"),
            Err(ExtractError::NoClassFound)
        );
    }

    #[test]
    fn test_unbalanced_class_body() {
        assert!(matches!(
            extract_class("class Broken { int x;"),
            Err(ExtractError::UnbalancedBraces { .. })
        ));
    }

    #[test]
    fn test_brace_in_string_literal_keeps_class_balanced() {
        let code = r#"class S { string a; void show() { cout << "{"; } int b; }; S s;"#;
        let class = extract_class(code).unwrap();

        assert_eq!(names(&class.members), vec!["a", "b"]);
        assert_eq!(&code[class.body_end..class.body_end + 2], "};");
    }

    #[test]
    fn test_method_locals_are_not_members() {
        let body = "int total; void add(int v) { int tmp = v; total = tmp; } double ratio = 0.5;";
        let members = extract_members(body, "Acc");
        assert_eq!(names(&members), vec!["total", "ratio"]);
    }

    #[test]
    fn test_pointer_template_and_scoped_types() {
        let body = "int *data; std::vector<int> scores; std::string label; Node& ref;";
        let members = extract_members(body, "Thing");

        assert_eq!(names(&members), vec!["data", "scores", "label", "ref"]);
        assert_eq!(members[0].type_name, "int*");
        assert_eq!(members[1].type_name, "std::vector<int>");
        assert_eq!(members[2].type_name, "std::string");
        assert_eq!(members[3].type_name, "Node&");
    }

    #[test]
    fn test_filters_class_name_keywords_and_duplicates() {
        let body = "Point& operator=(const Point& o); int x; int x; Point Point; friend class Other; int arr[4];";
        let members = extract_members(body, "Point");
        assert_eq!(names(&members), vec!["x", "arr"]);
    }

    #[test]
    fn test_class_line_index() {
        let code = "#include <string>\n\nclass Car {\n  int speed;\n};";
        let class = extract_class(code).unwrap();
        assert_eq!(class.line_index, 2);
        assert_eq!(names(&class.members), vec!["speed"]);
    }
}
