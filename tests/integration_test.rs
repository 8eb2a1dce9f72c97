// Integration tests for extraction and trace building

use ctorviz::parser::errors::ExtractError;
use ctorviz::parser::model::{BindingTier, DeclarationForm, SourceModel};
use ctorviz::parser::parse::{parse_source, ParseOptions, Parser};
use ctorviz::trace::{StepPhase, Trace, TraceBuilder};
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Result<SourceModel, ExtractError> {
    parse_source(source, &ParseOptions::default())
}

fn traces(model: &SourceModel) -> Vec<Trace> {
    let builder = TraceBuilder::new(&model.class).with_entry_point(model.entry_point.is_some());
    model.objects.iter().map(|site| builder.build(site)).collect()
}

fn labels(trace: &Trace) -> Vec<&str> {
    trace.steps.iter().map(|s| s.label.as_str()).collect()
}

#[test]
fn test_student_scenario() {
    let source = r#"
class Student {
private:
    string name;
    int age;
public:
    Student(string n, int a){ name=n; age=a; }
};

Student s1("Ali", 20);
"#;
    let model = parse(source).expect("Parsing failed");

    let members: Vec<&str> = model.class.member_names().collect();
    assert_eq!(members, vec!["name", "age"]);
    let params: Vec<&str> = model
        .class
        .constructor_params
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(params, vec!["n", "a"]);
    assert_eq!(model.class.binding_tier, BindingTier::BodyAssignment);
    assert_eq!(model.class.bound_param("name"), Some("n"));
    assert_eq!(model.class.bound_param("age"), Some("a"));

    assert_eq!(model.objects.len(), 1);
    assert_eq!(model.objects[0].name, "s1");
    assert_eq!(model.objects[0].arguments, vec!["Ali", "20"]);

    let traces = traces(&model);
    assert_eq!(
        labels(&traces[0]),
        vec![
            "Call s1 constructor",
            "Enter Student constructor",
            "Pass arguments: n = Ali, a = 20",
            "Initialize name = Ali",
            "Initialize age = 20",
            "Constructor complete - s1 created",
        ]
    );
}

#[test]
fn test_class_without_constructor() {
    let source = "class Widget {\npublic:\n    void draw();\n};\n\nWidget w;\n";
    let model = parse(source).expect("Parsing failed");

    assert!(!model.class.has_constructor());
    assert!(model.class.members.is_empty());
    assert_eq!(model.objects[0].form, DeclarationForm::Default);
    assert!(model.objects[0].arguments.is_empty());

    let trace = &traces(&model)[0];
    let phases: Vec<&StepPhase> = trace.phases().collect();
    assert_eq!(
        phases,
        vec![
            &StepPhase::CallSite,
            &StepPhase::EnterConstructor,
            &StepPhase::Complete
        ]
    );
    // no constructor: enter highlights the class line
    assert_eq!(trace.steps[1].highlight_line, Some(0));
}

#[test]
fn test_members_without_constructor_are_unresolved() {
    let model = parse("class Box { int w; int h; };\nBox b;").expect("Parsing failed");
    let trace = &traces(&model)[0];

    assert_eq!(trace.len(), 5);
    assert_eq!(trace.steps[2].label, "Initialize w = ?");
    assert_eq!(trace.steps[3].resolved_value, None);
}

#[test]
fn test_no_class() {
    assert_eq!(
        parse("int main() { int x = 1; return x; }"),
        Err(ExtractError::NoClassFound)
    );
    assert!(matches!(Parser::new(""), Err(ExtractError::EmptyInput)));
}

#[test]
fn test_parse_is_idempotent() {
    let source = r#"
class Car {
    string model;
    int speed;
public:
    Car(string m, int s);
};

Car::Car(string m, int s) : model(m), speed(s) {}

int main() {
    Car a("Civic", 120);
    Car* b = new Car("Golf", 180);
    a.drive();
}
"#;
    let first = parse(source).expect("Parsing failed");
    let second = parse(source).expect("Parsing failed");
    assert_eq!(first, second);
    assert_eq!(traces(&first), traces(&second));
}

#[test]
fn test_out_of_line_constructor_with_initializer_list() {
    let source = r#"
class Car {
    string model;
    int speed;
public:
    Car(string m, int s);
};

Car::Car(string m, int s) : model(m), speed(s) {}

int main() {
    Car a("Civic", 120);
    Car* b = new Car("Golf", 180);
    a.drive();
}
"#;
    let model = parse(source).expect("Parsing failed");

    let signature = model.class.constructor.as_ref().expect("constructor");
    assert_eq!(signature.line_index, 8);
    assert_eq!(signature.initializer_list.as_deref(), Some("model(m), speed(s)"));
    assert_eq!(model.class.binding_tier, BindingTier::NameSimilarity);
    assert_eq!(model.class.bound_param("model"), Some("m"));
    assert_eq!(model.class.bound_param("speed"), Some("s"));

    let names: Vec<(&str, DeclarationForm)> = model
        .objects
        .iter()
        .map(|o| (o.name.as_str(), o.form))
        .collect();
    assert_eq!(
        names,
        vec![("a", DeclarationForm::Direct), ("b", DeclarationForm::HeapNew)]
    );

    let traces = traces(&model);
    let last = traces[0].steps.last().expect("steps");
    assert_eq!(last.phase, StepPhase::PostCallMethod);
    assert_eq!(last.label, "Call a.drive()");
    assert_eq!(last.highlight_line, Some(13));
    assert_eq!(traces[1].steps[3].label, "Initialize model = Golf");
}

#[test]
fn test_step_count_law() {
    let sources = [
        "class A { int x; public: A(int v) { x = v; } };\nA a(1);\nA b;\n",
        "class P { int x; int y; int z; public: P(int x, int y) { } };\nint main() {\n P p(1, 2);\n p.show();\n}",
        "class E { };\nE e{};\nE f = {1, 2, 3};",
    ];

    for source in sources {
        let model = parse(source).expect("Parsing failed");
        for (site, trace) in model.objects.iter().zip(traces(&model)) {
            let expected = 2
                + usize::from(!site.arguments.is_empty())
                + model.class.members.len()
                + 1
                + usize::from(site.follow_up_call.is_some());
            assert_eq!(trace.len(), expected, "object {}", site.name);

            let ranks: Vec<u8> = trace.phases().map(StepPhase::rank).collect();
            assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
            let ordinals: Vec<usize> = trace.steps.iter().map(|s| s.ordinal).collect();
            assert_eq!(ordinals, (1..=trace.len()).collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_bracket_aware_arguments() {
    let source = r#"class Acct { string owner; int total; public: Acct(string o, int t) { owner = o; total = t; } };
Acct x("Smith, J.", sum(1, 2));
Acct y({1, 2}, "}");"#;
    let model = parse(source).expect("Parsing failed");

    assert_eq!(model.objects[0].arguments, vec!["Smith, J.", "sum(1, 2)"]);
    assert_eq!(model.objects[1].arguments, vec!["{1, 2}", "}"]);
}

#[test]
fn test_braces_and_parens_inside_literals() {
    let source = r#"
class S {
    string a;
public:
    S(string x, int y) { a = x; b = y; }
    void show() { cout << "{" << a << '}'; }
    int b;
};
S s1("Hi :)", 3);
"#;
    let model = parse(source).expect("Parsing failed");

    let members: Vec<&str> = model.class.member_names().collect();
    assert_eq!(members, vec!["a", "b"]);
    assert_eq!(model.objects.len(), 1);
    assert_eq!(model.objects[0].form, DeclarationForm::Direct);
    assert_eq!(model.objects[0].arguments, vec!["Hi :)", "3"]);

    let trace = &traces(&model)[0];
    assert!(labels(trace).contains(&"Initialize a = Hi :)"));
    assert!(labels(trace).contains(&"Initialize b = 3"));
}

#[test]
fn test_comments_do_not_hide_or_create_code() {
    let source = r#"
// class Fake { int z; };
class Real {
    int v; /* int hidden; */
public:
    Real(int x) { v = x; } // Real ignored(1);
};
/*
Real ghost(9);
*/
Real kept(2);
"#;
    let model = parse(source).expect("Parsing failed");

    assert_eq!(model.class.name, "Real");
    assert_eq!(model.class.line_index, 2);
    let members: Vec<&str> = model.class.member_names().collect();
    assert_eq!(members, vec!["v"]);
    let objects: Vec<&str> = model.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(objects, vec!["kept"]);
    assert_eq!(model.objects[0].line_index, Some(10));
}

#[test]
fn test_unbalanced_class_reports_offset() {
    let source = "class Broken {\n  int x;\n";
    assert!(matches!(
        parse(source),
        Err(ExtractError::UnbalancedBraces { offset: 13 })
    ));
}
