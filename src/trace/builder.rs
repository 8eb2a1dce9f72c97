// Trace synthesis for one (class, object) pair

use super::{ConstructionStep, StepPhase, StepScope, Trace, UNRESOLVED};
use crate::parser::model::{ClassModel, ObjectSite};

/// Builds the construction trace of each object of one class.
///
/// Building is pure: the same model and site always give the same steps.
pub struct TraceBuilder<'a> {
    class: &'a ClassModel,
    caller_scope: StepScope,
}

impl<'a> TraceBuilder<'a> {
    pub fn new(class: &'a ClassModel) -> Self {
        Self {
            class,
            caller_scope: StepScope::Global,
        }
    }

    /// Objects are constructed from inside `main` rather than at file scope
    pub fn with_entry_point(mut self, has_entry_point: bool) -> Self {
        self.caller_scope = if has_entry_point {
            StepScope::EntryPoint
        } else {
            StepScope::Global
        };
        self
    }

    pub fn build(&self, site: &ObjectSite) -> Trace {
        let class = self.class;
        let name = site.name.as_str();
        let constructor_line = class
            .constructor
            .as_ref()
            .map(|c| c.line_index)
            .unwrap_or(class.line_index);

        let mut steps = Vec::new();

        steps.push(self.step(
            StepPhase::CallSite,
            format!("Call {name} constructor"),
            self.caller_scope,
            site.line_index,
            format!("Calling {} constructor for {name}", class.name),
        ));

        steps.push(self.step(
            StepPhase::EnterConstructor,
            format!("Enter {} constructor", class.name),
            StepScope::Constructor,
            Some(constructor_line),
            format!("Entering {} constructor", class.name),
        ));

        if !site.arguments.is_empty() {
            let passed = self.argument_pairs(site);
            steps.push(self.step(
                StepPhase::ArgumentBinding,
                format!("Pass arguments: {passed}"),
                StepScope::Constructor,
                Some(constructor_line),
                format!("→ {passed}"),
            ));
        }

        for (i, member) in class.members.iter().enumerate() {
            let value = class.resolve_member_value(i, site);
            let shown = value.as_deref().unwrap_or(UNRESOLVED);
            let mut step = self.step(
                StepPhase::MemberInit(member.name.clone()),
                format!("Initialize {} = {shown}", member.name),
                StepScope::Constructor,
                Some(constructor_line),
                format!("Setting {} to {shown}", member.name),
            );
            step.effect_message = Some(format!("✓ {} ← {shown}", member.name));
            step.resolved_value = value;
            steps.push(step);
        }

        let mut complete = self.step(
            StepPhase::Complete,
            format!("Constructor complete - {name} created"),
            self.caller_scope,
            site.line_index,
            format!("✓ {name} object created"),
        );
        complete.effect_message = Some(format!("✓ Object {name} created"));
        steps.push(complete);

        if let Some(call) = &site.follow_up_call {
            steps.push(self.step(
                StepPhase::PostCallMethod,
                format!("Call {name}.{}()", call.method),
                self.caller_scope,
                Some(call.line_index),
                format!("Calling {}() on {name}", call.method),
            ));
        }

        for (i, step) in steps.iter_mut().enumerate() {
            step.ordinal = i + 1;
        }

        Trace {
            object_name: site.name.clone(),
            steps,
        }
    }

    /// `param = value` pairs in parameter order, or bare values without parameters
    fn argument_pairs(&self, site: &ObjectSite) -> String {
        let params = &self.class.constructor_params;
        if params.is_empty() {
            return site.arguments.join(", ");
        }

        params
            .iter()
            .zip(&site.arguments)
            .map(|(param, value)| format!("{} = {value}", param.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn step(
        &self,
        phase: StepPhase,
        label: String,
        scope: StepScope,
        highlight_line: Option<usize>,
        console_message: String,
    ) -> ConstructionStep {
        ConstructionStep {
            ordinal: 0,
            phase,
            label,
            scope,
            highlight_line,
            console_message: Some(console_message),
            effect_message: None,
            resolved_value: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::{
        BindingTier, ConstructorSignature, DeclarationForm, MethodCall, TypedName,
    };
    use crate::trace::StepEffect;
    use rustc_hash::FxHashMap;

    fn student(binding: &[(&str, &str)]) -> ClassModel {
        ClassModel {
            name: "Student".to_string(),
            line_index: 0,
            members: vec![TypedName::new("name", "string"), TypedName::new("age", "int")],
            constructor_params: vec![TypedName::new("n", "string"), TypedName::new("a", "int")],
            constructor_body: "name=n; age=a;".to_string(),
            constructor: Some(ConstructorSignature {
                line_index: 2,
                raw_params: "string n, int a".to_string(),
                initializer_list: None,
            }),
            binding: binding
                .iter()
                .map(|(m, p)| (m.to_string(), p.to_string()))
                .collect::<FxHashMap<_, _>>(),
            binding_tier: BindingTier::BodyAssignment,
        }
    }

    fn site(name: &str, args: &[&str]) -> ObjectSite {
        ObjectSite {
            name: name.to_string(),
            arguments: args.iter().map(|a| a.to_string()).collect(),
            line_index: Some(7),
            form: DeclarationForm::Direct,
            follow_up_call: None,
        }
    }

    #[test]
    fn test_full_trace_labels() {
        let class = student(&[("name", "n"), ("age", "a")]);
        let trace = TraceBuilder::new(&class)
            .with_entry_point(true)
            .build(&site("s1", &["Ali", "20"]));

        let labels: Vec<&str> = trace.steps.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Call s1 constructor",
                "Enter Student constructor",
                "Pass arguments: n = Ali, a = 20",
                "Initialize name = Ali",
                "Initialize age = 20",
                "Constructor complete - s1 created",
            ]
        );
        assert_eq!(trace.steps[0].highlight_line, Some(7));
        assert_eq!(trace.steps[1].highlight_line, Some(2));
        assert_eq!(trace.steps[0].scope, StepScope::EntryPoint);
        assert!(trace.steps[3].is_in_constructor());
        assert_eq!(
            trace.steps.iter().map(|s| s.ordinal).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_swapped_binding_resolves_by_parameter_position() {
        let class = student(&[("name", "a"), ("age", "n")]);
        let trace = TraceBuilder::new(&class).build(&site("s", &["Ali", "20"]));

        assert_eq!(trace.steps[3].resolved_value.as_deref(), Some("20"));
        assert_eq!(trace.steps[4].resolved_value.as_deref(), Some("Ali"));
    }

    #[test]
    fn test_positional_values_without_binding() {
        let mut class = student(&[]);
        class.constructor_params.clear();
        let trace = TraceBuilder::new(&class).build(&site("s", &["Bo"]));

        assert_eq!(trace.steps[2].label, "Pass arguments: Bo");
        assert_eq!(trace.steps[3].resolved_value.as_deref(), Some("Bo"));
        assert_eq!(trace.steps[4].resolved_value, None);
        assert_eq!(trace.steps[4].label, "Initialize age = ?");
    }

    #[test]
    fn test_bound_parameter_without_argument_is_unresolved() {
        let class = student(&[("name", "n"), ("age", "a")]);
        let trace = TraceBuilder::new(&class).build(&site("s", &["Ali"]));

        assert_eq!(trace.steps[3].resolved_value.as_deref(), Some("Ali"));
        assert_eq!(trace.steps[4].resolved_value, None);
    }

    #[test]
    fn test_post_call_step_and_phase_order() {
        let class = student(&[("name", "n"), ("age", "a")]);
        let mut s = site("s", &[]);
        s.follow_up_call = Some(MethodCall {
            method: "display".to_string(),
            line_index: 8,
        });
        let trace = TraceBuilder::new(&class).build(&s);

        // no arguments: no binding step
        assert_eq!(trace.len(), 2 + 2 + 1 + 1);
        let last = trace.steps.last().unwrap();
        assert_eq!(last.phase, StepPhase::PostCallMethod);
        assert_eq!(last.label, "Call s.display()");
        assert_eq!(last.highlight_line, Some(8));

        let ranks: Vec<u8> = trace.phases().map(StepPhase::rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_effects() {
        let class = student(&[("name", "n"), ("age", "a")]);
        let trace = TraceBuilder::new(&class).build(&site("s", &["A", "1"]));

        assert_eq!(trace.steps[0].effect(), None);
        assert_eq!(
            trace.steps[3].effect(),
            Some(StepEffect::InitializeMember("name"))
        );
        assert_eq!(trace.steps[5].effect(), Some(StepEffect::MarkCreated));
    }

    #[test]
    fn test_effect_steps_carry_confirmations() {
        let class = student(&[("name", "n"), ("age", "a")]);
        let trace = TraceBuilder::new(&class).build(&site("s", &["A"]));

        let confirmations: Vec<Option<&str>> = trace
            .steps
            .iter()
            .map(|s| s.effect_message.as_deref())
            .collect();
        assert_eq!(
            confirmations,
            vec![
                None,
                None,
                None,
                Some("✓ name ← A"),
                Some("✓ age ← ?"),
                Some("✓ Object s created"),
            ]
        );
    }
}
