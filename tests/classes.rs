#[cfg(test)]
mod classes_tests {
    use pretty_assertions::assert_eq;
    use rox_lox as lox;

    use lox::lox::{Lox, RunError};

    fn run(source: &str) -> (String, Result<(), RunError>) {
        let mut out: Vec<u8> = Vec::new();
        let result = Lox::new(&mut out).run(source);

        (String::from_utf8(out).expect("output is utf-8"), result)
    }

    fn output(source: &str) -> String {
        let (printed, result) = run(source);
        if let Err(e) = result {
            panic!("program failed: {}", e);
        }
        printed
    }

    /// Output printed before the failure, and the runtime error message.
    fn failure(source: &str) -> (String, String) {
        match run(source) {
            (printed, Err(e @ RunError::Runtime(_))) => (printed, e.to_string()),
            (_, other) => panic!("expected a runtime error, got {:?}", other),
        }
    }

    #[test]
    fn test_class_and_instance_display() {
        assert_eq!(output("class A {} print A; print A();"), "A\nA instance\n");
        assert_eq!(output("class A { m() {} } print A().m;"), "<fn m>\n");
    }

    #[test]
    fn test_fields() {
        assert_eq!(
            output("class P {} var p = P(); p.x = 1; p.y = 2; print p.x + p.y;"),
            "3\n"
        );
        // A field shadows a method of the same name.
        assert_eq!(
            output("class A { m() { return 1; } } var a = A(); a.m = 2; print a.m;"),
            "2\n"
        );
    }

    #[test]
    fn test_methods_see_this() {
        let source = r#"
            class Greeter {
              init(name) { this.name = name; }
              greet() { return "hi " + this.name; }
            }
            print Greeter("bob").greet();
        "#;

        assert_eq!(output(source), "hi bob\n");
    }

    #[test]
    fn test_bound_method_keeps_its_instance() {
        let source = r#"
            class A {
              init() { this.v = 7; }
              get() { return this.v; }
            }
            var g = A().get;
            print g();
        "#;

        assert_eq!(output(source), "7\n");
    }

    #[test]
    fn test_this_inside_nested_function() {
        let source = r#"
            class Box {
              init() { this.v = "boxed"; }
              getter() {
                fun inner() { return this.v; }
                return inner;
              }
            }
            print Box().getter()();
        "#;

        assert_eq!(output(source), "boxed\n");
    }

    #[test]
    fn test_initializer_returns_this() {
        assert_eq!(
            output("class A { init() { this.v = 1; } } var a = A(); print a.init() == a;"),
            "true\n"
        );
        assert_eq!(
            output("class A { init() { this.v = 1; return; this.v = 2; } } print A().v;"),
            "1\n"
        );
    }

    #[test]
    fn test_class_arity_follows_init() {
        assert_eq!(
            failure("class A { init(a, b) {} } A(1);").1,
            "Expected 2 arguments but got 1.\n[line 1]"
        );
        assert_eq!(
            failure("class B {} B(1);").1,
            "Expected 0 arguments but got 1.\n[line 1]"
        );
    }

    #[test]
    fn test_inherited_methods() {
        assert_eq!(
            output("class A { hi() { print \"hi\"; } } class B < A {} B().hi();"),
            "hi\n"
        );
    }

    #[test]
    fn test_super_call_runs_once_with_this_bound() {
        let source = r#"
            var calls = 0;
            class A {
              greet() { calls = calls + 1; return "A:" + this.name; }
            }
            class B < A {
              init() { this.name = "b"; }
              greet() { return "B>" + super.greet(); }
            }
            print B().greet();
            print calls;
        "#;

        assert_eq!(output(source), "B>A:b\n1\n");
    }

    #[test]
    fn test_super_binds_statically() {
        let source = r#"
            class A { m() { return "A"; } }
            class B < A { m() { return "B" + super.m(); } }
            class C < B { m() { return "C" + super.m(); } }
            print C().m();
        "#;

        assert_eq!(output(source), "CBA\n");
    }

    #[test]
    fn test_superclass_init_is_not_called_implicitly() {
        let source = r#"
            class A { init() { this.a = "set"; } }
            class B < A { init() { this.b = "b"; } }
            var b = B();
            print b.b;
            print b.a;
        "#;

        assert_eq!(
            failure(source),
            ("b\n".to_string(), "Undefined property 'a'.\n[line 6]".to_string())
        );

        let source = r#"
            class A { init() { this.a = "set"; } }
            class B < A { init() { super.init(); this.b = "b"; } }
            var b = B();
            print b.a + b.b;
        "#;

        assert_eq!(output(source), "setb\n");
    }

    #[test]
    fn test_superclass_must_be_a_class() {
        assert_eq!(
            failure("var NotClass = 1; class B < NotClass {}").1,
            "Superclass must be a class.\n[line 1]"
        );
    }

    #[test]
    fn test_property_errors() {
        assert_eq!(
            failure("class A {} print A().missing;").1,
            "Undefined property 'missing'.\n[line 1]"
        );
        assert_eq!(
            failure("var x = 1; print x.y;").1,
            "Only instances have properties.\n[line 1]"
        );
        assert_eq!(
            failure("var x = 1; x.y = 2;").1,
            "Only instances have fields.\n[line 1]"
        );
    }

    #[test]
    fn test_instances_compare_by_identity() {
        assert_eq!(
            output("class A {} var a = A(); var b = A(); print a == a; print a == b;"),
            "true\nfalse\n"
        );
    }
}
