#[cfg(test)]
mod resolver_tests {
    use pretty_assertions::assert_eq;
    use rox_lox as lox;

    use lox::lox::parse_source;
    use lox::resolver::{Locals, Resolver};
    use lox::stmt::Stmt;

    fn resolve(source: &str) -> Result<Locals, Vec<String>> {
        let statements: Vec<Stmt> = parse_source(source).expect("parses");

        Resolver::new()
            .resolve(&statements)
            .map_err(|errors| errors.iter().map(ToString::to_string).collect())
    }

    fn distances(source: &str) -> Vec<usize> {
        let mut distances: Vec<usize> = resolve(source)
            .unwrap_or_else(|errors| panic!("resolve failed: {:?}", errors))
            .into_values()
            .collect();
        distances.sort_unstable();
        distances
    }

    #[test]
    fn test_globals_get_no_entry() {
        assert_eq!(distances("var a = 1; print a; a = 2;"), Vec::<usize>::new());
    }

    #[test]
    fn test_block_distances() {
        assert_eq!(distances("{ var a = 1; print a; { print a; } }"), vec![0, 1]);
    }

    #[test]
    fn test_closure_distances() {
        // `i` is read and assigned from `count`, one scope above the function body.
        assert_eq!(
            distances("fun make() { var i = 0; fun count() { i = i + 1; return i; } return count; }"),
            vec![0, 1, 1, 1]
        );
    }

    #[test]
    fn test_this_and_super_distances() {
        assert_eq!(distances("class A { f() { return this; } }"), vec![1]);
        assert_eq!(
            distances("class A { f() {} } class B < A { f() { return super.f; } }"),
            vec![2]
        );
    }

    #[test]
    fn test_resolving_twice_is_stable() {
        let statements: Vec<Stmt> =
            parse_source("{ var a = 1; fun f(b) { return a + b; } print f(2); }").expect("parses");

        let first: Locals = Resolver::new().resolve(&statements).expect("resolves");
        let second: Locals = Resolver::new().resolve(&statements).expect("resolves");

        assert_eq!(first, second);
    }

    #[test]
    fn test_read_in_own_initializer() {
        assert_eq!(
            resolve("{ var a = a; }"),
            Err(vec![
                "[line 1] Error at 'a': Can't read local variable in its own initializer.".to_string()
            ])
        );
    }

    #[test]
    fn test_duplicate_local() {
        assert_eq!(
            resolve("{ var a = 1; var a = 2; }"),
            Err(vec![
                "[line 1] Error at 'a': Already a variable with this name in this scope.".to_string()
            ])
        );

        // Globals may be redeclared.
        assert!(resolve("var a = 1; var a = 2;").is_ok());
    }

    #[test]
    fn test_misplaced_return() {
        assert_eq!(
            resolve("return 1;"),
            Err(vec!["[line 1] Error at 'return': Can't return from top-level code.".to_string()])
        );
        assert_eq!(
            resolve("class A { init() { return 1; } }"),
            Err(vec![
                "[line 1] Error at 'return': Can't return a value from an initializer.".to_string()
            ])
        );
        assert!(resolve("class A { init() { return; } }").is_ok());
    }

    #[test]
    fn test_misplaced_this_and_super() {
        assert_eq!(
            resolve("print this;"),
            Err(vec!["[line 1] Error at 'this': Can't use 'this' outside of a class.".to_string()])
        );
        assert_eq!(
            resolve("fun f() { super.g(); }"),
            Err(vec!["[line 1] Error at 'super': Can't use 'super' outside of a class.".to_string()])
        );
        assert_eq!(
            resolve("class A { f() { super.f(); } }"),
            Err(vec![
                "[line 1] Error at 'super': Can't use 'super' in a class with no superclass."
                    .to_string()
            ])
        );
    }

    #[test]
    fn test_class_cannot_inherit_from_itself() {
        assert_eq!(
            resolve("class A < A {}"),
            Err(vec!["[line 1] Error at 'A': A class can't inherit from itself.".to_string()])
        );
    }

    #[test]
    fn test_reports_every_error() {
        assert_eq!(
            resolve("return 1;\nprint this;"),
            Err(vec![
                "[line 1] Error at 'return': Can't return from top-level code.".to_string(),
                "[line 2] Error at 'this': Can't use 'this' outside of a class.".to_string(),
            ])
        );
    }
}
