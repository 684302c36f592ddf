//! Dotling: a small dynamically-typed language built around Python-style
//! dotted imports.
//!
//! The interesting part is the module machinery: `import a.b.c;` walks the
//! dotted path root-first, loads each prefix exactly once into a per-
//! interpreter registry, and binds each child module as an attribute of its
//! parent package. See [`module`] for the loader and [`interpreter`] for the
//! tree-walking evaluator that drives it.

#![allow(clippy::module_inception)]
#![allow(clippy::result_large_err)]
#![allow(clippy::new_without_default)]

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod module;
pub mod parser;
pub mod span;

use std::path::Path;

use error::DotlingError;
use interpreter::Interpreter;

/// Parse source text into a program without executing it.
pub fn parse(source: &str) -> Result<ast::Program, DotlingError> {
    let tokens = lexer::Scanner::new(source).scan_tokens()?;
    let program = parser::Parser::new(tokens).parse()?;
    Ok(program)
}

/// Run a Dotling program from source code. Imports resolve against the
/// current directory.
pub fn run(source: &str) -> Result<(), DotlingError> {
    let mut interpreter = Interpreter::new();
    run_in(&mut interpreter, source)
}

/// Run a Dotling script from a file. Imports resolve against the script's
/// directory.
pub fn run_file(path: &Path) -> Result<(), DotlingError> {
    let source = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    let mut interpreter = Interpreter::with_search_paths(vec![base_dir]);
    run_in(&mut interpreter, &source)
}

/// Run source text inside an existing interpreter, keeping its registry and
/// scope across calls.
pub fn run_in(interpreter: &mut Interpreter, source: &str) -> Result<(), DotlingError> {
    let program = parse(source)?;
    interpreter.interpret(&program)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use std::rc::Rc;

    use crate::interpreter::{Interpreter, Output, Value};
    use crate::module::ModuleName;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn captured(buffer: &Rc<RefCell<Vec<u8>>>) -> String {
        String::from_utf8(buffer.borrow().clone()).unwrap()
    }

    fn interpreter_at(root: &Path) -> (Interpreter, Rc<RefCell<Vec<u8>>>) {
        let (output, buffer) = Output::buffer();
        (
            Interpreter::with_output(vec![root.to_path_buf()], output),
            buffer,
        )
    }

    fn run(interpreter: &mut Interpreter, source: &str) {
        super::run_in(interpreter, source).unwrap();
    }

    fn name(dotted: &str) -> ModuleName {
        ModuleName::parse(dotted).unwrap()
    }

    /// A module tree mirroring the demo layout: two subpackages whose
    /// modules each define a greeting function.
    fn demo_tree(root: &Path) {
        write(
            root,
            "examples_pkg/mod.dtl",
            "import examples_pkg.subpkg2;\n",
        );
        write(
            root,
            "examples_pkg/subpkg1/mod.dtl",
            "import examples_pkg.subpkg1.module1;\n",
        );
        write(
            root,
            "examples_pkg/subpkg1/module1.dtl",
            "fn greet_subpkg1() {\n    print(\"Hello from subpkg1.module1\");\n}\n",
        );
        write(
            root,
            "examples_pkg/subpkg2/mod.dtl",
            "import examples_pkg.subpkg2.module2;\n",
        );
        write(
            root,
            "examples_pkg/subpkg2/module2.dtl",
            "fn greet_subpkg2() {\n    print(\"Hello from subpkg2.module2\");\n}\n",
        );
    }

    #[test]
    fn runs_hello_world() {
        let (mut interp, buffer) = interpreter_at(Path::new("."));
        run(&mut interp, "print(\"hello\", \"world\");");
        assert_eq!(captured(&buffer), "hello world\n");
    }

    #[test]
    fn import_registers_every_prefix() {
        let dir = tempfile::tempdir().unwrap();
        demo_tree(dir.path());

        let (mut interp, _buffer) = interpreter_at(dir.path());
        run(&mut interp, "import examples_pkg.subpkg1;");

        let registry = interp.loader().registry();
        assert!(registry.contains(&name("examples_pkg")));
        assert!(registry.contains(&name("examples_pkg.subpkg1")));
        // Loaded by subpkg1's own init, not by the import statement above.
        assert!(registry.contains(&name("examples_pkg.subpkg1.module1")));
        // The eager side of the package init.
        assert!(registry.contains(&name("examples_pkg.subpkg2")));
        assert!(registry.contains(&name("examples_pkg.subpkg2.module2")));
    }

    #[test]
    fn parent_attribute_is_the_registry_object() {
        let dir = tempfile::tempdir().unwrap();
        demo_tree(dir.path());

        let (mut interp, _buffer) = interpreter_at(dir.path());
        run(&mut interp, "import examples_pkg.subpkg1;");

        let parent = interp
            .loader()
            .registry()
            .get(&name("examples_pkg"))
            .unwrap();
        let attr = parent.borrow().get("subpkg1").unwrap();
        let registered = interp
            .loader()
            .registry()
            .get(&name("examples_pkg.subpkg1"))
            .unwrap();
        match attr {
            Value::Module(m) => assert!(Rc::ptr_eq(&m, &registered)),
            other => panic!("expected module attribute, got {:?}", other),
        }
    }

    #[test]
    fn greeting_reachable_through_dotted_attributes() {
        let dir = tempfile::tempdir().unwrap();
        demo_tree(dir.path());

        let (mut interp, buffer) = interpreter_at(dir.path());
        run(
            &mut interp,
            "import examples_pkg.subpkg1;\nexamples_pkg.subpkg1.module1.greet_subpkg1();",
        );
        assert_eq!(captured(&buffer), "Hello from subpkg1.module1\n");
    }

    #[test]
    fn module_executes_once_across_repeated_imports() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "noisy.dtl", "print(\"side effect\");\n");

        let (mut interp, buffer) = interpreter_at(dir.path());
        run(&mut interp, "import noisy;\nimport noisy;\nimport noisy;");
        assert_eq!(captured(&buffer), "side effect\n");
    }

    #[test]
    fn unloaded_sibling_is_not_an_attribute() {
        let dir = tempfile::tempdir().unwrap();
        demo_tree(dir.path());
        // Present on disk, never imported by any init.
        write(dir.path(), "examples_pkg/orphan.dtl", "fn f() { }\n");

        let (mut interp, _buffer) = interpreter_at(dir.path());
        run(&mut interp, "import examples_pkg;");

        let err = super::run_in(&mut interp, "examples_pkg.orphan;").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("orphan"), "got: {}", message);
    }

    #[test]
    fn missing_module_reports_dotted_name() {
        let dir = tempfile::tempdir().unwrap();
        demo_tree(dir.path());

        let (mut interp, _buffer) = interpreter_at(dir.path());
        let err = super::run_in(&mut interp, "import examples_pkg.nowhere;").unwrap_err();
        assert!(err.to_string().contains("examples_pkg.nowhere"));
    }

    #[test]
    fn failing_module_leaves_no_registry_entry() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.dtl", "undefined_variable;\n");

        let (mut interp, _buffer) = interpreter_at(dir.path());
        assert!(super::run_in(&mut interp, "import broken;").is_err());
        assert!(!interp.loader().registry().contains(&name("broken")));
    }

    #[test]
    fn module_sees_its_own_name_and_package() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/mod.dtl", "");
        write(
            dir.path(),
            "pkg/b.dtl",
            "print(\"__name__:\", __name__);\nprint(\"__package__:\", __package__);\n",
        );

        let (mut interp, buffer) = interpreter_at(dir.path());
        run(&mut interp, "import pkg.b;");
        assert_eq!(captured(&buffer), "__name__: pkg.b\n__package__: pkg\n");
    }

    #[test]
    fn script_scope_stays_clean_of_deep_segments() {
        let dir = tempfile::tempdir().unwrap();
        demo_tree(dir.path());

        let (mut interp, _buffer) = interpreter_at(dir.path());
        run(&mut interp, "import examples_pkg.subpkg1;");

        // Only the head segment lands in the importing scope.
        assert!(interp.lookup("examples_pkg").is_some());
        assert!(interp.lookup("subpkg1").is_none());
        assert!(interp.lookup("module1").is_none());
    }

    #[test]
    fn hand_driven_load_sequence_matches_import() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/mod.dtl", "");
        write(
            dir.path(),
            "pkg/a.dtl",
            "fn f_in_a() {\n    print(\"f_in_a called\");\n}\n",
        );

        let (mut interp, buffer) = interpreter_at(dir.path());
        let target = name("pkg.a");

        // The same steps `import pkg.a;` performs, driven one by one.
        let parent = interp.import_module(&name("pkg")).unwrap();
        let origin = interp.loader().locate(&target).unwrap();
        let module = interp.instantiate_module(&target, &origin);
        interp.execute_module(&module, &origin).unwrap();
        interp.loader_mut().register(&target, &module);
        interp
            .loader()
            .bind_to_parent(&parent, target.last(), &module)
            .unwrap();

        // The registry entry and the bound attribute are one object.
        let registered = interp.loader().registry().get(&target).unwrap();
        assert!(Rc::ptr_eq(&registered, &module));

        run(&mut interp, "import pkg;\npkg.a.f_in_a();");
        assert_eq!(captured(&buffer), "f_in_a called\n");
    }

    #[test]
    fn run_file_resolves_imports_next_to_script() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "helper.dtl", "fn twice(x) { return x + x; }\n");
        write(
            dir.path(),
            "main.dtl",
            "import helper;\nlet answer = helper.twice(21);\n",
        );

        super::run_file(&dir.path().join("main.dtl")).unwrap();
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(super::parse("let = ;").is_err());
    }

    #[test]
    fn parse_rejects_unclosed_paren() {
        assert!(super::parse("print(\"hi\";").is_err());
        assert!(super::parse("(").is_err());
    }

    #[test]
    fn integer_addition_overflow_is_an_error() {
        let (mut interp, _buffer) = interpreter_at(Path::new("."));
        let err = super::run_in(&mut interp, "9223372036854775807 + 1;").unwrap_err();
        assert!(err.to_string().contains("overflow"), "got: {}", err);
    }
}
