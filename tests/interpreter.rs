use glox::error::LoxError;
use glox::lox::Lox;

/// Run one source text through a fresh session, capturing stdout.
fn run(source: &str) -> Result<String, Vec<LoxError>> {
    let mut output: Vec<u8> = Vec::new();

    let result = {
        let mut session = Lox::new(&mut output);
        session.run(source)
    };

    result.map(|()| String::from_utf8(output).expect("interpreter output is valid UTF-8"))
}

fn expect_output(name: &str, source: &str, expected: &str) {
    let actual = run(source).unwrap_or_else(|e| panic!("scenario '{}' failed: {:?}", name, e));

    assert_eq!(actual, expected, "scenario '{}'", name);
}

#[test]
fn program_output() {
    let cases: &[(&str, &str, &str)] = &[
        ("arithmetic precedence", "print 1 + 2 * 3;", "7\n"),
        (
            "nested shadowing",
            "var a = \"global a\";\n\
             {\n\
               var a = \"outer a\";\n\
               {\n\
                 var a = \"inner a\";\n\
                 print a;\n\
               }\n\
               print a;\n\
             }\n\
             print a;\n",
            "inner a\nouter a\nglobal a\n",
        ),
        (
            "if stmt",
            "if (false)\n  print \"ok\";\nelse\n  print \"not ok\";\n",
            "not ok\n",
        ),
        ("or stmt", "print (false or \"qwer\");", "qwer\n"),
        ("and stmt", "print (\"qwer\" and \"foo\");", "foo\n"),
        (
            "while stmt",
            "var x = 1;\nwhile (x < 3) {\n  print \"x: \" + x;\n  x = x + 1;\n}\n",
            "x: 1\nx: 2\n",
        ),
        (
            "c-style for loop",
            "var x = 0;\n\
             var t;\n\
             for (var y = 1; y < 10; y = t + y) {\n\
               print y;\n\
               t = x;\n\
               x = y;\n\
             }\n",
            "1\n1\n2\n3\n5\n8\n",
        ),
        (
            "user-defined function",
            "fun sayHi(first, last) {\n\
               print \"Hi, \" + first + \" \" + last + \"!\";\n\
             }\n\
             sayHi(\"Dear\", \"Reader\");\n",
            "Hi, Dear Reader!\n",
        ),
        (
            "recursive fibonacci",
            "fun fib(n) {\n\
               if (n <= 1) return n;\n\
               return fib(n - 2) + fib(n - 1);\n\
             }\n\
             for (var i = 0; i < 6; i = i + 1) print fib(i);\n",
            "0\n1\n1\n2\n3\n5\n",
        ),
        (
            "string coercion on plus",
            "print 1 + \"a\";\nprint \"a\" + 1;\nprint true + \"!\";\n",
            "1a\na1\ntrue!\n",
        ),
        (
            "unary operators",
            "print -(3 + 4);\nprint !nil;\nprint !0;\n",
            "-7\ntrue\nfalse\n",
        ),
        (
            "equality rules",
            "print nil == nil;\nprint 1 == \"1\";\nprint \"a\" == \"a\";\nprint 1 != 2;\n",
            "true\nfalse\ntrue\ntrue\n",
        ),
        ("zero over zero is nan", "print 0 / 0;", "NaN\n"),
        ("nan equals nan", "print 0/0 == 0/0;", "true\n"),
        (
            "number formatting",
            "print 123.489;\nprint 123.0;\nprint 0.5;\n",
            "123.489\n123\n0.5\n",
        ),
        (
            "falling off a body returns nil",
            "fun f() {}\nprint f();",
            "nil\n",
        ),
        (
            "return unwinds nested blocks and loops",
            "fun find() {\n\
               var i = 0;\n\
               while (true) {\n\
                 {\n\
                   if (i == 3) return i;\n\
                 }\n\
                 i = i + 1;\n\
               }\n\
             }\n\
             print find();\n",
            "3\n",
        ),
        (
            "return skips the rest of the body",
            "fun f() {\n  return 1;\n  print \"unreachable\";\n}\nprint f();\n",
            "1\n",
        ),
        (
            "closures capture their declaration environment",
            "fun makeCounter() {\n\
               var i = 0;\n\
               fun count() {\n\
                 i = i + 1;\n\
                 print i;\n\
               }\n\
               return count;\n\
             }\n\
             var counter = makeCounter();\n\
             counter();\n\
             counter();\n",
            "1\n2\n",
        ),
        (
            "closures do not see later shadowing",
            "var a = \"global\";\n\
             {\n\
               fun showA() {\n\
                 print a;\n\
               }\n\
               showA();\n\
               var a = \"block\";\n\
               showA();\n\
             }\n",
            "global\nglobal\n",
        ),
        (
            "assignment to an undeclared global creates it",
            "a = 5;\nprint a;",
            "5\n",
        ),
        (
            "functions can mutate globals",
            "var g = 1;\nfun bump() { g = g + 1; }\nbump();\nprint g;",
            "2\n",
        ),
        (
            "callable display strings",
            "fun f() {}\nprint f;\nprint clock;",
            "<fn f>\n<native fn>\n",
        ),
        (
            "arguments evaluate left to right",
            "var n = 0;\n\
             fun next() {\n\
               n = n + 1;\n\
               return n;\n\
             }\n\
             fun pair(a, b) {\n\
               print a + \", \" + b;\n\
             }\n\
             pair(next(), next());\n",
            "1, 2\n",
        ),
    ];

    for (name, source, expected) in cases {
        expect_output(name, source, expected);
    }
}

#[test]
fn clock_returns_seconds_since_epoch() {
    expect_output("clock is positive", "print clock() > 0;", "true\n");
}

// ─────────────────────────────────────────────────────────────────────────
// Error scenarios
// ─────────────────────────────────────────────────────────────────────────

fn expect_runtime_error(source: &str, needle: &str) {
    let errors = run(source).expect_err("should fail at runtime");

    assert_eq!(errors.len(), 1, "got: {:?}", errors);
    assert!(
        matches!(errors[0], LoxError::Runtime { .. }),
        "expected a runtime error, got: {:?}",
        errors[0]
    );
    assert!(
        errors[0].to_string().contains(needle),
        "expected '{}' in: {}",
        needle,
        errors[0]
    );
}

fn expect_resolve_error(source: &str, needle: &str) {
    let errors = run(source).expect_err("should fail in resolution");

    assert_eq!(errors.len(), 1, "got: {:?}", errors);
    assert!(
        matches!(errors[0], LoxError::Resolve { .. }),
        "expected a resolve error, got: {:?}",
        errors[0]
    );
    assert!(
        errors[0].to_string().contains(needle),
        "expected '{}' in: {}",
        needle,
        errors[0]
    );
}

#[test]
fn dividing_a_nonzero_number_by_zero_fails() {
    expect_runtime_error("print 1 / 0;", "Cannot divide by zero.");
}

#[test]
fn adding_a_number_and_a_boolean_fails() {
    expect_runtime_error("print 1 + true;", "Operands must be");
}

#[test]
fn comparing_mixed_types_fails() {
    expect_runtime_error("print 1 < \"2\";", "Operand must be a number.");
}

#[test]
fn negating_a_string_fails() {
    expect_runtime_error("print -\"x\";", "Operand must be a number.");
}

#[test]
fn reading_an_undefined_variable_fails() {
    expect_runtime_error("print foo;", "Undefined variable: foo.");
}

#[test]
fn calling_a_non_callable_fails() {
    expect_runtime_error(
        "\"totally not a function\"();",
        "Can only call functions and classes.",
    );
}

#[test]
fn arity_mismatch_fails() {
    expect_runtime_error("fun f(a) {}\nf(1, 2);", "Expected 1 arguments but got 2.");
}

#[test]
fn reading_a_local_in_its_own_initializer_fails() {
    expect_resolve_error(
        "{\n  var a = a;\n}",
        "Can't read local variable in its own initializer.",
    );
}

#[test]
fn redeclaring_in_the_same_scope_fails() {
    expect_resolve_error(
        "{\n  var a = 1;\n  var a = 2;\n}",
        "already exists in the scope",
    );
}

#[test]
fn top_level_return_fails() {
    expect_resolve_error("return 5;", "'return' used outside of function");
}

#[test]
fn unterminated_string_is_a_lex_error() {
    let errors = run("\"abc").expect_err("should fail to lex");

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], LoxError::Lex { .. }));
    assert!(errors[0].to_string().contains("Unterminated string"));
}

#[test]
fn lex_errors_are_accumulated() {
    let errors = run("#$\nprint 1;").expect_err("should fail to lex");

    assert_eq!(errors.len(), 2, "got: {:?}", errors);
    assert!(errors.iter().all(|e| matches!(e, LoxError::Lex { .. })));
}

#[test]
fn missing_semicolon_is_a_parse_error() {
    let errors = run("print 1").expect_err("should fail to parse");

    assert!(matches!(errors[0], LoxError::Parse { .. }));
    assert!(errors[0].to_string().contains("Expected ';'"));
}

// ─────────────────────────────────────────────────────────────────────────
// Session behavior
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn definitions_persist_across_runs_in_one_session() {
    let mut output: Vec<u8> = Vec::new();

    {
        let mut session = Lox::new(&mut output);

        session
            .run("fun add(a, b) { return a + b; }")
            .expect("definition runs cleanly");

        session.run("print add(40, 2);").expect("call runs cleanly");
    }

    assert_eq!(String::from_utf8(output).unwrap(), "42\n");
}

#[test]
fn a_session_survives_failed_runs() {
    let mut output: Vec<u8> = Vec::new();

    {
        let mut session = Lox::new(&mut output);

        assert!(session.run("print missing;").is_err());

        session.run("print \"still here\";").expect("session is intact");
    }

    assert_eq!(String::from_utf8(output).unwrap(), "still here\n");
}

#[test]
fn the_environment_is_restored_after_an_error_inside_a_block() {
    let mut output: Vec<u8> = Vec::new();

    {
        let mut session = Lox::new(&mut output);

        assert!(session
            .run("var a = 1;\n{\n  var a = 2;\n  print a + true;\n}")
            .is_err());

        session.run("print a;").expect("globals are intact");
    }

    assert_eq!(String::from_utf8(output).unwrap(), "1\n");
}
