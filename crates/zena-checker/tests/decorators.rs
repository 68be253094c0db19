//! `@external`/`@intrinsic` decorator validation.

mod support;

use support::check;
use zena_common::diagnostics::codes;

#[test]
fn declare_function_without_a_decorator_is_rejected() {
    let result = check("declare function mystery(): i32;\n");
    assert!(result.codes().contains(&codes::MISSING_EXTERNAL));
}

#[test]
fn declare_function_with_external_is_accepted() {
    let result = check("@external(\"env\", \"log\")\ndeclare function log(msg: string): void;\n");
    assert!(!result.has_errors());
}

#[test]
fn declare_function_with_a_non_wasm_intrinsic_name_is_rejected() {
    let result = check("@intrinsic(\"i32.garbage\")\ndeclare function oops(): i32;\n");
    assert!(result.codes().contains(&codes::UNKNOWN_INTRINSIC));
}

#[test]
fn declare_function_with_a_wasm_intrinsic_is_accepted() {
    let result = check("@intrinsic(\"wasm.i32.add\")\ndeclare function add(a: i32, b: i32): i32;\n");
    assert!(!result.has_errors());
}

#[test]
fn decorator_on_an_ordinary_function_is_not_allowed() {
    let result = check("@external(\"env\", \"log\")\nfunction log(msg: string): void {}\n");
    assert!(result.codes().contains(&codes::DECORATOR_NOT_ALLOWED));
}

#[test]
fn unknown_decorator_name_is_rejected() {
    let result = check("@sparkle\ndeclare function f(): void;\n");
    assert!(result.codes().contains(&codes::DECORATOR_NOT_ALLOWED));
}
