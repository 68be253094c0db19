//! Expression-typing diagnostics: calls, member/index access, patterns.

mod support;

use support::check;
use zena_common::diagnostics::codes;

#[test]
fn calling_a_non_function_member_is_rejected() {
    let result =
        check("class Point {\n  x: i32;\n  new(x: i32) { this.x = x; }\n}\nlet p = new Point(1);\nlet y = p.x();\n");
    assert!(result.codes().contains(&codes::NOT_CALLABLE));
}

#[test]
fn wrong_argument_count_is_rejected() {
    let result = check("function add(a: i32, b: i32): i32 { return a + b; }\nlet x = add(1);\n");
    assert!(result.codes().contains(&codes::ARGUMENT_COUNT_MISMATCH));
}

#[test]
fn matching_argument_count_and_types_is_accepted() {
    let result = check("function add(a: i32, b: i32): i32 { return a + b; }\nlet x = add(1, 2);\n");
    assert!(!result.has_errors());
}

#[test]
fn accessing_an_unknown_property_is_rejected() {
    let result = check("class Point {\n  x: i32;\n  new(x: i32) { this.x = x; }\n}\nlet p = new Point(1);\nlet y = p.z;\n");
    assert!(result.codes().contains(&codes::PROPERTY_NOT_FOUND));
}

#[test]
fn indexing_a_non_indexable_value_is_rejected() {
    let result = check("class Point {\n  x: i32;\n  new(x: i32) { this.x = x; }\n}\nlet p = new Point(1);\nlet y = p[0];\n");
    assert!(result.codes().contains(&codes::NOT_INDEXABLE));
}

#[test]
fn indexing_an_array_parameter_is_accepted() {
    let result = check("function first(xs: i32[]): i32 {\n  return xs[0];\n}\n");
    assert!(!result.has_errors());
}

#[test]
fn return_outside_a_function_is_rejected() {
    let result = check("return 1;\n");
    assert!(result.codes().contains(&codes::RETURN_OUTSIDE_FUNCTION));
}

#[test]
fn break_outside_a_loop_is_rejected() {
    let result = check("function f(): void { break; }\n");
    assert!(result.codes().contains(&codes::BREAK_OUTSIDE_LOOP));
}

#[test]
fn break_inside_a_loop_is_accepted() {
    let result = check("function f(): void {\n  while (true) { break; }\n}\n");
    assert!(!result.has_errors());
}

#[test]
fn code_after_return_is_flagged_unreachable() {
    let result = check("function f(): i32 {\n  return 1;\n  let x = 2;\n}\n");
    assert!(result.codes().contains(&codes::UNREACHABLE_CODE));
}

#[test]
fn destructuring_an_optional_field_without_a_default_is_rejected() {
    let result = check("let { x }: { x?: i32 } = { x: 1 };\n");
    assert!(result.codes().contains(&codes::OPTIONAL_FIELD_REQUIRES_DEFAULT));
}

#[test]
fn destructuring_an_optional_field_with_a_default_is_accepted() {
    let result = check("let { x = 0 }: { x?: i32 } = { x: 1 };\n");
    assert!(!result.has_errors());
}
