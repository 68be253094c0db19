//! Class/interface/mixin semantic-rule diagnostics.

mod support;

use support::check;
use zena_common::diagnostics::codes;

#[test]
fn duplicate_top_level_declaration_is_rejected() {
    let result = check("let x = 1;\nlet x = 2;\n");
    assert!(result.codes().contains(&codes::DUPLICATE_DECLARATION));
}

#[test]
fn second_function_with_the_same_name_is_an_overload_not_a_duplicate() {
    let result = check(
        "function greet(name: string): string { return name; }\nfunction greet(): string { return \"hi\"; }\n",
    );
    assert!(!result.codes().contains(&codes::DUPLICATE_DECLARATION));
}

#[test]
fn mixin_constructor_is_rejected() {
    let result = check("mixin Greets {\n  new() {}\n}\n");
    assert!(result.codes().contains(&codes::CONSTRUCTOR_IN_MIXIN));
}

#[test]
fn abstract_class_may_leave_methods_unimplemented() {
    let result = check("abstract class Shape {\n  abstract area(): i32;\n}\n");
    assert!(!result.has_errors());
}

#[test]
fn concrete_class_must_implement_inherited_abstract_methods() {
    let result = check("abstract class Shape {\n  abstract area(): i32;\n}\nclass Square extends Shape {\n}\n");
    assert!(result.codes().contains(&codes::ABSTRACT_METHOD_NOT_IMPLEMENTED));
}

#[test]
fn concrete_class_implementing_the_abstract_method_is_accepted() {
    let result =
        check("abstract class Shape {\n  abstract area(): i32;\n}\nclass Square extends Shape {\n  area(): i32 { return 4; }\n}\n");
    assert!(!result.has_errors());
}

#[test]
fn instantiating_an_abstract_class_is_rejected() {
    let result = check("abstract class Shape {\n  abstract area(): i32;\n}\nlet s = new Shape();\n");
    assert!(result.codes().contains(&codes::CANNOT_INSTANTIATE_ABSTRACT_CLASS));
}

#[test]
fn non_nullable_field_unassigned_by_the_constructor_is_rejected() {
    let result = check("class Point {\n  x: i32;\n  y: i32;\n  new(x: i32) { this.x = x; }\n}\n");
    assert!(result.codes().contains(&codes::UNASSIGNED_FIELD));
}

#[test]
fn constructor_assigning_every_field_is_accepted() {
    let result = check("class Point {\n  x: i32;\n  y: i32;\n  new(x: i32, y: i32) { this.x = x; this.y = y; }\n}\n");
    assert!(!result.has_errors());
}

#[test]
fn generic_class_with_wrong_argument_count_is_rejected() {
    let result = check("class Box<T> {\n  value: T;\n  new(value: T) { this.value = value; }\n}\nlet b: Box<i32, bool> = new Box<i32>(1);\n");
    assert!(result.codes().contains(&codes::GENERIC_TYPE_ARGUMENT_MISMATCH));
}

#[test]
fn generic_class_instantiated_with_the_right_argument_count_is_accepted() {
    let result = check("class Box<T> {\n  value: T;\n  new(value: T) { this.value = value; }\n}\nlet b: Box<i32> = new Box<i32>(1);\n");
    assert!(!result.has_errors());
}

#[test]
fn generic_field_access_substitutes_the_type_argument() {
    let result = check(
        "class Box<T> {\n  value: T;\n  new(value: T) { this.value = value; }\n}\nlet b = new Box<i32>(1);\nlet n: i32 = b.value;\n",
    );
    assert!(!result.has_errors());
}

#[test]
fn generic_field_access_rejects_a_mismatched_target_type() {
    let result = check(
        "class Box<T> {\n  value: T;\n  new(value: T) { this.value = value; }\n}\nlet b = new Box<i32>(1);\nlet n: bool = b.value;\n",
    );
    assert!(result.codes().contains(&codes::TYPE_MISMATCH));
}
