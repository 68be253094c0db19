//! Stable numeric diagnostic codes, partitioned by compiler phase.
//!
//! 1xxx: parser. 2xxx: checker. 3xxx: emitter (reserved for the downstream,
//! out-of-scope, emitter — never produced by this core). 9000+: internal
//! compiler errors (invariant violations).

/// Syntax errors (1xxx).
pub const UNEXPECTED_TOKEN: u32 = 1001;
pub const EXPECTED_TOKEN: u32 = 1002;

/// Resolution errors (2000-2099).
pub const SYMBOL_NOT_FOUND: u32 = 2000;
pub const MODULE_NOT_FOUND: u32 = 2001;
pub const PROPERTY_NOT_FOUND: u32 = 2002;

/// Type errors (2100-2199).
pub const TYPE_MISMATCH: u32 = 2100;
pub const ARGUMENT_COUNT_MISMATCH: u32 = 2101;
pub const GENERIC_TYPE_ARGUMENT_MISMATCH: u32 = 2102;
pub const NOT_CALLABLE: u32 = 2103;
pub const NOT_INDEXABLE: u32 = 2104;

/// Semantic-rule errors (2200-2299).
pub const DUPLICATE_DECLARATION: u32 = 2200;
pub const CONSTRUCTOR_IN_MIXIN: u32 = 2201;
pub const ABSTRACT_METHOD_NOT_IMPLEMENTED: u32 = 2202;
pub const CANNOT_INSTANTIATE_ABSTRACT_CLASS: u32 = 2203;
pub const EXTENSION_CLASS_FIELD: u32 = 2204;
pub const RETURN_OUTSIDE_FUNCTION: u32 = 2205;
pub const BREAK_OUTSIDE_LOOP: u32 = 2206;
pub const CONTINUE_OUTSIDE_LOOP: u32 = 2207;
pub const UNREACHABLE_CODE: u32 = 2208;
pub const UNASSIGNED_FIELD: u32 = 2209;
pub const OPTIONAL_FIELD_REQUIRES_DEFAULT: u32 = 2210;
pub const TOP_LEVEL_DESTRUCTURING_UNSUPPORTED: u32 = 2211;

/// Intrinsic/decorator errors (2300-2399).
pub const UNKNOWN_INTRINSIC: u32 = 2300;
pub const MISSING_EXTERNAL: u32 = 2301;
pub const DECORATOR_NOT_ALLOWED: u32 = 2302;

/// Internal compiler errors.
pub const INTERNAL_ERROR: u32 = 9000;
