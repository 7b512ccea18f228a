//! The fixed, versioned set of runtime support-library function names
//! referenced by compiled expressions: the rewrite targets installed by
//! the filters and plugins, plus the coercion and comparison helpers the
//! code generator emits. An external runtime must implement all of them
//! with matching semantics.

// Rewrite targets installed by filters and plugins.
pub const FORMAT: &str = "format";
pub const JOIN: &str = "join";
pub const DATE_FORMAT: &str = "dateFormat";
pub const XSS: &str = "xss";
pub const URI_MANIPULATION: &str = "uriManipulation";
pub const USE: &str = "use";

// Helpers emitted by the code generator.
pub const EQ: &str = "eq";
pub const STRICT_EQ: &str = "strictEq";
pub const LT: &str = "lt";
pub const LEQ: &str = "leq";
pub const LENGTH: &str = "length";
pub const IS_WHITESPACE: &str = "isWhitespace";
pub const TO_BOOLEAN: &str = "toBoolean";
pub const TO_NUMBER: &str = "toNumber";
pub const TO_LONG: &str = "toLong";
pub const TO_STRING: &str = "toString";
pub const MAP: &str = "map";
pub const LIST: &str = "list";
pub const CALL: &str = "call";
