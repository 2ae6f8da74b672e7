//! The closed catalog of Mew diagnostics.
//!
//! Codes 1000-1099 are syntactic, 1100-1199 semantic, 2000-2099 lexical.
//! Struct and type declaration codes are reserved for declarations the
//! parser does not accept yet.

use super::*;

macro_rules! diag {
    ($code:expr, Error, $msg:expr) => {
        DiagnosticMessage { code: $code, severity: Severity::Error, message: $msg }
    };
    ($code:expr, Warning, $msg:expr) => {
        DiagnosticMessage { code: $code, severity: Severity::Warning, message: $msg }
    };
}

// ========================================================================
// Parser errors (1000-1099)
// ========================================================================
pub const EXPECTED_SEMICOLON: DiagnosticMessage = diag!(1000, Error, "Expected ';'");
pub const EXPECTED_VARIABLE_NAME: DiagnosticMessage = diag!(1001, Error, "Expected variable name");
pub const EXPECTED_RPAREN: DiagnosticMessage = diag!(1003, Error, "Expected ')'");
pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1005, Error, "Unterminated string literal");
pub const EXPRESSION_STATEMENTS_NOT_ALLOWED: DiagnosticMessage = diag!(1006, Error, "An expression can not be used as a statement");
pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(1007, Error, "Invalid assignment target");
pub const EXPECTED_RBRACE_AFTER_BLOCK: DiagnosticMessage = diag!(1008, Error, "Expected '}' after block");
pub const EXPECTED_FUNCTION_NAME_LEGACY: DiagnosticMessage = diag!(1009, Error, "Expected function name");
pub const EXPECTED_LPAREN_AFTER_FUNCTION_NAME: DiagnosticMessage = diag!(1010, Error, "Expected '(' after function name");
pub const PARAMETER_LIMIT_REACHED: DiagnosticMessage = diag!(1011, Error, "Can't have more than 255 parameters");
pub const EXPECTED_PARAMETER_NAME: DiagnosticMessage = diag!(1012, Error, "Expected parameter name");
pub const EXPECTED_RPAREN_AFTER_PARAMETERS: DiagnosticMessage = diag!(1013, Error, "Expected ')' after parameters");
pub const EXPECTED_LBRACE_BEFORE_FUNCTION_BODY: DiagnosticMessage = diag!(1014, Error, "Expected '{' before function body");
pub const EXPECTED_LPAREN_AFTER_IF: DiagnosticMessage = diag!(1015, Error, "Expected '(' after 'if'");
pub const EXPECTED_RPAREN_AFTER_CONDITION: DiagnosticMessage = diag!(1016, Error, "Expected ')' after condition");
pub const EXPECTED_COLON: DiagnosticMessage = diag!(1017, Error, "Expected ':'");
pub const EXPECTED_EQUAL: DiagnosticMessage = diag!(1018, Error, "Expected '='");
pub const UNRECOGNIZED_EXPRESSION: DiagnosticMessage = diag!(1019, Error, "Expected a literal value, a parenthesized expression, or a function call at this location");
pub const EXPECTED_LBRACE: DiagnosticMessage = diag!(1020, Error, "Expected '{'");
pub const EXPECTED_PARAMETER_NAME_LEGACY: DiagnosticMessage = diag!(1021, Error, "Expected parameter name");
pub const EXPECTED_TYPE: DiagnosticMessage = diag!(1022, Error, "Expected type");
pub const EXPECTED_FUNCTION_NAME: DiagnosticMessage = diag!(1023, Error, "Expected function name");
pub const EXPECTED_STRUCT_NAME: DiagnosticMessage = diag!(1024, Error, "Expected struct name");
pub const EXPECTED_LBRACE_BEFORE_STRUCT_BODY: DiagnosticMessage = diag!(1025, Error, "Expected '{' before struct body");
pub const EXPECTED_RBRACE_AFTER_STRUCT_BODY: DiagnosticMessage = diag!(1026, Error, "Expected '}' after struct body");
pub const EXPECTED_FIELD_NAME: DiagnosticMessage = diag!(1027, Error, "Expected field name");
pub const EXPECTED_FN_KEYWORD_LEGACY: DiagnosticMessage = diag!(1028, Error, "Expected 'fn' keyword");
pub const EXPECTED_IDENTIFIER_OR_FUNCTION_CALL: DiagnosticMessage = diag!(1029, Error, "Expected an identifier or a function call at this location");
pub const EXPECTED_IDENTIFIER_FOUND_KEYWORD: DiagnosticMessage = diag!(1030, Error, "Expected an identifier but encountered reserved keyword '{0}'");
pub const EXPECTED_LBRACE_LEGACY: DiagnosticMessage = diag!(1031, Error, "Expected '{'");
pub const EXPECTED_RBRACE: DiagnosticMessage = diag!(1032, Error, "Expected '}'");
pub const EXPECTED_TYPE_NAME: DiagnosticMessage = diag!(1033, Error, "Expected type name");
pub const EXPECTED_LBRACE_BEFORE_TYPE_BODY: DiagnosticMessage = diag!(1034, Error, "Expected '{' before type body");
pub const EXPECTED_RBRACE_AFTER_TYPE_BODY: DiagnosticMessage = diag!(1035, Error, "Expected '}' after type body");
pub const EXPECTED_FN_KEYWORD: DiagnosticMessage = diag!(1036, Error, "Expected 'fn' keyword");
pub const TOO_MANY_SYNTAX_ERRORS: DiagnosticMessage = diag!(1037, Error, "Too many syntax errors; the rest of the file was skipped");
pub const INTEGER_LITERAL_TOO_LARGE: DiagnosticMessage = diag!(1038, Error, "Integer literal '{0}' is too large");
pub const NESTED_TOO_DEEPLY: DiagnosticMessage = diag!(1039, Error, "Statements or expressions are nested too deeply");

// ========================================================================
// Binder errors (1100-1199)
// ========================================================================
pub const UNDECLARED_VARIABLE: DiagnosticMessage = diag!(1100, Error, "Undeclared variable '{0}'");
pub const NOT_A_VARIABLE: DiagnosticMessage = diag!(1101, Error, "'{0}' is not a variable");
pub const UNDECLARED_TYPE: DiagnosticMessage = diag!(1102, Error, "Undeclared type '{0}'");
pub const VARIABLE_ALREADY_DECLARED: DiagnosticMessage = diag!(1103, Error, "Variable '{0}' has already been declared");
pub const FUNCTION_ALREADY_DECLARED: DiagnosticMessage = diag!(1104, Error, "Function '{0}' has already been declared");
pub const BINARY_OPERATOR_NOT_DEFINED: DiagnosticMessage = diag!(1105, Error, "Binary operator '{0}' is not defined for types '{1}' and '{2}'");
pub const LOGICAL_OPERATOR_NOT_DEFINED: DiagnosticMessage = diag!(1106, Error, "Logical operator '{0}' is not defined for types '{1}' and '{2}'");
pub const UNDEFINED_FUNCTION: DiagnosticMessage = diag!(1107, Error, "Undefined function '{0}'");
pub const NOT_A_FUNCTION: DiagnosticMessage = diag!(1108, Error, "'{0}' is not a function");
pub const INVALID_ARGUMENT_COUNT: DiagnosticMessage = diag!(1109, Error, "Function '{0}' requires {1} arguments but was given {2}");
pub const CANNOT_CONVERT_IMPLICITLY: DiagnosticMessage = diag!(1110, Error, "Cannot convert type '{0}' to '{1}'");
pub const UNREACHABLE_CODE: DiagnosticMessage = diag!(1111, Error, "Unreachable code detected");
pub const BREAK_OUTSIDE_OF_LOOP: DiagnosticMessage = diag!(1112, Error, "No enclosing loop out of which to break");
pub const CONTINUE_OUTSIDE_OF_LOOP: DiagnosticMessage = diag!(1113, Error, "No enclosing loop out of which to continue");
pub const UNARY_OPERATOR_NOT_DEFINED: DiagnosticMessage = diag!(1114, Error, "Unary operator '{0}' is not defined for type '{1}'");
pub const FUNCTION_DOES_NOT_RETURN_A_VALUE: DiagnosticMessage = diag!(1115, Error, "Enclosing function does not return a value");
pub const MISSING_RETURN_EXPRESSION: DiagnosticMessage = diag!(1116, Error, "An expression of type '{0}' was expected");
pub const WRONG_RETURN_TYPE: DiagnosticMessage = diag!(1117, Error, "Wrong return type. Expected '{0}' but was given '{1}'");
pub const NO_OVERLOAD_WITH_ARGUMENT_COUNT: DiagnosticMessage = diag!(1118, Error, "No overload for function '{0}' takes {1} arguments");
pub const TYPE_ALREADY_DECLARED: DiagnosticMessage = diag!(1119, Error, "Type '{0}' has already been declared");
pub const NESTED_FUNCTION_DECLARATION: DiagnosticMessage = diag!(1120, Error, "Functions can only be declared at the top level");

// ========================================================================
// Lexer errors (2000-2099)
// ========================================================================
pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(2004, Error, "Unexpected character '{0}'");

// ========================================================================
// Internal (9000-9999)
// ========================================================================
pub const NOT_IMPLEMENTED: DiagnosticMessage = diag!(9999, Error, "Not implemented");
