//! Parameter descriptors used to bind raw tokens to command handlers.
//!
//! A command declares its parameters once, at registration time, as an
//! ordered list of [`Param`] values. The binder walks that list in
//! declaration order, so the order doubles as binding priority.

use serde_json::{Number, Value};
use std::fmt;

/// How a parameter receives its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Filled from the next positional token, or its default.
    Positional,
    /// Bound by name from `--name`, `--name=value` or `--no-name` tokens.
    KeywordOnly,
    /// Collects every remaining positional token.
    VarPositional,
    /// Collects the remaining keyword tokens.
    VarKeyword,
}

impl ParamKind {
    /// Prefix used when rendering the parameter in a usage synopsis.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Positional => "",
            Self::KeywordOnly => "--",
            Self::VarPositional => "*",
            Self::VarKeyword => "**",
        }
    }

    /// Whether the parameter is supplied through keyword tokens.
    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::KeywordOnly | Self::VarKeyword)
    }
}

/// Declared type of a parameter, which selects its converter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// No conversion; the raw token value is passed through.
    Any,
    /// UTF-8 string.
    Str,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Boolean.
    Bool,
    /// A value injected from the dependency registry, keyed by type name.
    Dependency(String),
}

impl ParamType {
    /// Dependency type for `T`, keyed by [`std::any::type_name`].
    pub fn dependency<T: ?Sized + 'static>() -> Self {
        Self::Dependency(std::any::type_name::<T>().to_string())
    }

    /// Stable identifier; for dependencies, the registry key.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Any => "Any",
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Dependency(name) => name,
        }
    }

    /// Short name for help output (`crate::path::Type` becomes `Type`).
    pub fn display_name(&self) -> &str {
        match self {
            Self::Dependency(name) => short_type_name(name),
            other => other.type_name(),
        }
    }

    /// Convert a raw token value to this type.
    ///
    /// The error is a human readable description of why the value was
    /// rejected; the binder attaches the parameter name.
    pub fn convert(&self, value: &Value) -> Result<Value, String> {
        match self {
            Self::Any => Ok(value.clone()),
            Self::Str => match value {
                Value::String(s) => Ok(Value::String(s.clone())),
                Value::Bool(b) => Ok(Value::String(b.to_string())),
                Value::Number(n) => Ok(Value::String(n.to_string())),
                other => Err(format!("expected a string, got {}", other)),
            },
            Self::Int => match value {
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|e| format!("'{}' is not an integer: {}", s, e)),
                Value::Bool(b) => Ok(Value::from(i64::from(*b))),
                Value::Number(n) if n.is_i64() => Ok(Value::Number(n.clone())),
                other => Err(format!("expected an integer, got {}", other)),
            },
            Self::Float => {
                let parsed = match value {
                    Value::String(s) => s
                        .trim()
                        .parse::<f64>()
                        .map_err(|e| format!("'{}' is not a number: {}", s, e))?,
                    Value::Bool(b) => {
                        if *b {
                            1.0
                        } else {
                            0.0
                        }
                    }
                    Value::Number(n) => n
                        .as_f64()
                        .ok_or_else(|| format!("{} is not representable as a float", n))?,
                    other => return Err(format!("expected a number, got {}", other)),
                };
                Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| format!("{} is not a finite number", parsed))
            }
            Self::Bool => match value {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                Value::String(s) => parse_bool(s)
                    .map(Value::Bool)
                    .ok_or_else(|| format!("'{}' is not a boolean", s)),
                other => Err(format!("expected a boolean, got {}", other)),
            },
            Self::Dependency(name) => Err(format!(
                "expected an instance of {}, which cannot be given on the command line",
                short_type_name(name)
            )),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn short_type_name(name: &str) -> &str {
    // Generic arguments keep their own paths; only trim the outer one.
    let head = name.split('<').next().unwrap_or(name);
    match head.rfind("::") {
        Some(idx) => &name[idx + 2..],
        None => name,
    }
}

/// A single declared parameter of a command handler.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    /// Parameter name, used for keyword lookup and error messages.
    pub name: String,
    /// How the parameter receives its value.
    pub kind: ParamKind,
    /// Declared type.
    pub ty: ParamType,
    /// Value used when no token supplies one.
    pub default: Option<Value>,
}

impl Param {
    /// Create a parameter of any kind.
    pub fn new(name: impl Into<String>, kind: ParamKind, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            default: None,
        }
    }

    /// A positional parameter.
    pub fn positional(name: impl Into<String>, ty: ParamType) -> Self {
        Self::new(name, ParamKind::Positional, ty)
    }

    /// A keyword-only parameter.
    pub fn keyword(name: impl Into<String>, ty: ParamType) -> Self {
        Self::new(name, ParamKind::KeywordOnly, ty)
    }

    /// A keyword-only boolean that defaults to `false`.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::keyword(name, ParamType::Bool).with_default(false)
    }

    /// A variadic positional parameter.
    pub fn var_positional(name: impl Into<String>, ty: ParamType) -> Self {
        Self::new(name, ParamKind::VarPositional, ty)
    }

    /// A variadic keyword parameter.
    pub fn var_keyword(name: impl Into<String>, ty: ParamType) -> Self {
        Self::new(name, ParamKind::VarKeyword, ty)
    }

    /// A positional parameter filled from the dependency registry.
    pub fn inject<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::positional(name, ParamType::dependency::<T>())
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Whether the parameter is expected to come from the dependency registry.
    pub fn is_injected(&self) -> bool {
        matches!(self.ty, ParamType::Dependency(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_prefix() {
        assert_eq!(ParamKind::Positional.prefix(), "");
        assert_eq!(ParamKind::KeywordOnly.prefix(), "--");
        assert_eq!(ParamKind::VarPositional.prefix(), "*");
        assert_eq!(ParamKind::VarKeyword.prefix(), "**");
    }

    #[test]
    fn test_convert_int() {
        assert_eq!(ParamType::Int.convert(&json!("42")).unwrap(), json!(42));
        assert_eq!(ParamType::Int.convert(&json!(" -7 ")).unwrap(), json!(-7));
        assert_eq!(ParamType::Int.convert(&json!(true)).unwrap(), json!(1));
        let err = ParamType::Int.convert(&json!("abc")).unwrap_err();
        assert!(err.contains("'abc' is not an integer"));
    }

    #[test]
    fn test_convert_float() {
        assert_eq!(ParamType::Float.convert(&json!("2.5")).unwrap(), json!(2.5));
        assert!(ParamType::Float.convert(&json!("NaN")).is_err());
        assert!(ParamType::Float.convert(&json!("x")).is_err());
    }

    #[test]
    fn test_convert_bool() {
        assert_eq!(ParamType::Bool.convert(&json!("YES")).unwrap(), json!(true));
        assert_eq!(ParamType::Bool.convert(&json!("0")).unwrap(), json!(false));
        assert_eq!(ParamType::Bool.convert(&json!(false)).unwrap(), json!(false));
        assert!(ParamType::Bool.convert(&json!("maybe")).is_err());
    }

    #[test]
    fn test_convert_str_and_any() {
        assert_eq!(ParamType::Str.convert(&json!(true)).unwrap(), json!("true"));
        assert_eq!(ParamType::Any.convert(&json!(true)).unwrap(), json!(true));
        assert_eq!(ParamType::Any.convert(&json!("x")).unwrap(), json!("x"));
    }

    #[test]
    fn test_dependency_never_converts() {
        let ty = ParamType::dependency::<String>();
        assert_eq!(ty.type_name(), std::any::type_name::<String>());
        assert_eq!(ty.display_name(), "String");
        assert!(ty.convert(&json!("text")).is_err());
    }

    #[test]
    fn test_short_type_name_keeps_generics() {
        assert_eq!(short_type_name("alloc::sync::Arc<dyn a::Writer>"), "Arc<dyn a::Writer>");
        assert_eq!(short_type_name("plain"), "plain");
    }

    #[test]
    fn test_flag_defaults_false() {
        let flag = Param::flag("verbose");
        assert_eq!(flag.kind, ParamKind::KeywordOnly);
        assert_eq!(flag.ty, ParamType::Bool);
        assert_eq!(flag.default, Some(json!(false)));
        assert!(!flag.is_injected());
        assert!(Param::inject::<String>("s").is_injected());
    }
}
