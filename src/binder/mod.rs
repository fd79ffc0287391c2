//! Argument binding.
//!
//! Maps a flat token list onto a command's declared parameters:
//!
//! 1. tokens are classified into positional and keyword tokens
//!    ([`classify`]);
//! 2. parameters are visited in declaration order with one cursor over
//!    positional tokens and one over keyword tokens ([`bind`]).
//!
//! Dependency parameters whose type is registered in the
//! [`DependencyRegistry`] are injected without consuming any token.

mod args;
mod dependencies;
mod error;
mod tokens;

pub use args::BoundArgs;
pub use dependencies::{Dependency, DependencyRegistry};
pub use error::BindingError;
pub use tokens::{classify, is_truthy, KeywordTokens, TokenSet, FORCE, HELP};

use crate::command::{Param, ParamKind, ParamType};
use serde_json::Value;
use tracing::debug;

/// Result of binding a raw token list.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Bound arguments.
    pub args: BoundArgs,
    /// Whether the tokens asked for help.
    pub help_requested: bool,
}

/// Classify `tokens` and bind them to `params`.
pub fn bind_tokens<S: AsRef<str>>(
    tokens: &[S],
    params: &[Param],
    dependencies: &DependencyRegistry,
) -> Result<Binding, BindingError> {
    let tokens = classify(tokens);
    let help_requested = tokens.help_requested();
    let args = bind(&tokens, params, dependencies)?;
    Ok(Binding {
        args,
        help_requested,
    })
}

/// Bind classified tokens to `params`.
pub fn bind(
    tokens: &TokenSet,
    params: &[Param],
    dependencies: &DependencyRegistry,
) -> Result<BoundArgs, BindingError> {
    let positional = tokens.positional();
    let keyword = tokens.keyword().entries();
    let mut pos_cursor = 0usize;
    let mut kw_cursor = 0usize;
    let mut bound = BoundArgs::new();

    for param in params {
        let injected = match &param.ty {
            ParamType::Dependency(name) => dependencies.get_by_name(name),
            _ => None,
        };
        if let Some(instance) = injected {
            debug!(param = %param.name, "injecting dependency");
            bound.push_dependency(&param.name, instance);
            continue;
        }

        match param.kind {
            ParamKind::VarPositional => {
                for raw in positional.iter().skip(pos_cursor) {
                    let value = convert(param, &Value::String(raw.clone()))?;
                    bound.push_positional(&param.name, value);
                }
                pos_cursor = positional.len();
            }
            ParamKind::KeywordOnly => match tokens.keyword().get(&param.name) {
                Some(raw) => {
                    let value = convert(param, raw)?;
                    bound.insert_keyword(&param.name, value);
                    kw_cursor += 1;
                }
                None => match &param.default {
                    Some(default) => bound.insert_keyword(&param.name, default.clone()),
                    None => return Err(BindingError::missing(&param.name)),
                },
            },
            ParamKind::VarKeyword => {
                for (name, raw) in keyword.iter().skip(kw_cursor) {
                    let value = convert(param, raw)?;
                    bound.insert_keyword(name, value);
                }
                kw_cursor = keyword.len();
            }
            ParamKind::Positional => match positional.get(pos_cursor) {
                Some(raw) => {
                    let value = convert(param, &Value::String(raw.clone()))?;
                    bound.push_positional(&param.name, value);
                    pos_cursor += 1;
                }
                None => match &param.default {
                    Some(default) => bound.push_positional(&param.name, default.clone()),
                    None => return Err(BindingError::missing(&param.name)),
                },
            },
        }
    }

    debug!(
        positional = pos_cursor,
        keyword = kw_cursor,
        bound = bound.len(),
        "arguments bound"
    );
    Ok(bound)
}

fn convert(param: &Param, raw: &Value) -> Result<Value, BindingError> {
    param
        .ty
        .convert(raw)
        .map_err(|message| BindingError::invalid(&param.name, message))
}
