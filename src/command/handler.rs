//! Type-erased command handlers.

use crate::binder::BoundArgs;
use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Result of running a command handler.
pub type CommandResult = anyhow::Result<Value>;

type SyncHandlerFn = Arc<dyn Fn(&BoundArgs) -> CommandResult + Send + Sync>;
type AsyncHandlerFn = Arc<dyn Fn(BoundArgs) -> BoxFuture<'static, CommandResult> + Send + Sync>;

/// A command body, synchronous or asynchronous.
///
/// Handler return values are serialized to [`Value`], so a handler may
/// return `()`, a string, a struct deriving `Serialize` or a raw `Value`.
#[derive(Clone)]
pub enum CommandHandler {
    /// Runs inline on the dispatching task.
    Sync(SyncHandlerFn),
    /// Awaited by the dispatcher.
    Async(AsyncHandlerFn),
}

impl CommandHandler {
    /// Wrap a synchronous function.
    pub fn from_sync<F, T>(handler: F) -> Self
    where
        F: Fn(&BoundArgs) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Serialize + 'static,
    {
        Self::Sync(Arc::new(move |args: &BoundArgs| {
            handler(args).and_then(to_output)
        }))
    }

    /// Wrap an async function.
    pub fn from_async<F, Fut, T>(handler: F) -> Self
    where
        F: Fn(BoundArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
        T: Serialize + 'static,
    {
        Self::Async(Arc::new(move |args: BoundArgs| {
            handler(args)
                .map(|result| result.and_then(to_output))
                .boxed()
        }))
    }

    /// Whether the handler is asynchronous.
    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    /// Run the handler.
    pub async fn call(&self, args: BoundArgs) -> CommandResult {
        match self {
            Self::Sync(handler) => handler(&args),
            Self::Async(handler) => handler(args).await,
        }
    }
}

fn to_output<T: Serialize>(output: T) -> CommandResult {
    Ok(serde_json::to_value(output)?)
}

impl fmt::Debug for CommandHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("CommandHandler::Sync"),
            Self::Async(_) => f.write_str("CommandHandler::Async"),
        }
    }
}
