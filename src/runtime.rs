//! Driving futures to completion from synchronous code.

use std::future::Future;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};

/// Run `future` to completion and return its output.
///
/// * outside any runtime: on a fresh current-thread runtime;
/// * inside a multi-thread runtime: on the caller's runtime, via
///   [`tokio::task::block_in_place`];
/// * inside a current-thread runtime: on a fresh runtime in a scoped
///   thread, since that runtime cannot be blocked re-entrantly.
///
/// Fails only if a new runtime cannot be created.
pub fn block_on<F>(future: F) -> std::io::Result<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Ok(tokio::task::block_in_place(|| handle.block_on(future)))
        }
        Ok(_) => std::thread::scope(|scope| {
            match scope.spawn(move || dedicated(future)).join() {
                Ok(output) => output,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }),
        Err(_) => dedicated(future),
    }
}

fn dedicated<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(future))
}
