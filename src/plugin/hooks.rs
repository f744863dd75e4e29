//! Minimal after-emit extensibility point.
//!
//! The host build tool owns the real lifecycle. This registry only models the
//! contract a plugin sees: it is invoked once per build with the compilation,
//! and the host is told when the hook is done.

use crate::models::{BuildOptions, Compilation};
use futures_util::future::BoxFuture;
use tracing::debug;

/// A plugin callback fired after the build output has been written to disk
pub trait AfterEmitHook: Send + Sync {
    fn name(&self) -> &str;

    fn after_emit<'a>(
        &'a self,
        options: &'a BuildOptions,
        compilation: &'a Compilation,
    ) -> BoxFuture<'a, ()>;
}

/// Build options plus the hooks tapped into `after-emit`
pub struct BuildHooks {
    options: BuildOptions,
    after_emit: Vec<Box<dyn AfterEmitHook>>,
}

impl BuildHooks {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            after_emit: Vec::new(),
        }
    }

    pub fn tap_after_emit<H: AfterEmitHook + 'static>(&mut self, hook: H) {
        debug!("Registered after-emit hook {}", hook.name());
        self.after_emit.push(Box::new(hook));
    }

    /// Fire `after-emit` for every registered hook, in registration order.
    /// `done` runs once all hooks have settled.
    pub async fn call_after_emit<F: FnOnce()>(&self, compilation: &Compilation, done: F) {
        for hook in &self.after_emit {
            debug!("Running after-emit hook {}", hook.name());
            hook.after_emit(&self.options, compilation).await;
        }
        done();
    }
}
