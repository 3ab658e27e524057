//! Invocation processors run before the target method executes
//!
//! Copyright (c) 2025 Argus Team
//! Licensed under the Apache-2.0 license

use crate::arguments::InvocationArguments;
use crate::error::Result;
use crate::invocation::InvocationMetadata;

/// Hook invoked by the pipeline for every dispatched call
///
/// Returning `Ok(())` lets the invocation proceed with the (possibly modified)
/// arguments. Returning an error aborts the invocation; the target is not
/// called and the error reaches the host's own error handling.
pub trait InvocationProcessor: Send + Sync {
    /// Stable processor name used in diagnostics and registration checks
    fn name(&self) -> &str;

    /// Called before the target method executes
    fn on_invoke(
        &self,
        metadata: &InvocationMetadata,
        args: &mut InvocationArguments,
    ) -> Result<()>;
}
