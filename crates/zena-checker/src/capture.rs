//! Capture analysis: for every
//! function/arrow literal, the set of enclosing-scope names its body
//! reads or writes, with writes additionally marked as *mutable*
//! captures — the emitter needs this to decide which locals must be
//! boxed in a heap cell.
//!
//! Rather than re-walking a function body's AST after the fact (which
//! would have no way to tell "declared inside this function" from
//! "declared outside", since nested scopes are already gone by then),
//! capture bookkeeping rides along with the checker's own name
//! resolution: `Checker::resolve_with_depth` already knows the
//! scope-stack index a name was found at, so every active function body
//! on `function_ctx_stack` just compares that index against its own
//! entry depth. A name resolved above a function's own entry depth is
//! free in it; pushing the hit onto every *enclosing* active context
//! whose entry depth is also above that index is exactly "propagating
//! captures transitively" for nested closures, without a second pass.

use zena_ast::NodeId;
use zena_common::Atom;

use crate::checker::{CaptureInfo, Checker, FunctionCaptureCtx};

impl<'a> Checker<'a> {
    /// Opens a new capture-tracking context for the function/arrow body
    /// whose own scope was just pushed (so `self.scopes.len() - 1` is that
    /// scope's index — the boundary below which a resolved name counts as
    /// free).
    pub(crate) fn push_capture_ctx(&mut self) {
        let entry_depth = self.scopes.len() - 1;
        self.function_ctx_stack.push(FunctionCaptureCtx {
            entry_depth,
            captures: Default::default(),
            mutable_captures: Default::default(),
        });
    }

    /// Records that `name`, resolved at scope index `found_idx`, is free
    /// with respect to every currently active function body whose own
    /// scope started after `found_idx` — walking from the innermost
    /// active context outward and stopping at the first one that owns the
    /// binding itself: capture propagation to a function stops at
    /// whichever function the binding is actually local to.
    pub(crate) fn record_capture(&mut self, name: Atom, found_idx: usize, is_write: bool) {
        for ctx in self.function_ctx_stack.iter_mut().rev() {
            if found_idx < ctx.entry_depth {
                ctx.captures.insert(name);
                if is_write {
                    ctx.mutable_captures.insert(name);
                }
            } else {
                break;
            }
        }
    }

    /// Closes the innermost capture context and publishes its result into
    /// `self.captures`, keyed by the function/arrow body's own node id
    /// (not the declaration), matching `CaptureInfo`'s documented key.
    pub(crate) fn finish_capture_ctx(&mut self, body: NodeId) {
        let ctx = self
            .function_ctx_stack
            .pop()
            .expect("push_capture_ctx/finish_capture_ctx must be paired around the same body");
        self.captures.insert(body, CaptureInfo { captures: ctx.captures, mutable_captures: ctx.mutable_captures });
    }
}
