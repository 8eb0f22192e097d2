//! Design-under-test interface.

use crate::sim::context::SimContext;

/// A design that the driver evaluates one step at a time.
///
/// The model signals that it is done by calling [`SimContext::finish`]; the
/// driver never calls `eval` again after that.
pub trait Model {
    /// Evaluates one step of the design.
    fn eval(&mut self, ctx: &mut SimContext);
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn eval(&mut self, ctx: &mut SimContext) {
        (**self).eval(ctx);
    }
}
