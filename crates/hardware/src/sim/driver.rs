//! Simulation driver.
//!
//! The driver owns one [`SimContext`] and one [`Model`] built from it, and
//! evaluates the model until the context reports completion:
//!
//! ```text
//! while !context.got_finish() { model.eval(&mut context) }
//! ```
//!
//! Ownership is scoped: the model is declared before the context in
//! [`Driver`], so it is always released first, whether `run` returns normally
//! or unwinds.

use std::convert::Infallible;
use std::process::ExitCode;

use crate::common::error::SimError;
use crate::sim::context::SimContext;
use crate::sim::model::Model;

/// The two executables built on the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverVariant {
    /// Plain evaluate-until-finish loop (`sim_main`).
    Testbench,
    /// Same loop, also counting evaluation steps (`sim_bench`).
    Benchmark,
}

/// What a finished run reports back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Process exit status. Always 0.
    pub exit_code: u8,
    /// Evaluation steps, counted by the benchmark variant only.
    pub steps: Option<u64>,
    /// Simulation time when the loop ended.
    pub sim_time: u64,
}

/// Owns a model and the context it was built from.
#[derive(Debug)]
pub struct Driver<M: Model> {
    variant: DriverVariant,
    // Field order is drop order: the model is released before the context.
    model: M,
    context: SimContext,
}

impl<M: Model> Driver<M> {
    /// Creates the context, binds `args` to it and builds the model from it.
    pub fn new<I, S, F>(variant: DriverVariant, args: I, build: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&SimContext) -> M,
    {
        let mut context = SimContext::new();
        context.command_args(args);
        let model = build(&context);
        Self {
            variant,
            model,
            context,
        }
    }

    /// Like [`Driver::new`], for models whose construction can fail.
    ///
    /// # Errors
    ///
    /// Returns the error from `build`; the context is dropped with it.
    pub fn try_new<I, S, F, E>(variant: DriverVariant, args: I, build: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&SimContext) -> Result<M, E>,
    {
        let mut context = SimContext::new();
        context.command_args(args);
        let model = build(&context)?;
        Ok(Self {
            variant,
            model,
            context,
        })
    }

    /// The driver variant.
    pub const fn variant(&self) -> DriverVariant {
        self.variant
    }

    /// The context the model was built from.
    pub const fn context(&self) -> &SimContext {
        &self.context
    }

    /// The context, mutably; used to prepare it before [`Driver::run`].
    pub const fn context_mut(&mut self) -> &mut SimContext {
        &mut self.context
    }

    /// The model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Evaluates the model until the context reports completion, then
    /// releases the model and the context, in that order.
    pub fn run(mut self) -> RunReport {
        let Ok(steps) =
            eval_until_finish(&mut self.model, &mut self.context, |_| Ok::<_, Infallible>(()));

        let report = RunReport {
            exit_code: 0,
            steps: (self.variant == DriverVariant::Benchmark).then_some(steps),
            sim_time: self.context.time(),
        };
        tracing::debug!(
            "driver: finished at time {} ({:?})",
            report.sim_time,
            self.variant
        );
        report
    }
}

/// The evaluation loop: evaluates `model` until `ctx` reports completion and
/// returns the number of steps taken.
///
/// `after_step` runs after every evaluation with the steps taken so far. The
/// Python bindings use it to poll for signals.
///
/// # Errors
///
/// Stops at the first error returned by `after_step` and returns it.
pub fn eval_until_finish<M, E, F>(
    model: &mut M,
    ctx: &mut SimContext,
    mut after_step: F,
) -> Result<u64, E>
where
    M: Model,
    F: FnMut(u64) -> Result<(), E>,
{
    let mut steps: u64 = 0;
    while !ctx.got_finish() {
        model.eval(ctx);
        steps += 1;
        after_step(steps)?;
    }
    Ok(steps)
}

/// Entry point shared by the `sim_main` and `sim_bench` executables.
///
/// Builds the model from the arguments and runs it. The exit status is 0
/// unconditionally: a model that cannot be built is logged as an error and
/// the loop is skipped.
pub fn run_main<M, I, S, F>(variant: DriverVariant, args: I, build: F) -> ExitCode
where
    M: Model,
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: FnOnce(&SimContext) -> Result<M, SimError>,
{
    match Driver::try_new(variant, args, build) {
        Ok(driver) => {
            let report = driver.run();
            if let Some(steps) = report.steps {
                tracing::info!("benchmark: {steps} evaluation steps");
            }
            ExitCode::from(report.exit_code)
        }
        Err(err) => {
            tracing::error!("could not build the model: {err}");
            ExitCode::SUCCESS
        }
    }
}
