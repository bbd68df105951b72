//! Core abstractions and types for stepwise.
//!
//! *Users* are mainly interested in implementing the [`Function`] trait and its
//! extensions [`Differentiable`] and [`TwiceDifferentiable`], or simply
//! wrapping closures in an [`Objective`].
//!
//! Algorithms *developers* are interested in implementing the [`Optimizer`]
//! trait, written against the [`State`] abstraction.

mod base;
mod function;
mod objective;
mod optimizer;
mod state;

pub use base::*;
pub use function::*;
pub use objective::*;
pub use optimizer::*;
pub use state::*;
