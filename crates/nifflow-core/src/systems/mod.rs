//! The stages a record passes through: resolve, project, dispatch, emit.
//! Completion and filter augmentation run at configuration time instead.

pub mod completion;
pub mod dispatcher;
pub mod emitter;
pub mod filter;
pub mod pipeline;
pub mod projector;
pub mod resolver;
pub mod validation;
