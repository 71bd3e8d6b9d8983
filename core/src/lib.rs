pub mod unit;
pub mod union;
pub mod variants;
pub mod maybe;
pub mod outcome;
pub mod attempt;
pub mod engine;
pub mod app;

pub use attempt::{attempt, attempt_async, attempt_fallible, attempt_fallible_async, Attempt, Fault};
pub use engine::{ActionEngine, Actions, CancellationSignal, ProcessingOrder};
pub use maybe::Maybe;
pub use outcome::Outcome;
pub use union::Union;
pub use unit::Unit;
pub use variants::{InvalidUnwrap, Variants};
