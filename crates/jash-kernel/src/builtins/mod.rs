//! Built-in commands.
//!
//! One file per builtin. `grep`, `find`, and `cat` belong to the builtin
//! set for argument preprocessing but have external-process shape; the
//! dispatcher routes them through the external path, so they have no
//! trait implementation here.

mod cd;
mod echo;
mod exit;
mod export;
mod jobs;
mod kill;
mod pwd;
mod registry;
mod traits;

pub use registry::BuiltinRegistry;
pub use traits::Builtin;

/// Builtins with external-process shape: preprocessed like builtins,
/// executed like externals.
pub const DELEGATED: &[&str] = &["grep", "find", "cat"];

/// Register every builtin with a trait implementation.
pub fn register_builtins(registry: &mut BuiltinRegistry) {
    registry.register(cd::Cd);
    registry.register(echo::Echo);
    registry.register(exit::Exit);
    registry.register(export::Export);
    registry.register(jobs::Jobs);
    registry.register(kill::Kill);
    registry.register(pwd::Pwd);
}
