/// Decred SDK - Script parsing, classification and standard templates.
///
/// Provides the Decred `Script` type, opcode definitions, script chunk parsing,
/// minimal push encoding, the standard-pattern classifier and locking-script
/// builders.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod pattern;
pub mod template;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use chunk::{push_all, ScriptChunk};
pub use pattern::{classify, ScriptPattern};
