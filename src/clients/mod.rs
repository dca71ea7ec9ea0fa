pub mod gemini;
pub mod scripted;
pub mod traits;

pub use gemini::GeminiClient;
pub use scripted::ScriptedCompletion;
pub use traits::{Completion, CompletionError, CompletionService};
