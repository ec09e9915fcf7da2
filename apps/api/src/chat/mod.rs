// Chat relay: answers visitor questions with the generative-language API,
// grounded in a cached summary of the portfolio content.

pub mod context_cache;
pub mod handlers;
pub mod prompts;
pub mod relay;

pub use context_cache::ContextCache;
pub use relay::ChatRelay;
