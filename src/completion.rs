//! Completion subsystem
//!
//! A TTL cache that sits between keystroke-driven completion and the remote
//! control plane, plus the stateless providers that turn registry and cache
//! contents into candidates.

pub mod cache;
pub mod clock;
pub mod providers;
pub mod source;

pub use cache::{CacheSettings, CompletionCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use providers::{Candidate, Completions, Directive, Provider, ProviderContext};
pub use source::{CompletionSource, UnconfiguredSource};
