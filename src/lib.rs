//! Human-interaction emulation for browser-automation actors.
//!
//! Pointer travel follows randomized bezier curves with per-step pacing,
//! typing and scrolling carry human-like delays, and an explicit decorator
//! swaps the emulated behavior in for an actor's `click`/`type_text`/`fill`
//! while leaving the rest of its capability surface untouched.
//!
//! ```no_run
//! use humanoid::{wrap, Actor, EmulationConfig};
//!
//! # async fn example<A: Actor>(page: A) -> Result<(), humanoid::EmulationError> {
//! let page = wrap(page, &EmulationConfig::default().enabled(true));
//! page.click("button#submit", Default::default()).await?;
//! page.type_text("input[name='q']", "concert tickets").await?;
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod emulated;
pub mod error;
pub mod geometry;
pub mod interact;
pub mod motion;
pub mod session;

pub use actor::{
    Actor, BoundingBox, ClickOptions, ElementHandle, MouseButton, ScrollDirection,
};
pub use config::{DelayRange, EmulationConfig, SpeedRange};
pub use emulated::{wrap, EmulatedActor, Wrapped};
pub use error::EmulationError;
pub use geometry::Point;
pub use session::Session;

/// Initialize console logging. Opt-in helper for binaries embedding the
/// crate; library code only emits `tracing` events.
pub fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
