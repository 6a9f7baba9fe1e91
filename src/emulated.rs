//! Interception layer
//!
//! An explicit decorator over an actor: exactly `click`, `type_text` and
//! `fill` are replaced with the emulated primitives, every other capability
//! delegates to the wrapped actor unchanged. The layer itself never raises
//! errors; it only forwards whatever the delegate raises or returns.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::debug;

use crate::actor::{
    Actor, BoundingBox, ClickOptions, ElementHandle, ScrollDirection,
};
use crate::config::{EmulationConfig, ResolvedConfig};
use crate::error::EmulationError;
use crate::geometry::Point;
use crate::interact;
use crate::session::Session;

/// Session and random source, locked together so one interaction holds both
/// for its full duration.
struct EmulationState<R> {
    session: Session,
    rng: R,
}

/// Actor decorator that emulates human interaction for the three intercepted
/// operations. Each decorator owns its session and random source, one per
/// wrapped actor.
///
/// Sequential use is assumed: concurrent emulated calls on the same decorator
/// queue on the internal lock rather than interleaving their pointer paths,
/// but callers should still issue one interaction at a time.
pub struct EmulatedActor<A, R = StdRng> {
    inner: A,
    config: ResolvedConfig,
    state: Mutex<EmulationState<R>>,
}

impl<A: Actor> EmulatedActor<A> {
    /// Wrap `actor` with entropy-seeded randomness
    pub fn new(actor: A, config: &EmulationConfig) -> Self {
        Self::with_rng(actor, config, StdRng::from_entropy())
    }
}

impl<A: Actor, R: Rng + Send> EmulatedActor<A, R> {
    /// Wrap `actor` with a caller-supplied random source. Tests pass a seeded
    /// generator to get reproducible paths and delays.
    pub fn with_rng(actor: A, config: &EmulationConfig, rng: R) -> Self {
        Self {
            inner: actor,
            config: config.resolve(),
            state: Mutex::new(EmulationState {
                session: Session::new(),
                rng,
            }),
        }
    }

    /// The wrapped actor
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Last known pointer position
    pub async fn last_pointer(&self) -> Point {
        self.state.lock().await.session.last_pointer()
    }

    /// Emulated scroll: chunked wheel events with pauses. Not one of the
    /// intercepted capabilities, offered alongside them.
    pub async fn scroll(
        &self,
        direction: ScrollDirection,
        amount: u32,
    ) -> Result<(), EmulationError> {
        let mut guard = self.state.lock().await;
        interact::scroll(&self.inner, &self.config, &mut guard.rng, direction, amount).await
    }
}

#[async_trait]
impl<A: Actor, R: Rng + Send> Actor for EmulatedActor<A, R> {
    async fn resolve_element(
        &self,
        selector: &str,
    ) -> Result<Option<ElementHandle>, EmulationError> {
        self.inner.resolve_element(selector).await
    }

    async fn bounding_box(
        &self,
        element: &ElementHandle,
    ) -> Result<Option<BoundingBox>, EmulationError> {
        self.inner.bounding_box(element).await
    }

    async fn move_pointer(&self, x: f64, y: f64) -> Result<(), EmulationError> {
        self.inner.move_pointer(x, y).await
    }

    async fn click_at(
        &self,
        x: f64,
        y: f64,
        options: &ClickOptions,
    ) -> Result<(), EmulationError> {
        self.inner.click_at(x, y, options).await
    }

    async fn press_key_combo(&self, combo: &str) -> Result<(), EmulationError> {
        self.inner.press_key_combo(combo).await
    }

    async fn type_character(&self, ch: char) -> Result<(), EmulationError> {
        self.inner.type_character(ch).await
    }

    async fn wheel_scroll(&self, dx: f64, dy: f64) -> Result<(), EmulationError> {
        self.inner.wheel_scroll(dx, dy).await
    }

    async fn goto(&self, url: &str) -> Result<(), EmulationError> {
        self.inner.goto(url).await
    }

    async fn title(&self) -> Result<String, EmulationError> {
        self.inner.title().await
    }

    // -- the three intercepted operations --

    async fn click(&self, selector: &str, options: ClickOptions) -> Result<(), EmulationError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        interact::click(
            &self.inner,
            &mut state.session,
            &self.config,
            &mut state.rng,
            selector,
            options,
        )
        .await
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), EmulationError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        interact::type_text(
            &self.inner,
            &mut state.session,
            &self.config,
            &mut state.rng,
            selector,
            text,
        )
        .await
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), EmulationError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        interact::fill(
            &self.inner,
            &mut state.session,
            &self.config,
            &mut state.rng,
            selector,
            text,
        )
        .await
    }
}

/// Result of [`wrap`]: either the untouched original actor or the emulating
/// decorator. The override set is statically enumerable — only the three
/// interactions in [`EmulatedActor`] behave differently.
pub enum Wrapped<A, R = StdRng> {
    /// Emulation disabled; the original actor, identity preserved
    Passthrough(A),
    /// Emulation enabled
    Emulated(EmulatedActor<A, R>),
}

/// Wrap an actor according to `config.enabled`. A disabled configuration
/// hands the original actor back untouched.
pub fn wrap<A: Actor>(actor: A, config: &EmulationConfig) -> Wrapped<A> {
    if config.enabled {
        debug!("Emulation enabled; intercepting click/type_text/fill");
        Wrapped::Emulated(EmulatedActor::new(actor, config))
    } else {
        Wrapped::Passthrough(actor)
    }
}

impl<A: Actor, R: Rng + Send> Wrapped<A, R> {
    /// The underlying actor, whichever side of the wrap it sits on
    pub fn inner(&self) -> &A {
        match self {
            Wrapped::Passthrough(actor) => actor,
            Wrapped::Emulated(emulated) => emulated.inner(),
        }
    }

    pub fn is_emulated(&self) -> bool {
        matches!(self, Wrapped::Emulated(_))
    }

    /// Unwrap back to the original actor
    pub fn into_inner(self) -> A {
        match self {
            Wrapped::Passthrough(actor) => actor,
            Wrapped::Emulated(emulated) => emulated.inner,
        }
    }
}

#[async_trait]
impl<A: Actor, R: Rng + Send> Actor for Wrapped<A, R> {
    async fn resolve_element(
        &self,
        selector: &str,
    ) -> Result<Option<ElementHandle>, EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.resolve_element(selector).await,
            Wrapped::Emulated(emulated) => emulated.resolve_element(selector).await,
        }
    }

    async fn bounding_box(
        &self,
        element: &ElementHandle,
    ) -> Result<Option<BoundingBox>, EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.bounding_box(element).await,
            Wrapped::Emulated(emulated) => emulated.bounding_box(element).await,
        }
    }

    async fn move_pointer(&self, x: f64, y: f64) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.move_pointer(x, y).await,
            Wrapped::Emulated(emulated) => emulated.move_pointer(x, y).await,
        }
    }

    async fn click_at(
        &self,
        x: f64,
        y: f64,
        options: &ClickOptions,
    ) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.click_at(x, y, options).await,
            Wrapped::Emulated(emulated) => emulated.click_at(x, y, options).await,
        }
    }

    async fn press_key_combo(&self, combo: &str) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.press_key_combo(combo).await,
            Wrapped::Emulated(emulated) => emulated.press_key_combo(combo).await,
        }
    }

    async fn type_character(&self, ch: char) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.type_character(ch).await,
            Wrapped::Emulated(emulated) => emulated.type_character(ch).await,
        }
    }

    async fn wheel_scroll(&self, dx: f64, dy: f64) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.wheel_scroll(dx, dy).await,
            Wrapped::Emulated(emulated) => emulated.wheel_scroll(dx, dy).await,
        }
    }

    async fn goto(&self, url: &str) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.goto(url).await,
            Wrapped::Emulated(emulated) => emulated.goto(url).await,
        }
    }

    async fn title(&self) -> Result<String, EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.title().await,
            Wrapped::Emulated(emulated) => emulated.title().await,
        }
    }

    async fn click(&self, selector: &str, options: ClickOptions) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.click(selector, options).await,
            Wrapped::Emulated(emulated) => emulated.click(selector, options).await,
        }
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.type_text(selector, text).await,
            Wrapped::Emulated(emulated) => emulated.type_text(selector, text).await,
        }
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), EmulationError> {
        match self {
            Wrapped::Passthrough(actor) => actor.fill(selector, text).await,
            Wrapped::Emulated(emulated) => emulated.fill(selector, text).await,
        }
    }
}
