//! Interaction primitives
//!
//! Composite click/type/fill/scroll operations that combine target
//! resolution, path planning, motion driving and the terminal actor call
//! with human-like pauses.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use crate::actor::{Actor, ClickOptions, ScrollDirection};
use crate::config::{DelayRange, ResolvedConfig};
use crate::error::EmulationError;
use crate::geometry;
use crate::motion;
use crate::session::Session;

/// Hesitation before the terminal click lands (ms)
const HESITATION: DelayRange = DelayRange::new(50, 150);
/// Pause after a click (ms)
const POST_CLICK: DelayRange = DelayRange::new(50, 100);
/// Pause between focusing a field and typing into it (ms)
const FOCUS_SETTLE: DelayRange = DelayRange::new(100, 200);
/// Pause after select-all while clearing a field (ms)
const CLEAR_SELECT: DelayRange = DelayRange::new(50, 100);
/// Pause after deleting the selection, before retyping (ms)
const CLEAR_SETTLE: DelayRange = DelayRange::new(150, 250);

/// Scroll chunk size bounds, in wheel units
const CHUNK_MIN: u32 = 50;
const CHUNK_MAX: u32 = 150;

/// Typing delay multiplier bounds after natural text boundaries
const BOUNDARY_FACTOR_MIN: f64 = 1.5;
const BOUNDARY_FACTOR_MAX: f64 = 2.5;

/// Characters a human typist pauses after
fn is_boundary_char(ch: char) -> bool {
    matches!(ch, '.' | ',' | '!' | '?' | ' ' | '\n')
}

async fn pause<R: Rng + Send>(range: DelayRange, rng: &mut R) {
    let ms = range.sample(rng);
    sleep(Duration::from_millis(ms)).await;
}

/// Emulated click: curved pointer travel into the element's interior region,
/// a short hesitation, the actor's click primitive, a short settle.
///
/// Fails with [`EmulationError::ElementNotFound`] when the selector resolves
/// to nothing or the element reports no bounding box; never retried.
pub async fn click<A, R>(
    actor: &A,
    session: &mut Session,
    config: &ResolvedConfig,
    rng: &mut R,
    selector: &str,
    options: ClickOptions,
) -> Result<(), EmulationError>
where
    A: Actor + ?Sized,
    R: Rng + Send,
{
    let element = actor
        .resolve_element(selector)
        .await?
        .ok_or_else(|| EmulationError::ElementNotFound(selector.to_string()))?;
    let bounds = actor
        .bounding_box(&element)
        .await?
        .ok_or_else(|| EmulationError::ElementNotFound(format!("{selector}: no bounding box")))?;

    let target = bounds.random_interior_point(rng);
    debug!("Clicking {} at ({:.0}, {:.0})", selector, target.x, target.y);

    let path = geometry::plan(session.last_pointer(), target, config.move_steps, rng);
    motion::drive(actor, session, &path, config, rng).await?;

    pause(HESITATION, rng).await;
    actor.click_at(target.x, target.y, &options).await?;
    pause(POST_CLICK, rng).await;
    Ok(())
}

/// Emulated typing: click the selector to focus it, settle, then issue one
/// keystroke per character with randomized delays and longer pauses after
/// punctuation, spaces and newlines.
pub async fn type_text<A, R>(
    actor: &A,
    session: &mut Session,
    config: &ResolvedConfig,
    rng: &mut R,
    selector: &str,
    text: &str,
) -> Result<(), EmulationError>
where
    A: Actor + ?Sized,
    R: Rng + Send,
{
    click(actor, session, config, rng, selector, ClickOptions::default()).await?;
    pause(FOCUS_SETTLE, rng).await;
    type_characters(actor, config, rng, text).await
}

/// Emulated fill: focus the field, clear it with select-all plus delete the
/// way a human would, then run the same typing loop as [`type_text`].
pub async fn fill<A, R>(
    actor: &A,
    session: &mut Session,
    config: &ResolvedConfig,
    rng: &mut R,
    selector: &str,
    text: &str,
) -> Result<(), EmulationError>
where
    A: Actor + ?Sized,
    R: Rng + Send,
{
    click(actor, session, config, rng, selector, ClickOptions::default()).await?;

    actor.press_key_combo("Control+A").await?;
    pause(CLEAR_SELECT, rng).await;
    actor.press_key_combo("Delete").await?;
    pause(CLEAR_SETTLE, rng).await;

    type_characters(actor, config, rng, text).await
}

async fn type_characters<A, R>(
    actor: &A,
    config: &ResolvedConfig,
    rng: &mut R,
    text: &str,
) -> Result<(), EmulationError>
where
    A: Actor + ?Sized,
    R: Rng + Send,
{
    for ch in text.chars() {
        actor.type_character(ch).await?;
        let delay = sample_char_delay(ch, config.typing_delay, rng);
        sleep(Duration::from_millis(delay)).await;
    }
    Ok(())
}

/// Delay after one keystroke; boundary characters get a multiplicative
/// 1.5-2.5x pause on top of the base delay.
pub(crate) fn sample_char_delay<R: Rng>(ch: char, range: DelayRange, rng: &mut R) -> u64 {
    let base = range.sample(rng);
    if is_boundary_char(ch) {
        (base as f64 * rng.gen_range(BOUNDARY_FACTOR_MIN..=BOUNDARY_FACTOR_MAX)) as u64
    } else {
        base
    }
}

/// Split a scroll amount into chunk deltas that sum exactly to `amount`.
/// The chunk size is sampled once and reused for every chunk.
pub(crate) fn chunk_scroll(amount: u32, chunk: u32) -> Vec<u32> {
    if amount == 0 || chunk == 0 {
        return Vec::new();
    }
    let mut deltas = Vec::with_capacity(amount.div_ceil(chunk) as usize);
    let mut remaining = amount;
    while remaining > 0 {
        let delta = remaining.min(chunk);
        deltas.push(delta);
        remaining -= delta;
    }
    deltas
}

/// Emulated scroll: one large scroll becomes several smaller wheel events
/// with pauses between them. Does not touch the session; wheel events carry
/// no pointer position.
pub async fn scroll<A, R>(
    actor: &A,
    config: &ResolvedConfig,
    rng: &mut R,
    direction: ScrollDirection,
    amount: u32,
) -> Result<(), EmulationError>
where
    A: Actor + ?Sized,
    R: Rng + Send,
{
    let chunk = rng.gen_range(CHUNK_MIN..=CHUNK_MAX);
    let deltas = chunk_scroll(amount, chunk);
    debug!(
        "Scrolling {:?} {} units in {} chunks of up to {}",
        direction,
        amount,
        deltas.len(),
        chunk
    );

    for (i, delta) in deltas.iter().enumerate() {
        actor
            .wheel_scroll(0.0, f64::from(*delta) * direction.sign())
            .await?;
        if i + 1 < deltas.len() {
            pause(config.scroll_delay, rng).await;
        }
    }
    Ok(())
}
