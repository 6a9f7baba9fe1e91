//! Motion driver
//!
//! Replays a planned path against the actor's pointer-move primitive, pacing
//! each step by a distance-proportional, speed-randomized delay, and records
//! the final position in the session.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::actor::Actor;
use crate::config::ResolvedConfig;
use crate::error::EmulationError;
use crate::geometry::Point;
use crate::session::Session;

/// Floor for per-step delays; a zero-length step still yields briefly
const MIN_STEP_DELAY_MS: u64 = 1;

/// Drive the pointer along `path`, then set the session to its last point.
/// An empty path leaves the session untouched.
pub async fn drive<A, R>(
    actor: &A,
    session: &mut Session,
    path: &[Point],
    config: &ResolvedConfig,
    rng: &mut R,
) -> Result<(), EmulationError>
where
    A: Actor + ?Sized,
    R: Rng + Send,
{
    if path.is_empty() {
        return Ok(());
    }

    // The first point is the assumed current position and is never re-issued
    let mut previous = path[0];
    for point in &path[1..] {
        let distance = previous.distance_to(point);
        let speed = config.mouse_speed.sample(rng);
        // Speed is in distance-units per 100 ms
        let delay = ((distance / speed) * 100.0) as u64;
        sleep(Duration::from_millis(delay.max(MIN_STEP_DELAY_MS))).await;
        actor.move_pointer(point.x, point.y).await?;
        previous = *point;
    }

    session.set_pointer(previous);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::mock::{Call, MockActor};
    use crate::config::EmulationConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test(start_paused = true)]
    async fn drive_issues_every_point_after_the_first() {
        let actor = MockActor::default();
        let mut session = Session::new();
        let config = EmulationConfig::default().resolve();
        let mut rng = StdRng::seed_from_u64(1);

        let path = vec![
            Point::new(100.0, 100.0),
            Point::new(150.0, 120.0),
            Point::new(210.0, 160.0),
            Point::new(300.0, 200.0),
        ];
        drive(&actor, &mut session, &path, &config, &mut rng)
            .await
            .unwrap();

        let calls = actor.calls();
        assert_eq!(
            calls,
            vec![
                Call::Move(150.0, 120.0),
                Call::Move(210.0, 160.0),
                Call::Move(300.0, 200.0),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn drive_updates_session_to_last_point() {
        let actor = MockActor::default();
        let mut session = Session::new();
        let config = EmulationConfig::default().resolve();
        let mut rng = StdRng::seed_from_u64(2);

        let path = vec![Point::new(100.0, 100.0), Point::new(400.0, 250.0)];
        drive(&actor, &mut session, &path, &config, &mut rng)
            .await
            .unwrap();

        assert_eq!(session.last_pointer(), Point::new(400.0, 250.0));
    }

    #[tokio::test(start_paused = true)]
    async fn drive_leaves_session_alone_for_empty_path() {
        let actor = MockActor::default();
        let mut session = Session::new();
        session.set_pointer(Point::new(55.0, 66.0));
        let config = EmulationConfig::default().resolve();
        let mut rng = StdRng::seed_from_u64(3);

        drive(&actor, &mut session, &[], &config, &mut rng)
            .await
            .unwrap();

        assert_eq!(session.last_pointer(), Point::new(55.0, 66.0));
        assert!(actor.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn single_point_path_moves_nothing_but_settles_there() {
        let actor = MockActor::default();
        let mut session = Session::new();
        let config = EmulationConfig::default().resolve();
        let mut rng = StdRng::seed_from_u64(4);

        let path = vec![Point::new(320.0, 240.0)];
        drive(&actor, &mut session, &path, &config, &mut rng)
            .await
            .unwrap();

        assert!(actor.calls().is_empty());
        assert_eq!(session.last_pointer(), Point::new(320.0, 240.0));
    }
}
