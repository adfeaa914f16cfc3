//! Builds the initial population from a validated [`Config`].

use crate::config::{ColorPolicy, Config};
use crate::error::Result;
use crate::items::{Ball, Color};
use rand::{Rng, SeedableRng, rng, rngs::StdRng};

/// Creates `config.count` balls inside the surface.
///
/// Each ball is placed so its whole disc lies on the surface. Balls may
/// start overlapping; the first steps push them apart. Per axis the initial
/// speed is drawn from `speed_range` with a random sign.
pub fn spawn_balls(config: &Config) -> Result<Vec<Ball>> {
    config.validate()?;
    let mut rng: StdRng = match config.seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    };

    let mut balls = Vec::with_capacity(config.count);
    for id in 0..config.count {
        let [r_min, r_max] = config.radius_range;
        let radius = rng.random_range(r_min..=r_max);

        let mut position = [0.0; 2];
        for (axis, p) in position.iter_mut().enumerate() {
            *p = rng.random_range(radius..=config.extent[axis] - radius);
        }

        let mut velocity = [0.0; 2];
        for v in velocity.iter_mut() {
            let speed = rng.random_range(config.speed_range[0]..=config.speed_range[1]);
            *v = if rng.random_bool(0.5) { -speed } else { speed };
        }

        let color = match config.color_policy {
            ColorPolicy::Fixed(color) => color,
            ColorPolicy::Random { alpha } => Color::rgba(rng.random(), rng.random(), rng.random(), alpha),
        };

        let mut ball = Ball::new(position, Some(velocity), Some(radius), Some(color))?;
        ball.id = id;
        balls.push(ball);
    }
    Ok(balls)
}
