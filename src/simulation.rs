use crate::config::Config;
use crate::error::{Error, Result};
use crate::factory::spawn_balls;
use crate::items::{Ball, VelocityLimits};
use crate::library::distance;
use crate::render::Renderer;

/// Counters for one call to [`Simulation::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Touching pairs whose overlap and velocities were resolved.
    pub contacts: usize,
    /// Touching pairs skipped because their centers coincide.
    pub degenerate: usize,
    /// Balls reflected off the surface edges.
    pub reflections: usize,
}

/// Owns the population and the surface it bounces around in.
pub struct Simulation {
    extent: [f64; 2],
    limits: VelocityLimits,
    balls: Vec<Ball>,
    steps: u64,
}

fn check_extent(extent: [f64; 2]) -> Result<()> {
    if !extent.iter().all(|e| e.is_finite() && *e > 0.0) {
        return Err(Error::InvalidConfiguration(format!(
            "surface extent must be finite and > 0, got {}x{}",
            extent[0], extent[1]
        )));
    }
    Ok(())
}

/// Separates a touching pair and gives both their post-collision velocities.
fn ball_collision(ball: &mut Ball, other: &mut Ball, limits: VelocityLimits) -> Result<()> {
    let dist = distance(ball.position, other.position);
    if dist <= ball.radius() + other.radius() {
        ball.resolve_overlap(other, dist)?;
    }
    // the normal must come from the corrected positions
    let dist = distance(ball.position, other.position);
    let (v_ball, v_other) = ball.solve_velocities(other, dist, limits)?;
    ball.velocity = v_ball;
    other.velocity = v_other;
    Ok(())
}

impl Simulation {
    /// Spawns the population described by `config`.
    pub fn new(config: &Config) -> Result<Simulation> {
        let balls = spawn_balls(config)?;
        Simulation::from_balls(balls, config.extent, config.velocity_limits())
    }

    /// Wraps an existing population. Ball ids are reassigned to their index.
    pub fn from_balls(
        mut balls: Vec<Ball>,
        extent: [f64; 2],
        limits: VelocityLimits,
    ) -> Result<Simulation> {
        check_extent(extent)?;
        if limits.min > limits.max || limits.min.is_nan() || limits.max.is_nan() {
            return Err(Error::InvalidConfiguration(format!(
                "velocity limits are inverted: {} > {}",
                limits.min, limits.max
            )));
        }
        for (idx, ball) in balls.iter_mut().enumerate() {
            ball.id = idx;
        }
        Ok(Simulation {
            extent,
            limits,
            balls,
            steps: 0,
        })
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn num_balls(&self) -> usize {
        self.balls.len()
    }

    pub fn extent(&self) -> [f64; 2] {
        self.extent
    }

    pub fn limits(&self) -> VelocityLimits {
        self.limits
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Updates the surface size. Balls left outside are brought back by reflection.
    pub fn resize(&mut self, extent: [f64; 2]) -> Result<()> {
        check_extent(extent)?;
        self.extent = extent;
        Ok(())
    }

    /// Advances every ball by one tick.
    ///
    /// Balls are handled in index order: ball `i` first resolves its contacts
    /// with every ball `j > i`, then reflects off the edges and moves. Each
    /// unordered pair is therefore resolved at most once per step. A pair with
    /// coincident centers is skipped for this step.
    pub fn step(&mut self) -> StepStats {
        let mut stats = StepStats::default();
        let limits = self.limits;
        let extent = self.extent;
        let count = self.balls.len();
        for idx in 0..count {
            for o_idx in (idx + 1)..count {
                let Ok([ball, other]) = self.balls.get_disjoint_mut([idx, o_idx]) else {
                    continue;
                };
                if !ball.collides(other) {
                    continue;
                }
                match ball_collision(ball, other, limits) {
                    Ok(()) => stats.contacts += 1,
                    Err(_) => stats.degenerate += 1,
                }
            }
            let ball = &mut self.balls[idx];
            if ball.wall_collision(extent) {
                stats.reflections += 1;
            }
            ball.move_ball();
        }
        self.steps += 1;
        stats
    }

    pub fn draw_frame<R: Renderer>(&self, renderer: &mut R) {
        for ball in &self.balls {
            renderer.draw_particle(ball.position, ball.radius(), ball.color);
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.balls.iter().map(|b| b.kinetic_energy()).sum()
    }

    pub fn momentum(&self) -> [f64; 2] {
        self.balls.iter().fold([0.0, 0.0], |acc, b| {
            let p = b.momentum();
            [acc[0] + p[0], acc[1] + p[1]]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Color;

    struct Recorder(Vec<([f64; 2], f64, Color)>);

    impl Renderer for Recorder {
        fn draw_particle(&mut self, position: [f64; 2], radius: f64, color: Color) {
            self.0.push((position, radius, color));
        }
    }

    fn ball(position: [f64; 2], velocity: [f64; 2], radius: f64) -> Ball {
        Ball::new(position, Some(velocity), Some(radius), None).expect("valid ball")
    }

    #[test]
    fn new_from_config() -> Result<()> {
        let sim = Simulation::new(&Config {
            count: 12,
            seed: Some(5),
            ..Config::default()
        })?;
        assert_eq!(sim.num_balls(), 12);
        assert_eq!(sim.extent(), [800.0, 600.0]);
        assert_eq!(sim.steps(), 0);
        assert!(sim.kinetic_energy() > 0.0);
        Ok(())
    }

    #[test]
    fn rejects_bad_surface() {
        assert!(Simulation::from_balls(vec![], [0.0, 10.0], VelocityLimits::UNBOUNDED).is_err());
        let bad_limits = VelocityLimits { min: 3.0, max: -3.0 };
        assert!(Simulation::from_balls(vec![], [10.0, 10.0], bad_limits).is_err());
    }

    #[test]
    fn coincident_pair_is_skipped_not_fatal() -> Result<()> {
        let mut sim = Simulation::from_balls(
            vec![ball([50.0, 50.0], [1.0, 0.0], 5.0), ball([50.0, 50.0], [0.0, 1.0], 5.0)],
            [100.0, 100.0],
            VelocityLimits::symmetric(5.0),
        )?;
        let stats = sim.step();
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.contacts, 0);
        assert_eq!(sim.balls()[0].position, [51.0, 50.0]);
        assert_eq!(sim.balls()[1].position, [50.0, 51.0]);
        Ok(())
    }

    #[test]
    fn head_on_pair_counts_one_contact() -> Result<()> {
        let mut sim = Simulation::from_balls(
            vec![ball([40.0, 50.0], [2.0, 0.0], 10.0), ball([55.0, 50.0], [-2.0, 0.0], 10.0)],
            [200.0, 100.0],
            VelocityLimits::symmetric(2.0),
        )?;
        let stats = sim.step();
        assert_eq!(stats, StepStats { contacts: 1, degenerate: 0, reflections: 0 });
        assert_eq!(sim.steps(), 1);
        Ok(())
    }

    #[test]
    fn resize_updates_extent() -> Result<()> {
        let mut sim = Simulation::from_balls(vec![], [10.0, 10.0], VelocityLimits::UNBOUNDED)?;
        sim.resize([640.0, 480.0])?;
        assert_eq!(sim.extent(), [640.0, 480.0]);
        assert!(sim.resize([-1.0, 480.0]).is_err());
        assert_eq!(sim.extent(), [640.0, 480.0]);
        Ok(())
    }

    #[test]
    fn draw_frame_hands_every_ball_to_renderer() -> Result<()> {
        let sim = Simulation::from_balls(
            vec![
                ball([10.0, 10.0], [0.0, 0.0], 3.0),
                Ball::new([30.0, 20.0], None, Some(4.0), Some(Color::WHITE))?,
            ],
            [100.0, 100.0],
            VelocityLimits::UNBOUNDED,
        )?;
        let mut recorder = Recorder(Vec::new());
        sim.draw_frame(&mut recorder);
        assert_eq!(
            recorder.0,
            vec![([10.0, 10.0], 3.0, Color::GHOST), ([30.0, 20.0], 4.0, Color::WHITE)]
        );
        Ok(())
    }
}
