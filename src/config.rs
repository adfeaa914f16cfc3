use crate::error::{Error, Result};
use crate::items::{Color, VelocityLimits};

/// How the factory colours new balls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorPolicy {
    Fixed(Color),
    /// Random RGB with the given alpha.
    Random { alpha: u8 },
}

/// Setup parameters for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of balls created at start.
    pub count: usize,
    /// Inclusive `[min, max]` radius range.
    pub radius_range: [f64; 2],
    /// Inclusive `[min, max]` initial speed per axis; the sign is random.
    pub speed_range: [f64; 2],
    /// Post-collision velocity components are clamped into `[-max_velocity, max_velocity]`.
    pub max_velocity: f64,
    /// Surface width and height in pixels.
    pub extent: [f64; 2],
    pub color_policy: ColorPolicy,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            count: 200,
            radius_range: [10.0, 10.0],
            speed_range: [2.0, 2.0],
            max_velocity: 2.0,
            extent: [800.0, 600.0],
            color_policy: ColorPolicy::Fixed(Color::GHOST),
            seed: None,
        }
    }
}

fn check_range(name: &str, range: [f64; 2]) -> Result<()> {
    if !range.iter().all(|v| v.is_finite()) {
        return Err(Error::InvalidConfiguration(format!("{name} must be finite")));
    }
    if range[0] > range[1] {
        return Err(Error::InvalidConfiguration(format!(
            "{name} is inverted: min {} > max {}",
            range[0], range[1]
        )));
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidConfiguration("count must be > 0".into()));
        }
        check_range("radius range", self.radius_range)?;
        if self.radius_range[0] <= 0.0 {
            return Err(Error::InvalidConfiguration("radius must be > 0".into()));
        }
        check_range("speed range", self.speed_range)?;
        if self.speed_range[0] < 0.0 {
            return Err(Error::InvalidConfiguration(
                "speed range must be non-negative".into(),
            ));
        }
        if !self.max_velocity.is_finite() || self.max_velocity < 0.0 {
            return Err(Error::InvalidConfiguration(
                "max velocity must be finite and >= 0".into(),
            ));
        }
        let diameter = 2.0 * self.radius_range[1];
        if !self.extent.iter().all(|e| e.is_finite() && *e >= diameter) {
            return Err(Error::InvalidConfiguration(format!(
                "surface {}x{} cannot fit a ball of radius {}",
                self.extent[0], self.extent[1], self.radius_range[1]
            )));
        }
        Ok(())
    }

    pub fn velocity_limits(&self) -> VelocityLimits {
        VelocityLimits::symmetric(self.max_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() -> Result<()> {
        Config::default().validate()
    }

    #[test]
    fn inverted_ranges_rejected() {
        let cfg = Config {
            radius_range: [12.0, 4.0],
            ..Config::default()
        };
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.contains("radius range is inverted"), "{msg}");

        let cfg = Config {
            speed_range: [3.0, 1.0],
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn non_positive_radius_rejected() {
        let cfg = Config {
            radius_range: [0.0, 5.0],
            ..Config::default()
        };
        assert!(cfg.validate().unwrap_err().to_string().contains("radius"));
    }

    #[test]
    fn surface_must_fit_largest_ball() {
        let cfg = Config {
            radius_range: [5.0, 40.0],
            extent: [100.0, 60.0],
            ..Config::default()
        };
        assert!(cfg.validate().unwrap_err().to_string().contains("cannot fit"));
    }

    #[test]
    fn limits_are_symmetric() {
        let limits = Config::default().velocity_limits();
        assert_eq!(limits.min, -2.0);
        assert_eq!(limits.max, 2.0);
    }
}
