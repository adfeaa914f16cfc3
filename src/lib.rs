//! Elastic collisions between circular particles bouncing around a 2-D arena.
//!
//! The crate holds the physics core only. Drawing goes through the
//! [`render::Renderer`] trait and the frame loop lives in the binary.

pub mod config;
pub mod error;
pub mod factory;
pub mod items;
pub mod render;
pub mod simulation;

pub use config::{ColorPolicy, Config};
pub use error::{Error, Result};
pub use items::{Ball, Color};
pub use render::Renderer;
pub use simulation::{Simulation, StepStats};

pub mod library {
    pub fn dot(vec1: [f64; 2], vec2: [f64; 2]) -> f64 {
        vec1[0] * vec2[0] + vec1[1] * vec2[1]
    }

    pub fn get_magnitude(vec: [f64; 2]) -> f64 {
        dot(vec, vec).sqrt()
    }

    pub fn normalize(vec: [f64; 2]) -> [f64; 2] {
        let mag = get_magnitude(vec);
        if mag == 0.0 {
            return [0.0, 0.0];
        }
        [vec[0] / mag, vec[1] / mag]
    }

    pub fn find_vector(x: [f64; 2], y: [f64; 2]) -> [f64; 2] {
        [y[0] - x[0], y[1] - x[1]]
    }

    /// Squared center distance. Used on the hot detection path to skip the root.
    pub fn squared_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
        let vec = find_vector(a, b);
        dot(vec, vec)
    }

    pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
        squared_distance(a, b).sqrt()
    }

}
