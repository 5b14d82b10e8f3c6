//! Plain data for every animated object in the city.
//!
//! These are engine-agnostic records. The render layer mirrors them into
//! Bevy entities, but the generator and the frame update only ever see
//! these structs.

use bevy::prelude::*;

/// A lit tower standing on the ground plane.
#[derive(Clone, Debug)]
pub struct Building {
    /// Centre of the box. `y` is always `height / 2`.
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Emissive tint, drawn from the neon palette.
    pub color: Color,
    /// Angular speed of the glow pulse (rad/s).
    pub pulse_speed: f32,
    /// Phase of the glow pulse.
    pub pulse_offset: f32,
    /// Current glow level, rewritten every frame.
    pub emissive_intensity: f32,
    /// Lattice point this building was grown from, before jitter.
    pub lattice_cell: IVec2,
    pub windows: Vec<WindowPane>,
}

/// A single window on the front face of its building.
#[derive(Clone, Debug)]
pub struct WindowPane {
    /// Offset from the building centre.
    pub local_position: Vec3,
    pub color: Color,
    /// Opacity assigned at creation, before any flicker has run.
    pub base_opacity: f32,
    pub flicker_speed: f32,
    pub flicker_offset: f32,
    /// Current opacity. May dip below zero; the renderer clamps.
    pub opacity: f32,
}

/// One point of the rising dust field.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub color: Color,
}

/// The whole particle pool plus its slow spin about the Y axis.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub rotation_y: f32,
}

/// World axis a car travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelAxis {
    X,
    Z,
}

/// A flying car: a short glowing bar shuttling back and forth.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub position: Vec3,
    pub color: Color,
    /// Distance per frame.
    pub speed: f32,
    /// `+1.0` or `-1.0`.
    pub direction: f32,
    pub axis: TravelAxis,
}

impl Vehicle {
    /// Coordinate along the travel axis.
    pub fn axis_coordinate(&self) -> f32 {
        match self.axis {
            TravelAxis::X => self.position.x,
            TravelAxis::Z => self.position.z,
        }
    }

    pub fn axis_coordinate_mut(&mut self) -> &mut f32 {
        match self.axis {
            TravelAxis::X => &mut self.position.x,
            TravelAxis::Z => &mut self.position.z,
        }
    }
}

/// Hovering neon ring.
#[derive(Clone, Debug)]
pub struct NeonRing {
    pub position: Vec3,
    pub rotation_y: f32,
    pub color: Color,
}

/// Circular path in the XZ plane.
#[derive(Clone, Copy, Debug)]
pub struct Orbit {
    pub radius: f32,
    /// rad/s
    pub angular_speed: f32,
    pub phase: f32,
}

impl Orbit {
    /// XZ offset at elapsed time `t` seconds.
    pub fn offset_at(&self, t: f64) -> Vec2 {
        let angle = phase_angle(t, self.angular_speed, self.phase);
        Vec2::new(angle.sin(), angle.cos()) * self.radius
    }
}

/// `t * rate + offset` reduced to `[0, 2π)`.
///
/// Computed in `f64` so the angle stays fine-grained after days of uptime.
pub fn phase_angle(t: f64, rate: f32, offset: f32) -> f32 {
    (t * f64::from(rate) + f64::from(offset)).rem_euclid(std::f64::consts::TAU) as f32
}

/// Coloured point light. Lights with an orbit are moved every frame.
#[derive(Clone, Debug)]
pub struct CityLight {
    pub position: Vec3,
    pub color: Color,
    /// Relative strength; the render layer scales this to lumens.
    pub intensity: f32,
    pub range: f32,
    pub orbit: Option<Orbit>,
}

/// Where the viewer is and what they look at.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 30.0, 80.0),
            look_at: Vec3::new(0.0, 20.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_starts_on_positive_z_without_phase() {
        let orbit = Orbit {
            radius: 30.0,
            angular_speed: 0.5,
            phase: 0.0,
        };
        let offset = orbit.offset_at(0.0);
        assert!(offset.x.abs() < 1e-5);
        assert!((offset.y - 30.0).abs() < 1e-5);
    }

    #[test]
    fn phase_angle_keeps_resolution_after_days() {
        let t = 3.0 * 86_400.0;
        let angle = phase_angle(t, 0.5, 0.0);
        let next = phase_angle(t + 1.0 / 60.0, 0.5, 0.0);
        assert!((0.0..std::f32::consts::TAU).contains(&angle));
        assert!((next - angle - 0.5 / 60.0).abs() < 1e-5);
    }

    #[test]
    fn axis_coordinate_follows_axis() {
        let mut car = Vehicle {
            position: Vec3::new(1.0, 2.0, 3.0),
            color: Color::WHITE,
            speed: 0.5,
            direction: 1.0,
            axis: TravelAxis::Z,
        };
        assert_eq!(car.axis_coordinate(), 3.0);
        *car.axis_coordinate_mut() = -7.0;
        assert_eq!(car.position, Vec3::new(1.0, 2.0, -7.0));
    }
}
