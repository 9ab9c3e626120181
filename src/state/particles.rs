// Cursor-trail particle field. Pure per-frame state; the canvas component
// owns one in a RefCell and paints from it.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

pub const TRAIL_COLORS: [&str; 4] = ["#00ff9f", "#ff00ff", "#00d4ff", "#ffff00"];
/// Particles emitted per mousemove event.
pub const EMIT_PER_MOVE: usize = 3;
const START_LIFE: f64 = 100.0;
const LIFE_DECAY: f64 = 2.0;
const SIZE_DECAY: f64 = 0.05;
const MIN_SIZE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct TrailParticle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub life: f64,
    pub color: &'static str,
}

impl TrailParticle {
    /// Opacity for drawing, fading out with remaining life.
    pub fn alpha(&self) -> f64 {
        (self.life / START_LIFE).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<TrailParticle>,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn a burst at the pointer position.
    pub fn emit(&mut self, x: f64, y: f64) {
        for _ in 0..EMIT_PER_MOVE {
            let color = TRAIL_COLORS[self.rng.random_range(0..TRAIL_COLORS.len())];
            self.particles.push(TrailParticle {
                x,
                y,
                size: self.rng.random_range(1.0..4.0),
                speed_x: self.rng.random_range(-1.0..1.0),
                speed_y: self.rng.random_range(-1.0..1.0),
                life: START_LIFE,
                color,
            });
        }
    }

    /// Advance one frame: drift, decay, prune the dead.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.speed_x;
            p.y += p.speed_y;
            p.life -= LIFE_DECAY;
            if p.size > MIN_SIZE {
                p.size -= SIZE_DECAY;
            }
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn particles(&self) -> &[TrailParticle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_spawns_a_fixed_burst() {
        let mut field = ParticleField::new(1);
        field.emit(10.0, 20.0);
        assert_eq!(field.particles().len(), EMIT_PER_MOVE);
        for p in field.particles() {
            assert_eq!((p.x, p.y), (10.0, 20.0));
            assert!(TRAIL_COLORS.contains(&p.color));
            assert!(p.size >= 1.0 && p.size < 4.0);
        }
    }

    #[test]
    fn particles_decay_and_die() {
        let mut field = ParticleField::new(2);
        field.emit(0.0, 0.0);
        // Life 100, minus 2 per step: gone after 50 steps.
        for _ in 0..49 {
            field.step();
            assert_eq!(field.particles().len(), EMIT_PER_MOVE);
        }
        field.step();
        assert!(field.particles().is_empty());
    }

    #[test]
    fn alpha_tracks_remaining_life() {
        let mut field = ParticleField::new(3);
        field.emit(0.0, 0.0);
        assert_eq!(field.particles()[0].alpha(), 1.0);
        for _ in 0..25 {
            field.step();
        }
        let alpha = field.particles()[0].alpha();
        assert!((alpha - 0.5).abs() < 1e-9);
    }

    #[test]
    fn size_never_shrinks_past_the_floor() {
        let mut field = ParticleField::new(4);
        field.emit(0.0, 0.0);
        for _ in 0..45 {
            field.step();
            for p in field.particles() {
                assert!(p.size >= MIN_SIZE - SIZE_DECAY);
            }
        }
    }
}
