//! Particle types and the fixed-capacity pool that recycles them.
//!
//! Particles are plain data. Motion, spawning and painting live in
//! [`SpaceAnimation`](super::SpaceAnimation); this module only knows how to
//! hand out free slots and keep the active count under the configured limit.

use core::array;

use embedded_graphics::pixelcolor::Rgb888;

use crate::colors::BLACK;

// =============================================================================
// Particle Pool
// =============================================================================

/// Anything a [`Pool`] can hold.
pub trait Particle: Default {
    fn is_active(&self) -> bool;

    fn deactivate(&mut self);
}

/// Fixed array of `N` particles of which the first `limit` may be active.
///
/// Slots are recycled in place: spawning reuses the first inactive slot below
/// the limit, and a pool with no free slot ignores the request.
pub struct Pool<T: Particle, const N: usize> {
    slots: [T; N],
    limit: usize,
}

impl<T: Particle, const N: usize> Pool<T, N> {
    pub fn new() -> Self {
        Self {
            slots: array::from_fn(|_| T::default()),
            limit: N,
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize { N }

    #[inline]
    pub const fn limit(&self) -> usize { self.limit }

    /// Set the active limit (clamped to capacity). Slots above it go inactive.
    pub fn set_limit(
        &mut self,
        limit: usize,
    ) {
        self.limit = limit.min(N);
        for slot in &mut self.slots[self.limit..] {
            slot.deactivate();
        }
    }

    pub fn active_count(&self) -> usize { self.slots.iter().filter(|p| p.is_active()).count() }

    /// First free slot below the limit, or `None` when the pool is full.
    pub fn spawn(&mut self) -> Option<&mut T> { self.slots[..self.limit].iter_mut().find(|p| !p.is_active()) }

    /// Every slot below the limit, active or not.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut T> { self.slots[..self.limit].iter_mut() }

    pub fn active(&self) -> impl Iterator<Item = &T> { self.slots.iter().filter(|p| p.is_active()) }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut T> { self.slots.iter_mut().filter(|p| p.is_active()) }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }
}

impl<T: Particle, const N: usize> Default for Pool<T, N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Particles
// =============================================================================

macro_rules! impl_particle {
    ($($ty:ty),*) => {
        $(
            impl Particle for $ty {
                #[inline]
                fn is_active(&self) -> bool { self.active }

                #[inline]
                fn deactivate(&mut self) { self.active = false; }
            }
        )*
    };
}

/// Background star drifting left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Drift in pixels per update before the parallax factor.
    pub speed: f32,
    pub brightness: u8,
    pub color: Rgb888,
    pub active: bool,
}

/// Fast streak with a fading tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comet {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub trail: u8,
    pub color: Rgb888,
    pub active: bool,
}

/// Slow blob with a shimmer phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planet {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub size: u8,
    pub color: Rgb888,
    /// Only modulates brightness.
    pub phase: f32,
    pub active: bool,
}

/// Two-pixel ship with an animated engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spaceship {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Sprite frame, 0..4.
    pub frame: u8,
    pub last_frame_ms: u32,
    pub color: Rgb888,
    pub active: bool,
}

impl Default for Star {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            speed: 0.0,
            brightness: 0,
            color: BLACK,
            active: false,
        }
    }
}

impl Default for Comet {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            trail: 0,
            color: BLACK,
            active: false,
        }
    }
}

impl Default for Planet {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            speed: 0.0,
            size: 0,
            color: BLACK,
            phase: 0.0,
            active: false,
        }
    }
}

impl Default for Spaceship {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            frame: 0,
            last_frame_ms: 0,
            color: BLACK,
            active: false,
        }
    }
}

impl_particle!(Star, Comet, Planet, Spaceship);
