//! Space animation mode.
//!
//! # Architecture
//!
//! Four particle pools plus a procedural nebula, advanced by [`update`] at
//! most every [`SPACE_UPDATE_INTERVAL_MS`] and painted by [`render`] back to
//! front:
//!
//! 1. Nebula: sine/cosine field sampled on a 4x2 grid, low values dropped
//! 2. Stars: endless leftward drift, respawned at the right edge
//! 3. Planets: slow shimmering blobs
//! 4. Comets: head plus a tail sampled back along the velocity
//! 5. Spaceships: two-pixel body with a flickering engine
//!
//! Comets, planets and ships spawn on their own timers into the first free
//! pool slot; a full pool skips that spawn.
//!
//! [`update`]: SpaceAnimation::update
//! [`render`]: SpaceAnimation::render

mod objects;

pub use objects::{Comet, Particle, Planet, Pool, Spaceship, Star};

use embedded_graphics::pixelcolor::Rgb888;
use micromath::F32;
use rand::{Rng, RngCore};

use crate::colors::{ORANGE, RED, hsv, scale};
use crate::config::{
    DISPLAY_HEIGHT, DISPLAY_HEIGHT_I32, DISPLAY_WIDTH, DISPLAY_WIDTH_I32, SPACE_COMET_COUNT, SPACE_COMET_SPAWN_INTERVAL_MS,
    SPACE_NEBULA_STEP_MS, SPACE_PARALLAX_SPEED, SPACE_PLANET_COUNT, SPACE_PLANET_SPAWN_INTERVAL_MS, SPACE_SHIP_FRAME_MS,
    SPACE_SPACESHIP_COUNT, SPACE_SPACESHIP_SPAWN_INTERVAL_MS, SPACE_STAR_COUNT, SPACE_STAR_SPEED_MAX, SPACE_STAR_SPEED_MIN,
    SPACE_UPDATE_INTERVAL_MS,
};
use crate::frame::Frame;
use crate::surface::PixelSurface;
use crate::timing::elapsed_ms;

const WIDTH: f32 = DISPLAY_WIDTH as f32;
const HEIGHT: f32 = DISPLAY_HEIGHT as f32;

/// Distance past the edges a comet or ship may travel before it is dropped.
const OFFSCREEN_MARGIN: f32 = 10.0;

/// Vertical margin for ships.
const SHIP_MARGIN_Y: f32 = 5.0;

/// Percent chance per update that a star re-rolls its brightness.
const TWINKLE_PERCENT: u8 = 2;

/// Tail sample spacing as a fraction of comet velocity.
const TAIL_SPACING: f32 = 0.3;

const PLANET_SPIN: f32 = 0.05;

const NEBULA_THRESHOLD: u8 = 15;

/// Uniform float in `[min, max)`, or `min` for an empty range.
fn random_f32<R: RngCore + ?Sized>(
    rng: &mut R,
    min: f32,
    max: f32,
) -> f32 {
    if max > min { rng.random_range(min..max) } else { min }
}

/// Star tint by brightness: white, yellow, orange, red.
const fn star_color(brightness: u8) -> Rgb888 {
    if brightness > 200 {
        hsv(0, 0, brightness)
    } else if brightness > 150 {
        hsv(40, 100, brightness)
    } else if brightness > 100 {
        hsv(20, 150, brightness)
    } else {
        hsv(0, 200, brightness)
    }
}

/// Fresh row, speed and brightness for a star entering the field.
fn roll_star<R: RngCore + ?Sized>(
    star: &mut Star,
    rng: &mut R,
    speed_min: f32,
    speed_max: f32,
) {
    star.y = random_f32(rng, 0.0, HEIGHT);
    star.speed = random_f32(rng, speed_min, speed_max);
    star.brightness = rng.random_range(50..255);
    star.color = star_color(star.brightness);
}

/// Paint one particle pixel. Positions truncate toward zero.
#[inline]
fn draw_pixel<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x: f32,
    y: f32,
    color: Rgb888,
    brightness: u8,
) {
    surface.set_pixel(x as i32, y as i32, scale(color, brightness));
}

// =============================================================================
// Space Animation
// =============================================================================

pub struct SpaceAnimation {
    stars: Pool<Star, SPACE_STAR_COUNT>,
    comets: Pool<Comet, SPACE_COMET_COUNT>,
    planets: Pool<Planet, SPACE_PLANET_COUNT>,
    ships: Pool<Spaceship, SPACE_SPACESHIP_COUNT>,

    parallax_speed: f32,
    star_speed_min: f32,
    star_speed_max: f32,
    paused: bool,

    last_update_ms: u32,
    comet_timer_ms: u32,
    planet_timer_ms: u32,
    ship_timer_ms: u32,
    nebula_timer_ms: u32,
    nebula_phase: u8,
}

impl SpaceAnimation {
    /// Stars are seeded on the first update.
    pub fn new(now_ms: u32) -> Self {
        Self {
            stars: Pool::new(),
            comets: Pool::new(),
            planets: Pool::new(),
            ships: Pool::new(),
            parallax_speed: SPACE_PARALLAX_SPEED,
            star_speed_min: SPACE_STAR_SPEED_MIN,
            star_speed_max: SPACE_STAR_SPEED_MAX,
            paused: false,
            last_update_ms: now_ms,
            comet_timer_ms: now_ms,
            planet_timer_ms: now_ms,
            ship_timer_ms: now_ms,
            nebula_timer_ms: now_ms,
            nebula_phase: 0,
        }
    }

    /// Drop every particle and restart all timers.
    pub fn reset(
        &mut self,
        now_ms: u32,
    ) {
        self.stars.clear();
        self.comets.clear();
        self.planets.clear();
        self.ships.clear();
        self.nebula_phase = 0;
        self.last_update_ms = now_ms;
        self.comet_timer_ms = now_ms;
        self.planet_timer_ms = now_ms;
        self.ship_timer_ms = now_ms;
        self.nebula_timer_ms = now_ms;
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn set_star_count(
        &mut self,
        count: usize,
    ) {
        self.stars.set_limit(count);
    }

    pub fn set_comet_count(
        &mut self,
        count: usize,
    ) {
        self.comets.set_limit(count);
    }

    pub fn set_planet_count(
        &mut self,
        count: usize,
    ) {
        self.planets.set_limit(count);
    }

    pub fn set_spaceship_count(
        &mut self,
        count: usize,
    ) {
        self.ships.set_limit(count);
    }

    pub fn set_parallax_speed(
        &mut self,
        speed: f32,
    ) {
        self.parallax_speed = speed;
    }

    /// Range for newly rolled star speeds. Bounds may be given in any order.
    pub fn set_star_speed_range(
        &mut self,
        min: f32,
        max: f32,
    ) {
        self.star_speed_min = min.min(max);
        self.star_speed_max = min.max(max);
    }

    pub fn pause(&mut self) { self.paused = true; }

    pub fn resume(&mut self) { self.paused = false; }

    #[inline]
    pub const fn is_paused(&self) -> bool { self.paused }

    #[inline]
    pub const fn nebula_phase(&self) -> u8 { self.nebula_phase }

    pub fn stars(&self) -> &Pool<Star, SPACE_STAR_COUNT> { &self.stars }

    pub fn comets(&self) -> &Pool<Comet, SPACE_COMET_COUNT> { &self.comets }

    pub fn planets(&self) -> &Pool<Planet, SPACE_PLANET_COUNT> { &self.planets }

    pub fn spaceships(&self) -> &Pool<Spaceship, SPACE_SPACESHIP_COUNT> { &self.ships }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Advance the simulation. Returns `false` when paused or rate-limited.
    pub fn update<S: PixelSurface, R: RngCore>(
        &mut self,
        frame: &mut Frame<'_, S, R>,
    ) -> bool {
        if self.paused {
            return false;
        }
        let now = frame.now_ms;
        if elapsed_ms(now, self.last_update_ms) < SPACE_UPDATE_INTERVAL_MS {
            return false;
        }
        self.last_update_ms = now;

        self.update_stars(frame.rng);
        self.update_comets(now, frame.rng);
        self.update_planets(now, frame.rng);
        self.update_ships(now, frame.rng);
        self.update_nebula(now);
        true
    }

    fn update_stars<R: RngCore>(
        &mut self,
        rng: &mut R,
    ) {
        let (min, max, parallax) = (self.star_speed_min, self.star_speed_max, self.parallax_speed);

        for star in self.stars.slots_mut() {
            if !star.active {
                // Newly allowed slot: seed anywhere on screen
                star.x = random_f32(rng, 0.0, WIDTH);
                roll_star(star, rng, min, max);
                star.active = true;
                continue;
            }

            star.x -= star.speed * parallax;
            if star.x < 0.0 {
                star.x = WIDTH;
                roll_star(star, rng, min, max);
            }

            if rng.random_range(0..100) < TWINKLE_PERCENT {
                star.brightness = rng.random_range(50..255);
                star.color = star_color(star.brightness);
            }
        }
    }

    fn update_comets<R: RngCore>(
        &mut self,
        now: u32,
        rng: &mut R,
    ) {
        if elapsed_ms(now, self.comet_timer_ms) > SPACE_COMET_SPAWN_INTERVAL_MS {
            if let Some(comet) = self.comets.spawn() {
                comet.x = WIDTH + 5.0;
                comet.y = random_f32(rng, 0.0, HEIGHT);
                comet.vx = random_f32(rng, -4.0, -1.5);
                comet.vy = 0.0;
                comet.trail = rng.random_range(3..8);
                comet.color = hsv(rng.random_range(150..200), rng.random_range(100..200), 255);
                comet.active = true;
            }
            self.comet_timer_ms = now;
        }

        for comet in self.comets.active_mut() {
            comet.x += comet.vx;
            comet.y += comet.vy;
            if comet.x < -OFFSCREEN_MARGIN
                || comet.x > WIDTH + OFFSCREEN_MARGIN
                || comet.y < -OFFSCREEN_MARGIN
                || comet.y > HEIGHT + OFFSCREEN_MARGIN
            {
                comet.active = false;
            }
        }
    }

    fn update_planets<R: RngCore>(
        &mut self,
        now: u32,
        rng: &mut R,
    ) {
        if elapsed_ms(now, self.planet_timer_ms) > SPACE_PLANET_SPAWN_INTERVAL_MS {
            if let Some(planet) = self.planets.spawn() {
                planet.x = WIDTH + 10.0;
                planet.y = random_f32(rng, 1.0, HEIGHT - 3.0);
                planet.speed = random_f32(rng, 0.3, 1.0);
                planet.size = rng.random_range(2..5);
                // Four hue families, 60 apart
                let hue = rng.random_range(0..4u8) * 60 + rng.random_range(0..30u8);
                planet.color = hsv(hue, rng.random_range(150..255), rng.random_range(120..200));
                planet.phase = 0.0;
                planet.active = true;
            }
            self.planet_timer_ms = now;
        }

        for planet in self.planets.active_mut() {
            planet.x -= planet.speed;
            planet.phase += PLANET_SPIN;
            if planet.x < -f32::from(planet.size) {
                planet.active = false;
            }
        }
    }

    fn update_ships<R: RngCore>(
        &mut self,
        now: u32,
        rng: &mut R,
    ) {
        if elapsed_ms(now, self.ship_timer_ms) > SPACE_SPACESHIP_SPAWN_INTERVAL_MS {
            if let Some(ship) = self.ships.spawn() {
                if rng.random_bool(0.5) {
                    ship.x = -5.0;
                    ship.vx = random_f32(rng, 2.0, 4.0);
                } else {
                    ship.x = WIDTH + 5.0;
                    ship.vx = random_f32(rng, -4.0, -2.0);
                }
                ship.y = random_f32(rng, 1.0, HEIGHT - 2.0);
                ship.vy = 0.0;
                ship.frame = 0;
                ship.last_frame_ms = now;
                ship.color = hsv(rng.random_range(200..240), 100, rng.random_range(150..255));
                ship.active = true;
            }
            self.ship_timer_ms = now;
        }

        for ship in self.ships.active_mut() {
            ship.x += ship.vx;
            ship.y += ship.vy;
            if elapsed_ms(now, ship.last_frame_ms) > SPACE_SHIP_FRAME_MS {
                ship.frame = (ship.frame + 1) % 4;
                ship.last_frame_ms = now;
            }
            if ship.x < -OFFSCREEN_MARGIN
                || ship.x > WIDTH + OFFSCREEN_MARGIN
                || ship.y < -SHIP_MARGIN_Y
                || ship.y > HEIGHT + SHIP_MARGIN_Y
            {
                ship.active = false;
            }
        }
    }

    fn update_nebula(
        &mut self,
        now: u32,
    ) {
        if elapsed_ms(now, self.nebula_timer_ms) > SPACE_NEBULA_STEP_MS {
            self.nebula_phase = ((u16::from(self.nebula_phase) + 1) % 255) as u8;
            self.nebula_timer_ms = now;
        }
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Clear, paint every layer and flush. Does nothing while paused.
    pub fn render<S: PixelSurface, R: RngCore>(
        &self,
        frame: &mut Frame<'_, S, R>,
    ) {
        if self.paused {
            return;
        }
        let surface = &mut *frame.surface;
        surface.clear();
        self.render_nebula(surface);
        self.render_stars(surface);
        self.render_planets(surface);
        self.render_comets(surface);
        self.render_ships(surface);
        frame.flush();
    }

    fn render_nebula<S: PixelSurface>(
        &self,
        surface: &mut S,
    ) {
        let phase = f32::from(self.nebula_phase);
        let hue = 160 + self.nebula_phase % 60;
        for x in (0..DISPLAY_WIDTH_I32).step_by(4) {
            let wave_x = F32((x as f32 + phase) * 0.1).sin().0;
            for y in (0..DISPLAY_HEIGHT_I32).step_by(2) {
                let wave_y = F32((y as f32 + phase) * 0.15).cos().0;
                let intensity = (F32(wave_x * wave_y).abs().0 * 30.0) as u8;
                if intensity > NEBULA_THRESHOLD {
                    surface.set_pixel(x, y, scale(hsv(hue, 200, intensity), intensity));
                }
            }
        }
    }

    fn render_stars<S: PixelSurface>(
        &self,
        surface: &mut S,
    ) {
        for star in self.stars.active() {
            draw_pixel(surface, star.x, star.y, star.color, star.brightness);
        }
    }

    fn render_planets<S: PixelSurface>(
        &self,
        surface: &mut S,
    ) {
        for planet in self.planets.active() {
            let radius = f32::from(planet.size) / 2.0;
            for dx in 0..planet.size {
                for dy in 0..planet.size {
                    let (fx, fy) = (f32::from(dx), f32::from(dy));
                    let distance = F32(fx * fx + fy * fy).sqrt().0;
                    if distance >= radius {
                        continue;
                    }
                    let shimmer = 0.7 + 0.3 * F32(planet.phase + fx * 0.5).sin().0;
                    let brightness = (255.0 * (1.0 - distance / radius) * shimmer) as u8;
                    draw_pixel(surface, planet.x + fx, planet.y + fy, planet.color, brightness);
                }
            }
        }
    }

    fn render_comets<S: PixelSurface>(
        &self,
        surface: &mut S,
    ) {
        for comet in self.comets.active() {
            draw_pixel(surface, comet.x, comet.y, comet.color, 255);

            let trail = u16::from(comet.trail);
            for i in 1..=trail {
                let back = f32::from(i) * TAIL_SPACING;
                let tx = comet.x - comet.vx * back;
                let ty = comet.y - comet.vy * back;
                if (0.0..WIDTH).contains(&tx) && (0.0..HEIGHT).contains(&ty) {
                    let brightness = (255 * (trail - i) / trail) as u8;
                    draw_pixel(surface, tx, ty, comet.color, brightness);
                }
            }
        }
    }

    fn render_ships<S: PixelSurface>(
        &self,
        surface: &mut S,
    ) {
        for ship in self.ships.active() {
            let x = ship.x as i32;
            let y = ship.y as i32;
            surface.set_pixel(x, y, scale(ship.color, 255));
            surface.set_pixel(x + 1, y, scale(ship.color, 200));

            let (engine, glow) = match ship.frame % 4 {
                0 => (RED, 100),
                1 => (RED, 200),
                2 => (ORANGE, 255),
                _ => (RED, 150),
            };
            // Engine trails behind the direction of travel
            let engine_x = if ship.vx < 0.0 { x + 2 } else { x - 1 };
            surface.set_pixel(engine_x, y, scale(engine, glow));
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;
    use crate::transitions::test_support::Rig;

    fn step(
        space: &mut SpaceAnimation,
        rig: &mut Rig,
        ms: u32,
    ) -> bool {
        rig.advance(ms);
        let mut frame = rig.frame();
        let stepped = space.update(&mut frame);
        space.render(&mut frame);
        stepped
    }

    #[test]
    fn test_first_update_seeds_all_stars() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        assert!(step(&mut space, &mut rig, 20));
        assert_eq!(space.stars().active_count(), SPACE_STAR_COUNT);
        for star in space.stars().active() {
            assert!((0.0..=WIDTH).contains(&star.x));
            assert!((0.0..HEIGHT).contains(&star.y));
            assert!(star.brightness >= 50);
        }
    }

    #[test]
    fn test_update_rate_limited() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        assert!(!step(&mut space, &mut rig, SPACE_UPDATE_INTERVAL_MS - 1));
        assert!(step(&mut space, &mut rig, 1));
        assert!(!step(&mut space, &mut rig, 5));
    }

    #[test]
    fn test_paused_neither_updates_nor_renders() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        step(&mut space, &mut rig, 20);
        let flushes = rig.fb.flush_count();

        space.pause();
        assert!(space.is_paused());
        assert!(!step(&mut space, &mut rig, 100));
        assert_eq!(rig.fb.flush_count(), flushes);

        space.resume();
        assert!(step(&mut space, &mut rig, 100));
        assert_eq!(rig.fb.flush_count(), flushes + 1);
    }

    #[test]
    fn test_star_wraps_to_right_edge_same_tick() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        step(&mut space, &mut rig, 20);

        for star in space.stars.slots_mut() {
            star.x = 0.05;
            star.speed = 1.0;
        }
        step(&mut space, &mut rig, 20);
        for star in space.stars().active() {
            assert_eq!(star.x, WIDTH);
            assert!((SPACE_STAR_SPEED_MIN..SPACE_STAR_SPEED_MAX).contains(&star.speed));
        }
        // Fresh vertical placement: not every star lands on the same row
        let first_y = space.stars().active().next().map(|s| s.y as i32);
        assert!(space.stars().active().any(|s| Some(s.y as i32) != first_y));
    }

    #[test]
    fn test_comet_spawns_after_interval_and_pool_caps() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        space.set_comet_count(1);

        step(&mut space, &mut rig, SPACE_COMET_SPAWN_INTERVAL_MS);
        assert_eq!(space.comets().active_count(), 0);
        step(&mut space, &mut rig, 20);
        assert_eq!(space.comets().active_count(), 1);

        // A full pool drops the next spawn
        let before = *space.comets().active().next().unwrap();
        step(&mut space, &mut rig, SPACE_COMET_SPAWN_INTERVAL_MS + 1);
        assert!(space.comets().active_count() <= 1);
        if let Some(comet) = space.comets().active().next() {
            assert!(comet.x < before.x);
        }
    }

    #[test]
    fn test_comet_leaves_viewport() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        step(&mut space, &mut rig, SPACE_COMET_SPAWN_INTERVAL_MS + 1);
        assert_eq!(space.comets().active_count(), 1);
        // Slowest comet crosses 175 px in under 120 updates
        for _ in 0..130 {
            step(&mut space, &mut rig, 20);
        }
        assert_eq!(space.comets().active_count(), 0);
    }

    #[test]
    fn test_pools_never_exceed_limits() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        space.set_star_count(10);
        space.set_planet_count(1);
        for _ in 0..3000 {
            step(&mut space, &mut rig, 20);
            assert!(space.stars().active_count() <= 10);
            assert!(space.comets().active_count() <= SPACE_COMET_COUNT);
            assert!(space.planets().active_count() <= 1);
            assert!(space.spaceships().active_count() <= SPACE_SPACESHIP_COUNT);
        }
    }

    #[test]
    fn test_nebula_phase_steps() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        step(&mut space, &mut rig, SPACE_NEBULA_STEP_MS);
        assert_eq!(space.nebula_phase(), 0);
        step(&mut space, &mut rig, 20);
        assert_eq!(space.nebula_phase(), 1);
    }

    #[test]
    fn test_ship_engine_trails_motion() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        space.set_star_count(0);
        if let Some(ship) = space.ships.spawn() {
            *ship = Spaceship {
                x: 50.0,
                y: 3.0,
                vx: -2.0,
                vy: 0.0,
                frame: 2,
                last_frame_ms: rig.now,
                color: hsv(220, 100, 200),
                active: true,
            };
        }

        let mut frame = rig.frame();
        space.render(&mut frame);
        assert_ne!(rig.fb.pixel(50, 3), Some(BLACK));
        assert_ne!(rig.fb.pixel(51, 3), Some(BLACK));
        assert_eq!(rig.fb.pixel(52, 3), Some(scale(ORANGE, 255)));
        assert_eq!(rig.fb.pixel(49, 3), Some(BLACK));
    }

    fn render_only(
        space: &SpaceAnimation,
        rig: &mut Rig,
    ) {
        let mut frame = rig.frame();
        space.render(&mut frame);
    }

    #[test]
    fn test_nebula_lights_grid_points_above_threshold() {
        let mut rig = Rig::new();
        let space = SpaceAnimation::new(rig.now);
        render_only(&space, &mut rig);

        let mut lit = 0;
        for x in 0..DISPLAY_WIDTH_I32 {
            for y in 0..DISPLAY_HEIGHT_I32 {
                let on_grid = x % 4 == 0 && y % 2 == 0;
                let intensity = (F32(F32(x as f32 * 0.1).sin().0 * F32(y as f32 * 0.15).cos().0).abs().0 * 30.0) as u8;
                let expected = on_grid && intensity > NEBULA_THRESHOLD;
                assert_eq!(rig.fb.pixel(x, y) != Some(BLACK), expected, "({x}, {y})");
                lit += usize::from(expected);
            }
        }
        assert!(lit > 0);
        // sin(0) column stays dark
        assert!((0..DISPLAY_HEIGHT_I32).all(|y| rig.fb.pixel(0, y) == Some(BLACK)));
    }

    #[test]
    fn test_layers_paint_back_to_front() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        render_only(&space, &mut rig);
        let (x, y) = (0..DISPLAY_WIDTH_I32)
            .flat_map(|x| (0..DISPLAY_HEIGHT_I32).map(move |y| (x, y)))
            .find(|&(x, y)| rig.fb.pixel(x, y) != Some(BLACK))
            .unwrap();
        let nebula = rig.fb.pixel(x, y);
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

        let star_color = hsv(0, 0, 255);
        if let Some(star) = space.stars.spawn() {
            *star = Star {
                x: px,
                y: py,
                speed: 1.0,
                brightness: 255,
                color: star_color,
                active: true,
            };
        }
        render_only(&space, &mut rig);
        let star = rig.fb.pixel(x, y);
        assert_ne!(star, nebula);
        assert_eq!(star, Some(scale(star_color, 255)));

        if let Some(planet) = space.planets.spawn() {
            *planet = Planet {
                x: px,
                y: py,
                speed: 0.5,
                size: 2,
                color: hsv(0, 255, 200),
                phase: 0.0,
                active: true,
            };
        }
        render_only(&space, &mut rig);
        let planet = rig.fb.pixel(x, y);
        assert_ne!(planet, star);
        assert_ne!(planet, Some(BLACK));

        let comet_color = hsv(170, 150, 255);
        if let Some(comet) = space.comets.spawn() {
            *comet = Comet {
                x: px,
                y: py,
                vx: -10.0,
                vy: 0.0,
                trail: 3,
                color: comet_color,
                active: true,
            };
        }
        render_only(&space, &mut rig);
        assert_eq!(rig.fb.pixel(x, y), Some(scale(comet_color, 255)));

        let ship_color = hsv(220, 100, 200);
        if let Some(ship) = space.ships.spawn() {
            *ship = Spaceship {
                x: px,
                y: py,
                vx: -2.0,
                vy: 0.0,
                frame: 0,
                last_frame_ms: rig.now,
                color: ship_color,
                active: true,
            };
        }
        render_only(&space, &mut rig);
        assert_eq!(rig.fb.pixel(x, y), Some(scale(ship_color, 255)));
    }

    #[test]
    fn test_comet_tail_fades_behind_head() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        let color = hsv(170, 150, 255);
        if let Some(comet) = space.comets.spawn() {
            *comet = Comet {
                x: 50.0,
                y: 3.0,
                vx: -10.0,
                vy: 0.0,
                trail: 4,
                color,
                active: true,
            };
        }
        render_only(&space, &mut rig);

        // Row 3 has no nebula points; tail samples land every 3 px to the right
        assert_eq!(rig.fb.pixel(50, 3), Some(scale(color, 255)));
        assert_eq!(rig.fb.pixel(53, 3), Some(scale(color, 191)));
        assert_eq!(rig.fb.pixel(56, 3), Some(scale(color, 127)));
        assert_eq!(rig.fb.pixel(59, 3), Some(scale(color, 63)));
        assert_eq!(rig.fb.pixel(62, 3), Some(BLACK));
        assert_eq!(rig.fb.pixel(49, 3), Some(BLACK));
    }

    #[test]
    fn test_planet_dropped_once_fully_off_left_edge() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        for x in [-1.5, 0.5] {
            if let Some(planet) = space.planets.spawn() {
                *planet = Planet {
                    x,
                    y: 2.0,
                    speed: 1.0,
                    size: 2,
                    color: hsv(30, 200, 150),
                    phase: 0.0,
                    active: true,
                };
            }
        }
        step(&mut space, &mut rig, 20);

        // -2.5 is past the planet's width, -0.5 still overlaps column 0
        assert_eq!(space.planets().active_count(), 1);
        let survivor = space.planets().active().next().unwrap();
        assert_eq!(survivor.x, -0.5);
        assert!((survivor.phase - PLANET_SPIN).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ships_spawn_from_both_edges_heading_inward() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        let (mut from_left, mut from_right) = (0, 0);
        for _ in 0..40 {
            step(&mut space, &mut rig, SPACE_SPACESHIP_SPAWN_INTERVAL_MS + 1);
            let ship = *space.spaceships().active().next().unwrap();
            // One update has already moved it
            if ship.vx > 0.0 {
                assert!((2.0..4.0).contains(&ship.vx));
                assert!(ship.x < 0.0);
                from_left += 1;
            } else {
                assert!((-4.0..-2.0).contains(&ship.vx));
                assert!(ship.x > WIDTH);
                from_right += 1;
            }
            assert!((1.0..HEIGHT - 2.0).contains(&ship.y));
            space.ships.clear();
        }
        assert!(from_left > 0);
        assert!(from_right > 0);
    }

    #[test]
    fn test_reset_clears_particles() {
        let mut rig = Rig::new();
        let mut space = SpaceAnimation::new(rig.now);
        step(&mut space, &mut rig, SPACE_COMET_SPAWN_INTERVAL_MS + 1);
        space.reset(rig.now);
        assert_eq!(space.stars().active_count(), 0);
        assert_eq!(space.comets().active_count(), 0);
        assert_eq!(space.nebula_phase(), 0);
    }

    #[test]
    fn test_star_speed_range_bounds_any_order() {
        let mut space = SpaceAnimation::new(0);
        space.set_star_speed_range(3.0, 1.0);
        assert_eq!(space.star_speed_min, 1.0);
        assert_eq!(space.star_speed_max, 3.0);
    }
}
