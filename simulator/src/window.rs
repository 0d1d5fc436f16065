//! Interactive SDL window.
//!
//! | Key     | Action                          |
//! |---------|---------------------------------|
//! | `Space` | short press (next display mode) |
//! | `L`     | long press                      |
//! | `T`     | next transition                 |
//! | `S`     | toggle smooth transitions       |
//! | `A`     | toggle automatic transition cycling |
//! | `C`     | next color mode                 |
//! | `N`     | next story                      |
//! | `P`     | pause / resume space animation  |
//! | `R`     | reset the active mode           |

use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorEvent, Window};
use marquee_common::{DisplayController, Font5x7, Framebuffer};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::drain_log;
use crate::matrix;
use crate::timing::{FRAME_TIME, SystemClock};

pub fn run(ctrl: &mut DisplayController<'_>) {
    let mut display = matrix::new_display();
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Story Marquee Sim", &output_settings);

    let seed = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos() as u64);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut fb = Framebuffer::new();
    let font = Font5x7::new();
    let clock = SystemClock::new();

    matrix::draw_view(&mut display, &fb, ctrl);
    window.update(&display);

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Space => ctrl.handle_short_press(),
                        Keycode::L => ctrl.handle_long_press(),
                        Keycode::T => ctrl.cycle_through_transitions(),
                        Keycode::S => ctrl.set_smooth_transitions(!ctrl.smooth_transitions()),
                        Keycode::A => ctrl.set_auto_transition_cycling(!ctrl.auto_transition_cycling()),
                        Keycode::C => {
                            let next = ctrl.content().color_mode().next();
                            ctrl.content_mut().set_color_mode(next);
                        }
                        Keycode::N => {
                            let content = ctrl.content_mut();
                            content.select_story((content.current_story_index() + 1) % content.story_count());
                            ctrl.reset();
                        }
                        Keycode::P => {
                            let space = ctrl.space_animation_mut();
                            if space.is_paused() {
                                space.resume();
                            } else {
                                space.pause();
                            }
                        }
                        Keycode::R => ctrl.reset(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        ctrl.tick(&mut fb, &font, &mut rng, &clock);
        drain_log(ctrl.event_log_mut());

        matrix::draw_view(&mut display, &fb, ctrl);
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}
