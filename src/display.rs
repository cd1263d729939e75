/*!
Host glue behind the `display` feature: a winit window presenting the
machine's framebuffer through a `pixels` surface.

The window's redraw callback is the frame cadence: each `RedrawRequested`
fires any due palette timers, advances the machine by the wall-clock delta,
copies the framebuffer to the surface, presents it, and requests the next
redraw. Palette timers keep their own `Instant` deadlines with the stock
periods, so they stay independent of the frame clock.
*/

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::error;
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::anim::PALETTE_TICK_PERIODS_MS;
use crate::assets;
use crate::cartridge::Cartridge;
use crate::machine::Machine;

/// Logical upscale of the machine surface in the window.
const WINDOW_SCALE: u32 = 4;

struct DisplayApp {
    machine: Machine,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    last_frame: Instant,
    palette_deadlines: [Instant; PALETTE_TICK_PERIODS_MS.len()],
}

impl DisplayApp {
    fn new(machine: Machine) -> Self {
        let now = Instant::now();
        DisplayApp {
            machine,
            window: None,
            pixels: None,
            last_frame: now,
            palette_deadlines: PALETTE_TICK_PERIODS_MS.map(|ms| now + Duration::from_millis(ms)),
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let width = self.machine.width() as u32;
        let height = self.machine.height() as u32;
        let attrs = Window::default_attributes()
            .with_title("RISK(TM) PICTURE MACHINE")
            .with_inner_size(LogicalSize::new(width * WINDOW_SCALE, height * WINDOW_SCALE))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| format!("failed to create window: {e}"))?,
        );
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(width, height, surface)
            .map_err(|e| format!("failed to create pixel surface: {e}"))?;
        self.last_frame = Instant::now();
        window.request_redraw();
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn fire_due_palette_ticks(&mut self, now: Instant) {
        for (slot, deadline) in self.palette_deadlines.iter_mut().enumerate() {
            let period = Duration::from_millis(PALETTE_TICK_PERIODS_MS[slot]);
            while now >= *deadline {
                self.machine.tick_palette(slot);
                *deadline += period;
            }
        }
    }

    fn redraw(&mut self) -> Result<(), String> {
        let now = Instant::now();
        self.fire_due_palette_ticks(now);
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.machine.advance_frame(dt);

        let pixels = self
            .pixels
            .as_mut()
            .ok_or_else(|| "redraw before surface creation".to_string())?;
        pixels.frame_mut().copy_from_slice(self.machine.framebuffer());
        pixels.render().map_err(|e| format!("present failed: {e}"))
    }
}

impl ApplicationHandler for DisplayApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            error!("{e}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        error!("failed to resize surface: {e}");
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(()) => {
                    if let Some(window) = self.window.as_ref() {
                        window.request_redraw();
                    }
                }
                Err(e) => {
                    error!("{e}");
                    event_loop.exit();
                }
            },
            _ => {}
        }
    }
}

/// Boot the stock demo cartridge and run it in a window until closed.
pub fn run() -> Result<(), String> {
    let cart = Cartridge::from_bytes(&assets::demo_image())?;
    run_machine(Machine::from_cartridge(&cart)?)
}

/// Present an already-built machine in a window until closed.
pub fn run_machine(machine: Machine) -> Result<(), String> {
    let event_loop =
        EventLoop::new().map_err(|e| format!("failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = DisplayApp::new(machine);
    event_loop
        .run_app(&mut app)
        .map_err(|e| format!("event loop error: {e}"))
}
