use std::error::Error;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use log::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raywalls::config::WindowSection;
use raywalls::renderer::render_frame;
use raywalls::{Config, Move, Session, Viewport};

#[derive(Debug, Parser)]
#[command(name = "raywalls", about = "Ray casted 3D walls with a minimap")]
struct Args {
    /// TOML config; the built-in room is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    settings: WindowSection,
    session: Session,

    last_cursor_x: Option<f64>,
}

impl App {
    fn new(config: &Config, session: Session) -> Self {
        Self {
            window: None,
            surface: None,
            settings: config.window.clone(),
            session,
            last_cursor_x: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self, id: WindowId) -> Result<(), softbuffer::SoftBufferError> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        // size is read fresh every frame, the window may have been resized
        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // minimized
        };
        surface.resize(w, h)?;

        let frame = self.session.frame(Viewport::new(size.width, size.height));
        let mut buf = surface.buffer_mut()?;
        render_frame(
            &mut buf,
            size.width as usize,
            size.height as usize,
            &frame,
            self.session.background,
        );
        buf.present()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Rc::new(w),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        match surface {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => {
                error!("failed to create softbuffer surface: {e}");
                event_loop.exit();
                return;
            }
        }

        info!("window ready, {}x{}", self.settings.width, self.settings.height);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                // auto-repeat presses each move once, like holding a key
                let m = match code {
                    KeyCode::KeyW => Move::Forward,
                    KeyCode::KeyS => Move::Backward,
                    KeyCode::KeyA => Move::StrafeLeft,
                    KeyCode::KeyD => Move::StrafeRight,
                    KeyCode::Escape => {
                        event_loop.exit();
                        return;
                    }
                    _ => return,
                };
                if self.session.apply_move(m) {
                    self.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last_x) = self.last_cursor_x {
                    let delta = (position.x - last_x) as f32;
                    if delta != 0.0 {
                        self.session.rotate(delta);
                        self.request_redraw();
                    }
                }
                self.last_cursor_x = Some(position.x);
            }

            WindowEvent::CursorLeft { .. } => {
                self.last_cursor_x = None;
            }

            WindowEvent::Resized(_) => self.request_redraw(),

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    error!("redraw failed: {e}");
                    event_loop.exit();
                }
            }

            _ => (),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let session = Session::from_config(&config).inspect_err(|e| error!("refusing to start: {e}"))?;

    let event_loop = EventLoop::new()?;
    // redraw only on input, resize or expose
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(&config, session);
    event_loop.run_app(&mut app)?;
    Ok(())
}
