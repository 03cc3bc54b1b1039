use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, Lifecycle};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction, DEPTH_FORMAT};
use crate::gfx::{FrameTarget, GpuResources};
use crate::input::platform::winit::{map_modifiers, translate_key_event};
use crate::input::Modifiers;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Color the frame is cleared to before `on_frame`.
    pub clear_color: wgpu::Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "billboard".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.15,
                a: 1.0,
            },
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until its window is closed or a callback fails.
    ///
    /// Release callbacks for every created stage have run by the time this
    /// returns. The first failure is returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.shutdown();
        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    // `resources` holds device clones only; it may outlive the window.
    resources: Option<GpuResources>,
    window: Option<WindowEntry>,

    lifecycle: Lifecycle,
    modifiers: Modifiers,
    failure: Option<anyhow::Error>,
    finished: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            resources: None,
            window: None,
            lifecycle: Lifecycle::new(),
            modifiers: Modifiers::default(),
            failure: None,
            finished: false,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntry::try_new(window, |w| {
            pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
        })?;

        let (resources, size) = entry.with_gpu(|gpu| {
            let resources = GpuResources::new(
                gpu.device().clone(),
                gpu.queue().clone(),
                gpu.surface_format(),
                DEPTH_FORMAT,
            );
            (resources, gpu.size())
        });

        let resources = self.resources.insert(resources);
        self.window = Some(entry);

        self.lifecycle.startup(&mut self.app, resources)?;
        self.notify_resize(size)?;

        if let Some(entry) = &self.window {
            entry.borrow_window().request_redraw();
        }
        Ok(())
    }

    /// Forwards non-empty drawable sizes to the application.
    fn notify_resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        log::debug!("resize to {}x{}", size.width, size.height);
        self.app.on_resize(size.width, size.height)
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        let Some(entry) = self.window.as_mut() else {
            return Ok(());
        };
        entry.with_gpu_mut(|gpu| gpu.resize(size));
        entry.borrow_window().request_redraw();
        self.notify_resize(size)
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(entry), Some(resources)) = (self.window.as_mut(), self.resources.as_mut()) else {
            return Ok(());
        };

        let size = entry.borrow_gpu().size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        let acquired = match entry.borrow_gpu().begin_frame() {
            Ok(frame) => Ok(Some(frame)),
            Err(err) => {
                log::warn!("failed to acquire frame: {err}");
                match entry.with_gpu_mut(|gpu| gpu.handle_surface_error(err)) {
                    SurfaceErrorAction::Fatal => Err(anyhow!("surface is out of memory")),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(None),
                }
            }
        };
        let Some(frame) = update_for_frame(&mut self.app, acquired)? else {
            return Ok(());
        };

        let gpu = entry.borrow_gpu();
        gpu.clear(&frame, self.config.clear_color);

        resources.begin_frame(FrameTarget {
            color: frame.view.clone(),
            depth: gpu.depth_view().clone(),
        });
        let result = self.app.on_frame(resources);
        resources.end_frame();

        entry.borrow_window().pre_present_notify();
        gpu.present(frame);

        result
    }

    /// Records `err`, releases what was created and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        self.shutdown();
        event_loop.exit();
    }

    /// Runs the release callbacks once and drops the window.
    fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        if let Some(resources) = self.resources.as_mut() {
            if let Err(e) = self.lifecycle.shutdown(&mut self.app, resources) {
                self.failure.get_or_insert(e);
            }
            resources.report_leaks();
        }

        self.resources = None;
        self.window = None;
    }
}

/// Advances `app` only when a frame was acquired; skipped frames leave its
/// state untouched.
fn update_for_frame<F, A: App + ?Sized>(app: &mut A, acquired: Result<Option<F>>) -> Result<Option<F>> {
    let Some(frame) = acquired? else {
        return Ok(None);
    };
    app.on_update()?;
    Ok(Some(frame))
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.finished {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.finished {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the camera may be auto-rotating.
        if let Some(entry) = &self.window {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.finished {
            event_loop.exit();
            return;
        }

        let result = match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
                Ok(())
            }

            WindowEvent::Resized(new_size) => self.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                match self.window.as_ref().map(|e| e.borrow_window().inner_size()) {
                    Some(size) => self.resize(size),
                    None => Ok(()),
                }
            }

            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = map_modifiers(m.state());
                Ok(())
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let ev = translate_key_event(&event, self.modifiers);
                self.app
                    .on_key_event(ev.key, ev.state.is_down(), ev.modifiers.alt)
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => Ok(()),
        };

        if let Err(e) = result {
            self.fail(event_loop, e);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
