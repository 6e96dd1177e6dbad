use std::{cell::Cell, fmt};

use crate::{
    engine::{
        config::EngineConfig,
        host::Host,
        input::{InputEvent, RawInput},
        resource::{LoadPoll, ResourceDatabase, ResourceLoader},
        signal::{Signal, SignalHub, SubscriptionId},
        state::EngineState,
    },
    foundation::{
        error::{MarqueeError, MarqueeResult},
        ids::NodeId,
    },
    render::surface::{Surface, SurfaceGuard},
    scene::{
        event::{CaptureContext, Cursor, Event, MouseEvent, MouseEventKind, NoticeEvent},
        stage::Stage,
    },
};

thread_local! {
    static ENGINE_LIVE: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as owning a live engine until dropped.
#[derive(Debug)]
struct EngineGuard;

impl EngineGuard {
    fn acquire() -> MarqueeResult<Self> {
        ENGINE_LIVE.with(|live| {
            if live.replace(true) {
                Err(MarqueeError::config(
                    "an engine is already live on this thread; shut it down first",
                ))
            } else {
                Ok(Self)
            }
        })
    }
}

impl Drop for EngineGuard {
    fn drop(&mut self) {
        ENGINE_LIVE.with(|live| live.set(false));
    }
}

/// Owner of the stage, resources, and the frame loop.
///
/// At most one engine is live per thread; the slot is released by
/// [`Engine::shutdown`] or by dropping the engine. The host drives the engine
/// by calling [`Engine::on_frame`] for every frame it was asked for,
/// [`Engine::handle_input`] for device input, and [`Engine::pump_loading`]
/// while resources load.
pub struct Engine<S: Surface, H: Host> {
    config: EngineConfig,
    state: EngineState,
    stage: Stage,
    resources: ResourceDatabase,
    signals: SignalHub,
    surface: S,
    host: H,
    loader: Option<Box<dyn ResourceLoader>>,
    last_tick: Option<f64>,
    ticks: u64,
    hover: Option<NodeId>,
    cursor: Cursor,
    mouse_capture: Option<CaptureContext>,
    touch_capture: Option<CaptureContext>,
    guard: Option<EngineGuard>,
}

impl<S: Surface, H: Host> Engine<S, H> {
    /// Create an idle engine. Fails if `config` is invalid or another engine
    /// is live on this thread.
    pub fn new(config: EngineConfig, surface: S, host: H) -> MarqueeResult<Self> {
        config.validate()?;
        let guard = EngineGuard::acquire()?;
        tracing::debug!(frame_rate = config.frame_rate, "engine created");
        Ok(Self {
            config,
            state: EngineState::Uninitialized,
            stage: Stage::new(),
            resources: ResourceDatabase::new(),
            signals: SignalHub::new(),
            surface,
            host,
            loader: None,
            last_tick: None,
            ticks: 0,
            hover: None,
            cursor: Cursor::Default,
            mouse_capture: None,
            touch_capture: None,
            guard: Some(guard),
        })
    }

    /// Create an engine and immediately begin loading with `loader`.
    pub fn start(
        config: EngineConfig,
        surface: S,
        host: H,
        loader: impl ResourceLoader + 'static,
    ) -> MarqueeResult<Self> {
        let mut engine = Self::new(config, surface, host)?;
        engine.load(loader)?;
        Ok(engine)
    }

    /// Begin (or retry) a load sequence.
    pub fn load(&mut self, loader: impl ResourceLoader + 'static) -> MarqueeResult<()> {
        self.state.transition(EngineState::Loading)?;
        self.loader = Some(Box::new(loader));
        Ok(())
    }

    /// Poll the active loader once and emit `loading`, `ready`, or `fault`.
    ///
    /// A failed attempt leaves the engine in `Loading` with no loader; call
    /// [`Engine::load`] again to retry.
    pub fn pump_loading(&mut self) -> MarqueeResult<EngineState> {
        if self.state != EngineState::Loading {
            return Ok(self.state);
        }
        let Some(loader) = self.loader.as_mut() else {
            return Ok(self.state);
        };

        match loader.poll(&mut self.resources) {
            LoadPoll::Pending { progress } => {
                let progress = progress.clamp(0.0, 1.0);
                tracing::trace!(progress, "loading");
                self.emit(&mut Signal::Loading { progress });
            }
            LoadPoll::Done => {
                self.loader = None;
                self.emit(&mut Signal::Loading { progress: 1.0 });
                self.state.transition(EngineState::Ready)?;
                tracing::debug!(resources = self.resources.len(), "engine ready");
                self.emit(&mut Signal::Ready);
            }
            LoadPoll::Failed(reason) => {
                self.loader = None;
                tracing::warn!(%reason, "resource load failed");
                self.emit(&mut Signal::Fault { reason: &reason });
            }
        }
        Ok(self.state)
    }

    /// Pump until the loader finishes or fails.
    pub fn finish_loading(&mut self) -> MarqueeResult<EngineState> {
        while self.state == EngineState::Loading && self.loader.is_some() {
            self.pump_loading()?;
        }
        Ok(self.state)
    }

    /// Start the frame loop.
    pub fn run(&mut self) -> MarqueeResult<()> {
        self.state.transition(EngineState::Running)?;
        self.host.request_frame();
        Ok(())
    }

    pub fn pause(&mut self) -> MarqueeResult<()> {
        self.state.transition(EngineState::Paused)
    }

    pub fn resume(&mut self) -> MarqueeResult<()> {
        if self.state != EngineState::Paused {
            return Err(MarqueeError::config(format!(
                "resume requires a paused engine, state is {:?}",
                self.state
            )));
        }
        self.run()
    }

    /// Host frame callback. Re-requests a frame and ticks only when more than
    /// one frame interval has passed since the last tick. Missed ticks are not
    /// replayed. Returns whether a tick ran.
    pub fn on_frame(&mut self, timestamp: f64) -> MarqueeResult<bool> {
        if !self.state.is_active() {
            return Ok(false);
        }
        self.host.request_frame();
        let due = match self.last_tick {
            None => true,
            Some(last) => timestamp - last > self.config.frame_interval_ms(),
        };
        if !due {
            return Ok(false);
        }
        self.tick(timestamp)?;
        Ok(true)
    }

    /// One update and render pass at `timestamp`, regardless of throttling.
    #[tracing::instrument(skip(self))]
    pub fn tick(&mut self, timestamp: f64) -> MarqueeResult<()> {
        if !matches!(
            self.state,
            EngineState::Ready | EngineState::Running | EngineState::Paused
        ) {
            return Err(MarqueeError::config(format!(
                "cannot tick in state {:?}",
                self.state
            )));
        }
        self.last_tick = Some(timestamp);
        self.ticks += 1;

        self.stage.update(timestamp);
        self.emit(&mut Signal::Update { timestamp });

        {
            let mut surface = SurfaceGuard::new(&mut self.surface);
            self.stage.render(&mut *surface)?;
        }
        self.signals.emit(
            &mut self.stage,
            &mut Signal::Render {
                surface: &mut self.surface,
            },
        );
        Ok(())
    }

    /// Translate and dispatch one device event.
    pub fn handle_input(&mut self, raw: &RawInput) -> MarqueeResult<()> {
        if self.state == EngineState::ShutDown {
            return Err(MarqueeError::config("engine is shut down"));
        }
        match raw.normalize(&self.config) {
            InputEvent::Mouse(ev) => self.handle_mouse(ev),
            InputEvent::Touch(mut ev) => {
                ev.attach_capture(self.touch_capture.take());
                self.stage.dispatch_touch(&mut ev);
                self.emit(&mut Signal::Touch(&ev));
                self.touch_capture = ev.take_capture();
            }
            InputEvent::Keyboard(mut ev) => {
                self.stage.dispatch_keyboard(&mut ev);
                self.emit(&mut Signal::Keyboard(&ev));
            }
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mut ev: MouseEvent) {
        ev.attach_capture(self.mouse_capture.clone());
        self.stage.dispatch_mouse(&mut ev);

        if ev.kind() == MouseEventKind::Move {
            let target = ev.target().cloned();
            if target != self.hover {
                if let Some(old) = self.hover.take() {
                    self.deliver_synthetic(MouseEventKind::Leave, &old, &ev);
                }
                if let Some(new) = &target {
                    self.deliver_synthetic(MouseEventKind::Enter, new, &ev);
                }
                tracing::trace!(hover = ?target, "hover changed");
                self.hover = target;
            }
        }

        if *ev.cursor() != self.cursor {
            self.cursor = ev.cursor().clone();
            self.host.set_cursor(&self.cursor);
        }
        self.emit(&mut Signal::Mouse(&ev));
        self.mouse_capture = ev.take_capture();
    }

    fn deliver_synthetic(&mut self, kind: MouseEventKind, target: &NodeId, primary: &MouseEvent) {
        let mut ev = MouseEvent::new(kind, primary.position()).with_button(primary.button());
        ev.attach_capture(self.mouse_capture.clone());
        if !self.stage.deliver_mouse(target, &mut ev) {
            tracing::trace!(%target, ?kind, "synthetic target no longer in stage");
        }
        self.emit(&mut Signal::Mouse(&ev));
    }

    /// Send a named notice: optionally walk the whole tree, then run direct
    /// subscribers of `name`. Returns how many subscribers ran.
    pub fn notify(
        &mut self,
        source: Option<NodeId>,
        name: &str,
        broadcast: bool,
        payload: serde_json::Value,
    ) -> usize {
        let mut notice = NoticeEvent::new(name, payload)
            .with_source(source)
            .with_broadcast(broadcast);
        if broadcast {
            self.stage.dispatch_notice(&mut notice);
        }
        self.signals.emit(
            &mut self.stage,
            &mut Signal::Notice {
                name: notice.name(),
                source: notice.header().source(),
                payload: notice.payload(),
            },
        )
    }

    /// Stop for good, emit `shutdown`, and free the per-thread engine slot.
    pub fn shutdown(&mut self) -> MarqueeResult<()> {
        self.state.transition(EngineState::ShutDown)?;
        self.loader = None;
        self.emit(&mut Signal::Shutdown);
        self.guard = None;
        tracing::debug!(ticks = self.ticks, "engine shut down");
        Ok(())
    }

    pub fn on(
        &mut self,
        name: impl Into<String>,
        subscriber: impl FnMut(&mut Stage, &mut Signal<'_>) + 'static,
    ) -> SubscriptionId {
        self.signals.on(name, subscriber)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.signals.off(id)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether this engine still holds the per-thread slot.
    pub fn is_live(&self) -> bool {
        self.guard.is_some()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// Swap in a new scene; returns the old one.
    pub fn replace_stage(&mut self, stage: Stage) -> Stage {
        self.hover = None;
        self.mouse_capture = None;
        self.touch_capture = None;
        std::mem::replace(&mut self.stage, stage)
    }

    pub fn resources(&self) -> &ResourceDatabase {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceDatabase {
        &mut self.resources
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Node currently under the pointer, as of the last mouse move.
    pub fn hovered(&self) -> Option<&NodeId> {
        self.hover.as_ref()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    fn emit(&mut self, signal: &mut Signal<'_>) -> usize {
        self.signals.emit(&mut self.stage, signal)
    }
}

impl<S: Surface, H: Host> fmt::Debug for Engine<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("ticks", &self.ticks)
            .field("hover", &self.hover)
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runtime.rs"]
mod tests;
