use crate::constants::MAX_FRAME_DT;
use crate::events::{Gesture, SharedInput};
use crate::input;
use crate::render::{GpuState, LayerDraw};
use instant::Instant;
use morph_core::{FrameInput, FrameState, ScrollScene, StackAnimator};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub enum SceneDriver {
    /// Scroll-progress animator with an accent layer.
    Scroll(ScrollScene),
    /// Drag/wheel carousel.
    Stack(StackAnimator),
}

pub struct FrameContext {
    pub driver: SceneDriver,
    pub canvas: web::HtmlCanvasElement,
    pub shared: SharedInput,
    pub gpu: GpuState,
    pub started: Instant,
    pub last_instant: Instant,
    pub hovered_pin: Option<usize>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;
        let elapsed = (now - self.started).as_secs_f32();

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());

        let result = match &mut self.driver {
            SceneDriver::Scroll(scene) => {
                let progress = self
                    .shared
                    .scroll
                    .get()
                    .and_then(|s| s.progress(scene.travel));
                let hovered = input::hovered_pin(
                    &self.shared.pointer.borrow(),
                    &self.canvas,
                    scene.animator.state(),
                    scene.lens,
                    scene.pins,
                    scene.disc_radius,
                );
                if hovered != self.hovered_pin {
                    if let Some(pin) = hovered.and_then(|i| scene.pins.get(i)) {
                        log::debug!("[input] hovering {}", pin.name);
                    }
                    self.hovered_pin = hovered;
                }
                scene.animator.frame(&FrameInput {
                    progress,
                    dt,
                    elapsed,
                    hovered: hovered.is_some(),
                });
                let state = scene.animator.state_mut();
                upload_if_dirty(&self.gpu, state);
                self.gpu.render(
                    state.camera,
                    scene.lens,
                    LayerDraw {
                        model: state.model_matrix(),
                        opacity: state.opacity,
                    },
                    Some(LayerDraw {
                        model: state.accent_matrix(),
                        opacity: state.accent_opacity,
                    }),
                )
            }
            SceneDriver::Stack(stack) => {
                for g in self.shared.gestures.borrow_mut().drain(..) {
                    let follower = stack.follower_mut();
                    match g {
                        Gesture::Down(y) => follower.pointer_down(y),
                        Gesture::Move(y) => follower.pointer_move(y),
                        Gesture::Up => follower.pointer_up(),
                        Gesture::Wheel(dy) => follower.wheel(dy),
                    }
                }
                stack.frame();
                let state = stack.state_mut();
                upload_if_dirty(&self.gpu, state);
                self.gpu.render(
                    state.camera,
                    StackAnimator::lens(),
                    LayerDraw {
                        model: state.model_matrix(),
                        opacity: state.opacity,
                    },
                    None,
                )
            }
        };
        if let Err(e) = result {
            log::error!("render error: {:?}", e);
        }
    }
}

fn upload_if_dirty(gpu: &GpuState, state: &mut FrameState) {
    if state.take_dirty() {
        gpu.upload_main(&state.positions, &state.point_alpha);
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &Tick) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

/// Running `requestAnimationFrame` loop; [`LoopHandle::cancel`] stops it.
pub struct LoopHandle {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        if self.stopped.replace(true) {
            return;
        }
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // Drops the closure and the context it captured
        self.tick.borrow_mut().take();
        log::info!("[frame] loop cancelled");
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let tick: Tick = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let stopped = Rc::new(Cell::new(false));

    let tick_clone = tick.clone();
    let pending_tick = pending.clone();
    let stopped_tick = stopped.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        if stopped_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        pending_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    pending.set(request_frame(&tick));

    LoopHandle {
        tick,
        pending,
        stopped,
    }
}
