use crate::dom;
use crate::input::{self, PointerState};
use anyhow::anyhow;
use morph_core::ScrollSample;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Owns every registered listener closure so teardown can unregister them.
/// Dropping the set removes whatever is still attached.
#[derive(Default)]
pub struct ListenerSet {
    entries: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<E>(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        passive: bool,
        mut handler: impl FnMut(E) + 'static,
    ) -> anyhow::Result<()>
    where
        E: JsCast + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(|e| anyhow!("add {} listener: {:?}", kind, e))?;
        self.entries.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let n = self.entries.len();
        for l in self.entries.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
        log::info!("[events] removed {} listeners", n);
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Carousel input, queued by the listeners and drained by the frame tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Down(f32),
    Move(f32),
    Up,
    Wheel(f32),
}

/// State shared between the listeners and the frame loop.
#[derive(Clone)]
pub struct SharedInput {
    pub pointer: Rc<RefCell<PointerState>>,
    pub scroll: Rc<Cell<Option<ScrollSample>>>,
    pub gestures: Rc<RefCell<Vec<Gesture>>>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self {
            pointer: Rc::new(RefCell::new(PointerState::default())),
            scroll: Rc::new(Cell::new(None)),
            gestures: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    /// Reference section for scroll progress; `None` for the carousel.
    pub section: Option<web::Element>,
    pub shared: SharedInput,
    /// Route drag and wheel into the carousel instead of the page.
    pub capture_gestures: bool,
}

pub fn wire_input_handlers(w: InputWiring) -> anyhow::Result<ListenerSet> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let mut set = ListenerSet::new();

    // scroll
    if let Some(section) = w.section.clone() {
        let scroll = w.shared.scroll.clone();
        scroll.set(dom::scroll_sample(&section));
        set.add(&window, "scroll", true, move |_: web::Event| {
            scroll.set(dom::scroll_sample(&section));
        })?;
    }

    // resize
    {
        let canvas = w.canvas.clone();
        let section = w.section.clone();
        let scroll = w.shared.scroll.clone();
        set.add(&window, "resize", true, move |_: web::Event| {
            dom::sync_canvas_backing_size(&canvas);
            if let Some(section) = &section {
                scroll.set(dom::scroll_sample(section));
            }
        })?;
    }

    // pointermove
    {
        let canvas = w.canvas.clone();
        let pointer = w.shared.pointer.clone();
        let gestures = w.shared.gestures.clone();
        let capture = w.capture_gestures;
        set.add(&w.canvas, "pointermove", true, move |ev: web::PointerEvent| {
            let pos = input::pointer_canvas_px(&ev, &canvas);
            let mut p = pointer.borrow_mut();
            p.x = pos.x;
            p.y = pos.y;
            p.inside = true;
            if capture && p.down {
                gestures.borrow_mut().push(Gesture::Move(ev.client_y() as f32));
            }
        })?;
    }

    // pointerdown
    {
        let canvas = w.canvas.clone();
        let pointer = w.shared.pointer.clone();
        let gestures = w.shared.gestures.clone();
        let capture = w.capture_gestures;
        set.add(&w.canvas, "pointerdown", false, move |ev: web::PointerEvent| {
            pointer.borrow_mut().down = true;
            if capture {
                let _ = canvas.set_pointer_capture(ev.pointer_id());
                gestures.borrow_mut().push(Gesture::Down(ev.client_y() as f32));
                ev.prevent_default();
            }
        })?;
    }

    // pointerup / pointerleave both end a drag
    for kind in ["pointerup", "pointerleave"] {
        let pointer = w.shared.pointer.clone();
        let gestures = w.shared.gestures.clone();
        let capture = w.capture_gestures;
        set.add(&w.canvas, kind, true, move |_: web::PointerEvent| {
            let mut p = pointer.borrow_mut();
            p.down = false;
            if kind == "pointerleave" {
                p.inside = false;
            }
            if capture {
                gestures.borrow_mut().push(Gesture::Up);
            }
        })?;
    }

    // wheel (carousel only; it swallows the page scroll)
    if w.capture_gestures {
        let gestures = w.shared.gestures.clone();
        set.add(&w.canvas, "wheel", false, move |ev: web::WheelEvent| {
            ev.prevent_default();
            gestures.borrow_mut().push(Gesture::Wheel(ev.delta_y() as f32));
        })?;
    }

    log::info!("[events] wired {} listeners", set.len());
    Ok(set)
}
