#![cfg(target_arch = "wasm32")]
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

use anyhow::anyhow;
use constants::*;
use events::{InputWiring, ListenerSet, SharedInput};
use frame::{FrameContext, LoopHandle, SceneDriver};
use instant::Instant;
use morph_core::{CardStack, MomentumTuning, Preset, StackAnimator};
use render::{GpuState, LayerInit};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

thread_local! {
    static MOUNTED: RefCell<Vec<MorphHandle>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("morph-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Mount every `canvas[data-scene]` already in the document.
async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let nodes = document
        .query_selector_all(&format!("canvas[{}]", ATTR_SCENE))
        .map_err(|e| anyhow!(format!("{:?}", e)))?;
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let canvas: web::HtmlCanvasElement = match node.dyn_into() {
            Ok(c) => c,
            Err(_) => continue,
        };
        match mount_canvas(canvas).await {
            Ok(handle) => MOUNTED.with(|m| m.borrow_mut().push(handle)),
            // One broken canvas must not keep the others from mounting
            Err(e) => log::error!("[scene] mount failed: {:?}", e),
        }
    }
    Ok(())
}

/// Mount a scene on `canvas`, configured by its data attributes.
#[wasm_bindgen]
pub async fn mount(canvas: web::HtmlCanvasElement) -> Result<MorphHandle, JsValue> {
    mount_canvas(canvas)
        .await
        .map_err(|e| js_sys::Error::new(&format!("{:#}", e)).into())
}

/// Tear down every scene mounted at start-up.
#[wasm_bindgen]
pub fn destroy_all() {
    let handles = MOUNTED.with(|m| std::mem::take(&mut *m.borrow_mut()));
    for mut h in handles {
        h.destroy();
    }
}

struct Mounted {
    listeners: ListenerSet,
    frame_loop: LoopHandle,
}

/// A live scene. `destroy()` removes its listeners and stops its frame loop.
#[wasm_bindgen]
pub struct MorphHandle {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl MorphHandle {
    pub fn destroy(&mut self) {
        if let Some(mut m) = self.inner.take() {
            m.frame_loop.cancel();
            m.listeners.clear();
            log::info!("[scene] destroyed");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.inner.is_some()
    }
}

enum SceneKind {
    Scroll(Preset),
    Stack,
}

fn scene_kind(name: &str) -> anyhow::Result<SceneKind> {
    if name == "stack" {
        return Ok(SceneKind::Stack);
    }
    Preset::from_name(name)
        .map(SceneKind::Scroll)
        .ok_or_else(|| anyhow!("unknown {} '{}'", ATTR_SCENE, name))
}

fn parse_attr<T: std::str::FromStr>(
    el: &web::Element,
    name: &str,
) -> anyhow::Result<Option<T>> {
    dom::attr(el, name)
        .map(|v| v.parse::<T>().map_err(|_| anyhow!("bad {} value '{}'", name, v)))
        .transpose()
}

/// The section whose scroll drives progress: `data-section` by id, else the
/// canvas's enclosing `<section>`.
fn reference_section(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::Element> {
    if let Some(id) = dom::attr(canvas, ATTR_SECTION) {
        return document
            .get_element_by_id(&id)
            .ok_or_else(|| anyhow!("missing #{}", id));
    }
    canvas
        .closest("section")
        .ok()
        .flatten()
        .ok_or_else(|| anyhow!("canvas has no {} and no enclosing section", ATTR_SECTION))
}

async fn mount_canvas(canvas: web::HtmlCanvasElement) -> anyhow::Result<MorphHandle> {
    let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let scene_name = dom::attr(&canvas, ATTR_SCENE).unwrap_or_else(|| "sound".to_string());
    let kind = scene_kind(&scene_name)?;
    let points = parse_attr::<usize>(&canvas, ATTR_POINTS)?;
    let seed = parse_attr::<u64>(&canvas, ATTR_SEED)?.unwrap_or(DEFAULT_SEED);

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let shared = SharedInput::new();
    let (driver, section, gpu) = match kind {
        SceneKind::Scroll(preset) => {
            let section = reference_section(&document, &canvas)?;
            let scene = preset.build(points, seed)?;
            let state = scene.animator.state();
            let accent_positions = scene.accent.to_interleaved();
            let accent_alpha = vec![1.0; scene.accent.len()];
            let gpu = GpuState::new(
                &canvas,
                LayerInit {
                    positions: &state.positions,
                    alpha: &state.point_alpha,
                    color: POINT_COLOR,
                    point_size: POINT_SIZE,
                },
                Some(LayerInit {
                    positions: &accent_positions,
                    alpha: &accent_alpha,
                    color: ACCENT_COLOR,
                    point_size: ACCENT_POINT_SIZE,
                }),
            )
            .await?;
            (SceneDriver::Scroll(scene), Some(section), gpu)
        }
        SceneKind::Stack => {
            let stack = StackAnimator::new(CardStack::default(), MomentumTuning::default())?;
            let state = stack.state();
            let gpu = GpuState::new(
                &canvas,
                LayerInit {
                    positions: &state.positions,
                    alpha: &state.point_alpha,
                    color: POINT_COLOR,
                    point_size: CARD_POINT_SIZE,
                },
                None,
            )
            .await?;
            (SceneDriver::Stack(stack), None, gpu)
        }
    };
    let capture_gestures = matches!(driver, SceneDriver::Stack(_));

    let listeners = events::wire_input_handlers(InputWiring {
        canvas: canvas.clone(),
        section,
        shared: shared.clone(),
        capture_gestures,
    })?;

    let now = Instant::now();
    let ctx = Rc::new(RefCell::new(FrameContext {
        driver,
        canvas,
        shared,
        gpu,
        started: now,
        last_instant: now,
        hovered_pin: None,
    }));
    let frame_loop = frame::start_loop(ctx);
    log::info!("[scene] mounted '{}'", scene_name);

    Ok(MorphHandle {
        inner: Some(Mounted {
            listeners,
            frame_loop,
        }),
    })
}
