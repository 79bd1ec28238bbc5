// web.rs - Canvas surface provider for wasm32
//
// Binds a RippleWorld to an HTML canvas: the image is drawn once and
// snapshotted as the source texture, mousemove events become drops, and a
// lazily-created interval ticks the world while it has energy. The interval
// id doubles as the Running/Idle flag (0 = idle).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, ImageData, MouseEvent, Window,
};

use crate::config::RippleConfig;
use crate::error::RippleError;
use crate::sim::RippleWorld;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Attach the ripple effect to the canvas with id `canvas_id`, rippling
/// `image_path`. `options` may override any of dropRadius, dropDepth,
/// frameIntervalMs, dampingShift; unrecognized keys are ignored.
#[wasm_bindgen]
pub fn attach(canvas_id: String, image_path: String, options: JsValue) {
    spawn_local(async move {
        if let Err(e) = init(&canvas_id, &image_path, &options).await {
            log::error!("ripple init failed: {}", e);
        }
    });
}

fn js_err(value: JsValue) -> RippleError {
    RippleError::Surface(format!("{:?}", value))
}

fn surface_err(message: &str) -> RippleError {
    RippleError::Surface(message.to_string())
}

fn parse_options(options: &JsValue) -> RippleConfig {
    let mut config = RippleConfig::default();
    if options.is_undefined() || options.is_null() {
        return config;
    }
    for key in ["dropRadius", "dropDepth", "frameIntervalMs", "dampingShift"] {
        if let Ok(value) = Reflect::get(options, &JsValue::from_str(key)) {
            if let Some(number) = value.as_f64() {
                config.set(key, number);
            }
        }
    }
    config
}

/// Resolve once the image has loaded, the single async suspension point
async fn load_image(path: &str) -> Result<HtmlImageElement, RippleError> {
    let image = HtmlImageElement::new().map_err(js_err)?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(path);
    JsFuture::from(loaded).await.map_err(|_| RippleError::Load {
        path: path.to_string(),
    })?;
    Ok(image)
}

fn present(ctx: &CanvasRenderingContext2d, world: &RippleWorld) -> Result<(), RippleError> {
    let data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(world.pixels()),
        world.width(),
        world.height(),
    )
    .map_err(js_err)?;
    ctx.put_image_data(&data, 0.0, 0.0).map_err(js_err)
}

async fn init(canvas_id: &str, image_path: &str, options: &JsValue) -> Result<(), RippleError> {
    let config = parse_options(options);

    let window: Window = web_sys::window().ok_or_else(|| surface_err("no window"))?;
    let document = window.document().ok_or_else(|| surface_err("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| surface_err(&format!("missing #{}", canvas_id)))?
        .dyn_into()
        .map_err(|_| surface_err(&format!("#{} is not a canvas", canvas_id)))?;

    let image = load_image(image_path).await?;
    let (width, height) = (image.width(), image.height());

    // Size the surface to the image and take the texture snapshot
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| surface_err("no 2d context"))?
        .dyn_into()
        .map_err(|_| surface_err("no 2d context"))?;

    ctx.draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(js_err)?;
    let texture = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(js_err)?
        .data()
        .0;

    let frame_interval = config.frame_interval_ms as i32;
    let world = Rc::new(RefCell::new(RippleWorld::new(
        width, height, texture, config,
    )?));
    let interval = Rc::new(Cell::new(0i32));

    log::info!("ripple surface ready: {}x{}", width, height);

    // Tick: advance, present (also on the settling tick), then stop the timer
    let tick = {
        let world = world.clone();
        let interval = interval.clone();
        let ctx = ctx.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let mut world = world.borrow_mut();
            let found = world.tick();
            if let Err(e) = present(&ctx, &world) {
                log::error!("present failed: {}", e);
            }
            if !found {
                let id = interval.replace(0);
                if id != 0 {
                    window.clear_interval_with_handle(id);
                }
            }
        }) as Box<dyn FnMut()>)
    };
    let tick = Rc::new(tick);

    // Mousemove: inject a drop and arm the timer if idle
    let onmove = {
        let world = world.clone();
        let interval = interval.clone();
        let tick = tick.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            world.borrow_mut().add_drop(event.offset_x(), event.offset_y());
            if interval.get() == 0 {
                match window.set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().as_ref().unchecked_ref(),
                    frame_interval,
                ) {
                    Ok(id) => interval.set(id),
                    Err(e) => log::error!("failed to schedule ticks: {:?}", e),
                }
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    canvas
        .add_event_listener_with_callback("mousemove", onmove.as_ref().unchecked_ref())
        .map_err(js_err)?;

    // The handler (and the tick closure it holds) live as long as the canvas
    onmove.forget();
    Ok(())
}
