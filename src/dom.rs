use crate::input::{event_family, EventFamily};
use glam::DVec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Reads a numeric property; `None` when missing or not a number.
pub fn number(obj: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

pub fn field(obj: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

pub fn set(obj: &JsValue, key: &str, value: &JsValue) {
    _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), value);
}

pub fn read_xy(obj: &JsValue) -> Option<DVec2> {
    Some(DVec2::new(number(obj, "x")?, number(obj, "y")?))
}

pub fn xy_object(p: DVec2) -> JsValue {
    let obj: JsValue = js_sys::Object::new().into();
    set(&obj, "x", &p.x.into());
    set(&obj, "y", &p.y.into());
    obj
}

pub fn pair(a: f64, b: f64) -> JsValue {
    js_sys::Array::of2(&a.into(), &b.into()).into()
}

/// True when `event` was targeted at `root` or one of its descendants.
pub fn is_within(root: &web::Node, event: &web::Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web::Node>().ok())
        .map(|node| root.contains(Some(&node)))
        .unwrap_or(false)
}

macro_rules! copy_mouse_fields {
    ($init:expr, $src:expr) => {{
        let init = &$init;
        let src = $src;
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_client_x(src.client_x());
        init.set_client_y(src.client_y());
        init.set_screen_x(src.screen_x());
        init.set_screen_y(src.screen_y());
        init.set_button(src.button());
        init.set_buttons(src.buttons());
        init.set_shift_key(src.shift_key());
        init.set_ctrl_key(src.ctrl_key());
        init.set_meta_key(src.meta_key());
        init.set_alt_key(src.alt_key());
    }};
}

fn touch_array(list: &web::TouchList) -> JsValue {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .collect::<js_sys::Array>()
        .into()
}

/// Builds a fresh, dispatchable copy of a mouse, pointer, wheel or touch
/// event. Other event types have no map-side equivalent and yield `None`.
pub fn clone_event(event: &web::Event) -> Option<web::Event> {
    let kind = event.type_();
    let family = event_family(&kind);
    if !family.is_relayable() {
        return None;
    }
    let cloned = match family {
        EventFamily::Wheel => {
            let src = event.dyn_ref::<web::WheelEvent>()?;
            let init = web::WheelEventInit::new();
            copy_mouse_fields!(init, src);
            init.set_delta_x(src.delta_x());
            init.set_delta_y(src.delta_y());
            init.set_delta_z(src.delta_z());
            init.set_delta_mode(src.delta_mode());
            web::WheelEvent::new_with_event_init_dict(&kind, &init)
                .ok()?
                .unchecked_into()
        }
        EventFamily::Pointer => {
            let src = event.dyn_ref::<web::PointerEvent>()?;
            let init = web::PointerEventInit::new();
            copy_mouse_fields!(init, src);
            init.set_pointer_id(src.pointer_id());
            init.set_pointer_type(&src.pointer_type());
            init.set_is_primary(src.is_primary());
            init.set_pressure(src.pressure());
            web::PointerEvent::new_with_event_init_dict(&kind, &init)
                .ok()?
                .unchecked_into()
        }
        EventFamily::Mouse => {
            let src = event.dyn_ref::<web::MouseEvent>()?;
            let init = web::MouseEventInit::new();
            copy_mouse_fields!(init, src);
            web::MouseEvent::new_with_mouse_event_init_dict(&kind, &init)
                .ok()?
                .unchecked_into()
        }
        EventFamily::Touch => {
            let src = event.dyn_ref::<web::TouchEvent>()?;
            let init = web::TouchEventInit::new();
            init.set_bubbles(true);
            init.set_cancelable(true);
            init.set_touches(&touch_array(&src.touches()));
            init.set_target_touches(&touch_array(&src.target_touches()));
            init.set_changed_touches(&touch_array(&src.changed_touches()));
            init.set_shift_key(src.shift_key());
            init.set_ctrl_key(src.ctrl_key());
            init.set_meta_key(src.meta_key());
            init.set_alt_key(src.alt_key());
            web::TouchEvent::new_with_event_init_dict(&kind, &init)
                .ok()?
                .unchecked_into()
        }
        EventFamily::Other => return None,
    };
    Some(cloned)
}
