use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, TouchEvent, TouchList};
use yew::prelude::*;

use crate::config::ZoomConfig;
use crate::model::{ClientRect, PanEvent, PinchEvent, TransformState, ViewSize, ZoomAction, ZoomModel};
use crate::state::{transform_style, GestureCoordinator, GestureSamples, TouchPoint, TouchState};
use crate::util::{clog, cwarn};

#[derive(Properties, PartialEq, Clone)]
pub struct PinchZoomProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub fullscreen: bool,
    #[prop_or_default]
    pub config: ZoomConfig,
}

/// Wraps its children and lets them be pinch-zoomed and panned.
///
/// Inline mode clips the content to its own box and catches touches on a
/// transparent overlay carrying the same transform. Fullscreen mode listens on
/// the transformed content directly and does not clip.
#[function_component(PinchZoom)]
pub fn pinch_zoom(props: &PinchZoomProps) -> Html {
    let gesture_ref = use_node_ref();
    let model = use_reducer({
        let config = props.config.clone();
        move || ZoomModel::new(config)
    });
    let touch_state = use_mut_ref(|| TouchState::new(&props.config));

    // Keep the reducer's coordinator in step with the config prop
    {
        let model = model.clone();
        use_effect_with(props.config.clone(), move |config| {
            if model.coordinator.config() != config {
                model.dispatch(ZoomAction::Configure(config.clone()));
            }
            || ()
        });
    }

    // Touch listeners on whichever element hosts the gestures in this mode
    {
        let gesture_ref = gesture_ref.clone();
        let model = model.clone();
        let touch_state = touch_state.clone();
        use_effect_with((props.fullscreen, props.config.clone()), move |deps| {
            let config = &deps.1;
            *touch_state.borrow_mut() = TouchState::new(config);
            let listeners = gesture_ref
                .cast::<HtmlElement>()
                .map(|element| GestureListeners::attach(element, model, touch_state, config.clone()));
            if listeners.is_none() {
                cwarn("pinch-zoom: gesture host element missing, touches will be ignored");
            }
            move || drop(listeners)
        });
    }

    zoom_layers(
        html! { <>{ for props.children.iter() }</> },
        &model.transform,
        props.fullscreen,
        gesture_ref,
    )
}

/// Marks the element that carries the touch listeners.
const GESTURE_HOST_CLASS: &str = "pinch-zoom-gestures";

/// Lay out `content` with `state` applied; `gesture_ref` lands on the gesture host.
fn zoom_layers(content: Html, state: &TransformState, fullscreen: bool, gesture_ref: NodeRef) -> Html {
    let style = transform_style(state);
    if fullscreen {
        html! {
            <div ref={gesture_ref} class={GESTURE_HOST_CLASS} style={format!("touch-action:none; {style}")}>
                { content }
            </div>
        }
    } else {
        html! {
            <div style="position:relative; display:inline-block;">
                <div style="overflow:hidden; border-radius:inherit;">
                    <div style={style.clone()}>{ content }</div>
                </div>
                <div
                    ref={gesture_ref}
                    class={GESTURE_HOST_CLASS}
                    style={format!("position:absolute; inset:0; background:transparent; touch-action:none; {style}")}
                ></div>
            </div>
        }
    }
}

type TouchClosure = Closure<dyn FnMut(TouchEvent)>;

const TOUCH_EVENTS: [&str; 3] = ["touchstart", "touchmove", "touchend"];

/// Registered touch listeners; removed from the element on drop.
struct GestureListeners {
    element: HtmlElement,
    on_touch: TouchClosure,
    on_cancel: TouchClosure,
}

impl GestureListeners {
    fn attach(
        element: HtmlElement,
        model: UseReducerHandle<ZoomModel>,
        touch_state: Rc<RefCell<TouchState>>,
        config: ZoomConfig,
    ) -> Self {
        let delegate = GestureCoordinator::new(config);
        let on_touch: TouchClosure = {
            let element = element.clone();
            let model = model.clone();
            let touch_state = touch_state.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                e.prevent_default();
                let touches = touch_points(&e.touches());
                let samples = touch_state.borrow_mut().touches_changed(&touches, &delegate);
                dispatch_samples(&element, &model, samples);
            }) as Box<dyn FnMut(_)>)
        };
        let on_cancel: TouchClosure = {
            let element = element.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                e.prevent_default();
                let samples = touch_state.borrow_mut().touches_cancelled();
                dispatch_samples(&element, &model, samples);
            }) as Box<dyn FnMut(_)>)
        };

        for event in TOUCH_EVENTS {
            if element
                .add_event_listener_with_callback(event, on_touch.as_ref().unchecked_ref())
                .is_err()
            {
                cwarn(&format!("pinch-zoom: failed to listen for {event}"));
            }
        }
        if element
            .add_event_listener_with_callback("touchcancel", on_cancel.as_ref().unchecked_ref())
            .is_err()
        {
            cwarn("pinch-zoom: failed to listen for touchcancel");
        }
        Self { element, on_touch, on_cancel }
    }
}

impl Drop for GestureListeners {
    fn drop(&mut self) {
        for event in TOUCH_EVENTS {
            let _ = self
                .element
                .remove_event_listener_with_callback(event, self.on_touch.as_ref().unchecked_ref());
        }
        let _ = self
            .element
            .remove_event_listener_with_callback("touchcancel", self.on_cancel.as_ref().unchecked_ref());
    }
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint { x: t.client_x() as f64, y: t.client_y() as f64 })
        .collect()
}

/// Measure the host element and hand recognizer samples to the reducer.
fn dispatch_samples(element: &HtmlElement, model: &UseReducerHandle<ZoomModel>, samples: GestureSamples) {
    if samples.pinch.is_none() && samples.pan.is_none() {
        return;
    }
    let rect = element.get_bounding_client_rect();
    let bounds = ClientRect { left: rect.left(), top: rect.top(), width: rect.width(), height: rect.height() };
    let layout = ViewSize::new(element.offset_width() as f64, element.offset_height() as f64);
    for action in gesture_actions(samples, bounds, layout) {
        model.dispatch(action);
    }
}

/// Convert client-space samples into view-local reducer actions, pinch first so
/// the pan policy sees the scale written by the same touch event.
fn gesture_actions(samples: GestureSamples, bounds: ClientRect, layout: ViewSize) -> Vec<ZoomAction> {
    let mut actions = Vec::with_capacity(2);
    if let Some(pinch) = samples.pinch {
        if !pinch.phase.is_active() {
            clog(&format!("pinch {:?} at scale {:.3}", pinch.phase, pinch.scale));
        }
        actions.push(ZoomAction::Pinch(PinchEvent {
            phase: pinch.phase,
            magnitude: pinch.scale,
            location: bounds.to_local(pinch.centroid, layout),
            view_size: layout,
        }));
    }
    if let Some(pan) = samples.pan {
        actions.push(ZoomAction::Pan(PanEvent {
            phase: pan.phase,
            translation: bounds.delta_to_local(pan.translation, layout),
        }));
    }
    actions
}
