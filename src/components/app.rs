use super::pinch_zoom::PinchZoom;
use crate::config::ZoomConfig;
use crate::util::{clog, cwarn, set_debug_logging};
use yew::prelude::*;

const DEMO_IMAGE_URL: &str = "https://picsum.photos/id/6/500/500";

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(|| match ZoomConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            cwarn(&format!("pinch-zoom: {e}; using default config"));
            ZoomConfig::default()
        }
    });
    let fullscreen = use_state(|| false);

    {
        let debug = config.debug_log;
        use_effect_with(debug, move |debug| {
            set_debug_logging(*debug);
            clog("debug logging enabled");
            || ()
        });
    }

    let toggle_mode = {
        let fullscreen = fullscreen.clone();
        Callback::from(move |_| fullscreen.set(!*fullscreen))
    };

    let image = html! {
        <img
            src={DEMO_IMAGE_URL}
            alt="Zoomable"
            draggable="false"
            style="display:block; width:300px; height:300px; object-fit:cover; border-radius:15px;"
        />
    };

    html! {
        <div style="min-height:100vh; display:flex; flex-direction:column; align-items:center; gap:16px; padding:24px; font-family:sans-serif; background:#0d1117; color:#c9d1d9;">
            <h1 style="margin:0; font-size:28px;">{"Pinch to Zoom"}</h1>
            <div style="border-radius:15px;">
                <PinchZoom fullscreen={*fullscreen} config={(*config).clone()}>
                    { image }
                </PinchZoom>
            </div>
            <button onclick={toggle_mode}>
                { if *fullscreen { "Inline mode" } else { "Fullscreen mode" } }
            </button>
        </div>
    }
}
