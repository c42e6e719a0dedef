use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// While true, Escape, overlay click and the close button are ignored
    #[prop(optional, into)]
    locked: MaybeProp<bool>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    let request_close = move || {
        if !locked.get_untracked().unwrap_or(false) {
            on_close.run(());
        }
    };

    // Handle Escape key
    let keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
            if keyboard_event.key() == "Escape" {
                request_close();
            }
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
    }
    let keydown = StoredValue::new_local(keydown);
    on_cleanup(move || {
        if let Some(window) = web_sys::window() {
            keydown.with_value(|closure| {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    closure.as_ref().unchecked_ref(),
                );
            });
        }
    });

    // Prevent click propagation from modal content
    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| request_close()>
            <div class="modal" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <div class="modal-header-actions">
                        <button
                            class="button button--icon modal__close"
                            on:click=move |_| request_close()
                            disabled=move || locked.get().unwrap_or(false)
                        >
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Blocking overlay shown while a file is parsed or a save is in flight
#[component]
pub fn LoadingOverlay(#[prop(into)] visible: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="loading-overlay">
                <div class="loading-overlay__box">
                    <thaw::Spinner />
                </div>
            </div>
        </Show>
    }
}
