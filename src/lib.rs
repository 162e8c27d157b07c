pub mod card;
pub mod data;
pub mod email;
pub mod overlay;
pub mod queue;
pub mod storage;
pub mod swipe;

use card::{CardMachine, CardPhase, COMMIT_ANIMATION_MS};
use data::{fetch_sneakers, Sneaker};
use email::{submit_email, validate_email, MSG_SUBMIT_FAILED};
use gloo_timers::callback::Timeout;
use overlay::{OverlayKind, OverlayState};
use queue::{SneakerQueue, SwipeAction};
use storage::{load_session, save_session, UserSession};
use swipe::SwipeTracker;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Product-tuned commit threshold, lower than the tracker default so a
/// half-hearted flick still counts.
const CARD_SWIPE_THRESHOLD: f64 = 0.3;

/// Minimum splash display time.
const SPLASH_MIN_MS: u32 = 2_000;

/// How many cards ahead to warm the image cache for.
const PRELOAD_AHEAD: usize = 2;

const PLACEHOLDER_IMAGE: &str = "placeholder-sneaker.svg";
const SPLASH_LOGO: &str = "info/tinker_splash.png";
const HEADER_LOGO: &str = "info/sneakers-heart-logo.png";
const PROMO_CODE: &str = "SNEAKERS_HEART";
const STORE_URL: &str = "https://drifters.com.ar";

#[derive(PartialEq, Clone)]
enum FetchStatus {
    Loading,
    Error(String),
    Idle,
}

#[derive(PartialEq, Clone)]
enum SubmissionStatus {
    Idle,
    Submitting,
    Error(String),
}

/// Warms the browser cache so upcoming cards render without a fetch delay.
/// Best effort: a failed preload only costs the later per-card fallback.
fn preload_images<I>(sources: I)
where
    I: IntoIterator<Item = String>,
{
    for src in sources {
        if src.is_empty() || src.contains("placeholder") {
            continue;
        }
        match web_sys::HtmlImageElement::new() {
            Ok(image) => image.set_src(&src),
            Err(_) => break,
        }
    }
}

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|value| value.as_f64())
        .filter(|width| *width > 0.0)
        .unwrap_or(1.0)
}

#[function_component(App)]
fn app() -> Html {
    let splash_done = use_state(|| false);
    let splash_logo_error = use_state(|| false);
    let session = use_state(load_session);

    let email_input = use_state(String::new);
    let submission = use_state(|| SubmissionStatus::Idle);

    let deck_status = use_state(|| FetchStatus::Loading);
    let deck = use_state(|| None::<SneakerQueue>);
    let tracker = use_state(|| SwipeTracker::new(CARD_SWIPE_THRESHOLD));
    let machine = use_state(CardMachine::new);
    let image_error = use_state(|| false);

    {
        let splash_done = splash_done.clone();
        use_effect_with_deps(
            move |_| {
                let timer = Timeout::new(SPLASH_MIN_MS, move || {
                    splash_done.set(true);
                });
                timer.forget();
                || ()
            },
            (),
        );
    }

    {
        let deck_status = deck_status.clone();
        let deck = deck.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_sneakers().await {
                        Ok(sneakers) => {
                            // Warm every primary image up front; the deck is
                            // only four cards.
                            preload_images(
                                sneakers
                                    .iter()
                                    .filter_map(|sneaker| sneaker.images.first().cloned()),
                            );
                            deck.set(Some(SneakerQueue::new(sneakers)));
                            deck_status.set(FetchStatus::Idle);
                        }
                        Err(err) => {
                            log::error!("sneaker data failed to load: {err}");
                            deck_status.set(FetchStatus::Error(err.to_string()));
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    // The tracker follows the commit machine: while an animation window is
    // open the gesture surface is disabled, and any in-flight drag is
    // abandoned rather than completed.
    {
        let tracker = tracker.clone();
        use_effect_with_deps(
            move |phase: &CardPhase| {
                let accepts = *phase == CardPhase::Idle;
                if tracker.is_enabled() != accepts {
                    let mut next = (*tracker).clone();
                    next.set_enabled(accepts);
                    tracker.set(next);
                }
                || ()
            },
            machine.phase(),
        );
    }

    // Broken-image fallback is per card; clear it when the cursor moves and
    // look ahead so the next cards' images are already cached.
    {
        let image_error = image_error.clone();
        let deck_handle = deck.clone();
        use_effect_with_deps(
            move |_cursor: &usize| {
                image_error.set(false);
                if let Some(queue) = (*deck_handle).as_ref() {
                    preload_images(queue.upcoming_images(PRELOAD_AHEAD));
                }
                || ()
            },
            deck.as_ref().map(|queue| queue.cursor()).unwrap_or(0),
        );
    }

    // The single commit entry point. Gesture completion and the manual
    // buttons both land here; the machine guard makes re-entrant triggers
    // during an open window a no-op.
    let on_commit = {
        let machine = machine.clone();
        let deck = deck.clone();
        Callback::from(move |action: SwipeAction| {
            let mut begun = (*machine).clone();
            if !begun.begin_commit(action) {
                return;
            }
            machine.set(begun.clone());

            let machine = machine.clone();
            let deck = deck.clone();
            let deck_snapshot = (*deck).clone();
            Timeout::new(COMMIT_ANIMATION_MS, move || {
                // The window must close even without a deck to advance, or
                // the machine would stay locked in its committing state.
                let exhausted = match deck_snapshot {
                    Some(mut queue) => {
                        queue.commit(action, js_sys::Date::now());
                        let complete = queue.is_complete();
                        deck.set(Some(queue));
                        complete
                    }
                    None => false,
                };
                begun.finish_commit(exhausted);
                machine.set(begun);
            })
            .forget();
        })
    };

    let on_email_input = {
        let email_input = email_input.clone();
        let submission = submission.clone();
        Callback::from(move |event: InputEvent| {
            let input: web_sys::HtmlInputElement = event.target_unchecked_into();
            email_input.set(input.value());
            // Typing clears a shown validation error.
            if matches!(&*submission, SubmissionStatus::Error(_)) {
                submission.set(SubmissionStatus::Idle);
            }
        })
    };

    let on_email_submit = {
        let email_input = email_input.clone();
        let submission = submission.clone();
        let session = session.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submission == SubmissionStatus::Submitting {
                return;
            }

            let raw = (*email_input).clone();
            if let Some(message) = validate_email(&raw) {
                submission.set(SubmissionStatus::Error(message.to_string()));
                return;
            }

            submission.set(SubmissionStatus::Submitting);
            let submission = submission.clone();
            let session = session.clone();
            spawn_local(async move {
                match submit_email(&raw).await {
                    Ok(()) => {
                        let next = UserSession::submitted(email::now_iso());
                        save_session(&next);
                        session.set(next);
                        submission.set(SubmissionStatus::Idle);
                    }
                    Err(err) => {
                        log::error!("email submission failed: {err}");
                        submission.set(SubmissionStatus::Error(MSG_SUBMIT_FAILED.to_string()));
                    }
                }
            });
        })
    };

    let gate_cleared = session.has_submitted_email;

    html! {
        <div class="app-shell">
            { render_splash(!*splash_done, &splash_logo_error) }
            {
                if !*splash_done {
                    html! {}
                } else if !gate_cleared {
                    render_email_gate(&email_input, &submission, &on_email_input, &on_email_submit)
                } else {
                    html! {
                        <>
                            { render_header() }
                            <main class="deck-area">
                                { render_deck(&deck_status, &deck, &machine, &tracker, &image_error, &on_commit) }
                            </main>
                        </>
                    }
                }
            }
        </div>
    }
}

fn render_splash(visible: bool, logo_error: &UseStateHandle<bool>) -> Html {
    let class = classes!("splash-screen", if visible { "visible" } else { "hidden" });
    let on_logo_error = {
        let logo_error = logo_error.clone();
        Callback::from(move |_: Event| {
            log::warn!("splash logo failed to load");
            logo_error.set(true);
        })
    };

    html! {
        <div class={class}>
            {
                if **logo_error {
                    html! {}
                } else {
                    html! {
                        <img class="splash-logo"
                            src={SPLASH_LOGO}
                            alt="Tinker"
                            onerror={on_logo_error} />
                    }
                }
            }
        </div>
    }
}

fn render_email_gate(
    email_input: &UseStateHandle<String>,
    submission: &UseStateHandle<SubmissionStatus>,
    on_input: &Callback<InputEvent>,
    on_submit: &Callback<SubmitEvent>,
) -> Html {
    let submitting = **submission == SubmissionStatus::Submitting;
    let error_message = match &**submission {
        SubmissionStatus::Error(message) => Some(message.clone()),
        _ => None,
    };

    html! {
        <div class="email-gate">
            <div class="email-gate-brand">
                <img src={SPLASH_LOGO} alt="Tinker" />
            </div>
            <div class="email-gate-form">
                <form onsubmit={on_submit.clone()}>
                    <h1>{ "Hace match con tu par ideal." }</h1>
                    <input
                        type="email"
                        value={(**email_input).clone()}
                        oninput={on_input.clone()}
                        placeholder="tu@correo.com"
                        disabled={submitting}
                        aria-label="Correo electrónico"
                    />
                    {
                        if let Some(message) = error_message {
                            html! { <p class="form-error" role="alert">{ message }</p> }
                        } else {
                            html! {}
                        }
                    }
                    <button type="submit" disabled={submitting}>
                        { if submitting { "Enviando..." } else { "Continuar" } }
                    </button>
                </form>
            </div>
        </div>
    }
}

fn render_header() -> Html {
    html! {
        <header class="app-header">
            <img src={HEADER_LOGO} alt="Sneaker Heart" />
        </header>
    }
}

fn render_deck(
    status: &UseStateHandle<FetchStatus>,
    deck: &UseStateHandle<Option<SneakerQueue>>,
    machine: &UseStateHandle<CardMachine>,
    tracker: &UseStateHandle<SwipeTracker>,
    image_error: &UseStateHandle<bool>,
    on_commit: &Callback<SwipeAction>,
) -> Html {
    match &**status {
        FetchStatus::Loading => html! { <p class="deck-loading">{ "Cargando..." }</p> },
        FetchStatus::Error(message) => html! {
            <div class="deck-error">
                <p>{ "No pudimos cargar los modelos." }</p>
                <p class="detail">{ message }</p>
            </div>
        },
        FetchStatus::Idle => {
            let Some(queue) = (&**deck).as_ref() else {
                return html! {};
            };

            if queue.is_complete() {
                return render_completion();
            }

            let Some(sneaker) = queue.current() else {
                return html! {};
            };

            let busy = machine.is_committing();
            let on_like = {
                let on_commit = on_commit.clone();
                Callback::from(move |_: MouseEvent| on_commit.emit(SwipeAction::Like))
            };
            let on_dislike = {
                let on_commit = on_commit.clone();
                Callback::from(move |_: MouseEvent| on_commit.emit(SwipeAction::Dislike))
            };

            html! {
                <div class="deck">
                    { render_card(sneaker, machine, tracker, image_error, on_commit) }
                    <div class="action-buttons">
                        <button class="action dislike"
                            onclick={on_dislike}
                            disabled={busy}
                            aria-label="Dislike">{ "✕" }</button>
                        <button class="action like"
                            onclick={on_like}
                            disabled={busy}
                            aria-label="Like">{ "♥" }</button>
                    </div>
                </div>
            }
        }
    }
}

fn render_card(
    sneaker: &Sneaker,
    machine: &UseStateHandle<CardMachine>,
    tracker: &UseStateHandle<SwipeTracker>,
    image_error: &UseStateHandle<bool>,
    on_commit: &Callback<SwipeAction>,
) -> Html {
    let translate_x = tracker.translate_x();
    let is_dragging = tracker.is_dragging();

    let overlay = match machine.phase() {
        CardPhase::Committing(action) => OverlayState::committed(action),
        _ if is_dragging => OverlayState::for_drag(translate_x, viewport_width()),
        _ => OverlayState::clear(),
    };

    let transform_style = format!(
        "transform: translateX({:.1}px) rotate({:.2}deg); transition: {};",
        translate_x,
        translate_x / 20.0,
        if is_dragging {
            "transform 0s"
        } else {
            "transform 0.3s ease-out"
        }
    );

    let pointer_down = {
        let tracker = tracker.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            event.prevent_default();
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            let mut next = (*tracker).clone();
            next.begin(event.pointer_id(), event.client_x() as f64);
            tracker.set(next);
        })
    };

    let pointer_move = {
        let tracker = tracker.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if !tracker.is_dragging() {
                return;
            }
            // Keep the page from scrolling underneath the drag.
            event.prevent_default();
            let mut next = (*tracker).clone();
            next.update(
                event.pointer_id(),
                event.client_x() as f64,
                viewport_width(),
            );
            tracker.set(next);
        })
    };

    let pointer_up = {
        let tracker = tracker.clone();
        let on_commit = on_commit.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.release_pointer_capture(event.pointer_id());
            }
            let mut next = (*tracker).clone();
            let decision = next.end(event.pointer_id(), viewport_width());
            tracker.set(next);
            if let Some(direction) = decision {
                on_commit.emit(SwipeAction::from_direction(direction));
            }
        })
    };

    let pointer_cancel = {
        let tracker = tracker.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.release_pointer_capture(event.pointer_id());
            }
            let mut next = (*tracker).clone();
            next.cancel(event.pointer_id());
            tracker.set(next);
        })
    };

    let on_image_error = {
        let image_error = image_error.clone();
        let name = sneaker.name.clone();
        Callback::from(move |_: Event| {
            log::warn!("image failed to load for '{}', using placeholder", name);
            image_error.set(true);
        })
    };

    let image_src = if **image_error {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        sneaker
            .images
            .first()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    };

    let info_box_style = sneaker
        .info_box_bg
        .as_ref()
        .map(|color| format!("background: {color};"));

    html! {
        <div class="card-wrapper">
            <div class="sneaker-card"
                style={transform_style}
                onpointerdown={pointer_down}
                onpointermove={pointer_move}
                onpointerup={pointer_up}
                onpointercancel={pointer_cancel}>
                { render_overlay(overlay) }
                <div class="card-image">
                    <img src={image_src}
                        alt={sneaker.name.clone()}
                        draggable="false"
                        onerror={on_image_error} />
                </div>
                <div class="info-box" style={info_box_style}>
                    <p class="brand">{ "Nike SB" }</p>
                    <p class="model-name">{ &sneaker.name }</p>
                    <dl class="details">
                        <dt>{ "Tipo de compra" }</dt>
                        <dd>{ &sneaker.purchase_type }</dd>
                        <dt>{ "Disponibilidad" }</dt>
                        <dd>{ &sneaker.availability_type }</dd>
                        <dt>{ "Sobre mi" }</dt>
                        <dd>{ &sneaker.description }</dd>
                    </dl>
                </div>
            </div>
        </div>
    }
}

fn render_overlay(overlay: OverlayState) -> Html {
    let Some(kind) = overlay.kind else {
        return html! {};
    };
    let (class, icon) = match kind {
        OverlayKind::Like => ("swipe-overlay like", "♥"),
        OverlayKind::Dislike => ("swipe-overlay dislike", "✕"),
    };

    html! {
        <div class={class} style={format!("opacity: {:.3};", overlay.intensity)}>
            <span class="overlay-icon">{ icon }</span>
        </div>
    }
}

fn render_completion() -> Html {
    html! {
        <div class="completion-screen">
            <h1>{ "¡Gracias por participar!" }</h1>
            <div class="promo-box">
                <p>{ "Tu código promocional:" }</p>
                <p class="promo-code">{ PROMO_CODE }</p>
            </div>
            <p class="completion-note">
                { "Usá este código en tu próxima compra y hacé match con el par perfecto para vos." }
            </p>
            <a href={STORE_URL} target="_blank" rel="noopener noreferrer">
                { "Ir a Drifters.com.ar" }
            </a>
        </div>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
