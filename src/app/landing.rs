use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_use::{use_raf_fn_with_options, UseRafFnCallbackArgs, UseRafFnOptions};
use wasm_bindgen::JsValue;

use crate::{
    particles::{Viewport, ViewportError},
    profile::{build_year, PROFILE},
    reveal::Block,
    stage::{Stage, StageFrame},
};

use super::{
    particles::ParticleLayer,
    reveal::{AvatarBlock, HeadingBlock, LinksBlock, RevealBlock, SkillsBlock},
};

/// Reads the window size once. Only meaningful in the browser.
fn measure_viewport() -> Result<Viewport, ViewportError> {
    let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
    let window = window();
    match (px(window.inner_width()), px(window.inner_height())) {
        (Some(width), Some(height)) => Viewport::new(width, height),
        _ => Err(ViewportError::Unavailable),
    }
}

#[component]
pub fn Landing() -> impl IntoView {
    // the server has no viewport, so it renders the empty default stage
    let stage = StoredValue::new(Arc::new(Mutex::new(Stage::default())));
    let (frame, set_frame) = signal(StageFrame::default());
    let (particle_count, set_particle_count) = signal(0usize);
    provide_context(frame);

    let raf = use_raf_fn_with_options(
        move |args: UseRafFnCallbackArgs| {
            let next = stage
                .try_with_value(|s| {
                    s.lock()
                        .expect("should be able to lock stage")
                        .tick(args.timestamp)
                })
                .flatten();
            if let Some(next) = next {
                set_frame.set(next);
            }
        },
        UseRafFnOptions::default().immediate(false),
    );

    // effects only run in the browser, after hydration
    Effect::new(move |_| {
        let mut fresh = Stage::new(measure_viewport(), fastrand::u64(..));
        fresh.mount();
        set_particle_count.set(fresh.particle_count());
        stage.with_value(|s| {
            *s.lock().expect("should be able to lock stage") = fresh;
        });
        (raf.resume)();
    });

    on_cleanup(move || {
        stage.try_with_value(|s| {
            if let Ok(mut s) = s.lock() {
                s.unmount();
            }
        });
    });

    let json_ld = PROFILE.person_json_ld().unwrap_or_else(|e| {
        log::warn!("skipping JSON-LD: {e}");
        String::new()
    });

    view! {
        <Title text=PROFILE.name />
        <div class="relative min-h-screen bg-black overflow-hidden">
            <Backdrop />
            <ParticleLayer count=particle_count />
            <div class="relative container mx-auto px-6 py-16 flex flex-col items-center justify-center min-h-screen">
                <RevealBlock block=Block::Container class="w-full max-w-3xl mx-auto text-center">
                    <AvatarBlock />
                    <HeadingBlock />
                    <SkillsBlock />
                    <LinksBlock />
                </RevealBlock>
            </div>
            <Footer />
        </div>
        <script type="application/ld+json" inner_html=json_ld></script>
    }
}

#[component]
fn Backdrop() -> impl IntoView {
    view! {
        <div class="absolute inset-0 bg-gradient-to-br from-gray-900 to-black"></div>
        <div class="absolute inset-0 bg-[radial-gradient(circle_at_center,rgba(100,100,255,0.1),transparent_70%)]"></div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    build_year().map(|year| {
        view! {
            <footer class="absolute bottom-4 inset-x-0 text-center text-xs text-gray-600 tracking-wide">
                {format!("© {year} {}", PROFILE.name)}
            </footer>
        }
    })
}
