use leptos::prelude::*;

use crate::{particles::ParticleFrame, stage::StageFrame};

#[component]
pub fn ParticleLayer(count: ReadSignal<usize>) -> impl IntoView {
    view! {
        <div class="absolute inset-0 opacity-40 pointer-events-none" aria-hidden="true">
            <For each=move || 0..count.get() key=|i| *i let:index>
                <Dot index />
            </For>
        </div>
    }
}

#[component]
fn Dot(index: usize) -> impl IntoView {
    let frame = expect_context::<ReadSignal<StageFrame>>();
    let style = move || {
        frame.with(|f| {
            f.particles
                .get(index)
                .map(ParticleFrame::css)
                .unwrap_or_default()
        })
    };
    view! { <div class="absolute top-0 left-0 w-1 h-1 rounded-full bg-blue-500" style=style></div> }
}
