use leptos::prelude::*;

use crate::{
    assets,
    profile::{Icon, PROFILE},
    reveal::Block,
    stage::StageFrame,
};

/// Wraps `children` in an element that follows `block`'s pose on the shared
/// timeline.
#[component]
pub fn RevealBlock(
    block: Block,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let frame = expect_context::<ReadSignal<StageFrame>>();
    let style = move || frame.with(|f| f.pose(block).css());
    view! {
        <div class=class style=style>
            {children()}
        </div>
    }
}

#[component]
pub fn AvatarBlock() -> impl IntoView {
    // picked from the asset manifest so server and client render the same src
    let initial = assets::avatar_source(&PROFILE);
    let (failed, set_failed) = signal(initial != PROFILE.avatar);
    let src = move || {
        if failed.get() {
            PROFILE.avatar_fallback.href
        } else {
            initial.href
        }
    };
    view! {
        <RevealBlock block=Block::Avatar class="relative inline-block">
            <div class="absolute -inset-1 bg-gradient-to-r from-purple-600 via-blue-500 to-purple-600 rounded-full opacity-30 blur-md"></div>
            <img
                src=src
                alt=PROFILE.name
                class="relative w-32 h-32 rounded-full object-cover border-2 border-gray-800"
                on:error=move |_| {
                    // the placeholder failing too must not loop
                    if !failed.get_untracked() {
                        log::warn!("couldn't load {}, showing placeholder", PROFILE.avatar.href);
                        set_failed.set(true);
                    }
                }
            />
        </RevealBlock>
    }
}

/// Inline stroke icon, sized by the surrounding text.
#[component]
pub fn Glyph(icon: Icon, #[prop(optional, into)] class: String) -> impl IntoView {
    view! {
        <svg
            viewBox=Icon::VIEW_BOX
            class=format!("w-[1.25em] h-[1.25em] {class}")
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            <path d=icon.path() />
        </svg>
    }
}

#[component]
pub fn HeadingBlock() -> impl IntoView {
    view! {
        <RevealBlock block=Block::Heading class="mt-6">
            <h1 class="text-4xl font-bold tracking-tight mb-2 text-white">
                <span class="bg-clip-text text-transparent bg-gradient-to-r from-purple-500 to-blue-500">
                    {PROFILE.name}
                </span>
            </h1>
            <p class="text-xl text-blue-500 font-light mb-4 tracking-wide">{PROFILE.greeting}</p>
            <p class="text-gray-400 max-w-2xl mx-auto leading-relaxed font-light">{PROFILE.bio}</p>
        </RevealBlock>
    }
}

#[component]
pub fn SkillsBlock() -> impl IntoView {
    view! {
        <RevealBlock block=Block::Skills class="flex flex-wrap justify-center gap-2 mt-6">
            {PROFILE
                .skills
                .iter()
                .map(|skill| {
                    view! {
                        <span class="px-3 py-1 text-sm bg-gray-800 bg-opacity-50 text-gray-300 rounded-full backdrop-blur-sm tracking-wide">
                            {*skill}
                        </span>
                    }
                })
                .collect_view()}
        </RevealBlock>
    }
}

#[component]
pub fn LinksBlock() -> impl IntoView {
    let resume = PROFILE.resume;
    view! {
        <RevealBlock block=Block::Links class="mt-8 flex flex-col items-center">
            <div class="flex gap-5 mb-6">
                {PROFILE
                    .links
                    .iter()
                    .map(|link| {
                        view! {
                            <a
                                href=link.url
                                target="_blank"
                                rel="noopener noreferrer"
                                aria-label=link.label
                                class="inline-flex text-lg text-gray-400 hover:text-blue-400 hover:scale-125 transition-all duration-300"
                            >
                                <Glyph icon=link.icon />
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
            <a
                href=resume.href
                download=resume.file_name
                class="px-5 py-2 bg-transparent border border-blue-500 text-blue-400 rounded-full hover:bg-blue-500 hover:text-black hover:scale-105 active:scale-95 transition-all duration-300 flex items-center gap-2 group tracking-wide"
            >
                <Glyph icon=Icon::Download class="group-hover:animate-bounce" />
                <span>"Download Resume"</span>
            </a>
        </RevealBlock>
    }
}
