use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use emokarta_shared::{
    FeatureCollection, RegionDetail, RegionStat, SourceCollection, emotion_color, rgb_css, rgba_css,
};

use crate::api;
use crate::fusion::fuse;
use crate::interact::{InteractionState, SelectionEvent};
use crate::map::MapView;
use crate::style::StyleProps;

pub(crate) const YEAR_MIN: i32 = 1920;
pub(crate) const YEAR_MAX: i32 = 1991;
const DEFAULT_YEAR: i32 = 1941;

/// Newtype wrappers so same-shaped signals stay distinct in Leptos context.
#[derive(Clone, Copy)]
pub(crate) struct Year(pub RwSignal<i32>);
#[derive(Clone, Copy)]
pub(crate) struct Interaction(pub RwSignal<InteractionState>);
#[derive(Clone, Copy)]
pub(crate) struct Selected(pub RwSignal<Option<SelectionEvent>>);
#[derive(Clone, Copy)]
pub(crate) struct StyleOverrides(pub RwSignal<HashMap<String, StyleProps>>);
#[derive(Clone, Copy)]
pub(crate) struct RaisedFeature(pub RwSignal<Option<String>>);

/// Resolution state of the geometry source. `Pending` and `Unavailable` both
/// take the fallback fusion path; they differ only for logging.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GeometrySource {
    Pending,
    Ready(SourceCollection),
    Unavailable,
}

/// Fetch stats for a year; last-requested-wins. A superseded response is
/// discarded by nonce comparison, not treated as an error.
fn load_year(year: i32, fetch_nonce: RwSignal<u64>, regions: RwSignal<Vec<RegionStat>>) {
    let request_nonce = fetch_nonce.get_untracked().wrapping_add(1);
    fetch_nonce.set(request_nonce);

    spawn_local(async move {
        match api::fetch_map_data(year).await {
            Ok(payload) => {
                if fetch_nonce.get_untracked() != request_nonce {
                    return;
                }
                regions.set(payload.regions);
            }
            Err(e) => {
                if fetch_nonce.get_untracked() != request_nonce {
                    return;
                }
                web_sys::console::warn_1(&format!("map data fetch failed: {e}").into());
                regions.set(Vec::new());
            }
        }
    });
}

/// One geometry fetch per session. Failure is a valid input state — the
/// fusion engine switches to placeholder synthesis.
fn load_geometry(geometry: RwSignal<GeometrySource>) {
    spawn_local(async move {
        match api::fetch_geometry().await {
            Ok(collection) => geometry.set(GeometrySource::Ready(collection)),
            Err(e) => {
                web_sys::console::warn_1(&format!("geometry unavailable: {e}").into());
                geometry.set(GeometrySource::Unavailable);
            }
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let year: RwSignal<i32> = RwSignal::new(DEFAULT_YEAR);
    let regions: RwSignal<Vec<RegionStat>> = RwSignal::new(Vec::new());
    let geometry: RwSignal<GeometrySource> = RwSignal::new(GeometrySource::Pending);
    let features: RwSignal<FeatureCollection> = RwSignal::new(Vec::new());
    let interaction: RwSignal<InteractionState> = RwSignal::new(InteractionState::default());
    let selected: RwSignal<Option<SelectionEvent>> = RwSignal::new(None);
    let overrides: RwSignal<HashMap<String, StyleProps>> = RwSignal::new(HashMap::new());
    let raised: RwSignal<Option<String>> = RwSignal::new(None);
    let mouse_pos: RwSignal<(f64, f64)> = RwSignal::new((0.0, 0.0));
    let stats_fetch_nonce: RwSignal<u64> = RwSignal::new(0);

    provide_context(Year(year));
    provide_context(Interaction(interaction));
    provide_context(Selected(selected));
    provide_context(StyleOverrides(overrides));
    provide_context(RaisedFeature(raised));
    provide_context(features);
    provide_context(mouse_pos);

    load_geometry(geometry);

    // Re-fetch stats whenever the year changes (and once on mount).
    Effect::new(move || {
        load_year(year.get(), stats_fetch_nonce, regions);
    });

    // Fusion: one atomic step per input change. Interaction state and paint
    // overrides are cleared before the collection is replaced, so no hover or
    // tooltip from the old collection survives.
    Effect::new(move || {
        let source = geometry.get();
        let stats = regions.get();
        let fused = match &source {
            GeometrySource::Ready(collection) => fuse(Some(collection), &stats),
            GeometrySource::Pending | GeometrySource::Unavailable => fuse(None, &stats),
        };
        interaction.update(InteractionState::reset);
        overrides.update(HashMap::clear);
        raised.set(None);
        features.set(fused);
    });

    view! {
        <div style="max-width: 1100px; margin: 0 auto; padding: 16px; font-family: system-ui, sans-serif;">
            <h1 style="font-size: 1.4rem; margin-bottom: 4px;">"Карта эмоций дневников"</h1>
            <YearSlider />
            <div style="position: relative;">
                <MapView />
                <Tooltip />
            </div>
            <DetailPanel />
        </div>
    }
}

#[component]
fn YearSlider() -> impl IntoView {
    let Year(year) = expect_context();

    view! {
        <div style="display: flex; align-items: center; gap: 12px; margin: 12px 0;">
            <span>{YEAR_MIN}</span>
            <input
                type="range"
                min=YEAR_MIN.to_string()
                max=YEAR_MAX.to_string()
                step="1"
                style="flex: 1;"
                prop:value=move || year.get().to_string()
                on:input=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<i32>() {
                        year.set(value.clamp(YEAR_MIN, YEAR_MAX));
                    }
                }
            />
            <span>{YEAR_MAX}</span>
            <strong style="min-width: 3.5em; text-align: right;">{move || year.get()}</strong>
        </div>
    }
}

/// Tooltip following the cursor while a region is hovered. Content comes
/// from the hover snapshot taken at pointer-enter — current collection data
/// by construction.
#[component]
fn Tooltip() -> impl IntoView {
    let Interaction(interaction) = expect_context();
    let mouse_pos: RwSignal<(f64, f64)> = expect_context();

    let hovered = Memo::new(move |_| interaction.with(|state| state.hovered().cloned()));

    view! {
        {move || {
            let Some(info) = hovered.get() else {
                return view! { <div style="display:none;" /> }.into_any();
            };
            let (x, y) = mouse_pos.get();
            let (r, g, b) = emotion_color(&info.emotions);
            view! {
                <div
                    style:left=format!("{}px", x + 15.0)
                    style:top=format!("{}px", y + 15.0)
                    style:border-left=format!("3px solid {}", rgba_css(r, g, b, 0.85))
                    style="position: fixed; pointer-events: none; z-index: 1000; background: #1f2937; color: #f9fafb; border-radius: 6px; padding: 8px 10px; font-size: 0.8rem; box-shadow: 0 4px 12px rgba(0,0,0,0.4);"
                >
                    <div style="font-weight: 700;">{info.name.clone()}</div>
                    <div>{format!("Страх: {}%", (info.emotions.fear * 100.0).round())}</div>
                    <div>{format!("Радость: {}%", (info.emotions.joy * 100.0).round())}</div>
                    <div style="color: #d1d5db;">{format!("{} записей", info.diary_count)}</div>
                </div>
            }
            .into_any()
        }}
    }
}

/// Detail view fed by the selection hand-off: shows the emotions carried in
/// the event immediately, then diary entries and population once fetched.
#[component]
fn DetailPanel() -> impl IntoView {
    let Selected(selected) = expect_context();
    let Year(year) = expect_context();
    let detail: RwSignal<Option<RegionDetail>> = RwSignal::new(None);
    let detail_fetch_nonce: RwSignal<u64> = RwSignal::new(0);

    Effect::new(move || {
        let Some(selection) = selected.get() else {
            detail.set(None);
            return;
        };
        let request_nonce = detail_fetch_nonce.get_untracked().wrapping_add(1);
        detail_fetch_nonce.set(request_nonce);
        let selected_year = year.get_untracked();

        spawn_local(async move {
            match api::fetch_region_detail(selected_year, &selection.name).await {
                Ok(region_detail) => {
                    if detail_fetch_nonce.get_untracked() != request_nonce {
                        return;
                    }
                    detail.set(Some(region_detail));
                }
                Err(e) => {
                    if detail_fetch_nonce.get_untracked() != request_nonce {
                        return;
                    }
                    web_sys::console::warn_1(&format!("region detail fetch failed: {e}").into());
                    detail.set(None);
                }
            }
        });
    });

    view! {
        {move || {
            let Some(selection) = selected.get() else {
                return view! { <div style="display:none;" /> }.into_any();
            };
            let emotions = selection.emotions;
            view! {
                <div style="margin-top: 16px; border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px 16px;">
                    <div style="display: flex; justify-content: space-between; align-items: center;">
                        <h2 style="font-size: 1.1rem; margin: 0;">{selection.name.clone()}</h2>
                        <button on:click=move |_| selected.set(None)>"Закрыть"</button>
                    </div>
                    <div style="display: flex; gap: 16px; margin: 8px 0; font-size: 0.85rem;">
                        <EmotionBadge label="Страх" value=emotions.fear color=(190, 60, 60) />
                        <EmotionBadge label="Радость" value=emotions.joy color=(60, 160, 60) />
                        <EmotionBadge label="Грусть" value=emotions.sadness color=(120, 80, 160) />
                        <EmotionBadge label="Нейтрально" value=emotions.neutral color=(120, 120, 130) />
                    </div>
                    {move || detail.get().map(detail_body)}
                </div>
            }
            .into_any()
        }}
    }
}

fn detail_body(detail: RegionDetail) -> impl IntoView {
    let entries = detail
        .diary_entries
        .iter()
        .map(|entry| {
            let date = entry
                .parsed_date()
                .map_or_else(|| entry.date.clone(), |d| d.format("%d.%m.%Y").to_string());
            view! {
                <li style="margin-bottom: 8px;">
                    <div style="font-size: 0.8rem; color: #6b7280;">
                        {format!("{} — {date}", entry.author)}
                    </div>
                    <div>{entry.text.clone()}</div>
                    <a href=entry.url.clone() target="_blank" rel="noopener">"Источник"</a>
                </li>
            }
        })
        .collect_view();

    view! {
        <div>
            <div style="font-size: 0.85rem; color: #374151;">
                {format!(
                    "Население: {} ({:+.1}%)",
                    detail.stats.population,
                    detail.stats.change_percent
                )}
            </div>
            <ul style="list-style: none; padding: 0; margin-top: 8px;">{entries}</ul>
        </div>
    }
}

#[component]
fn EmotionBadge(label: &'static str, value: f64, color: (u8, u8, u8)) -> impl IntoView {
    view! {
        <span>
            <span style=format!(
                "display: inline-block; width: 0.6em; height: 0.6em; border-radius: 50%; margin-right: 4px; background: {};",
                rgb_css(color.0, color.1, color.2)
            ) />
            {format!("{label}: {}%", (value * 100.0).round())}
        </span>
    }
}
