//! Drop animation for a freshly placed disc.
//!
//! A transient `div.disc.pN.drop` is appended to the board, positioned above
//! the target column and moved to the target cell by a CSS transition started on
//! the next animation frame. `transitionend` or the timeout ceiling, whichever
//! comes first, swaps it for a permanent disc inside the cell.

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::config::ClientConfig;
use crate::engine::{DropOutcome, PlacedDisc, drop_settle};

// --- Geometry ---------------------------------------------------------------

/// Client rect, detached from `DomRect` so the math runs natively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<web_sys::DomRect> for Rect {
    fn from(r: web_sys::DomRect) -> Self {
        Self {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }
}

/// Board-relative travel of the transient disc. Only y changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropPath {
    pub x: f64,
    pub start_y: f64,
    pub end_y: f64,
}

impl DropPath {
    pub fn start_transform(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.start_y)
    }

    pub fn end_transform(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.end_y)
    }
}

/// Centers a `disc_size` square on `cell`, starting `start_offset` px from the
/// board's top edge.
pub fn drop_path(board: Rect, cell: Rect, disc_size: f64, start_offset: f64) -> DropPath {
    let half = disc_size / 2.0;
    DropPath {
        x: cell.left + cell.width / 2.0 - board.left - half,
        start_y: start_offset,
        end_y: cell.top + cell.height / 2.0 - board.top - half,
    }
}

// --- DOM side ---------------------------------------------------------------

fn disc_element(document: &Document, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name(class);
    Ok(el)
}

/// Permanent disc into the target cell, transient removed. Failures here only
/// cost a frame: the redraw that follows rebuilds the cell anyway.
fn commit(document: &Document, target: &Element, transient: &Element, marker_class: &str) {
    if let Ok(disc) = disc_element(document, &format!("disc {marker_class}")) {
        target.append_child(&disc).ok();
    }
    transient.remove();
}

fn spawn_transient(
    document: &Document,
    board: &HtmlElement,
    marker_class: &str,
    size: f64,
) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = disc_element(document, &format!("disc {marker_class} drop"))?.dyn_into()?;
    let style = el.style();
    style.set_property("width", &format!("{size}px"))?;
    style.set_property("height", &format!("{size}px"))?;
    board.append_child(&el)?;
    Ok(el)
}

pub async fn animate_drop(
    document: &Document,
    board: &HtmlElement,
    disc: PlacedDisc,
    config: &ClientConfig,
) -> DropOutcome {
    let Some(marker_class) = disc.marker.css_class() else {
        return DropOutcome::Skipped;
    };
    let Some(target) = board.children().item(disc.coord().cell_index() as u32) else {
        return DropOutcome::Skipped;
    };
    let transient = match spawn_transient(document, board, marker_class, config.disc_size_px) {
        Ok(el) => el,
        Err(err) => {
            tracing::warn!(?err, "could not create transient disc");
            return DropOutcome::Skipped;
        }
    };

    let path = drop_path(
        board.get_bounding_client_rect().into(),
        target.get_bounding_client_rect().into(),
        config.disc_size_px,
        config.drop_start_offset_px,
    );
    let style = transient.style();
    style.set_property("transform", &path.start_transform()).ok();
    // Force a layout so the start position is committed before the transition.
    transient.get_bounding_client_rect();

    {
        let style = style.clone();
        let end = path.end_transform();
        let step = Closure::once_into_js(move || {
            style.set_property("transform", &end).ok();
        });
        if let Some(win) = web_sys::window() {
            let _ = win.request_animation_frame(step.unchecked_ref());
        }
    }

    let (settle, landing) = drop_settle();

    let on_end = {
        let settle = settle.clone();
        let document = document.clone();
        let target = target.clone();
        let el: Element = transient.clone().into();
        EventListener::once(&transient, "transitionend", move |_| {
            settle.settle_with(DropOutcome::Landed, || {
                commit(&document, &target, &el, marker_class)
            });
        })
    };
    let ceiling = {
        let document = document.clone();
        let el: Element = transient.clone().into();
        Timeout::new(config.drop_timeout_ms, move || {
            settle.settle_with(DropOutcome::TimedOut, || {
                commit(&document, &target, &el, marker_class)
            });
        })
    };

    let outcome = landing.await;
    // Both callbacks have returned by now; dropping them detaches whichever
    // one lost the race.
    drop(on_end);
    drop(ceiling);
    outcome
}
