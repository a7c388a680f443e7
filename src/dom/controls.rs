//! Input wiring: one drop button per column, the reset button and the mode
//! selector. Every handler spawns the matching [`Session`] call; the session's
//! guard decides whether it runs.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::dom::DomView;
use crate::engine::{GameApi, Session};
use crate::error::ClientError;
use crate::state::{Column, Mode};

/// Tooltip for a column button, 1-based like the board labels players see.
pub fn column_title(column: Column) -> String {
    format!("Play column {}", column.index() + 1)
}

fn on_click<F>(target: &web_sys::EventTarget, mut handler: F) -> Result<(), ClientError>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| handler()) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn wire<A: GameApi + 'static>(session: Rc<Session<A, DomView>>) -> Result<(), ClientError> {
    let view = session.view();
    let document = view.document();

    // Column buttons
    let columns = view.columns();
    columns.set_inner_html("");
    for column in Column::all() {
        let btn = document.create_element("button")?;
        btn.set_class_name("col-button");
        btn.set_text_content(Some("▼"));
        btn.set_attribute("title", &column_title(column))?;
        let s = session.clone();
        on_click(&btn, move || {
            let s = s.clone();
            spawn_local(async move {
                s.play_column(column).await;
            });
        })?;
        columns.append_child(&btn)?;
    }

    // Reset
    {
        let s = session.clone();
        on_click(view.reset_button(), move || {
            let s = s.clone();
            spawn_local(async move {
                s.reset().await;
            });
        })?;
    }

    // Mode selector
    if let Some(select) = view.mode_select() {
        let s = session.clone();
        let reader = select.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let tag = reader.value();
            let Some(mode) = Mode::from_tag(&tag) else {
                tracing::warn!(%tag, "unknown mode selected");
                return;
            };
            let s = s.clone();
            spawn_local(async move {
                s.select_mode(mode).await;
            });
        }) as Box<dyn FnMut(_)>);
        select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
