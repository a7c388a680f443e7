//! Browser side of the board view.
//!
//! Elements are looked up by id and created under `<body>` when the host page
//! does not provide them. Rendering always clears `#board` and rebuilds all 42
//! cells from the projection; nothing is patched incrementally.

pub mod animate;
pub mod controls;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement};

use crate::config::ClientConfig;
use crate::engine::{BoardProjection, BoardView, CellView, DropOutcome, PlacedDisc};
use crate::error::ClientError;
use crate::state::Mode;

pub const BOARD_ID: &str = "board";
pub const COLS_ID: &str = "cols";
pub const STATUS_ID: &str = "status";
pub const MODE_LABEL_ID: &str = "mode-label";
pub const MODE_SELECT_ID: &str = "mode-select";
pub const RESET_ID: &str = "reset-btn";

pub struct DomView {
    document: Document,
    board: HtmlElement,
    columns: HtmlElement,
    status: HtmlElement,
    reset: HtmlElement,
    mode_label: Option<HtmlElement>,
    mode_select: Option<HtmlSelectElement>,
    config: ClientConfig,
}

fn get_or_create(document: &Document, id: &str, tag: &str) -> Result<Element, ClientError> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    let body = document.body().ok_or_else(|| ClientError::dom("no body"))?;
    let el = document.create_element(tag)?;
    el.set_id(id);
    body.append_child(&el)?;
    Ok(el)
}

fn html(el: Element) -> Result<HtmlElement, ClientError> {
    el.dyn_into::<HtmlElement>()
        .map_err(|_| ClientError::dom("expected an HTML element"))
}

impl DomView {
    pub fn mount(document: Document, config: &ClientConfig) -> Result<Self, ClientError> {
        let status = html(get_or_create(&document, STATUS_ID, "div")?)?;
        let columns = html(get_or_create(&document, COLS_ID, "div")?)?;
        let board = html(get_or_create(&document, BOARD_ID, "div")?)?;
        let reset = html(get_or_create(&document, RESET_ID, "button")?)?;
        if reset.text_content().unwrap_or_default().is_empty() {
            reset.set_text_content(Some("New game"));
        }

        let (mode_label, mode_select) = if config.mode_aware {
            let label = html(get_or_create(&document, MODE_LABEL_ID, "div")?)?;
            let select = get_or_create(&document, MODE_SELECT_ID, "select")?
                .dyn_into::<HtmlSelectElement>()
                .map_err(|_| ClientError::dom("#mode-select is not a <select>"))?;
            fill_mode_options(&document, &select)?;
            (Some(label), Some(select))
        } else {
            (None, None)
        };

        Ok(Self {
            document,
            board,
            columns,
            status,
            reset,
            mode_label,
            mode_select,
            config: config.clone(),
        })
    }

    pub fn columns(&self) -> &HtmlElement {
        &self.columns
    }

    pub fn reset_button(&self) -> &HtmlElement {
        &self.reset
    }

    pub fn mode_select(&self) -> Option<&HtmlSelectElement> {
        self.mode_select.as_ref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn cell_element(&self, cell: &CellView) -> Result<Element, JsValue> {
        let el = self.document.create_element("div")?;
        el.set_class_name("cell");
        el.set_attribute("data-row", &cell.row.to_string())?;
        el.set_attribute("data-col", &cell.col.to_string())?;
        match cell.marker.css_class() {
            Some(player) => {
                let disc = self.document.create_element("div")?;
                disc.set_class_name(&format!("disc {player}"));
                if cell.highlighted {
                    disc.class_list().add_1("win")?;
                }
                el.append_child(&disc)?;
            }
            None if cell.highlighted => el.class_list().add_1("win")?,
            None => {}
        }
        Ok(el)
    }

    fn rebuild(&self, projection: &BoardProjection) -> Result<(), JsValue> {
        self.status.set_text_content(Some(&projection.status));

        self.board.set_inner_html("");
        for cell in &projection.cells {
            let el = self.cell_element(cell)?;
            self.board.append_child(&el)?;
        }

        if let Some(label) = &self.mode_label {
            label.set_text_content(projection.mode_label);
        }
        if let (Some(select), Some(mode)) = (&self.mode_select, projection.selected_mode) {
            select.set_value(mode.tag());
        }
        Ok(())
    }
}

fn fill_mode_options(document: &Document, select: &HtmlSelectElement) -> Result<(), ClientError> {
    if select.length() > 0 {
        return Ok(());
    }
    for mode in Mode::ALL {
        let opt = document.create_element("option")?;
        opt.set_attribute("value", mode.tag())?;
        opt.set_text_content(Some(mode.label()));
        select.append_child(&opt)?;
    }
    Ok(())
}

impl BoardView for DomView {
    fn render(&self, projection: &BoardProjection) {
        if let Err(err) = self.rebuild(projection) {
            tracing::error!(?err, "board render failed");
        }
    }

    fn animate_drop(&self, disc: PlacedDisc) -> LocalBoxFuture<'_, DropOutcome> {
        animate::animate_drop(&self.document, &self.board, disc, &self.config).boxed_local()
    }
}
