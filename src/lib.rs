//! Connect Four web client core crate.
//!
//! The rules server owns the game: legality, win/draw detection and the AI
//! reply all happen behind `/api/*`. This crate fetches snapshots, diffs them to
//! find the disc a move added, animates that disc into place and then redraws
//! the whole board from the server's answer.
//!
//! Native-friendly pieces (snapshot decoding, diffing, the interaction guard,
//! render projection) live in [`state`] and [`engine`]; [`dom`] and [`api`] are
//! the browser bindings.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod api;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod logging;
pub mod state;

pub use config::ClientConfig;
pub use engine::{BoardView, GameApi, Interaction, Session};
pub use error::ClientError;
pub use state::{Board, Column, Coord, GameState, Marker, Mode};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

type BrowserSession = Session<api::HttpApi, dom::DomView>;

thread_local! {
    static SESSION: RefCell<Option<Rc<BrowserSession>>> = const { RefCell::new(None) };
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    mount(ClientConfig::default()).map_err(Into::into)
}

/// Same as [`start_game`] with a JSON [`ClientConfig`]; missing fields keep
/// their defaults.
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = ClientConfig::from_json(config_json)?;
    mount(config).map_err(Into::into)
}

fn mount(config: ClientConfig) -> Result<(), ClientError> {
    logging::init(&config);

    if SESSION.with(|s| s.borrow().is_some()) {
        tracing::warn!("game already mounted");
        return Ok(());
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ClientError::dom("no document"))?;
    let view = dom::DomView::mount(document, &config)?;
    let session = Rc::new(Session::new(api::HttpApi::new(&config), view));
    dom::controls::wire(session.clone())?;
    SESSION.with(|s| s.replace(Some(session.clone())));

    tracing::info!(api_base = %config.api_base, "connect four client mounted");
    wasm_bindgen_futures::spawn_local(async move {
        session.start().await;
    });
    Ok(())
}
