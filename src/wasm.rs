//! Browser bindings. The JS side renders from [`WasmOthello::state`] and
//! forwards clicks to [`WasmOthello::advance`].

use wasm_bindgen::prelude::*;

use crate::game::Othello;
use crate::source::RandomMoveSource;
use crate::types::{Color, Step};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

#[wasm_bindgen]
pub struct WasmOthello {
    inner: Othello,
}

#[wasm_bindgen]
impl WasmOthello {
    /// `engine_is_black` puts the random engine on Black, otherwise on White.
    #[wasm_bindgen(constructor)]
    pub fn new(board_size: usize, engine_is_black: bool) -> Result<WasmOthello, JsValue> {
        let color = if engine_is_black {
            Color::Black
        } else {
            Color::White
        };
        let inner = Othello::with_engine(board_size, color, Box::new(RandomMoveSource::new()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.inner.new_game();
    }

    /// Returns `true` when the step changed the match.
    pub fn advance(&mut self, x: usize, y: usize) -> bool {
        !matches!(
            self.inner.advance(x, y),
            Step::Rejected | Step::SourceClosed
        )
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.view()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    pub fn transcript(&self) -> String {
        self.inner.transcript().to_string()
    }
}
