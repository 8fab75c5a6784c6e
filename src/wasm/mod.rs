//! WASM bindings for print preview
//!
//! The host page owns text measurement: it renders a card's content
//! off-screen and tells us whether it overflows.

pub mod flat_buffer;

use crate::pagination::{DriveOutcome, MeasurementPort};
use crate::print::{CardDimensions, Orientation, PaperSpec, PaperType};
use crate::resource::{ResourceId, ResourceText};
use crate::{PrintConfig, PrintSession};
use flat_buffer::SheetBuffer;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second call finds the logger already set
    #[cfg(feature = "console-logging")]
    console_log::init_with_level(log::Level::Debug).ok();
}

/// Saturating conversion for counts handed to JS
fn to_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Measurement port backed by a JS callback `(content: string) => boolean`.
///
/// A throwing callback or a non-boolean answer counts as "fits", so a
/// broken host can never keep a card splitting forever.
pub struct JsMeasurer<'a> {
    callback: &'a js_sys::Function,
}

impl<'a> JsMeasurer<'a> {
    pub fn new(callback: &'a js_sys::Function) -> Self {
        Self { callback }
    }
}

impl MeasurementPort for JsMeasurer<'_> {
    fn overflows(&mut self, content: &str) -> bool {
        match self.callback.call1(&JsValue::NULL, &JsValue::from_str(content)) {
            Ok(value) => value.as_bool().unwrap_or_else(|| {
                log::warn!("measure callback returned a non-boolean; treating as fit");
                false
            }),
            Err(_) => {
                log::warn!("measure callback threw; treating as fit");
                false
            }
        }
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// WASM-exposed print session wrapper
#[wasm_bindgen]
pub struct WasmPrintSession {
    session: PrintSession,
    buffer: SheetBuffer,
}

#[wasm_bindgen]
impl WasmPrintSession {
    /// Create a session for a paper name, orientation and card size in inches
    #[wasm_bindgen(constructor)]
    pub fn new(
        paper: &str,
        orientation: &str,
        card_width: f64,
        card_height: f64,
    ) -> Result<WasmPrintSession, JsError> {
        let paper = PaperSpec::new(paper.parse::<PaperType>()?, orientation.parse::<Orientation>()?);
        let config = PrintConfig {
            paper,
            card: CardDimensions::new(card_width, card_height)?,
            ..PrintConfig::default()
        };
        Ok(Self {
            session: PrintSession::new(config)?,
            buffer: SheetBuffer::new(),
        })
    }

    /// Create a session from a JSON print configuration
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<WasmPrintSession, JsError> {
        let config = PrintConfig::from_json_str(json)?;
        Ok(Self {
            session: PrintSession::new(config)?,
            buffer: SheetBuffer::new(),
        })
    }

    /// Start paginating a card; its count is unknown until it converges
    pub fn mount(&mut self, id: u32, text: &str) {
        self.session
            .mount(ResourceId(u64::from(id)), ResourceText::from_raw(text));
    }

    /// Replace a mounted card's text
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, id: u32, text: &str) -> bool {
        self.session
            .set_text(ResourceId(u64::from(id)), ResourceText::from_raw(text))
    }

    pub fn unmount(&mut self, id: u32) -> bool {
        self.session.unmount(ResourceId(u64::from(id)))
    }

    /// Run one rendering opportunity for a card.
    ///
    /// `measure(content: string) => boolean` reports whether `content`
    /// overflows the card. Returns true once the card has converged.
    pub fn drive(&mut self, id: u32, measure: &js_sys::Function) -> bool {
        let mut port = JsMeasurer::new(measure);
        matches!(
            self.session.drive(ResourceId(u64::from(id)), &mut port),
            Some(DriveOutcome::Converged(_))
        )
    }

    /// Change paper; returns an error for unknown names
    #[wasm_bindgen(js_name = setPaper)]
    pub fn set_paper(&mut self, paper: &str, orientation: &str) -> Result<(), JsError> {
        let paper = PaperSpec::new(paper.parse::<PaperType>()?, orientation.parse::<Orientation>()?);
        self.session.set_paper(paper);
        Ok(())
    }

    /// Pages of a card (returns JSON array, or null when not mounted)
    pub fn pages(&self, id: u32) -> JsValue {
        match self.session.pages(ResourceId(u64::from(id))) {
            Some(pages) => to_js(pages),
            None => JsValue::NULL,
        }
    }

    /// Page count of a card; undefined while it is still converging
    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self, id: u32) -> Option<u32> {
        self.session
            .page_count(ResourceId(u64::from(id)))
            .known()
            .map(to_u32)
    }

    #[wasm_bindgen(js_name = isSettled)]
    pub fn is_settled(&self) -> bool {
        self.session.is_settled()
    }

    #[wasm_bindgen(js_name = totalSheets)]
    pub fn total_sheets(&self) -> u32 {
        to_u32(self.session.total_sheets())
    }

    /// Top and bottom margins for one page of a card (returns JSON)
    #[wasm_bindgen(js_name = marginsFor)]
    pub fn margins_for(&self, id: u32, page_index: u32) -> JsValue {
        match self
            .session
            .margins_for(ResourceId(u64::from(id)), page_index as usize)
        {
            Some(margins) => to_js(&margins),
            None => JsValue::NULL,
        }
    }

    /// Sheet grid and padding (returns JSON)
    pub fn layout(&self) -> JsValue {
        to_js(self.session.layout())
    }

    #[wasm_bindgen(js_name = cropMarks)]
    pub fn crop_marks(&self) -> JsValue {
        to_js(&self.session.crop_marks())
    }

    /// Sheet plan (returns JSON array)
    pub fn sheets(&self) -> JsValue {
        to_js(&self.session.sheets())
    }

    /// Write the sheet plan into the flat buffer; read it through the pointers
    #[wasm_bindgen(js_name = buildSheetBuffer)]
    pub fn build_sheet_buffer(&mut self) {
        let marks = self.session.crop_marks();
        let sheets = self.session.sheets();
        self.buffer.write_plan(self.session.layout(), &marks, &sheets);
    }

    #[wasm_bindgen(js_name = sheetU32Ptr)]
    pub fn sheet_u32_ptr(&self) -> u32 {
        self.buffer.u32_ptr()
    }

    #[wasm_bindgen(js_name = sheetU32Len)]
    pub fn sheet_u32_len(&self) -> u32 {
        self.buffer.u32_len()
    }

    #[wasm_bindgen(js_name = sheetF32Ptr)]
    pub fn sheet_f32_ptr(&self) -> u32 {
        self.buffer.f32_ptr()
    }

    #[wasm_bindgen(js_name = sheetF32Len)]
    pub fn sheet_f32_len(&self) -> u32 {
        self.buffer.f32_len()
    }
}
