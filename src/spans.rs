//! Positioned text extraction from page content streams.
//!
//! Walks the text operators of a content stream (BT/ET, Tf, Td/TD, Tm, T*,
//! Tj, TJ, ', ") and produces [`TextSpan`]s carrying page coordinates and
//! the effective font size. Only what table detection needs is tracked;
//! graphics state outside text objects is ignored.

use crate::error::Result;
use crate::source::{ContentOp, OpValue, PageId, PageSource};

/// Kerning adjustment (in 1/1000 text-space units) large enough to be
/// treated as a word gap inside a TJ array.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Default leading applied by T* and ' when none was set.
const DEFAULT_LEADING: f32 = 12.0;

/// A positioned run of text on a page.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content.
    pub text: String,
    /// X position of the left edge, in PDF points.
    pub x: f32,
    /// Y position of the baseline, in PDF points (origin bottom-left).
    pub y: f32,
    /// Estimated width in points.
    pub width: f32,
    /// Effective font size in points.
    pub font_size: f32,
}

impl TextSpan {
    /// Create a span at a position. Width is estimated from the character
    /// count, assuming an average glyph of half the font size.
    pub fn new(text: String, x: f32, y: f32, font_size: f32) -> Self {
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            text,
            x,
            y,
            width,
            font_size,
        }
    }

    /// X position of the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Reads positioned text spans out of page content streams.
pub struct SpanReader<'a, S: PageSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: PageSource + ?Sized> SpanReader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Extract all text spans from the given page.
    pub fn read_page(&self, page: PageId) -> Result<Vec<TextSpan>> {
        let ops = self.source.operations(page)?;
        let mut spans = Vec::new();
        let mut state = TextState::default();

        for op in &ops {
            self.apply(page, op, &mut state, &mut spans);
        }

        log::debug!("span reader: {} spans on page {:?}", spans.len(), page);
        Ok(spans)
    }

    fn apply(&self, page: PageId, op: &ContentOp, state: &mut TextState, spans: &mut Vec<TextSpan>) {
        match op.operator.as_str() {
            "BT" => {
                state.in_text = true;
                state.matrix = TextMatrix::default();
            }
            "ET" => state.in_text = false,
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let OpValue::Name(name) = &op.operands[0] {
                        state.font = name.clone();
                    }
                    state.font_size = op.operands[1].as_number().unwrap_or(12.0);
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = op.operands[0].as_number().unwrap_or(0.0);
                    let ty = op.operands[1].as_number().unwrap_or(0.0);
                    state.matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    let n: Vec<f32> = op
                        .operands
                        .iter()
                        .take(6)
                        .map(|v| v.as_number().unwrap_or(0.0))
                        .collect();
                    state.matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                }
            }
            "T*" => state.matrix.next_line(),
            "Tj" => {
                if state.in_text {
                    if let Some(OpValue::Str(bytes)) = op.operands.first() {
                        let text = self.source.decode_text(page, &state.font, bytes);
                        push_span(spans, state, text);
                    }
                }
            }
            "TJ" => {
                if state.in_text {
                    if let Some(OpValue::Array(items)) = op.operands.first() {
                        let text = self.join_tj(page, state, items);
                        push_span(spans, state, text);
                    }
                }
            }
            "'" | "\"" => {
                state.matrix.next_line();
                if state.in_text {
                    // " carries word and char spacing before the string
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(OpValue::Str(bytes)) = op.operands.get(text_idx) {
                        let text = self.source.decode_text(page, &state.font, bytes);
                        push_span(spans, state, text);
                    }
                }
            }
            _ => {}
        }
    }

    /// Join the string elements of a TJ array, turning large negative
    /// kerning adjustments into word spaces.
    fn join_tj(&self, page: PageId, state: &TextState, items: &[OpValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                OpValue::Str(bytes) => {
                    combined.push_str(&self.source.decode_text(page, &state.font, bytes));
                }
                OpValue::Integer(_) | OpValue::Real(_) => {
                    let adjustment = -item.as_number().unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD && !combined.is_empty() {
                        let last = combined.chars().last();
                        let spaced = combined.ends_with(' ') || combined.ends_with('\u{00A0}');
                        if !spaced && !last.map(is_spaceless_script_char).unwrap_or(false) {
                            combined.push(' ');
                        }
                    }
                }
                _ => {}
            }
        }
        combined
    }
}

fn push_span(spans: &mut Vec<TextSpan>, state: &TextState, text: String) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = state.matrix.position();
    let effective_size = state.font_size * state.matrix.scale();
    spans.push(TextSpan::new(text, x, y, effective_size));
}

/// Text-object state tracked while walking a content stream.
#[derive(Debug)]
struct TextState {
    in_text: bool,
    font: Vec<u8>,
    font_size: f32,
    matrix: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font: Vec::new(),
            font_size: 12.0,
            matrix: TextMatrix::default(),
        }
    }
}

/// Text matrix tracking the current position in page space.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.f -= DEFAULT_LEADING * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Check if a character belongs to a script written without word spaces
/// (Chinese ideographs, kana). Hangul is excluded: Korean uses spaces.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code)        // CJK Unified Ideographs
        || (0x3400..=0x4DBF).contains(&code) // CJK Extension A
        || (0x3040..=0x309F).contains(&code) // Hiragana
        || (0x30A0..=0x30FF).contains(&code) // Katakana
        || (0x3000..=0x303F).contains(&code) // CJK punctuation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_translate() {
        let mut m = TextMatrix::default();
        m.translate(72.0, 700.0);
        assert_eq!(m.position(), (72.0, 700.0));
        m.translate(0.0, -24.0);
        assert_eq!(m.position(), (72.0, 676.0));
    }

    #[test]
    fn test_matrix_set_absolute() {
        let mut m = TextMatrix::default();
        m.set(1.0, 0.0, 0.0, 1.0, 100.0, 500.0);
        assert_eq!(m.position(), (100.0, 500.0));
        assert!((m.scale() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_matrix_scaled_font() {
        let mut m = TextMatrix::default();
        m.set(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
        assert!((m.scale() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_span_width_estimate() {
        let span = TextSpan::new("abcd".to_string(), 10.0, 20.0, 12.0);
        assert!((span.width - 24.0).abs() < f32::EPSILON);
        assert!((span.right() - 34.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_spaceless_script() {
        assert!(is_spaceless_script_char('漢'));
        assert!(is_spaceless_script_char('あ'));
        assert!(!is_spaceless_script_char('a'));
        assert!(!is_spaceless_script_char('한')); // Hangul uses spaces
    }
}
