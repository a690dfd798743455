//! Page text reconstruction.
//!
//! Walks a page's content stream through a reduced PDF text-state machine,
//! collects positioned [`TextSpan`]s, then folds spans sharing a baseline
//! into lines. The result is plain text: one line per baseline, top of the
//! page first, spans left to right. No column or table detection happens
//! here.
//!
//! ```text
//! content ops  ->  TextSpan[]  ->  TextLine[]  ->  String
//!                  page_spans      group_lines     page_text
//! ```

use super::backend::{ContentOp, Operand, PageId, PdfBackend};
use crate::PdfError;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A run of text shown at one position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
}

/// Spans sharing (approximately) the same baseline, sorted left to right.
#[derive(Debug, Clone, Default)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
    pub y: f32,
}

impl TextLine {
    /// Join the spans, inserting a space wherever two spans do not touch.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut prev_end: Option<f32> = None;

        for span in &self.spans {
            if let Some(end) = prev_end {
                let touching = span.x - end < MIN_WORD_GAP;
                if !touching && !out.ends_with(' ') && !span.text.starts_with(' ') {
                    out.push(' ');
                }
            }
            out.push_str(&span.text);
            prev_end = Some(span.x + span.width);
        }

        out
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Spans whose baselines differ by no more than this share a line.
const Y_TOLERANCE: f32 = 1.0;

/// Approximate glyph width as a fraction of the font size. Glyph metrics are
/// not consulted, so this only needs to be good enough to spot word gaps.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Horizontal gap (points) at which two spans are treated as separate words.
const MIN_WORD_GAP: f32 = 1.5;

/// A `TJ` kerning step wider than this fraction of a glyph reads as a space.
const TJ_SPACE_FRACTION: f32 = 0.3;

const IDENTITY_MATRIX: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

// ---------------------------------------------------------------------------
// Internal: text-state machine
// ---------------------------------------------------------------------------

/// `a × b` for PDF matrices in `[a b c d e f]` row-vector form.
fn multiply(a: &[f32; 6], b: &[f32; 6]) -> [f32; 6] {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
        a[4] * b[0] + a[5] * b[2] + b[4],
        a[4] * b[1] + a[5] * b[3] + b[5],
    ]
}

fn matrix_operand(op: &ContentOp) -> Option<[f32; 6]> {
    let vals: Vec<f32> = (0..6).filter_map(|i| op.number(i)).collect();
    <[f32; 6]>::try_from(vals).ok()
}

#[derive(Debug, Clone)]
struct TextState {
    /// Current transformation matrix, text space excluded.
    ctm: [f32; 6],
    font_key: Vec<u8>,
    font_size: f32,
    text_matrix: [f32; 6],
    line_matrix: [f32; 6],
    horiz_scale: f32,
    char_spacing: f32,
    word_spacing: f32,
    text_rise: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY_MATRIX,
            font_key: Vec::new(),
            font_size: 0.0,
            text_matrix: IDENTITY_MATRIX,
            line_matrix: IDENTITY_MATRIX,
            horiz_scale: 1.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            text_rise: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    /// Text matrix combined with the CTM: text space to page space.
    fn rendering_matrix(&self) -> [f32; 6] {
        multiply(&self.text_matrix, &self.ctm)
    }

    /// Page-space position of the current glyph origin, rise included.
    fn origin(&self) -> (f32, f32) {
        let m = self.rendering_matrix();
        (
            self.text_rise * m[2] + m[4],
            self.text_rise * m[3] + m[5],
        )
    }

    /// Font size in page space.
    fn effective_font_size(&self) -> f32 {
        let m = self.rendering_matrix();
        (self.font_size * m[2].hypot(m[3])).abs()
    }

    fn glyph_width(&self) -> f32 {
        self.font_size * APPROX_CHAR_WIDTH_RATIO * self.horiz_scale
    }

    fn advance_x(&mut self, dx: f32) {
        self.text_matrix[4] += dx * self.text_matrix[0];
        self.text_matrix[5] += dx * self.text_matrix[1];
    }

    /// `Td`: translate the line matrix and restart the text matrix from it.
    fn translate_line(&mut self, tx: f32, ty: f32) {
        let m = self.line_matrix;
        self.line_matrix[4] = m[0] * tx + m[2] * ty + m[4];
        self.line_matrix[5] = m[1] * tx + m[3] * ty + m[5];
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.translate_line(0.0, -self.leading);
    }

    /// Move past `text` along the baseline.
    fn advance_after_show(&mut self, text: &str) {
        let glyph = self.glyph_width();
        let dx: f32 = text
            .chars()
            .map(|ch| {
                let word = if ch == ' ' { self.word_spacing } else { 0.0 };
                glyph + self.char_spacing + word
            })
            .sum();
        self.advance_x(dx);
    }
}

// ---------------------------------------------------------------------------
// Public API: span extraction
// ---------------------------------------------------------------------------

/// Walk one page's content stream and collect its text spans.
///
/// Handles `q`, `Q`, `cm`, `BT`, `Tf`, `Tm`, `Td`, `TD`, `T*`, `TL`, `Tc`,
/// `Tw`, `Tz`, `Ts`, `Tj`, `TJ`, `'` and `"`. Every other operator is ignored.
pub fn page_spans(backend: &dyn PdfBackend, page: PageId) -> Result<Vec<TextSpan>, PdfError> {
    let ops = backend.page_operations(page)?;
    Ok(spans_from_ops(&ops, |font, bytes| backend.decode_text(page, font, bytes)))
}

fn spans_from_ops<F>(ops: &[ContentOp], decode: F) -> Vec<TextSpan>
where
    F: Fn(&[u8], &[u8]) -> String,
{
    let mut state = TextState::default();
    let mut saved: Vec<TextState> = Vec::new();
    let mut spans = Vec::new();

    for op in ops {
        match op.operator.as_str() {
            "q" => saved.push(state.clone()),
            "Q" => {
                if let Some(mut restored) = saved.pop() {
                    restored.text_matrix = state.text_matrix;
                    restored.line_matrix = state.line_matrix;
                    state = restored;
                }
            }
            "cm" => {
                if let Some(matrix) = matrix_operand(op) {
                    state.ctm = multiply(&matrix, &state.ctm);
                }
            }
            "BT" => {
                state.text_matrix = IDENTITY_MATRIX;
                state.line_matrix = IDENTITY_MATRIX;
            }
            "Tf" => {
                if let (Some(Operand::Name(key)), Some(size)) = (op.operands.first(), op.number(1)) {
                    state.font_key = key.clone();
                    state.font_size = size;
                }
            }
            "Tm" => {
                if let Some(matrix) = matrix_operand(op) {
                    state.text_matrix = matrix;
                    state.line_matrix = matrix;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    state.translate_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                    state.leading = -ty;
                    state.translate_line(tx, ty);
                }
            }
            "T*" => state.next_line(),
            "TL" => {
                if let Some(v) = op.number(0) {
                    state.leading = v;
                }
            }
            "Tc" => {
                if let Some(v) = op.number(0) {
                    state.char_spacing = v;
                }
            }
            "Tw" => {
                if let Some(v) = op.number(0) {
                    state.word_spacing = v;
                }
            }
            "Tz" => {
                if let Some(v) = op.number(0) {
                    state.horiz_scale = v / 100.0;
                }
            }
            "Ts" => {
                if let Some(v) = op.number(0) {
                    state.text_rise = v;
                }
            }
            "Tj" => {
                if let Some(Operand::Str(bytes)) = op.operands.first() {
                    let text = decode(&state.font_key, bytes);
                    show_text(text, &mut state, &mut spans);
                }
            }
            "'" => {
                state.next_line();
                if let Some(Operand::Str(bytes)) = op.operands.first() {
                    let text = decode(&state.font_key, bytes);
                    show_text(text, &mut state, &mut spans);
                }
            }
            "\"" => {
                if let (Some(aw), Some(ac), Some(Operand::Str(bytes))) =
                    (op.number(0), op.number(1), op.operands.get(2))
                {
                    state.word_spacing = aw;
                    state.char_spacing = ac;
                    state.next_line();
                    let text = decode(&state.font_key, bytes);
                    show_text(text, &mut state, &mut spans);
                }
            }
            "TJ" => {
                if let Some(Operand::Array(items)) = op.operands.first() {
                    show_tj_array(items, &decode, &mut state, &mut spans);
                }
            }
            _ => {}
        }
    }

    spans
}

fn show_text(text: String, state: &mut TextState, spans: &mut Vec<TextSpan>) {
    if text.is_empty() {
        return;
    }
    let ((x, y), font_size) = (state.origin(), state.effective_font_size());
    state.advance_after_show(&text);
    let width = state.origin().0 - x;
    spans.push(TextSpan {
        text,
        x,
        y,
        width,
        font_size,
    });
}

/// `TJ` mixes strings with kerning steps in thousandths of text space.
/// Negative steps move right; a wide one becomes a space in the span. The
/// span starts at its first glyph, so leading steps only move it.
fn show_tj_array<F>(items: &[Operand], decode: &F, state: &mut TextState, spans: &mut Vec<TextSpan>)
where
    F: Fn(&[u8], &[u8]) -> String,
{
    let mut start: Option<((f32, f32), f32)> = None;
    let mut buf = String::new();

    for item in items {
        match item {
            Operand::Str(bytes) => {
                let fragment = decode(&state.font_key, bytes);
                if start.is_none() && !fragment.is_empty() {
                    start = Some((state.origin(), state.effective_font_size()));
                }
                state.advance_after_show(&fragment);
                buf.push_str(&fragment);
            }
            other => {
                if let Some(adj) = other.as_f32() {
                    let dx = -adj / 1000.0 * state.font_size * state.horiz_scale;
                    let is_gap = dx > state.glyph_width() * TJ_SPACE_FRACTION;
                    if is_gap && !buf.is_empty() && !buf.ends_with(' ') {
                        buf.push(' ');
                    }
                    state.advance_x(dx);
                }
            }
        }
    }

    let text = buf.trim_end();
    if let (false, Some(((x, y), font_size))) = (text.is_empty(), start) {
        spans.push(TextSpan {
            text: text.to_string(),
            x,
            y,
            width: state.origin().0 - x,
            font_size,
        });
    }
}

// ---------------------------------------------------------------------------
// Public API: line assembly
// ---------------------------------------------------------------------------

/// Fold spans into lines, top of the page first.
pub fn group_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<TextLine> = Vec::new();
    for span in spans {
        let same_line = lines
            .last()
            .is_some_and(|line| (line.y - span.y).abs() <= Y_TOLERANCE);

        if let (true, Some(line)) = (same_line, lines.last_mut()) {
            line.spans.push(span);
        } else {
            lines.push(TextLine {
                y: span.y,
                spans: vec![span],
            });
        }
    }

    for line in &mut lines {
        line.spans.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    lines
}

/// Plain text of one page, lines joined with `\n`. `None` when the page
/// shows no visible text.
pub fn page_text(backend: &dyn PdfBackend, page: PageId) -> Result<Option<String>, PdfError> {
    let lines = group_lines(page_spans(backend, page)?);
    let text = lines
        .iter()
        .map(TextLine::text)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(if text.trim().is_empty() { None } else { Some(text) })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
