//! Positioned text and ruling lines from a page's content stream.
//!
//! Only what table detection needs is interpreted: the graphics and text
//! matrices, text-showing operators, and axis-aligned path segments that are
//! actually painted. Glyph advances are not tracked, so a fragment's
//! position is where its string starts.

use lopdf::content::Operation;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

use crate::application::ports::TableExtractionError;

/// Gap inside a `TJ` array (thousandths of an em) treated as a word break.
const TJ_WORD_GAP: f32 = -200.0;
/// Segments shorter than this are treated as dots, not rules.
const MIN_EDGE_LENGTH: f32 = 2.0;
/// Slack when deciding whether a segment is axis aligned.
const AXIS_TOLERANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(tx: f32, ty: f32) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Matrix::IDENTITY
        }
    }

    /// `self × other`, so `self` is applied first.
    pub fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    fn from_operands(operands: &[Object]) -> Option<Matrix> {
        let values = numbers(operands, 6)?;
        Some(Matrix {
            a: values[0],
            b: values[1],
            c: values[2],
            d: values[3],
            e: values[4],
            f: values[5],
        })
    }
}

/// A run of text at its starting point, in page space (y grows upward).
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An axis-aligned ruling line. `position` is the y of a horizontal edge or
/// the x of a vertical one; `start..end` is its extent along the other axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub orientation: Orientation,
    pub position: f32,
    pub start: f32,
    pub end: f32,
}

impl Edge {
    fn between(from: (f32, f32), to: (f32, f32)) -> Option<Edge> {
        let (x0, y0) = from;
        let (x1, y1) = to;

        if (y0 - y1).abs() <= AXIS_TOLERANCE && (x1 - x0).abs() >= MIN_EDGE_LENGTH {
            Some(Edge {
                orientation: Orientation::Horizontal,
                position: (y0 + y1) / 2.0,
                start: x0.min(x1),
                end: x0.max(x1),
            })
        } else if (x0 - x1).abs() <= AXIS_TOLERANCE && (y1 - y0).abs() >= MIN_EDGE_LENGTH {
            Some(Edge {
                orientation: Orientation::Vertical,
                position: (x0 + x1) / 2.0,
                start: y0.min(y1),
                end: y0.max(y1),
            })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub fragments: Vec<TextFragment>,
    pub edges: Vec<Edge>,
}

impl PageLayout {
    /// Fragments in reading order joined by spaces.
    pub fn flattened_text(&self) -> String {
        let mut fragments: Vec<&TextFragment> = self.fragments.iter().collect();
        fragments.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));
        fragments
            .iter()
            .map(|fragment| fragment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Interprets the content stream of `page_id`.
pub fn read_page_layout(
    doc: &Document,
    page_id: ObjectId,
) -> Result<PageLayout, TableExtractionError> {
    let content = doc
        .get_and_decode_page_content(page_id)
        .map_err(|e| TableExtractionError::Content(e.to_string()))?;

    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| TableExtractionError::Content(e.to_string()))?;
    let encodings: BTreeMap<Vec<u8>, _> = fonts
        .into_iter()
        .filter_map(|(name, font)| font.get_font_encoding(doc).ok().map(|enc| (name, enc)))
        .collect();

    let mut interpreter = Interpreter::default();
    for operation in &content.operations {
        interpreter.step(operation, |font, bytes| {
            font.and_then(|name| encodings.get(name))
                .and_then(|encoding| Document::decode_text(encoding, bytes).ok())
                .unwrap_or_else(|| latin1(bytes))
        });
    }

    Ok(interpreter.layout)
}

#[derive(Default)]
struct Interpreter {
    layout: PageLayout,
    ctm: Matrix,
    saved: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    font: Option<Vec<u8>>,
    current_point: Option<(f32, f32)>,
    subpath_start: Option<(f32, f32)>,
    pending: Vec<Edge>,
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

impl Interpreter {
    fn step<D>(&mut self, operation: &Operation, decode: D)
    where
        D: Fn(Option<&[u8]>, &[u8]) -> String,
    {
        let operands = operation.operands.as_slice();

        match operation.operator.as_str() {
            "q" => self.saved.push(self.ctm),
            "Q" => {
                if let Some(ctm) = self.saved.pop() {
                    self.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.ctm = m.then(&self.ctm);
                }
            }
            "BT" => {
                self.text_matrix = Matrix::IDENTITY;
                self.line_matrix = Matrix::IDENTITY;
            }
            "Tf" => {
                self.font = operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .map(|name| name.to_vec());
            }
            "TL" => {
                if let Some(values) = numbers(operands, 1) {
                    self.leading = values[0];
                }
            }
            "Td" => {
                if let Some(values) = numbers(operands, 2) {
                    self.move_line(values[0], values[1]);
                }
            }
            "TD" => {
                if let Some(values) = numbers(operands, 2) {
                    self.leading = -values[1];
                    self.move_line(values[0], values[1]);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = decode(self.font.as_deref(), bytes);
                    self.show(text);
                }
            }
            "'" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = decode(self.font.as_deref(), bytes);
                    self.show(text);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    let text = decode(self.font.as_deref(), bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let mut text = String::new();
                    for item in items {
                        match item {
                            Object::String(bytes, _) => {
                                text.push_str(&decode(self.font.as_deref(), bytes))
                            }
                            other => {
                                if other.as_float().is_ok_and(|gap| gap <= TJ_WORD_GAP) {
                                    text.push(' ');
                                }
                            }
                        }
                    }
                    self.show(text);
                }
            }
            "m" => {
                if let Some(values) = numbers(operands, 2) {
                    let point = self.ctm.apply(values[0], values[1]);
                    self.current_point = Some(point);
                    self.subpath_start = Some(point);
                }
            }
            "l" => {
                if let Some(values) = numbers(operands, 2) {
                    let point = self.ctm.apply(values[0], values[1]);
                    if let Some(from) = self.current_point {
                        self.pending.extend(Edge::between(from, point));
                    }
                    self.current_point = Some(point);
                }
            }
            "h" => {
                if let (Some(from), Some(to)) = (self.current_point, self.subpath_start) {
                    self.pending.extend(Edge::between(from, to));
                    self.current_point = Some(to);
                }
            }
            "re" => {
                if let Some(values) = numbers(operands, 4) {
                    let (x, y, w, h) = (values[0], values[1], values[2], values[3]);
                    let corners = [
                        self.ctm.apply(x, y),
                        self.ctm.apply(x + w, y),
                        self.ctm.apply(x + w, y + h),
                        self.ctm.apply(x, y + h),
                    ];
                    for i in 0..corners.len() {
                        let next = corners[(i + 1) % corners.len()];
                        self.pending.extend(Edge::between(corners[i], next));
                    }
                    self.current_point = Some(corners[0]);
                    self.subpath_start = Some(corners[0]);
                }
            }
            "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => {
                self.layout.edges.append(&mut self.pending);
                self.current_point = None;
                self.subpath_start = None;
            }
            // Clipping paths end with `n`; they are not drawn.
            "n" => {
                self.pending.clear();
                self.current_point = None;
                self.subpath_start = None;
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translate(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn show(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        let (x, y) = self.text_matrix.then(&self.ctm).apply(0.0, 0.0);
        self.layout.fragments.push(TextFragment { x, y, text });
    }
}

fn numbers(operands: &[Object], count: usize) -> Option<Vec<f32>> {
    if operands.len() < count {
        return None;
    }
    operands[..count]
        .iter()
        .map(|operand| operand.as_float().ok())
        .collect()
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
