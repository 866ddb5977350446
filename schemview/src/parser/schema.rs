use serde::{Deserialize, Serialize};

/// A parsed legacy schematic. Built once per parse and replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchematicModel {
    pub title: String,
    pub date: String,
    pub revision: String,
    pub company: String,
    pub components: Vec<Component>,
    pub wires: Vec<Wire>,
    pub labels: Vec<Label>,
}

impl SchematicModel {
    /// True when nothing in the model contributes drawable geometry.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.wires.is_empty() && self.labels.is_empty()
    }
}

/// Integer world coordinate, as written in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub library: String,    // Device:R
    pub name: String,       // R1
    /// `None` when the block never supplied a `P` line.
    pub anchor: Option<Point>,
    pub fields: Vec<Field>,
}

impl Component {
    /// Text shown inside the component outline: name, then library, then `?`.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.library.is_empty() {
            &self.library
        } else {
            "?"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub index: u32,
    pub text: String,
    pub orientation: Orientation,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "H" => Some(Orientation::Horizontal),
            "V" => Some(Orientation::Vertical),
            _ => None,
        }
    }

    pub fn as_letter(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "H",
            Orientation::Vertical => "V",
        }
    }
}

/// A straight segment. Zero-length wires are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub start: Point,
    pub end: Point,
}

impl Wire {
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub position: Point,
    pub text: String,
    /// Raw angle code from the file; not validated.
    pub orientation: i64,
}
