//! KiCad Legacy Schematic Parser (EESchema text format)
//!
//! Best-effort, single forward pass over the file. Every line is offered to a
//! table of independent [`LineMatcher`]s; the first matcher that claims the
//! line applies its change to the model and reports how many lines it
//! consumed. Lines nobody claims are skipped.
//!
//! Recognized constructs:
//! - `Title "…"`, `Date "…"`, `Rev "…"`, `Comp "…"` sheet metadata
//! - `$Comp` … `$EndComp` component blocks (`L`, `P` and `F` sub-lines)
//! - `Wire Wire Line` followed by a coordinate line
//! - `Text GLabel` global labels (coordinates and text inline)
//! - `#PWR<n>` power symbol references (recognized, no model entry yet)
//!
//! Parsing never fails. Malformed input yields a partially populated model.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::schema::*;

/// `F <index> "<text>" <H|V> <x> <y>`; trailing tokens (size, flags, justify) are ignored.
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"F (\d+) "([^"]*)" ([HV]) (\d+) (\d+)"#).expect("field pattern is valid")
});

static POWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#PWR(\d+)").expect("power pattern is valid"));

/// One entry of the parser's dispatch table.
pub trait LineMatcher: Sync {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Inspect `lines[idx]` (already trimmed). When the matcher claims the
    /// line it may mutate `model` and returns the number of lines consumed,
    /// which is always at least one.
    fn try_match(&self, lines: &[&str], idx: usize, model: &mut SchematicModel) -> Option<usize>;
}

// ============================================================================
// Matchers
// ============================================================================

/// Which metadata string a [`HeaderMatcher`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Title,
    Date,
    Revision,
    Company,
}

impl MetadataField {
    fn slot<'a>(&self, model: &'a mut SchematicModel) -> &'a mut String {
        match self {
            MetadataField::Title => &mut model.title,
            MetadataField::Date => &mut model.date,
            MetadataField::Revision => &mut model.revision,
            MetadataField::Company => &mut model.company,
        }
    }
}

/// `<Prefix> "<text>"` sheet metadata line.
#[derive(Debug, Clone, Copy)]
pub struct HeaderMatcher {
    pub prefix: &'static str,
    pub field: MetadataField,
}

impl LineMatcher for HeaderMatcher {
    fn name(&self) -> &'static str {
        self.prefix.trim_end()
    }

    fn try_match(&self, lines: &[&str], idx: usize, model: &mut SchematicModel) -> Option<usize> {
        let line = lines[idx];
        if !line.starts_with(self.prefix) {
            return None;
        }
        *self.field.slot(model) = quoted_after_prefix(line, self.prefix.len());
        Some(1)
    }
}

/// `$Comp` … `$EndComp` block.
#[derive(Debug, Clone, Copy)]
pub struct ComponentBlockMatcher;

impl LineMatcher for ComponentBlockMatcher {
    fn name(&self) -> &'static str {
        "$Comp"
    }

    fn try_match(&self, lines: &[&str], idx: usize, model: &mut SchematicModel) -> Option<usize> {
        if !lines[idx].starts_with("$Comp") {
            return None;
        }

        let mut component = Component::default();
        let mut cursor = idx + 1;
        while cursor < lines.len() && !lines[cursor].starts_with("$EndComp") {
            apply_component_line(&mut component, lines[cursor], cursor);
            cursor += 1;
        }
        if cursor == lines.len() {
            tracing::trace!(line = idx + 1, "component block runs to end of input");
        }

        model.components.push(component);
        // Include the `$EndComp` line when present.
        Some((cursor + 1).min(lines.len()) - idx)
    }
}

/// `Wire Wire Line` header plus the `x1 y1 x2 y2` line after it.
#[derive(Debug, Clone, Copy)]
pub struct WireMatcher;

impl LineMatcher for WireMatcher {
    fn name(&self) -> &'static str {
        "Wire Wire Line"
    }

    fn try_match(&self, lines: &[&str], idx: usize, model: &mut SchematicModel) -> Option<usize> {
        if !lines[idx].starts_with("Wire Wire Line") {
            return None;
        }
        let Some(coords) = lines.get(idx + 1) else {
            tracing::trace!(line = idx + 1, "wire header without coordinate line");
            return Some(1);
        };

        let parts: Vec<&str> = coords.split_whitespace().collect();
        if parts.len() >= 4 {
            match (
                parse_int(parts[0]),
                parse_int(parts[1]),
                parse_int(parts[2]),
                parse_int(parts[3]),
            ) {
                (Some(x1), Some(y1), Some(x2), Some(y2)) => model.wires.push(Wire {
                    start: Point::new(x1, y1),
                    end: Point::new(x2, y2),
                }),
                _ => tracing::trace!(line = idx + 2, "non-numeric wire coordinates"),
            }
        } else {
            tracing::trace!(line = idx + 2, tokens = parts.len(), "short wire coordinate line");
        }
        Some(2)
    }
}

/// `Text GLabel <x> <y> <orientation> <size> <shape> <text>` global label.
#[derive(Debug, Clone, Copy)]
pub struct GlobalLabelMatcher;

impl LineMatcher for GlobalLabelMatcher {
    fn name(&self) -> &'static str {
        "Text GLabel"
    }

    fn try_match(&self, lines: &[&str], idx: usize, model: &mut SchematicModel) -> Option<usize> {
        let line = lines[idx];
        if !line.starts_with("Text GLabel") {
            return None;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 5 {
            tracing::trace!(line = idx + 1, "global label with too few tokens");
            return Some(1);
        }
        match (parse_int(parts[2]), parse_int(parts[3]), parse_int(parts[4])) {
            (Some(x), Some(y), Some(orientation)) => model.labels.push(Label {
                position: Point::new(x, y),
                text: parts.get(7).map(|s| s.to_string()).unwrap_or_default(),
                orientation,
            }),
            _ => tracing::trace!(line = idx + 1, "non-numeric global label fields"),
        }
        Some(1)
    }
}

/// Lines referencing a `#PWR<n>` power symbol. Recognized but produces no
/// model entry; power symbols are not given a dedicated representation.
#[derive(Debug, Clone, Copy)]
pub struct PowerSymbolMatcher;

impl LineMatcher for PowerSymbolMatcher {
    fn name(&self) -> &'static str {
        "#PWR"
    }

    fn try_match(&self, lines: &[&str], idx: usize, _model: &mut SchematicModel) -> Option<usize> {
        let caps = POWER_RE.captures(lines[idx])?;
        tracing::trace!(line = idx + 1, power = &caps[1], "power symbol reference");
        Some(1)
    }
}

/// Dispatch order; the first matcher to claim a line wins.
pub static DEFAULT_MATCHERS: &[&dyn LineMatcher] = &[
    &HeaderMatcher { prefix: "Title ", field: MetadataField::Title },
    &HeaderMatcher { prefix: "Date ", field: MetadataField::Date },
    &HeaderMatcher { prefix: "Rev ", field: MetadataField::Revision },
    &HeaderMatcher { prefix: "Comp ", field: MetadataField::Company },
    &ComponentBlockMatcher,
    &WireMatcher,
    &GlobalLabelMatcher,
    &PowerSymbolMatcher,
];

// ============================================================================
// Parser
// ============================================================================

/// Parser for KiCad 4-5 legacy schematics.
pub struct LegacyParser<'m> {
    matchers: &'m [&'m dyn LineMatcher],
}

impl Default for LegacyParser<'static> {
    fn default() -> Self {
        Self { matchers: DEFAULT_MATCHERS }
    }
}

impl<'m> LegacyParser<'m> {
    /// Parser with a custom dispatch table.
    pub fn with_matchers(matchers: &'m [&'m dyn LineMatcher]) -> Self {
        Self { matchers }
    }

    /// Parse legacy schematic text. Total: unrecognized lines are skipped.
    pub fn parse(&self, content: &str) -> SchematicModel {
        let lines: Vec<&str> = content.lines().map(str::trim).collect();
        let mut model = SchematicModel::default();
        let mut skipped = 0usize;
        let mut line_idx = 0;

        while line_idx < lines.len() {
            let claimed = self.matchers.iter().find_map(|m| {
                m.try_match(&lines, line_idx, &mut model)
                    .map(|consumed| (m.name(), consumed))
            });

            match claimed {
                Some((matcher, consumed)) => {
                    tracing::trace!(line = line_idx + 1, matcher, consumed, "matched");
                    line_idx += consumed.max(1);
                }
                None => {
                    if !lines[line_idx].is_empty() {
                        skipped += 1;
                    }
                    line_idx += 1;
                }
            }
        }

        tracing::debug!(
            lines = lines.len(),
            skipped,
            components = model.components.len(),
            wires = model.wires.len(),
            labels = model.labels.len(),
            "parsed legacy schematic"
        );
        model
    }
}

/// Parse legacy schematic text with the default dispatch table.
pub fn parse(content: &str) -> SchematicModel {
    LegacyParser::default().parse(content)
}

// ============================================================================
// Helpers
// ============================================================================

/// Text between the opening quote right after `prefix` and the final
/// character of the line. Empty when the line is too short to hold both.
fn quoted_after_prefix(line: &str, prefix_len: usize) -> String {
    let start = prefix_len + 1;
    let end = line.len().saturating_sub(1);
    line.get(start..end).unwrap_or_default().to_string()
}

fn apply_component_line(component: &mut Component, line: &str, line_idx: usize) {
    if line.starts_with("L ") {
        // L Library:Symbol Reference
        let parts: Vec<&str> = line.split(' ').collect();
        component.library = parts.get(1).map(|s| s.to_string()).unwrap_or_default();
        component.name = parts.get(2).map(|s| s.to_string()).unwrap_or_default();
    } else if line.starts_with("P ") {
        // P X Y
        let parts: Vec<&str> = line.split(' ').collect();
        component.anchor = match (
            parts.get(1).and_then(|s| parse_int(s)),
            parts.get(2).and_then(|s| parse_int(s)),
        ) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => {
                tracing::trace!(line = line_idx + 1, "unreadable component position");
                None
            }
        };
    } else if line.starts_with("F ") {
        match parse_field(line) {
            Some(field) => component.fields.push(field),
            None => tracing::trace!(line = line_idx + 1, "dropping malformed field line"),
        }
    }
}

fn parse_field(line: &str) -> Option<Field> {
    let caps = FIELD_RE.captures(line)?;
    Some(Field {
        index: caps[1].parse().ok()?,
        text: caps[2].to_string(),
        orientation: Orientation::from_letter(&caps[3])?,
        position: Point::new(caps[4].parse().ok()?, caps[5].parse().ok()?),
    })
}

fn parse_int(token: &str) -> Option<i64> {
    token.parse::<i64>().ok()
}
