//! Table detection from positioned text spans.
//!
//! Stream-mode detection in the spirit of Camelot: tables are found from
//! text alignment alone, no ruling lines required. Spans are grouped into
//! rows by baseline, column edges are derived from left text edges that
//! repeat across rows, and contiguous well-aligned row runs become tables.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::options::DetectorConfig;
use crate::spans::TextSpan;
use crate::table::{Table, TableCell, TableRow};

/// Granularity for bucketing X positions when counting column edges.
const EDGE_BUCKET: f32 = 5.0;

/// Tolerance when matching a span to a column edge, in points.
const ALIGN_TOLERANCE: f32 = 5.0;

/// Slack allowed for spans starting slightly before their column edge.
const COLUMN_SLACK: f32 = 10.0;

/// Detects tables in the text spans of a page.
pub struct TableDetector {
    config: DetectorConfig,
}

/// Spans sharing one baseline, sorted by X.
#[derive(Debug, Clone)]
struct Line {
    y: f32,
    spans: Vec<TextSpan>,
}

impl TableDetector {
    /// Create a detector with default thresholds.
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Create a detector with custom thresholds.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Detect all tables among the given spans, top to bottom.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<Table> {
        if spans.len() < self.config.min_rows * self.config.min_columns {
            return Vec::new();
        }

        let lines = self.group_rows(spans);
        log::debug!("detector: {} spans grouped into {} rows", spans.len(), lines.len());
        if lines.len() < self.config.min_rows {
            return Vec::new();
        }

        let edges = self.column_edges(&lines);
        log::debug!("detector: column edges at {:?}", edges);
        if edges.len() < self.config.min_columns {
            return Vec::new();
        }

        let mut tables = Vec::new();
        for (start, end) in self.aligned_regions(&lines, &edges) {
            let region = &lines[start..=end];

            // Re-derive edges from the region alone; the page-wide set may
            // include edges from unrelated text.
            let region_edges = self.column_edges(region);
            if region_edges.len() < self.config.min_columns {
                continue;
            }
            if region_edges.len() > self.config.max_columns {
                log::debug!(
                    "detector: skipping region with {} columns (max {})",
                    region_edges.len(),
                    self.config.max_columns
                );
                continue;
            }
            if self.is_bullet_list(region, &region_edges) {
                log::debug!("detector: skipping region, looks like a list");
                continue;
            }

            let right = region
                .iter()
                .flat_map(|l| l.spans.iter())
                .map(TextSpan::right)
                .fold(0.0_f32, f32::max);

            tables.push(self.build_table(region, &region_edges, right));
        }

        log::debug!("detector: {} tables found", tables.len());
        tables
    }

    /// Group spans into rows by baseline, top to bottom.
    fn group_rows(&self, spans: &[TextSpan]) -> Vec<Line> {
        let mut sorted = spans.to_vec();
        sorted.sort_by(|a, b| {
            b.y.partial_cmp(&a.y)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut lines: Vec<Line> = Vec::new();
        for span in sorted {
            let tolerance = span.font_size * self.config.row_tolerance;
            match lines.last_mut() {
                Some(line) if (span.y - line.y).abs() <= tolerance => {
                    line.spans.push(span);
                }
                _ => lines.push(Line {
                    y: span.y,
                    spans: vec![span],
                }),
            }
        }

        // Settle each row's Y on the average of its members.
        for line in &mut lines {
            line.y = line.spans.iter().map(|s| s.y).sum::<f32>() / line.spans.len() as f32;
        }
        lines
    }

    /// Derive column edges: left text edges that repeat across rows.
    ///
    /// Rows with two or more spans are the best evidence; when too few
    /// exist, every row contributes. Each row votes once per edge bucket,
    /// and buckets closer together than the configured gap are merged.
    fn column_edges(&self, lines: &[Line]) -> Vec<f32> {
        if lines.is_empty() {
            return Vec::new();
        }

        let multi: Vec<&Line> = lines.iter().filter(|l| l.spans.len() >= 2).collect();
        let voters: Vec<&Line> = if multi.len() >= self.config.min_rows {
            multi
        } else {
            lines.iter().collect()
        };

        let mut counts: HashMap<i32, usize> = HashMap::new();
        for line in &voters {
            let buckets: HashSet<i32> = line
                .spans
                .iter()
                .map(|s| (s.x / EDGE_BUCKET).round() as i32)
                .collect();
            for bucket in buckets {
                *counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_hits = ((voters.len() as f32 * self.config.min_alignment) as usize).max(2);
        let mut edges: Vec<f32> = counts
            .into_iter()
            .filter(|(_, count)| *count >= min_hits)
            .map(|(bucket, _)| bucket as f32 * EDGE_BUCKET)
            .collect();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }
        merged
    }

    /// Find contiguous runs of rows that align with the column edges.
    fn aligned_regions(&self, lines: &[Line], edges: &[f32]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for (i, line) in lines.iter().enumerate() {
            if self.alignment_score(line, edges) >= self.config.min_alignment {
                start.get_or_insert(i);
            } else if let Some(s) = start.take() {
                if i - s >= self.config.min_rows {
                    regions.push((s, i - 1));
                }
            }
        }
        if let Some(s) = start {
            if lines.len() - s >= self.config.min_rows {
                regions.push((s, lines.len() - 1));
            }
        }
        regions
    }

    /// Fraction of a row's spans sitting on a column edge.
    fn alignment_score(&self, line: &Line, edges: &[f32]) -> f32 {
        if line.spans.is_empty() || edges.is_empty() {
            return 0.0;
        }
        let aligned = line
            .spans
            .iter()
            .filter(|span| edges.iter().any(|edge| (span.x - edge).abs() <= ALIGN_TOLERANCE))
            .count();
        aligned as f32 / line.spans.len() as f32
    }

    /// Check whether a region is a bulleted or numbered list rather than a
    /// table.
    ///
    /// A list renders its marker and its text as separate spans at two X
    /// positions, which looks exactly like a two-column table. Bare numbers
    /// are deliberately NOT treated as markers: numeric first columns are
    /// ordinary table data.
    fn is_bullet_list(&self, lines: &[Line], edges: &[f32]) -> bool {
        if edges.len() < 2 || lines.is_empty() {
            return false;
        }

        let mut bullets = 0;
        let mut ordinals = 0;
        for line in lines {
            let first = line.spans.iter().min_by(|a, b| {
                a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some(span) = first {
                let text = span.text.trim();
                if is_bullet_marker(text) {
                    bullets += 1;
                } else if is_ordinal_marker(text) {
                    ordinals += 1;
                }
            }
        }

        let bullet_ratio = bullets as f32 / lines.len() as f32;
        if bullet_ratio >= 0.5 {
            return true;
        }

        // Ordinal markers only disqualify two-column regions; wider tables
        // with a numbered first column are real tables.
        let ordinal_ratio = (bullets + ordinals) as f32 / lines.len() as f32;
        edges.len() == 2 && ordinal_ratio >= 0.5
    }

    /// Assemble a rectangular table from a region. Grid positions with no
    /// spans become missing cells.
    fn build_table(&self, lines: &[Line], edges: &[f32], right: f32) -> Table {
        let mut table = Table::new();

        for line in lines {
            let mut buckets: Vec<Vec<&str>> = vec![Vec::new(); edges.len()];
            for span in &line.spans {
                let idx = column_for(span.x, edges, right);
                buckets[idx].push(span.text.trim());
            }

            let cells: Vec<TableCell> = buckets
                .into_iter()
                .map(|pieces| {
                    if pieces.is_empty() {
                        return TableCell::empty();
                    }
                    let text = clean_cell_text(&pieces.join(" "));
                    if text.is_empty() {
                        TableCell::empty()
                    } else {
                        TableCell::text(text)
                    }
                })
                .collect();

            table.add_row(TableRow::new(cells));
        }

        table
    }
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Find which column a span belongs to based on its left edge.
fn column_for(x: f32, edges: &[f32], right: f32) -> usize {
    for (i, &edge) in edges.iter().enumerate() {
        let end = edges.get(i + 1).copied().unwrap_or(right + 100.0);
        if x >= edge - COLUMN_SLACK && x < end - COLUMN_SLACK {
            return i;
        }
    }

    // No range matched; fall back to the closest edge.
    edges
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (x - **a)
                .abs()
                .partial_cmp(&(x - **b).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Normalize cell text: NFC, runs of spaces collapsed, ends trimmed.
fn clean_cell_text(raw: &str) -> String {
    static SPACE_RUN: OnceLock<Regex> = OnceLock::new();
    let re = SPACE_RUN.get_or_init(|| Regex::new(r"[ ]{2,}").expect("static regex"));
    let collapsed = re.replace_all(raw.trim(), " ");
    collapsed.nfc().collect()
}

/// Check if text is a bullet marker.
fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text,
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "□" | "◆" | "➤"
    )
}

/// Check if text is an ordinal list marker: "1.", "12)", "a.", "B)".
/// Bare numbers do not count.
fn is_ordinal_marker(text: &str) -> bool {
    let mut head: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let tail = match head.pop() {
        Some(c) => c,
        None => return false,
    };
    if (tail != '.' && tail != ')') || head.is_empty() {
        return false;
    }

    head.iter().all(|c| c.is_ascii_digit()) || (head.len() == 1 && head[0].is_alphabetic())
}
