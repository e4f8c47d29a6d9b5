//! Parser for the KStars constellation line-drawing description.
//!
//! `clines.dat` is a loosely structured, line-oriented format. A `C` line
//! opens a catalog section (the Western figures come first) and the next
//! `C` line opens a different sky culture, which ends our interest in the
//! file. Inside the section each constellation is framed by a pair of `#`
//! comment lines, and `M`/`D` records move or draw to a star named by its
//! HD identifier, like pen-plotter instructions.
//!
//! The parser performs one forward pass, appending to a global star table
//! in first-seen order and to a flat endpoint stream that pairs up into
//! drawable segments. Within one constellation an identifier always
//! resolves back to the slot it got on first use, so a figure can revisit
//! a star without duplicating it; the per-constellation bookkeeping is
//! reset at every boundary, so the same star in two constellations gets
//! two slots.

use log::warn;

use crate::catalog::StarCatalog;
use crate::error::Error;
use crate::output::SkyData;

/// Opens a catalog section; the second occurrence ends parsing.
const SECTION_MARKER: char = 'C';
/// Comment line; two in a row separate constellations.
const SEPARATOR: char = '#';
/// Record starting a new, disconnected segment.
const MOVE_RECORD: char = 'M';
/// Record continuing a line from the previous point.
const DRAW_RECORD: char = 'D';

/// Where the scan is relative to the Western-constellation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Still looking for the opening section marker.
    Before,
    /// Inside the section, records are live.
    Inside,
    /// A second section marker was seen; remaining input is ignored.
    Done,
}

/// What the previous line contributed to the segment stream.
///
/// Only a draw record chains: a `D` directly after another `D` re-emits
/// the earlier endpoint to close the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastAction {
    /// Previous line was a draw record resolving to this star index.
    Draw(usize),
    /// Anything else: move record, separator, blank, section marker.
    Other,
}

/// Stateful line scanner producing the star and segment tables.
#[derive(Debug)]
pub struct ClinesParser<'a> {
    catalog: &'a StarCatalog,
    /// Star positions in first-seen order across the whole file.
    stars: Vec<[f64; 2]>,
    /// Flat segment endpoints; pairs up two at a time.
    endpoints: Vec<usize>,
    /// Identifiers seen in the current constellation, in first-use order.
    constellation_ids: Vec<String>,
    /// Index of the current constellation's first star in `stars`.
    constellation_offset: usize,
    /// First character of the previously scanned in-section line.
    prev_char: Option<char>,
    last_action: LastAction,
    section: Section,
}

impl<'a> ClinesParser<'a> {
    pub fn new(catalog: &'a StarCatalog) -> Self {
        Self {
            catalog,
            stars: Vec::new(),
            endpoints: Vec::new(),
            constellation_ids: Vec::new(),
            constellation_offset: 0,
            prev_char: None,
            last_action: LastAction::Other,
            section: Section::Before,
        }
    }

    /// Scan one line of the description.
    pub fn process_line(&mut self, line: &str) -> Result<(), Error> {
        let first = line.chars().next();

        match self.section {
            Section::Done => return Ok(()),
            Section::Before => {
                if first == Some(SECTION_MARKER) {
                    self.section = Section::Inside;
                }
                return Ok(());
            }
            Section::Inside => {}
        }

        if first == Some(SECTION_MARKER) {
            // Next sky culture's section; the Western figures are complete.
            self.section = Section::Done;
            return Ok(());
        }

        if first == Some(SEPARATOR) && self.prev_char == Some(SEPARATOR) {
            // Doubled separator: constellation boundary. A lone comment
            // line separates nothing.
            self.constellation_ids.clear();
            self.constellation_offset = self.stars.len();
        }

        if first == Some(MOVE_RECORD) || first == Some(DRAW_RECORD) {
            self.process_record(first == Some(DRAW_RECORD), line)?;
        } else {
            self.last_action = LastAction::Other;
        }

        self.prev_char = first;
        Ok(())
    }

    /// Resolve one move/draw record and emit its segment endpoints.
    fn process_record(&mut self, is_draw: bool, line: &str) -> Result<(), Error> {
        let id = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| Error::MalformedRecord {
                text: line.to_string(),
            })?;

        let index = match self.constellation_ids.iter().position(|seen| seen == id) {
            // Seen before in this constellation: reuse the slot assigned on
            // first use, relative to the constellation's starting offset.
            Some(position) => position + self.constellation_offset,
            None => {
                let star = self
                    .catalog
                    .lookup(id)
                    .ok_or_else(|| Error::StarNotFound(id.to_string()))?;
                self.stars.push([star.ra, star.dec]);
                self.constellation_ids.push(id.to_string());
                self.stars.len() - 1
            }
        };

        if is_draw {
            if let LastAction::Draw(prev) = self.last_action {
                // Consecutive draws chain into a polyline: close the new
                // pair with the previous endpoint before adding ours.
                self.endpoints.push(prev);
            }
            self.endpoints.push(index);
            self.last_action = LastAction::Draw(index);
        } else {
            self.endpoints.push(index);
            self.last_action = LastAction::Other;
        }

        Ok(())
    }

    /// Consume the parser and pair the endpoint stream into segments.
    pub fn finish(self) -> SkyData {
        let mut lines = Vec::with_capacity(self.endpoints.len() / 2);
        let mut chunks = self.endpoints.chunks_exact(2);
        for pair in &mut chunks {
            lines.push([pair[0], pair[1]]);
        }
        if let [dangling] = chunks.remainder() {
            warn!("Dropping unpaired segment endpoint {dangling} (malformed drawing data)");
        }

        SkyData {
            stars: self.stars,
            lines,
        }
    }
}

/// Parse a complete line-description text against `catalog`.
pub fn parse_clines(catalog: &StarCatalog, text: &str) -> Result<SkyData, Error> {
    let mut parser = ClinesParser::new(catalog);
    for line in text.lines() {
        parser.process_line(line)?;
    }
    Ok(parser.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StarCatalog;
    use std::io::Cursor;

    /// Build a catalog whose identifiers are "1".."n", spread over the sky.
    fn catalog(n: usize) -> StarCatalog {
        let mut text = String::from("id,hip,hd,hr,gl,bf,proper,ra,dec\n");
        for i in 1..=n {
            text.push_str(&format!("0,0,{i},0,,,,{},{}\n", i % 24, (i % 7) as i32 * 10 - 30));
        }
        StarCatalog::from_reader(Cursor::new(text.into_bytes())).unwrap()
    }

    fn parse(catalog: &StarCatalog, text: &str) -> SkyData {
        parse_clines(catalog, text).unwrap()
    }

    #[test]
    fn test_move_then_draw_makes_one_segment() {
        let catalog = catalog(2);
        let sky = parse(&catalog, "C\nM 1\nD 2\n");
        assert_eq!(sky.stars.len(), 2);
        assert_eq!(sky.lines, vec![[0, 1]]);
    }

    #[test]
    fn test_consecutive_draws_chain_into_pairs() {
        let catalog = catalog(3);
        let sky = parse(&catalog, "C\nM 1\nD 2\nD 3\n");
        assert_eq!(sky.lines, vec![[0, 1], [1, 2]]);
    }

    #[test]
    fn test_move_starts_a_disconnected_segment() {
        let catalog = catalog(4);
        let sky = parse(&catalog, "C\nM 1\nD 2\nM 3\nD 4\n");
        assert_eq!(sky.lines, vec![[0, 1], [2, 3]]);
    }

    #[test]
    fn test_revisited_star_reuses_its_slot() {
        let catalog = catalog(3);
        // A triangle: 1-2, 2-3, 3-1. The closing draw must come back to
        // slot 0 instead of appending a duplicate star.
        let sky = parse(&catalog, "C\nM 1\nD 2\nD 3\nD 1\n");
        assert_eq!(sky.stars.len(), 3);
        assert_eq!(sky.lines, vec![[0, 1], [1, 2], [2, 0]]);
    }

    #[test]
    fn test_doubled_separator_resets_deduplication() {
        let catalog = catalog(2);
        // The same two stars drawn in two constellations are four output
        // entries; the dedup scope is the constellation, not the file.
        let sky = parse(&catalog, "C\nM 1\nD 2\n#\n#\nM 1\nD 2\n");
        assert_eq!(sky.stars.len(), 4);
        assert_eq!(sky.lines, vec![[0, 1], [2, 3]]);
    }

    #[test]
    fn test_single_separator_does_not_reset() {
        let catalog = catalog(2);
        let sky = parse(&catalog, "C\nM 1\nD 2\n#\nM 1\nD 2\n");
        assert_eq!(sky.stars.len(), 2);
        assert_eq!(sky.lines, vec![[0, 1], [0, 1]]);
    }

    #[test]
    fn test_offset_survives_earlier_constellations() {
        let catalog = catalog(4);
        // Second constellation revisits its own first star; the reused
        // index must land on slot 2, not slot 0.
        let sky = parse(&catalog, "C\nM 1\nD 2\n#\n#\nM 3\nD 4\nD 3\n");
        assert_eq!(sky.stars.len(), 4);
        assert_eq!(sky.lines, vec![[0, 1], [2, 3], [3, 2]]);
    }

    #[test]
    fn test_records_before_section_are_ignored() {
        let catalog = catalog(2);
        // "9" is unknown, but the record sits before the section marker.
        let sky = parse(&catalog, "M 9\nC\nM 1\nD 2\n");
        assert_eq!(sky.lines, vec![[0, 1]]);
    }

    #[test]
    fn test_second_marker_ends_parsing() {
        let catalog = catalog(2);
        let sky = parse(&catalog, "C\nM 1\nD 2\nC\nM 9\nD 8\n");
        assert_eq!(sky.stars.len(), 2);
        assert_eq!(sky.lines, vec![[0, 1]]);
    }

    #[test]
    fn test_unknown_star_is_fatal() {
        let catalog = catalog(1);
        let err = parse_clines(&catalog, "C\nM 1\nD 9\n").unwrap_err();
        assert!(matches!(err, Error::StarNotFound(ref id) if id == "9"));
    }

    #[test]
    fn test_record_without_identifier_is_fatal() {
        let catalog = catalog(1);
        let err = parse_clines(&catalog, "C\nM\n").unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { .. }));
    }

    #[test]
    fn test_draw_after_comment_does_not_chain() {
        let catalog = catalog(2);
        // The draw after the lone comment has no partner, so its endpoint
        // is dropped when pairing.
        let sky = parse(&catalog, "C\nM 1\nD 2\n#\nD 1\n");
        assert_eq!(sky.stars.len(), 2);
        assert_eq!(sky.lines, vec![[0, 1]]);
    }

    #[test]
    fn test_segment_list_is_always_paired() {
        let catalog = catalog(6);
        let sky = parse(
            &catalog,
            "C\nM 1\nD 2\nD 3\n#\n#\nM 4\nD 5\nD 6\nD 4\n#\n#\nM 1\nD 6\n",
        );
        for pair in &sky.lines {
            assert!(pair[0] < sky.stars.len());
            assert!(pair[1] < sky.stars.len());
        }
        // 1-2, 2-3, 4-5, 5-6, 6-4, 1-6 with fresh slots per constellation.
        assert_eq!(sky.lines.len(), 6);
        assert_eq!(sky.stars.len(), 8);
    }

    #[test]
    fn test_empty_input_yields_empty_tables() {
        let catalog = catalog(1);
        let sky = parse(&catalog, "");
        assert!(sky.stars.is_empty());
        assert!(sky.lines.is_empty());
    }
}
