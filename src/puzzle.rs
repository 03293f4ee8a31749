//! Plain-text puzzle definitions and solution files.
//!
//! A puzzle lists one vehicle per line as `<id> <length> <x>,<y> <orientation>`, e.g. `S 2 2,3 right`.
//! A solution lists one move per line as `<step> <id> <distance> <direction>`, steps counting from 1.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use memchr::memchr;

use crate::board::Board;
use crate::config::PuzzleConfig;
use crate::error::{Error, Result};
use crate::geometry::{Cell, Orientation};
use crate::vehicle::{Move, Vehicle, VehicleId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VehicleRecord {
    pub id: VehicleId,
    pub length: i16,
    pub position: Cell,
    pub orientation: Orientation,
}

impl VehicleRecord {
    pub fn into_vehicle(self) -> Result<Vehicle> {
        Vehicle::new(self.id, self.length, self.position, self.orientation)
    }
}

pub fn parse(text: &str) -> Result<Vec<VehicleRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_line(i + 1, line))
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<VehicleRecord> {
    let fail = |reason: String| Error::Parse { line, reason };

    let mut fields = text.split_ascii_whitespace();
    let (Some(id), Some(length), Some(coords), Some(facing), None) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(fail(format!(
            "expected `<id> <length> <x>,<y> <orientation>`, got `{}`",
            text.trim()
        )));
    };

    let mut chars = id.chars();
    let id = match (chars.next(), chars.next()) {
        (Some(c), None) => VehicleId(c),
        _ => return Err(fail(format!("vehicle id `{id}` must be a single character"))),
    };

    let length = length
        .parse::<i16>()
        .map_err(|e| fail(format!("bad length `{length}`: {e}")))?;

    let Some(comma) = memchr(b',', coords.as_bytes()) else {
        return Err(fail(format!("position `{coords}` must look like `x,y`")));
    };
    let coord = |s: &str| {
        s.parse::<i16>()
            .map_err(|e| fail(format!("bad coordinate `{s}`: {e}")))
    };
    let position = Cell::new(coord(&coords[..comma])?, coord(&coords[comma + 1..])?);

    let orientation = facing
        .parse::<Orientation>()
        .map_err(|e| fail(e.to_string()))?;

    Ok(VehicleRecord {
        id,
        length,
        position,
        orientation,
    })
}

/// Builds a board from puzzle text. The puzzle must contain the special vehicle.
pub fn load(text: &str, config: PuzzleConfig) -> Result<Board> {
    let mut board = Board::new(config);
    for record in parse(text)? {
        board.add_vehicle(record.into_vehicle()?)?;
    }
    board.special()?;
    Ok(board)
}

pub fn load_file(path: impl AsRef<Path>, config: PuzzleConfig) -> Result<Board> {
    load(&fs::read_to_string(path)?, config)
}

pub fn write_solution<W: Write>(mut out: W, moves: &[Move]) -> Result<()> {
    for (i, mv) in moves.iter().enumerate() {
        writeln!(out, "{} {}", i + 1, mv)?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_solution(path: impl AsRef<Path>, moves: &[Move]) -> Result<()> {
    write_solution(BufWriter::new(File::create(path)?), moves)
}
