use anyhow::{Context, Result};
use bumpalo::Bump;
use regex::Regex;
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ParseSongError {
    #[error("expected `artist,title,comparator`, got `{0}`")]
    Malformed(String),

    #[error("invalid comparator `{value}`: {source}")]
    Comparator {
        value: String,
        source: std::num::ParseFloatError,
    },

    #[error("bad song pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/*
 * A song record. <comparator> is whatever metric the playlist is
 * ranked by (popularity, energy, ...).
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub artist: String,
    pub song: String,
    pub comparator: f64,
}

impl Song {
    pub fn new(artist: impl Into<String>, song: impl Into<String>, comparator: f64) -> Self {
        Song {
            artist: artist.into(),
            song: song.into(),
            comparator,
        }
    }

    /*
     * Playlist order : greatest comparator first, then title ascending.
     * Less means <self> is listed before <other>.
     */
    pub fn playlist_order(&self, other: &Song) -> Ordering {
        other
            .comparator
            .total_cmp(&self.comparator)
            .then_with(|| self.song.cmp(&other.song))
    }
}

/*
 * Display <artist>,<title>,<comparator>
 */
impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.artist, self.song, self.comparator)
    }
}

/*
 * Line parser, holds the compiled pattern so it is built once per input.
 */
pub struct SongParser {
    line: Regex,
}

impl SongParser {
    pub fn new() -> Result<Self, ParseSongError> {
        let line = Regex::new(r"^\s*([^,]*[^,\s])\s*,\s*([^,]*[^,\s])\s*,\s*(\S+)\s*$")?;
        Ok(SongParser { line })
    }

    pub fn parse_line(&self, line: &str) -> Result<Song, ParseSongError> {
        let captures = self
            .line
            .captures(line)
            .ok_or_else(|| ParseSongError::Malformed(line.to_string()))?;
        // All three groups are mandatory in the pattern
        let field = |i| captures.get(i).map_or("", |m| m.as_str());
        let raw = field(3);
        let comparator = raw.parse().map_err(|source| ParseSongError::Comparator {
            value: raw.to_string(),
            source,
        })?;
        Ok(Song::new(field(1), field(2), comparator))
    }
}

impl FromStr for Song {
    type Err = ParseSongError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SongParser::new()?.parse_line(s)
    }
}

/*
 * Parse songs from input, one per line : <artist>,<title>,<comparator>
 * Blank lines are skipped.
 *
 * <bump> is the arena the songs live in, list nodes borrow from it
 */
pub fn parse_songs<'a>(input: &str, bump: &'a Bump) -> Result<Vec<&'a Song>> {
    let parser = SongParser::new()?;
    let mut songs = Vec::new();
    for (i, l) in input.lines().enumerate() {
        if l.trim().is_empty() {
            continue;
        }
        let song = parser
            .parse_line(l)
            .with_context(|| format!("Failed to parse line {}", i + 1))?;
        let song: &'a Song = bump.alloc(song);
        songs.push(song);
    }
    debug!(count = songs.len(), "parsed songs");
    Ok(songs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line() {
        let song: Song = "Daft Punk , One More Time,0.87".parse().unwrap();
        assert_eq!(song, Song::new("Daft Punk", "One More Time", 0.87));
    }

    #[test]
    fn parse_rejects_bad_lines() {
        assert!(matches!(
            "no commas here".parse::<Song>(),
            Err(ParseSongError::Malformed(_))
        ));
        assert!(matches!(
            "Artist,Title,high".parse::<Song>(),
            Err(ParseSongError::Comparator { .. })
        ));
    }

    #[test]
    fn parse_input_into_arena() {
        let input = "A,x,3

B,y,5
";
        let bump = Bump::new();
        let songs = parse_songs(input, &bump).unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[1].artist, "B");
        assert_eq!(songs[1].comparator, 5.0);

        let err = parse_songs("A,x,3\nbroken", &bump).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse line 2");
    }

    #[test]
    fn order_by_comparator_then_title() {
        let high = Song::new("Z", "Zeta", 9.0);
        let low_a = Song::new("Y", "Alpha", 1.0);
        let low_b = Song::new("A", "Beta", 1.0);
        assert_eq!(high.playlist_order(&low_a), Ordering::Less);
        assert_eq!(low_a.playlist_order(&low_b), Ordering::Less);
        assert_eq!(low_b.playlist_order(&low_a), Ordering::Greater);
        assert_eq!(low_a.playlist_order(&low_a.clone()), Ordering::Equal);
    }

    #[test]
    fn display_round_trips_fields() {
        let song = Song::new("Air", "La femme d'argent", 42.0);
        assert_eq!(song.to_string(), "Air,La femme d'argent,42");
    }
}
