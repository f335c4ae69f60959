use anyhow::{anyhow, Context, Result};
use bumpalo::Bump;
use songlist::{
    linkedlist::{add_inorder, apply, Node, SongList},
    song::{parse_songs, Song},
};
use std::{env, fs::File, io::Read, process};
use tracing::info;

mod logger;

/*
 * Traversal context : renders at most <limit> songs
 */
struct Playlist {
    limit: usize,
    lines: Vec<String>,
}

impl Playlist {
    fn new(limit: Option<usize>) -> Self {
        Playlist {
            limit: limit.unwrap_or(usize::MAX),
            lines: vec![],
        }
    }

    fn visit(node: &Node<'_>, playlist: &mut Playlist) {
        if playlist.lines.len() < playlist.limit {
            playlist.lines.push(node.to_string());
        }
    }
}

/*
 * Rank songs : every song goes through ordered insertion
 */
fn rank<'a>(songs: &[&'a Song]) -> SongList<'a> {
    songs
        .iter()
        .fold(None, |list, &song| add_inorder(list, Node::new(song)))
}

fn render(list: &SongList<'_>, limit: Option<usize>) -> Vec<String> {
    let mut playlist = Playlist::new(limit);
    apply(list, Playlist::visit, &mut playlist);
    playlist.lines
}

fn main() -> Result<()> {
    logger::init_logger();
    if !(2..=3).contains(&env::args().len()) {
        println!(
            "Usage : {} [songs file] [limit]",
            env::args().next().unwrap_or_else(|| "songlist".into())
        );
        process::exit(1);
    }
    let mut args = env::args().skip(1);

    let path = args.next().ok_or(anyhow!("Missing songs file"))?;
    let mut f = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
    let mut input = String::new();
    f.read_to_string(&mut input)
        .context("Failed to read file")?;
    let limit = args
        .next()
        .map(|l| l.parse::<usize>())
        .transpose()
        .context("Limit must be a positive integer")?;

    let bump = Bump::new();
    let songs = parse_songs(&input, &bump).context("Failed to parse songs")?;
    let list = rank(&songs);
    info!(songs = songs.len(), "ranked playlist");

    for line in render(&list, limit) {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_and_render() {
        let input = "Artist A,Song B,3
Artist B,Song Five,5
Artist C,Song Eight,8
Artist D,Song A,3";
        let bump = Bump::new();
        let songs = parse_songs(input, &bump).unwrap();
        let list = rank(&songs);
        assert_eq!(
            render(&list, None),
            [
                "Artist C,Song Eight,8",
                "Artist B,Song Five,5",
                "Artist D,Song A,3",
                "Artist A,Song B,3",
            ]
        );
        assert_eq!(
            render(&list, Some(2)),
            ["Artist C,Song Eight,8", "Artist B,Song Five,5"]
        );
    }

    #[test]
    fn render_empty() {
        assert!(render(&None, Some(10)).is_empty());
    }
}
