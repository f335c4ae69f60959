use crate::song::Song;
use std::{cmp::Ordering, fmt};
use tracing::trace;

/*
 * A list is just its head : None when empty.
 * Each node owns its successor, so relinking moves ownership.
 */
pub type SongList<'a> = Option<Box<Node<'a>>>;

pub struct Node<'a> {
    pub next: SongList<'a>,
    pub song: &'a Song,
}

impl<'a> Node<'a> {
    /*
     * A detached node : the song is borrowed, never copied.
     * A reference cannot be null, and Box aborts on allocation failure.
     */
    pub fn new(song: &'a Song) -> Box<Self> {
        Box::new(Node { next: None, song })
    }
}

impl<'a> fmt::Display for Node<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.song)
    }
}

/*
 * Unlink iteratively, dropping a long chain recursively would blow the stack
 */
impl<'a> Drop for Node<'a> {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

pub fn add_front<'a>(list: SongList<'a>, mut node: Box<Node<'a>>) -> SongList<'a> {
    node.next = list;
    Some(node)
}

pub fn add_end<'a>(mut list: SongList<'a>, mut node: Box<Node<'a>>) -> SongList<'a> {
    node.next = None;
    let mut curr_opt = &mut list;
    while let Some(curr) = curr_opt {
        curr_opt = &mut curr.next;
    }
    *curr_opt = Some(node);
    list
}

/*
 * Insert <node> so that the list stays sorted by comparator (descending),
 * then title (ascending). Equal songs keep insertion order : the new one
 * goes after the existing run.
 */
pub fn add_inorder<'a>(mut list: SongList<'a>, mut node: Box<Node<'a>>) -> SongList<'a> {
    let goes_before = |curr: &Node<'a>| node.song.playlist_order(curr.song) == Ordering::Less;

    // Bigger than the head (or empty list) : new head
    if list.as_deref().map_or(true, goes_before) {
        trace!(song = %node.song, "inserted at head");
        return add_front(list, node);
    }

    // Trailing position : the link that will point to <node>.
    // The scan stops at the first node <node> must precede, or at the tail.
    let mut position = 1;
    let mut prev_opt = &mut list;
    while prev_opt
        .as_deref()
        .and_then(|prev| prev.next.as_deref())
        .map_or(false, |curr| !goes_before(curr))
    {
        if let Some(prev) = prev_opt {
            prev_opt = &mut prev.next;
        }
        position += 1;
    }

    if let Some(prev) = prev_opt {
        node.next = prev.next.take();
        trace!(song = %node.song, position, "inserted in order");
        prev.next = Some(node);
    }
    list
}

pub fn peek_front<'a, 'l>(list: &'l SongList<'a>) -> Option<&'l Node<'a>> {
    list.as_deref()
}

/*
 * Detach the head. Returns the new head and the detached node,
 * which now belongs to the caller.
 */
pub fn remove_front<'a>(list: SongList<'a>) -> (SongList<'a>, Option<Box<Node<'a>>>) {
    match list {
        Some(mut head) => (head.next.take(), Some(head)),
        None => (None, None),
    }
}

/*
 * Visit every node from head to tail, with a caller context.
 * The visitor only gets shared access, the chain cannot be relinked meanwhile.
 */
pub fn apply<'a, C, F>(list: &SongList<'a>, mut visit: F, context: &mut C)
where
    F: FnMut(&Node<'a>, &mut C),
{
    let mut curr_opt = list.as_deref();
    while let Some(curr) = curr_opt {
        visit(curr, context);
        curr_opt = curr.next.as_deref();
    }
}

pub fn len(list: &SongList<'_>) -> usize {
    let mut count = 0;
    apply(list, |_, count: &mut usize| *count += 1, &mut count);
    count
}
