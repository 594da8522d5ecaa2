use alloc::boxed::Box;

/// An owning link to a subtree. `None` is an empty subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// The color of the link from a node's parent to the node.
///
/// A red link glues a node to its parent to form a 3-node of the simulated
/// 2-3 tree. The root's color is kept black between public operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    #[must_use]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    // The number of entries in the subtree rooted at this node.
    size: usize,
    color: Color,
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf, ready to be glued into its parent.
    pub(crate) fn new_leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            size: 1,
            color: Color::Red,
        })
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    /// Recalculates the subtree size from the children.
    #[inline]
    pub(crate) fn update_size(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }

    /// Splices this node out of the tree, returning the entry and the
    /// subtree that takes its place.
    pub(crate) fn detach(self, replacement: Side) -> (Link<K, V>, (K, V)) {
        let Node {
            key, value, left, right, ..
        } = self;
        let link = match replacement {
            Side::Left => left,
            Side::Right => right,
        };
        (link, (key, value))
    }
}

/// Which child survives when a node is spliced out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Returns the size of a subtree; an empty subtree has size zero.
#[inline]
pub(crate) fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Returns true if the link is red. Empty links are black.
#[inline]
pub(crate) fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|node| node.is_red())
}

#[inline]
fn left_left_is_red<K, V>(node: &Node<K, V>) -> bool {
    node.left.as_ref().is_some_and(|left| is_red(&left.left))
}

#[inline]
fn right_left_is_red<K, V>(node: &Node<K, V>) -> bool {
    node.right.as_ref().is_some_and(|right| is_red(&right.left))
}

/// Returns true if moving down the left spine needs a red link pushed down
/// first: neither `node.left` nor `node.left.left` is red.
#[inline]
pub(crate) fn needs_red_left<K, V>(node: &Node<K, V>) -> bool {
    !is_red(&node.left) && !left_left_is_red(node)
}

/// Returns true if moving down the right spine needs a red link pushed down
/// first: neither `node.right` nor `node.right.left` is red.
#[inline]
pub(crate) fn needs_red_right<K, V>(node: &Node<K, V>) -> bool {
    !is_red(&node.right) && !right_left_is_red(node)
}

//           |                  |
//           h                  x
//          / \\              // \
//         a    x     =>      h    c
//             / \           / \
//            b   c         a   b
//
/// Turns a right-leaning red link into a left-leaning one.
pub(crate) fn rotate_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    debug_assert!(is_red(&h.right), "`rotate_left()` - right link is not red!");
    let Some(mut x) = h.right.take() else {
        return h;
    };
    h.right = x.left.take();
    x.color = h.color;
    h.color = Color::Red;
    x.size = h.size;
    h.update_size();
    x.left = Some(h);
    x
}

//           |                  |
//           h                  x
//         // \                / \\
//         x   c      =>      a    h
//        / \                     / \
//       a   b                   b   c
//
/// Turns a left-leaning red link into a right-leaning one.
pub(crate) fn rotate_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    debug_assert!(is_red(&h.left), "`rotate_right()` - left link is not red!");
    let Some(mut x) = h.left.take() else {
        return h;
    };
    h.left = x.right.take();
    x.color = h.color;
    h.color = Color::Red;
    x.size = h.size;
    h.update_size();
    x.right = Some(h);
    x
}

/// Toggles the color of `h` and both of its children.
///
/// Splits a temporary 4-node (two red children) by passing the red link up
/// to the parent, or the reverse when deletion needs to borrow a red link.
pub(crate) fn flip_colors<K, V>(h: &mut Node<K, V>) {
    debug_assert!(
        h.left.is_some() && h.right.is_some(),
        "`flip_colors()` - node is missing a child!"
    );
    h.color = h.color.flipped();
    for child in [&mut h.left, &mut h.right].into_iter().flatten() {
        child.color = child.color.flipped();
    }
}

/// Restores the left-leaning invariants at `h` on the way back up a
/// mutation, then recomputes its size. A no-op on a node that already
/// satisfies the invariants.
pub(crate) fn balance<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    if is_red(&h.right) && !is_red(&h.left) {
        h = rotate_left(h);
    }
    if is_red(&h.left) && left_left_is_red(&h) {
        h = rotate_right(h);
    }
    if is_red(&h.left) && is_red(&h.right) {
        flip_colors(&mut h);
    }
    h.update_size();
    h
}

/// Assuming `h` is red and both `h.left` and `h.left.left` are black, makes
/// `h.left` or one of its children red.
pub(crate) fn move_red_left<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if right_left_is_red(&h) {
        h.right = h.right.take().map(rotate_right);
        h = rotate_left(h);
        flip_colors(&mut h);
    }
    h
}

/// Assuming `h` is red and both `h.right` and `h.right.left` are black,
/// makes `h.right` or one of its children red.
pub(crate) fn move_red_right<K, V>(mut h: Box<Node<K, V>>) -> Box<Node<K, V>> {
    flip_colors(&mut h);
    if left_left_is_red(&h) {
        h = rotate_right(h);
        flip_colors(&mut h);
    }
    h
}
