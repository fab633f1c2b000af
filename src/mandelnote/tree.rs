//! # Card Tree
//!
//! The outline is an ordered forest hanging off a sentinel root card. Cards are
//! stored in an arena and refer to each other by [`CardId`], so the parent and
//! sibling back-links never form ownership cycles.
//!
//! ```text
//! root
//! ├── A ── B ── C        (siblings: previous/next, doubly linked)
//! │        └── B1 ── B2  (B.first_child = B1, B1.parent = B)
//! ```
//!
//! The tree only knows how to link and unlink cards. Cursor handling and the
//! editing rules built on top of these primitives live in [`crate::notebook`].
//!
//! Freed slots are recycled, so a `CardId` is only meaningful while its card is
//! still in the tree. Looking up a removed id is a programming error and panics.

/// Stable handle to a card in a [`CardTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(usize);

impl CardId {
    pub fn index(self) -> usize {
        self.0
    }
}

const ROOT: CardId = CardId(0);

/// What a card holds. Only the sentinel root is `Root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardKind {
    Root,
    Content { title: String, body: String },
}

#[derive(Debug, Clone)]
pub struct Card {
    kind: CardKind,
    parent: Option<CardId>,
    previous: Option<CardId>,
    next: Option<CardId>,
    first_child: Option<CardId>,
}

impl Card {
    fn new(kind: CardKind) -> Self {
        Self {
            kind,
            parent: None,
            previous: None,
            next: None,
            first_child: None,
        }
    }

    pub fn kind(&self) -> &CardKind {
        &self.kind
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, CardKind::Root)
    }

    pub fn title(&self) -> &str {
        match &self.kind {
            CardKind::Root => "",
            CardKind::Content { title, .. } => title,
        }
    }

    pub fn body(&self) -> &str {
        match &self.kind {
            CardKind::Root => "",
            CardKind::Content { body, .. } => body,
        }
    }

    pub fn parent(&self) -> Option<CardId> {
        self.parent
    }

    pub fn previous(&self) -> Option<CardId> {
        self.previous
    }

    pub fn next(&self) -> Option<CardId> {
        self.next
    }

    pub fn first_child(&self) -> Option<CardId> {
        self.first_child
    }

    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

/// Arena-backed outline. Slot 0 always holds the root.
#[derive(Debug, Clone)]
pub struct CardTree {
    slots: Vec<Option<Card>>,
    free: Vec<usize>,
    len: usize,
}

impl Default for CardTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CardTree {
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Card::new(CardKind::Root))],
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn root(&self) -> CardId {
        ROOT
    }

    /// Number of content cards (the root is not counted).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn card(&self, id: CardId) -> &Card {
        self.get(id)
            .unwrap_or_else(|| panic!("{:?} is not in the tree", id))
    }

    fn card_mut(&mut self, id: CardId) -> &mut Card {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("{:?} is not in the tree", id))
    }

    /// Mutable access to a card's title and body, `None` for the root.
    pub fn content_mut(&mut self, id: CardId) -> Option<(&mut String, &mut String)> {
        match &mut self.card_mut(id).kind {
            CardKind::Root => None,
            CardKind::Content { title, body } => Some((title, body)),
        }
    }

    pub fn children(&self, id: CardId) -> Children<'_> {
        Children {
            tree: self,
            next: self.card(id).first_child,
        }
    }

    pub fn last_child(&self, id: CardId) -> Option<CardId> {
        self.children(id).last()
    }

    /// Distance from the root; top-level cards are at depth 1.
    pub fn depth(&self, id: CardId) -> usize {
        let mut depth = 0;
        let mut cursor = self.card(id).parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.card(parent).parent;
        }
        depth
    }

    /// Every content card in document order, paired with its depth.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            next: self.card(ROOT).first_child.map(|id| (id, 1)),
        }
    }

    /// Creates a card and makes it the last child of `parent`.
    pub fn append_child(
        &mut self,
        parent: CardId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> CardId {
        let id = self.alloc(title.into(), body.into());
        self.link_last_child(parent, id);
        id
    }

    /// Creates a card and links it immediately after `anchor`.
    pub fn insert_after(
        &mut self,
        anchor: CardId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> CardId {
        let id = self.alloc(title.into(), body.into());
        self.link_after(anchor, id);
        id
    }

    fn alloc(&mut self, title: String, body: String) -> CardId {
        let card = Card::new(CardKind::Content { title, body });
        self.len += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(card);
                CardId(slot)
            }
            None => {
                self.slots.push(Some(card));
                CardId(self.slots.len() - 1)
            }
        }
    }

    /// Links a detached card as the last child of `parent`.
    pub(crate) fn link_last_child(&mut self, parent: CardId, id: CardId) {
        match self.last_child(parent) {
            Some(last) => self.link_after(last, id),
            None => {
                let card = self.card_mut(id);
                card.parent = Some(parent);
                card.previous = None;
                card.next = None;
                self.card_mut(parent).first_child = Some(id);
            }
        }
    }

    /// Links a detached card immediately after `anchor`, under the same parent.
    pub(crate) fn link_after(&mut self, anchor: CardId, id: CardId) {
        let parent = self.card(anchor).parent;
        assert!(parent.is_some(), "the root has no siblings");
        let next = self.card(anchor).next;

        let card = self.card_mut(id);
        card.parent = parent;
        card.previous = Some(anchor);
        card.next = next;

        self.card_mut(anchor).next = Some(id);
        if let Some(next) = next {
            self.card_mut(next).previous = Some(id);
        }
    }

    /// Links a detached card immediately before `anchor`, under the same parent.
    pub(crate) fn link_before(&mut self, anchor: CardId, id: CardId) {
        let parent = self
            .card(anchor)
            .parent
            .unwrap_or_else(|| panic!("the root has no siblings"));
        let previous = self.card(anchor).previous;

        let card = self.card_mut(id);
        card.parent = Some(parent);
        card.previous = previous;
        card.next = Some(anchor);

        self.card_mut(anchor).previous = Some(id);
        match previous {
            Some(previous) => self.card_mut(previous).next = Some(id),
            None => self.card_mut(parent).first_child = Some(id),
        }
    }

    /// Unlinks a card from its parent and siblings. Its own children stay attached to it.
    pub(crate) fn detach(&mut self, id: CardId) {
        assert_ne!(id, ROOT, "the root cannot be detached");
        let (parent, previous, next) = {
            let card = self.card(id);
            (card.parent, card.previous, card.next)
        };

        match previous {
            Some(previous) => self.card_mut(previous).next = next,
            None => {
                if let Some(parent) = parent {
                    self.card_mut(parent).first_child = next;
                }
            }
        }
        if let Some(next) = next {
            self.card_mut(next).previous = previous;
        }

        let card = self.card_mut(id);
        card.parent = None;
        card.previous = None;
        card.next = None;
    }

    /// Moves every child of `from` to the end of `to`'s children, keeping their order.
    pub(crate) fn adopt_children(&mut self, from: CardId, to: CardId) {
        while let Some(child) = self.card(from).first_child {
            self.detach(child);
            self.link_last_child(to, child);
        }
    }

    /// Moves every child of `from` in front of `to`'s existing children, keeping their order.
    pub(crate) fn adopt_children_first(&mut self, from: CardId, to: CardId) {
        let mut anchor: Option<CardId> = None;
        while let Some(child) = self.card(from).first_child {
            self.detach(child);
            match (anchor, self.card(to).first_child) {
                (Some(previous), _) => self.link_after(previous, child),
                (None, Some(first)) => self.link_before(first, child),
                (None, None) => self.link_last_child(to, child),
            }
            anchor = Some(child);
        }
    }

    /// Detaches a card and frees it together with its whole subtree.
    /// Returns how many cards were removed.
    pub(crate) fn remove(&mut self, id: CardId) -> usize {
        self.detach(id);
        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            stack.extend(self.children(current));
            self.slots[current.0] = None;
            self.free.push(current.0);
            removed += 1;
        }
        self.len -= removed;
        removed
    }

    /// Checks the structural invariants: consistent double links, correct parent
    /// pointers, no cycles, no orphaned cards and a single root.
    pub fn validate(&self) -> Result<(), String> {
        let root = self.get(ROOT).ok_or("root slot is empty")?;
        if !root.is_root() {
            return Err("slot 0 is not the root".to_string());
        }
        if root.parent.is_some() || root.previous.is_some() || root.next.is_some() {
            return Err("root must not have a parent or siblings".to_string());
        }

        let mut seen = vec![false; self.slots.len()];
        seen[ROOT.0] = true;
        let mut count = 0;
        let mut stack = vec![ROOT];

        while let Some(parent) = stack.pop() {
            let mut previous: Option<CardId> = None;
            let mut cursor = self.card(parent).first_child;
            while let Some(id) = cursor {
                let card = self
                    .get(id)
                    .ok_or_else(|| format!("{:?} links to freed {:?}", parent, id))?;
                if seen[id.0] {
                    return Err(format!("{:?} is reachable twice", id));
                }
                seen[id.0] = true;
                count += 1;

                if card.is_root() {
                    return Err(format!("{:?} is a second root", id));
                }
                if card.parent != Some(parent) {
                    return Err(format!("{:?} has the wrong parent", id));
                }
                if card.previous != previous {
                    return Err(format!("{:?} has a broken previous link", id));
                }
                if let Some(previous) = previous {
                    if self.card(previous).next != Some(id) {
                        return Err(format!("{:?} has a broken next link", previous));
                    }
                }

                stack.push(id);
                previous = Some(id);
                cursor = card.next;
            }
        }

        if count != self.len {
            return Err(format!(
                "{} cards reachable from the root but {} stored",
                count, self.len
            ));
        }
        let orphaned = self
            .slots
            .iter()
            .enumerate()
            .any(|(slot, card)| card.is_some() && !seen[slot]);
        if orphaned {
            return Err("tree contains unreachable cards".to_string());
        }
        Ok(())
    }
}

pub struct Children<'a> {
    tree: &'a CardTree,
    next: Option<CardId>,
}

impl Iterator for Children<'_> {
    type Item = CardId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.card(id).next;
        Some(id)
    }
}

pub struct Preorder<'a> {
    tree: &'a CardTree,
    next: Option<(CardId, usize)>,
}

impl Iterator for Preorder<'_> {
    type Item = (CardId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.next?;
        let card = self.tree.card(id);

        self.next = match card.first_child {
            Some(child) => Some((child, depth + 1)),
            None => {
                let mut climb = Some((id, depth));
                let mut successor = None;
                while let Some((current, current_depth)) = climb {
                    let current_card = self.tree.card(current);
                    if let Some(next) = current_card.next {
                        successor = Some((next, current_depth));
                        break;
                    }
                    climb = match current_card.parent {
                        Some(parent) if parent != ROOT => Some((parent, current_depth - 1)),
                        _ => None,
                    };
                }
                successor
            }
        };

        Some((id, depth))
    }
}
