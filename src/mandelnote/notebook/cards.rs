use super::Notebook;
use tracing::debug;

impl Notebook {
    /// Adds a card and moves the cursor to it.
    ///
    /// The card goes immediately after the current card, or becomes the last
    /// child of the current card when `as_child` is set. In an empty notebook
    /// the first card is always a top-level card.
    pub fn add_card(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        as_child: bool,
    ) {
        let current = self.current;
        let id = if as_child || self.tree.card(current).is_root() {
            self.tree.append_child(current, title, body)
        } else {
            self.tree.insert_after(current, title, body)
        };
        debug!(card = ?id, as_child, "added card");
        self.current = id;
        self.dirty = true;
    }

    /// Title and body of the current card; empty strings for an empty notebook.
    pub fn get_card(&self) -> (&str, &str) {
        let card = self.tree.card(self.current);
        (card.title(), card.body())
    }

    /// Overwrites the current card. Ignored when the notebook is empty.
    pub fn edit_card(&mut self, title: impl Into<String>, body: impl Into<String>) {
        if let Some((card_title, card_body)) = self.tree.content_mut(self.current) {
            *card_title = title.into();
            *card_body = body.into();
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::notebook::fixtures::*;
    use crate::notebook::Notebook;

    #[test]
    fn add_card_becomes_current() {
        let mut nb = Notebook::new("Test", "", "");
        nb.add_card("Card 1 Title", "Card 1 body", false);
        assert_eq!(nb.get_card(), ("Card 1 Title", "Card 1 body"));
        assert_eq!(nb.get_tree().len(), 1);
        assert!(nb.dirty());

        nb.add_card("Card 2 Title", "Card 2 body", false);
        assert_eq!(nb.get_card(), ("Card 2 Title", "Card 2 body"));
        assert_eq!(nb.get_tree().len(), 2);
        assert_valid(&nb);
    }

    #[test]
    fn first_card_is_top_level_even_as_child() {
        let mut nb = Notebook::new("Test", "", "");
        nb.add_card("Only", "", true);
        assert_eq!(nb.current_depth(), 1);
        assert_eq!(outline(&nb), vec!["1:Only"]);
    }

    #[test]
    fn sibling_goes_right_after_current() {
        let mut nb = flat(&["A", "C"]);
        nb.cycle(-1);
        nb.add_card("B", "", false);
        assert_eq!(sibling_titles(&nb), vec!["A", "B", "C"]);
        assert_valid(&nb);
    }

    #[test]
    fn children_are_appended_last() {
        let mut nb = flat(&["A"]);
        nb.add_card("A1", "", true);
        nb.exit();
        nb.add_card("A2", "", true);
        nb.exit();
        nb.add_card("A3", "", true);
        nb.exit();
        assert_eq!(child_titles(&nb), vec!["A1", "A2", "A3"]);
        assert_valid(&nb);
    }

    #[test]
    fn edit_card_overwrites() {
        let mut nb = flat(&["A"]);
        nb.edit_card("Rose", "Companion");
        assert_eq!(nb.get_card(), ("Rose", "Companion"));
    }

    #[test]
    fn editing_an_empty_notebook_is_a_noop() {
        let mut nb = Notebook::new("Empty", "Empty", "Empty");
        nb.edit_card("bad", "wolf");
        assert!(nb.get_tree().is_empty());
        assert_eq!(nb.get_card(), ("", ""));
        assert!(!nb.dirty());
    }
}
