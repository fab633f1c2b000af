use super::Notebook;
use crate::error::{NotebookError, Result};
use crate::tree::CardId;
use tracing::debug;

const MERGE_SEPARATOR: &str = "\n\n";

impl Notebook {
    /// Swaps the current card with its neighbour `amount` times, towards the
    /// start of the list for negative amounts. Stops at either end.
    pub fn move_card(&mut self, amount: i64) {
        let id = self.current;
        if self.tree.card(id).is_root() {
            return;
        }

        let mut steps = 0;
        for _ in 0..amount.unsigned_abs() {
            let card = self.tree.card(id);
            if amount < 0 {
                let Some(previous) = card.previous() else {
                    break;
                };
                self.tree.detach(id);
                self.tree.link_before(previous, id);
            } else {
                let Some(next) = card.next() else {
                    break;
                };
                self.tree.detach(id);
                self.tree.link_after(next, id);
            }
            steps += 1;
        }

        if steps > 0 {
            debug!(card = ?id, steps, "moved card");
            self.dirty = true;
        }
    }

    /// Removes the current card and its subtree.
    ///
    /// Refuses a card with children unless `force` is set. The cursor moves to
    /// the previous sibling, else the next sibling, else the parent.
    pub fn delete(&mut self, force: bool) -> Result<()> {
        let id = self.current;
        let card = self.tree.card(id);
        if card.is_root() {
            return Err(NotebookError::NothingToDelete);
        }
        if card.has_children() && !force {
            return Err(NotebookError::HasChildren);
        }

        let target = card
            .previous()
            .or(card.next())
            .or(card.parent())
            .unwrap_or(self.tree.root());
        let removed = self.tree.remove(id);
        debug!(card = ?id, removed, "deleted card");

        self.current = target;
        self.dirty = true;
        Ok(())
    }

    /// Moves the current card up one level, right after its former parent.
    /// Its own children come along.
    pub fn promote(&mut self) -> Result<()> {
        let parent = self.promotable_parent()?;
        let id = self.current;
        self.tree.detach(id);
        self.tree.link_after(parent, id);
        debug!(card = ?id, "promoted card");
        self.dirty = true;
        Ok(())
    }

    /// Promotes the current card together with all of its siblings. They keep
    /// their order and land right after their former parent. With `replace`
    /// the emptied parent is removed so they take its place.
    pub fn promote_all(&mut self, replace: bool) -> Result<()> {
        let parent = self.promotable_parent()?;
        let siblings: Vec<CardId> = self.tree.children(parent).collect();

        let mut anchor = parent;
        for &id in &siblings {
            self.tree.detach(id);
            self.tree.link_after(anchor, id);
            anchor = id;
        }
        if replace {
            self.tree.remove(parent);
        }

        debug!(promoted = siblings.len(), replace, "promoted siblings");
        self.dirty = true;
        Ok(())
    }

    /// Folds the current card into a neighbour `amount` times.
    ///
    /// Merging up (negative) appends the body to the previous sibling. Merging
    /// down (positive) prepends the body to the next sibling and gives it the
    /// merged card's title. Children move to the absorbing card in document
    /// order and the cursor follows. Stops when there is no neighbour left.
    pub fn merge(&mut self, amount: i64) {
        if self.tree.card(self.current).is_root() {
            return;
        }

        let mut steps = 0;
        for _ in 0..amount.unsigned_abs() {
            let merged = if amount < 0 {
                self.merge_up()
            } else {
                self.merge_down()
            };
            if !merged {
                break;
            }
            steps += 1;
        }

        if steps > 0 {
            debug!(steps, into = ?self.current, "merged cards");
            self.dirty = true;
        }
    }

    fn merge_up(&mut self) -> bool {
        let id = self.current;
        let card = self.tree.card(id);
        let Some(previous) = card.previous() else {
            return false;
        };
        let body = card.body().to_string();

        self.tree.adopt_children(id, previous);
        if let Some((_, previous_body)) = self.tree.content_mut(previous) {
            previous_body.push_str(MERGE_SEPARATOR);
            previous_body.push_str(&body);
        }
        self.tree.remove(id);
        self.current = previous;
        true
    }

    fn merge_down(&mut self) -> bool {
        let id = self.current;
        let card = self.tree.card(id);
        let Some(next) = card.next() else {
            return false;
        };
        let title = card.title().to_string();
        let body = card.body().to_string();

        self.tree.adopt_children_first(id, next);
        if let Some((next_title, next_body)) = self.tree.content_mut(next) {
            *next_title = title;
            *next_body = format!("{}{}{}", body, MERGE_SEPARATOR, next_body);
        }
        self.tree.remove(id);
        self.current = next;
        true
    }

    /// The parent of the current card, if the card is deep enough to promote.
    fn promotable_parent(&self) -> Result<CardId> {
        match self.tree.card(self.current).parent() {
            Some(parent) if !self.tree.card(parent).is_root() => Ok(parent),
            _ => Err(NotebookError::CannotPromote),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::NotebookError;
    use crate::notebook::fixtures::*;
    use crate::notebook::Notebook;

    fn merge_fixture() -> Notebook {
        let mut nb = Notebook::new("Merging", "", "");
        nb.add_card("Test Up", "up", false);
        nb.add_card("Up 1", "1", true);
        nb.add_card("Up 2", "2", false);
        nb.exit();
        nb.add_card("Test Down", "down", false);
        nb.add_card("Bottom text", "bottom text", false);
        nb.add_card("Bottom 1", "1", true);
        nb.add_card("Bottom 2", "2", false);
        nb.exit();
        nb.cycle(-1);
        nb
    }

    #[test]
    fn move_up_stops_at_start() {
        let mut nb = flat(&["Test Up", "Test Down", "Bottom text"]);
        nb.cycle(-1);
        nb.move_card(-1);
        assert_eq!(sibling_titles(&nb), vec!["Test Down", "Test Up", "Bottom text"]);
        assert_eq!(nb.get_card().0, "Test Down");

        nb.move_card(-1);
        assert_eq!(sibling_titles(&nb), vec!["Test Down", "Test Up", "Bottom text"]);

        nb.cycle(2);
        nb.move_card(-1);
        assert_eq!(sibling_titles(&nb), vec!["Test Down", "Bottom text", "Test Up"]);
        assert_eq!(nb.get_card().0, "Bottom text");
        assert_valid(&nb);
    }

    #[test]
    fn move_down_stops_at_end() {
        let mut nb = flat(&["Test Up", "Test Down", "Bottom text"]);
        nb.cycle(-1);
        nb.move_card(1);
        assert_eq!(sibling_titles(&nb), vec!["Test Up", "Bottom text", "Test Down"]);
        assert_eq!(nb.get_card().0, "Test Down");

        nb.move_card(1);
        assert_eq!(sibling_titles(&nb), vec!["Test Up", "Bottom text", "Test Down"]);

        nb.cycle(-2);
        nb.move_card(1);
        assert_eq!(sibling_titles(&nb), vec!["Bottom text", "Test Up", "Test Down"]);
        assert_valid(&nb);
    }

    #[test]
    fn move_many_steps_clamps() {
        let mut nb = flat(&["A", "B", "C", "D"]);
        nb.move_card(-100);
        assert_eq!(sibling_titles(&nb), vec!["D", "A", "B", "C"]);
        nb.move_card(2);
        assert_eq!(sibling_titles(&nb), vec!["A", "B", "D", "C"]);
        assert_valid(&nb);
    }

    #[test]
    fn move_keeps_children_attached() {
        let mut nb = flat(&["A", "B"]);
        nb.add_card("B1", "", true);
        nb.exit();
        nb.move_card(-1);
        assert_eq!(outline(&nb), vec!["1:B", "2:B1", "1:A"]);
    }

    #[test]
    fn delete_moves_cursor_per_relinking_rule() {
        let mut nb = flat(&["Card 1 Title", "Card 2 Title"]);
        nb.delete(false).unwrap();
        assert_eq!(nb.get_card().0, "Card 1 Title");

        nb.add_card("bad", "wolf", true);
        nb.delete(false).unwrap();
        assert_eq!(nb.get_card().0, "Card 1 Title", "falls back to parent");

        nb.add_card("bad", "wolf", true);
        nb.add_card("good", "wolf", false);
        nb.cycle(-1);
        nb.delete(false).unwrap();
        assert_eq!(nb.get_card().0, "good", "falls back to next sibling");
        assert_eq!(outline(&nb), vec!["1:Card 1 Title", "2:good"]);
        assert_valid(&nb);
    }

    #[test]
    fn delete_with_children_needs_force() {
        let mut nb = flat(&["A"]);
        nb.add_card("A1", "", true);
        nb.exit();

        let err = nb.delete(false).unwrap_err();
        assert!(matches!(err, NotebookError::HasChildren));
        assert_eq!(err.to_string(), "card still has children, delete requires force");
        assert_eq!(nb.len(), 2);

        nb.delete(true).unwrap();
        assert!(nb.is_empty());
        assert_eq!(nb.current(), nb.tree().root());
        assert_valid(&nb);
    }

    #[test]
    fn delete_on_empty_notebook_fails() {
        let mut nb = Notebook::new("Empty", "Empty", "Empty");
        let err = nb.delete(false).unwrap_err();
        assert_eq!(err.to_string(), "nothing to delete");
    }

    #[test]
    fn random_add_delete_keeps_links_consistent() {
        let mut nb = Notebook::new("Stress", "", "");
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for step in 0..2_000 {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            match (seed >> 33) % 7 {
                0 | 1 => nb.add_card(format!("card {}", step), "", false),
                2 => nb.add_card(format!("child {}", step), "", true),
                3 => {
                    let _ = nb.delete((seed >> 40) % 2 == 0);
                }
                4 => nb.exit(),
                5 => nb.enter(),
                _ => nb.cycle((seed >> 45) as i64 % 5 - 2),
            }
            assert_valid(&nb);
        }
    }

    #[test]
    fn promote_moves_card_after_parent() {
        let mut nb = flat(&["Card 1", "Card 2"]);
        nb.add_card("Card 2.1", "", true);
        nb.add_card("Card 2.2", "", false);
        nb.add_card("Card 2.3", "", false);
        nb.add_card("Card 2.3.1", "", true);
        nb.exit();

        nb.promote().unwrap();
        assert_eq!(
            outline(&nb),
            vec!["1:Card 1", "1:Card 2", "2:Card 2.1", "2:Card 2.2", "1:Card 2.3", "2:Card 2.3.1"]
        );
        assert_eq!(nb.get_card().0, "Card 2.3");
        assert_eq!(nb.current_depth(), 1);
        assert_valid(&nb);
    }

    #[test]
    fn promote_from_the_middle_lands_right_after_parent() {
        let mut nb = flat(&["A", "B"]);
        nb.cycle(-1);
        nb.add_card("A1", "", true);
        nb.add_card("A2", "", false);
        nb.add_card("A3", "", false);
        nb.cycle(-1);

        nb.promote().unwrap();
        assert_eq!(outline(&nb), vec!["1:A", "2:A1", "2:A3", "1:A2", "1:B"]);
        assert_eq!(nb.get_card().0, "A2");
        assert_valid(&nb);
    }

    #[test]
    fn promote_refuses_top_level_and_empty() {
        let mut nb = flat(&["A"]);
        let err = nb.promote().unwrap_err();
        assert_eq!(err.to_string(), "unable to promote any further");
        assert!(matches!(nb.promote_all(false), Err(NotebookError::CannotPromote)));

        let mut empty = Notebook::new("Empty", "Empty", "Empty");
        assert!(matches!(empty.promote(), Err(NotebookError::CannotPromote)));
        assert!(!empty.dirty());
    }

    #[test]
    fn promote_never_reaches_the_root() {
        let mut nb = flat(&["A"]);
        nb.add_card("A1", "", true);
        nb.add_card("A1a", "", true);
        for _ in 0..5 {
            let _ = nb.promote();
            nb.exit();
            assert!(nb.current_depth() >= 1);
            assert!(!nb.tree().card(nb.current()).is_root());
        }
        assert_valid(&nb);
    }

    #[test]
    fn promote_all_keeps_parent() {
        let mut nb = flat(&["A", "B"]);
        nb.cycle(-1);
        nb.add_card("A1", "", true);
        nb.add_card("A2", "", false);
        nb.cycle(-1);

        nb.promote_all(false).unwrap();
        assert_eq!(outline(&nb), vec!["1:A", "1:A1", "1:A2", "1:B"]);
        assert_eq!(nb.get_card().0, "A1");
        assert_valid(&nb);
    }

    #[test]
    fn promote_all_can_replace_parent() {
        let mut nb = flat(&["A"]);
        nb.add_card("A1", "", true);
        nb.add_card("A1.1", "", true);
        nb.add_card("A1.2", "", false);
        nb.exit();
        nb.add_card("A2", "", false);
        nb.cycle(-1);
        nb.enter();

        nb.promote_all(true).unwrap();
        assert_eq!(outline(&nb), vec!["1:A", "2:A1.1", "2:A1.2", "2:A2"]);
        assert_eq!(nb.get_card().0, "A1.1");
        assert_eq!(nb.len(), 4);
        assert_valid(&nb);
    }

    #[test]
    fn merge_up() {
        let mut nb = merge_fixture();
        nb.merge(-1);
        assert_eq!(nb.get_card(), ("Test Up", "up\n\ndown"));

        nb.cycle(1);
        nb.merge(-1);
        assert_eq!(nb.get_card(), ("Test Up", "up\n\ndown\n\nbottom text"));

        assert_eq!(child_titles(&nb), vec!["Up 1", "Up 2", "Bottom 1", "Bottom 2"]);
        nb.enter();
        assert_eq!(nb.get_card().0, "Up 1");
        nb.cycle(2);
        assert_eq!(nb.get_card().0, "Bottom 1");
        assert_valid(&nb);
    }

    #[test]
    fn merge_down() {
        let mut nb = merge_fixture();
        nb.merge(1);
        assert_eq!(nb.get_card(), ("Test Down", "down\n\nbottom text"));

        nb.cycle(-1);
        nb.merge(1);
        assert_eq!(nb.get_card(), ("Test Up", "up\n\ndown\n\nbottom text"));

        nb.enter();
        assert_eq!(nb.get_card().0, "Up 1");
        nb.cycle(2);
        assert_eq!(nb.get_card().0, "Bottom 1");
        assert_valid(&nb);
    }

    #[test]
    fn merge_several_steps() {
        let mut nb = merge_fixture();
        nb.cycle(1);
        nb.merge(-2);
        assert_eq!(nb.get_card(), ("Test Up", "up\n\ndown\n\nbottom text"));
        assert_eq!(sibling_titles(&nb), vec!["Test Up"]);
        assert_valid(&nb);
    }

    #[test]
    fn merge_three_siblings_into_first() {
        let mut nb = flat(&["A", "B", "C"]);
        nb.edit_card("C", "C-body");
        nb.cycle(-1);
        nb.edit_card("B", "B-body");
        nb.cycle(-1);
        nb.edit_card("A", "A-body");
        nb.cycle(1);

        nb.merge(-1);
        assert_eq!(sibling_titles(&nb), vec!["A", "C"]);
        assert_eq!(nb.get_card(), ("A", "A-body\n\nB-body"));
    }

    #[test]
    fn merge_without_neighbour_is_a_noop() {
        let mut nb = merge_fixture();
        nb.cycle(1);
        let before = nb.get_tree();
        nb.merge(1);
        assert_eq!(nb.get_tree(), before);

        nb.cycle(-2);
        nb.merge(-1);
        nb.cycle(2);
        assert_eq!(nb.get_tree(), before);
    }
}
