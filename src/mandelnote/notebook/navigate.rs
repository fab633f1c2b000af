use super::Notebook;
use crate::tree::CardId;

impl Notebook {
    /// Moves the cursor `amount` places among its siblings, wrapping around at
    /// either end. The target index is `(index + amount) mod count`, always in
    /// `[0, count)`, so any magnitude and sign is accepted.
    pub fn cycle(&mut self, amount: i64) {
        let siblings = self.siblings();
        if siblings.is_empty() {
            return;
        }
        let Some(index) = siblings.iter().position(|&id| id == self.current) else {
            return;
        };
        let count = siblings.len() as i64;
        let target = (index as i64 + amount.rem_euclid(count)).rem_euclid(count);
        self.current = siblings[target as usize];
    }

    /// Moves the cursor to the first child of the current card, if it has one.
    pub fn enter(&mut self) {
        if let Some(child) = self.tree.card(self.current).first_child() {
            self.current = child;
        }
    }

    /// Moves the cursor to the parent card. Top-level cards stay where they are.
    pub fn exit(&mut self) {
        if let Some(parent) = self.tree.card(self.current).parent() {
            if !self.tree.card(parent).is_root() {
                self.current = parent;
            }
        }
    }

    /// The cursor and its siblings in document order; empty for the root.
    fn siblings(&self) -> Vec<CardId> {
        match self.tree.card(self.current).parent() {
            Some(parent) => self.tree.children(parent).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::notebook::fixtures::*;
    use crate::notebook::Notebook;

    fn titled(nb: &Notebook) -> &str {
        nb.get_card().0
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut nb = flat(&["Card 1", "Card 2", "Card 3"]);
        assert_eq!(titled(&nb), "Card 3");
        nb.cycle(1);
        assert_eq!(titled(&nb), "Card 1");
        nb.cycle(1);
        assert_eq!(titled(&nb), "Card 2");
        nb.cycle(-1);
        assert_eq!(titled(&nb), "Card 1");
        nb.cycle(-1);
        assert_eq!(titled(&nb), "Card 3");
    }

    #[test]
    fn cycle_handles_large_amounts() {
        let mut nb = flat(&["A", "B", "C"]);
        nb.cycle(-1);
        nb.cycle(3 * 1000 + 1);
        assert_eq!(titled(&nb), "C");
        nb.cycle(-(3 * 1000) - 2);
        assert_eq!(titled(&nb), "A");
        nb.cycle(i64::MAX);
        nb.cycle(i64::MIN);
        assert!(["A", "B", "C"].contains(&titled(&nb)));
    }

    #[test]
    fn cycle_there_and_back_returns_home() {
        let mut nb = flat(&["A", "B", "C", "D", "E"]);
        nb.cycle(-2);
        for k in [-17_i64, -5, -1, 0, 1, 4, 5, 6, 23, 100] {
            let home = nb.current();
            nb.cycle(k);
            nb.cycle(-k);
            assert_eq!(nb.current(), home, "cycle({}) then cycle({})", k, -k);
        }
    }

    #[test]
    fn cycle_stays_within_level() {
        let mut nb = flat(&["A", "B"]);
        nb.add_card("B1", "", true);
        nb.add_card("B2", "", false);
        nb.cycle(1);
        assert_eq!(titled(&nb), "B1");
        assert_eq!(nb.current_depth(), 2);
    }

    #[test]
    fn cycle_on_empty_notebook_is_a_noop() {
        let mut nb = Notebook::new("Empty", "", "");
        nb.cycle(3);
        assert_eq!(nb.current(), nb.tree().root());
    }

    #[test]
    fn enter_and_exit() {
        let mut nb = flat(&["Card 1", "Card 2"]);
        nb.add_card("Card 2.1", "", true);
        nb.exit();
        assert_eq!(titled(&nb), "Card 2");
        nb.enter();
        assert_eq!(titled(&nb), "Card 2.1");

        nb.enter();
        assert_eq!(titled(&nb), "Card 2.1", "childless card cannot be entered");
    }

    #[test]
    fn exit_stops_at_top_level() {
        let mut nb = flat(&["A"]);
        nb.exit();
        assert_eq!(titled(&nb), "A");
        assert_eq!(nb.current_depth(), 1);

        let mut empty = Notebook::new("Empty", "", "");
        empty.exit();
        empty.enter();
        assert!(empty.is_empty());
    }
}
