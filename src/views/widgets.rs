use ratatui::widgets::ListState;

pub struct StatefulList<T> {
    pub state: ListState,
    pub items: Vec<T>,
}

impl<T: Copy> StatefulList<T> {
    pub fn with_items(items: Vec<T>) -> StatefulList<T> {
        let mut state = ListState::default();
        // Start with the first item selected
        if !items.is_empty() {
            state.select(Some(0));
        }
        StatefulList {
            state,
            items,
        }
    }

    pub fn add_items(&mut self, new_items: Vec<T>) {
        self.items.extend(new_items);
        if self.state.selected().is_none() && !self.items.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn selected(&self) -> Option<T> {
        self.state.selected().and_then(|i| self.items.get(i).copied())
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.state.select(Some(i));
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_stays_in_bounds() {
        let mut list = StatefulList::with_items(vec![1u32, 2, 3]);
        list.previous();
        assert_eq!(list.selected(), Some(1));
        list.next();
        list.next();
        list.next();
        assert_eq!(list.selected(), Some(3));
    }

    #[test]
    fn empty_list_selects_first_added_item() {
        let mut list: StatefulList<u32> = StatefulList::with_items(vec![]);
        list.next();
        assert_eq!(list.selected(), None);

        list.add_items(vec![7]);
        assert_eq!(list.selected(), Some(7));
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("how long does a work visa take", 10),
            vec!["how long", "does a", "work visa", "take"]
        );
        assert_eq!(wrap_text("", 10), Vec::<String>::new());
        assert_eq!(wrap_text("supercalifragilistic ok", 5), vec!["supercalifragilistic", "ok"]);
    }
}
