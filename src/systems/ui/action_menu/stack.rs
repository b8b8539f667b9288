use crate::data::menu::MenuAction;

/// Levels of an action menu, innermost last. The top level is the one on
/// screen; an empty stack means the menu is closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuStack {
    levels: Vec<Vec<MenuAction>>,
}

impl MenuStack {
    pub fn new(root: Vec<MenuAction>) -> Self {
        Self { levels: vec![root] }
    }

    pub fn push(&mut self, level: Vec<MenuAction>) {
        self.levels.push(level);
    }

    /// Steps back one level. The root level is never popped; closing the
    /// menu goes through `clear`.
    pub fn pop(&mut self) -> Option<Vec<MenuAction>> {
        if self.levels.len() <= 1 {
            return None;
        }
        self.levels.pop()
    }

    pub fn top(&self) -> Option<&[MenuAction]> {
        self.levels.last().map(Vec::as_slice)
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str) -> MenuAction {
        MenuAction {
            label: label.to_string(),
            icon: String::new(),
            colour: None,
            action_type: None,
            action: None,
            params: None,
            submenu: None,
        }
    }

    #[test]
    fn pop_keeps_the_root_level() {
        let mut stack = MenuStack::new(vec![entry("root")]);
        stack.push(vec![entry("child")]);

        assert_eq!(stack.pop().map(|level| level[0].label.clone()), Some(String::from("child")));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top().map(|level| level[0].label.as_str()), Some("root"));
    }

    #[test]
    fn clear_closes() {
        let mut stack = MenuStack::new(vec![entry("root")]);
        stack.clear();
        assert_eq!(stack.depth(), 0);
        assert!(stack.top().is_none());
    }
}
