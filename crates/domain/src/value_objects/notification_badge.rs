/// Unread notification counter in the navigation bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationBadge {
    count: u64,
}

impl NotificationBadge {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    /// Take a freshly polled count. Returns whether anything changed.
    pub fn apply(&mut self, count: u64) -> bool {
        let changed = self.count != count;
        self.count = count;
        changed
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_visible(&self) -> bool {
        self.count > 0
    }

    /// Badge text, or `None` while hidden.
    pub fn text(&self) -> Option<String> {
        self.is_visible().then(|| self.count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_hidden_at_zero() {
        let badge = NotificationBadge::default();
        assert!(!badge.is_visible());
        assert_eq!(badge.text(), None);
    }

    #[test]
    fn badge_shows_count() {
        let mut badge = NotificationBadge::default();
        assert!(badge.apply(4));
        assert!(badge.is_visible());
        assert_eq!(badge.text().as_deref(), Some("4"));
        assert!(!badge.apply(4));
        assert!(badge.apply(0));
        assert!(!badge.is_visible());
    }
}
