/// The text each group consumed, indexed by 0-based group id.
///
/// Slots grow on demand. A slot is unset (`None`) until its group matches;
/// that is distinct from a group that matched the empty string
/// (`Some("")`). Groups never reached on the successful path, such as the
/// losing side of an alternation or a skipped `?` group, stay unset.
///
/// Backreference `\N` reads slot `N - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures<'t> {
    groups: Vec<Option<&'t str>>,
}

impl<'t> Captures<'t> {
    /// Text consumed by group `id`, if that group has matched.
    pub fn get(&self, id: usize) -> Option<&'t str> {
        self.groups.get(id).copied().flatten()
    }

    /// Number of slots, set or not.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every slot in id order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&'t str>> + '_ {
        self.groups.iter().copied()
    }

    pub(crate) fn set(&mut self, id: usize, text: &'t str) {
        if self.groups.len() <= id {
            self.groups.resize(id + 1, None);
        }
        self.groups[id] = Some(text);
    }
}
