//! Autocomplete over command names.
//!
//! Matching is case-insensitive and runs in two phases: names that start
//! with the typed text, then (for inputs longer than one character) names
//! that merely contain it. Results page through the combined sequence with
//! a `skip`/`count` window.

/// Return up to `count` names matching `text`, after skipping the first
/// `skip` matches.
///
/// `names` is expected to be sorted; the output preserves its order within
/// each phase.
pub fn suggest<S: AsRef<str>>(names: &[S], text: &str, skip: usize, count: usize) -> Vec<String> {
    if count == 0 || text.trim().is_empty() {
        return Vec::new();
    }

    let needle = text.to_lowercase();
    let lowered: Vec<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
    // A single character matches too much as a substring.
    let substring_phase = needle.chars().count() > 1;

    let prefix = lowered
        .iter()
        .enumerate()
        .filter(|(_, name)| name.starts_with(&needle));
    let substring = lowered
        .iter()
        .enumerate()
        .filter(|_| substring_phase)
        .filter(|(_, name)| !name.starts_with(&needle) && name.contains(&needle));

    prefix
        .chain(substring)
        .skip(skip)
        .take(count)
        .map(|(i, _)| names[i].as_ref().to_string())
        .collect()
}

/// Tab-cycling state for the input line.
///
/// While the user is editing, no suggestion is selected. Each [`next`]
/// selects the following match for the text the user typed; [`previous`]
/// walks back and finally restores the typed text.
///
/// [`next`]: SuggestionCursor::next
/// [`previous`]: SuggestionCursor::previous
#[derive(Debug, Clone, Default)]
pub struct SuggestionCursor {
    typed: String,
    index: Option<usize>,
}

impl SuggestionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user edited the input: remember it and leave cycling mode.
    pub fn set_text(&mut self, text: &str) {
        self.typed = text.to_string();
        self.index = None;
    }

    /// What the user actually typed.
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Index of the selected suggestion, if cycling.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Select the next suggestion and return it.
    pub fn next<S: AsRef<str>>(&mut self, names: &[S]) -> Option<String> {
        match self.index {
            None => {
                let mut page = suggest(names, &self.typed, 0, 2);
                if page.is_empty() {
                    return None;
                }
                // Don't offer the exact text that is already in the field.
                let pick = usize::from(page.len() > 1 && page[0].eq_ignore_ascii_case(&self.typed));
                self.index = Some(pick);
                Some(page.swap_remove(pick))
            },
            Some(i) => {
                let found = suggest(names, &self.typed, i + 1, 1).pop()?;
                self.index = Some(i + 1);
                Some(found)
            },
        }
    }

    /// Step back one suggestion. Leaving the first suggestion returns the
    /// typed text and ends cycling.
    pub fn previous<S: AsRef<str>>(&mut self, names: &[S]) -> Option<String> {
        match self.index? {
            0 => {
                self.index = None;
                Some(self.typed.clone())
            },
            i => {
                self.index = Some(i - 1);
                suggest(names, &self.typed, i - 1, 1).pop()
            },
        }
    }

    /// The page of suggestions to display beside the input, starting at
    /// the selection and shifted back so it stays full near the end.
    pub fn window<S: AsRef<str>>(&self, names: &[S], count: usize) -> Vec<String> {
        let start = self.index.unwrap_or(0);
        let page = suggest(names, &self.typed, start, count);
        if start > 0 && page.len() < count {
            let back = start.saturating_sub(count - page.len());
            return suggest(names, &self.typed, back, count);
        }
        page
    }
}
