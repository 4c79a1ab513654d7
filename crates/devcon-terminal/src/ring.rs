//! Fixed-capacity character + tint storage for console output.
//!
//! Not a wrap-around ring: the oldest text always sits at index 0 and the
//! newest at `len - 1`. Overflow shifts the live region left, so renderers
//! can read `chars()` and `tints()` as plain contiguous slices.

use devcon_types::Tint;

/// Bounded output buffer with one tint per character.
#[derive(Debug, Clone)]
pub struct TextRing {
    chars: Vec<char>,
    tints: Vec<Tint>,
    len: usize,
}

impl TextRing {
    /// Create an empty buffer holding at most `capacity` characters.
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: vec![' '; capacity],
            tints: vec![Tint::default(); capacity],
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.chars.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live characters, oldest first.
    pub fn chars(&self) -> &[char] {
        &self.chars[..self.len]
    }

    /// Tints index-aligned with [`chars`](Self::chars).
    pub fn tints(&self) -> &[Tint] {
        &self.tints[..self.len]
    }

    /// Collect the live characters into a string.
    pub fn text(&self) -> String {
        self.chars().iter().collect()
    }

    /// Drop all content. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append `text` tagged with `tint`, evicting the oldest characters when
    /// the buffer would overflow.
    ///
    /// Returns how many characters were evicted, counting any leading part
    /// of `text` itself that did not fit.
    pub fn append(&mut self, text: &str, tint: Tint) -> usize {
        let incoming = text.chars().count();
        let capacity = self.capacity();

        if incoming >= capacity {
            // Only the tail of the incoming text survives.
            let evicted = self.len + incoming - capacity;
            for (slot, ch) in self.chars.iter_mut().zip(text.chars().skip(incoming - capacity)) {
                *slot = ch;
            }
            self.tints.fill(tint);
            self.len = capacity;
            return evicted;
        }

        let mut evicted = 0;
        if self.len + incoming > capacity {
            evicted = self.len + incoming - capacity;
            self.chars.copy_within(evicted..self.len, 0);
            self.tints.copy_within(evicted..self.len, 0);
            self.len -= evicted;
        }

        let end = self.len + incoming;
        for (slot, ch) in self.chars[self.len..end].iter_mut().zip(text.chars()) {
            *slot = ch;
        }
        self.tints[self.len..end].fill(tint);
        self.len = end;
        evicted
    }

    /// Iterate maximal spans of identically tinted characters.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            chars: self.chars(),
            tints: self.tints(),
        }
    }
}

/// Iterator over same-tint spans of a [`TextRing`].
pub struct Runs<'a> {
    chars: &'a [char],
    tints: &'a [Tint],
}

impl<'a> Iterator for Runs<'a> {
    type Item = (&'a [char], Tint);

    fn next(&mut self) -> Option<Self::Item> {
        let tint = *self.tints.first()?;
        let span = self.tints.iter().take_while(|t| **t == tint).count();
        let (run, rest) = self.chars.split_at(span);
        self.chars = rest;
        self.tints = &self.tints[span..];
        Some((run, tint))
    }
}
