use log::*;

/// Per-draft image bookkeeping: which candidate images the merchant keeps and which one is the cover image.
///
/// The primary image, when set, is always an included image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSelection {
    included: Vec<bool>,
    primary: Option<usize>,
}

impl ImageSelection {
    /// All `count` images included, the first one primary.
    pub fn all_included(count: usize) -> Self {
        let primary = if count > 0 { Some(0) } else { None };
        Self { included: vec![true; count], primary }
    }

    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    pub fn is_included(&self, index: usize) -> bool {
        self.included.get(index).copied().unwrap_or(false)
    }

    pub fn included(&self) -> &[bool] {
        &self.included
    }

    pub fn included_count(&self) -> usize {
        self.included.iter().filter(|v| **v).count()
    }

    pub fn primary(&self) -> Option<usize> {
        self.primary
    }

    /// Flips the inclusion flag of `index` and returns the new flag. Excluding the primary image moves the primary
    /// designation to the first image still included, or clears it if there is none. Re-including an image never
    /// makes it primary again.
    ///
    /// The caller is responsible for range-checking `index`.
    pub(crate) fn toggle(&mut self, index: usize) -> bool {
        let include = !self.included[index];
        self.included[index] = include;
        if !include && self.primary == Some(index) {
            self.primary = self.included.iter().position(|v| *v);
            trace!("🖼️ Primary image excluded. Primary is now {:?}", self.primary);
        }
        include
    }

    /// Makes `index` the primary image if it is included. Returns whether the primary changed hands.
    pub(crate) fn set_primary(&mut self, index: usize) -> bool {
        if !self.is_included(index) {
            return false;
        }
        self.primary = Some(index);
        true
    }

    pub(crate) fn select_all(&mut self, include: bool) {
        self.included.iter_mut().for_each(|v| *v = include);
        self.primary = if include && !self.included.is_empty() { Some(0) } else { None };
    }

    /// The included images of `images`, in order, and the position of the primary image among them (0 if the primary
    /// was never designated).
    pub fn apply<'a>(&self, images: &'a [String]) -> (Vec<&'a str>, usize) {
        let mut kept = Vec::with_capacity(images.len());
        let mut primary = None;
        for (i, image) in images.iter().enumerate() {
            if self.is_included(i) {
                if self.primary == Some(i) {
                    primary = Some(kept.len());
                }
                kept.push(image.as_str());
            }
        }
        (kept, primary.unwrap_or(0))
    }
}
