use std::collections::HashMap;

use crate::error::VocabularyError;

/// Keyboard key classes, in the order the detector is trained with.
///
/// The position of a name is its YOLO class id. Do not sort or reorder.
#[rustfmt::skip]
pub const KEYBOARD_CLASSES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "a", "accent", "ae", "alt-left", "altgr-right",
    "b", "c", "caret", "comma", "d", "del", "e", "enter",
    "f", "g", "h", "hash", "i", "j", "k", "keyboard", "l",
    "less", "m", "minus", "n", "o", "oe", "p", "plus",
    "point", "q", "r", "s", "shift-left", "shift-lock",
    "shift-right", "space", "ss", "strg-left", "strg-right",
    "t", "tab", "u", "ue", "v", "w", "x", "y", "z",
];

/// An ordered, duplicate-free list of class names mapping each name to its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassVocabulary {
    names: Vec<String>,
    ids: HashMap<String, usize>,
}

impl ClassVocabulary {
    /// Build a vocabulary from names in id order.
    pub fn new<I, S>(names: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut ids = HashMap::with_capacity(names.len());
        for (id, name) in names.iter().enumerate() {
            if ids.insert(name.clone(), id).is_some() {
                return Err(VocabularyError::Duplicate(name.clone()));
            }
        }

        Ok(Self { names, ids })
    }

    /// The built-in keyboard vocabulary.
    pub fn keyboard() -> Self {
        let names: Vec<String> = KEYBOARD_CLASSES.iter().map(|s| s.to_string()).collect();
        let ids = names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();
        Self { names, ids }
    }

    /// Use `label_list` when given, otherwise the keyboard vocabulary.
    pub fn from_label_list(label_list: &[String]) -> Result<Self, VocabularyError> {
        if label_list.is_empty() {
            Ok(Self::keyboard())
        } else {
            Self::new(label_list.iter().cloned())
        }
    }

    pub fn class_id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ClassVocabulary {
    fn default() -> Self {
        Self::keyboard()
    }
}
