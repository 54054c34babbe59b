//! Desktop keys mapped onto handheld buttons
//!
//! The desktop build has no HID hardware, so keyboard keys stand in for the
//! buttons. Key names are lower-cased keyboard labels ("return", "lshift",
//! "w", ...). Button names are the upper-case button labels ("A", "START", ...).

use std::collections::{HashMap, HashSet};
use std::fmt;

use amius_core::Keys;

/// Default keyboard layout: (key, button)
const DEFAULT_BINDINGS: [(&str, Keys); 12] = [
    ("m", Keys::A),
    ("n", Keys::B),
    ("backslash", Keys::SELECT),
    ("return", Keys::START),
    ("d", Keys::DRIGHT),
    ("a", Keys::DLEFT),
    ("w", Keys::DUP),
    ("s", Keys::DDOWN),
    ("rshift", Keys::R),
    ("lshift", Keys::L),
    ("k", Keys::X),
    ("j", Keys::Y),
];

/// Error from applying key binding overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A button name that does not exist
    UnknownButton(String),
    /// The same key was given to more than one button
    DuplicateKey(String),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::UnknownButton(name) => {
                write!(f, "Unknown button name in key bindings: {}", name)
            }
            BindingError::DuplicateKey(key) => {
                write!(f, "Key bound to more than one button: {}", key)
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// Maps desktop key names to handheld buttons
#[derive(Debug, Clone)]
pub struct InputMapper {
    bindings: HashMap<String, Keys>,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl InputMapper {
    /// Mapper with the default layout
    pub fn new() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS
                .iter()
                .map(|&(key, button)| (key.to_string(), button))
                .collect(),
        }
    }

    /// Mapper with the default layout and the given overrides applied
    ///
    /// `overrides` maps button names to key names. Overrides are applied in
    /// button name order; a key named by two overrides is rejected.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self, BindingError> {
        let mut sorted: Vec<_> = overrides.iter().collect();
        sorted.sort();

        let mut seen = HashSet::new();
        let mut mapper = Self::new();
        for (name, key) in sorted {
            let button = Self::button_by_name(name)
                .ok_or_else(|| BindingError::UnknownButton(name.clone()))?;
            if !seen.insert(key.to_ascii_lowercase()) {
                return Err(BindingError::DuplicateKey(key.clone()));
            }
            mapper.bind(key, button);
        }
        Ok(mapper)
    }

    /// Parse a button name
    pub fn button_by_name(name: &str) -> Option<Keys> {
        let button = match name {
            "A" => Keys::A,
            "B" => Keys::B,
            "SELECT" => Keys::SELECT,
            "START" => Keys::START,
            "DRIGHT" => Keys::DRIGHT,
            "DLEFT" => Keys::DLEFT,
            "DUP" => Keys::DUP,
            "DDOWN" => Keys::DDOWN,
            "R" => Keys::R,
            "L" => Keys::L,
            "X" => Keys::X,
            "Y" => Keys::Y,
            _ => return None,
        };
        Some(button)
    }

    /// Bind `key` to `button`, dropping the button's previous key
    pub fn bind(&mut self, key: &str, button: Keys) {
        self.bindings.retain(|_, &mut b| b != button);
        self.bindings.insert(key.to_ascii_lowercase(), button);
    }

    /// Button bound to a key, if any. Matching ignores case.
    pub fn map_key(&self, name: &str) -> Option<Keys> {
        self.bindings.get(&name.to_ascii_lowercase()).copied()
    }

    /// Map a set of held key names to a button mask
    ///
    /// Unknown names are skipped with a warning.
    pub fn map_held<S: AsRef<str>>(&self, names: &[S]) -> Keys {
        names.iter().fold(Keys::empty(), |held, name| {
            match self.map_key(name.as_ref()) {
                Some(keys) => held | keys,
                None => {
                    log::warn!("Unmapped key name '{}'", name.as_ref());
                    held
                }
            }
        })
    }
}
