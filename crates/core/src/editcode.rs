//! Edit-code generation.
//!
//! An edit code is a low-entropy shared secret drawn from a small word
//! list. It gates page edits by obscurity and memorability, not by
//! cryptographic strength.

use rand::Rng;

/// Words an auto-generated edit code is drawn from.
pub const EDIT_WORDS: &[&str] = &[
    "acorn", "amber", "anchor", "apron", "autumn", "badger", "basil",
    "beacon", "birch", "bramble", "breeze", "butter", "candle", "canyon",
    "cedar", "cinder", "clover", "cobalt", "copper", "cricket", "dapple",
    "drift", "ember", "fable", "falcon", "fennel", "flint", "garnet",
    "ginger", "glade", "harbor", "hazel", "heron", "hollow", "ivory",
    "juniper", "kestrel", "lantern", "lichen", "linen", "maple", "marble",
    "meadow", "mossy", "nutmeg", "otter", "pebble", "pepper", "plume",
    "quill", "raven", "russet", "saffron", "sorrel", "sparrow", "thistle",
    "timber", "tulip", "walnut", "willow", "wren", "yarrow",
];

/// Source of freshly generated edit codes.
///
/// The lifecycle manager takes this as an injected collaborator so tests
/// can supply a deterministic implementation.
pub trait EditCodeSource: Send + Sync {
    fn generate(&self) -> String;
}

/// Default source: a uniform draw from [`EDIT_WORDS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WordlistCodes;

impl EditCodeSource for WordlistCodes {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        EDIT_WORDS[rng.random_range(0..EDIT_WORDS.len())].to_string()
    }
}
