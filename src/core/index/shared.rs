//! Shared Lexicon Snapshot
//!
//! Queries run against an immutable `Arc<Lexicon>` snapshot. A catalog
//! refresh builds a whole new lexicon and swaps the Arc; in-flight
//! queries keep the snapshot they started with, never a mix.

use std::sync::{Arc, RwLock};

use super::builder::Lexicon;

pub struct SharedLexicon {
    inner: RwLock<Arc<Lexicon>>,
}

impl SharedLexicon {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            inner: RwLock::new(Arc::new(lexicon)),
        }
    }

    /// Current snapshot. Callers hold the Arc for the whole query; the
    /// lock is touched only here, never on the match path.
    pub fn load(&self) -> Arc<Lexicon> {
        self.inner.read().expect("lexicon lock poisoned").clone()
    }

    /// Publish a freshly built lexicon atomically.
    pub fn store(&self, lexicon: Lexicon) {
        *self.inner.write().expect("lexicon lock poisoned") = Arc::new(lexicon);
    }
}
