//! Navigation primitives used outside the component tree.
//!
//! The HTTP client has to redirect to login from arbitrary async contexts
//! where `use_navigate` is unavailable, so it goes through this seam instead.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::sync::{Mutex, PoisonError};

pub trait Navigator: Send + Sync {
    /// Path of the current page, without query or fragment.
    fn current_path(&self) -> String;
    /// Navigate to `path`, replacing the current history entry.
    fn replace(&self, path: &str);
}

/// `window.location` in the browser build; stays on `/` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_owned())
        }
        #[cfg(not(feature = "csr"))]
        {
            "/".to_owned()
        }
    }

    fn replace(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().replace(path);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}

/// Records navigations in memory.
#[derive(Debug)]
pub struct MemoryNavigator {
    path: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(path: &str) -> Self {
        Self { path: Mutex::new(path.to_owned()), history: Mutex::new(Vec::new()) }
    }

    /// Move to `path` without recording a redirect (user-driven navigation).
    pub fn visit(&self, path: &str) {
        *self.path.lock().unwrap_or_else(PoisonError::into_inner) = path.to_owned();
    }

    /// Every path passed to `replace`, oldest first.
    pub fn redirects(&self) -> Vec<String> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn replace(&self, path: &str) {
        self.visit(path);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
    }
}
