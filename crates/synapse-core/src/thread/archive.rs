use super::model::Thread;

/// Historical threads of the selected project plus the selection pointer.
///
/// The list is replaced wholesale whenever the project selection changes.
/// Archiving removes a thread from the active set; the record itself is not
/// destroyed here (soft delete).
#[derive(Debug, Default)]
pub struct ThreadArchive {
    threads: Vec<Thread>,
    selected_id: Option<String>,
}

impl ThreadArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the thread list, keeping the selection only if the selected
    /// id survives the replacement.
    pub fn set_all(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
        if let Some(selected) = &self.selected_id
            && !self.threads.iter().any(|t| &t.id == selected)
        {
            self.selected_id = None;
        }
    }

    /// Sets the selection pointer. Unknown ids are ignored.
    pub fn select(&mut self, thread_id: Option<String>) {
        match thread_id {
            None => self.selected_id = None,
            Some(id) => {
                if self.threads.iter().any(|t| t.id == id) {
                    self.selected_id = Some(id);
                } else {
                    tracing::warn!("ignoring selection of unknown thread {}", id);
                }
            }
        }
    }

    /// Renames a thread. Local-only; threads are passive records and need
    /// no external confirmation. Returns false if the id is unknown.
    pub fn rename(&mut self, thread_id: &str, name: impl Into<String>) -> bool {
        match self.threads.iter_mut().find(|t| t.id == thread_id) {
            Some(thread) => {
                thread.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Removes a thread from the active set, clearing the selection if it
    /// pointed at the archived thread. Idempotent.
    pub fn archive(&mut self, thread_id: &str) -> bool {
        let before = self.threads.len();
        self.threads.retain(|t| t.id != thread_id);
        let removed = self.threads.len() != before;
        if removed && self.selected_id.as_deref() == Some(thread_id) {
            self.selected_id = None;
        }
        removed
    }

    pub fn get(&self, thread_id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == thread_id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Returns an owned snapshot of the active threads.
    pub fn snapshot(&self) -> Vec<Thread> {
        self.threads.clone()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}
